//! Command-line arguments
//!
//! The short flags mirror the environment variables that override them:
//! `-a` → `SERVER_ADDRESS`, `-b` → `BASE_URL`, `-f` → `FILE_STORAGE_PATH`.

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "shortener", version, about = "Deterministic URL shortener")]
pub struct CliArgs {
    /// Server address in the form host:port
    #[arg(short = 'a', long = "address", value_name = "HOST:PORT")]
    pub server_address: Option<String>,

    /// Base URL of returned short links, e.g. http://host:port
    #[arg(short = 'b', long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// File storage path; leave empty to keep links in memory
    #[arg(short = 'f', long = "file-storage-path", value_name = "PATH")]
    pub file_storage_path: Option<String>,

    /// TOML configuration file (defaults to ./config.toml when present)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
