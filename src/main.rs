use clap::Parser;

use shortener::config::{AppConfig, CliArgs};
use shortener::runtime::run_server;
use shortener::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let config = match AppConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // 日志 guard 需要存活到进程退出
    let _log_guard = init_logging(&config.logging)?;

    run_server(config).await
}
