pub mod args;
mod r#impl;
mod structs;

pub use args::CliArgs;
pub use r#impl::{
    DEFAULT_CONFIG_PATH, ENV_BASE_URL, ENV_FILE_STORAGE_PATH, ENV_PREFIX, ENV_SERVER_ADDRESS,
};
pub use structs::*;
