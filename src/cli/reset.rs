//! Reset mode CLI logic
//!
//! Clears stored session material and the usage cache.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{config::ConfigLoader, popup::PopupController, storage::FileStore};

/// Arguments for reset mode
#[derive(Debug)]
pub struct ResetArgs {
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run reset mode with the given arguments
pub async fn run_reset_mode(args: ResetArgs) -> Result<()> {
    super::init_logging(args.verbose);

    let config_path = args
        .config
        .map(PathBuf::from)
        .or_else(ConfigLoader::get_config_path);
    let settings = ConfigLoader::new().load(config_path.as_deref())?;
    let storage = Arc::new(FileStore::at_default_path()?);
    let controller = PopupController::new(&settings, storage)?;

    match controller.reset().await {
        Ok(()) => {
            println!("Stored data cleared. Log in again with `slt-usage login`.");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
