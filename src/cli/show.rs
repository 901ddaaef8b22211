//! Show mode CLI logic
//!
//! The default mode: render the onboarding or usage screen to stdout.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    config::ConfigLoader,
    popup::{PopupController, ShowOptions, render_error},
    storage::FileStore,
};

/// Arguments for show mode
#[derive(Debug)]
pub struct ShowArgs {
    pub refresh: bool,
    pub group: Option<usize>,
    pub mock: bool,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run show mode with the given arguments
pub async fn run_show_mode(args: ShowArgs) -> Result<()> {
    super::init_logging(args.verbose);

    let config_path = args
        .config
        .map(PathBuf::from)
        .or_else(ConfigLoader::get_config_path);
    let settings = ConfigLoader::new().load(config_path.as_deref())?;
    let storage = Arc::new(FileStore::at_default_path()?);
    let controller = PopupController::new(&settings, storage)?;

    let options = ShowOptions {
        force_refresh: args.refresh,
        group: args.group,
        mock: args.mock,
    };

    match controller.show(options).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            print!("{}", render_error(e.user_message()));
            std::process::exit(1);
        }
    }
}
