//! Login mode CLI logic
//!
//! Stores a credential set captured from a logged-in portal session.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    config::ConfigLoader,
    popup::PopupController,
    storage::FileStore,
    utils::format_account_id,
};

/// Arguments for login mode
#[derive(Debug)]
pub struct LoginArgs {
    pub auth_token: String,
    pub client_id: String,
    pub subscriber_id: String,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run login mode with the given arguments
pub async fn run_login_mode(args: LoginArgs) -> Result<()> {
    super::init_logging(args.verbose);

    let config_path = args
        .config
        .map(PathBuf::from)
        .or_else(ConfigLoader::get_config_path);
    let settings = ConfigLoader::new().load(config_path.as_deref())?;
    let storage = Arc::new(FileStore::at_default_path()?);
    let controller = PopupController::new(&settings, storage)?;

    let stored = controller
        .login(&args.auth_token, &args.client_id, &args.subscriber_id)
        .await?;

    println!(
        "Credentials stored for account {}. Run `slt-usage` to see your usage.",
        format_account_id(&stored)
    );
    Ok(())
}
