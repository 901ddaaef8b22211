//! Unified CLI for the SLT Broadband Usage Checker
//!
//! This is the main binary that provides the show, login, and reset modes
//! through a unified command-line interface using subcommands.
//!
//! # Usage
//!
//! ## Show Mode (default)
//! ```bash
//! slt-usage
//! slt-usage --refresh --group 2
//! ```
//!
//! ## Login Mode
//! ```bash
//! slt-usage login --auth-token "bearer ..." --client-id "..." --subscriber-id 0712345678
//! ```
//!
//! ## Reset Mode
//! ```bash
//! slt-usage reset
//! ```
//!
//! ## Help and Version
//! ```bash
//! slt-usage --version
//! slt-usage --help
//! slt-usage login --help
//! ```

use clap::{Parser, Subcommand};

use slt_usage_checker::cli::{
    login::{LoginArgs, run_login_mode},
    reset::{ResetArgs, run_reset_mode},
    show::{ShowArgs, run_show_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "slt-usage")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Show mode options (when no subcommand is provided)
    /// Bypass the cache and fetch fresh data
    #[arg(short, long)]
    refresh: bool,

    /// Service-category group to display, zero-based
    #[arg(short, long, value_name = "GROUP")]
    group: Option<usize>,

    /// Use the fixed development dataset instead of the portal API
    #[arg(long)]
    mock: bool,

    /// Configuration file path
    #[arg(long, value_name = "CONFIG")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store portal session credentials
    Login {
        /// Bearer token from a logged-in portal session
        #[arg(long, value_name = "AUTH_TOKEN")]
        auth_token: String,

        /// Portal client id header value
        #[arg(long, value_name = "CLIENT_ID")]
        client_id: String,

        /// Subscriber id, with either the leading "0" or "94" prefix
        #[arg(long, value_name = "SUBSCRIBER_ID")]
        subscriber_id: String,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Clear stored credentials and cached usage data
    Reset {
        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Login {
            auth_token,
            client_id,
            subscriber_id,
            config,
            verbose,
        }) => {
            let args = LoginArgs {
                auth_token,
                client_id,
                subscriber_id,
                config,
                verbose,
            };
            run_login_mode(args).await
        }
        Some(Commands::Reset { config, verbose }) => {
            let args = ResetArgs { config, verbose };
            run_reset_mode(args).await
        }
        None => {
            // Show mode (default when no subcommand)
            let args = ShowArgs {
                refresh: cli.refresh,
                group: cli.group,
                mock: cli.mock,
                config: cli.config,
                verbose: cli.verbose,
            };
            run_show_mode(args).await
        }
    }
}
