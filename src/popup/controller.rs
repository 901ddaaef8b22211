//! Popup controller
//!
//! Owns the show/login/reset flows: decides between the onboarding and usage
//! screens, drives the usage service, fires the analytics events tied to
//! each transition, and hands the renderer an explicit pagination state.

use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    Result,
    analytics::Telemetry,
    config::Settings,
    popup::{
        render::{render_onboarding, render_usage},
        state::{PopupState, group_by_service},
    },
    storage::StateStorage,
    types::Credentials,
    usage::UsageService,
    utils::{format_account_id, get_version, normalize_subscriber_id},
};

/// Options for the show flow
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    /// Bypass the cache even when fresh
    pub force_refresh: bool,
    /// Group page to select, zero-based
    pub group: Option<usize>,
    /// Use the fixed development dataset instead of the portal API
    pub mock: bool,
}

/// Controller for the terminal popup
#[derive(Debug)]
pub struct PopupController {
    storage: Arc<dyn StateStorage>,
    service: UsageService,
    telemetry: Telemetry,
    login_url: String,
}

impl PopupController {
    /// Create a controller over the given storage
    pub fn new(settings: &Settings, storage: Arc<dyn StateStorage>) -> Result<Self> {
        Ok(Self {
            service: UsageService::new(settings, storage.clone())?,
            telemetry: Telemetry::new(settings, storage.clone())?,
            storage,
            login_url: settings.portal.login_url.clone(),
        })
    }

    /// Render the popup: onboarding while credentials are missing, otherwise
    /// the selected usage group.
    ///
    /// A failed fetch fires an `error` analytics event and propagates; the
    /// caller decides how to present it.
    pub async fn show(&self, options: ShowOptions) -> Result<String> {
        self.sync_version_marker().await?;

        let document = self.storage.load().await?;
        let Some(credentials) = document.credentials() else {
            info!("No stored credentials, showing onboarding");
            self.telemetry.page_view("Onboarding", "popup/onboarding").await;
            return Ok(render_onboarding(&self.login_url));
        };

        if options.force_refresh {
            self.telemetry
                .track("refresh_clicked", serde_json::json!({}))
                .await;
        }

        let fetched = if options.mock {
            self.service.get_mock_usage().await
        } else {
            self.service.get_usage(options.force_refresh).await
        };

        let (combined, source) = match fetched {
            Ok(result) => result,
            Err(e) => {
                self.telemetry
                    .track(
                        "error",
                        serde_json::json!({
                            "error_type": e.category(),
                            "message": e.to_string(),
                        }),
                    )
                    .await;
                return Err(e);
            }
        };

        self.telemetry.page_view("Usage", "popup/usage").await;
        self.telemetry
            .track(
                "usage_checked",
                serde_json::json!({"data_source": source.label()}),
            )
            .await;
        self.telemetry
            .track(
                "speed_status_checked",
                serde_json::json!({"speed_status": combined.speed_status}),
            )
            .await;

        let groups = group_by_service(&combined.usage_data);
        let mut state = PopupState::new(groups.len());
        if let Some(page) = options.group
            && !state.go_to_page(page)
        {
            warn!(
                "Group {} out of range, showing group 0 of {}",
                page,
                state.total_pages
            );
        }

        if let Some((service_name, items)) = groups.get(state.current_page) {
            self.telemetry
                .track(
                    "group_viewed",
                    serde_json::json!({
                        "service_name": service_name,
                        "item_name": items.first().map(|item| item.name.as_str()),
                    }),
                )
                .await;
        }

        render_usage(
            &format_account_id(&credentials.subscriber_id),
            &combined,
            &state,
            Local::now().naive_local(),
        )
    }

    /// Store a credential set, normalizing the subscriber id to its
    /// international form. Returns the stored subscriber id.
    pub async fn login(&self, auth_token: &str, client_id: &str, subscriber_id: &str) -> Result<String> {
        let normalized = normalize_subscriber_id(subscriber_id);

        let mut document = self.storage.load().await?;
        document.set_credentials(&Credentials::new(auth_token, client_id, normalized.clone()));
        self.storage.save(&document).await?;

        self.telemetry
            .track("welcome_login_clicked", serde_json::json!({}))
            .await;

        info!("Stored credentials for subscriber {}", normalized);
        Ok(normalized)
    }

    /// Clear session material and the usage cache.
    ///
    /// The version marker and analytics identity survive.
    pub async fn reset(&self) -> Result<()> {
        self.telemetry
            .track("extension_reset", serde_json::json!({}))
            .await;

        let mut document = self.storage.load().await?;
        document.clear_session_data();
        self.storage.save(&document).await?;

        info!("Stored session data cleared");
        Ok(())
    }

    /// Keep the persisted version marker current, firing install/update
    /// events on change
    async fn sync_version_marker(&self) -> Result<()> {
        let mut document = self.storage.load().await?;
        let current = get_version();

        match document.app_version.as_deref() {
            Some(stored) if stored == current => return Ok(()),
            Some(stored) => {
                self.telemetry
                    .track(
                        "extension_updated",
                        serde_json::json!({"previous_version": stored}),
                    )
                    .await;
            }
            None => {
                self.telemetry
                    .track("extension_installed", serde_json::json!({}))
                    .await;
            }
        }

        document.app_version = Some(current.to_string());
        self.storage.save(&document).await
    }
}
