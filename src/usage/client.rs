//! Portal API client
//!
//! Issues authenticated requests against the five quota endpoints and
//! normalizes each response into the common [`UsageItem`] shape.

use reqwest::Client;
use tracing::{debug, info};

use crate::{
    Result,
    config::Settings,
    types::{BundleResponse, CombinedUsage, Credentials, SummaryResponse, UsageItem},
};

/// The primary endpoint; supplies `reported_time` and `speed_status` for the
/// combined result in addition to the main-pack quota bands.
const USAGE_SUMMARY: &str = "UsageSummary";

/// Add-on endpoints and the service category their items are tagged with
const ADDON_ENDPOINTS: [(&str, &str); 4] = [
    ("ExtraGB", "Extra GB"),
    ("BonusData", "Bonus Data"),
    ("GetDashboardVASBundles", "Add-Ons Data"),
    ("FreeData", "Free Data"),
];

/// HTTP client for the portal usage API
#[derive(Debug, Clone)]
pub struct UsageClient {
    /// Configured HTTP client
    http: Client,
    /// Base URL of the usage API
    base_url: String,
}

impl UsageClient {
    /// Create a client from the given settings.
    ///
    /// Applies the configured user agent, request timeout, and proxy.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(settings.network.user_agent.clone())
            .timeout(std::time::Duration::from_secs(settings.network.request_timeout));

        if let Some(proxy_url) = settings.get_proxy_url() {
            let proxy = reqwest::Proxy::all(&proxy_url)?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: settings.portal.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and combine all quota data for the given credentials.
    ///
    /// The five endpoint calls run concurrently; if any one fails the whole
    /// operation fails and no partial result is returned.
    pub async fn fetch_all(&self, credentials: &Credentials) -> Result<CombinedUsage> {
        info!(
            "Fetching usage data for subscriber {}",
            credentials.subscriber_id
        );

        let (summary, extra_gb, bonus_data, vas_bundles, free_data) = tokio::try_join!(
            self.fetch_usage_summary(credentials),
            self.fetch_addon(credentials, ADDON_ENDPOINTS[0]),
            self.fetch_addon(credentials, ADDON_ENDPOINTS[1]),
            self.fetch_addon(credentials, ADDON_ENDPOINTS[2]),
            self.fetch_addon(credentials, ADDON_ENDPOINTS[3]),
        )?;

        let mut usage_data = summary.usage_data;
        usage_data.extend(extra_gb);
        usage_data.extend(bonus_data);
        usage_data.extend(vas_bundles);
        usage_data.extend(free_data);

        debug!("Combined {} quota bands", usage_data.len());

        Ok(CombinedUsage {
            reported_time: summary.reported_time,
            speed_status: summary.speed_status,
            usage_data,
        })
    }

    /// Fetch the primary endpoint
    async fn fetch_usage_summary(&self, credentials: &Credentials) -> Result<CombinedUsage> {
        let response: SummaryResponse = self.get_json(USAGE_SUMMARY, credentials).await?;
        let bundle = response.data_bundle;

        let usage_data = bundle
            .my_package_info
            .usage_details
            .into_iter()
            .map(|item| item.tagged("Main Pack", "/UsageSummary"))
            .collect();

        Ok(CombinedUsage {
            reported_time: bundle.reported_time,
            speed_status: bundle.status,
            usage_data,
        })
    }

    /// Fetch one add-on endpoint and tag its items
    async fn fetch_addon(
        &self,
        credentials: &Credentials,
        (endpoint, service_name): (&str, &str),
    ) -> Result<Vec<UsageItem>> {
        let response: BundleResponse = self.get_json(endpoint, credentials).await?;
        let fetched_from = format!("/{}", endpoint);

        Ok(response
            .data_bundle
            .usage_details
            .into_iter()
            .map(|item| item.tagged(service_name, &fetched_from))
            .collect())
    }

    /// Perform one authenticated GET and decode the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        credentials: &Credentials,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("subscriberID", credentials.subscriber_id.as_str())])
            .header("accept", "application/json, text/plain, */*")
            .header("authorization", &credentials.auth_token)
            .header("x-ibm-client-id", &credentials.client_id)
            .send()
            .await
            .map_err(|e| crate::Error::api(endpoint, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::api_status(endpoint, status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| crate::Error::api(endpoint, &format!("invalid response body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> UsageClient {
        let mut settings = Settings::default();
        settings.portal.base_url = base_url.to_string();
        UsageClient::new(&settings).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client_for("https://example.test/api/");
        // Trailing slash is normalized away
        assert_eq!(client.base_url, "https://example.test/api");
    }

    #[test]
    fn test_addon_endpoint_table() {
        let names: Vec<&str> = ADDON_ENDPOINTS.iter().map(|(_, name)| *name).collect();
        assert_eq!(
            names,
            vec!["Extra GB", "Bonus Data", "Add-Ons Data", "Free Data"]
        );
    }
}
