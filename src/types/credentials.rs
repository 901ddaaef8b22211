//! Portal session credentials
//!
//! The three pieces of session material the portal API requires. They are
//! captured together from a logged-in portal session and stored as a unit;
//! usage fetching is disallowed unless all three are present.

use serde::{Deserialize, Serialize};

/// Session credentials for the portal API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token from the portal's `authorization` header
    pub auth_token: String,

    /// Portal client id (`x-ibm-client-id` header value)
    pub client_id: String,

    /// Subscriber id in the international (`94`-prefixed) form
    pub subscriber_id: String,
}

impl Credentials {
    /// Create a new credential set
    pub fn new(
        auth_token: impl Into<String>,
        client_id: impl Into<String>,
        subscriber_id: impl Into<String>,
    ) -> Self {
        Self {
            auth_token: auth_token.into(),
            client_id: client_id.into(),
            subscriber_id: subscriber_id.into(),
        }
    }
}
