//! Terminal popup
//!
//! The extension popup reimagined for the terminal: an onboarding screen
//! while credentials are missing, and a paginated usage screen with one
//! service-category group per page. Pagination is an explicit
//! [`PopupState`] value; rendering is pure text production over it.

pub mod controller;
pub mod render;
pub mod state;

pub use controller::{PopupController, ShowOptions};
pub use render::{
    FillLevel, QuotaBar, SpeedStatusView, format_last_updated, render_error, render_onboarding,
    render_usage, status_text,
};
pub use state::{PopupState, group_by_service};
