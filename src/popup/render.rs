//! Terminal rendering of usage data
//!
//! Pure functions from data to text. Each quota band becomes a progress bar
//! whose width is clamped to 100% while the status line keeps the unclamped
//! percentage, so an exceeded band reads differently from an exactly-full
//! one.

use chrono::NaiveDateTime;

use crate::{
    Result,
    popup::state::{PopupState, group_by_service},
    types::{CombinedUsage, UsageItem},
};

/// Character width of the progress bar
const BAR_WIDTH: usize = 25;

/// Format of the portal's `reported_time` field
const REPORTED_TIME_FORMAT: &str = "%d-%b-%Y %I:%M %p";

/// Fill tier of a progress bar, derived from the unclamped percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillLevel {
    Low,
    Medium,
    High,
    VeryHigh,
    Exceeded,
}

impl FillLevel {
    /// Tier for an unclamped used percentage.
    ///
    /// The exceeded check runs first so values at or above 100 never fall
    /// into the ordinary tiers.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            FillLevel::Exceeded
        } else if percentage < 25.0 {
            FillLevel::Low
        } else if percentage < 50.0 {
            FillLevel::Medium
        } else if percentage < 75.0 {
            FillLevel::High
        } else {
            FillLevel::VeryHigh
        }
    }

    /// Style-sheet class name for this tier
    pub fn css_class(&self) -> &'static str {
        match self {
            FillLevel::Low => "fill-low",
            FillLevel::Medium => "fill-medium",
            FillLevel::High => "fill-high",
            FillLevel::VeryHigh => "fill-very-high",
            FillLevel::Exceeded => "fill-exceeded",
        }
    }
}

/// One quota band's progress indicator
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaBar {
    /// Unclamped used percentage, drives status logic
    pub percentage: f64,
    /// Percentage clamped to [0, 100], drives the visual width
    pub width: f64,
    /// Fill tier
    pub fill: FillLevel,
}

impl QuotaBar {
    /// Build the bar for a used/limit pair.
    ///
    /// A zero limit only occurs in degenerate data; it renders as an empty
    /// bar rather than dividing by zero.
    pub fn for_amounts(used: f64, limit: f64) -> Self {
        let percentage = if limit > 0.0 {
            used / limit * 100.0
        } else {
            0.0
        };
        Self {
            percentage,
            width: percentage.clamp(0.0, 100.0),
            fill: FillLevel::from_percentage(percentage),
        }
    }

    fn ascii(&self) -> String {
        let filled = (self.width / 100.0 * BAR_WIDTH as f64).round() as usize;
        format!(
            "[{}{}]",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        )
    }
}

/// Status line for one quota band
pub fn status_text(item: &UsageItem) -> Result<String> {
    let used = item.used_amount()?;
    let limit = item.limit_amount()?;

    if used > limit {
        return Ok("Quota exceeded".to_string());
    }
    if used == limit {
        return Ok("Quota fully used".to_string());
    }

    let remaining = limit - used;
    let remaining_percentage = if limit > 0.0 {
        remaining / limit * 100.0
    } else {
        0.0
    };
    Ok(format!(
        "{:.2} {} remaining ({:.1}%), valid till {}",
        remaining, item.volume_unit, remaining_percentage, item.expiry_date
    ))
}

/// Structured speed-status presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedStatusView {
    /// Display text
    pub text: String,
    /// Style-sheet class name for the pill
    pub css_class: &'static str,
    /// Whether an "Extra GB" affordance is offered alongside the pill
    pub extra_gb_clickable: bool,
}

impl SpeedStatusView {
    /// Derive the presentation from the portal status string.
    ///
    /// The affordance is only offered while the speed is normal and leftover
    /// add-on data exists to point at.
    pub fn from_status(status: &str, has_leftover_addon_data: bool) -> Self {
        match status.trim().to_lowercase().as_str() {
            "normal" => Self {
                text: "Speed is Normal".to_string(),
                css_class: "status-normal",
                extra_gb_clickable: has_leftover_addon_data,
            },
            "throttle" | "throttled" => Self {
                text: "Speed is Throttled".to_string(),
                css_class: "status-throttled",
                extra_gb_clickable: false,
            },
            other => Self {
                text: title_case(other),
                css_class: "status-other",
                extra_gb_clickable: false,
            },
        }
    }
}

/// Whether any add-on band (anything outside the main pack) still has data
/// remaining
pub fn has_leftover_addon_data(items: &[UsageItem]) -> bool {
    items.iter().any(|item| {
        item.service_name != "Main Pack"
            && match (item.used_amount(), item.limit_amount()) {
                (Ok(used), Ok(limit)) => limit - used > 0.0,
                _ => item.remaining_amount().is_some_and(|r| r > 0.0),
            }
    })
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the "last updated" line from the portal-reported snapshot time.
///
/// An unparseable value falls back to "Unknown" rather than failing the
/// whole render.
pub fn format_last_updated(reported_time: &str, now: NaiveDateTime) -> String {
    match NaiveDateTime::parse_from_str(reported_time.trim(), REPORTED_TIME_FORMAT) {
        Ok(reported) => {
            let minutes = (now - reported).num_minutes().max(0);
            if minutes < 1 {
                format!("Last updated: {} (just now)", reported_time.trim())
            } else {
                format!("Last updated: {} ({} min ago)", reported_time.trim(), minutes)
            }
        }
        Err(_) => "Last updated: Unknown".to_string(),
    }
}

/// Render the onboarding screen shown while credentials are missing
pub fn render_onboarding(login_url: &str) -> String {
    let mut out = String::new();
    out.push_str("Welcome to SLT Usage Checker\n\n");
    out.push_str("No portal session found. Log in to the MySLT portal, capture\n");
    out.push_str("the session headers, and store them with:\n\n");
    out.push_str("  slt-usage login --auth-token <bearer> --client-id <id> --subscriber-id <number>\n\n");
    out.push_str(&format!("Portal login: {}\n", login_url));
    out
}

/// Render the error screen
pub fn render_error(message: &str) -> String {
    format!(
        "{}\n\nRun `slt-usage reset` to clear stored data and re-authenticate.\n",
        message
    )
}

/// Render the usage screen: account header, speed pill, the selected group,
/// bullet indicators, and the last-updated line
pub fn render_usage(
    account_id: &str,
    combined: &CombinedUsage,
    state: &PopupState,
    now: NaiveDateTime,
) -> Result<String> {
    let groups = group_by_service(&combined.usage_data);
    let speed = SpeedStatusView::from_status(
        &combined.speed_status,
        has_leftover_addon_data(&combined.usage_data),
    );

    let mut out = String::new();
    out.push_str(&format!("Account: {}\n", account_id));
    out.push_str(&format!("Speed:   {}", speed.text));
    if speed.extra_gb_clickable {
        out.push_str("  [Extra GB available]");
    }
    out.push('\n');
    out.push('\n');

    if let Some((service_name, items)) = groups.get(state.current_page) {
        out.push_str(&format!("── {} ──\n", service_name));
        for item in items {
            let bar = QuotaBar::for_amounts(item.used_amount()?, item.limit_amount()?);
            out.push_str(&format!("{}\n", item.name));
            out.push_str(&format!(
                "  {} {:.1}% used ({} / {} {})\n",
                bar.ascii(),
                bar.percentage,
                item.used,
                item.limit,
                item.volume_unit
            ));
            out.push_str(&format!("  {}\n", status_text(item)?));
        }
        out.push('\n');
    }

    out.push_str(&format!("  {}\n", state.bullets()));
    out.push_str(&format!("{}\n", format_last_updated(&combined.reported_time, now)));

    Ok(out)
}
