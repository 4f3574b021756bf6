mod webhook;

pub use webhook::WebhookSheetSink;

/// Only URLs on this host are treated as a configured spreadsheet endpoint.
pub const TRUSTED_PREFIX: &str = "https://script.google.com";

/// Receiving script an administrator deploys as a spreadsheet web app.
pub const APPS_SCRIPT_SOURCE: &str = include_str!("apps_script.js");

/// A webhook URL that passed the trusted-host check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEndpoint(String);

impl SheetEndpoint {
    pub fn from_configured(url: Option<&str>) -> Option<Self> {
        let url = url?.trim();
        url.starts_with(TRUSTED_PREFIX).then(|| Self(url.to_string()))
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

pub fn is_configured(url: Option<&str>) -> bool {
    SheetEndpoint::from_configured(url).is_some()
}

/// What the caller can know about a fire-and-forget delivery.
///
/// The receiver's reply is never inspected, so `Delivered` only means the
/// request reached the remote host, not that a row was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Unknown { reason: String },
}
