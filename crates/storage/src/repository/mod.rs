pub mod kv;
pub mod participant;
pub mod settings;

/// Key holding the serialized participant array.
pub const PARTICIPANTS_KEY: &str = "gems_participants";

/// Key holding the configured spreadsheet webhook URL.
pub const GOOGLE_SHEET_URL_KEY: &str = "gems_google_sheet_url";
