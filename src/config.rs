/// Default platform server base URL.
/// Override at build time: BANNER_SERVER_URL=https://example.com cargo build
pub const SERVER_URL: &str = match option_env!("BANNER_SERVER_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// Dataset backing the banner configuration form.
pub const DATASET_NAME: &str = "ds_frm_banner";

/// Dataset field holding the widget instance identifier.
pub const FIELD_WIDGET_ID: &str = "WIDGET_ID";

/// Metadata flag marking the current (non-deleted) form record.
/// The platform stores metadata as text, so the filter compares against
/// the literal string "true".
pub const FIELD_ACTIVE: &str = "metadata#active";

/// Number of slots on the configuration form.
pub const SLOT_COUNT: u8 = 4;

/// Value of `ATIVO_n` that enables a slot.
pub const SLOT_ENABLED: &str = "Sim";

/// Placeholder the calendar widget leaves in an untouched validity field.
pub const DATE_PLACEHOLDER: &str = "dd/mm/aaaa";

/// Seconds a slide stays visible when `TEMPO_n` is absent or unusable.
pub const DEFAULT_SLIDE_SECS: u64 = 5;
