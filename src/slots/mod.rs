pub mod expiration;
pub mod filter;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A validated, displayable unit derived from one qualifying slot.
///
/// Stringly-typed form encodings are decoded before construction: `link`
/// is `None` when the form held a blank value or the `"#"` placeholder,
/// and `duration` already carries the default for unusable `TEMPO_n`
/// values. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub url: String,
    pub link: Option<String>,
    pub alt: Option<String>,
    pub duration: Duration,
}
