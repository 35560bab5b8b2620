use std::time::Duration;

use chrono::{DateTime, Local};
use log::debug;

use crate::config::{DEFAULT_SLIDE_SECS, SLOT_COUNT, SLOT_ENABLED};
use crate::dataset::ConfigRecord;

use super::expiration::is_expired;
use super::Slide;

/// Select the displayable slides from a raw configuration record.
///
/// Slots are visited in ascending order, which fixes the display order.
/// A slot qualifies when it is enabled, has a non-blank image URL and its
/// validity date has not passed. Disqualified slots are skipped silently;
/// an empty result is a valid outcome, not an error.
pub fn select_slides(record: &ConfigRecord, now: DateTime<Local>) -> Vec<Slide> {
    let mut slides = Vec::new();

    for slot in 1..=SLOT_COUNT {
        let enabled = record.slot_field("ATIVO", slot) == Some(SLOT_ENABLED);
        let url = record
            .slot_field("URLIMAGEM", slot)
            .map(str::trim)
            .filter(|u| !u.is_empty());
        let expired = record
            .slot_field("VALIDADE", slot)
            .is_some_and(|v| is_expired(v, now));

        debug!(
            "slot {slot}: enabled={enabled} url={} expired={expired}",
            if url.is_some() { "ok" } else { "blank" }
        );

        if !enabled || expired {
            continue;
        }
        let Some(url) = url else { continue };

        slides.push(Slide {
            url: url.to_string(),
            link: usable_link(record.slot_field("LINK", slot)),
            alt: record
                .slot_field("ALT", slot)
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
            duration: slot_duration(record.slot_field("TEMPO", slot)),
        });
    }

    slides
}

/// Decode the link field: blank values and the `"#"` placeholder mean
/// "no link".
fn usable_link(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|l| !l.is_empty() && *l != "#")
        .map(String::from)
}

/// Seconds a slide stays visible. Absent, unparseable and non-positive
/// values fall back to the default.
fn slot_duration(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|t| t.trim().parse::<i64>().ok())
        .filter(|s| *s > 0)
        .map(|s| s as u64)
        .unwrap_or(DEFAULT_SLIDE_SECS);
    Duration::from_secs(secs)
}
