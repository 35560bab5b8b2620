//! Rotating banner carousel engine for Fluig portal widgets.
//!
//! A widget instance is configured through a platform form (up to four
//! image/link/validity/duration slots) stored in the `ds_frm_banner`
//! dataset. The engine fetches that record, filters the slots into
//! displayable slides and drives a timer-based rotation with manual
//! indicator navigation.
//!
//! The host page supplies two collaborators: a [`ConfigSource`] for the
//! configuration query ([`DatasetClient`] is the HTTP implementation)
//! and a [`Surface`] for the markup mutations. [`BannerWidget`] ties
//! them together.

pub mod config;
pub mod dataset;
pub mod error;
pub mod render;
pub mod rotation;
pub mod slots;
pub mod widget;

pub use dataset::client::DatasetClient;
pub use dataset::{ConfigRecord, ConfigSource};
pub use error::{BannerError, Result};
pub use render::surface::{MemorySurface, Surface};
pub use rotation::controller::Rotator;
pub use rotation::session::RotationSession;
pub use slots::Slide;
pub use widget::BannerWidget;
