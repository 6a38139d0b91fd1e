//! Error types for the configuration boundary.
//!
//! The geometry core (metrics, spine, hit-testing) never fails; these errors
//! only come out of building a [`crate::SizingConfig`] or creating a card.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Errors raised while validating sizing configuration or card geometry
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid {field}: {source}")]
    #[diagnostic(
        code(timeline_cards::config::invalid_length),
        help("sizes, spacing and margins must be finite and non-negative")
    )]
    InvalidLength {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("icon fill ratio {value} is outside 0..=1")]
    #[diagnostic(code(timeline_cards::config::icon_scale))]
    IconScaleOutOfRange { value: f64 },

    #[error("invalid card width: {value}")]
    #[diagnostic(
        code(timeline_cards::config::invalid_width),
        help("card width must be finite and non-negative")
    )]
    InvalidWidth { value: f64 },
}
