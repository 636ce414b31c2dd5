use alloc::string::String;

use thiserror::Error;

/// Errors raised while building a [`crate::ScrollWindow`] configuration.
///
/// Numeric options never fail: unparseable values fall back to their defaults. The only
/// rejected input is a scroll axis that is neither `Y` nor `X`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for scroll axis: {0:?} (expected \"Y\" or \"X\")")]
    InvalidScrollAxis(String),
}
