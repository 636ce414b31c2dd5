//! A headless windowing engine for infinite-scroll lists and grids.
//!
//! Given the viewport size, a uniform item size and the current scroll offset, the engine
//! works out which prefix of a large collection should be mounted, how many extra pages of
//! padding to keep around the viewport, and how large the leading/trailing spacers must be
//! to preserve scrollbar proportions. It then commits that slice only when it actually
//! changed, rate-limited so a burst of scroll events costs one re-render.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - viewport and item dimensions (from layout measurement)
//! - scroll position updates (from scroll events)
//! - collection updates (from whatever loads data)
//! - a clock, as `now_ms` timestamps and periodic [`ScrollWindow::tick`] calls
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod metrics;
mod options;
mod rate_limit;
mod state;
mod types;
mod window;


pub use error::ConfigError;
pub use metrics::WindowMetrics;
pub use options::{BindingArgs, VisibleItemsCallback, WindowOptions};
pub use rate_limit::{DEFAULT_RATE_LIMIT_MS, RateLimiter};
pub use state::WindowState;
pub use types::{RateLimitMethod, ScrollAxis, UNKNOWN};
pub use window::ScrollWindow;
