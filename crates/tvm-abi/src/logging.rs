//! Level macros used across the encoder and decoder.
//!
//! Each macro takes tracing's field syntax. Events reach `tracing` only with
//! the `logging` feature; otherwise the arguments are dropped unexpanded.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! debug!(name, ty = %ty, "decoding through external codec");
//! warn!(name, extra = 2, "ignoring trailing array items");
//! ```

#[cfg(feature = "logging")]
macro_rules! log_event {
    ($level:ident, $($arg:tt)*) => { tracing::$level!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_event {
    ($level:ident, $($arg:tt)*) => {};
}

macro_rules! log_trace {
    ($($arg:tt)*) => { $crate::logging::log_event!(trace, $($arg)*) };
}

macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::logging::log_event!(debug, $($arg)*) };
}

/// Recoverable oddities in decoded data.
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::logging::log_event!(warn, $($arg)*) };
}

/// Collaborator failures, logged just before they propagate.
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::logging::log_event!(error, $($arg)*) };
}

pub(crate) use log_debug as debug;
pub(crate) use log_error as error;
pub(crate) use log_event;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
