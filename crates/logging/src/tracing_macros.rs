//! crates/logging/src/tracing_macros.rs
//! Convenience macros for engine-specific tracing.
//!
//! These macros wrap the standard tracing macros with the target of the
//! engine that emits the event.

/// Emit a diff engine trace.
///
/// # Example
/// ```ignore
/// trace_diff!("bisect timed out after {} steps", d);
/// ```
#[macro_export]
macro_rules! trace_diff {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "diffmatch::diff", $($arg)*);
    };
}

/// Emit a match engine trace.
///
/// # Example
/// ```ignore
/// trace_match!("pattern of {} chars exceeds bitap width", len);
/// ```
#[macro_export]
macro_rules! trace_match {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "diffmatch::match", $($arg)*);
    };
}

/// Emit a patch engine trace.
///
/// # Example
/// ```ignore
/// trace_patch!("patch {} relocated by {}", index, delta);
/// ```
#[macro_export]
macro_rules! trace_patch {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "diffmatch::patch", $($arg)*);
    };
}
