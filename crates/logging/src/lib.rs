#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` gives the diff, match and patch engines one shared vocabulary for
//! diagnostics. Each engine emits events through a subsystem macro
//! ([`trace_diff!`], [`trace_match!`], [`trace_patch!`]) that pins the event to
//! a stable `tracing` target, so callers can filter the engines independently
//! with an ordinary [`EnvFilter`](tracing_subscriber::EnvFilter) directive such
//! as `diffmatch::patch=debug`.
//!
//! # Design
//!
//! The engines never install a subscriber themselves. Binaries and tests that
//! want to see the events call [`init_tracing`] or [`init_tracing_from_env`]
//! once; libraries embedding the engines keep whatever subscriber they already
//! run. [`Subsystem`] names each engine's target and renders the filter
//! directives that enable it.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, trace_diff};
//!
//! trace_diff!(chars = 12, "bisect timed out");
//! assert_eq!(Subsystem::Diff.target(), "diffmatch::diff");
//! ```

mod subscriber;
mod tracing_macros;

pub use subscriber::{Subsystem, init_tracing, init_tracing_from_env};

#[doc(hidden)]
pub use tracing;
