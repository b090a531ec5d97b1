//! crates/logging/src/subscriber.rs
//! Subscriber setup and target routing for the engine subsystems.

use std::fmt;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Engine that emitted a tracing event.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Subsystem {
    /// Diff engine: bisection, half-match, line mode and cleanup passes.
    Diff,
    /// Match engine: Bitap search and its exact-match fallbacks.
    Match,
    /// Patch engine: construction, serialization and application.
    Patch,
}

impl Subsystem {
    /// All subsystems, in dependency order.
    pub const ALL: [Self; 3] = [Self::Diff, Self::Match, Self::Patch];

    /// Returns the tracing target used by this subsystem's macro.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Diff => "diffmatch::diff",
            Self::Match => "diffmatch::match",
            Self::Patch => "diffmatch::patch",
        }
    }

    /// Filter directive enabling this subsystem at `level`.
    #[must_use]
    pub fn directive(self, level: &str) -> String {
        format!("{}={level}", self.target())
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Diff => "diff",
            Self::Match => "match",
            Self::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Installs a formatting subscriber filtered by `filter`.
///
/// Returns `false` when a global subscriber was already installed, which
/// happens routinely when several tests initialise tracing.
///
/// # Example
///
/// ```rust,ignore
/// use logging::init_tracing;
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing(EnvFilter::new("diffmatch::patch=debug"));
/// ```
pub fn init_tracing(filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// Installs a formatting subscriber configured from `RUST_LOG`.
///
/// Falls back to `warn` for every engine target when the variable is unset
/// or unparsable.
pub fn init_tracing_from_env() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());
    init_tracing(filter)
}

fn default_filter() -> EnvFilter {
    let directives: Vec<String> = Subsystem::ALL
        .iter()
        .map(|subsystem| subsystem.directive("warn"))
        .collect();
    EnvFilter::new(directives.join(","))
}
