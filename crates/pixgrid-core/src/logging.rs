#![forbid(unsafe_code)]

//! Structured logging for the paint engine.
//!
//! Grid and engine code log through `crate::info!`, `crate::debug!` and
//! friends. With the `tracing` feature those names are the `tracing` macros;
//! without it they are exported here as macros that expand to nothing, and
//! `debug_span!` yields an inert [`NoopSpan`]. Levels in use:
//!
//! | level | events |
//! |-------|--------|
//! | `error` | ledger entry pointing outside the grid |
//! | `warn` | resize request clamped |
//! | `info` | grid rebuilt |
//! | `debug` | fill span, undo/redo, mode change, script replayed |
//! | `trace` | every committed cell write |
//!
//! The `tracing-json` feature adds [`init_json_logging`] for binaries.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discards a `debug` event.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards an `error` event.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// Discards an `info` event.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Discards a `trace` event.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards a `warn` event.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Stands in for a `debug` span; the fields are never evaluated.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span returned by `debug_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

/// Environment variable holding the `EnvFilter` directives for
/// [`init_json_logging`].
#[cfg(feature = "tracing-json")]
pub const LOG_ENV: &str = "PIXGRID_LOG";

/// Install a global JSON subscriber filtered by `PIXGRID_LOG` (default
/// `info`).
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
}

#[cfg(test)]
mod tests {
    use crate::cell::CellId;
    use crate::color::Rgb;

    #[test]
    fn macros_accept_structured_fields() {
        let cell = CellId::new(2);
        let color = Rgb::new(1, 2, 3);
        let span = crate::debug_span!("stroke", cells = 4);
        let _guard = span.enter();
        crate::trace!(cell = %cell, color = %color, "cell painted");
        crate::debug!(cells = 4_usize, grouped = true, "undo");
        crate::info!(side = 8_u16, "grid rebuilt");
        crate::warn!(requested = 0_usize, "grid size clamped");
        crate::error!(%cell, "history references a dead cell");
        let _ = (cell, color);
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_json_install_fails() {
        let first = super::init_json_logging();
        let second = super::init_json_logging();
        assert!(first.is_err() || second.is_err());
    }
}
