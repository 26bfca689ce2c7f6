//! Logging facilities for taglabel.
//!
//! taglabel uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("taglabel=debug")
//!     .init();
//! ```
//!
//! Every event is emitted under one of the [`targets`] so that subsystems can
//! be filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core plumbing target.
    pub const CORE: &str = "taglabel_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "taglabel_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "taglabel_core::property";
    /// Line layout target.
    pub const LAYOUT: &str = "taglabel::layout";
    /// Hashtag and mention scanning target.
    pub const TOKENS: &str = "taglabel::tokens";
    /// Attribute decoration target.
    pub const DECORATE: &str = "taglabel::decorate";
    /// Truncation engine target.
    pub const TRUNCATE: &str = "taglabel::truncate";
    /// Hit testing target.
    pub const HIT_TEST: &str = "taglabel::hit_test";
    /// Widget state machine target.
    pub const WIDGET: &str = "taglabel::widget";
    /// Performance spans target.
    pub const PERF: &str = "taglabel::perf";
}

/// A guard that records how long an operation takes.
///
/// The span is entered on creation and closed when the guard is dropped, so
/// a subscriber with span timing enabled reports the duration.
///
/// ```
/// use taglabel_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("render");
///     // work measured here
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::LAYOUT,
            targets::TOKENS,
            targets::DECORATE,
            targets::TRUNCATE,
            targets::HIT_TEST,
            targets::WIDGET,
        ] {
            assert!(target.starts_with("taglabel::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
        tracing::debug!(target: targets::CORE, step = 1, "inside perf span");
    }
}
