/*!
 * Tracing
 * Subscriber setup and spans for simulation runs
 *
 * Engines only emit events; installing a subscriber is left to the host
 * binary. Library users who never call [`init_tracing`] pay nothing.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Install the global subscriber
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SIM_TRACE_JSON: Enable JSON output (default: false)
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SIM_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "Tracing initialized");
    }
    installed
}

/// Span covering one simulation run of an engine
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    run_id: u64,
    engine: &'static str,
}

impl RunSpan {
    pub fn new(engine: &'static str) -> Self {
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let span = span!(
            Level::INFO,
            "run",
            run_id,
            engine,
            ticks = tracing::field::Empty,
            operations = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        debug!(parent: &span, run_id, engine, "run started");

        Self {
            span,
            start: Instant::now(),
            run_id,
            engine,
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn record_ticks(&self, ticks: u64) {
        self.span.record("ticks", ticks);
    }

    pub fn record_operations(&self, count: usize) {
        self.span.record("operations", count);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_millis() as u64;
        self.span.record("duration_ms", elapsed);
        debug!(
            parent: &self.span,
            run_id = self.run_id,
            engine = self.engine,
            duration_ms = elapsed,
            "run finished"
        );
    }
}

/// Convenience constructor for [`RunSpan`]
pub fn span_run(engine: &'static str) -> RunSpan {
    RunSpan::new(engine)
}
