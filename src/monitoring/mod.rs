/*!
 * Monitoring
 * Structured logging setup and run-level tracing spans
 */

mod tracer;

pub use tracer::{init_tracing, span_run, RunSpan};
