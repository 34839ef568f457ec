//! Observability setup for the widget relay: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
