/*!
 * Monitoring Module
 * Lifecycle events, event collection and structured tracing
 */

pub mod collector;
pub mod events;
pub mod tracer;

// Re-export for convenience
pub use collector::{Collector, EventCounts};
pub use events::{Category, Event, EventFilter, Payload, Severity};
pub use tracer::{generate_trace_id, init_tracing, OperationSpan};
