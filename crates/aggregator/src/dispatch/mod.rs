//! Job dispatch.
//!
//! This module provides the concurrent core of the pipeline:
//! - A bounded worker pool consuming lookup jobs
//! - Per-job fan-out to every source with a timeout at the join point
//! - Cancellation that keeps already-finished aggregates

mod dispatcher;
mod fan_out;

pub use dispatcher::{Dispatched, Dispatcher};
