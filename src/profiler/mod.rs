//! Call-timing instrumentation
//!
//! [`Profiled`] wraps any component and times the operations it was told to
//! measure, accumulating totals per `(component, operation)` in a shared
//! [`Profiler`] ledger. Operations outside the measured set are forwarded
//! without touching the ledger.

mod ledger;
mod profiled;

pub use ledger::{Measurement, Profiler};
pub use profiled::{Profiled, PAGE_PARSER_MEASURED, WEB_CRAWLER_MEASURED};
