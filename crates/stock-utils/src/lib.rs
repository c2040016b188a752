//! Shared utilities for stock-agent
//!
//! Holds the process-wide tracing setup so the binary and any future tools
//! report diagnostics the same way.

pub mod logging;

pub use logging::{LogFormat, init_tracing};
