//! Diagnostic logging facility for logscope
//!
//! The harness reports its own lifecycle through `tracing`:
//! - Single initialization point via `init(profile)`
//! - Structured event macros (`log_scope_event!`, `log_scope_failure!`)
//! - A bridge layer routing `tracing` events into a [`LoggerRegistry`]
//! - Test capture mode for asserting on the harness's own events
//!
//! # Usage
//!
//! ```rust
//! use logscope_core::logging_facility::{init, Profile};
//!
//! // Initialize once at test-binary startup
//! init(Profile::Development);
//! ```
//!
//! [`LoggerRegistry`]: crate::LoggerRegistry

pub mod bridge;
pub mod init;
pub mod macros;
pub mod test_capture;

pub use bridge::RegistryLayer;
pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
