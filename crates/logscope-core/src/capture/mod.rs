//! Scoped log capture
//!
//! - [`ScopeHandle`]: swaps a logger's console sinks for a capture sink,
//!   records failures and tracked messages, and reports them at revert
//! - [`LevelScope`]: overrides only a logger's level
//! - [`remove_console_sinks`] / [`restore_console_sinks`]: the sink swap on
//!   its own, for callers managing restoration themselves

mod capture_sink;
pub mod handlers;
pub mod level_scope;
pub mod scope;
pub mod tracking;

pub use handlers::{remove_console_sinks, restore_console_sinks, SinkList};
pub use level_scope::LevelScope;
pub use scope::ScopeHandle;
pub use tracking::TrackingMode;
