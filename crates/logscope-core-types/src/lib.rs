//! Core types shared across logscope facilities
//!
//! This crate provides foundational types used by both the capture harness
//! and its diagnostic logging:
//!
//! - **Correlation types**: ScopeId, tying a capture to its revert
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::ScopeId;
