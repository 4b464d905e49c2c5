//! Common utilities for the Sprig layout engine.
//!
//! This crate provides shared infrastructure used by all Sprig components:
//! - **Warning System** - deduplicated warnings routed through the `log` facade

pub mod warning;
