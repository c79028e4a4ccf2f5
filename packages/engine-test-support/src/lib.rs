//! Engine test support utilities
//!
//! Shared helpers for unit and integration tests of the race engine. Today
//! this is the unified logging initialisation used by `ctor` hooks.

pub mod logging;
