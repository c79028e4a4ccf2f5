#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::rooms_memory::MemoryRoomStore;
pub use config::{EngineConfig, FlowConfig, RulesConfig};
pub use error::AppError;
pub use errors::DomainError;
pub use repos::rooms::{FieldPatch, FieldValue, RoomId, RoomStore, Subscription};
pub use services::room_flow::{RoomFlowService, RoomMutationResult};
pub use telemetry::init_tracing;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
