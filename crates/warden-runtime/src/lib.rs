//! # Gate-Warden Runtime
//!
//! The worker binary that assembles the engine: configuration from the
//! environment, the in-memory store adapter behind every store port, the
//! transport adapter, workflow state machines for the two multi-step
//! conversations, and the container that wires the subsystems together
//! and owns the scheduler's lifecycle.
//!
//! ## Modular Structure
//!
//! - `config` - environment-driven [`WardenConfig`]
//! - `telemetry` - tracing subscriber initialization
//! - `adapters/` - store and transport port implementations
//! - `workflow` - typed state machines for payment capture and broadcast
//!   composition
//! - `stats` - admin-panel statistics snapshot
//! - `container` - dependency wiring and graceful shutdown

pub mod adapters;
pub mod config;
pub mod container;
pub mod stats;
pub mod telemetry;
pub mod workflow;

pub use adapters::memory_store::MemoryStore;
pub use adapters::tracing_transport::TracingTransport;
pub use config::WardenConfig;
pub use container::WardenContainer;
pub use stats::Statistics;
pub use workflow::{BroadcastCompose, PaymentCapture, WorkflowError};
