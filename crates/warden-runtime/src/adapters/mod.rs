pub mod memory_store;
pub mod tracing_transport;
