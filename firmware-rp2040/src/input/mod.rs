//! Channel input source implementations.

pub mod ibus;

// Re-export input sources for convenience
pub use ibus::IbusInputSource;
