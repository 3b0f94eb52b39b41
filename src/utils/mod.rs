//! Utility modules for the report merger

pub mod viewport;

// Re-export commonly used types
pub use viewport::*;
