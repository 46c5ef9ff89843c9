pub mod rate;

// Re-export the core types to provide a clean public API.
pub use rate::Rate;
