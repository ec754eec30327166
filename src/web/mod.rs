// Public API - what other modules can use
pub use router::router;
pub use shutdown::shutdown_signal;

// Internal modules
mod router;
mod shutdown;
