// Server module entry point
// Listener setup, connection dispatch and the bounded request pool

pub mod connection;
pub mod limiter;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword)
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use limiter::{RequestLimiter, RequestPermit};
pub use listener::create_listener;
pub use server_loop::serve;
pub use signal::shutdown_signal;
