pub mod connection_limit;

// Re-export middleware functions
pub use connection_limit::call_limit_middleware;
