pub mod client;
pub mod forwarder;
pub mod models;
pub mod relay;

// Re-exports for convenience
pub use client::ExplorerClient;
pub use forwarder::UpdateForwarder;
pub use relay::Relay;
