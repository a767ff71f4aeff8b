pub mod api;
pub mod blockchain;
pub mod cache;
pub mod config;
pub mod models;
pub mod validation;
pub mod state;


// Re-export specific items for convenience if desired
pub use models::{AppInfo, RelayReport, TransactionRecord};
pub use validation::validate_deposit_address;
pub use api::response::ApiResponse;
pub use api::route::create_router;
pub use blockchain::Relay;
