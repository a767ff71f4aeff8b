pub mod route;
pub mod response;

pub use route::create_router;
pub use response::ApiResponse;
