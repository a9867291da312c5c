pub mod ai;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod lookups;
pub mod middleware;
pub mod recipes;
pub mod routes;
pub mod users;

pub use error::ApiError;
pub use extract::ApiJson;
pub use routes::create_router;
