//! API routes module.

pub mod extract;
pub mod handlers;
pub mod profiles;
pub mod routes;
pub mod users;

pub use routes::create_router;
