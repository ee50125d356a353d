//! HTTP handlers.

mod health_handler;
mod user_handler;

pub use health_handler::{health_check, health_routes};
pub use user_handler::{list_users, register, user_routes, RegistrationResponse};
