//! Service layer - registration use cases.

mod user_service;

pub use user_service::{utc_today, UserManager, UserService};
