//! HTTP request handlers organized by resource type

pub mod auth;
pub mod health;
pub mod users;

pub use auth::{login_handler, me_handler, register_handler};
pub use health::{health_handler, root_handler};
pub use users::{get_user_handler, list_users_handler};
