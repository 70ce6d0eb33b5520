//! Repository implementations for the user store.

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::{SqlxUserRepository, UserRepository};
