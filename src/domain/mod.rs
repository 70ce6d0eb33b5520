//! Domain layer
//!
//! Pure domain types with no infrastructure dependencies.
//!
//! - `id`: Type-safe domain identifiers with NewType pattern

pub mod id;

pub use id::UserId;
