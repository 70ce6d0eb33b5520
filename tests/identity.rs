#[path = "identity/integration/mod.rs"]
mod integration;
#[path = "identity/support.rs"]
mod support;
