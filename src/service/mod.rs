pub mod backend_service;
pub mod loader;
pub mod platform;
pub mod session_store;
