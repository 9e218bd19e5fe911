//! API Middleware
//!
//! Request gates that run ahead of the auth handlers.

pub mod precheck;

pub use precheck::require_active_account;
