//! Auth module: domain types, input rules, account storage and the service
//! that ties them together for registration and login.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod validation;

pub use service::{AuthConfig, AuthService};
