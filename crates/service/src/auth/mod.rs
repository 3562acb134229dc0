//! Auth module: three-layer architecture (domain, repository, service).
//!
//! This module centralizes credential checking and session management
//! under the service crate.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use service::AuthService;
