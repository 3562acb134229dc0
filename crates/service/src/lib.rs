//! Service layer providing the business logic of the calculator app.
//! - Separates auth and scoring logic from the web framework.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod storage;
pub mod file;
pub mod calculators;
