//! # reqlog-core
//!
//! Core crate for reqlog. Contains the configuration schema, the severity
//! model shared by the middleware and the log backend, and the unified
//! error system.
//!
//! This crate has **no** dependency on the HTTP framework.

pub mod config;
pub mod error;
pub mod result;
pub mod severity;

pub use error::AppError;
pub use result::AppResult;
pub use severity::Severity;
