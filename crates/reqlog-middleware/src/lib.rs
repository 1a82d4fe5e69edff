//! # reqlog-middleware
//!
//! Request logging middleware for axum.
//!
//! Each request that matched a route is timed, its path normalized to the
//! route's parameter names, and one structured record is written through
//! an injected [`LogSink`] unless a skip rule excludes it. Severity follows
//! the status code: 4xx warns, 5xx errors, everything else is info.

pub mod client_ip;
pub mod error;
pub mod format;
pub mod logger;
pub mod path;
pub mod record;
pub mod rules;
pub mod sink;
pub mod subscriber;

pub use error::HandlerError;
pub use format::JsonLines;
pub use logger::{RequestLogger, request_logging};
pub use record::{RequestErrors, RequestRecord, attach_error};
pub use rules::SkipRules;
pub use sink::{LogSink, MemorySink, TracingSink};
pub use subscriber::init_subscriber;
