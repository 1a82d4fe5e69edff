//! Log backends the middleware writes records to.
//!
//! The backend is injected into [`crate::RequestLogger`] by the composing
//! application, so tests can swap in [`MemorySink`].

pub mod memory;
pub mod tracing_sink;

use std::fmt::Debug;

use crate::record::RequestRecord;

pub use self::memory::MemorySink;
pub use self::tracing_sink::TracingSink;

/// Destination for finished request records.
///
/// Emission is best effort: implementations own their write failures.
pub trait LogSink: Send + Sync + Debug + 'static {
    /// Writes one record.
    fn emit(&self, record: &RequestRecord);
}
