//! Sink that writes records as `tracing` events.

use reqlog_core::Severity;
use reqlog_core::config::request_log::FieldProfile;

use crate::record::RequestRecord;
use crate::sink::LogSink;

/// Target of every request event, usable in `EnvFilter` directives.
pub const ACCESS_TARGET: &str = "access";

macro_rules! emit_record {
    ($level:ident, $profile:expr, $r:ident) => {
        match $profile {
            FieldProfile::Compact => ::tracing::$level!(
                target: ACCESS_TARGET,
                s = $r.status,
                m = %$r.method,
                p = %$r.path,
                i = %$r.client_ip,
                l = $r.latency.as_secs_f64(),
                "{}",
                $r.message
            ),
            FieldProfile::Detailed => ::tracing::$level!(
                target: ACCESS_TARGET,
                status = $r.status,
                method = %$r.method,
                path = %$r.path,
                ip = %$r.client_ip,
                latency = $r.latency.as_secs_f64(),
                user_agent = %$r.user_agent,
                time = %$r.timestamp.to_rfc3339(),
                "{}",
                $r.message
            ),
        }
    };
}

/// Emits each record as a `tracing` event at the record's severity.
///
/// Encoding, filtering and the output stream belong to the installed
/// subscriber (see [`crate::subscriber::init_subscriber`]). Latency is
/// written in seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    profile: FieldProfile,
}

impl TracingSink {
    /// Creates a sink writing the given field set.
    pub fn new(profile: FieldProfile) -> Self {
        Self { profile }
    }
}

impl LogSink for TracingSink {
    fn emit(&self, record: &RequestRecord) {
        match record.severity {
            Severity::Trace => emit_record!(trace, self.profile, record),
            Severity::Debug => emit_record!(debug, self.profile, record),
            Severity::Info => emit_record!(info, self.profile, record),
            Severity::Warn => emit_record!(warn, self.profile, record),
            Severity::Error => emit_record!(error, self.profile, record),
        }
    }
}
