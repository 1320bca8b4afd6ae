//! Utilities to render `tracing` events into concise logfmt strings.
//!
//! [`render_event`] extracts level, target, message and the remaining fields
//! of an event. [`LogfmtLayer`] prints each event as one logfmt line.

use std::{
    fmt::{Debug, Write as _},
    io::{self, Write as _},
};

use tracing::{
    Event, Metadata, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::layer::{Context, Layer};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or the rendered fields when there is none.
    pub message: String,
    /// Non-message fields rendered as space-separated `key=value` pairs.
    pub fields: String,
}

impl RenderedLog {
    /// One logfmt line: `level=debug target=hotkey_engine msg="dispatch" action=navUp`.
    pub fn to_logfmt(&self) -> String {
        let mut out = format!(
            "level={} target={} msg={:?}",
            self.level.to_ascii_lowercase(),
            self.target,
            self.message
        );
        if !self.fields.is_empty() && self.fields != self.message {
            out.push(' ');
            out.push_str(&self.fields);
        }
        out
    }
}

/// Visitor collecting the message and the remaining fields.
struct MsgVisitor {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Accumulated non-message fields rendered as `key=value`.
    fields: String,
}

impl Visit for MsgVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg = Some(value.to_string());
        } else {
            let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
        }
    }
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.msg = Some(format!("{:?}", value));
        } else {
            let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
        }
    }
}

/// Extract level, target, message and fields from a tracing Event.
///
/// Behavior:
/// - If the event contains a `message` field, use it.
/// - Otherwise, the message is the concatenated `key=value` pairs.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    let fields = vis.fields.trim_end().to_string();
    let message = vis.msg.unwrap_or_else(|| fields.clone());
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message,
        fields,
    }
}

/// Tracing layer that prints every event as a logfmt line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogfmtLayer;

impl LogfmtLayer {
    /// Layer writing to stderr.
    pub fn stderr() -> Self {
        Self
    }
}

impl<S> Layer<S> for LogfmtLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = render_event(event).to_logfmt();
        let _ignored = writeln!(io::stderr().lock(), "{line}");
    }
}
