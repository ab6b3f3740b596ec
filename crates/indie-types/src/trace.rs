use crate::reporter::{Diagnostic, DiagnosticSink, Level};

/// Forwards diagnostics to `tracing` as `warn!`/`error!` events.
///
/// Events carry `path`, `line` and `column` fields when the diagnostic
/// has a location, and use the `indie::diagnostic` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn display(&mut self, diagnostic: &Diagnostic) {
        let message = diagnostic.message.as_str();
        match (&diagnostic.location, diagnostic.level) {
            (Some(location), Level::Warning) => tracing::warn!(
                target: "indie::diagnostic",
                path = %location.file().path().display(),
                line = location.begin().line,
                column = location.begin().column,
                "{message}"
            ),
            (Some(location), Level::Error) => tracing::error!(
                target: "indie::diagnostic",
                path = %location.file().path().display(),
                line = location.begin().line,
                column = location.begin().column,
                "{message}"
            ),
            (None, Level::Warning) => tracing::warn!(target: "indie::diagnostic", "{message}"),
            (None, Level::Error) => tracing::error!(target: "indie::diagnostic", "{message}"),
        }
    }
}
