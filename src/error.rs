use thiserror::Error;

/// Failures the console launcher can surface.
///
/// Nothing here is retried; every variant is fatal to the command invocation
/// and bubbles up to the CLI harness.
#[derive(Debug, Error)]
pub enum WebConsoleError {
    /// Bad launch configuration, raised before any file or socket is touched.
    #[error("configuration error: {0}")]
    Config(String),

    /// Worksheet open or append failure. Also covers server bind errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A persisted worksheet record that does not parse as a cell.
    #[error("worksheet record is not valid JSON: {0}")]
    MalformedWorksheet(#[from] serde_json::Error),

    /// Two plugins in the configured set claim the same cell content type.
    #[error("duplicate plugin content type: {0}")]
    DuplicatePlugin(String),
}
