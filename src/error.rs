pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create directory traversal error
pub fn directory_error(path: &str, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Cannot scan directory '{}': {}", path, message.into()))
}

/// Create report write error
pub fn report_write_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to write report '{}': {}", path, source))
}

/// Create error for input that holds no SQL text
pub fn empty_input_error(source: &str) -> AppError {
    AppError::bad_request(format!("Input '{}' contains no SQL text", source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Describe a template parse failure with its position, if known
///
/// Parse failures never surface as errors from the scorer; this only
/// formats the diagnostic that gets logged.
pub fn describe_template_error(err: &roxmltree::Error) -> String {
    let pos = err.pos();
    format!(
        "Template parse error at line {}, column {}:\n  {}",
        pos.row, pos.col, err
    )
}
