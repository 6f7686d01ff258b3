// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use masterror::AppErrorKind;
use sql_migration_analyzer::error::{
    AppError, config_error, describe_template_error, directory_error, empty_input_error,
    file_read_error, report_write_error
};

fn message(error: &AppError) -> &str {
    error.message.as_deref().unwrap_or_default()
}

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/file.sql", io_error);
    assert_eq!(error.kind, AppErrorKind::Internal);
    assert_eq!(message(&error), "Failed to read file '/path/to/file.sql': file not found");
}

#[test]
fn test_directory_error() {
    let error = directory_error("/path/to/queries", "not a directory");
    assert_eq!(error.kind, AppErrorKind::BadRequest);
    assert_eq!(message(&error), "Cannot scan directory '/path/to/queries': not a directory");
}

#[test]
fn test_report_write_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = report_write_error("report.md", io_error);
    assert_eq!(error.kind, AppErrorKind::Internal);
    assert_eq!(message(&error), "Failed to write report 'report.md': denied");
}

#[test]
fn test_empty_input_error() {
    let error = empty_input_error("stdin");
    assert_eq!(error.kind, AppErrorKind::BadRequest);
    assert_eq!(message(&error), "Input 'stdin' contains no SQL text");
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid configuration value");
    assert_eq!(error.kind, AppErrorKind::BadRequest);
    assert_eq!(message(&error), "Invalid configuration value");
}

#[test]
fn test_describe_template_error_position() {
    let err = roxmltree::Document::parse("<select>\n  <if test=\"a\">\n</select>").unwrap_err();
    let message = describe_template_error(&err);
    assert!(message.starts_with("Template parse error at line"));
    assert!(message.contains(&format!("line {}", err.pos().row)));
}
