// Output formatting utilities: colored status lines, exit codes, JSON envelopes

use crate::error::ReachError;
use std::io::IsTerminal;

// Colors for terminal output (when supported)
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const MAGENTA: &str = "\x1b[0;35m";
pub const BOLD: &str = "\x1b[1m";
pub const NC: &str = "\x1b[0m"; // No Color

/// Check if stdout is a terminal (for color output)
#[inline]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Print info message
pub fn info(msg: &str) {
    let color = if is_terminal() { GREEN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let color = if is_terminal() { YELLOW } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let color = if is_terminal() { RED } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print success message
pub fn success(msg: &str) {
    let color = if is_terminal() { MAGENTA } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[OK]{} {}", color, reset, msg);
}

/// Print section header
pub fn header(msg: &str) {
    let bold = if is_terminal() { BOLD } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}===>{} {}", bold, reset, msg);
    println!();
}

/// Exit codes
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_FILE_NOT_FOUND: i32 = 4;
pub const EXIT_VALIDATION: i32 = 5;

// ============================================================================
// Error Codes and Remediation
// ============================================================================

/// Error codes for JSON error responses
pub const E_INPUT_NOT_FOUND: &str = "E001";
pub const E_OUTPUT_EXISTS: &str = "E002";
pub const E_PARSE: &str = "E003";
pub const E_CONFIG: &str = "E004";
pub const E_IO: &str = "E005";
pub const E_OUTPUT_DIR: &str = "E006";

/// Common remediation messages
pub const R_HINT_OUTPUT: &str = "Choose a new output path or remove the existing file";
pub const R_HINT_OUTPUT_DIR: &str = "Create the output directory first";
pub const R_HINT_BOUND: &str = "Pass --bound N with N >= 1";
pub const R_HINT_FORMAT: &str = "Each line must be '<source> <label> <target>' with integer vertex ids";

/// Map an error chain to a process exit code
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ReachError>() {
        Some(ReachError::InputNotFound(_)) | Some(ReachError::OutputDirNotFound(_)) => {
            EXIT_FILE_NOT_FOUND
        }
        Some(ReachError::Config(_)) | Some(ReachError::ConfigFile { .. }) => EXIT_USAGE,
        Some(ReachError::OutputExists(_)) | Some(ReachError::Parse { .. }) => EXIT_VALIDATION,
        Some(ReachError::Io { .. }) | None => EXIT_ERROR,
    }
}

/// JSON output wrapper
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: String,
    pub execution_id: String,
    pub tool: String,
    pub timestamp: String,
    pub data: T,
}

impl<T: serde::Serialize> JsonResponse<T> {
    pub fn new(data: T) -> Self {
        let now = chrono::Utc::now();
        let exec_id = format!("{:x}-{}", now.timestamp(), std::process::id());

        JsonResponse {
            schema_version: "1.0.0".to_string(),
            execution_id: exec_id,
            tool: "bounded-reach".to_string(),
            timestamp: now.to_rfc3339(),
            data,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Error response format for JSON mode
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl JsonError {
    pub fn new(category: &str, message: &str, code: &str) -> Self {
        JsonError {
            error: category.to_string(),
            message: message.to_string(),
            code: code.to_string(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }

    /// Build the JSON error for a failed command
    pub fn from_error(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        match err.downcast_ref::<ReachError>() {
            Some(ReachError::InputNotFound(_)) => {
                Self::new("InputNotFound", &message, E_INPUT_NOT_FOUND)
            }
            Some(ReachError::OutputExists(_)) => {
                Self::new("OutputExists", &message, E_OUTPUT_EXISTS).with_remediation(R_HINT_OUTPUT)
            }
            Some(ReachError::OutputDirNotFound(_)) => {
                Self::new("OutputDirNotFound", &message, E_OUTPUT_DIR)
                    .with_remediation(R_HINT_OUTPUT_DIR)
            }
            Some(ReachError::Parse { .. }) => {
                Self::new("ParseError", &message, E_PARSE).with_remediation(R_HINT_FORMAT)
            }
            Some(ReachError::Config(msg)) if msg.contains("bound") => {
                Self::new("ConfigError", &message, E_CONFIG).with_remediation(R_HINT_BOUND)
            }
            Some(ReachError::Config(_)) | Some(ReachError::ConfigFile { .. }) => {
                Self::new("ConfigError", &message, E_CONFIG)
            }
            Some(ReachError::Io { .. }) | None => Self::new("IoError", &message, E_IO),
        }
    }
}
