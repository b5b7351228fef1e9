use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid keep pattern '{pattern}': {source}")]
    KeepPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    #[error("Unexpected output from {operation}: {output:?}")]
    UnexpectedOutput { operation: String, output: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn keep_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::KeepPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    pub fn unexpected_output(operation: impl Into<String>, output: impl Into<String>) -> Self {
        Self::UnexpectedOutput {
            operation: operation.into(),
            output: output.into(),
        }
    }
}
