/// Exit code for a missing trained model artifact.
pub const EXIT_MODEL_NOT_FOUND: u8 = 1;
/// Exit code for invalid input, unreadable files, and malformed data.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for datasets too small to train or evaluate on.
pub const EXIT_INSUFFICIENT_DATA: u8 = 3;
/// Exit code for numerical failures (solver, non-finite predictions).
pub const EXIT_NUMERIC: u8 = 4;

/// Message printed when the learned estimator has no artifact to load.
pub const MODEL_NOT_FOUND_MESSAGE: &str =
    "Model not found. Please run this script without CLI arguments to train and save the model first.";

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// The fatal, user-visible "no trained model" condition.
    pub fn model_not_found() -> Self {
        Self::new(EXIT_MODEL_NOT_FOUND, MODEL_NOT_FOUND_MESSAGE)
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn is_model_not_found(&self) -> bool {
        self.exit_code == EXIT_MODEL_NOT_FOUND
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
