use thiserror::Error;
use tracing::{error, info};

pub const ERROR_PREFIX: &str = "An error occurred: ";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("invalid response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("prompt was blocked: {reason}")]
    Blocked { reason: String },

    #[error("response contained no text")]
    EmptyResponse,
}

pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(String),
    Failure(String),
}

impl GenerationOutcome {
    pub fn from_error(err: &GenerationError) -> Self {
        GenerationOutcome::Failure(format!("{ERROR_PREFIX}{err}"))
    }

    pub fn text(&self) -> &str {
        match self {
            GenerationOutcome::Success(text) | GenerationOutcome::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }
}

pub fn generate_outcome(generator: &dyn TextGenerator, prompt: &str) -> GenerationOutcome {
    match generator.generate(prompt) {
        Ok(text) => {
            info!(chars = text.len(), "Workout plan generated");
            GenerationOutcome::Success(text)
        }
        Err(err) => {
            error!("Error generating workout: {}", err);
            GenerationOutcome::from_error(&err)
        }
    }
}
