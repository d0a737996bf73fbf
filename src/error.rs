use thiserror::Error;

#[derive(Error, Debug)]
pub enum HiveError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YouTube API returned {status}: {message}")]
    YouTube { status: u16, message: String },

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Invalid crew: {0}")]
    Plan(String),

    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("Agent exceeded maximum iterations ({0})")]
    MaxIterations(usize),

    #[error("Agent error: {0}")]
    Agent(String),
}

pub type Result<T> = std::result::Result<T, HiveError>;
