use thiserror::Error;

/// Failure of a single chat-platform operation, classified the way the
/// `delete` command reports it back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Unknown message or channel")]
    NotFound,

    #[error("Missing permissions")]
    Forbidden,

    #[error("{0}")]
    Transport(String),
}

impl From<serenity::Error> for ChatError {
    fn from(error: serenity::Error) -> Self {
        match &error {
            serenity::Error::Http(http_err) => classify_http(http_err, &error),
            _ => ChatError::Transport(error.to_string()),
        }
    }
}

impl ChatError {
    /// Classifies an unsuccessful Discord response by its HTTP status.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        match status {
            404 => ChatError::NotFound,
            403 => ChatError::Forbidden,
            _ => ChatError::Transport(detail.into()),
        }
    }
}

fn classify_http(http_err: &serenity::http::HttpError, error: &serenity::Error) -> ChatError {
    match http_err {
        serenity::http::HttpError::UnsuccessfulRequest(resp) => {
            ChatError::from_status(resp.status_code.as_u16(), error.to_string())
        }
        _ => ChatError::Transport(error.to_string()),
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Prompt template '{template}' expects slots {expected:?} but got {provided:?}")]
    InputMismatch {
        template: &'static str,
        expected: Vec<String>,
        provided: Vec<String>,
    },

    #[error("Failed to access language model: {0}")]
    LlmError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Upstream lookup failed: {0}")]
    LookupError(String),

    #[error("Failed to fetch transcript: {0}")]
    TranscriptError(String),

    #[error("Failed to access Discord API: {0}")]
    ChatError(#[from] ChatError),

    #[error("Invalid command: {0}")]
    CommandError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serenity::Error> for BotError {
    fn from(error: serenity::Error) -> Self {
        BotError::ChatError(ChatError::from(error))
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}
