use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuillError>;

#[derive(Error, Debug)]
pub enum QuillError {
  #[error("No Gemini API key configured. Set GEMINI_API_KEY or run 'quill key set'.")]
  MissingCredential,

  #[error("The Gemini API rejected the configured key: {message}. Run 'quill key set' with a valid key.")]
  InvalidCredential { message: String },

  #[error("The model returned a malformed response ({reason}). Try again or switch to another model.")]
  MalformedResponse { reason: String },

  #[error("{message}")]
  Service { status: u16, message: String },

  #[error("{message}")]
  Transport { message: String },

  #[error("A {action} is already in progress")]
  Busy { action: String },

  #[error("History entry '{id}' not found")]
  NotFound { id: String },

  #[error("Invalid configuration: {message}")]
  InvalidConfig { message: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl QuillError {
  pub fn invalid_credential(message: impl Into<String>) -> Self {
    Self::InvalidCredential { message: message.into() }
  }

  pub fn malformed_response(reason: impl Into<String>) -> Self {
    Self::MalformedResponse { reason: reason.into() }
  }

  pub fn service(status: u16, message: impl Into<String>) -> Self {
    Self::Service { status, message: message.into() }
  }

  pub fn transport(message: impl Into<String>) -> Self {
    Self::Transport { message: message.into() }
  }

  pub fn busy(action: impl Into<String>) -> Self {
    Self::Busy { action: action.into() }
  }

  pub fn not_found(id: impl Into<String>) -> Self {
    Self::NotFound { id: id.into() }
  }

  pub fn invalid_config(message: impl Into<String>) -> Self {
    Self::InvalidConfig { message: message.into() }
  }

  /// Errors that need the user to fix their API key before anything else works
  pub fn is_credential_error(&self) -> bool {
    matches!(self, Self::MissingCredential | Self::InvalidCredential { .. })
  }
}

impl From<reqwest::Error> for QuillError {
  fn from(err: reqwest::Error) -> Self {
    Self::transport(err.to_string())
  }
}
