use thiserror::Error;

/// Errors constructing an HTTP collaborator client.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("invalid collaborator url '{value}'")]
    InvalidUrl { value: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
