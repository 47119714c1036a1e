use thiserror::Error;

#[derive(Error, Debug)]
pub enum VitrineError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("No route named '{0}'")]
    UnknownRoute(String),

    #[error("Cannot reverse '{name}': {detail}")]
    ReverseMismatch { name: String, detail: String },
}

pub type Result<T> = std::result::Result<T, VitrineError>;
