use groovyscope_api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum GroovyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },
    #[error("Invalid Groovy version '{0}', expected MAJOR.MINOR")]
    InvalidVersion(String),
    #[error("Invalid import specification '{0}'")]
    InvalidImport(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, GroovyError>;
