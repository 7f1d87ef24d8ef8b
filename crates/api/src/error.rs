#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid type reference '{input}': {reason}")]
    InvalidTypeRef { input: String, reason: String },
    #[error("Span {start}..{end} is outside of the source (length {len})")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
