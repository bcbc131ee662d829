use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no face detected in image")]
    NoFaceDetected,

    #[error("no identities enrolled")]
    EmptyRegistry,

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    MalformedEmbedding { expected: usize, actual: usize },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("extractor unavailable: {0}")]
    ExtractorUnavailable(String),

    #[error("batch aborted at entry {index} ({name}): {source}")]
    BatchAborted {
        index: usize,
        name: String,
        source: Box<Error>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
