pub type ConcatResult<T> = Result<T, ConcatException>;

#[derive(Debug, thiserror::Error)]
pub enum ConcatException {
    #[error("Invalid s3 object url: {url}")]
    InvalidUrl { url: String },

    #[error("Must specify at least two objects to concatenate.")]
    TooFewSources,

    #[error("None of input objects exist.")]
    NoSourceExists,

    #[error("Store internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for ConcatException {
    fn from(e: anyhow::Error) -> Self {
        ConcatException::InternalError { source: e }
    }
}
