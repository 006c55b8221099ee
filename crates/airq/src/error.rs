use airq_core::PipelineError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Measurements API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed JSON in API response: {0}")]
    MalformedJson(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
