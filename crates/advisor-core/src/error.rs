use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No data found for symbol: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
