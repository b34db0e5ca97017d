use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoneyError {
    #[error("Monetary error: Value [{0}] contains no numeric content")]
    NoDigits(String),
    #[error("Monetary error: Value [{value}] is not a valid decimal: {detail}")]
    InvalidFormat {
        value: String,
        detail: String
    }
}
