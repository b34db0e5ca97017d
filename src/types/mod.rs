mod errors;
mod money;
#[cfg(test)]
mod tests;

pub use errors::MoneyError;
pub use money::parse_money;

/// Discrete time step of a transaction. Signed so that out-of-range raw
/// values survive ingestion and are reported by the validator instead of
/// being rejected at the type boundary.
pub type Hour = i64;
