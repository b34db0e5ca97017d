mod cleaner;
#[cfg(test)]
mod tests;
mod validator;

pub use cleaner::clean;
pub use validator::{validate, ValidatedTable};
