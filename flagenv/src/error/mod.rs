//! Error types produced while binding configuration to flags and environment
//! variables.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::FlagEnvError;

#[cfg(test)]
mod tests;
