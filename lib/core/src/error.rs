use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid connection weight between {from} and {to}: {weight} (must be finite and non-negative)")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("Invalid location id: {0:?}")]
    InvalidLocationId(String),
}
