use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] wayfind_core::Error),

    #[error("Trip must contain at least one stop")]
    EmptyTrip,

    #[error("Trip has {count} stops, more than the configured maximum of {max}")]
    TooManyStops { count: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
