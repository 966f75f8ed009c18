//! Error types for `carewatch-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no built-in tables for state {0:?}")]
  UnknownState(String),

  #[error("no built-in source profile named {0:?}")]
  UnknownSource(String),

  #[error("city {city:?} maps to {county:?}, which is not a jurisdiction of {state}")]
  CityOutsideUniverse {
    state:  String,
    city:   String,
    county: String,
  },

  #[error("{name:?} is reserved for unplaced facilities and cannot be a jurisdiction of {state}")]
  ReservedJurisdiction {
    state: String,
    name:  String,
  },

  #[error("jurisdiction list for {0} is empty")]
  EmptyUniverse(String),

  #[error("source profile {profile:?} is for {profile_state}, tables are for {tables_state}")]
  StateMismatch {
    profile:       String,
    profile_state: String,
    tables_state:  String,
  },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
