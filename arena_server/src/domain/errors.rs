use crate::domain::entity::EntityKind;
use std::fmt;

// Domain-level errors for entity registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    // The entity carries no nonce/namespace to be stored under.
    MissingIdentity { kind: EntityKind },
    // The entity kind is not tracked by the receiving collection.
    Untracked { kind: EntityKind },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::MissingIdentity { kind } => write!(f, "{kind} has no identity"),
            SpawnError::Untracked { kind } => write!(f, "{kind} is not tracked here"),
        }
    }
}

impl std::error::Error for SpawnError {}
