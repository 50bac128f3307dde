//! Error types for registration and configuration

use thiserror::Error;

use crate::descriptor::EventDescriptor;

/// Errors raised while wiring interactions
///
/// Every variant is raised synchronously at setup time. Dispatch itself never fails.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// A callback is already registered under this descriptor
    #[error("duplicate registration: a handler already exists for {descriptor} (key {encoded})")]
    DuplicateRegistration {
        descriptor: EventDescriptor,
        encoded: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl InteractionError {
    pub(crate) fn duplicate(descriptor: &EventDescriptor) -> Self {
        Self::DuplicateRegistration {
            encoded: descriptor.encode(),
            descriptor: descriptor.clone(),
        }
    }

    /// Whether this is a duplicate-registration error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRegistration { .. })
    }
}
