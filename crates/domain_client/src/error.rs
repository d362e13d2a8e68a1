//! Client domain errors

use thiserror::Error;

use core_kernel::PortError;
use domain_claims::ClaimError;

/// Errors that can occur in the client domain
#[derive(Debug, Error)]
pub enum ClientError {
    /// One or more client fields failed validation
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// Claim record fields failed validation
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// The underlying store reported an error
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(vec![message.into()])
    }

    /// Returns true if the error is caused by caller input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::Claim(_)
                | ClientError::Port(PortError::Validation { .. })
        )
    }

    /// Returns true if the error indicates an unknown identifier
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Port(e) if e.is_not_found())
    }
}
