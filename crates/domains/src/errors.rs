//! # CatalogError
//!
//! Failures reported by the hosted data API, collapsed into a small tagged set.
//! Every variant renders to a message fit for display.

use thiserror::Error;

/// The primary error type for every port operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure (connection refused, timeout, undecodable body).
    /// The message is shown as-is.
    #[error("{0}")]
    Network(String),

    /// The requested row does not exist.
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: String },

    /// The backend refused the viewer (row-level policy, expired key).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Anything else the backend rejected with.
    #[error("{0}")]
    Unknown(String),
}

/// Fieldless discriminant of [`CatalogError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    NotFound,
    Forbidden,
    Unknown,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

/// A specialized Result type for port operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_message_is_verbatim() {
        let err = CatalogError::Network("network error".into());
        assert_eq!(err.to_string(), "network error");
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn not_found_names_entity() {
        let err = CatalogError::NotFound {
            entity: "project",
            id: "p-1".into(),
        };
        assert_eq!(err.to_string(), "project not found with ID p-1");
    }
}
