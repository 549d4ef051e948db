use thiserror::Error;

/// Domain error for catalog operations.
///
/// Every failure a manager can report maps to one of these kinds; transport
/// adapters translate the kind, the message carries the offending entity and
/// identifiers.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or missing request fields. Never produced after a store
    /// mutation has started.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity, parent, or association is absent.
    #[error("{entity} not found: {param}")]
    NotFound {
        entity: &'static str,
        param: String,
    },

    /// A create collided with an existing identifier.
    #[error("{entity} already exists: {param}")]
    AlreadyExists {
        entity: &'static str,
        param: String,
    },

    /// Unexpected store failure or a fault inside a compensation sequence.
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Result alias used across managers and providers.
pub type OpResult<T> = std::result::Result<T, CatalogError>;

/// Coarse error classification, useful for assertions and adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
}

impl CatalogError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(entity: &'static str, param: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            param: param.into(),
        }
    }

    pub fn already_exists(entity: &'static str, param: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            param: param.into(),
        }
    }

    pub fn internal(context: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
            source: None,
        }
    }

    /// Internal error wrapping the store fault that caused it.
    pub fn internal_caused_by(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CatalogError::Internal { .. } => ErrorKind::Internal,
        }
    }
}
