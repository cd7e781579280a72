use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on for
/// user-facing messaging. `NotFound` exists for the command layer; repository
/// lookups report absence as `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller input
    InvalidInput,
    NotFound,

    // Storage-enforced invariants (unique email, CHECK, foreign keys)
    ConstraintViolation,

    // Fatal for the calling operation
    /// Handle closed, or the schema could not be brought to the current version
    StorageUnavailable,
    /// Any other SQLite failure
    Persistence,

    // Session checks in the command layer
    Unauthorised,
    Forbidden,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::StorageUnavailable => "ERR_STORAGE_UNAVAILABLE",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
        }
    }

    /// Whether the caller can recover from this kind (show a message, retry
    /// with different input). Storage failures abort the calling operation.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ExErrorKind::StorageUnavailable | ExErrorKind::Persistence
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Validation and parsing failures for domain values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A required text field was empty or whitespace
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Text that does not name a known status or type
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Proximity radius below zero or not finite
    #[error("radius must be a finite, non-negative number of km, got {radius_km}")]
    InvalidRadius { radius_km: f64 },

    /// Coordinates outside the valid latitude/longitude range
    #[error("coordinates out of range: lat {lat}, long {long}")]
    InvalidCoordinates { lat: f64, long: f64 },

    /// Stored date or time text that does not parse
    #[error("invalid {kind} '{value}'")]
    InvalidTemporal { kind: &'static str, value: String },
}

impl ModelError {
    pub fn empty(field: &'static str) -> Self {
        ModelError::EmptyField { field }
    }
}

impl From<ModelError> for ExError {
    fn from(err: ModelError) -> Self {
        ExError::new(ExErrorKind::InvalidInput).with_message(err.to_string())
    }
}

/// Reject empty or whitespace-only text
pub fn require_text(field: &'static str, value: &str) -> std::result::Result<(), ModelError> {
    if value.trim().is_empty() {
        Err(ModelError::empty(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::ConstraintViolation, "ERR_CONSTRAINT_VIOLATION"),
            (ExErrorKind::StorageUnavailable, "ERR_STORAGE_UNAVAILABLE"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::Unauthorised, "ERR_UNAUTHORISED"),
            (ExErrorKind::Forbidden, "ERR_FORBIDDEN"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_storage_kinds_are_fatal() {
        assert!(!ExErrorKind::StorageUnavailable.is_recoverable());
        assert!(!ExErrorKind::Persistence.is_recoverable());
        assert!(ExErrorKind::ConstraintViolation.is_recoverable());
        assert!(ExErrorKind::NotFound.is_recoverable());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::ConstraintViolation)
            .with_op("create_user")
            .with_entity_id(42)
            .with_message("email already registered");

        let text = err.to_string();
        assert!(text.starts_with("[ERR_CONSTRAINT_VIOLATION]"));
        assert!(text.contains("create_user"));
        assert!(text.contains("email already registered"));
        assert!(text.contains("entity_id: 42"));
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Persistence).with_message("disk I/O error");
        let outer = ExError::new(ExErrorKind::StorageUnavailable).with_source(inner);

        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Persistence)
        );
        assert!(std::error::Error::source(&outer).is_some());
        assert!(outer.to_string().contains("disk I/O error"));
    }

    #[test]
    fn test_model_error_maps_to_invalid_input() {
        let err: ExError = ModelError::empty("name").into();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.message(), "name must not be empty");
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("title", "Sunday ride").is_ok());
        assert_eq!(require_text("title", "   "), Err(ModelError::empty("title")));
    }
}
