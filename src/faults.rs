//! Faults raised by collaborators outside the application's own code.
//!
//! - [`TransportFault`]: the request layer rejected a request before or after
//!   a handler ran (unknown route, unreadable body, timeout, ...)
//! - [`ValidationFailure`]: an external validator reported constraint violations
//! - [`DataAccessFault`]: the persistence layer failed
//!
//! These types only carry what the dispatcher needs to classify them. Their
//! mapping to error kinds lives in `definitions::transport_kind` and in the
//! dispatch policy.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

// ============================================================================
// Transport Faults
// ============================================================================

/// Category of a request-boundary fault.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransportCategory {
    /// No handler is mapped to the request path.
    NoHandlerFound,
    /// The HTTP method is not supported by the matched handler.
    MethodNotSupported,
    /// The request content type is not supported.
    MediaTypeNotSupported,
    /// A path variable expected by the handler is missing.
    MissingPathVariable,
    /// A required query or form parameter is missing.
    MissingRequestParameter,
    /// A parameter could not be converted to the declared type.
    TypeMismatch,
    /// The request body could not be read or parsed.
    MessageNotReadable,
    /// The response body could not be written.
    MessageNotWritable,
    /// No acceptable representation for the requested media type.
    MediaTypeNotAcceptable,
    /// Binding request data to handler arguments failed.
    RequestBinding,
    /// No converter exists for the requested conversion.
    ConversionNotSupported,
    /// A required multipart section is missing.
    MissingRequestPart,
    /// An asynchronous request exceeded its timeout.
    AsyncRequestTimeout,
    /// A category the transport registry has no kind for.
    Unregistered(Cow<'static, str>),
}

impl TransportCategory {
    /// Every category that has a registered kind.
    pub const REGISTERED: &'static [TransportCategory] = &[
        Self::NoHandlerFound,
        Self::MethodNotSupported,
        Self::MediaTypeNotSupported,
        Self::MissingPathVariable,
        Self::MissingRequestParameter,
        Self::TypeMismatch,
        Self::MessageNotReadable,
        Self::MessageNotWritable,
        Self::MediaTypeNotAcceptable,
        Self::RequestBinding,
        Self::ConversionNotSupported,
        Self::MissingRequestPart,
        Self::AsyncRequestTimeout,
    ];

    /// Stable category name, as logged.
    pub fn name(&self) -> &str {
        match self {
            Self::NoHandlerFound => "NoHandlerFound",
            Self::MethodNotSupported => "MethodNotSupported",
            Self::MediaTypeNotSupported => "MediaTypeNotSupported",
            Self::MissingPathVariable => "MissingPathVariable",
            Self::MissingRequestParameter => "MissingRequestParameter",
            Self::TypeMismatch => "TypeMismatch",
            Self::MessageNotReadable => "MessageNotReadable",
            Self::MessageNotWritable => "MessageNotWritable",
            Self::MediaTypeNotAcceptable => "MediaTypeNotAcceptable",
            Self::RequestBinding => "RequestBinding",
            Self::ConversionNotSupported => "ConversionNotSupported",
            Self::MissingRequestPart => "MissingRequestPart",
            Self::AsyncRequestTimeout => "AsyncRequestTimeout",
            Self::Unregistered(name) => name.as_ref(),
        }
    }
}

impl fmt::Display for TransportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fault raised by the request layer.
#[derive(Debug)]
pub struct TransportFault {
    category: TransportCategory,
    message: String,
}

impl TransportFault {
    /// Fault of `category` with the transport's own message.
    pub fn new(category: TransportCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Fault of a category the registry does not know.
    pub fn unregistered(name: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::new(TransportCategory::Unregistered(name.into()), message)
    }

    /// Fault category.
    #[inline]
    pub fn category(&self) -> &TransportCategory {
        &self.category
    }

    /// Message reported by the transport (may be empty).
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for TransportFault {}

// ============================================================================
// Validation Failures
// ============================================================================

/// One constraint violation reported by a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    field: Option<Cow<'static, str>>,
    message: Option<String>,
}

impl Violation {
    /// Violation bound to a field.
    pub fn field(field: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: Some(message.into()),
        }
    }

    /// Violation of the object as a whole (no field prefix).
    pub fn object(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: Some(message.into()),
        }
    }

    /// Field violation whose validator supplied no message.
    pub fn field_without_message(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: Some(field.into()),
            message: None,
        }
    }

    /// Offending field, if any.
    #[inline]
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Validator message; a missing message renders as empty text.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.message()),
            None => f.write_str(self.message()),
        }
    }
}

/// Violations reported together for one request, in validator order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: SmallVec<[Violation; 4]>,
}

impl ValidationFailure {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, violation: Violation) -> Self {
        self.push(violation);
        self
    }

    /// Reported violations.
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether nothing was reported.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `field: message` per violation (bare message for object violations),
    /// joined with `", "` in reporting order.
    pub fn merged_message(&self) -> String {
        let mut out = String::new();
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&violation.to_string());
        }
        out
    }
}

impl FromIterator<Violation> for ValidationFailure {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.merged_message())
    }
}

impl Error for ValidationFailure {}

// ============================================================================
// Data-Access Faults
// ============================================================================

/// Classification of a persistence failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataAccessKind {
    /// A unique constraint was violated.
    DuplicateKey,
    /// Any other driver or statement failure.
    Other,
}

/// A failure reported by the persistence layer.
///
/// The driver message may contain SQL, table names or values, so the
/// dispatcher only logs it.
#[derive(Debug)]
pub struct DataAccessFault {
    kind: DataAccessKind,
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl DataAccessFault {
    /// Fault with the driver's message.
    pub fn new(kind: DataAccessKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Unique-constraint violation.
    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::new(DataAccessKind::DuplicateKey, message)
    }

    /// Any other persistence failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(DataAccessKind::Other, message)
    }

    /// Attach the driver error.
    pub fn with_source(mut self, source: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Fault classification.
    #[inline]
    pub fn kind(&self) -> DataAccessKind {
        self.kind
    }

    /// Raw driver message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DataAccessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for DataAccessFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_field_and_object_violations_in_order() {
        let failure = ValidationFailure::new()
            .with(Violation::field("name", "must not be blank"))
            .with(Violation::object("passwords do not match"))
            .with(Violation::field("age", "must be >= 18"));

        assert_eq!(
            failure.merged_message(),
            "name: must not be blank, passwords do not match, age: must be >= 18"
        );
    }

    #[test]
    fn missing_violation_message_renders_empty() {
        let failure: ValidationFailure =
            [Violation::field_without_message("email")].into_iter().collect();
        assert_eq!(failure.merged_message(), "email: ");
    }

    #[test]
    fn empty_report_merges_to_empty_text() {
        assert!(ValidationFailure::new().is_empty());
        assert_eq!(ValidationFailure::new().merged_message(), "");
    }

    #[test]
    fn unregistered_category_keeps_its_name() {
        let fault = TransportFault::unregistered("PayloadTooLarge", "413");
        assert_eq!(fault.category().name(), "PayloadTooLarge");
        assert!(!TransportCategory::REGISTERED.contains(fault.category()));
    }

    #[test]
    fn registered_categories_are_distinct() {
        let all = TransportCategory::REGISTERED;
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| a != b), "{a} listed twice");
        }
        assert_eq!(all.len(), 13);
    }

    #[test]
    fn data_access_fault_exposes_source() {
        let fault = DataAccessFault::duplicate_key("duplicate key value violates \"users_pkey\"")
            .with_source("driver: 23505");
        assert_eq!(fault.kind(), DataAccessKind::DuplicateKey);
        assert_eq!(fault.source().unwrap().to_string(), "driver: 23505");
    }
}
