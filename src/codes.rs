//! Error kind namespace - the single source of truth for codes and templates.
//!
//! Every failure the application can report is classified by exactly one
//! [`ErrorKind`]. A kind is identified by the triplet
//! `appName-moduleName-numericCode` (for example `COM-DB-601`) and carries the
//! default message template used when the message catalog has nothing better.
//!
//! # Namespace Structure
//!
//! - **COM-SYS**: Well-known outcomes (success, unauthorized, forbidden, internal error)
//! - **COM-DB**: Data access
//! - **COM-SERVLET**: Transport/request-boundary faults
//! - **COM-SRV**: Input validation
//! - **COM-FILE**: File handling
//! - **COM-USER**: User accounts and sessions
//!
//! # Governance
//!
//! Namespaces are frozen: `ErrorNamespace` has a private field and only the
//! const instances in [`namespaces`] exist. Kinds are defined once as statics
//! (see `definitions`) and are always used by reference, so a failure points
//! at its kind instead of copying it.
//!
//! Numeric codes must be unique within a namespace. [`validate_registry`]
//! checks this for any set of kinds, and the registry test suite runs it over
//! every partition.
//!
//! # Example Usage
//!
//! ```rust
//! use unified_errors::{define_error_kinds, namespaces};
//!
//! define_error_kinds! {
//!     ORDER_KINDS, &namespaces::DB => {
//!         ORDER_LOCKED = (650, "Order {0} is locked"),
//!         ORDER_CLOSED = (651, "Order {0} is already closed"),
//!     }
//! }
//!
//! assert_eq!(ORDER_LOCKED.full_code(), "COM-DB-650");
//! assert_eq!(ORDER_LOCKED.message_key(), "app.ErrorMessages.ORDER_LOCKED");
//! assert_eq!(ORDER_KINDS.len(), 2);
//! ```

use std::fmt;

/// Fixed prefix of every error-message catalog key.
pub const MESSAGE_KEY_PREFIX: &str = "app.ErrorMessages";

// ============================================================================
// Error Namespace (Frozen Identity)
// ============================================================================

/// Owning application and module of a group of error kinds.
///
/// Namespaces are locked at compile time:
/// - Private field prevents user construction
/// - Only const instances are exported (see [`namespaces`])
///
/// This type deliberately does not implement `Copy` or `Clone`; kinds hold a
/// `&'static` reference to their namespace.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ErrorNamespace {
    app: &'static str,
    module: &'static str,
    _private: (),
}

impl ErrorNamespace {
    /// Internal constructor - not part of the public API.
    #[doc(hidden)]
    pub const fn __internal_new(app: &'static str, module: &'static str) -> Self {
        Self {
            app,
            module,
            _private: (),
        }
    }

    /// Short application identifier (e.g. `COM`).
    #[inline]
    pub const fn app_name(&self) -> &'static str {
        self.app
    }

    /// Short subsystem identifier (e.g. `DB`).
    #[inline]
    pub const fn module_name(&self) -> &'static str {
        self.module
    }
}

impl fmt::Display for ErrorNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.app, self.module)
    }
}

/// Canonical namespace instances.
///
/// These are the **only** `ErrorNamespace` values that can exist.
pub mod namespaces {
    use super::ErrorNamespace;

    /// Well-known outcomes shared by every module.
    pub const SYS: ErrorNamespace = ErrorNamespace::__internal_new("COM", "SYS");

    /// Database and data-access failures.
    pub const DB: ErrorNamespace = ErrorNamespace::__internal_new("COM", "DB");

    /// Transport/request-boundary faults raised before a handler runs.
    pub const SERVLET: ErrorNamespace = ErrorNamespace::__internal_new("COM", "SERVLET");

    /// Input validation.
    pub const SRV: ErrorNamespace = ErrorNamespace::__internal_new("COM", "SRV");

    /// File handling.
    pub const FILE: ErrorNamespace = ErrorNamespace::__internal_new("COM", "FILE");

    /// User accounts and sessions.
    pub const USER: ErrorNamespace = ErrorNamespace::__internal_new("COM", "USER");
}

// ============================================================================
// Error Kind Violation Types (Internal + Public)
// ============================================================================

/// Registry violation with detailed taxonomy information.
///
/// The `Display` output names kinds and namespaces. For anything that leaves
/// the process, use [`to_public`](Self::to_public).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalErrorKindViolation {
    /// Numeric code is zero.
    CodeOutOfRange { value: u16 },
    /// Identifier or default template is empty.
    EmptyField { field: &'static str },
    /// Two kinds in the same namespace share a numeric code.
    DuplicateCode {
        namespace: &'static str,
        module: &'static str,
        code: u16,
        first: &'static str,
        second: &'static str,
    },
    /// A kind's code lies outside its module's assigned range.
    OutsideModuleRange {
        module: &'static str,
        code: u16,
        start: u16,
        end: u16,
    },
}

impl InternalErrorKindViolation {
    /// Sanitized message that reveals nothing about the registry layout.
    pub fn to_public(&self) -> &'static str {
        match self {
            Self::CodeOutOfRange { .. } => "Invalid error code format",
            Self::EmptyField { .. } => "Invalid error definition",
            Self::DuplicateCode { .. } | Self::OutsideModuleRange { .. } => {
                "Invalid error registry"
            }
        }
    }
}

impl fmt::Display for InternalErrorKindViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeOutOfRange { value } => {
                write!(f, "Error code {} is out of range (must be non-zero)", value)
            }
            Self::EmptyField { field } => write!(f, "Error kind {} must not be empty", field),
            Self::DuplicateCode {
                namespace,
                module,
                code,
                first,
                second,
            } => write!(
                f,
                "Code {}-{}-{} is registered by both {} and {}",
                namespace, module, code, first, second
            ),
            Self::OutsideModuleRange {
                module,
                code,
                start,
                end,
            } => write!(
                f,
                "Code {} of module {} is outside {}-{}",
                code, module, start, end
            ),
        }
    }
}

impl std::error::Error for InternalErrorKindViolation {}

// ============================================================================
// Error Kind (Primary Identity Type)
// ============================================================================

/// An immutable, statically registered description of one class of failure.
///
/// # Construction APIs
///
/// - `const_new`: For statics (a violation is a compile error)
/// - `checked_new`: For runtime construction (returns `Result`, never panics)
///
/// # Identity
///
/// Like the namespace, a kind is not `Copy` or `Clone`. Failures and
/// envelopes refer to `&'static ErrorKind`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ErrorKind {
    namespace: &'static ErrorNamespace,
    code: u16,
    name: &'static str,
    template: &'static str,
}

impl ErrorKind {
    /// Create a kind with compile-time validation.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const contexts) if the code is zero or the
    /// name or template is empty.
    #[inline]
    pub const fn const_new(
        namespace: &'static ErrorNamespace,
        code: u16,
        name: &'static str,
        template: &'static str,
    ) -> Self {
        assert!(code > 0, "Error code must be non-zero");
        assert!(!name.is_empty(), "Error kind name must not be empty");
        assert!(!template.is_empty(), "Error kind template must not be empty");

        Self {
            namespace,
            code,
            name,
            template,
        }
    }

    /// Create a kind with runtime validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule. The error carries internal details;
    /// call `.to_public()` before exposing it.
    #[inline]
    pub fn checked_new(
        namespace: &'static ErrorNamespace,
        code: u16,
        name: &'static str,
        template: &'static str,
    ) -> Result<Self, InternalErrorKindViolation> {
        if code == 0 {
            return Err(InternalErrorKindViolation::CodeOutOfRange { value: code });
        }
        if name.is_empty() {
            return Err(InternalErrorKindViolation::EmptyField { field: "name" });
        }
        if template.is_empty() {
            return Err(InternalErrorKindViolation::EmptyField { field: "template" });
        }

        Ok(Self {
            namespace,
            code,
            name,
            template,
        })
    }

    /// Namespace reference.
    #[inline]
    pub const fn namespace(&self) -> &'static ErrorNamespace {
        self.namespace
    }

    /// Short application identifier.
    #[inline]
    pub const fn app_name(&self) -> &'static str {
        self.namespace.app_name()
    }

    /// Short module identifier.
    #[inline]
    pub const fn module_name(&self) -> &'static str {
        self.namespace.module_name()
    }

    /// Numeric code, unique within the namespace.
    #[inline]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Registered identifier, e.g. `DUPLICATED_KEY_ERROR`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Default message template with `{0}`, `{1}`, ... placeholders.
    #[inline]
    pub const fn default_message(&self) -> &'static str {
        self.template
    }

    /// `appName-moduleName-numericCode`.
    pub fn full_code(&self) -> String {
        self.to_string()
    }

    /// Catalog key used to localize this kind's message.
    pub fn message_key(&self) -> String {
        format!("{}.{}", MESSAGE_KEY_PREFIX, self.name)
    }

    /// Whether two kinds share the same `(app, module, code)` identity.
    #[inline]
    pub fn same_identity(&self, other: &ErrorKind) -> bool {
        self.code == other.code
            && self.namespace.app == other.namespace.app
            && self.namespace.module == other.namespace.module
    }
}

impl fmt::Display for ErrorKind {
    /// Writes the composite code straight into the formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.namespace, self.code)
    }
}

// ============================================================================
// Registration Checks
// ============================================================================

/// Check that no two kinds share an `(app, module, code)` identity.
///
/// Runs in O(n²); registries are small and this is called once at startup
/// or from tests.
///
/// # Errors
///
/// Returns the first duplicate found, in input order.
pub fn validate_registry<'a, I>(kinds: I) -> Result<(), InternalErrorKindViolation>
where
    I: IntoIterator<Item = &'a ErrorKind>,
{
    let kinds: Vec<&ErrorKind> = kinds.into_iter().collect();

    for (i, first) in kinds.iter().enumerate() {
        for second in &kinds[i + 1..] {
            if first.same_identity(second) {
                return Err(InternalErrorKindViolation::DuplicateCode {
                    namespace: first.app_name(),
                    module: first.module_name(),
                    code: first.code(),
                    first: first.name(),
                    second: second.name(),
                });
            }
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
