//! # Unified Errors
//!
//! Error taxonomy, localized messages and uniform response envelopes for
//! request-serving applications.
//!
//! ## Design Philosophy
//!
//! 1. **Every failure has exactly one kind** from a closed, statically defined registry
//! 2. **Messages are resolved once**, when the failure is created, against an injected catalog
//! 3. **Failures propagate as values** (`Result<T, Failure>` with `?`)
//! 4. **One dispatch boundary** turns any error into exactly one envelope and one log record
//! 5. **Internal detail stays internal** in production
//!
//! ## Layers
//!
//! - [`codes`] / [`definitions`]: `ErrorKind` identity (`COM-DB-601`) and the registry
//! - [`catalog`]: `MessageCatalog` contract and the total `MessageResolver`
//! - [`Failure`]: base and business failures, built by `ErrorKind::new_failure`
//! - [`assertions`]: guards that return `Err(Failure)` on violation
//! - [`faults`]: transport, validation and data-access faults raised by collaborators
//! - [`dispatch`]: the ordered classification policy
//! - [`envelope`]: the `{fullCode, message, data?}` response shape
//!
//! ## Quick Start
//!
//! ```rust
//! use unified_errors::{
//!     args, definitions, DispatchPolicy, InMemoryCatalog, MessageResolver, Result,
//! };
//!
//! fn find_user(resolver: &MessageResolver, id: u64) -> Result<String> {
//!     let found: Option<String> = None;
//!     resolver.guard(&definitions::RECORD_NOT_FOUND).assert_not_null(found, args![id])
//! }
//!
//! let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
//! let policy = DispatchPolicy::new(resolver.clone());
//!
//! let envelope = policy.respond(find_user(&resolver, 7));
//! assert_eq!(envelope.full_code(), "COM-DB-604");
//! assert_eq!(envelope.message(), "Record 7 not found.");
//! assert!(envelope.data().is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::error::Error;
use std::fmt;
use std::result;
use zeroize::Zeroize;

pub mod assertions;
pub mod catalog;
pub mod codes;
pub mod config;
pub mod convenience;
pub mod definitions;
pub mod dispatch;
pub mod envelope;
pub mod faults;
pub mod logging;

#[cfg(test)]
mod log_capture;

pub use assertions::*;
pub use catalog::*;
pub use codes::*;
pub use config::*;
pub use definitions::*;
pub use dispatch::*;
pub use envelope::*;
pub use faults::*;
pub use logging::*;

/// Type alias for Results using our failure type.
pub type Result<T> = result::Result<T, Failure>;

/// Boxed underlying error carried as a failure's cause.
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

// ============================================================================
// Failure
// ============================================================================

/// Which tier of the failure hierarchy a [`Failure`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureTier {
    /// General failure raised by infrastructure code.
    Base,
    /// Domain rule violation. Its message is always safe to show callers.
    Business,
}

/// A classified failure: kind, positional arguments, resolved message and an
/// optional cause.
///
/// # Key Properties
///
/// - `kind` is a `&'static` reference into the registry, never a copy
/// - `message` is resolved at construction and never changes afterwards
/// - Owned argument and message text is zeroized on drop
///
/// Failures are normally created through [`ErrorKind::new_failure`] or the
/// guards in [`assertions`], which produce the business tier.
#[must_use = "failures should be propagated or dispatched"]
pub struct Failure {
    kind: &'static ErrorKind,
    args: MessageArgs,
    message: String,
    cause: Option<Cause>,
    tier: FailureTier,
}

impl Failure {
    /// Base-tier failure with an already resolved message.
    #[inline]
    pub fn new(kind: &'static ErrorKind, args: MessageArgs, message: impl Into<String>) -> Self {
        Self {
            kind,
            args,
            message: message.into(),
            cause: None,
            tier: FailureTier::Base,
        }
    }

    /// Business-tier failure with an already resolved message.
    #[inline]
    pub fn business(
        kind: &'static ErrorKind,
        args: MessageArgs,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            args,
            message: message.into(),
            cause: None,
            tier: FailureTier::Business,
        }
    }

    /// Base-tier failure whose message is resolved from the kind.
    pub fn resolved(
        resolver: &MessageResolver,
        kind: &'static ErrorKind,
        args: MessageArgs,
    ) -> Self {
        let message = resolver.resolve_kind(kind, &args);
        Self::new(kind, args, message)
    }

    /// Attach the underlying error.
    #[inline]
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Classifying kind.
    #[inline]
    pub const fn kind(&self) -> &'static ErrorKind {
        self.kind
    }

    /// Positional arguments, in the order supplied.
    #[inline]
    pub fn args(&self) -> &[MessageArg] {
        &self.args
    }

    /// Localized, argument-substituted message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying error, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Hierarchy tier.
    #[inline]
    pub const fn tier(&self) -> FailureTier {
        self.tier
    }

    /// Whether this is a business-rule failure.
    #[inline]
    pub const fn is_business(&self) -> bool {
        matches!(self.tier, FailureTier::Business)
    }

    /// Borrowed log view of this failure.
    #[inline]
    pub fn failure_log(&self) -> FailureLog<'_> {
        FailureLog::new(self.kind, &self.message, self.source())
    }
}

impl Drop for Failure {
    fn drop(&mut self) {
        self.message.zeroize();
        for arg in self.args.iter_mut() {
            arg.zeroize();
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &format_args!("{}", self.kind))
            .field("tier", &self.tier)
            .field("message", &self.message)
            .field("args", &self.args)
            .field("cause", &self.cause.as_ref().map(|_| "<PRESENT>"))
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Self-Raising Kinds
// ============================================================================

impl ErrorKind {
    /// Business failure of this kind with its message resolved now.
    pub fn new_failure(&'static self, resolver: &MessageResolver, args: MessageArgs) -> Failure {
        let message = resolver.resolve_kind(self, &args);
        Failure::business(self, args, message)
    }

    /// Like [`new_failure`](Self::new_failure), wrapping an underlying error.
    pub fn new_failure_caused(
        &'static self,
        resolver: &MessageResolver,
        cause: impl Into<Cause>,
        args: MessageArgs,
    ) -> Failure {
        self.new_failure(resolver, args).with_cause(cause)
    }

    /// `Err` of a fresh business failure, for `return kind.raise(..)` call sites.
    #[inline]
    pub fn raise<T>(&'static self, resolver: &MessageResolver, args: MessageArgs) -> Result<T> {
        Err(self.new_failure(resolver, args))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::io;

    fn resolver() -> MessageResolver {
        MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en")
    }

    #[test]
    fn new_failure_is_business_with_resolved_message() {
        let err = definitions::RECORD_NOT_FOUND.new_failure(&resolver(), args!["user-9"]);

        assert!(err.is_business());
        assert_eq!(err.tier(), FailureTier::Business);
        assert!(std::ptr::eq(err.kind(), &definitions::RECORD_NOT_FOUND));
        assert_eq!(err.message(), "Record user-9 not found.");
        assert_eq!(err.to_string(), "Record user-9 not found.");
        assert_eq!(err.args()[0].as_str(), "user-9");
        assert!(err.cause().is_none());
    }

    #[test]
    fn caused_failure_exposes_source() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = definitions::CANNOT_CREATE_DIRECTORY.new_failure_caused(
            &resolver(),
            io,
            args!["/srv/upload"],
        );

        assert_eq!(err.message(), "Cannot create directory /srv/upload.");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn base_failure_is_not_business() {
        let err = Failure::resolved(&resolver(), &definitions::DB_OPERATION_ERROR, args![]);
        assert!(!err.is_business());
        assert_eq!(err.message(), "Database operation failed");
    }

    #[test]
    fn raise_returns_err() {
        let result: Result<u32> = definitions::TOKEN_EXPIRED.raise(&resolver(), args![]);
        assert_eq!(result.unwrap_err().kind().full_code(), "COM-USER-1003");
    }

    #[test]
    fn missing_catalog_entry_falls_back_to_key() {
        let empty = MessageResolver::new(InMemoryCatalog::new("en"), "en");
        let err = definitions::USER_IS_LOCKED.new_failure(&empty, args![]);
        assert_eq!(err.message(), "app.ErrorMessages.USER_IS_LOCKED");
    }

    #[test]
    fn debug_hides_cause_contents() {
        let err = definitions::SERVER_ERROR
            .new_failure(&resolver(), args!["boom"])
            .with_cause(io::Error::other("secret-host:5432"));
        let debug = format!("{:?}", err);
        assert!(debug.contains("COM-SRV-802"));
        assert!(!debug.contains("secret-host"));
    }
}
