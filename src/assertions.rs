//! Guards that turn a failed condition into a business [`Failure`].
//!
//! A [`Guard`] binds one error kind to a resolver. Each check returns
//! `Ok` when the condition holds and `Err(Failure)` otherwise, so call sites
//! propagate with `?`:
//!
//! ```rust
//! use unified_errors::{args, definitions, InMemoryCatalog, MessageResolver, Result};
//!
//! fn rename(resolver: &MessageResolver, name: &str) -> Result<()> {
//!     resolver
//!         .guard(&definitions::FILENAME_IS_EMPTY)
//!         .assert_false(name.is_empty(), args![])?;
//!     resolver
//!         .guard(&definitions::FILENAME_CONTAINS_ILLEGAL_CHARACTER)
//!         .assert_false(name.contains('/'), args![name])?;
//!     Ok(())
//! }
//!
//! let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
//! assert!(rename(&resolver, "notes.txt").is_ok());
//!
//! let err = rename(&resolver, "a/b").unwrap_err();
//! assert_eq!(err.kind().full_code(), "COM-FILE-903");
//! assert_eq!(err.message(), "Filename a/b contains illegal character.");
//! ```
//!
//! `assert_true` and `assert_false` are the primitives; the other checks are
//! expressed through them. The message is resolved only when a check fails.

use crate::catalog::{MessageArgs, MessageResolver};
use crate::codes::ErrorKind;
use crate::{Cause, Failure, Result};

/// An error kind bound to the resolver that renders its message.
#[derive(Debug, Clone, Copy)]
pub struct Guard<'r> {
    kind: &'static ErrorKind,
    resolver: &'r MessageResolver,
}

impl<'r> Guard<'r> {
    /// Guard raising `kind`, resolved through `resolver`.
    #[inline]
    pub const fn new(kind: &'static ErrorKind, resolver: &'r MessageResolver) -> Self {
        Self { kind, resolver }
    }

    /// Kind raised on violation.
    #[inline]
    pub const fn kind(&self) -> &'static ErrorKind {
        self.kind
    }

    /// Business failure of this guard's kind.
    #[inline]
    pub fn fail(&self, args: MessageArgs) -> Failure {
        self.kind.new_failure(self.resolver, args)
    }

    /// Business failure of this guard's kind wrapping `cause`.
    #[inline]
    pub fn fail_caused(&self, cause: impl Into<Cause>, args: MessageArgs) -> Failure {
        self.kind.new_failure_caused(self.resolver, cause, args)
    }

    /// Fail unconditionally.
    #[inline]
    pub fn raise<T>(&self, args: MessageArgs) -> Result<T> {
        Err(self.fail(args))
    }

    /// Fail unless `condition` holds.
    #[inline]
    pub fn assert_true(&self, condition: bool, args: MessageArgs) -> Result<()> {
        if condition {
            Ok(())
        } else {
            self.raise(args)
        }
    }

    /// Fail if `condition` holds.
    #[inline]
    pub fn assert_false(&self, condition: bool, args: MessageArgs) -> Result<()> {
        self.assert_true(!condition, args)
    }

    /// Fail if `value` is absent; otherwise hand the value back.
    pub fn assert_not_null<T>(&self, value: Option<T>, args: MessageArgs) -> Result<T> {
        match value {
            Some(value) => Ok(value),
            None => self.raise(args),
        }
    }

    /// Fail if `value` is present.
    #[inline]
    pub fn assert_null<T>(&self, value: &Option<T>, args: MessageArgs) -> Result<()> {
        self.assert_true(value.is_none(), args)
    }

    /// Fail if `collection` yields any element.
    pub fn assert_empty<I: IntoIterator>(&self, collection: I, args: MessageArgs) -> Result<()> {
        self.assert_true(collection.into_iter().next().is_none(), args)
    }

    /// Fail if `collection` yields nothing.
    pub fn assert_not_empty<I: IntoIterator>(&self, collection: I, args: MessageArgs) -> Result<()> {
        self.assert_false(collection.into_iter().next().is_none(), args)
    }
}

impl MessageResolver {
    /// Guard raising `kind` with messages resolved by this resolver.
    #[inline]
    pub fn guard(&self, kind: &'static ErrorKind) -> Guard<'_> {
        Guard::new(kind, self)
    }
}
