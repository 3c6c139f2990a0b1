//! The `{fullCode, message, data?}` response shape.
//!
//! Envelopes are built only through the constructors below and are
//! immutable afterwards. Serialization uses camelCase field names and omits
//! `data` when there is no payload:
//!
//! ```rust
//! use unified_errors::{args, definitions, InMemoryCatalog, MessageResolver, ResponseEnvelope};
//!
//! let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
//!
//! let ok = ResponseEnvelope::success(&resolver, vec![1, 2]);
//! assert_eq!(ok.full_code(), "COM-SYS-200");
//! assert!(ok.is_success());
//!
//! let failed = ResponseEnvelope::<()>::failed(&resolver, &definitions::RECORD_NOT_FOUND, None, args![9]);
//! assert_eq!(failed.message(), "Record 9 not found.");
//! ```

use crate::catalog::{MessageArgs, MessageResolver};
use crate::codes::ErrorKind;
use crate::definitions;
use serde::{Deserialize, Serialize};

/// Uniform response for both success and failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    full_code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

/// Envelope produced by the dispatch policy; carries no payload by default.
pub type ErrorEnvelope<T = ()> = ResponseEnvelope<T>;

impl<T> ResponseEnvelope<T> {
    /// Envelope from a kind and final message.
    pub(crate) fn from_parts(kind: &ErrorKind, message: String, data: Option<T>) -> Self {
        Self {
            full_code: kind.full_code(),
            message,
            data,
        }
    }

    /// Envelope for `kind` with its message resolved from `args`.
    fn resolved(
        resolver: &MessageResolver,
        kind: &ErrorKind,
        data: Option<T>,
        args: &MessageArgs,
    ) -> Self {
        Self::from_parts(kind, resolver.resolve_kind(kind, args), data)
    }

    // ------------------------------------------------------------------------
    // Success
    // ------------------------------------------------------------------------

    /// Success without payload.
    pub fn empty_success(resolver: &MessageResolver) -> Self {
        Self::resolved(resolver, &definitions::OK, None, &MessageArgs::new())
    }

    /// Success carrying `data`.
    pub fn success(resolver: &MessageResolver, data: T) -> Self {
        Self::resolved(resolver, &definitions::OK, Some(data), &MessageArgs::new())
    }

    /// Success carrying `data`, with the message of `kind` instead of the
    /// default success text.
    pub fn success_with_message(
        resolver: &MessageResolver,
        data: T,
        kind: &ErrorKind,
        args: MessageArgs,
    ) -> Self {
        Self::from_parts(&definitions::OK, resolver.resolve_kind(kind, &args), Some(data))
    }

    /// Success carrying `data`, with the message under an arbitrary catalog key.
    pub fn success_with_key(
        resolver: &MessageResolver,
        data: T,
        key: &str,
        args: MessageArgs,
    ) -> Self {
        Self::from_parts(&definitions::OK, resolver.resolve(key, &args), Some(data))
    }

    /// Success carrying `data` with an already resolved message.
    pub fn success_with_text(data: T, message: impl Into<String>) -> Self {
        Self::from_parts(&definitions::OK, message.into(), Some(data))
    }

    // ------------------------------------------------------------------------
    // Failure
    // ------------------------------------------------------------------------

    /// Failure of `kind`, optionally carrying a payload.
    pub fn failed(
        resolver: &MessageResolver,
        kind: &ErrorKind,
        data: Option<T>,
        args: MessageArgs,
    ) -> Self {
        Self::resolved(resolver, kind, data, &args)
    }

    /// Not logged in or token expired.
    pub fn unauthorized(resolver: &MessageResolver, data: Option<T>, args: MessageArgs) -> Self {
        Self::failed(resolver, &definitions::UNAUTHORIZED, data, args)
    }

    /// Authenticated but not permitted.
    pub fn forbidden(resolver: &MessageResolver, data: Option<T>, args: MessageArgs) -> Self {
        Self::failed(resolver, &definitions::FORBIDDEN, data, args)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// `appName-moduleName-numericCode`.
    #[inline]
    pub fn full_code(&self) -> &str {
        &self.full_code
    }

    /// Final, localized message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload, if any.
    #[inline]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Take the payload out.
    #[inline]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Whether this is the success code.
    pub fn is_success(&self) -> bool {
        self.full_code == definitions::OK.full_code()
    }

    /// Registered kind for this envelope's code.
    pub fn kind(&self) -> Option<&'static ErrorKind> {
        definitions::kind_by_full_code(&self.full_code)
    }

    /// Same code and message with the payload dropped and retyped.
    pub fn without_data<U>(self) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            full_code: self.full_code,
            message: self.message,
            data: None,
        }
    }
}
