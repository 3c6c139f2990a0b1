//! The single boundary where errors become envelopes.
//!
//! [`DispatchPolicy::classify`] inspects an error most-specific-first:
//!
//! | Error | Kind | Message |
//! |---|---|---|
//! | business [`Failure`] | its own | its own |
//! | base [`Failure`] | its own | its own |
//! | registered [`TransportFault`] | per category | the fault's message |
//! | unregistered [`TransportFault`] | `INTERNAL_SERVER_ERROR` | as for anything else |
//! | [`ValidationFailure`] | `VALIDATE_FAILED` | `field: message, ...` |
//! | [`DataAccessFault`] | `DUPLICATED_KEY_ERROR` / `DB_OPERATION_ERROR` | the kind's text |
//! | anything else | `INTERNAL_SERVER_ERROR` | production: the kind's text; otherwise the error's text |
//!
//! Each call logs the error, with its cause chain, exactly once at error
//! level and returns exactly one envelope. It never panics and never
//! re-raises. Whenever a branch would produce an empty message, the chosen
//! kind's resolved text is used instead.
//!
//! ```rust
//! use unified_errors::{
//!     DataAccessFault, DispatchConfig, DispatchPolicy, Environment, InMemoryCatalog,
//!     MessageResolver,
//! };
//!
//! let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
//! let policy = DispatchPolicy::new(resolver)
//!     .with_config(DispatchConfig::new(Environment::Production));
//!
//! let fault = DataAccessFault::duplicate_key("duplicate key value violates \"users_pkey\"");
//! let envelope = policy.classify(&fault);
//! assert_eq!(envelope.full_code(), "COM-DB-601");
//! assert_eq!(envelope.message(), "Duplicated key found");
//!
//! let io = std::io::Error::other("connect to 10.0.0.3:5432 refused");
//! assert_eq!(policy.classify(&io).message(), "Internal server error");
//! ```

use crate::catalog::{Locale, MessageResolver};
use crate::codes::ErrorKind;
use crate::config::{DispatchConfig, Environment};
use crate::definitions::{self, transport_kind};
use crate::envelope::{ErrorEnvelope, ResponseEnvelope};
use crate::faults::{DataAccessFault, DataAccessKind, TransportFault, ValidationFailure};
use crate::logging::{FailureLog, Severity};
use crate::{Cause, Failure};
use std::error::Error;

/// Branch labels attached to the dispatch log record.
pub mod branches {
    /// Business-rule failure.
    pub const BUSINESS: &str = "business";
    /// Base failure.
    pub const BASE: &str = "base";
    /// Registered transport fault.
    pub const TRANSPORT: &str = "transport";
    /// Validator report.
    pub const VALIDATION: &str = "validation";
    /// Persistence failure.
    pub const DATA_ACCESS: &str = "data_access";
    /// Anything not classified above.
    pub const UNCLASSIFIED: &str = "unclassified";
}

/// Ordered error-to-envelope classification.
///
/// Cheap to clone; share one per process or derive one per request with
/// [`with_locale`](Self::with_locale).
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    resolver: MessageResolver,
    config: DispatchConfig,
}

impl DispatchPolicy {
    /// Policy with the default, non-production configuration.
    pub fn new(resolver: MessageResolver) -> Self {
        Self {
            resolver,
            config: DispatchConfig::default(),
        }
    }

    /// Policy configured from the process environment.
    pub fn from_env(resolver: MessageResolver) -> Self {
        Self::new(resolver).with_config(DispatchConfig::from_env())
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace only the environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Same policy resolving messages in another locale.
    pub fn with_locale(&self, locale: impl Into<Locale>) -> Self {
        Self {
            resolver: self.resolver.with_locale(locale),
            config: self.config.clone(),
        }
    }

    /// Resolver used for envelope messages.
    #[inline]
    pub fn resolver(&self) -> &MessageResolver {
        &self.resolver
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Classify an error into an envelope. Logs exactly once.
    pub fn classify(&self, err: &(dyn Error + 'static)) -> ErrorEnvelope {
        if let Some(failure) = err.downcast_ref::<Failure>() {
            return self.on_failure(failure);
        }
        if let Some(fault) = err.downcast_ref::<TransportFault>() {
            return self.on_transport(fault);
        }
        if let Some(report) = err.downcast_ref::<ValidationFailure>() {
            return self.on_validation(report);
        }
        if let Some(fault) = err.downcast_ref::<DataAccessFault>() {
            return self.on_data_access(fault);
        }
        self.on_unclassified(err)
    }

    /// Success envelope for `Ok`, classified envelope for `Err`.
    pub fn respond<T, E>(&self, result: Result<T, E>) -> ResponseEnvelope<T>
    where
        E: Into<Cause>,
    {
        match result {
            Ok(data) => ResponseEnvelope::success(&self.resolver, data),
            Err(err) => {
                let err: Cause = err.into();
                self.classify(&*err).without_data()
            }
        }
    }

    // ========================================================================
    // Branches
    // ========================================================================

    fn on_failure(&self, failure: &Failure) -> ErrorEnvelope {
        let (branch, severity) = if failure.is_business() {
            (branches::BUSINESS, Severity::Error)
        } else {
            (branches::BASE, Severity::Critical)
        };
        failure.failure_log().emit(branch, severity);

        let message = if failure.message().is_empty() {
            self.resolver.resolve_kind(failure.kind(), failure.args())
        } else {
            failure.message().to_owned()
        };
        ResponseEnvelope::from_parts(failure.kind(), message, None)
    }

    fn on_transport(&self, fault: &TransportFault) -> ErrorEnvelope {
        let Some(kind) = transport_kind(fault.category()) else {
            tracing::warn!(
                category = fault.category().name(),
                "transport category has no registered kind"
            );
            return self.on_unclassified(fault);
        };

        FailureLog::new(kind, fault.message(), None).emit(branches::TRANSPORT, Severity::Error);
        self.envelope_or_kind_text(kind, fault.message())
    }

    fn on_validation(&self, report: &ValidationFailure) -> ErrorEnvelope {
        let kind = &definitions::VALIDATE_FAILED;
        let merged = report.merged_message();

        FailureLog::new(kind, &merged, None).emit(branches::VALIDATION, Severity::Error);
        self.envelope_or_kind_text(kind, &merged)
    }

    fn on_data_access(&self, fault: &DataAccessFault) -> ErrorEnvelope {
        let kind: &'static ErrorKind = match fault.kind() {
            DataAccessKind::DuplicateKey => &definitions::DUPLICATED_KEY_ERROR,
            DataAccessKind::Other => &definitions::DB_OPERATION_ERROR,
        };

        FailureLog::new(kind, fault.message(), fault.source())
            .emit(branches::DATA_ACCESS, Severity::Critical);

        if self.config.shows_data_access_detail() {
            self.envelope_or_kind_text(kind, fault.message())
        } else {
            self.kind_envelope(kind)
        }
    }

    fn on_unclassified(&self, err: &(dyn Error + 'static)) -> ErrorEnvelope {
        let kind = &definitions::INTERNAL_SERVER_ERROR;
        let text = err.to_string();

        FailureLog::new(kind, &text, err.source()).emit(branches::UNCLASSIFIED, Severity::Critical);

        if self.config.environment.is_production() {
            self.kind_envelope(kind)
        } else {
            self.envelope_or_kind_text(kind, &text)
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn kind_envelope(&self, kind: &'static ErrorKind) -> ErrorEnvelope {
        ResponseEnvelope::from_parts(kind, self.resolver.resolve_kind(kind, &[]), None)
    }

    fn envelope_or_kind_text(&self, kind: &'static ErrorKind, message: &str) -> ErrorEnvelope {
        if message.is_empty() {
            self.kind_envelope(kind)
        } else {
            ResponseEnvelope::from_parts(kind, message.to_owned(), None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
