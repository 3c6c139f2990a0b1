//! Bounded log record for failures reaching the dispatch boundary.
//!
//! # Properties
//!
//! - Borrows from the failure with an explicit lifetime
//! - Cannot outlive the error that created it
//! - Every rendered field is truncated to a fixed length
//!
//! The dispatcher builds one `FailureLog` per classified error and hands it to
//! `tracing` exactly once through [`FailureLog::emit`].

use crate::codes::ErrorKind;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Maximum number of causes rendered from a source chain.
pub const MAX_CAUSE_DEPTH: usize = 8;

/// Truncation indicator appended to truncated strings.
pub const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// How loudly the dispatcher reports a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Expected, caller-facing failure (business rules, validation).
    Error,
    /// Unexpected failure of the application itself.
    Critical,
}

impl Severity {
    /// Lower-case label used in structured fields.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured log entry borrowing from the error being dispatched.
///
/// # Example
///
/// ```rust
/// # use unified_errors::{args, definitions, InMemoryCatalog, MessageResolver};
/// # let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
/// let err = definitions::RECORD_IN_USE.new_failure(&resolver, args![]);
/// let mut line = String::new();
/// err.failure_log().write_to(&mut line).unwrap();
/// assert_eq!(line, "[COM-DB-603] message='Record in use.'");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FailureLog<'a> {
    kind: &'a ErrorKind,
    message: &'a str,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> FailureLog<'a> {
    /// Log view over a kind, the text logged for the error, and its cause.
    #[inline]
    pub const fn new(
        kind: &'a ErrorKind,
        message: &'a str,
        cause: Option<&'a (dyn Error + 'static)>,
    ) -> Self {
        Self {
            kind,
            message,
            cause,
        }
    }

    /// Kind the error was classified as.
    #[inline]
    pub const fn kind(&self) -> &ErrorKind {
        self.kind
    }

    /// Untruncated message.
    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    /// Iterate the cause chain, nearest first, up to [`MAX_CAUSE_DEPTH`].
    pub fn causes(&self) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
        std::iter::successors(self.cause, |&err| err.source()).take(MAX_CAUSE_DEPTH)
    }

    /// Write the record to a formatter, truncating each field.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] message='{}'",
            self.kind,
            truncate_with_indicator(self.message)
        )?;

        for (depth, cause) in self.causes().enumerate() {
            let text = cause.to_string();
            write!(f, " cause[{}]='{}'", depth, truncate_with_indicator(&text))?;
        }

        Ok(())
    }

    /// Emit the record through `tracing` at error level.
    pub fn emit(&self, branch: &'static str, severity: Severity) {
        let mut record = String::new();
        if self.write_to(&mut record).is_err() {
            record.clear();
            record.push_str(TRUNCATION_INDICATOR);
        }

        tracing::error!(
            full_code = %self.kind,
            branch,
            severity = severity.as_str(),
            "{}",
            record
        );
    }
}

impl fmt::Display for FailureLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a string for display, marking the cut.
///
/// Returns `Cow::Borrowed` when no truncation is needed. The cut lands on a
/// UTF-8 boundary and the result never exceeds [`MAX_FIELD_OUTPUT_LEN`].
pub fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
