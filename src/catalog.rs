//! Message resolution against an external, preloaded message catalog.
//!
//! # Contract
//!
//! The catalog only answers "present or absent" for a `(key, locale, args)`
//! lookup. [`MessageResolver`] owns the fallback rules:
//!
//! - Missing key: log a warning and return the key itself
//! - Empty template: return the key itself
//!
//! Resolution is therefore total. A misconfigured catalog degrades to showing
//! raw keys; it never turns into a failure of its own.
//!
//! # Keys
//!
//! Error kinds are looked up under `app.ErrorMessages.<KIND_NAME>` (see
//! [`ErrorKind::message_key`]). Other messages may use any key.
//!
//! # Example
//!
//! ```rust
//! use unified_errors::{args, definitions, InMemoryCatalog, MessageResolver};
//!
//! let catalog = InMemoryCatalog::with_default_templates("en")
//!     .with_message("de", "app.ErrorMessages.RECORD_NOT_FOUND", "Datensatz {0} nicht gefunden.");
//! let resolver = MessageResolver::new(catalog, "de-AT");
//!
//! // "de-AT" falls back to "de".
//! assert_eq!(
//!     resolver.resolve_kind(&definitions::RECORD_NOT_FOUND, &args![42]),
//!     "Datensatz 42 nicht gefunden."
//! );
//! // Unknown keys come back verbatim.
//! assert_eq!(resolver.resolve("no.such.key", &args![]), "no.such.key");
//! ```

use crate::codes::{ErrorKind, MESSAGE_KEY_PREFIX};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroize;

// ============================================================================
// Locale
// ============================================================================

/// A BCP-47-style language tag such as `en`, `en-US` or `zh_CN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// Wrap a tag without validation.
    #[inline]
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// The tag as given.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// Primary language subtag (`en` for `en-US`).
    pub fn language(&self) -> &str {
        self.as_str()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
    }

    /// Language-only parent, or `None` if this tag has no region.
    pub fn parent(&self) -> Option<Locale> {
        let language = self.language();
        if language.len() == self.as_str().len() {
            None
        } else {
            Some(Locale::new(language.to_owned()))
        }
    }
}

impl From<&'static str> for Locale {
    fn from(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Message Arguments
// ============================================================================

/// One positional argument, rendered to text when it is captured.
///
/// Arguments often carry caller input (file names, user names, ids). Owned
/// text is zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct MessageArg(Cow<'static, str>);

impl MessageArg {
    /// Argument from a static string, without allocating.
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Rendered text.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl<T: fmt::Display + ?Sized> From<&T> for MessageArg {
    fn from(value: &T) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl Zeroize for MessageArg {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.0 {
            s.zeroize();
        }
    }
}

impl Drop for MessageArg {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered positional arguments; most templates take four or fewer.
pub type MessageArgs = SmallVec<[MessageArg; 4]>;

/// Substitute `{N}` placeholders with positional arguments.
///
/// A placeholder whose index has no argument is copied through unchanged, as
/// is any brace sequence that is not `{digits}`.
///
/// ```rust
/// # use unified_errors::{args, format_template};
/// assert_eq!(format_template("File {0} exceeds {1}", &args!["a.txt"]), "File a.txt exceeds {1}");
/// ```
pub fn format_template(template: &str, args: &[MessageArg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let placeholder = after.find('}').and_then(|close| {
            let digits = &after[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse::<usize>().ok().map(|index| (index, close))
        });

        match placeholder {
            Some((index, close)) if index < args.len() => {
                out.push_str(args[index].as_str());
                rest = &after[close + 1..];
            }
            Some((_, close)) => {
                out.push_str(&rest[open..open + close + 2]);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

// ============================================================================
// Catalog Contract
// ============================================================================

/// Lookup contract of an external message catalog.
///
/// Implementations answer from a preloaded table; lookups must not block.
pub trait MessageCatalog: Send + Sync {
    /// Localized, argument-substituted text for `key`, or `None` if the
    /// catalog has no entry.
    fn lookup(&self, key: &str, locale: &Locale, args: &[MessageArg]) -> Option<String>;
}

impl<C: MessageCatalog + ?Sized> MessageCatalog for Arc<C> {
    fn lookup(&self, key: &str, locale: &Locale, args: &[MessageArg]) -> Option<String> {
        (**self).lookup(key, locale, args)
    }
}

/// In-process catalog keyed by locale tag and message key.
///
/// Lookups try the exact tag, then its language, then the catalog's default
/// locale.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    default_locale: Locale,
    entries: HashMap<String, HashMap<String, String>>,
}

impl InMemoryCatalog {
    /// Empty catalog.
    pub fn new(default_locale: impl Into<Locale>) -> Self {
        Self {
            default_locale: default_locale.into(),
            entries: HashMap::new(),
        }
    }

    /// Catalog preloaded with every registered kind's default template under
    /// `default_locale`.
    pub fn with_default_templates(default_locale: impl Into<Locale>) -> Self {
        let mut catalog = Self::new(default_locale);
        let locale = catalog.default_locale.clone();
        for kind in crate::definitions::registry() {
            catalog.insert(locale.clone(), kind.message_key(), kind.default_message());
        }
        catalog
    }

    /// Add or replace one template.
    pub fn insert(
        &mut self,
        locale: impl Into<Locale>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.entries
            .entry(locale.into().as_str().to_owned())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_message(
        mut self,
        locale: impl Into<Locale>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(locale, key, template);
        self
    }

    /// Default locale used as the last fallback.
    #[inline]
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    fn template(&self, key: &str, locale: &str) -> Option<&str> {
        self.entries
            .get(locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

impl MessageCatalog for InMemoryCatalog {
    fn lookup(&self, key: &str, locale: &Locale, args: &[MessageArg]) -> Option<String> {
        let template = self
            .template(key, locale.as_str())
            .or_else(|| self.template(key, locale.language()))
            .or_else(|| self.template(key, self.default_locale.as_str()))?;

        Some(format_template(template, args))
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves keys and kinds into final messages, with total fallback.
///
/// Passed explicitly to everything that needs a message; there is no global
/// message source. Cloning shares the catalog.
#[derive(Clone)]
pub struct MessageResolver {
    catalog: Arc<dyn MessageCatalog>,
    locale: Locale,
}

impl MessageResolver {
    /// Resolver over `catalog` with a default locale.
    pub fn new(catalog: impl MessageCatalog + 'static, locale: impl Into<Locale>) -> Self {
        Self::from_shared(Arc::new(catalog), locale)
    }

    /// Resolver over an already shared catalog.
    pub fn from_shared(catalog: Arc<dyn MessageCatalog>, locale: impl Into<Locale>) -> Self {
        Self {
            catalog,
            locale: locale.into(),
        }
    }

    /// Same catalog, different locale (e.g. from a request header).
    pub fn with_locale(&self, locale: impl Into<Locale>) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            locale: locale.into(),
        }
    }

    /// Locale used by [`resolve`](Self::resolve).
    #[inline]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Resolve `key` in this resolver's locale.
    #[inline]
    pub fn resolve(&self, key: &str, args: &[MessageArg]) -> String {
        self.resolve_in(key, &self.locale, args)
    }

    /// Resolve `key` in an explicit locale.
    ///
    /// Never fails: a missing key is logged and returned as-is, and an empty
    /// template also yields the key. An empty key with nothing to resolve
    /// yields [`MESSAGE_KEY_PREFIX`], so the result is never empty.
    pub fn resolve_in(&self, key: &str, locale: &Locale, args: &[MessageArg]) -> String {
        match self.catalog.lookup(key, locale, args) {
            Some(message) if !message.is_empty() => message,
            Some(_) => key_or_prefix(key),
            None => {
                tracing::warn!(key, locale = %locale, "message key not found");
                key_or_prefix(key)
            }
        }
    }

    /// Resolve the catalog message of an error kind.
    #[inline]
    pub fn resolve_kind(&self, kind: &ErrorKind, args: &[MessageArg]) -> String {
        self.resolve(&kind.message_key(), args)
    }
}

fn key_or_prefix(key: &str) -> String {
    if key.is_empty() {
        MESSAGE_KEY_PREFIX.to_owned()
    } else {
        key.to_owned()
    }
}

impl fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageResolver")
            .field("locale", &self.locale)
            .field("catalog", &"<dyn MessageCatalog>")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
