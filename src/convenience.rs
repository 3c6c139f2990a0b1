//! Convenience macros for defining kinds and raising failures.
//!
//! # Usage
//!
//! ```rust
//! # use unified_errors::{args, fail, definitions, InMemoryCatalog, MessageResolver, Result};
//! let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
//!
//! fn load(resolver: &MessageResolver, id: u64) -> Result<String> {
//!     if id == 0 {
//!         fail!(resolver, definitions::RECORD_NOT_FOUND, id);
//!     }
//!     Ok(format!("record {id}"))
//! }
//!
//! let err = load(&resolver, 0).unwrap_err();
//! assert_eq!(err.message(), "Record 0 not found.");
//! assert_eq!(err.args().len(), 1);
//! # let _ = args![1, "two"];
//! ```
//!
//! Arguments are forwarded positionally and verbatim. Nothing checks that the
//! count matches the template; extra arguments are ignored and missing ones
//! leave their `{N}` placeholder in the final message.

// ============================================================================
// Message Arguments
// ============================================================================

/// Build a [`MessageArgs`](crate::MessageArgs) list from displayable values.
///
/// ```rust
/// # use unified_errors::args;
/// let file = "report.pdf";
/// let args = args![file, 10_u32];
/// assert_eq!(args[0].as_str(), "report.pdf");
/// assert_eq!(args[1].as_str(), "10");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::MessageArgs::new()
    };
    ($($arg:expr),+ $(,)?) => {{
        let mut args = $crate::MessageArgs::new();
        $( args.push($crate::MessageArg::from(&$arg)); )+
        args
    }};
}

// ============================================================================
// Raising Failures
// ============================================================================

/// Return early with a business failure of the given kind.
///
/// Expands to `return Err(kind.new_failure(resolver, args![...]).into())`, so
/// it works in any function whose error type implements `From<Failure>`.
#[macro_export]
macro_rules! fail {
    ($resolver:expr, $kind:expr $(, $arg:expr)* $(,)?) => {
        return ::core::result::Result::Err(
            $kind.new_failure($resolver, $crate::args![$($arg),*]).into()
        )
    };
}

/// Return early with a business failure unless `cond` holds.
///
/// ```rust
/// # use unified_errors::{ensure_kind, definitions, InMemoryCatalog, MessageResolver, Result};
/// # let resolver = MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en");
/// fn check(resolver: &MessageResolver, size: u64) -> Result<()> {
///     ensure_kind!(size <= 1024, resolver, definitions::FILE_SIZE_EXCEEDS_THRESHOLD, "upload", 1024);
///     Ok(())
/// }
/// assert!(check(&resolver, 10).is_ok());
/// assert_eq!(
///     check(&resolver, 4096).unwrap_err().message(),
///     "File upload size exceeds threshold 1024"
/// );
/// ```
#[macro_export]
macro_rules! ensure_kind {
    ($cond:expr, $resolver:expr, $kind:expr $(, $arg:expr)* $(,)?) => {
        if !($cond) {
            $crate::fail!($resolver, $kind $(, $arg)*);
        }
    };
}

// ============================================================================
// Kind Definition Macros
// ============================================================================

/// Define a single error kind as a `pub static`.
///
/// The static's identifier doubles as the kind's registered name, which is
/// also the last segment of its catalog key.
///
/// ```rust
/// # use unified_errors::{define_error_kind, namespaces};
/// define_error_kind!(QUOTA_EXCEEDED, &namespaces::USER, 1090, "Quota {0} exceeded");
/// assert_eq!(QUOTA_EXCEEDED.name(), "QUOTA_EXCEEDED");
/// ```
#[macro_export]
macro_rules! define_error_kind {
    ($(#[$meta:meta])* $name:ident, $namespace:expr, $code:expr, $template:expr) => {
        #[doc = $template]
        $(#[$meta])*
        pub static $name: $crate::ErrorKind =
            $crate::ErrorKind::const_new($namespace, $code, stringify!($name), $template);
    };
}

/// Define a closed partition of error kinds sharing one namespace.
///
/// Besides one static per kind, emits `pub static $partition: &[&ErrorKind]`
/// listing the members in definition order.
///
/// ```rust
/// # use unified_errors::{define_error_kinds, namespaces};
/// define_error_kinds! {
///     PAYMENT_KINDS, &namespaces::DB => {
///         PAYMENT_DECLINED = (680, "Payment declined"),
///         PAYMENT_PENDING = (681, "Payment {0} pending"),
///     }
/// }
/// assert_eq!(PAYMENT_KINDS[1].full_code(), "COM-DB-681");
/// ```
#[macro_export]
macro_rules! define_error_kinds {
    ($partition:ident, $namespace:expr => {
        $( $(#[$meta:meta])* $name:ident = ($code:expr, $template:expr) ),+ $(,)?
    }) => {
        $(
            $crate::define_error_kind!($(#[$meta])* $name, $namespace, $code, $template);
        )+

        #[doc = concat!("Members of the `", stringify!($partition), "` partition.")]
        pub static $partition: &[&$crate::ErrorKind] = &[$(&$name),+];
    };
}

// ============================================================================
// Tests
// ============================================================================
