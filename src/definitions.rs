//! Registered error kinds, partitioned by concern.
//!
//! # Taxonomy & Governance
//!
//! Each partition is a closed set defined with [`define_error_kinds!`], which
//! also emits a slice of the partition's members. A new failure means a new
//! entry; numeric codes are never reused inside a namespace.
//!
//! Numeric ranges per module:
//! - SYS (100-599) | Well-known outcomes, HTTP-flavoured numbers
//! - DB (600-699) | Data access
//! - SERVLET (700-799) | Transport/request boundary
//! - SRV (800-899) | Input validation
//! - FILE (900-999) | File handling
//! - USER (1000-1099) | User accounts
//!
//! Ranges are enforced by [`validate`] and by the `tests` module at the
//! bottom of this file.
//!
//! [`define_error_kinds!`]: crate::define_error_kinds

use crate::codes::{validate_registry, ErrorKind, InternalErrorKindViolation};
use crate::faults::TransportCategory;
use crate::{define_error_kinds, namespaces};

/// Code range constants for maintaining namespace boundaries.
pub mod ranges {
    pub const SYS_START: u16 = 100;      pub const SYS_END: u16 = 599;
    pub const DB_START: u16 = 600;       pub const DB_END: u16 = 699;
    pub const SERVLET_START: u16 = 700;  pub const SERVLET_END: u16 = 799;
    pub const SRV_START: u16 = 800;      pub const SRV_END: u16 = 899;
    pub const FILE_START: u16 = 900;     pub const FILE_END: u16 = 999;
    pub const USER_START: u16 = 1000;    pub const USER_END: u16 = 1099;
}

// -----------------------------------------------------------------------------
// SYS (100-599) - Well-known outcomes
// -----------------------------------------------------------------------------
define_error_kinds! {
    SYS_KINDS, &namespaces::SYS => {
        OK                    = (200, "Success"),
        UNAUTHORIZED          = (401, "Not logged in or token expired."),
        FORBIDDEN             = (403, "Forbidden"),
        INTERNAL_SERVER_ERROR = (500, "Internal server error"),
    }
}

// -----------------------------------------------------------------------------
// DB (600-699) - Data access
// -----------------------------------------------------------------------------
define_error_kinds! {
    DB_KINDS, &namespaces::DB => {
        DB_OPERATION_ERROR     = (600, "Database operation failed"),
        DUPLICATED_KEY_ERROR   = (601, "Duplicated key found"),
        RECORD_ALREADY_EXISTED = (602, "Record already existed: {0}"),
        RECORD_IN_USE          = (603, "Record in use."),
        RECORD_NOT_FOUND       = (604, "Record {0} not found."),
        RECORD_CREATE_FAILED   = (605, "Record create failed."),
        RECORD_UPDATE_FAILED   = (606, "Record update failed."),
        RECORD_DELETE_FAILED   = (607, "Record delete failed."),
    }
}

// -----------------------------------------------------------------------------
// SERVLET (700-799) - Transport/request boundary
// -----------------------------------------------------------------------------
// One kind per `TransportCategory`; see `transport_kind`.
define_error_kinds! {
    SERVLET_KINDS, &namespaces::SERVLET => {
        NO_HANDLER_FOUND              = (700, "No handler found"),
        REQUEST_METHOD_NOT_SUPPORTED  = (701, "Request method not supported"),
        MEDIA_TYPE_NOT_SUPPORTED      = (702, "Media type not supported"),
        MISSING_PATH_VARIABLE         = (703, "Missing path variable"),
        MISSING_REQUEST_PARAMETER     = (704, "Missing request parameter"),
        TYPE_MISMATCH                 = (705, "Type mismatch"),
        MESSAGE_NOT_READABLE          = (706, "Request body not readable"),
        MESSAGE_NOT_WRITABLE          = (707, "Response body not writable"),
        MEDIA_TYPE_NOT_ACCEPTABLE     = (708, "Media type not acceptable"),
        REQUEST_BINDING_FAILED        = (709, "Request binding failed"),
        CONVERSION_NOT_SUPPORTED      = (710, "Conversion not supported"),
        MISSING_REQUEST_PART          = (711, "Missing request part"),
        ASYNC_REQUEST_TIMEOUT         = (712, "Request timed out"),
    }
}

// -----------------------------------------------------------------------------
// SRV (800-899) - Input validation
// -----------------------------------------------------------------------------
define_error_kinds! {
    SRV_KINDS, &namespaces::SRV => {
        VALIDATE_FAILED   = (800, "Validate failed"),
        INVALID_PARAMETER = (801, "Invalid parameter."),
        SERVER_ERROR      = (802, "Server Error, cause: {0}"),
    }
}

// -----------------------------------------------------------------------------
// FILE (900-999) - File handling
// -----------------------------------------------------------------------------
define_error_kinds! {
    FILE_KINDS, &namespaces::FILE => {
        FILENAME_IS_EMPTY                   = (900, "File name is empty."),
        NOT_SUPPORTED_FILE_EXTENSION        = (901, "Not supported file extension."),
        FILE_SIZE_EXCEEDS_THRESHOLD         = (902, "File {0} size exceeds threshold {1}"),
        FILENAME_CONTAINS_ILLEGAL_CHARACTER = (903, "Filename {0} contains illegal character."),
        CANNOT_CREATE_DIRECTORY             = (904, "Cannot create directory {0}."),
    }
}

// -----------------------------------------------------------------------------
// USER (1000-1099) - User accounts
// -----------------------------------------------------------------------------
define_error_kinds! {
    USER_KINDS, &namespaces::USER => {
        USERNAME_OR_PASSWORD_IS_INCORRECT = (1000, "Username or password is incorrect."),
        USER_IS_LOCKED                    = (1001, "User is locked"),
        USER_LOGIN_FAILED                 = (1002, "User login failed"),
        TOKEN_EXPIRED                     = (1003, "Token expired"),
        USER_NOT_FOUND                    = (1004, "User not found"),
        PASSWORD_IS_INCORRECT             = (1005, "Password is incorrect."),
    }
}

/// Every partition, in registry order.
pub static PARTITIONS: &[&[&ErrorKind]] = &[
    SYS_KINDS,
    DB_KINDS,
    SERVLET_KINDS,
    SRV_KINDS,
    FILE_KINDS,
    USER_KINDS,
];

/// Iterate every registered kind across all partitions.
pub fn registry() -> impl Iterator<Item = &'static ErrorKind> {
    PARTITIONS.iter().flat_map(|partition| partition.iter().copied())
}

/// Reverse lookup by `appName-moduleName-numericCode`.
pub fn kind_by_full_code(full_code: &str) -> Option<&'static ErrorKind> {
    registry().find(|kind| kind.full_code() == full_code)
}

/// Assigned `(start, end)` code range of a module, inclusive.
pub fn module_range(module: &str) -> Option<(u16, u16)> {
    use ranges::*;
    Some(match module {
        "SYS" => (SYS_START, SYS_END),
        "DB" => (DB_START, DB_END),
        "SERVLET" => (SERVLET_START, SERVLET_END),
        "SRV" => (SRV_START, SRV_END),
        "FILE" => (FILE_START, FILE_END),
        "USER" => (USER_START, USER_END),
        _ => return None,
    })
}

/// Check that every kind of an assigned module stays inside its range.
///
/// Kinds of modules without an assigned range are not checked.
///
/// # Errors
///
/// Returns the first kind found outside its range, in input order.
pub fn validate_ranges<'a, I>(kinds: I) -> Result<(), InternalErrorKindViolation>
where
    I: IntoIterator<Item = &'a ErrorKind>,
{
    for kind in kinds {
        if let Some((start, end)) = module_range(kind.module_name()) {
            if !(start..=end).contains(&kind.code()) {
                return Err(InternalErrorKindViolation::OutsideModuleRange {
                    module: kind.module_name(),
                    code: kind.code(),
                    start,
                    end,
                });
            }
        }
    }
    Ok(())
}

/// Run the uniqueness and range checks over the whole registry.
///
/// # Errors
///
/// Returns the first duplicate `(app, module, code)` pair, otherwise the
/// first kind outside its module's range.
pub fn validate() -> Result<(), InternalErrorKindViolation> {
    validate_registry(registry())?;
    validate_ranges(registry())
}

/// Transport-fault registry: the kind for a request-boundary fault category.
///
/// Returns `None` for [`TransportCategory::Unregistered`]; the dispatcher
/// logs the gap and falls back to the generic internal error.
pub fn transport_kind(category: &TransportCategory) -> Option<&'static ErrorKind> {
    use TransportCategory::*;
    Some(match category {
        NoHandlerFound => &NO_HANDLER_FOUND,
        MethodNotSupported => &REQUEST_METHOD_NOT_SUPPORTED,
        MediaTypeNotSupported => &MEDIA_TYPE_NOT_SUPPORTED,
        MissingPathVariable => &MISSING_PATH_VARIABLE,
        MissingRequestParameter => &MISSING_REQUEST_PARAMETER,
        TypeMismatch => &TYPE_MISMATCH,
        MessageNotReadable => &MESSAGE_NOT_READABLE,
        MessageNotWritable => &MESSAGE_NOT_WRITABLE,
        MediaTypeNotAcceptable => &MEDIA_TYPE_NOT_ACCEPTABLE,
        RequestBinding => &REQUEST_BINDING_FAILED,
        ConversionNotSupported => &CONVERSION_NOT_SUPPORTED,
        MissingRequestPart => &MISSING_REQUEST_PART,
        AsyncRequestTimeout => &ASYNC_REQUEST_TIMEOUT,
        Unregistered(_) => return None,
    })
}
