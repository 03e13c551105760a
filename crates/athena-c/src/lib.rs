// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! # athena C FFI Bindings
//!
//! C-compatible entry points for the athena extension: logical type handles
//! (including the struct-type builder the host's loader calls), extension
//! init/version bridging, configuration and logging.
//!
//! # Safety
//!
//! All public functions are `unsafe` and require the caller to uphold the
//! invariants documented in each function's safety comment. Logical type
//! handles are checked against the set of live handles before use, so a
//! stale or foreign handle is reported as `ATHENA_INVALID_ARGUMENT` instead
//! of being dereferenced.

mod config_ffi;
mod extension_ffi;
mod handles;
mod logging;
mod logical_type_ffi;

pub use config_ffi::*;
pub use extension_ffi::*;
pub use logging::*;
pub use logical_type_ffi::*;

use std::os::raw::c_char;

use athena::{ConfigError, TypeError};

/// Opaque handle to a logical type
#[repr(C)]
pub struct AthenaLogicalType {
    _private: [u8; 0],
}

/// Error codes (C-compatible enum)
///
/// # Error Code Categories
///
/// - **0-9**: Success and generic errors
/// - **10-19**: Configuration and state errors
/// - **30-39**: Type construction errors
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AthenaError {
    /// Operation completed successfully
    AthenaOk = 0,
    /// Invalid argument provided (null pointer, stale handle, bad count)
    AthenaInvalidArgument = 1,
    /// Requested member or resource not found
    AthenaNotFound = 2,
    /// Generic operation failure
    AthenaOperationFailed = 3,
    /// Memory allocation failed
    AthenaOutOfMemory = 4,

    // === Configuration errors (10-19) ===
    /// Invalid configuration settings
    AthenaConfigError = 10,
    /// Operation not valid in the current state
    AthenaInvalidState = 14,

    // === Type errors (30-39) ===
    /// Type is not of the kind the operation needs (e.g. not a STRUCT)
    AthenaTypeMismatch = 30,
    /// Struct member name repeated while duplicates are rejected
    AthenaDuplicateFieldName = 31,
    /// Catalog type name has no logical type mapping
    AthenaUnknownTypeName = 32,
    /// Catalog type name could not be parsed
    AthenaMalformedTypeName = 33,
}

impl From<&TypeError> for AthenaError {
    fn from(err: &TypeError) -> Self {
        match err {
            TypeError::InvalidArgument(_) => AthenaError::AthenaInvalidArgument,
            TypeError::DuplicateFieldName { .. } => AthenaError::AthenaDuplicateFieldName,
            TypeError::AllocationFailure { .. } => AthenaError::AthenaOutOfMemory,
            TypeError::UnknownTypeName(_) => AthenaError::AthenaUnknownTypeName,
            TypeError::MalformedTypeName { .. } => AthenaError::AthenaMalformedTypeName,
            TypeError::NotAStruct(_) => AthenaError::AthenaTypeMismatch,
            TypeError::MemberIndexOutOfBounds { .. } => AthenaError::AthenaNotFound,
        }
    }
}

impl From<&ConfigError> for AthenaError {
    fn from(_: &ConfigError) -> Self {
        AthenaError::AthenaConfigError
    }
}

/// Get a static description of an error code
///
/// # Safety
/// The returned pointer is a static null-terminated string; do not free it.
#[no_mangle]
pub unsafe extern "C" fn athena_error_message(error: AthenaError) -> *const c_char {
    let msg: &'static str = match error {
        AthenaError::AthenaOk => "ok\0",
        AthenaError::AthenaInvalidArgument => "invalid argument\0",
        AthenaError::AthenaNotFound => "not found\0",
        AthenaError::AthenaOperationFailed => "operation failed\0",
        AthenaError::AthenaOutOfMemory => "out of memory\0",
        AthenaError::AthenaConfigError => "invalid configuration\0",
        AthenaError::AthenaInvalidState => "invalid state\0",
        AthenaError::AthenaTypeMismatch => "type mismatch\0",
        AthenaError::AthenaDuplicateFieldName => "duplicate struct member name\0",
        AthenaError::AthenaUnknownTypeName => "unknown type name\0",
        AthenaError::AthenaMalformedTypeName => "malformed type name\0",
    };
    msg.as_ptr().cast::<c_char>()
}

/// Get the athena library version string
///
/// # Safety
/// The returned pointer is a static null-terminated string; do not free it.
#[no_mangle]
pub unsafe extern "C" fn athena_library_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}
