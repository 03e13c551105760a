// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Extension entry points for the host's loader.
//!
//! The library that actually registers tables and functions supplies its
//! init and version routines once through `athena_extension_register`. The
//! host then calls `athena_init` and `athena_version`, which forward to them.
//!
//! # Usage from C
//!
//! ```c
//! static const AthenaEntryPoints ENTRY_POINTS = {
//!     .init = athena_init_rust,
//!     .version = athena_version_rust,
//! };
//! athena_extension_register(&ENTRY_POINTS);
//! ```

use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::sync::{Arc, OnceLock};

use athena::extension::CRATE_VERSION;
use athena::{AthenaExtension, DatabaseHandle, ExtensionEntryPoints, EXTENSION_NAME};

use crate::AthenaError;

/// Init routine: registers the extension's functionality with the database.
pub type AthenaInitFn = unsafe extern "C" fn(db: *mut c_void);

/// Version routine: returns a static null-terminated version string.
pub type AthenaVersionFn = unsafe extern "C" fn() -> *const c_char;

/// Entry points of the library the extension forwards to
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AthenaEntryPoints {
    /// Required
    pub init: Option<AthenaInitFn>,
    /// Optional; the library version is reported when NULL
    pub version: Option<AthenaVersionFn>,
}

struct ForeignEntryPoints {
    init: AthenaInitFn,
    version: Option<AthenaVersionFn>,
}

impl ExtensionEntryPoints for ForeignEntryPoints {
    fn init(&self, db: DatabaseHandle) {
        // SAFETY: the registrant vouched for the routine at registration.
        unsafe { (self.init)(db.as_ptr()) }
    }

    fn version(&self) -> &CStr {
        let Some(version) = self.version else {
            return CRATE_VERSION;
        };
        // SAFETY: the routine returns a static string or NULL.
        let ptr = unsafe { version() };
        if ptr.is_null() {
            log::warn!("version routine returned NULL");
            return CRATE_VERSION;
        }
        unsafe { CStr::from_ptr(ptr) }
    }
}

fn extension() -> &'static OnceLock<AthenaExtension> {
    static EXTENSION: OnceLock<AthenaExtension> = OnceLock::new();
    &EXTENSION
}

/// Register the entry points `athena_init` and `athena_version` forward to
///
/// Registration happens once per process.
///
/// # Safety
/// - `entry_points` must be a valid pointer; it is copied and not retained.
/// - The routines must stay callable for the life of the process.
///
/// # Returns
/// `ATHENA_OK`, `ATHENA_INVALID_ARGUMENT` if the pointer or `init` is NULL,
/// `ATHENA_INVALID_STATE` if entry points are already registered
#[no_mangle]
pub unsafe extern "C" fn athena_extension_register(
    entry_points: *const AthenaEntryPoints,
) -> AthenaError {
    if entry_points.is_null() {
        return AthenaError::AthenaInvalidArgument;
    }
    let AthenaEntryPoints { init, version } = *entry_points;
    let Some(init) = init else {
        log::error!("athena_extension_register: init routine is NULL");
        return AthenaError::AthenaInvalidArgument;
    };

    let ext = AthenaExtension::with_entry_points(Arc::new(ForeignEntryPoints { init, version }));
    match extension().set(ext) {
        Ok(()) => {
            log::debug!("extension '{}' entry points registered", EXTENSION_NAME);
            AthenaError::AthenaOk
        }
        Err(_) => {
            log::error!("athena_extension_register: entry points already registered");
            AthenaError::AthenaInvalidState
        }
    }
}

/// Init hook for the host: forwards `db` to the registered init routine
///
/// A NULL `db` or a missing registration is logged and nothing is called.
///
/// # Safety
/// `db` must be the host's database context for this load.
#[no_mangle]
pub unsafe extern "C" fn athena_init(db: *mut c_void) {
    let Some(db) = DatabaseHandle::from_raw(db) else {
        log::error!("athena_init: database context is NULL");
        return;
    };
    let Some(ext) = extension().get() else {
        log::error!("athena_init: no entry points registered for '{}'", EXTENSION_NAME);
        return;
    };
    if let Err(e) = ext.load(db) {
        log::error!("athena_init: {}", e);
    }
}

/// Version hook for the host
///
/// Returns the registered version routine's string, or this library's
/// version when none is registered.
///
/// # Safety
/// The returned pointer is static; do not free it.
#[no_mangle]
pub unsafe extern "C" fn athena_version() -> *const c_char {
    match extension().get() {
        Some(ext) => ext.version().as_ptr(),
        None => CRATE_VERSION.as_ptr(),
    }
}

/// Name the extension registers under (`"athena"`)
///
/// # Safety
/// The returned pointer is static; do not free it.
#[no_mangle]
pub unsafe extern "C" fn athena_extension_name() -> *const c_char {
    static NAME: &str = "athena\0";
    NAME.as_ptr().cast::<c_char>()
}
