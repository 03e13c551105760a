// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Logger setup for hosts that do not install one.
//!
//! The extension reports through the `log` facade: rejected type arguments
//! at `error`, unknown catalog types mapped to VARCHAR at `warn`, extension
//! loads at `info`. Nothing is printed until a logger exists. A host that
//! already routes `log` records keeps its own; these calls then return
//! `ATHENA_INVALID_STATE` and change nothing.

use std::ffi::CStr;
use std::os::raw::c_char;

use super::AthenaError;

/// Most verbose level to print
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AthenaLogLevel {
    AthenaLogOff = 0,
    AthenaLogError = 1,
    AthenaLogWarn = 2,
    AthenaLogInfo = 3,
    AthenaLogDebug = 4,
    AthenaLogTrace = 5,
}

impl From<AthenaLogLevel> for log::LevelFilter {
    fn from(level: AthenaLogLevel) -> Self {
        match level {
            AthenaLogLevel::AthenaLogOff => log::LevelFilter::Off,
            AthenaLogLevel::AthenaLogError => log::LevelFilter::Error,
            AthenaLogLevel::AthenaLogWarn => log::LevelFilter::Warn,
            AthenaLogLevel::AthenaLogInfo => log::LevelFilter::Info,
            AthenaLogLevel::AthenaLogDebug => log::LevelFilter::Debug,
            AthenaLogLevel::AthenaLogTrace => log::LevelFilter::Trace,
        }
    }
}

/// Install `builder` as the process logger, writing to stderr.
fn install(builder: &mut env_logger::Builder) -> AthenaError {
    match builder.format_timestamp_millis().try_init() {
        Ok(()) => AthenaError::AthenaOk,
        Err(_) => AthenaError::AthenaInvalidState,
    }
}

/// Print athena's records up to `level` on stderr
///
/// # Safety
/// Call once, before the extension is used from several threads.
///
/// # Example (C)
/// ```c
/// athena_logging_init(ATHENA_LOG_INFO);
/// ```
#[no_mangle]
pub unsafe extern "C" fn athena_logging_init(level: AthenaLogLevel) -> AthenaError {
    install(env_logger::Builder::new().filter_level(level.into()))
}

/// Like `athena_logging_init`, but a `RUST_LOG` setting in the host's
/// environment takes precedence over `default_level`
///
/// # Safety
/// Call once, before the extension is used from several threads.
#[no_mangle]
pub unsafe extern "C" fn athena_logging_init_env(default_level: AthenaLogLevel) -> AthenaError {
    let fallback = log::LevelFilter::from(default_level).to_string();
    install(&mut env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(fallback),
    ))
}

/// Print records selected by `filter`, written in `RUST_LOG` syntax
///
/// # Safety
/// `filter` must be NULL or a null-terminated C string.
///
/// # Returns
/// `ATHENA_INVALID_ARGUMENT` if `filter` is NULL or not UTF-8
///
/// # Example (C)
/// ```c
/// athena_logging_init_with_filter("athena=debug,warn");
/// ```
#[no_mangle]
pub unsafe extern "C" fn athena_logging_init_with_filter(filter: *const c_char) -> AthenaError {
    if filter.is_null() {
        return AthenaError::AthenaInvalidArgument;
    }
    let Ok(filter) = CStr::from_ptr(filter).to_str() else {
        return AthenaError::AthenaInvalidArgument;
    };
    install(env_logger::Builder::new().parse_filters(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(
            log::LevelFilter::from(AthenaLogLevel::AthenaLogOff),
            log::LevelFilter::Off
        );
        assert_eq!(
            log::LevelFilter::from(AthenaLogLevel::AthenaLogTrace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_null_filter_is_rejected() {
        let result = unsafe { athena_logging_init_with_filter(std::ptr::null()) };
        assert_eq!(result, AthenaError::AthenaInvalidArgument);
    }
}
