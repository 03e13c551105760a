// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Logical type C FFI bindings.
//!
//! Create, inspect and destroy logical type handles. The struct-type builder
//! takes parallel arrays of member types and names, as the host's extension
//! API does, and copies each member type into the new struct.
//!
//! # Usage from C
//!
//! ```c
//! AthenaLogicalType* id = athena_create_logical_type(ATHENA_TYPE_INTEGER);
//! AthenaLogicalType* label = athena_create_logical_type(ATHENA_TYPE_VARCHAR);
//!
//! const AthenaLogicalType* types[] = { id, label };
//! const char* names[] = { "id", "label" };
//! AthenaLogicalType* row = athena_create_struct_type(types, names, 2);
//!
//! // Members are copies; the inputs can go right away.
//! athena_destroy_logical_type(&id);
//! athena_destroy_logical_type(&label);
//!
//! size_t count = athena_struct_type_member_count(row);  // 2
//! athena_destroy_logical_type(&row);
//! ```

use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use athena::{
    create_struct_type, parse_type_name, LogicalType, LogicalTypeId, RuntimeConfig, TypeError,
};

use crate::handles;
use crate::{AthenaError, AthenaLogicalType};

// =============================================================================
// Type ids for C
// =============================================================================

/// Logical type ids, numbered as in the host's C API.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)] // C FFI: prefix required (no namespaces in C)
pub enum AthenaTypeId {
    AthenaTypeInvalid = 0,
    AthenaTypeBoolean = 1,
    AthenaTypeTinyint = 2,
    AthenaTypeSmallint = 3,
    AthenaTypeInteger = 4,
    AthenaTypeBigint = 5,
    AthenaTypeUtinyint = 6,
    AthenaTypeUsmallint = 7,
    AthenaTypeUinteger = 8,
    AthenaTypeUbigint = 9,
    AthenaTypeFloat = 10,
    AthenaTypeDouble = 11,
    AthenaTypeTimestamp = 12,
    AthenaTypeDate = 13,
    AthenaTypeVarchar = 17,
    AthenaTypeBlob = 18,
    AthenaTypeDecimal = 19,
    AthenaTypeList = 24,
    AthenaTypeStruct = 25,
    AthenaTypeMap = 26,
}

/// Deepest nesting a constructed type may have. A scalar has depth 0 and each
/// LIST, MAP or STRUCT level adds one.
pub const ATHENA_MAX_NESTING_DEPTH: usize = 64;

// =============================================================================
// Helpers
// =============================================================================

/// Write `text` into `out_buf` (truncated, always null-terminated) and
/// return its full length in bytes.
unsafe fn copy_to_buffer(text: &str, out_buf: *mut c_char, capacity: usize) -> usize {
    let needed = text.len();
    if !out_buf.is_null() && capacity > 0 {
        let copy_len = needed.min(capacity - 1);
        ptr::copy_nonoverlapping(text.as_ptr(), out_buf.cast::<u8>(), copy_len);
        *out_buf.add(copy_len) = 0;
    }
    needed
}

/// Borrow a C string as UTF-8; the error says what is wrong with it.
unsafe fn c_str<'a>(s: *const c_char) -> Result<&'a str, &'static str> {
    if s.is_null() {
        return Err("is NULL");
    }
    CStr::from_ptr(s).to_str().map_err(|_| "is not valid UTF-8")
}

fn invalid_argument(what: impl fmt::Display, problem: &str) -> TypeError {
    TypeError::InvalidArgument(format!("{} {}", what, problem))
}

/// Hand out `result` as a new handle, or log and return NULL.
fn handle_or_null(op: &str, result: Result<LogicalType, TypeError>) -> *mut AthenaLogicalType {
    match result {
        Ok(ty) => handles::into_handle(ty),
        Err(e) => {
            log::error!("{}: {}", op, e);
            ptr::null_mut()
        }
    }
}

fn live_copy(handle: *const AthenaLogicalType, what: &str) -> Result<LogicalType, TypeError> {
    handles::with_type(handle, LogicalType::clone).ok_or_else(|| {
        TypeError::InvalidArgument(format!("{} is not a live logical type handle", what))
    })
}

unsafe fn build_struct(
    member_types: *const *const AthenaLogicalType,
    member_names: *const *const c_char,
    member_count: usize,
) -> Result<LogicalType, TypeError> {
    if member_count > 0 && (member_types.is_null() || member_names.is_null()) {
        return Err(TypeError::InvalidArgument(format!(
            "member arrays are NULL but member_count is {}",
            member_count
        )));
    }
    let (types, names) = if member_count == 0 {
        (&[][..], &[][..])
    } else {
        (
            slice::from_raw_parts(member_types, member_count),
            slice::from_raw_parts(member_names, member_count),
        )
    };

    let mut name_strs = Vec::with_capacity(member_count);
    for (index, &name) in names.iter().enumerate() {
        let name = c_str(name)
            .map_err(|problem| invalid_argument(format_args!("member name {}", index), problem))?;
        name_strs.push(name);
    }

    let duplicates = RuntimeConfig::global().load().duplicate_policy;
    handles::with_types(types, |refs| {
        create_struct_type(refs, &name_strs, member_count, duplicates)
    })
    .map_err(|index| {
        TypeError::InvalidArgument(format!(
            "member type {} is not a live logical type handle",
            index
        ))
    })?
}

unsafe fn write_handle(
    out_type: *mut *mut AthenaLogicalType,
    result: Result<LogicalType, TypeError>,
) -> AthenaError {
    match result {
        Ok(ty) => {
            *out_type = handles::into_handle(ty);
            AthenaError::AthenaOk
        }
        Err(e) => {
            log::debug!("{}", e);
            *out_type = ptr::null_mut();
            AthenaError::from(&e)
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Create a logical type that takes no parameters.
///
/// Returns NULL for unknown ids and for DECIMAL, LIST, MAP and STRUCT, which
/// have their own constructors.
///
/// # Safety
/// The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_create_logical_type(type_id: u32) -> *mut AthenaLogicalType {
    let result = LogicalTypeId::from_code(type_id)
        .ok_or_else(|| TypeError::InvalidArgument(format!("unknown type id {}", type_id)))
        .and_then(LogicalType::from_id);
    handle_or_null("athena_create_logical_type", result)
}

/// Create a DECIMAL(width, scale) type. Returns NULL if out of range.
///
/// # Safety
/// The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_create_decimal_type(
    width: u8,
    scale: u8,
) -> *mut AthenaLogicalType {
    handle_or_null("athena_create_decimal_type", LogicalType::decimal(width, scale))
}

/// Create a LIST type holding a copy of `child`. Returns NULL if the result
/// would nest deeper than `ATHENA_MAX_NESTING_DEPTH`.
///
/// # Safety
/// - `child` must be a handle from this library; it is only read.
/// - The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_create_list_type(
    child: *const AthenaLogicalType,
) -> *mut AthenaLogicalType {
    let result = live_copy(child, "child").and_then(LogicalType::list);
    handle_or_null("athena_create_list_type", result)
}

/// Create a MAP type holding copies of `key` and `value`, with the same depth
/// limit as `athena_create_list_type`.
///
/// # Safety
/// - `key` and `value` must be handles from this library; they are only read.
/// - The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_create_map_type(
    key: *const AthenaLogicalType,
    value: *const AthenaLogicalType,
) -> *mut AthenaLogicalType {
    let result = live_copy(key, "key")
        .and_then(|key| LogicalType::map(key, live_copy(value, "value")?));
    handle_or_null("athena_create_map_type", result)
}

/// Create a STRUCT type from parallel member arrays.
///
/// Member `i` is named `member_names[i]` and holds a copy of the type behind
/// `member_types[i]`. Member order is preserved. With `member_count == 0`
/// the arrays may be NULL and the result is the empty struct.
///
/// Returns NULL if any name is NULL, empty or not UTF-8, any type handle is
/// not live, the struct would nest deeper than `ATHENA_MAX_NESTING_DEPTH`,
/// or a duplicate name is found while duplicates are rejected.
/// Use `athena_create_struct_type_checked` to get the reason.
///
/// # Safety
/// - `member_types` and `member_names` must each point to `member_count`
///   readable elements (or be NULL when `member_count` is 0).
/// - Each name must be a null-terminated C string.
/// - The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_create_struct_type(
    member_types: *const *const AthenaLogicalType,
    member_names: *const *const c_char,
    member_count: usize,
) -> *mut AthenaLogicalType {
    handle_or_null(
        "athena_create_struct_type",
        build_struct(member_types, member_names, member_count),
    )
}

/// Create a STRUCT type, reporting failures as an error code.
///
/// On success `*out_type` receives the new handle; on failure it is set to
/// NULL.
///
/// # Safety
/// - Same requirements as `athena_create_struct_type`.
/// - `out_type` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn athena_create_struct_type_checked(
    member_types: *const *const AthenaLogicalType,
    member_names: *const *const c_char,
    member_count: usize,
    out_type: *mut *mut AthenaLogicalType,
) -> AthenaError {
    if out_type.is_null() {
        return AthenaError::AthenaInvalidArgument;
    }
    write_handle(out_type, build_struct(member_types, member_names, member_count))
}

/// Map an Athena/Glue catalog type name (e.g. `struct<id:int,tags:array<string>>`)
/// to a logical type. Returns NULL if the name is unknown or malformed.
///
/// # Safety
/// - `type_name` must be a null-terminated C string.
/// - The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_logical_type_from_name(
    type_name: *const c_char,
) -> *mut AthenaLogicalType {
    let config = RuntimeConfig::global().load();
    let result = c_str(type_name)
        .map_err(|problem| invalid_argument("type_name", problem))
        .and_then(|name| parse_type_name(name, &config));
    handle_or_null("athena_logical_type_from_name", result)
}

/// Map a catalog type name, reporting failures as an error code.
///
/// # Safety
/// - `type_name` must be a null-terminated C string.
/// - `out_type` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn athena_logical_type_from_name_checked(
    type_name: *const c_char,
    out_type: *mut *mut AthenaLogicalType,
) -> AthenaError {
    if out_type.is_null() {
        return AthenaError::AthenaInvalidArgument;
    }
    let config = RuntimeConfig::global().load();
    let result = c_str(type_name)
        .map_err(|problem| invalid_argument("type_name", problem))
        .and_then(|name| parse_type_name(name, &config));
    write_handle(out_type, result)
}

// =============================================================================
// Introspection
// =============================================================================

/// Get the type id. Returns `ATHENA_TYPE_INVALID` (0) for a dead handle.
///
/// # Safety
/// `logical_type` must be a handle from this library or NULL.
#[no_mangle]
pub unsafe extern "C" fn athena_logical_type_get_id(logical_type: *const AthenaLogicalType) -> u32 {
    handles::with_type(logical_type, |ty| ty.id().code()).unwrap_or(0)
}

/// Get the number of members. Returns 0 for non-struct types.
///
/// # Safety
/// `logical_type` must be a handle from this library or NULL.
#[no_mangle]
pub unsafe extern "C" fn athena_struct_type_member_count(
    logical_type: *const AthenaLogicalType,
) -> usize {
    handles::with_type(logical_type, |ty| ty.struct_member_count().unwrap_or(0)).unwrap_or(0)
}

/// Get a member name. Returns the number of bytes needed (excluding null),
/// or 0 if the handle is not a struct or `index` is out of range.
///
/// # Safety
/// - `logical_type` must be a handle from this library or NULL.
/// - `out_buf` may be NULL to query the size; otherwise it must point to
///   `capacity` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn athena_struct_type_member_name(
    logical_type: *const AthenaLogicalType,
    index: usize,
    out_buf: *mut c_char,
    capacity: usize,
) -> usize {
    handles::with_type(logical_type, |ty| match ty.struct_member_name(index) {
        Ok(name) => copy_to_buffer(name, out_buf, capacity),
        Err(_) => 0,
    })
    .unwrap_or(0)
}

/// Get a copy of a member's type as a new handle. Returns NULL if the handle
/// is not a struct or `index` is out of range.
///
/// # Safety
/// - `logical_type` must be a handle from this library or NULL.
/// - The returned handle must be released with `athena_destroy_logical_type`.
#[no_mangle]
pub unsafe extern "C" fn athena_struct_type_member_type(
    logical_type: *const AthenaLogicalType,
    index: usize,
) -> *mut AthenaLogicalType {
    let result = handles::with_type(logical_type, |ty| ty.struct_member_type(index).cloned())
        .unwrap_or_else(|| {
            Err(TypeError::InvalidArgument(
                "logical_type is not a live logical type handle".to_string(),
            ))
        });
    handle_or_null("athena_struct_type_member_type", result)
}

/// Find the index of the first member called `name`.
///
/// # Safety
/// - `logical_type` must be a handle from this library or NULL.
/// - `name` must be a null-terminated C string.
/// - `out_index` must be a valid pointer.
///
/// # Returns
/// `ATHENA_OK`, `ATHENA_NOT_FOUND` if no member has that name,
/// `ATHENA_TYPE_MISMATCH` if the type is not a struct.
#[no_mangle]
pub unsafe extern "C" fn athena_struct_type_member_index(
    logical_type: *const AthenaLogicalType,
    name: *const c_char,
    out_index: *mut usize,
) -> AthenaError {
    if out_index.is_null() {
        return AthenaError::AthenaInvalidArgument;
    }
    let Ok(name) = c_str(name) else {
        return AthenaError::AthenaInvalidArgument;
    };
    let lookup = handles::with_type(logical_type, |ty| {
        if ty.is_struct() {
            ty.struct_member_index(name).ok_or(AthenaError::AthenaNotFound)
        } else {
            Err(AthenaError::AthenaTypeMismatch)
        }
    });
    match lookup {
        Some(Ok(index)) => {
            *out_index = index;
            AthenaError::AthenaOk
        }
        Some(Err(e)) => e,
        None => AthenaError::AthenaInvalidArgument,
    }
}

/// Render the type in SQL form, e.g. `STRUCT(id INTEGER, label VARCHAR)`.
/// Returns the number of bytes needed (excluding null), 0 for a dead handle.
///
/// # Safety
/// - `logical_type` must be a handle from this library or NULL.
/// - `out_buf` may be NULL to query the size; otherwise it must point to
///   `capacity` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn athena_logical_type_to_string(
    logical_type: *const AthenaLogicalType,
    out_buf: *mut c_char,
    capacity: usize,
) -> usize {
    let Some(text) = handles::with_type(logical_type, |ty| ty.to_string()) else {
        return 0;
    };
    copy_to_buffer(&text, out_buf, capacity)
}

// =============================================================================
// Destruction
// =============================================================================

/// Destroy a logical type and set `*logical_type` to NULL.
///
/// Types built from this one keep their own copies and stay valid.
///
/// # Safety
/// `logical_type` must be a valid pointer to a handle, or NULL.
#[no_mangle]
pub unsafe extern "C" fn athena_destroy_logical_type(logical_type: *mut *mut AthenaLogicalType) {
    if logical_type.is_null() || (*logical_type).is_null() {
        return;
    }
    if !handles::release(*logical_type) {
        log::warn!("athena_destroy_logical_type: handle {:p} is not live", *logical_type);
    }
    *logical_type = ptr::null_mut();
}
