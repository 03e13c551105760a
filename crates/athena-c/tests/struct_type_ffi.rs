// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

// Struct-type construction through the C ABI, with the default
// (allow duplicates) configuration.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use athena_c::*;

fn primitive(id: AthenaTypeId) -> *mut AthenaLogicalType {
    let ty = unsafe { athena_create_logical_type(id as u32) };
    assert!(!ty.is_null(), "create {:?}", id);
    ty
}

fn destroy(mut ty: *mut AthenaLogicalType) {
    unsafe { athena_destroy_logical_type(&mut ty) };
    assert!(ty.is_null());
}

fn member_name(ty: *const AthenaLogicalType, index: usize) -> String {
    let needed = unsafe { athena_struct_type_member_name(ty, index, ptr::null_mut(), 0) };
    let mut buf = vec![0 as c_char; needed + 1];
    let written = unsafe { athena_struct_type_member_name(ty, index, buf.as_mut_ptr(), buf.len()) };
    assert_eq!(written, needed);
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_str()
        .unwrap()
        .to_string()
}

fn type_string(ty: *const AthenaLogicalType) -> String {
    let needed = unsafe { athena_logical_type_to_string(ty, ptr::null_mut(), 0) };
    let mut buf = vec![0 as c_char; needed + 1];
    unsafe { athena_logical_type_to_string(ty, buf.as_mut_ptr(), buf.len()) };
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_str()
        .unwrap()
        .to_string()
}

/// Build a struct from owned handles and names.
fn build(types: &[*mut AthenaLogicalType], names: &[&str]) -> *mut AthenaLogicalType {
    let names: Vec<CString> = names.iter().map(|n| CString::new(*n).unwrap()).collect();
    let name_ptrs: Vec<*const c_char> = names.iter().map(|n| n.as_ptr()).collect();
    let type_ptrs: Vec<*const AthenaLogicalType> = types.iter().map(|t| t.cast_const()).collect();
    unsafe { athena_create_struct_type(type_ptrs.as_ptr(), name_ptrs.as_ptr(), types.len()) }
}

#[test]
fn test_id_label_struct() {
    let id = primitive(AthenaTypeId::AthenaTypeInteger);
    let label = primitive(AthenaTypeId::AthenaTypeVarchar);

    let row = build(&[id, label], &["id", "label"]);
    assert!(!row.is_null());

    unsafe {
        assert_eq!(
            athena_logical_type_get_id(row),
            AthenaTypeId::AthenaTypeStruct as u32
        );
        assert_eq!(athena_struct_type_member_count(row), 2);
    }
    assert_eq!(member_name(row, 0), "id");
    assert_eq!(member_name(row, 1), "label");

    let first = unsafe { athena_struct_type_member_type(row, 0) };
    let second = unsafe { athena_struct_type_member_type(row, 1) };
    unsafe {
        assert_eq!(
            athena_logical_type_get_id(first),
            AthenaTypeId::AthenaTypeInteger as u32
        );
        assert_eq!(
            athena_logical_type_get_id(second),
            AthenaTypeId::AthenaTypeVarchar as u32
        );
    }
    assert_eq!(type_string(row), "STRUCT(id INTEGER, label VARCHAR)");

    for ty in [first, second, row, id, label] {
        destroy(ty);
    }
}

#[test]
fn test_member_order_is_preserved() {
    let types = [
        primitive(AthenaTypeId::AthenaTypeBigint),
        primitive(AthenaTypeId::AthenaTypeBoolean),
        primitive(AthenaTypeId::AthenaTypeDouble),
    ];
    let row = build(&types, &["a", "b", "c"]);
    assert!(!row.is_null());

    let names: Vec<String> = (0..3).map(|i| member_name(row, i)).collect();
    assert_eq!(names, ["a", "b", "c"]);
    let ids: Vec<u32> = (0..3)
        .map(|i| unsafe {
            let member = athena_struct_type_member_type(row, i);
            let id = athena_logical_type_get_id(member);
            destroy(member);
            id
        })
        .collect();
    assert_eq!(
        ids,
        [
            AthenaTypeId::AthenaTypeBigint as u32,
            AthenaTypeId::AthenaTypeBoolean as u32,
            AthenaTypeId::AthenaTypeDouble as u32,
        ]
    );

    destroy(row);
    for ty in types {
        destroy(ty);
    }
}

#[test]
fn test_member_counts() {
    // Zero members: arrays may be NULL.
    let empty = unsafe { athena_create_struct_type(ptr::null(), ptr::null(), 0) };
    assert!(!empty.is_null());
    assert_eq!(unsafe { athena_struct_type_member_count(empty) }, 0);
    assert_eq!(type_string(empty), "STRUCT()");
    destroy(empty);

    let one = primitive(AthenaTypeId::AthenaTypeDate);
    let single = build(&[one], &["d"]);
    assert_eq!(unsafe { athena_struct_type_member_count(single) }, 1);
    destroy(single);
    destroy(one);

    let types: Vec<_> = (0..100)
        .map(|_| primitive(AthenaTypeId::AthenaTypeSmallint))
        .collect();
    let names: Vec<String> = (0..100).map(|i| format!("m{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let wide = build(&types, &name_refs);
    assert_eq!(unsafe { athena_struct_type_member_count(wide) }, 100);
    assert_eq!(member_name(wide, 99), "m99");
    destroy(wide);
    for ty in types {
        destroy(ty);
    }
}

#[test]
fn test_members_are_copies() {
    let child = primitive(AthenaTypeId::AthenaTypeFloat);
    let row = build(&[child], &["x"]);
    destroy(child);

    // The struct still reports the member after its source is gone.
    let member = unsafe { athena_struct_type_member_type(row, 0) };
    assert_eq!(
        unsafe { athena_logical_type_get_id(member) },
        AthenaTypeId::AthenaTypeFloat as u32
    );
    destroy(member);
    destroy(row);
}

#[test]
fn test_nested_struct() {
    let int = primitive(AthenaTypeId::AthenaTypeInteger);
    let inner = build(&[int], &["value"]);
    let list = unsafe { athena_create_list_type(inner) };
    assert!(!list.is_null());
    let outer = build(&[inner, list], &["inner", "history"]);
    assert!(!outer.is_null());

    assert_eq!(
        type_string(outer),
        "STRUCT(inner STRUCT(value INTEGER), history STRUCT(value INTEGER)[])"
    );

    let member = unsafe { athena_struct_type_member_type(outer, 0) };
    assert_eq!(unsafe { athena_struct_type_member_count(member) }, 1);
    assert_eq!(member_name(member, 0), "value");

    for ty in [member, outer, list, inner, int] {
        destroy(ty);
    }
}

#[test]
fn test_duplicate_names_allowed_by_default() {
    let a = primitive(AthenaTypeId::AthenaTypeInteger);
    let b = primitive(AthenaTypeId::AthenaTypeVarchar);
    let row = build(&[a, b], &["x", "x"]);
    assert!(!row.is_null());
    assert_eq!(unsafe { athena_struct_type_member_count(row) }, 2);

    let name = CString::new("x").unwrap();
    let mut index = usize::MAX;
    let result = unsafe { athena_struct_type_member_index(row, name.as_ptr(), &mut index) };
    assert_eq!(result, AthenaError::AthenaOk);
    assert_eq!(index, 0);

    for ty in [row, a, b] {
        destroy(ty);
    }
}

#[test]
fn test_invalid_arguments() {
    let int = primitive(AthenaTypeId::AthenaTypeInteger);
    let types = [int.cast_const()];

    // NULL arrays with a non-zero count
    assert!(unsafe { athena_create_struct_type(ptr::null(), ptr::null(), 1) }.is_null());

    // NULL name
    let names = [ptr::null::<c_char>()];
    let mut out = ptr::null_mut();
    let result =
        unsafe { athena_create_struct_type_checked(types.as_ptr(), names.as_ptr(), 1, &mut out) };
    assert_eq!(result, AthenaError::AthenaInvalidArgument);
    assert!(out.is_null());

    // Empty name
    let empty = CString::new("").unwrap();
    let names = [empty.as_ptr()];
    let result =
        unsafe { athena_create_struct_type_checked(types.as_ptr(), names.as_ptr(), 1, &mut out) };
    assert_eq!(result, AthenaError::AthenaInvalidArgument);

    // NULL and destroyed type handles
    let name = CString::new("a").unwrap();
    let names = [name.as_ptr()];
    let null_types = [ptr::null::<AthenaLogicalType>()];
    assert!(unsafe { athena_create_struct_type(null_types.as_ptr(), names.as_ptr(), 1) }.is_null());

    let stale = primitive(AthenaTypeId::AthenaTypeBlob);
    let stale_types = [stale.cast_const()];
    destroy(stale);
    let result = unsafe {
        athena_create_struct_type_checked(stale_types.as_ptr(), names.as_ptr(), 1, &mut out)
    };
    assert_eq!(result, AthenaError::AthenaInvalidArgument);

    // Parameterized ids need their own constructors
    assert!(unsafe { athena_create_logical_type(AthenaTypeId::AthenaTypeStruct as u32) }.is_null());
    assert!(unsafe { athena_create_logical_type(9999) }.is_null());

    destroy(int);
}

#[test]
fn test_introspection_on_non_struct() {
    let int = primitive(AthenaTypeId::AthenaTypeInteger);
    assert_eq!(unsafe { athena_struct_type_member_count(int) }, 0);
    assert!(unsafe { athena_struct_type_member_type(int, 0) }.is_null());

    let name = CString::new("a").unwrap();
    let mut index = 0;
    assert_eq!(
        unsafe { athena_struct_type_member_index(int, name.as_ptr(), &mut index) },
        AthenaError::AthenaTypeMismatch
    );
    assert_eq!(unsafe { athena_logical_type_get_id(ptr::null()) }, 0);
    destroy(int);
}

#[test]
fn test_member_name_truncates() {
    let int = primitive(AthenaTypeId::AthenaTypeInteger);
    let row = build(&[int], &["longer_name"]);

    let mut buf = [0 as c_char; 5];
    let needed = unsafe { athena_struct_type_member_name(row, 0, buf.as_mut_ptr(), buf.len()) };
    assert_eq!(needed, "longer_name".len());
    let truncated = unsafe { CStr::from_ptr(buf.as_ptr()) };
    assert_eq!(truncated.to_str().unwrap(), "long");

    assert_eq!(
        unsafe { athena_struct_type_member_name(row, 1, buf.as_mut_ptr(), buf.len()) },
        0
    );

    destroy(row);
    destroy(int);
}

#[test]
fn test_decimal_and_map_types() {
    let decimal = unsafe { athena_create_decimal_type(18, 3) };
    assert_eq!(type_string(decimal), "DECIMAL(18,3)");
    assert!(unsafe { athena_create_decimal_type(39, 0) }.is_null());

    let key = primitive(AthenaTypeId::AthenaTypeVarchar);
    let map = unsafe { athena_create_map_type(key, decimal) };
    assert_eq!(type_string(map), "MAP(VARCHAR, DECIMAL(18,3))");

    for ty in [map, key, decimal] {
        destroy(ty);
    }
}

#[test]
fn test_type_from_catalog_name() {
    let name = CString::new("struct<id:int,tags:array<string>>").unwrap();
    let ty = unsafe { athena_logical_type_from_name(name.as_ptr()) };
    assert!(!ty.is_null());
    assert_eq!(type_string(ty), "STRUCT(id INTEGER, tags VARCHAR[])");
    destroy(ty);

    let bad = CString::new("struct<id int>").unwrap();
    let mut out = ptr::null_mut();
    assert_eq!(
        unsafe { athena_logical_type_from_name_checked(bad.as_ptr(), &mut out) },
        AthenaError::AthenaMalformedTypeName
    );
    assert!(out.is_null());
}

#[test]
fn test_destroy_null_is_noop() {
    unsafe {
        athena_destroy_logical_type(ptr::null_mut());
        let mut null: *mut AthenaLogicalType = ptr::null_mut();
        athena_destroy_logical_type(&mut null);
    }
}

#[test]
fn test_nesting_past_limit_is_rejected() {
    let mut ty = primitive(AthenaTypeId::AthenaTypeInteger);
    for _ in 0..ATHENA_MAX_NESTING_DEPTH {
        let outer = build(&[ty], &["c"]);
        assert!(!outer.is_null());
        destroy(ty);
        ty = outer;
    }

    let name = CString::new("c").unwrap();
    let names = [name.as_ptr()];
    let types = [ty.cast_const()];
    let mut out = ptr::null_mut();
    let result =
        unsafe { athena_create_struct_type_checked(types.as_ptr(), names.as_ptr(), 1, &mut out) };
    assert_eq!(result, AthenaError::AthenaInvalidArgument);
    assert!(out.is_null());

    assert!(unsafe { athena_create_list_type(ty) }.is_null());
    let key = primitive(AthenaTypeId::AthenaTypeVarchar);
    assert!(unsafe { athena_create_map_type(key, ty) }.is_null());

    // The deepest allowed type is still fully usable.
    assert_eq!(unsafe { athena_struct_type_member_count(ty) }, 1);

    destroy(key);
    destroy(ty);
}
