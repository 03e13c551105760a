// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

// Runtime configuration through the C ABI. The settings are process-wide,
// so this file runs as its own test binary with a single test.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use athena_c::*;

unsafe fn destroy(mut ty: *mut AthenaLogicalType) {
    athena_destroy_logical_type(&mut ty);
}

#[test]
fn test_policies_apply_to_next_construction() {
    unsafe {
        let int = athena_create_logical_type(AthenaTypeId::AthenaTypeInteger as u32);
        let types = [int.cast_const(), int.cast_const()];
        let x = CString::new("x").unwrap();
        let names: [*const c_char; 2] = [x.as_ptr(), x.as_ptr()];

        athena_config_set_duplicate_policy(AthenaDuplicatePolicy::AthenaDuplicatesAllow);
        let allowed = athena_create_struct_type(types.as_ptr(), names.as_ptr(), 2);
        assert!(!allowed.is_null());

        athena_config_set_duplicate_policy(AthenaDuplicatePolicy::AthenaDuplicatesReject);
        assert_eq!(
            athena_config_get_duplicate_policy(),
            AthenaDuplicatePolicy::AthenaDuplicatesReject
        );
        let mut out = ptr::null_mut();
        assert_eq!(
            athena_create_struct_type_checked(types.as_ptr(), names.as_ptr(), 2, &mut out),
            AthenaError::AthenaDuplicateFieldName
        );
        assert!(out.is_null());
        assert!(athena_create_struct_type(types.as_ptr(), names.as_ptr(), 2).is_null());

        // Types built earlier are unaffected.
        assert_eq!(athena_struct_type_member_count(allowed), 2);

        // Catalog structs follow the same policy.
        let dup = CString::new("struct<a:int,a:string>").unwrap();
        assert_eq!(
            athena_logical_type_from_name_checked(dup.as_ptr(), &mut out),
            AthenaError::AthenaDuplicateFieldName
        );

        let unknown = CString::new("geometry").unwrap();
        athena_config_set_unknown_type_policy(AthenaUnknownTypePolicy::AthenaUnknownTypesError);
        assert_eq!(
            athena_logical_type_from_name_checked(unknown.as_ptr(), &mut out),
            AthenaError::AthenaUnknownTypeName
        );
        athena_config_set_unknown_type_policy(AthenaUnknownTypePolicy::AthenaUnknownTypesVarchar);
        assert_eq!(
            athena_logical_type_from_name_checked(unknown.as_ptr(), &mut out),
            AthenaError::AthenaOk
        );
        assert_eq!(
            athena_logical_type_get_id(out),
            AthenaTypeId::AthenaTypeVarchar as u32
        );
        destroy(out);

        athena_config_set_duplicate_policy(AthenaDuplicatePolicy::AthenaDuplicatesAllow);
        destroy(allowed);
        destroy(int);
    }
}
