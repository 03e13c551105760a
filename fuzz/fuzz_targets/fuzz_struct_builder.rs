// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

#![no_main]

use athena::{create_struct_type, DuplicatePolicy, LogicalType, LogicalTypeId};
use libfuzzer_sys::fuzz_target;

// Input: a policy byte, then (type code, name length, name bytes) records.
fuzz_target!(|data: &[u8]| {
    let Some((&policy, mut rest)) = data.split_first() else {
        return;
    };
    let duplicates = if policy & 1 == 0 {
        DuplicatePolicy::Allow
    } else {
        DuplicatePolicy::Reject
    };

    let mut types = Vec::new();
    let mut names = Vec::new();
    while let [code, len, tail @ ..] = rest {
        let len = usize::from(*len).min(tail.len());
        let (name, tail) = tail.split_at(len);
        rest = tail;

        let ty = LogicalTypeId::from_code(u32::from(*code))
            .and_then(|id| LogicalType::from_id(id).ok())
            .unwrap_or(LogicalType::Varchar);
        types.push(ty);
        names.push(String::from_utf8_lossy(name).into_owned());
    }

    let type_refs: Vec<&LogicalType> = types.iter().collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    if let Ok(row) = create_struct_type(&type_refs, &name_refs, names.len(), duplicates) {
        assert_eq!(row.struct_member_count().ok(), Some(names.len()));
        for (i, name) in name_refs.iter().enumerate() {
            assert_eq!(row.struct_member_name(i).ok(), Some(*name));
        }
    }
});
