// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Logical type handle table.
//!
//! A handle given to C is a token, not an address: the types live in this
//! table keyed by a counter that never repeats. Destroyed or foreign handles
//! simply miss the table, and a handle value is never reissued, so a stale
//! handle cannot alias a newer type.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

use athena::LogicalType;

use crate::AthenaLogicalType;

struct HandleTable {
    next: usize,
    types: HashMap<usize, LogicalType>,
}

fn table() -> MutexGuard<'static, HandleTable> {
    static TABLE: OnceLock<Mutex<HandleTable>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            Mutex::new(HandleTable {
                next: 1,
                types: HashMap::new(),
            })
        })
        .lock()
        .unwrap_or_else(|err| err.into_inner())
}

fn key(handle: *const AthenaLogicalType) -> usize {
    handle as usize
}

/// Store `ty` and hand out an owned handle.
pub(crate) fn into_handle(ty: LogicalType) -> *mut AthenaLogicalType {
    let mut table = table();
    let id = table.next;
    table.next += 1;
    table.types.insert(id, ty);
    id as *mut AthenaLogicalType
}

/// Run `f` on the type behind `handle`; `None` if the handle is not live.
///
/// `f` runs under the table lock and must not create or destroy handles.
pub(crate) fn with_type<R>(
    handle: *const AthenaLogicalType,
    f: impl FnOnce(&LogicalType) -> R,
) -> Option<R> {
    if handle.is_null() {
        return None;
    }
    table().types.get(&key(handle)).map(f)
}

/// Run `f` on the types behind `handles`, in order.
///
/// Fails with the index of the first handle that is NULL or not live.
/// `f` runs under the table lock and must not create or destroy handles.
pub(crate) fn with_types<R>(
    handles: &[*const AthenaLogicalType],
    f: impl FnOnce(&[&LogicalType]) -> R,
) -> Result<R, usize> {
    let table = table();
    let mut types = Vec::with_capacity(handles.len());
    for (index, &handle) in handles.iter().enumerate() {
        let ty = table.types.get(&key(handle)).ok_or(index)?;
        types.push(ty);
    }
    Ok(f(&types))
}

/// Drop the type behind `handle`. Returns false if it was not live.
pub(crate) fn release(handle: *mut AthenaLogicalType) -> bool {
    if handle.is_null() {
        return false;
    }
    let removed = table().types.remove(&key(handle));
    removed.is_some()
}
