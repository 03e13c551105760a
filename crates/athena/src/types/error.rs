// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

use thiserror::Error;

/// Errors raised while constructing or inspecting logical types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Duplicate struct member name '{name}' at index {index}")]
    DuplicateFieldName { name: String, index: usize },

    #[error("Allocation of {requested} struct members failed")]
    AllocationFailure { requested: usize },

    #[error("Unknown type name: {0}")]
    UnknownTypeName(String),

    #[error("Malformed type name '{input}' at byte {position}: {reason}")]
    MalformedTypeName {
        input: String,
        position: usize,
        reason: &'static str,
    },

    #[error("{0} is not a STRUCT type")]
    NotAStruct(String),

    #[error("Struct member index out of bounds: {index} >= {count}")]
    MemberIndexOutOfBounds { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, TypeError>;
