// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! STRUCT type construction.

use std::collections::HashSet;

use super::error::{Result, TypeError};
use super::logical_type::{check_nesting, LogicalType, StructMember};
use crate::config::DuplicatePolicy;

/// Build a STRUCT type from parallel member arrays.
///
/// Member `i` is named `member_names[i]` and holds a copy of
/// `member_types[i]`; the inputs are only read. Every argument is checked
/// before the member list is allocated, so a failed call leaves nothing
/// behind. A struct nesting deeper than
/// [`MAX_NESTING_DEPTH`](super::MAX_NESTING_DEPTH) is an `InvalidArgument`.
///
/// `member_count == 0` yields the empty struct.
///
/// Only the member list itself is reserved fallibly and reported as
/// `AllocationFailure`. Copying member types and names allocates through
/// the global allocator, which aborts on exhaustion.
pub fn create_struct_type(
    member_types: &[&LogicalType],
    member_names: &[&str],
    member_count: usize,
    duplicates: DuplicatePolicy,
) -> Result<LogicalType> {
    if member_types.len() != member_count || member_names.len() != member_count {
        return Err(TypeError::InvalidArgument(format!(
            "member_count {} does not match {} member types and {} member names",
            member_count,
            member_types.len(),
            member_names.len()
        )));
    }
    validate_names(member_names.iter().copied(), duplicates)?;
    check_nesting(member_types.iter().copied())?;

    let mut members = Vec::new();
    members
        .try_reserve_exact(member_count)
        .map_err(|_| TypeError::AllocationFailure {
            requested: member_count,
        })?;
    for (name, ty) in member_names.iter().zip(member_types) {
        members.push(StructMember::new(*name, (*ty).clone()));
    }

    log::trace!("built STRUCT with {} members", member_count);
    Ok(LogicalType::Struct(members))
}

fn validate_names<'a>(
    names: impl Iterator<Item = &'a str>,
    duplicates: DuplicatePolicy,
) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, name) in names.enumerate() {
        if name.is_empty() {
            return Err(TypeError::InvalidArgument(format!(
                "struct member {} has an empty name",
                index
            )));
        }
        if duplicates == DuplicatePolicy::Reject && !seen.insert(name) {
            return Err(TypeError::DuplicateFieldName {
                name: name.to_string(),
                index,
            });
        }
    }
    Ok(())
}

/// Fluent builder for STRUCT types.
///
/// Validation is deferred to [`build`](Self::build), which applies the same
/// rules as [`create_struct_type`].
#[derive(Debug, Clone, Default)]
pub struct StructTypeBuilder {
    members: Vec<StructMember>,
    duplicates: DuplicatePolicy,
}

impl StructTypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Set how repeated member names are treated.
    pub fn duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Append a member.
    pub fn member(mut self, name: impl Into<String>, ty: LogicalType) -> Self {
        self.members.push(StructMember::new(name, ty));
        self
    }

    /// Append a member holding a copy of `ty`.
    pub fn member_ref(self, name: impl Into<String>, ty: &LogicalType) -> Self {
        self.member(name, ty.clone())
    }

    /// Append members in iteration order.
    pub fn members<N: Into<String>>(
        mut self,
        members: impl IntoIterator<Item = (N, LogicalType)>,
    ) -> Self {
        self.members
            .extend(members.into_iter().map(|(name, ty)| StructMember::new(name, ty)));
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Build the STRUCT type.
    pub fn build(self) -> Result<LogicalType> {
        validate_names(self.members.iter().map(|m| m.name.as_str()), self.duplicates)?;
        check_nesting(self.members.iter().map(|m| &m.ty))?;
        Ok(LogicalType::Struct(self.members))
    }
}
