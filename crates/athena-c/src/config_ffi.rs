// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Runtime configuration C FFI bindings.
//!
//! Settings apply process-wide and take effect for the next type
//! construction; types already built are not affected.

use athena::{DuplicatePolicy, RuntimeConfig, UnknownTypePolicy};

use crate::AthenaError;

/// Duplicate struct member name policy
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AthenaDuplicatePolicy {
    /// Keep every member; lookups by name find the first (default)
    AthenaDuplicatesAllow = 0,
    /// Fail struct creation with `ATHENA_DUPLICATE_FIELD_NAME`
    AthenaDuplicatesReject = 1,
}

impl From<AthenaDuplicatePolicy> for DuplicatePolicy {
    fn from(policy: AthenaDuplicatePolicy) -> Self {
        match policy {
            AthenaDuplicatePolicy::AthenaDuplicatesAllow => DuplicatePolicy::Allow,
            AthenaDuplicatePolicy::AthenaDuplicatesReject => DuplicatePolicy::Reject,
        }
    }
}

impl From<DuplicatePolicy> for AthenaDuplicatePolicy {
    fn from(policy: DuplicatePolicy) -> Self {
        match policy {
            DuplicatePolicy::Allow => AthenaDuplicatePolicy::AthenaDuplicatesAllow,
            DuplicatePolicy::Reject => AthenaDuplicatePolicy::AthenaDuplicatesReject,
        }
    }
}

/// Unknown catalog type name policy
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AthenaUnknownTypePolicy {
    /// Fail with `ATHENA_UNKNOWN_TYPE_NAME` (default)
    AthenaUnknownTypesError = 0,
    /// Map the column to VARCHAR
    AthenaUnknownTypesVarchar = 1,
}

impl From<AthenaUnknownTypePolicy> for UnknownTypePolicy {
    fn from(policy: AthenaUnknownTypePolicy) -> Self {
        match policy {
            AthenaUnknownTypePolicy::AthenaUnknownTypesError => UnknownTypePolicy::Error,
            AthenaUnknownTypePolicy::AthenaUnknownTypesVarchar => UnknownTypePolicy::Varchar,
        }
    }
}

impl From<UnknownTypePolicy> for AthenaUnknownTypePolicy {
    fn from(policy: UnknownTypePolicy) -> Self {
        match policy {
            UnknownTypePolicy::Error => AthenaUnknownTypePolicy::AthenaUnknownTypesError,
            UnknownTypePolicy::Varchar => AthenaUnknownTypePolicy::AthenaUnknownTypesVarchar,
        }
    }
}

/// Set the duplicate member name policy
///
/// # Safety
/// `policy` must be a valid `AthenaDuplicatePolicy` value.
#[no_mangle]
pub unsafe extern "C" fn athena_config_set_duplicate_policy(policy: AthenaDuplicatePolicy) {
    RuntimeConfig::global().set_duplicate_policy(policy.into());
}

/// Get the duplicate member name policy
///
/// # Safety
/// Always safe to call.
#[no_mangle]
pub unsafe extern "C" fn athena_config_get_duplicate_policy() -> AthenaDuplicatePolicy {
    RuntimeConfig::global().load().duplicate_policy.into()
}

/// Set the unknown catalog type name policy
///
/// # Safety
/// `policy` must be a valid `AthenaUnknownTypePolicy` value.
#[no_mangle]
pub unsafe extern "C" fn athena_config_set_unknown_type_policy(policy: AthenaUnknownTypePolicy) {
    RuntimeConfig::global().set_unknown_type_policy(policy.into());
}

/// Get the unknown catalog type name policy
///
/// # Safety
/// Always safe to call.
#[no_mangle]
pub unsafe extern "C" fn athena_config_get_unknown_type_policy() -> AthenaUnknownTypePolicy {
    RuntimeConfig::global().load().unknown_type_policy.into()
}

/// Re-read `ATHENA_DUPLICATE_FIELDS` and `ATHENA_UNKNOWN_TYPES`
///
/// # Safety
/// Always safe to call.
///
/// # Returns
/// `ATHENA_OK`, or `ATHENA_CONFIG_ERROR` if a variable holds an invalid
/// value (the current settings are kept)
#[no_mangle]
pub unsafe extern "C" fn athena_config_load_env() -> AthenaError {
    match RuntimeConfig::global().reload_env() {
        Ok(()) => AthenaError::AthenaOk,
        Err(e) => {
            log::error!("athena_config_load_env: {}", e);
            AthenaError::from(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_conversions() {
        for policy in [DuplicatePolicy::Allow, DuplicatePolicy::Reject] {
            assert_eq!(DuplicatePolicy::from(AthenaDuplicatePolicy::from(policy)), policy);
        }
        for policy in [UnknownTypePolicy::Error, UnknownTypePolicy::Varchar] {
            assert_eq!(
                UnknownTypePolicy::from(AthenaUnknownTypePolicy::from(policy)),
                policy
            );
        }
    }
}
