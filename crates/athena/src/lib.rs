// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! # athena
//!
//! Core of the athena database extension: a columnar logical type model,
//! the struct-type builder used by the host's extension loader, catalog
//! type-name mapping, and the extension registration object that forwards
//! the host's load call to an external initialization routine.
//!
//! The C ABI lives in the `athena-c` crate; everything here is safe Rust.
//!
//! # Example
//!
//! ```rust
//! use athena::types::{create_struct_type, LogicalType};
//! use athena::DuplicatePolicy;
//!
//! let id = LogicalType::Integer;
//! let label = LogicalType::Varchar;
//! let row = create_struct_type(&[&id, &label], &["id", "label"], 2, DuplicatePolicy::Allow)
//!     .unwrap();
//!
//! assert_eq!(row.to_string(), "STRUCT(id INTEGER, label VARCHAR)");
//! assert_eq!(row.struct_member_index("label"), Some(1));
//! ```

pub mod config;
pub mod extension;
pub mod types;

pub use config::{ConfigError, DuplicatePolicy, ExtensionConfig, RuntimeConfig, UnknownTypePolicy};
pub use extension::{AthenaExtension, DatabaseHandle, ExtensionEntryPoints, ExtensionError};
pub use types::{
    create_struct_type, parse_type_name, LogicalType, LogicalTypeId, StructMember,
    StructTypeBuilder, TypeError, MAX_NESTING_DEPTH,
};

/// Name the extension registers under in the host.
pub const EXTENSION_NAME: &str = "athena";
