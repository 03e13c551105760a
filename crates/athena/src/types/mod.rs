// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Logical types for the host's columnar type system.
//!
//! # Features
//!
//! - **LogicalType**: primitive and composite (DECIMAL, LIST, MAP, STRUCT) types
//! - **Struct builder**: parallel-array and fluent construction of STRUCT types
//! - **Type names**: Athena/Glue catalog type strings mapped to logical types
//!
//! A struct type owns copies of its member types. Building a struct never
//! retains a reference to the inputs, so the caller may drop or reuse them
//! as soon as construction returns.
//!
//! # Example
//!
//! ```rust
//! use athena::types::{LogicalType, StructTypeBuilder};
//!
//! let point = StructTypeBuilder::new()
//!     .member("x", LogicalType::Double)
//!     .member("y", LogicalType::Double)
//!     .build()
//!     .unwrap();
//!
//! let segment = StructTypeBuilder::new()
//!     .member_ref("start", &point)
//!     .member_ref("end", &point)
//!     .build()
//!     .unwrap();
//!
//! let end = segment.struct_member_type(1).unwrap();
//! assert_eq!(end.struct_member_name(0).unwrap(), "x");
//! ```

mod builder;
mod error;
mod logical_type;
mod type_name;

pub use builder::{create_struct_type, StructTypeBuilder};
pub use error::{Result, TypeError};
pub use logical_type::{
    LogicalType, LogicalTypeId, StructMember, DECIMAL_MAX_WIDTH, MAX_NESTING_DEPTH,
};
pub use type_name::parse_type_name;
