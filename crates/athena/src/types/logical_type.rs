// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Logical type values.

use std::fmt;

use super::error::{Result, TypeError};

/// Widest DECIMAL the host supports.
pub const DECIMAL_MAX_WIDTH: u8 = 38;

/// Deepest [`LogicalType::depth`] a constructed type may have.
///
/// Cloning, dropping and rendering a type recurse once per level, so the
/// constructors refuse anything deeper.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Type identifiers, numbered as in the host's C API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalTypeId {
    Boolean = 1,
    TinyInt = 2,
    SmallInt = 3,
    Integer = 4,
    BigInt = 5,
    UTinyInt = 6,
    USmallInt = 7,
    UInteger = 8,
    UBigInt = 9,
    Float = 10,
    Double = 11,
    Timestamp = 12,
    Date = 13,
    Varchar = 17,
    Blob = 18,
    Decimal = 19,
    List = 24,
    Struct = 25,
    Map = 26,
}

impl LogicalTypeId {
    /// Look up an id by its host code.
    pub fn from_code(code: u32) -> Option<Self> {
        let id = match code {
            1 => Self::Boolean,
            2 => Self::TinyInt,
            3 => Self::SmallInt,
            4 => Self::Integer,
            5 => Self::BigInt,
            6 => Self::UTinyInt,
            7 => Self::USmallInt,
            8 => Self::UInteger,
            9 => Self::UBigInt,
            10 => Self::Float,
            11 => Self::Double,
            12 => Self::Timestamp,
            13 => Self::Date,
            17 => Self::Varchar,
            18 => Self::Blob,
            19 => Self::Decimal,
            24 => Self::List,
            25 => Self::Struct,
            26 => Self::Map,
            _ => return None,
        };
        Some(id)
    }

    /// Host code of this id.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// True for LIST, STRUCT and MAP.
    pub fn is_nested(self) -> bool {
        matches!(self, Self::List | Self::Struct | Self::Map)
    }

    /// SQL spelling of the id.
    pub fn sql_name(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::UTinyInt => "UTINYINT",
            Self::USmallInt => "USMALLINT",
            Self::UInteger => "UINTEGER",
            Self::UBigInt => "UBIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Varchar => "VARCHAR",
            Self::Blob => "BLOB",
            Self::Decimal => "DECIMAL",
            Self::List => "LIST",
            Self::Struct => "STRUCT",
            Self::Map => "MAP",
        }
    }
}

impl fmt::Display for LogicalTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// A logical type. Composite types own their children by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    Float,
    Double,
    Timestamp,
    Date,
    Varchar,
    Blob,
    /// Fixed-point number with `width` total digits, `scale` after the point.
    Decimal { width: u8, scale: u8 },
    /// Variable-length list of `child`.
    List(Box<LogicalType>),
    Map {
        key: Box<LogicalType>,
        value: Box<LogicalType>,
    },
    /// Ordered, named members. Order is column position.
    Struct(Vec<StructMember>),
}

/// A named member of a STRUCT type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructMember {
    pub name: String,
    pub ty: LogicalType,
}

impl StructMember {
    pub fn new(name: impl Into<String>, ty: LogicalType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl LogicalType {
    /// Create a type that needs no parameters.
    ///
    /// DECIMAL, LIST, MAP and STRUCT carry parameters and have their own
    /// constructors; asking for them here is an `InvalidArgument`.
    pub fn from_id(id: LogicalTypeId) -> Result<Self> {
        let ty = match id {
            LogicalTypeId::Boolean => Self::Boolean,
            LogicalTypeId::TinyInt => Self::TinyInt,
            LogicalTypeId::SmallInt => Self::SmallInt,
            LogicalTypeId::Integer => Self::Integer,
            LogicalTypeId::BigInt => Self::BigInt,
            LogicalTypeId::UTinyInt => Self::UTinyInt,
            LogicalTypeId::USmallInt => Self::USmallInt,
            LogicalTypeId::UInteger => Self::UInteger,
            LogicalTypeId::UBigInt => Self::UBigInt,
            LogicalTypeId::Float => Self::Float,
            LogicalTypeId::Double => Self::Double,
            LogicalTypeId::Timestamp => Self::Timestamp,
            LogicalTypeId::Date => Self::Date,
            LogicalTypeId::Varchar => Self::Varchar,
            LogicalTypeId::Blob => Self::Blob,
            LogicalTypeId::Decimal
            | LogicalTypeId::List
            | LogicalTypeId::Struct
            | LogicalTypeId::Map => {
                return Err(TypeError::InvalidArgument(format!(
                    "{} requires type parameters",
                    id
                )))
            }
        };
        Ok(ty)
    }

    /// Create a DECIMAL type. `width` must be 1..=38 and `scale <= width`.
    pub fn decimal(width: u8, scale: u8) -> Result<Self> {
        if width == 0 || width > DECIMAL_MAX_WIDTH {
            return Err(TypeError::InvalidArgument(format!(
                "decimal width {} outside 1..={}",
                width, DECIMAL_MAX_WIDTH
            )));
        }
        if scale > width {
            return Err(TypeError::InvalidArgument(format!(
                "decimal scale {} exceeds width {}",
                scale, width
            )));
        }
        Ok(Self::Decimal { width, scale })
    }

    /// Create a LIST of `child`. Fails if the result would nest deeper than
    /// [`MAX_NESTING_DEPTH`].
    pub fn list(child: LogicalType) -> Result<Self> {
        check_nesting([&child])?;
        Ok(Self::List(Box::new(child)))
    }

    /// Create a MAP from `key` to `value`, with the same depth limit as
    /// [`list`](Self::list).
    pub fn map(key: LogicalType, value: LogicalType) -> Result<Self> {
        check_nesting([&key, &value])?;
        Ok(Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn id(&self) -> LogicalTypeId {
        match self {
            Self::Boolean => LogicalTypeId::Boolean,
            Self::TinyInt => LogicalTypeId::TinyInt,
            Self::SmallInt => LogicalTypeId::SmallInt,
            Self::Integer => LogicalTypeId::Integer,
            Self::BigInt => LogicalTypeId::BigInt,
            Self::UTinyInt => LogicalTypeId::UTinyInt,
            Self::USmallInt => LogicalTypeId::USmallInt,
            Self::UInteger => LogicalTypeId::UInteger,
            Self::UBigInt => LogicalTypeId::UBigInt,
            Self::Float => LogicalTypeId::Float,
            Self::Double => LogicalTypeId::Double,
            Self::Timestamp => LogicalTypeId::Timestamp,
            Self::Date => LogicalTypeId::Date,
            Self::Varchar => LogicalTypeId::Varchar,
            Self::Blob => LogicalTypeId::Blob,
            Self::Decimal { .. } => LogicalTypeId::Decimal,
            Self::List(_) => LogicalTypeId::List,
            Self::Map { .. } => LogicalTypeId::Map,
            Self::Struct(_) => LogicalTypeId::Struct,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Members if this is a struct.
    pub fn struct_members(&self) -> Option<&[StructMember]> {
        match self {
            Self::Struct(members) => Some(members),
            _ => None,
        }
    }

    fn members_or_err(&self) -> Result<&[StructMember]> {
        self.struct_members()
            .ok_or_else(|| TypeError::NotAStruct(self.to_string()))
    }

    fn member_at(&self, index: usize) -> Result<&StructMember> {
        let members = self.members_or_err()?;
        members
            .get(index)
            .ok_or(TypeError::MemberIndexOutOfBounds {
                index,
                count: members.len(),
            })
    }

    pub fn struct_member_count(&self) -> Result<usize> {
        Ok(self.members_or_err()?.len())
    }

    pub fn struct_member_name(&self, index: usize) -> Result<&str> {
        Ok(&self.member_at(index)?.name)
    }

    pub fn struct_member_type(&self, index: usize) -> Result<&LogicalType> {
        Ok(&self.member_at(index)?.ty)
    }

    /// First member called `name`.
    pub fn struct_member(&self, name: &str) -> Option<&StructMember> {
        self.struct_members()?.iter().find(|m| m.name == name)
    }

    /// Position of the first member called `name`.
    pub fn struct_member_index(&self, name: &str) -> Option<usize> {
        self.struct_members()?.iter().position(|m| m.name == name)
    }

    pub fn list_child(&self) -> Option<&LogicalType> {
        match self {
            Self::List(child) => Some(child),
            _ => None,
        }
    }

    pub fn map_key(&self) -> Option<&LogicalType> {
        match self {
            Self::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn map_value(&self) -> Option<&LogicalType> {
        match self {
            Self::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn decimal_width(&self) -> Option<u8> {
        match self {
            Self::Decimal { width, .. } => Some(*width),
            _ => None,
        }
    }

    pub fn decimal_scale(&self) -> Option<u8> {
        match self {
            Self::Decimal { scale, .. } => Some(*scale),
            _ => None,
        }
    }

    /// Nesting depth: 0 for scalars, 1 + deepest child for composites.
    pub fn depth(&self) -> usize {
        match self {
            Self::List(child) => 1 + child.depth(),
            Self::Map { key, value } => 1 + key.depth().max(value.depth()),
            Self::Struct(members) => {
                1 + members.iter().map(|m| m.ty.depth()).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

/// Fail if a composite holding `children` would exceed [`MAX_NESTING_DEPTH`].
///
/// Children built through the constructors are already within the limit, so
/// measuring them never recurses more than [`MAX_NESTING_DEPTH`] levels.
pub(crate) fn check_nesting<'a>(
    children: impl IntoIterator<Item = &'a LogicalType>,
) -> Result<()> {
    let depth = 1 + children
        .into_iter()
        .map(LogicalType::depth)
        .max()
        .unwrap_or(0);
    if depth > MAX_NESTING_DEPTH {
        return Err(TypeError::InvalidArgument(format!(
            "type nesting depth {} exceeds the limit of {}",
            depth, MAX_NESTING_DEPTH
        )));
    }
    Ok(())
}

/// Member names that are not plain identifiers are double-quoted.
fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if plain {
        f.write_str(name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal { width, scale } => write!(f, "DECIMAL({},{})", width, scale),
            Self::List(child) => write!(f, "{}[]", child),
            Self::Map { key, value } => write!(f, "MAP({}, {})", key, value),
            Self::Struct(members) => {
                f.write_str("STRUCT(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_identifier(f, &member.name)?;
                    write!(f, " {}", member.ty)?;
                }
                f.write_str(")")
            }
            other => f.write_str(other.id().sql_name()),
        }
    }
}
