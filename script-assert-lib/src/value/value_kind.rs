use core::fmt;

/// The type of a [`Value`](super::Value), used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    String,
    Timestamp,
    List,
    Map,
    Opaque(String),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::List => "list",
            Self::Map => "map",
            Self::Opaque(type_name) => type_name,
        };
        f.write_str(name)
    }
}
