use std::fmt;

/// Represents the supported data types in the database schema.
/// These types define the structure of columns and the expected format of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// A 64-bit signed integer.
    Int,
    /// A variable-length UTF-8 character string with an optional maximum length.
    Varchar,
    /// A 64-bit floating-point number.
    Float,
    /// A boolean value (true or false).
    Boolean,
}

impl fmt::Display for DataType {
    /// Renders the SQL keyword for this type, as it appears in `CREATE TABLE`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            DataType::Int => "INT",
            DataType::Varchar => "VARCHAR",
            DataType::Float => "FLOAT",
            DataType::Boolean => "BOOLEAN",
        };
        f.write_str(keyword)
    }
}
