use thiserror::Error;

use crate::data_type::DataType;
use crate::value::Value;

/// Errors produced while turning SQL text into a [Statement](crate::ast::Statement).
///
/// Parsing is total: it either yields a statement or one of these errors,
/// never a partial result. Offsets are character positions into the source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The tokenizer hit a character that is not part of the language.
    #[error("character {ch:?} at offset {offset} is not supported")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// The statement parser found a token the grammar does not allow here.
    #[error("expected {expected}, found {found} at offset {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    /// A clause the grammar requires is absent (e.g. `SELECT` without `FROM`).
    #[error("missing {clause} clause")]
    MissingClause { clause: &'static str },

    /// A quoted string literal ran to the end of the input without a closing quote.
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedLiteral { offset: usize },

    /// An identifier appeared in type position but names no supported column type.
    #[error("{name:?} is not a supported column type")]
    UnsupportedType { name: String },
}

/// Errors produced while validating or executing a statement against storage.
///
/// Every variant carries enough context (names, offending values) to render a
/// precise message. [EngineError::IndexOutOfRange] is the exception: it marks
/// an internal invariant violation that cannot be triggered by well-formed SQL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A value list does not match the schema's column count.
    #[error("expected {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    /// A value's runtime kind does not match the column's declared type.
    #[error("column {column:?} expects {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: String,
    },

    /// A `NULL` was supplied for a column declared `NOT NULL`.
    #[error("column {column:?} is not nullable")]
    NullConstraintViolation { column: String },

    /// A parsed literal could not be converted to the column's declared type.
    #[error("cannot convert {value} to {target} for column {column:?}")]
    ConversionError {
        column: String,
        value: Value,
        target: DataType,
    },

    /// A column name did not resolve against the schema.
    #[error("column {name:?} does not exist")]
    ColumnNotFound { name: String },

    /// An insert would duplicate a value in a `UNIQUE` column.
    #[error("unique constraint violated: column {column:?} already contains {value}")]
    UniqueConstraintViolation { column: String, value: Value },

    /// A schema was declared with the same column name twice.
    #[error("duplicate column name {name:?}")]
    DuplicateColumn { name: String },

    /// A schema was declared with no columns at all.
    #[error("a schema must have at least one column")]
    EmptySchema,

    #[error("table {name:?} already exists")]
    TableAlreadyExists { name: String },

    #[error("table {name:?} does not exist")]
    TableNotFound { name: String },

    /// Positional access past the end of a row. This is a programming error
    /// in the caller, not something user input can produce: callers are
    /// expected to resolve indices through the schema first.
    #[error("index {index} out of range for row of {arity} values")]
    IndexOutOfRange { index: usize, arity: usize },
}
