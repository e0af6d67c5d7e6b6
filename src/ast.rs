use std::fmt;

use crate::data_type::DataType;
use crate::value::Value;

/// A fully parsed SQL statement, ready for execution.
///
/// A statement is only ever produced whole: the parser yields one of these
/// or an error, never a partial structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    Insert(Insert),
    Select(Select),
}

/// One column declaration inside a `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: DataType,
    /// Explicit `VARCHAR(n)` length, when given.
    pub max_length: Option<usize>,
    pub nullable: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    /// Positional literal values, one per schema column.
    pub values: Vec<Value>,
}

/// The projection list of a `SELECT`.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectColumns {
    /// `SELECT *`
    Star,
    /// An explicit, ordered column list.
    Names(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub columns: SelectColumns,
    pub where_clause: Option<WhereClause>,
}

/// The comparison operators allowed in a `WHERE` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
        };
        f.write_str(symbol)
    }
}

/// A single `column <op> literal` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub op: ComparisonOp,
    pub value: Value,
}
