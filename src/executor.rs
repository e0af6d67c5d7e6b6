use std::cmp::Ordering;

use crate::ast::{
    ComparisonOp, CreateTable, Insert, Select, SelectColumns, Statement, WhereClause,
};
use crate::column::Column;
use crate::data_type::DataType;
use crate::error::EngineError;
use crate::parser;
use crate::row::Row;
use crate::schema::Schema;
use crate::storage::StorageManager;
use crate::value::Value;

/// The data produced by a `SELECT`: the projected schema (for display) plus
/// the matching rows, projected and in scan order. Plain data, no cursor
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// A `SELECT` result set.
    Rows(QueryResult),
    /// `CREATE TABLE` acknowledgment.
    Created { table: String },
    /// `INSERT` acknowledgment.
    Inserted { table: String },
}

/// Executes parsed statements against a [StorageManager].
///
/// The storage is constructor-injected and owned: one processor per engine
/// instance, multiple instances are fully independent. Execution is
/// synchronous; every statement runs to completion before returning.
pub struct QueryProcessor {
    storage: StorageManager,
}

impl QueryProcessor {
    pub fn new(storage: StorageManager) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut StorageManager {
        &mut self.storage
    }

    /// Consumes the processor, handing the storage back to the caller.
    pub fn into_storage(self) -> StorageManager {
        self.storage
    }

    /// Parses and executes a single SQL statement.
    ///
    /// # Errors
    /// Returns the parse error or execution error of the failing stage;
    /// nothing is mutated unless execution fully succeeds.
    pub fn run(&mut self, sql: &str) -> Result<ExecutionResult, EngineError> {
        let statement = parser::parse_statement(sql)?;
        self.execute(statement)
    }

    /// Executes an already-parsed statement.
    pub fn execute(&mut self, statement: Statement) -> Result<ExecutionResult, EngineError> {
        match statement {
            Statement::CreateTable(create) => self.create_table(create),
            Statement::Insert(insert) => self.insert(insert),
            Statement::Select(select) => self.select(select).map(ExecutionResult::Rows),
        }
    }

    fn create_table(&mut self, create: CreateTable) -> Result<ExecutionResult, EngineError> {
        let CreateTable { name, columns } = create;

        let columns = columns.into_iter().map(column_from_spec).collect();
        let schema = Schema::new(columns)?;
        self.storage.create_table(name.clone(), schema)?;

        Ok(ExecutionResult::Created { table: name })
    }

    fn insert(&mut self, insert: Insert) -> Result<ExecutionResult, EngineError> {
        let Insert { table, values } = insert;

        let target = self.storage.get_table_mut(&table)?;
        let schema = target.schema();

        // Arity is checked before any conversion is attempted.
        if values.len() != schema.len() {
            return Err(EngineError::ArityMismatch {
                expected: schema.len(),
                got: values.len(),
            });
        }

        let converted = schema
            .columns()
            .iter()
            .zip(values)
            .map(|(column, literal)| column.convert(literal))
            .collect::<Result<Vec<Value>, EngineError>>()?;
        target.insert(converted)?;
        tracing::debug!("inserted 1 row into table {:?}", table);

        Ok(ExecutionResult::Inserted { table })
    }

    fn select(&mut self, select: Select) -> Result<QueryResult, EngineError> {
        let table = self.storage.get_table(&select.table)?;
        let schema = table.schema();

        let indices = match &select.columns {
            SelectColumns::Star => (0..schema.len()).collect::<Vec<usize>>(),
            SelectColumns::Names(names) => schema.project_indices(names)?,
        };

        let rows: Vec<Row> = match &select.where_clause {
            Some(clause) => {
                let predicate = compile_predicate(schema, clause)?;
                table
                    .filter(|row| predicate.matches(row))
                    .map(|row| row.project(&indices))
                    .collect()
            }
            None => table.scan().map(|row| row.project(&indices)).collect(),
        };
        tracing::debug!(
            "select on table {:?} returned {} rows",
            select.table,
            rows.len()
        );

        Ok(QueryResult {
            schema: schema.project(&indices),
            rows,
        })
    }
}

fn column_from_spec(spec: crate::ast::ColumnSpec) -> Column {
    let mut column = Column::new(spec.name, spec.data_type);
    column.nullable = spec.nullable;
    column.unique = spec.unique;
    if let Some(max_length) = spec.max_length {
        column.max_length = Some(max_length);
    }
    column
}

/// A compiled `WHERE` clause: resolved column position, operator and literal.
/// Evaluating it is a pure function over a row.
struct RowPredicate {
    index: usize,
    op: ComparisonOp,
    literal: Value,
}

impl RowPredicate {
    fn matches(&self, row: &Row) -> bool {
        match compare(&row.values()[self.index], &self.literal) {
            Some(ordering) => match self.op {
                ComparisonOp::Eq => ordering == Ordering::Equal,
                ComparisonOp::NotEq => ordering != Ordering::Equal,
                ComparisonOp::Lt => ordering == Ordering::Less,
                ComparisonOp::LtEq => ordering != Ordering::Greater,
                ComparisonOp::Gt => ordering == Ordering::Greater,
                ComparisonOp::GtEq => ordering != Ordering::Less,
            },
            // NULL on either side never matches, not even `= NULL`.
            None => false,
        }
    }
}

/// Resolves and type-checks a `WHERE` clause against a schema.
///
/// Incompatible comparisons are rejected here, before any row is visited:
/// numbers compare with numbers, strings with strings, and booleans support
/// equality only.
fn compile_predicate(schema: &Schema, clause: &WhereClause) -> Result<RowPredicate, EngineError> {
    let index = schema
        .index_of(&clause.column)
        .ok_or_else(|| EngineError::ColumnNotFound {
            name: clause.column.clone(),
        })?;
    let column = &schema.columns()[index];

    let is_equality = matches!(clause.op, ComparisonOp::Eq | ComparisonOp::NotEq);
    if column.data_type == DataType::Boolean && !is_equality && !clause.value.is_null() {
        return Err(EngineError::TypeMismatch {
            column: column.name.clone(),
            expected: column.data_type,
            found: format!("an ordering comparison ({})", clause.op),
        });
    }

    let compatible = match (column.data_type, &clause.value) {
        // Comparing to NULL is legal to write; it just matches nothing.
        (_, Value::Null) => true,
        (DataType::Int | DataType::Float, Value::Int(_) | Value::Float(_)) => true,
        (DataType::Varchar, Value::Text(_)) => true,
        (DataType::Boolean, Value::Bool(_)) => true,
        _ => false,
    };
    if !compatible {
        return Err(EngineError::TypeMismatch {
            column: column.name.clone(),
            expected: column.data_type,
            found: clause.value.kind().to_string(),
        });
    }

    Ok(RowPredicate {
        index,
        op: clause.op,
        literal: clause.value.clone(),
    })
}

/// Type-consistent ordering between a stored value and a literal.
///
/// Integers and floats compare numerically with each other, strings
/// lexicographically. Returns `None` when either side is `NULL` or the
/// kinds are incomparable.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        (Value::Int(l), Value::Float(r)) => (*l as f64).partial_cmp(r),
        (Value::Float(l), Value::Int(r)) => l.partial_cmp(&(*r as f64)),
        (Value::Float(l), Value::Float(r)) => l.partial_cmp(r),
        (Value::Text(l), Value::Text(r)) => Some(l.as_ref().cmp(r.as_ref())),
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        _ => None,
    }
}
