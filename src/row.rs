use crate::error::EngineError;
use crate::schema::Schema;
use crate::value::Value;

/// A fixed-arity, ordered sequence of [Value]s aligned positionally to a
/// [Schema]: position `i` holds the value for schema column `i`.
///
/// A row does not hold a reference to its schema; the owning table supplies
/// that context. Stored rows are immutable: replacing a row means deleting
/// and re-inserting it, never mutating in place. `Clone` gives the value-wise
/// copy with no shared mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The ordered values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the row, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of values (the row's arity).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positional access.
    ///
    /// # Errors
    /// Fails with [EngineError::IndexOutOfRange] when `index` is past the
    /// row's arity.
    pub fn get(&self, index: usize) -> Result<&Value, EngineError> {
        self.values.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            arity: self.values.len(),
        })
    }

    /// Name-based access through a schema.
    ///
    /// # Errors
    /// Fails with [EngineError::ColumnNotFound] when the schema has no such
    /// column.
    pub fn get_by_name<'a>(
        &'a self,
        schema: &Schema,
        name: &str,
    ) -> Result<&'a Value, EngineError> {
        let index = schema
            .index_of(name)
            .ok_or_else(|| EngineError::ColumnNotFound { name: name.to_string() })?;
        self.get(index)
    }

    /// Returns a new row holding the values at `indices`, in that order.
    ///
    /// Indices must already be validated by the caller (through
    /// [Schema::project_indices]); an out-of-range index is a programming
    /// error and panics.
    pub fn project(&self, indices: &[usize]) -> Row {
        Row {
            values: indices.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }
}
