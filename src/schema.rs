use crate::column::Column;
use crate::error::EngineError;
use crate::value::Value;

/// Ordered collection of [Column] definitions describing the shape of a
/// table's rows. Column order is the positional contract for row values.
///
/// A schema is created once with its table and never mutated afterwards,
/// which is why the column list is not exposed mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates a schema from an ordered column list.
    ///
    /// # Errors
    /// Fails with [EngineError::EmptySchema] for an empty list and
    /// [EngineError::DuplicateColumn] when two columns share a name
    /// (names are case-sensitive).
    pub fn new(columns: Vec<Column>) -> Result<Self, EngineError> {
        if columns.is_empty() {
            return Err(EngineError::EmptySchema);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|other| other.name == column.name) {
                return Err(EngineError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// The ordered column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// A schema always has at least one column, so this is only useful to
    /// satisfy the `len`/`is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolves a column name to its position. Exact, case-sensitive match.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Returns the column definition for a name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Validates an ordered value list against this schema.
    ///
    /// Fails with [EngineError::ArityMismatch] when the lengths differ,
    /// otherwise with the first column-level error encountered. Uniqueness
    /// is not checked here; that requires the stored rows and is the owning
    /// table's job.
    pub fn validate_row(&self, values: &[Value]) -> Result<(), EngineError> {
        if values.len() != self.columns.len() {
            return Err(EngineError::ArityMismatch {
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(values) {
            column.validate(value)?;
        }
        Ok(())
    }

    /// Resolves an ordered list of column names into positions.
    ///
    /// Fails with [EngineError::ColumnNotFound] on the first name that does
    /// not resolve.
    pub fn project_indices(&self, names: &[String]) -> Result<Vec<usize>, EngineError> {
        names
            .iter()
            .map(|name| {
                self.index_of(name)
                    .ok_or_else(|| EngineError::ColumnNotFound { name: name.clone() })
            })
            .collect()
    }

    /// Builds the schema describing a projection of this one.
    ///
    /// Indices must come from [project_indices](Schema::project_indices);
    /// an out-of-range index is a programming error and panics.
    pub fn project(&self, indices: &[usize]) -> Schema {
        Schema {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
        }
    }
}
