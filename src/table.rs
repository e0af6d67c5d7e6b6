use crate::error::EngineError;
use crate::row::Row;
use crate::schema::Schema;
use crate::value::Value;

/// A named table: a schema plus its rows in insertion order.
///
/// Every stored row satisfies the schema, and `UNIQUE` columns hold distinct
/// values across all stored rows. Both invariants are enforced on insert,
/// which is the only way rows get in.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates and appends a new row.
    ///
    /// Checks run in order: arity, per-column type/null constraints, then
    /// uniqueness against all stored rows (linear scan). The insert is
    /// atomic: on any failure the table is unchanged.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<(), EngineError> {
        self.schema.validate_row(&values)?;
        self.check_unique(&values)?;
        self.rows.push(Row::new(values));
        Ok(())
    }

    /// `NULL` values never conflict with each other or anything else.
    fn check_unique(&self, values: &[Value]) -> Result<(), EngineError> {
        for (index, column) in self.schema.columns().iter().enumerate() {
            if !column.unique {
                continue;
            }
            let candidate = &values[index];
            if candidate.is_null() {
                continue;
            }
            if self.rows.iter().any(|row| row.values()[index] == *candidate) {
                return Err(EngineError::UniqueConstraintViolation {
                    column: column.name.clone(),
                    value: candidate.clone(),
                });
            }
        }
        Ok(())
    }

    /// A fresh pass over the current rows in insertion order.
    ///
    /// Each call starts over; the iterator is not a live view of later
    /// mutations.
    pub fn scan(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Lazily yields the rows satisfying `predicate`, preserving the
    /// relative order of [scan](Table::scan).
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Row>
    where
        P: Fn(&Row) -> bool + 'a,
    {
        self.rows.iter().filter(move |row| predicate(row))
    }

    /// Returns the row at `index` in insertion order, if present.
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes all rows. The schema stays.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
