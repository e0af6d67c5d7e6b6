use crate::data_type::DataType;
use crate::error::EngineError;
use crate::value::Value;

/// Maximum length applied when a VARCHAR column is declared without one.
pub const DEFAULT_VARCHAR_LENGTH: usize = 255;

/// A single column definition: name, declared type and constraints.
///
/// Columns are created when a table is defined and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column, unique within its schema.
    pub name: String,
    /// The declared data type.
    pub data_type: DataType,
    /// Whether `NULL` values are accepted.
    pub nullable: bool,
    /// Whether values must be distinct across all stored rows.
    pub unique: bool,
    /// Maximum character count. VARCHAR columns only.
    pub max_length: Option<usize>,
}

impl Column {
    /// Creates a nullable, non-unique column of the given type.
    ///
    /// VARCHAR columns get [DEFAULT_VARCHAR_LENGTH] unless
    /// [with_max_length](Column::with_max_length) overrides it.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        let max_length = match data_type {
            DataType::Varchar => Some(DEFAULT_VARCHAR_LENGTH),
            _ => None,
        };
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            unique: false,
            max_length,
        }
    }

    /// Marks the column `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column `UNIQUE`.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Overrides the maximum character count for a VARCHAR column.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Checks that a value is storable under this column's type and constraints.
    ///
    /// An integer is accepted where FLOAT is declared; no other cross-type
    /// kind is. `NULL` passes only when the column is nullable.
    pub fn validate(&self, value: &Value) -> Result<(), EngineError> {
        if value.is_null() {
            if self.nullable {
                return Ok(());
            }
            return Err(EngineError::NullConstraintViolation {
                column: self.name.clone(),
            });
        }

        let kind_matches = match self.data_type {
            DataType::Int => matches!(value, Value::Int(_)),
            DataType::Float => matches!(value, Value::Float(_) | Value::Int(_)),
            DataType::Varchar => matches!(value, Value::Text(_)),
            DataType::Boolean => matches!(value, Value::Bool(_)),
        };
        if !kind_matches {
            return Err(EngineError::TypeMismatch {
                column: self.name.clone(),
                expected: self.data_type,
                found: value.kind().to_string(),
            });
        }

        if let (Value::Text(s), Some(max_length)) = (value, self.max_length) {
            let length = s.chars().count();
            if length > max_length {
                return Err(EngineError::TypeMismatch {
                    column: self.name.clone(),
                    expected: self.data_type,
                    found: format!("a {length}-character string (limit {max_length})"),
                });
            }
        }

        Ok(())
    }

    /// Builds the stored [Value] for this column from a parsed literal.
    ///
    /// Performs the declared conversion (an integer literal becomes a float
    /// for FLOAT columns) and validates the result, so the returned value is
    /// guaranteed storable.
    pub fn convert(&self, value: Value) -> Result<Value, EngineError> {
        if value.is_null() {
            if !self.nullable {
                return Err(EngineError::NullConstraintViolation {
                    column: self.name.clone(),
                });
            }
            return Ok(Value::Null);
        }

        let converted = match (self.data_type, value) {
            (DataType::Int, v @ Value::Int(_))
            | (DataType::Float, v @ Value::Float(_))
            | (DataType::Varchar, v @ Value::Text(_))
            | (DataType::Boolean, v @ Value::Bool(_)) => v,
            (DataType::Float, Value::Int(i)) => Value::Float(i as f64),
            (_, v) => {
                return Err(EngineError::ConversionError {
                    column: self.name.clone(),
                    value: v,
                    target: self.data_type,
                });
            }
        };

        // Length constraints still apply to the converted value.
        self.validate(&converted)?;
        Ok(converted)
    }
}
