use std::collections::HashMap;

use crate::error::EngineError;
use crate::schema::Schema;
use crate::table::Table;

/// Owns every [Table] in an engine instance and maps unique names to them.
/// It is the sole creator and destroyer of tables.
///
/// The manager is an explicit, passed-around value: construct one per engine
/// instance, never a global. The core performs no internal locking. When
/// embedded in a multi-threaded host, callers must serialize access (at most
/// one in-flight operation per manager, or wrap it in external
/// synchronization).
#[derive(Debug, Default)]
pub struct StorageManager {
    tables: HashMap<String, Table>,
}

impl StorageManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Creates and registers an empty table.
    ///
    /// # Errors
    /// Fails with [EngineError::TableAlreadyExists] when the name is taken.
    pub fn create_table(
        &mut self,
        name: impl Into<String>,
        schema: Schema,
    ) -> Result<(), EngineError> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            return Err(EngineError::TableAlreadyExists { name });
        }
        tracing::debug!("created table {:?} with {} columns", name, schema.len());
        let table = Table::new(name.clone(), schema);
        self.tables.insert(name, table);
        Ok(())
    }

    /// Looks up a table by name.
    ///
    /// The returned reference is a lookup handle, not ownership: the table's
    /// lifetime stays with the manager.
    ///
    /// # Errors
    /// Fails with [EngineError::TableNotFound] when absent.
    pub fn get_table(&self, name: &str) -> Result<&Table, EngineError> {
        self.tables
            .get(name)
            .ok_or_else(|| EngineError::TableNotFound {
                name: name.to_string(),
            })
    }

    /// Mutable variant of [get_table](StorageManager::get_table).
    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table, EngineError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| EngineError::TableNotFound {
                name: name.to_string(),
            })
    }

    /// Removes and destroys a table.
    ///
    /// # Errors
    /// Fails with [EngineError::TableNotFound] when absent.
    pub fn drop_table(&mut self, name: &str) -> Result<(), EngineError> {
        match self.tables.remove(name) {
            Some(_) => {
                tracing::debug!("dropped table {:?}", name);
                Ok(())
            }
            None => Err(EngineError::TableNotFound {
                name: name.to_string(),
            }),
        }
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// All table names, sorted for deterministic output.
    pub fn list_tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Drops every table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}
