use std::collections::HashMap;

use datafusion_expr::LogicalPlan;

use crate::catalog::{CatalogError, CatalogResult};

/// Session-local tables, keyed by their normalized name. Temporary tables have no
/// database.
#[derive(Debug, Default)]
pub struct TemporaryTables {
    tables: HashMap<String, LogicalPlan>,
}

impl TemporaryTables {
    pub fn create(
        &mut self,
        name: &str,
        definition: LogicalPlan,
        override_if_exists: bool,
    ) -> CatalogResult<()> {
        if !override_if_exists && self.tables.contains_key(name) {
            return Err(CatalogError::TempTableAlreadyExists {
                name: name.to_string(),
            });
        }
        self.tables.insert(name.to_string(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&LogicalPlan> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<LogicalPlan> {
        self.tables.remove(name)
    }

    /// Move a table to a new name. Returns false if there was nothing to move.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        match self.tables.remove(old_name) {
            Some(definition) => {
                self.tables.insert(new_name.to_string(), definition);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.tables.keys()
    }

    pub fn clear(&mut self) {
        self.tables.clear()
    }
}
