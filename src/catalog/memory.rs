use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::catalog::{
    CatalogError, CatalogResult, DatabaseStore, FunctionStore, PartitionStore,
    TableStore,
};
use crate::data_types::{
    CatalogDatabase, CatalogFunction, CatalogTable, CatalogTablePartition,
    TablePartitionSpec,
};
use crate::utils::filter_pattern;

struct TableEntry {
    table: CatalogTable,
    partitions: BTreeMap<TablePartitionSpec, CatalogTablePartition>,
}

struct DatabaseEntry {
    definition: CatalogDatabase,
    tables: HashMap<String, TableEntry>,
    functions: HashMap<String, CatalogFunction>,
}

/// A metastore kept entirely in process memory. Unlike the session state, it may be
/// shared between several sessions, so it guards its maps with a lock.
#[derive(Default)]
pub struct MemoryStore {
    databases: RwLock<HashMap<String, DatabaseEntry>>,
}

fn require_db<'a>(
    databases: &'a HashMap<String, DatabaseEntry>,
    name: &str,
) -> CatalogResult<&'a DatabaseEntry> {
    databases
        .get(name)
        .ok_or_else(|| CatalogError::NoSuchDatabase {
            name: name.to_string(),
        })
}

fn require_db_mut<'a>(
    databases: &'a mut HashMap<String, DatabaseEntry>,
    name: &str,
) -> CatalogResult<&'a mut DatabaseEntry> {
    databases
        .get_mut(name)
        .ok_or_else(|| CatalogError::NoSuchDatabase {
            name: name.to_string(),
        })
}

fn require_table<'a>(
    databases: &'a HashMap<String, DatabaseEntry>,
    database: &str,
    table: &str,
) -> CatalogResult<&'a TableEntry> {
    require_db(databases, database)?
        .tables
        .get(table)
        .ok_or_else(|| CatalogError::NoSuchTable {
            database: database.to_string(),
            name: table.to_string(),
        })
}

fn require_table_mut<'a>(
    databases: &'a mut HashMap<String, DatabaseEntry>,
    database: &str,
    table: &str,
) -> CatalogResult<&'a mut TableEntry> {
    require_db_mut(databases, database)?
        .tables
        .get_mut(table)
        .ok_or_else(|| CatalogError::NoSuchTable {
            database: database.to_string(),
            name: table.to_string(),
        })
}

fn no_such_partition(
    database: &str,
    table: &str,
    spec: &TablePartitionSpec,
) -> CatalogError {
    CatalogError::NoSuchPartition {
        database: database.to_string(),
        table: table.to_string(),
        spec: spec.clone(),
    }
}

fn partition_exists(
    database: &str,
    table: &str,
    spec: &TablePartitionSpec,
) -> CatalogError {
    CatalogError::PartitionAlreadyExists {
        database: database.to_string(),
        table: table.to_string(),
        spec: spec.clone(),
    }
}

#[async_trait]
impl DatabaseStore for MemoryStore {
    async fn create(
        &self,
        database: &CatalogDatabase,
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();

        if databases.contains_key(&database.name) {
            return if ignore_if_exists {
                Ok(())
            } else {
                Err(CatalogError::DatabaseAlreadyExists {
                    name: database.name.clone(),
                })
            };
        }

        databases.insert(
            database.name.clone(),
            DatabaseEntry {
                definition: database.clone(),
                tables: HashMap::new(),
                functions: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn delete(
        &self,
        name: &str,
        ignore_if_not_exists: bool,
        cascade: bool,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();

        match databases.get(name) {
            Some(entry) => {
                if !cascade && (!entry.tables.is_empty() || !entry.functions.is_empty())
                {
                    return Err(CatalogError::DatabaseNotEmpty {
                        name: name.to_string(),
                    });
                }
                databases.remove(name);
                Ok(())
            }
            None if ignore_if_not_exists => Ok(()),
            None => Err(CatalogError::NoSuchDatabase {
                name: name.to_string(),
            }),
        }
    }

    async fn alter(&self, database: &CatalogDatabase) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        require_db_mut(&mut databases, &database.name)?.definition = database.clone();
        Ok(())
    }

    async fn get(&self, name: &str) -> CatalogResult<CatalogDatabase> {
        let databases = self.databases.read();
        Ok(require_db(&databases, name)?.definition.clone())
    }

    async fn exists(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.databases.read().contains_key(name))
    }

    async fn list(&self, pattern: &str) -> CatalogResult<Vec<String>> {
        let databases = self.databases.read();
        Ok(filter_pattern(databases.keys(), pattern))
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn create(
        &self,
        database: &str,
        table: &CatalogTable,
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let db = require_db_mut(&mut databases, database)?;
        let name = &table.identifier.table;

        if db.tables.contains_key(name) {
            return if ignore_if_exists {
                Ok(())
            } else {
                Err(CatalogError::TableAlreadyExists {
                    database: database.to_string(),
                    name: name.clone(),
                })
            };
        }

        db.tables.insert(
            name.clone(),
            TableEntry {
                table: table.clone(),
                partitions: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn delete(
        &self,
        database: &str,
        table: &str,
        ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let db = require_db_mut(&mut databases, database)?;

        if db.tables.remove(table).is_none() && !ignore_if_not_exists {
            return Err(CatalogError::NoSuchTable {
                database: database.to_string(),
                name: table.to_string(),
            });
        }
        Ok(())
    }

    async fn rename(
        &self,
        database: &str,
        old_name: &str,
        new_name: &str,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        require_table(&databases, database, old_name)?;
        let db = require_db_mut(&mut databases, database)?;

        if db.tables.contains_key(new_name) {
            return Err(CatalogError::TableAlreadyExists {
                database: database.to_string(),
                name: new_name.to_string(),
            });
        }

        if let Some(mut entry) = db.tables.remove(old_name) {
            entry.table.identifier.table = new_name.to_string();
            db.tables.insert(new_name.to_string(), entry);
        }
        Ok(())
    }

    async fn alter(&self, database: &str, table: &CatalogTable) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        require_table_mut(&mut databases, database, &table.identifier.table)?.table =
            table.clone();
        Ok(())
    }

    async fn get(&self, database: &str, table: &str) -> CatalogResult<CatalogTable> {
        let databases = self.databases.read();
        Ok(require_table(&databases, database, table)?.table.clone())
    }

    async fn exists(&self, database: &str, table: &str) -> CatalogResult<bool> {
        let databases = self.databases.read();
        Ok(require_db(&databases, database)?.tables.contains_key(table))
    }

    async fn list(&self, database: &str, pattern: &str) -> CatalogResult<Vec<String>> {
        let databases = self.databases.read();
        Ok(filter_pattern(
            require_db(&databases, database)?.tables.keys(),
            pattern,
        ))
    }
}

#[async_trait]
impl PartitionStore for MemoryStore {
    async fn create(
        &self,
        database: &str,
        table: &str,
        partitions: &[CatalogTablePartition],
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let entry = require_table_mut(&mut databases, database, table)?;

        for partition in partitions {
            let columns_match = partition.spec.len() == entry.table.partition_columns.len()
                && entry
                    .table
                    .partition_columns
                    .iter()
                    .all(|c| partition.spec.contains_key(c));
            if !columns_match {
                return Err(CatalogError::InvalidPartitionSpec {
                    table: table.to_string(),
                    spec: partition.spec.clone(),
                });
            }

            if !ignore_if_exists && entry.partitions.contains_key(&partition.spec) {
                return Err(partition_exists(database, table, &partition.spec));
            }
        }

        for partition in partitions {
            entry
                .partitions
                .insert(partition.spec.clone(), partition.clone());
        }
        Ok(())
    }

    async fn delete(
        &self,
        database: &str,
        table: &str,
        specs: &[TablePartitionSpec],
        ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let entry = require_table_mut(&mut databases, database, table)?;

        if !ignore_if_not_exists {
            if let Some(missing) = specs.iter().find(|s| !entry.partitions.contains_key(s))
            {
                return Err(no_such_partition(database, table, missing));
            }
        }

        for spec in specs {
            entry.partitions.remove(spec);
        }
        Ok(())
    }

    async fn rename(
        &self,
        database: &str,
        table: &str,
        specs: &[TablePartitionSpec],
        new_specs: &[TablePartitionSpec],
    ) -> CatalogResult<()> {
        if specs.len() != new_specs.len() {
            return Err(CatalogError::Generic {
                reason: format!(
                    "Number of old ({}) and new ({}) partition specs differ",
                    specs.len(),
                    new_specs.len()
                ),
            });
        }

        let mut databases = self.databases.write();
        let entry = require_table_mut(&mut databases, database, table)?;

        for (old_spec, new_spec) in specs.iter().zip(new_specs) {
            if entry.partitions.contains_key(new_spec) {
                return Err(partition_exists(database, table, new_spec));
            }
            let mut partition = entry
                .partitions
                .remove(old_spec)
                .ok_or_else(|| no_such_partition(database, table, old_spec))?;
            partition.spec = new_spec.clone();
            entry.partitions.insert(new_spec.clone(), partition);
        }
        Ok(())
    }

    async fn alter(
        &self,
        database: &str,
        table: &str,
        partitions: &[CatalogTablePartition],
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let entry = require_table_mut(&mut databases, database, table)?;

        if let Some(missing) = partitions
            .iter()
            .find(|p| !entry.partitions.contains_key(&p.spec))
        {
            return Err(no_such_partition(database, table, &missing.spec));
        }

        for partition in partitions {
            entry
                .partitions
                .insert(partition.spec.clone(), partition.clone());
        }
        Ok(())
    }

    async fn get(
        &self,
        database: &str,
        table: &str,
        spec: &TablePartitionSpec,
    ) -> CatalogResult<CatalogTablePartition> {
        let databases = self.databases.read();
        require_table(&databases, database, table)?
            .partitions
            .get(spec)
            .cloned()
            .ok_or_else(|| no_such_partition(database, table, spec))
    }

    async fn list(
        &self,
        database: &str,
        table: &str,
        partial_spec: Option<&TablePartitionSpec>,
    ) -> CatalogResult<Vec<CatalogTablePartition>> {
        let databases = self.databases.read();
        let entry = require_table(&databases, database, table)?;

        Ok(entry
            .partitions
            .values()
            .filter(|p| match partial_spec {
                Some(partial) => partial.iter().all(|(k, v)| p.spec.get(k) == Some(v)),
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FunctionStore for MemoryStore {
    async fn create(&self, database: &str, function: &CatalogFunction) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let db = require_db_mut(&mut databases, database)?;
        let name = &function.identifier.name;

        if db.functions.contains_key(name) {
            return Err(CatalogError::FunctionAlreadyExists {
                database: database.to_string(),
                name: name.clone(),
            });
        }

        db.functions.insert(name.clone(), function.clone());
        Ok(())
    }

    async fn delete(&self, database: &str, name: &str) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        require_db_mut(&mut databases, database)?
            .functions
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NoSuchFunction {
                database: database.to_string(),
                name: name.to_string(),
            })
    }

    async fn alter(&self, database: &str, function: &CatalogFunction) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let db = require_db_mut(&mut databases, database)?;
        let name = &function.identifier.name;

        match db.functions.get_mut(name) {
            Some(existing) => {
                *existing = function.clone();
                Ok(())
            }
            None => Err(CatalogError::NoSuchFunction {
                database: database.to_string(),
                name: name.clone(),
            }),
        }
    }

    async fn rename(
        &self,
        database: &str,
        old_name: &str,
        new_name: &str,
    ) -> CatalogResult<()> {
        let mut databases = self.databases.write();
        let db = require_db_mut(&mut databases, database)?;

        if db.functions.contains_key(new_name) {
            return Err(CatalogError::FunctionAlreadyExists {
                database: database.to_string(),
                name: new_name.to_string(),
            });
        }

        let mut function =
            db.functions
                .remove(old_name)
                .ok_or_else(|| CatalogError::NoSuchFunction {
                    database: database.to_string(),
                    name: old_name.to_string(),
                })?;
        function.identifier.name = new_name.to_string();
        db.functions.insert(new_name.to_string(), function);
        Ok(())
    }

    async fn get(&self, database: &str, name: &str) -> CatalogResult<CatalogFunction> {
        let databases = self.databases.read();
        require_db(&databases, database)?
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NoSuchFunction {
                database: database.to_string(),
                name: name.to_string(),
            })
    }

    async fn exists(&self, database: &str, name: &str) -> CatalogResult<bool> {
        let databases = self.databases.read();
        Ok(require_db(&databases, database)?.functions.contains_key(name))
    }

    async fn list(&self, database: &str, pattern: &str) -> CatalogResult<Vec<String>> {
        let databases = self.databases.read();
        Ok(filter_pattern(
            require_db(&databases, database)?.functions.keys(),
            pattern,
        ))
    }
}
