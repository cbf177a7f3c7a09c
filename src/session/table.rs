use datafusion_expr::{LogicalPlan, LogicalPlanBuilder};
use tracing::error;

use crate::catalog::{CatalogError, CatalogResult};
use crate::data_types::CatalogTable;
use crate::identifier::TableIdentifier;
use crate::provider::MetastoreRelation;
use crate::session::SessionCatalog;
use crate::utils::filter_pattern;

// Unqualified names check the temporary tables first; anything else goes to the metastore.
// Temporary tables have no database, so a qualified name never refers to one.

impl SessionCatalog {
    fn temporary_table(&self, name: &TableIdentifier, table: &str) -> Option<&LogicalPlan> {
        match name.database {
            Some(_) => None,
            None => self.temp_tables.get(table),
        }
    }

    fn refers_to_temporary(&self, name: &TableIdentifier, table: &str) -> bool {
        name.database.is_none() && self.temp_tables.contains(table)
    }

    // Point a definition at the database and normalized name it is stored under.
    fn qualify_definition(&self, definition: &CatalogTable) -> (String, CatalogTable) {
        let (db, table) = self.qualify_table(&definition.identifier);
        let mut definition = definition.clone();
        definition.identifier = TableIdentifier::with_database(table, &db);
        (db, definition)
    }

    pub fn create_temp_table(
        &mut self,
        name: &str,
        definition: LogicalPlan,
        override_if_exists: bool,
    ) -> CatalogResult<()> {
        let table = self.normalizer.format_table_name(name);
        self.temp_tables.create(&table, definition, override_if_exists)
    }

    pub async fn create_table(
        &self,
        definition: &CatalogTable,
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let (db, definition) = self.qualify_definition(definition);
        self.metastore
            .tables
            .create(&db, &definition, ignore_if_exists)
            .await
    }

    pub async fn alter_table(&self, definition: &CatalogTable) -> CatalogResult<()> {
        let (db, definition) = self.qualify_definition(definition);
        self.metastore.tables.alter(&db, &definition).await
    }

    /// Metadata of a table in the metastore. Temporary tables aren't considered.
    pub async fn get_table_metadata(
        &self,
        name: &TableIdentifier,
    ) -> CatalogResult<CatalogTable> {
        let (db, table) = self.qualify_table(name);
        self.metastore.tables.get(&db, &table).await
    }

    pub async fn get_table_metadata_option(
        &self,
        name: &TableIdentifier,
    ) -> CatalogResult<Option<CatalogTable>> {
        match self.get_table_metadata(name).await {
            Ok(table) => Ok(Some(table)),
            Err(CatalogError::NoSuchTable { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Rename a table within a database. Both names have to carry the same explicit
    /// database, or none. An unqualified name that matches a temporary table renames
    /// the temporary table.
    pub async fn rename_table(
        &mut self,
        old_name: &TableIdentifier,
        new_name: &TableIdentifier,
    ) -> CatalogResult<()> {
        if old_name.database != new_name.database {
            return Err(CatalogError::CrossDatabaseRename {
                old_name: old_name.to_string(),
                new_name: new_name.to_string(),
            });
        }

        let (db, old_table) = self.qualify_table(old_name);
        let new_table = self.normalizer.format_table_name(&new_name.table);

        if self.refers_to_temporary(old_name, &old_table) {
            self.temp_tables.rename(&old_table, &new_table);
            Ok(())
        } else {
            self.metastore
                .tables
                .rename(&db, &old_table, &new_table)
                .await
        }
    }

    /// Drop a table. A missing table (or database) is only logged, never raised, even
    /// when `ignore_if_not_exists` is false.
    pub async fn drop_table(
        &mut self,
        name: &TableIdentifier,
        ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(name);

        if self.refers_to_temporary(name, &table) {
            self.temp_tables.remove(&table);
            return Ok(());
        }

        let exists = match self.metastore.tables.exists(&db, &table).await {
            Ok(exists) => exists,
            Err(CatalogError::NoSuchDatabase { .. } | CatalogError::NoSuchTable { .. }) => {
                false
            }
            Err(e) => return Err(e),
        };

        if exists {
            self.metastore.tables.delete(&db, &table, true).await?;
        } else if !ignore_if_not_exists {
            error!("Table or view {} does not exist", name.quoted_string());
        }

        Ok(())
    }

    /// Resolve a table into a plan. The relation is wrapped in a subquery alias named
    /// after the table, and again in `alias` if one is given, so that its columns are
    /// qualified the same way whichever side it came from.
    pub async fn lookup_relation(
        &self,
        name: &TableIdentifier,
        alias: Option<&str>,
    ) -> CatalogResult<LogicalPlan> {
        let (db, table) = self.qualify_table(name);

        let relation = match self.temporary_table(name, &table) {
            Some(definition) => definition.clone(),
            None => {
                let metadata = self.metastore.tables.get(&db, &table).await?;
                MetastoreRelation::new(db, metadata).into_plan()?
            }
        };

        let mut builder = LogicalPlanBuilder::from(relation).alias(table)?;
        if let Some(alias) = alias {
            builder = builder.alias(alias.to_string())?;
        }

        Ok(builder.build()?)
    }

    pub async fn table_exists(&self, name: &TableIdentifier) -> CatalogResult<bool> {
        let (db, table) = self.qualify_table(name);

        if self.refers_to_temporary(name, &table) {
            Ok(true)
        } else {
            self.metastore.tables.exists(&db, &table).await
        }
    }

    pub fn is_temporary_table(&self, name: &TableIdentifier) -> bool {
        let table = self.normalizer.format_table_name(&name.table);
        self.refers_to_temporary(name, &table)
    }

    /// Tables of `db` matching `pattern`, followed by the matching temporary tables.
    pub async fn list_tables(
        &self,
        db: &str,
        pattern: &str,
    ) -> CatalogResult<Vec<TableIdentifier>> {
        let mut tables: Vec<TableIdentifier> = self
            .metastore
            .tables
            .list(db, pattern)
            .await?
            .into_iter()
            .map(|t| TableIdentifier::with_database(t, db))
            .collect();

        tables.extend(
            filter_pattern(self.temp_tables.names(), pattern)
                .into_iter()
                .map(TableIdentifier::new),
        );

        Ok(tables)
    }

    pub async fn load_table(
        &self,
        name: &TableIdentifier,
        load_path: &str,
        overwrite: bool,
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(name);
        self.metastore
            .tables
            .load(&db, &table, load_path, overwrite)
            .await
    }

    pub fn clear_temp_tables(&mut self) {
        self.temp_tables.clear();
    }
}
