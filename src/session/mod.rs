//! The session catalog: resolves the names used by a query against the temporary
//! objects of one session and the shared metastore behind it.
//!
//! A `SessionCatalog` is owned by a single session. It has no internal locking; every
//! mutation goes through `&mut self`, so concurrent use has to be serialized by the
//! owner (typically one catalog per session, driven by one task at a time).

use std::sync::Arc;

use tracing::info;

use crate::catalog::metastore::Metastore;
use crate::catalog::{CatalogError, CatalogResult};
use crate::config::schema::SessionCatalogConfig;
use crate::data_types::CatalogDatabase;
use crate::function::builtin::BUILTIN_FUNCTIONS;
use crate::function::{FunctionBuilderFactory, FunctionRegistry, ResourceLoader};
use crate::identifier::{NameNormalizer, TableIdentifier};
use crate::utils::MATCH_ALL;

mod function;
mod partition;
mod table;
pub mod temp;

use temp::TemporaryTables;

pub struct SessionCatalog {
    config: SessionCatalogConfig,
    metastore: Metastore,
    registry: Box<dyn FunctionRegistry>,
    resource_loader: Arc<dyn ResourceLoader>,
    builder_factory: Arc<dyn FunctionBuilderFactory>,
    normalizer: NameNormalizer,
    temp_tables: TemporaryTables,
    current_db: String,
}

impl SessionCatalog {
    /// Set up a catalog for a new session, creating the default database in the
    /// metastore if it isn't there yet.
    pub async fn try_new(
        config: SessionCatalogConfig,
        metastore: Metastore,
        registry: Box<dyn FunctionRegistry>,
        resource_loader: Arc<dyn ResourceLoader>,
        builder_factory: Arc<dyn FunctionBuilderFactory>,
    ) -> CatalogResult<Self> {
        let default_db = config.catalog.default_database.clone();

        let catalog = Self {
            normalizer: NameNormalizer::new(config.catalog.case_sensitive),
            config,
            metastore,
            registry,
            resource_loader,
            builder_factory,
            temp_tables: TemporaryTables::default(),
            current_db: default_db.clone(),
        };

        if !catalog.database_exists(&default_db).await? {
            info!("Creating default database {default_db:?}");
            catalog
                .create_database(&CatalogDatabase::new(&default_db), true)
                .await?;
        }

        Ok(catalog)
    }

    pub fn metastore(&self) -> &Metastore {
        &self.metastore
    }

    pub fn registry(&self) -> &dyn FunctionRegistry {
        self.registry.as_ref()
    }

    pub fn default_database(&self) -> &str {
        &self.config.catalog.default_database
    }

    /// Location given to databases created without one.
    pub fn default_database_path(&self, db: &str) -> String {
        format!(
            "{}/{db}.db",
            self.config.catalog.warehouse_path.trim_end_matches('/')
        )
    }

    // Database and normalized table name a table identifier refers to in the metastore
    fn qualify_table(&self, name: &TableIdentifier) -> (String, String) {
        let TableIdentifier { table, database } = self.normalizer.normalize_table(name);
        (database.unwrap_or_else(|| self.current_db.clone()), table)
    }

    // ----------------------------------------------------------------------------
    // Databases
    // ----------------------------------------------------------------------------

    pub async fn create_database(
        &self,
        definition: &CatalogDatabase,
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let mut definition = definition.clone();
        if definition.location_uri.is_empty() {
            definition.location_uri = self.default_database_path(&definition.name);
        }

        self.metastore
            .databases
            .create(&definition, ignore_if_exists)
            .await
    }

    pub async fn drop_database(
        &self,
        db: &str,
        ignore_if_not_exists: bool,
        cascade: bool,
    ) -> CatalogResult<()> {
        if db == self.default_database() {
            return Err(CatalogError::CannotDropDefaultDatabase);
        }

        self.metastore
            .databases
            .delete(db, ignore_if_not_exists, cascade)
            .await
    }

    pub async fn alter_database(&self, definition: &CatalogDatabase) -> CatalogResult<()> {
        self.metastore.databases.alter(definition).await
    }

    pub async fn get_database_metadata(&self, db: &str) -> CatalogResult<CatalogDatabase> {
        self.metastore.databases.get(db).await
    }

    pub async fn database_exists(&self, db: &str) -> CatalogResult<bool> {
        self.metastore.databases.exists(db).await
    }

    pub async fn list_databases(&self, pattern: &str) -> CatalogResult<Vec<String>> {
        self.metastore.databases.list(pattern).await
    }

    pub fn current_database(&self) -> &str {
        &self.current_db
    }

    /// Switch the database that unqualified names resolve against. The database has
    /// to exist; on failure the current database is left as it was.
    pub async fn set_current_database(&mut self, db: &str) -> CatalogResult<()> {
        if !self.database_exists(db).await? {
            return Err(CatalogError::NoSuchDatabase {
                name: db.to_string(),
            });
        }

        info!("Switching current database to {db:?}");
        self.current_db = db.to_string();
        Ok(())
    }

    // ----------------------------------------------------------------------------
    // Reset
    // ----------------------------------------------------------------------------

    /// Return the session to a pristine state: only the (empty) default database, no
    /// temporary tables and exactly the built-in functions.
    pub async fn reset(&mut self) -> CatalogResult<()> {
        info!("Resetting the session catalog");
        let default_db = self.default_database().to_string();

        for db in self.list_databases(MATCH_ALL).await? {
            if db != default_db {
                self.drop_database(&db, false, true).await?;
            }
        }

        for table in self.list_tables(&default_db, MATCH_ALL).await? {
            self.drop_table(&table, false).await?;
        }

        for function in self.list_functions(&default_db, MATCH_ALL).await? {
            if function.database.is_some() {
                self.drop_function(&function, false).await?;
            } else {
                // A materialized permanent function is listed under its `db.name` key
                // too, and dropping it above has already evicted that entry.
                self.drop_temp_function(&function.name, true)?;
            }
        }

        self.temp_tables.clear();
        self.registry.clear();
        self.resource_loader.clear();

        for name in BUILTIN_FUNCTIONS.list_functions() {
            let info = BUILTIN_FUNCTIONS
                .lookup_function_info(&name)
                .unwrap_or_else(|| panic!("built-in function {name:?} is missing its info"));
            let builder = BUILTIN_FUNCTIONS
                .lookup_function_builder(&name)
                .unwrap_or_else(|| {
                    panic!("built-in function {name:?} is missing its builder")
                });
            self.registry.register_function(&name, info, builder);
        }

        self.set_current_database(&default_db).await
    }
}
