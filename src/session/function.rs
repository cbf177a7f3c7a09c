use datafusion_expr::Expr;
use tracing::debug;

use crate::catalog::{CatalogError, CatalogResult};
use crate::data_types::{CatalogFunction, FunctionResource};
use crate::function::{FunctionBuilder, FunctionInfo};
use crate::identifier::FunctionIdentifier;
use crate::session::SessionCatalog;
use crate::utils::filter_pattern;

// Functions live in up to three places: the registry under their bare name (built-ins
// and temporary functions), the registry under `db.name` (permanent functions that have
// already been materialized in this session) and the metastore.

impl SessionCatalog {
    // Database a function identifier refers to, and the identifier qualified with it
    fn qualify_function(&self, name: &FunctionIdentifier) -> (String, FunctionIdentifier) {
        let db = name
            .database
            .clone()
            .unwrap_or_else(|| self.current_db.clone());
        let qualified = FunctionIdentifier::with_database(name.name.clone(), db.clone());
        (db, qualified)
    }

    fn undefined_function(&self, name: &str) -> CatalogError {
        CatalogError::UndefinedFunction {
            database: self.current_db.clone(),
            name: name.to_string(),
        }
    }

    // Registry entry under the name as given, or anything `function_exists` finds
    async fn is_function_defined(&self, name: &FunctionIdentifier) -> CatalogResult<bool> {
        Ok(self.registry.function_exists(&name.unquoted_string())
            || self.function_exists(name).await?)
    }

    // Fetch a permanent function, folding both ways the metastore can say it isn't
    // there into one error
    async fn fetch_function(&self, db: &str, name: &str) -> CatalogResult<CatalogFunction> {
        match self.metastore.functions.get(db, name).await {
            Err(CatalogError::NoSuchFunction { .. } | CatalogError::NoSuchDatabase { .. }) => {
                Err(self.undefined_function(name))
            }
            result => result,
        }
    }

    /// Whether a function exists in its own database: materialized under its qualified
    /// name or known to the metastore. Built-ins and temporary functions don't count.
    pub async fn function_exists(&self, name: &FunctionIdentifier) -> CatalogResult<bool> {
        let (db, qualified) = self.qualify_function(name);

        if self.registry.function_exists(&qualified.unquoted_string()) {
            return Ok(true);
        }
        match self.metastore.functions.exists(&db, &name.name).await {
            Err(CatalogError::NoSuchDatabase { .. }) => Ok(false),
            result => result,
        }
    }

    pub async fn create_function(
        &self,
        definition: &CatalogFunction,
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let (db, qualified) = self.qualify_function(&definition.identifier);

        if self.is_function_defined(&definition.identifier).await? {
            return if ignore_if_exists {
                Ok(())
            } else {
                Err(CatalogError::FunctionAlreadyExists {
                    database: db,
                    name: qualified.name,
                })
            };
        }

        let mut definition = definition.clone();
        definition.identifier = qualified;
        self.metastore.functions.create(&db, &definition).await
    }

    /// Drop a permanent function, evicting its materialized entry from the registry.
    pub async fn drop_function(
        &mut self,
        name: &FunctionIdentifier,
        ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        let (db, qualified) = self.qualify_function(name);

        if self.is_function_defined(name).await? {
            self.registry.drop_function(&qualified.unquoted_string());
            self.metastore.functions.delete(&db, &name.name).await
        } else if ignore_if_not_exists {
            Ok(())
        } else {
            Err(self.undefined_function(&name.name))
        }
    }

    pub async fn alter_function(&mut self, definition: &CatalogFunction) -> CatalogResult<()> {
        let (db, qualified) = self.qualify_function(&definition.identifier);

        // The next lookup has to pick up the new definition
        self.registry.drop_function(&qualified.unquoted_string());

        let mut definition = definition.clone();
        definition.identifier = qualified;
        self.metastore.functions.alter(&db, &definition).await
    }

    pub async fn rename_function(
        &mut self,
        old_name: &FunctionIdentifier,
        new_name: &FunctionIdentifier,
    ) -> CatalogResult<()> {
        if old_name.database != new_name.database {
            return Err(CatalogError::CrossDatabaseRename {
                old_name: old_name.to_string(),
                new_name: new_name.to_string(),
            });
        }
        let (db, old_qualified) = self.qualify_function(old_name);

        self.metastore
            .functions
            .rename(&db, &old_name.name, &new_name.name)
            .await?;
        self.registry.drop_function(&old_qualified.unquoted_string());
        Ok(())
    }

    pub async fn get_function_metadata(
        &self,
        name: &FunctionIdentifier,
    ) -> CatalogResult<CatalogFunction> {
        let (db, _) = self.qualify_function(name);
        self.metastore.functions.get(&db, &name.name).await
    }

    /// Describe a function without materializing it, searching in the same order as
    /// `lookup_function`.
    pub async fn lookup_function_info(
        &self,
        name: &FunctionIdentifier,
    ) -> CatalogResult<FunctionInfo> {
        if name.database.is_none() {
            if let Some(info) = self.registry.lookup_function_info(&name.name) {
                return Ok(info);
            }
        }

        let (db, qualified) = self.qualify_function(name);
        let key = qualified.unquoted_string();
        if let Some(info) = self.registry.lookup_function_info(&key) {
            return Ok(info);
        }

        let definition = self.fetch_function(&db, &name.name).await?;
        Ok(FunctionInfo::new(definition.class_name, key))
    }

    /// Resolve a function call into an expression.
    ///
    /// An unqualified name that is registered as such (a built-in, a temporary function)
    /// wins. Otherwise the name is qualified with the current database and looked up in
    /// the registry under `db.name`. On a miss, the permanent function is fetched from
    /// the metastore, its resources are loaded and it is registered under `db.name`, so
    /// that the metastore is only consulted once per function and session.
    pub async fn lookup_function(
        &mut self,
        name: &FunctionIdentifier,
        args: Vec<Expr>,
    ) -> CatalogResult<Expr> {
        if name.database.is_none() && self.registry.function_exists(&name.name) {
            return self.registry.lookup_function(&name.name, args);
        }

        let (db, qualified) = self.qualify_function(name);
        let key = qualified.unquoted_string();
        if self.registry.function_exists(&key) {
            return self.registry.lookup_function(&key, args);
        }

        let definition = self.fetch_function(&db, &name.name).await?;
        self.load_function_resources(&definition.resources).await?;

        let builder = self
            .builder_factory
            .make_function_builder(&key, &definition.class_name)?;
        let info = FunctionInfo::new(definition.class_name, key.clone());
        self.create_temp_function(&key, info, builder, false)?;
        debug!("Materialized function {key} from the metastore");

        self.registry.lookup_function(&key, args)
    }

    pub async fn load_function_resources(
        &self,
        resources: &[FunctionResource],
    ) -> CatalogResult<()> {
        self.resource_loader.load_resources(resources).await
    }

    /// Register a session-local function. With `ignore_if_exists`, an existing function
    /// of the same name is replaced.
    pub fn create_temp_function(
        &mut self,
        name: &str,
        info: FunctionInfo,
        builder: FunctionBuilder,
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        if self.registry.function_exists(name) && !ignore_if_exists {
            return Err(CatalogError::TempFunctionAlreadyExists {
                name: name.to_string(),
            });
        }

        self.registry.register_function(name, info, builder);
        Ok(())
    }

    pub fn drop_temp_function(
        &mut self,
        name: &str,
        ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        if !self.registry.drop_function(name) && !ignore_if_not_exists {
            return Err(self.undefined_function(name));
        }
        Ok(())
    }

    /// Functions of `db` matching `pattern` (qualified), followed by the matching
    /// registry entries (unqualified, as registered).
    pub async fn list_functions(
        &self,
        db: &str,
        pattern: &str,
    ) -> CatalogResult<Vec<FunctionIdentifier>> {
        let mut functions: Vec<FunctionIdentifier> = self
            .metastore
            .functions
            .list(db, pattern)
            .await?
            .into_iter()
            .map(|f| FunctionIdentifier::with_database(f, db))
            .collect();

        functions.extend(
            filter_pattern(self.registry.list_functions(), pattern)
                .into_iter()
                .map(FunctionIdentifier::new),
        );

        Ok(functions)
    }
}
