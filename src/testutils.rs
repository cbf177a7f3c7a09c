use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};
use async_trait::async_trait;
use datafusion_expr::{lit, Expr, LogicalPlan, LogicalPlanBuilder};
use parking_lot::Mutex;

use crate::catalog::memory::MemoryStore;
use crate::catalog::metastore::Metastore;
use crate::catalog::{CatalogError, CatalogResult, FunctionStore};
use crate::config::schema::SessionCatalogConfig;
use crate::data_types::{CatalogFunction, CatalogTable, FunctionResource};
use crate::function::builtin::builtin_registry;
use crate::function::{
    FunctionBuilder, ObjectStoreResourceLoader, ResourceLoader, StaticBuilderFactory,
};
use crate::identifier::TableIdentifier;
use crate::session::SessionCatalog;

pub const ANSWER_CLASS: &str = "org.example.Answer";

pub fn answer_builder() -> FunctionBuilder {
    Arc::new(|_: Vec<Expr>| -> CatalogResult<Expr> { Ok(lit(42_i64)) })
}

pub fn test_builder_factory() -> StaticBuilderFactory {
    StaticBuilderFactory::default().with_class(ANSWER_CLASS, answer_builder())
}

pub fn plan() -> LogicalPlan {
    LogicalPlanBuilder::empty(false).build().unwrap()
}

pub fn int_table(identifier: TableIdentifier) -> CatalogTable {
    CatalogTable::new(
        identifier,
        Schema::new(vec![Field::new("value", DataType::Int64, true)]),
    )
}

pub fn partitioned_table(identifier: TableIdentifier) -> CatalogTable {
    CatalogTable::new(
        identifier,
        Schema::new(vec![
            Field::new("value", DataType::Int64, true),
            Field::new("year", DataType::Utf8, false),
            Field::new("month", DataType::Utf8, false),
        ]),
    )
    .with_partition_columns(&["year", "month"])
}

pub async fn in_memory_catalog_with(case_sensitive: bool) -> SessionCatalog {
    let mut config = SessionCatalogConfig::default();
    config.catalog.case_sensitive = case_sensitive;

    SessionCatalog::try_new(
        config,
        Metastore::new_in_memory(),
        Box::new(builtin_registry()),
        Arc::new(ObjectStoreResourceLoader::new()),
        Arc::new(test_builder_factory()),
    )
    .await
    .unwrap()
}

pub async fn in_memory_catalog() -> SessionCatalog {
    in_memory_catalog_with(false).await
}

/// Function store that counts how often definitions are fetched.
pub struct CountingFunctionStore {
    inner: Arc<MemoryStore>,
    pub gets: AtomicUsize,
}

impl CountingFunctionStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FunctionStore for CountingFunctionStore {
    async fn create(&self, database: &str, function: &CatalogFunction) -> CatalogResult<()> {
        FunctionStore::create(self.inner.as_ref(), database, function).await
    }

    async fn delete(&self, database: &str, name: &str) -> CatalogResult<()> {
        FunctionStore::delete(self.inner.as_ref(), database, name).await
    }

    async fn alter(&self, database: &str, function: &CatalogFunction) -> CatalogResult<()> {
        FunctionStore::alter(self.inner.as_ref(), database, function).await
    }

    async fn rename(
        &self,
        database: &str,
        old_name: &str,
        new_name: &str,
    ) -> CatalogResult<()> {
        FunctionStore::rename(self.inner.as_ref(), database, old_name, new_name).await
    }

    async fn get(&self, database: &str, name: &str) -> CatalogResult<CatalogFunction> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        FunctionStore::get(self.inner.as_ref(), database, name).await
    }

    async fn exists(&self, database: &str, name: &str) -> CatalogResult<bool> {
        FunctionStore::exists(self.inner.as_ref(), database, name).await
    }

    async fn list(&self, database: &str, pattern: &str) -> CatalogResult<Vec<String>> {
        FunctionStore::list(self.inner.as_ref(), database, pattern).await
    }
}

/// Resource loader that only records what it was asked to load. URIs starting with
/// `fail://` fail to load.
#[derive(Default)]
pub struct CountingResourceLoader {
    pub passes: AtomicUsize,
    pub clears: AtomicUsize,
    pub loaded: Mutex<Vec<String>>,
}

impl CountingResourceLoader {
    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceLoader for CountingResourceLoader {
    async fn load_resource(&self, resource: &FunctionResource) -> CatalogResult<()> {
        if resource.uri.starts_with("fail://") {
            return Err(CatalogError::ResourceLoad {
                uri: resource.uri.clone(),
                reason: "refused by test loader".to_string(),
            });
        }
        self.loaded.lock().push(resource.uri.clone());
        Ok(())
    }

    async fn load_resources(&self, resources: &[FunctionResource]) -> CatalogResult<()> {
        self.passes.fetch_add(1, Ordering::SeqCst);
        for resource in resources {
            self.load_resource(resource).await?;
        }
        Ok(())
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.loaded.lock().clear();
    }
}

/// An in-memory catalog whose function fetches and resource loads can be counted.
pub async fn counting_catalog() -> (
    SessionCatalog,
    Arc<CountingFunctionStore>,
    Arc<CountingResourceLoader>,
) {
    let store = Arc::new(MemoryStore::default());
    let functions = Arc::new(CountingFunctionStore {
        inner: store.clone(),
        gets: AtomicUsize::new(0),
    });
    let loader = Arc::new(CountingResourceLoader::default());

    let metastore = Metastore {
        functions: functions.clone(),
        ..Metastore::new_from_store(store)
    };

    let catalog = SessionCatalog::try_new(
        SessionCatalogConfig::default(),
        metastore,
        Box::new(builtin_registry()),
        loader.clone(),
        Arc::new(test_builder_factory()),
    )
    .await
    .unwrap();

    (catalog, functions, loader)
}
