use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};
use async_trait::async_trait;
use datafusion_expr::{lit, Expr, LogicalPlan, LogicalPlanBuilder};
use rstest::fixture;

use session_catalog::catalog::metastore::Metastore;
use session_catalog::catalog::CatalogResult;
use session_catalog::config::schema::SessionCatalogConfig;
use session_catalog::data_types::{CatalogTable, FunctionResource};
use session_catalog::function::builtin::builtin_registry;
use session_catalog::function::{ResourceLoader, StaticBuilderFactory};
use session_catalog::identifier::TableIdentifier;
use session_catalog::SessionCatalog;

mod functions;
mod reset;
mod tables;

const ANSWER_CLASS: &str = "org.example.Answer";

/// Counts resource-loading passes instead of fetching anything.
#[derive(Default)]
struct PassCounter {
    passes: AtomicUsize,
}

#[async_trait]
impl ResourceLoader for PassCounter {
    async fn load_resource(&self, _resource: &FunctionResource) -> CatalogResult<()> {
        Ok(())
    }

    async fn load_resources(&self, _resources: &[FunctionResource]) -> CatalogResult<()> {
        self.passes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestCatalog {
    catalog: SessionCatalog,
    loader: Arc<PassCounter>,
}

impl TestCatalog {
    fn load_passes(&self) -> usize {
        self.loader.passes.load(Ordering::SeqCst)
    }
}

#[fixture]
async fn test_catalog() -> TestCatalog {
    let loader = Arc::new(PassCounter::default());
    let factory = StaticBuilderFactory::default().with_class(
        ANSWER_CLASS,
        Arc::new(|_: Vec<Expr>| -> CatalogResult<Expr> { Ok(lit(42_i64)) }),
    );

    let catalog = SessionCatalog::try_new(
        SessionCatalogConfig::default(),
        Metastore::new_in_memory(),
        Box::new(builtin_registry()),
        loader.clone(),
        Arc::new(factory),
    )
    .await
    .unwrap();

    TestCatalog { catalog, loader }
}

fn empty_plan() -> LogicalPlan {
    LogicalPlanBuilder::empty(false).build().unwrap()
}

fn table(identifier: TableIdentifier) -> CatalogTable {
    CatalogTable::new(
        identifier,
        Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]),
    )
}
