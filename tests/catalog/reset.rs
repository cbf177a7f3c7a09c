use std::sync::Arc;

use datafusion_expr::{lit, Expr};
use rstest::rstest;

use session_catalog::catalog::CatalogResult;
use session_catalog::data_types::{CatalogDatabase, CatalogFunction};
use session_catalog::function::builtin::BUILTIN_FUNCTIONS;
use session_catalog::function::{FunctionInfo, FunctionRegistry};
use session_catalog::identifier::{FunctionIdentifier, TableIdentifier};
use session_catalog::utils::MATCH_ALL;

use crate::catalog::{empty_plan, table, test_catalog, TestCatalog, ANSWER_CLASS};

#[rstest]
#[tokio::test]
async fn test_reset_restores_pristine_state(#[future] test_catalog: TestCatalog) {
    let mut catalog = test_catalog.await.catalog;

    catalog
        .create_database(&CatalogDatabase::new("db1"), false)
        .await
        .unwrap();
    catalog
        .create_table(&table(TableIdentifier::with_database("t", "db1")), false)
        .await
        .unwrap();
    catalog
        .create_table(&table(TableIdentifier::new("t")), false)
        .await
        .unwrap();
    catalog.create_temp_table("tmp", empty_plan(), false).unwrap();

    // A materialized permanent function, a plain one and a temporary one
    for name in ["f", "g"] {
        catalog
            .create_function(
                &CatalogFunction::new(FunctionIdentifier::new(name), ANSWER_CLASS),
                false,
            )
            .await
            .unwrap();
    }
    catalog
        .lookup_function(&FunctionIdentifier::new("f"), vec![])
        .await
        .unwrap();
    catalog
        .create_temp_function(
            "temp_fn",
            FunctionInfo::new("Temp", "temp_fn"),
            Arc::new(|_: Vec<Expr>| -> CatalogResult<Expr> { Ok(lit(0)) }),
            false,
        )
        .unwrap();
    // Built-ins can be shadowed and are restored too
    catalog.drop_temp_function("abs", false).unwrap();

    catalog.set_current_database("db1").await.unwrap();
    catalog.reset().await.unwrap();

    assert_eq!(catalog.current_database(), "default");
    assert_eq!(
        catalog.list_databases(MATCH_ALL).await.unwrap(),
        vec!["default".to_string()]
    );
    assert!(catalog
        .list_tables("default", MATCH_ALL)
        .await
        .unwrap()
        .is_empty());

    let functions = catalog.list_functions("default", MATCH_ALL).await.unwrap();
    let builtins: Vec<FunctionIdentifier> = BUILTIN_FUNCTIONS
        .list_functions()
        .into_iter()
        .map(FunctionIdentifier::new)
        .collect();
    assert_eq!(functions, builtins);
}
