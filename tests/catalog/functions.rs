use datafusion_expr::{col, lit};
use rstest::rstest;

use session_catalog::catalog::CatalogError;
use session_catalog::data_types::CatalogFunction;
use session_catalog::identifier::FunctionIdentifier;

use crate::catalog::{test_catalog, TestCatalog, ANSWER_CLASS};

#[rstest]
#[tokio::test]
async fn test_permanent_function_loads_once(#[future] test_catalog: TestCatalog) {
    let mut test_catalog = test_catalog.await;
    let f = FunctionIdentifier::with_database("f", "default");

    test_catalog
        .catalog
        .create_function(&CatalogFunction::new(f.clone(), ANSWER_CLASS), false)
        .await
        .unwrap();
    assert!(test_catalog.catalog.function_exists(&f).await.unwrap());

    for name in [f.clone(), FunctionIdentifier::new("f"), f] {
        assert_eq!(
            test_catalog
                .catalog
                .lookup_function(&name, vec![col("x")])
                .await
                .unwrap(),
            lit(42_i64)
        );
    }
    assert_eq!(test_catalog.load_passes(), 1);
}

#[rstest]
#[tokio::test]
async fn test_missing_function_is_undefined(#[future] test_catalog: TestCatalog) {
    let mut catalog = test_catalog.await.catalog;

    let err = catalog
        .lookup_function(&FunctionIdentifier::new("missing"), vec![])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Undefined function: \"missing\". This function is neither a registered temporary \
         function nor a permanent function registered in the database \"default\""
    );

    let err = catalog
        .drop_function(&FunctionIdentifier::new("missing"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::UndefinedFunction { .. }));
}
