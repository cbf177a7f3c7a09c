use rstest::rstest;

use session_catalog::catalog::CatalogError;
use session_catalog::data_types::CatalogDatabase;
use session_catalog::identifier::TableIdentifier;
use session_catalog::utils::MATCH_ALL;

use crate::catalog::{empty_plan, table, test_catalog, TestCatalog};

#[rstest]
#[tokio::test]
async fn test_temp_table_create_drop(#[future] test_catalog: TestCatalog) {
    let mut catalog = test_catalog.await.catalog;
    let t = TableIdentifier::new("t");

    assert!(catalog.database_exists("default").await.unwrap());

    catalog.create_temp_table("t", empty_plan(), false).unwrap();
    assert!(catalog.table_exists(&t).await.unwrap());
    assert!(catalog.is_temporary_table(&t));

    catalog.drop_table(&t, false).await.unwrap();
    assert!(!catalog.table_exists(&t).await.unwrap());

    // Dropping it again only logs
    catalog.drop_table(&t, false).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn test_unqualified_names_follow_current_database(
    #[future] test_catalog: TestCatalog,
) {
    let mut catalog = test_catalog.await.catalog;
    for db in ["db1", "db2"] {
        catalog
            .create_database(&CatalogDatabase::new(db), false)
            .await
            .unwrap();
        catalog
            .create_table(&table(TableIdentifier::with_database("t", db)), false)
            .await
            .unwrap();
    }
    catalog
        .create_table(&table(TableIdentifier::with_database("only_in_1", "db1")), false)
        .await
        .unwrap();

    catalog.set_current_database("db1").await.unwrap();
    assert!(catalog
        .table_exists(&TableIdentifier::new("only_in_1"))
        .await
        .unwrap());

    catalog.set_current_database("db2").await.unwrap();
    assert!(!catalog
        .table_exists(&TableIdentifier::new("only_in_1"))
        .await
        .unwrap());
    assert_eq!(
        catalog
            .get_table_metadata(&TableIdentifier::new("T"))
            .await
            .unwrap()
            .identifier,
        TableIdentifier::with_database("t", "db2")
    );

    let err = catalog
        .drop_database("db1", false, false)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DatabaseNotEmpty { .. }));
    catalog.drop_database("db1", false, true).await.unwrap();
    assert_eq!(
        catalog.list_databases(MATCH_ALL).await.unwrap(),
        vec!["db2".to_string(), "default".to_string()]
    );
}

#[rstest]
#[tokio::test]
async fn test_rename_temp_table_across_databases_fails(
    #[future] test_catalog: TestCatalog,
) {
    let mut catalog = test_catalog.await.catalog;
    catalog.create_temp_table("t1", empty_plan(), false).unwrap();

    let err = catalog
        .rename_table(
            &TableIdentifier::with_database("t1", "db1"),
            &TableIdentifier::with_database("t2", "db2"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CrossDatabaseRename { .. }));

    catalog
        .rename_table(&TableIdentifier::new("t1"), &TableIdentifier::new("t2"))
        .await
        .unwrap();
    assert!(catalog.is_temporary_table(&TableIdentifier::new("t2")));
    assert!(!catalog.is_temporary_table(&TableIdentifier::with_database("t2", "default")));
}

#[rstest]
#[tokio::test]
async fn test_list_tables_mixes_both_namespaces(#[future] test_catalog: TestCatalog) {
    let mut catalog = test_catalog.await.catalog;
    catalog
        .create_table(&table(TableIdentifier::new("orders")), false)
        .await
        .unwrap();
    catalog
        .create_temp_table("orders_tmp", empty_plan(), false)
        .unwrap();

    assert_eq!(
        catalog.list_tables("default", "orders*").await.unwrap(),
        vec![
            TableIdentifier::with_database("orders", "default"),
            TableIdentifier::new("orders_tmp"),
        ]
    );
}
