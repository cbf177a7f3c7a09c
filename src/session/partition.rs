use crate::catalog::CatalogResult;
use crate::data_types::{CatalogTablePartition, TablePartitionSpec};
use crate::identifier::TableIdentifier;
use crate::session::SessionCatalog;

// Partitions only exist in the metastore; these qualify the table name and pass through.

impl SessionCatalog {
    pub async fn create_partitions(
        &self,
        table: &TableIdentifier,
        partitions: &[CatalogTablePartition],
        ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(table);
        self.metastore
            .partitions
            .create(&db, &table, partitions, ignore_if_exists)
            .await
    }

    pub async fn drop_partitions(
        &self,
        table: &TableIdentifier,
        specs: &[TablePartitionSpec],
        ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(table);
        self.metastore
            .partitions
            .delete(&db, &table, specs, ignore_if_not_exists)
            .await
    }

    /// Rename partitions pairwise: `specs[i]` becomes `new_specs[i]`.
    pub async fn rename_partitions(
        &self,
        table: &TableIdentifier,
        specs: &[TablePartitionSpec],
        new_specs: &[TablePartitionSpec],
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(table);
        self.metastore
            .partitions
            .rename(&db, &table, specs, new_specs)
            .await
    }

    pub async fn alter_partitions(
        &self,
        table: &TableIdentifier,
        partitions: &[CatalogTablePartition],
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(table);
        self.metastore
            .partitions
            .alter(&db, &table, partitions)
            .await
    }

    pub async fn get_partition(
        &self,
        table: &TableIdentifier,
        spec: &TablePartitionSpec,
    ) -> CatalogResult<CatalogTablePartition> {
        let (db, table) = self.qualify_table(table);
        self.metastore.partitions.get(&db, &table, spec).await
    }

    /// Partitions of a table. A partial spec only constrains the columns it names.
    pub async fn list_partitions(
        &self,
        table: &TableIdentifier,
        partial_spec: Option<&TablePartitionSpec>,
    ) -> CatalogResult<Vec<CatalogTablePartition>> {
        let (db, table) = self.qualify_table(table);
        self.metastore
            .partitions
            .list(&db, &table, partial_spec)
            .await
    }

    pub async fn load_partition(
        &self,
        table: &TableIdentifier,
        load_path: &str,
        spec: &TablePartitionSpec,
        overwrite: bool,
    ) -> CatalogResult<()> {
        let (db, table) = self.qualify_table(table);
        self.metastore
            .partitions
            .load(&db, &table, load_path, spec, overwrite)
            .await
    }
}
