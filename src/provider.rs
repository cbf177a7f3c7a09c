use std::any::Any;
use std::sync::Arc;

use arrow_schema::SchemaRef;
use datafusion_common::TableReference;
use datafusion_expr::{LogicalPlan, LogicalPlanBuilder, TableSource, TableType};

use crate::catalog::CatalogResult;
use crate::data_types::{CatalogTable, CatalogTableType};

/// A table fetched from the metastore, as seen by the planner. It only carries metadata;
/// turning it into an executable scan is the business of the layers above.
#[derive(Debug, Clone)]
pub struct MetastoreRelation {
    pub database: String,
    pub table: CatalogTable,
}

impl MetastoreRelation {
    pub fn new(database: impl Into<String>, table: CatalogTable) -> Self {
        Self {
            database: database.into(),
            table,
        }
    }

    /// Scan of this relation under its `database.table` reference.
    pub fn into_plan(self) -> CatalogResult<LogicalPlan> {
        let reference =
            TableReference::partial(self.database.clone(), self.table.identifier.table.clone());

        Ok(LogicalPlanBuilder::scan(reference, Arc::new(self), None)?.build()?)
    }
}

impl TableSource for MetastoreRelation {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn schema(&self) -> SchemaRef {
        self.table.schema.clone()
    }

    fn table_type(&self) -> TableType {
        match self.table.table_type {
            CatalogTableType::View => TableType::View,
            CatalogTableType::Managed | CatalogTableType::External => TableType::Base,
        }
    }
}
