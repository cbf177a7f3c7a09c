use crate::data_types::{
    CatalogDatabase, CatalogFunction, CatalogTable, CatalogTablePartition,
    TablePartitionSpec,
};
use async_trait::async_trait;
use datafusion_common::DataFusionError;

pub mod memory;
pub mod metastore;

pub const DEFAULT_DB: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{reason}")]
    Generic { reason: String },

    // Database errors
    #[error("Database {name:?} doesn't exist")]
    NoSuchDatabase { name: String },

    #[error("Database {name:?} already exists")]
    DatabaseAlreadyExists { name: String },

    #[error("Database {name:?} is not empty; drop it with CASCADE")]
    DatabaseNotEmpty { name: String },

    #[error("Can not drop the default database")]
    CannotDropDefaultDatabase,

    // Table errors
    #[error("Table {name:?} doesn't exist in database {database:?}")]
    NoSuchTable { database: String, name: String },

    #[error("Table {name:?} already exists in database {database:?}")]
    TableAlreadyExists { database: String, name: String },

    #[error("Temporary table {name:?} already exists")]
    TempTableAlreadyExists { name: String },

    #[error("Can not rename {old_name} to {new_name}: both names must refer to the same database")]
    CrossDatabaseRename { old_name: String, new_name: String },

    // Partition errors
    #[error("Partition {spec:?} doesn't exist in table {database}.{table}")]
    NoSuchPartition {
        database: String,
        table: String,
        spec: TablePartitionSpec,
    },

    #[error("Partition {spec:?} already exists in table {database}.{table}")]
    PartitionAlreadyExists {
        database: String,
        table: String,
        spec: TablePartitionSpec,
    },

    #[error("Partition spec {spec:?} doesn't match the partition columns of {table}")]
    InvalidPartitionSpec {
        table: String,
        spec: TablePartitionSpec,
    },

    // Function errors
    #[error("Function {name:?} already exists in database {database:?}")]
    FunctionAlreadyExists { database: String, name: String },

    #[error("Temporary function {name:?} already exists")]
    TempFunctionAlreadyExists { name: String },

    #[error("Function {name:?} doesn't exist in database {database:?}")]
    NoSuchFunction { database: String, name: String },

    #[error(
        "Undefined function: {name:?}. This function is neither a registered temporary function nor a permanent function registered in the database {database:?}"
    )]
    UndefinedFunction { database: String, name: String },

    #[error("Invalid arguments for function {name:?}: {reason}")]
    InvalidArguments { name: String, reason: String },

    #[error("Failed loading resource {uri:?}: {reason}")]
    ResourceLoad { uri: String, reason: String },

    // Operations this layer deliberately refuses
    #[error("Unsupported operation: {reason}")]
    Unsupported { reason: String },

    #[error("Catalog method not implemented: {reason}")]
    NotImplemented { reason: String },

    #[error(transparent)]
    ObjectStoreError(#[from] object_store::Error),

    #[error("Failed parsing URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    DataFusionError(#[from] DataFusionError),
}

/// Implement a global converter into a DataFusionError from the catalog error type,
/// so that planning code can use the ? operator on catalog calls.
impl From<CatalogError> for DataFusionError {
    fn from(val: CatalogError) -> Self {
        match val {
            CatalogError::NotImplemented { reason } => {
                DataFusionError::NotImplemented(reason)
            }
            CatalogError::DataFusionError(e) => e,
            _ => DataFusionError::Plan(val.to_string()),
        }
    }
}

pub(crate) fn not_impl<T>() -> CatalogResult<T> {
    Err(CatalogError::NotImplemented {
        reason: "Metastore method not supported".to_string(),
    })
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[async_trait]
pub trait DatabaseStore: Sync + Send {
    async fn create(
        &self,
        _database: &CatalogDatabase,
        _ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn delete(
        &self,
        _name: &str,
        _ignore_if_not_exists: bool,
        _cascade: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn alter(&self, _database: &CatalogDatabase) -> CatalogResult<()> {
        not_impl()
    }

    async fn get(&self, _name: &str) -> CatalogResult<CatalogDatabase> {
        not_impl()
    }

    async fn exists(&self, _name: &str) -> CatalogResult<bool> {
        not_impl()
    }

    async fn list(&self, _pattern: &str) -> CatalogResult<Vec<String>> {
        not_impl()
    }
}

#[async_trait]
pub trait TableStore: Sync + Send {
    async fn create(
        &self,
        _database: &str,
        _table: &CatalogTable,
        _ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn delete(
        &self,
        _database: &str,
        _table: &str,
        _ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn rename(
        &self,
        _database: &str,
        _old_name: &str,
        _new_name: &str,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn alter(&self, _database: &str, _table: &CatalogTable) -> CatalogResult<()> {
        not_impl()
    }

    async fn get(&self, _database: &str, _table: &str) -> CatalogResult<CatalogTable> {
        not_impl()
    }

    async fn exists(&self, _database: &str, _table: &str) -> CatalogResult<bool> {
        not_impl()
    }

    async fn list(&self, _database: &str, _pattern: &str) -> CatalogResult<Vec<String>> {
        not_impl()
    }

    async fn load(
        &self,
        _database: &str,
        _table: &str,
        _load_path: &str,
        _overwrite: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }
}

#[async_trait]
pub trait PartitionStore: Sync + Send {
    async fn create(
        &self,
        _database: &str,
        _table: &str,
        _partitions: &[CatalogTablePartition],
        _ignore_if_exists: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn delete(
        &self,
        _database: &str,
        _table: &str,
        _specs: &[TablePartitionSpec],
        _ignore_if_not_exists: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn rename(
        &self,
        _database: &str,
        _table: &str,
        _specs: &[TablePartitionSpec],
        _new_specs: &[TablePartitionSpec],
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn alter(
        &self,
        _database: &str,
        _table: &str,
        _partitions: &[CatalogTablePartition],
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn get(
        &self,
        _database: &str,
        _table: &str,
        _spec: &TablePartitionSpec,
    ) -> CatalogResult<CatalogTablePartition> {
        not_impl()
    }

    async fn list(
        &self,
        _database: &str,
        _table: &str,
        _partial_spec: Option<&TablePartitionSpec>,
    ) -> CatalogResult<Vec<CatalogTablePartition>> {
        not_impl()
    }

    async fn load(
        &self,
        _database: &str,
        _table: &str,
        _load_path: &str,
        _spec: &TablePartitionSpec,
        _overwrite: bool,
    ) -> CatalogResult<()> {
        not_impl()
    }
}

#[async_trait]
pub trait FunctionStore: Sync + Send {
    async fn create(
        &self,
        _database: &str,
        _function: &CatalogFunction,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn delete(&self, _database: &str, _name: &str) -> CatalogResult<()> {
        not_impl()
    }

    async fn alter(
        &self,
        _database: &str,
        _function: &CatalogFunction,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn rename(
        &self,
        _database: &str,
        _old_name: &str,
        _new_name: &str,
    ) -> CatalogResult<()> {
        not_impl()
    }

    async fn get(&self, _database: &str, _name: &str) -> CatalogResult<CatalogFunction> {
        not_impl()
    }

    async fn exists(&self, _database: &str, _name: &str) -> CatalogResult<bool> {
        not_impl()
    }

    async fn list(&self, _database: &str, _pattern: &str) -> CatalogResult<Vec<String>> {
        not_impl()
    }
}
