use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use arrow_schema::{Schema, SchemaRef};
use strum_macros::{Display, EnumString};

use crate::identifier::{FunctionIdentifier, TableIdentifier};

/// Partition column name -> value. Ordered so that specs can key maps and print stably.
pub type TablePartitionSpec = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDatabase {
    pub name: String,
    pub description: String,
    pub location_uri: String,
    pub properties: HashMap<String, String>,
}

impl CatalogDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            location_uri: String::new(),
            properties: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogTableType {
    Managed,
    External,
    View,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTable {
    pub identifier: TableIdentifier,
    pub table_type: CatalogTableType,
    pub schema: SchemaRef,
    pub partition_columns: Vec<String>,
    pub location: Option<String>,
    pub view_text: Option<String>,
    pub properties: HashMap<String, String>,
}

impl CatalogTable {
    pub fn new(identifier: TableIdentifier, schema: Schema) -> Self {
        Self {
            identifier,
            table_type: CatalogTableType::Managed,
            schema: Arc::new(schema),
            partition_columns: vec![],
            location: None,
            view_text: None,
            properties: HashMap::new(),
        }
    }

    pub fn with_partition_columns(mut self, columns: &[&str]) -> Self {
        self.partition_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Database the table lives in. Only meaningful once the session catalog has
    /// qualified the identifier.
    pub fn database(&self) -> &str {
        self.identifier.database.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTablePartition {
    pub spec: TablePartitionSpec,
    pub location: Option<String>,
    pub parameters: HashMap<String, String>,
}

impl CatalogTablePartition {
    pub fn new(spec: TablePartitionSpec) -> Self {
        Self {
            spec,
            location: None,
            parameters: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FunctionResourceType {
    Jar,
    File,
    Archive,
}

/// A code artifact that must be loaded before a permanent function can be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResource {
    pub resource_type: FunctionResourceType,
    pub uri: String,
}

impl FunctionResource {
    pub fn new(resource_type: FunctionResourceType, uri: impl Into<String>) -> Self {
        Self {
            resource_type,
            uri: uri.into(),
        }
    }
}

/// A permanent function as stored in the metastore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFunction {
    pub identifier: FunctionIdentifier,
    pub class_name: String,
    pub resources: Vec<FunctionResource>,
}

impl CatalogFunction {
    pub fn new(identifier: FunctionIdentifier, class_name: impl Into<String>) -> Self {
        Self {
            identifier,
            class_name: class_name.into(),
            resources: vec![],
        }
    }

    pub fn with_resources(mut self, resources: Vec<FunctionResource>) -> Self {
        self.resources = resources;
        self
    }
}
