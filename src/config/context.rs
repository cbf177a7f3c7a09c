use std::sync::Arc;

use crate::catalog::metastore::Metastore;
use crate::catalog::CatalogResult;
use crate::function::builtin::builtin_registry;
use crate::function::{ObjectStoreResourceLoader, UnsupportedBuilderFactory};
use crate::session::SessionCatalog;

use super::schema;

fn build_metastore(_config: &schema::SessionCatalogConfig) -> Metastore {
    Metastore::new_in_memory()
}

/// Build a session catalog with the stock collaborators: an in-memory metastore, the
/// built-in functions, an `object_store` resource loader and no support for building
/// permanent functions from class names.
pub async fn build_session_catalog(
    config: schema::SessionCatalogConfig,
) -> CatalogResult<SessionCatalog> {
    let metastore = build_metastore(&config);

    SessionCatalog::try_new(
        config,
        metastore,
        Box::new(builtin_registry()),
        Arc::new(ObjectStoreResourceLoader::new()),
        Arc::new(UnsupportedBuilderFactory),
    )
    .await
}
