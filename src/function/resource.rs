use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tracing::debug;
use url::Url;

use crate::catalog::{CatalogError, CatalogResult};
use crate::data_types::{FunctionResource, FunctionResourceType};

/// Makes the code artifacts of a permanent function available before it is built.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load_resource(&self, resource: &FunctionResource) -> CatalogResult<()>;

    /// Load every resource of one function, stopping at the first failure.
    async fn load_resources(&self, resources: &[FunctionResource]) -> CatalogResult<()> {
        for resource in resources {
            self.load_resource(resource).await?;
        }
        Ok(())
    }

    /// Forget whatever has been loaded so far.
    fn clear(&self) {}
}

// Accept both URLs and bare local paths, since function definitions carry whatever
// the user typed in.
fn resource_url(uri: &str) -> CatalogResult<Url> {
    match Url::parse(uri) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = std::env::current_dir()
                .map_err(|e| CatalogError::ResourceLoad {
                    uri: uri.to_string(),
                    reason: e.to_string(),
                })?
                .join(uri);
            Url::from_file_path(&path).map_err(|_| CatalogError::ResourceLoad {
                uri: uri.to_string(),
                reason: format!("{} is not a valid file path", path.display()),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetches resources through `object_store` and keeps their contents until the loader
/// is cleared, keyed by the URI they were declared with.
#[derive(Default)]
pub struct ObjectStoreResourceLoader {
    loaded: Mutex<HashMap<String, Bytes>>,
}

impl ObjectStoreResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded_resource(&self, uri: &str) -> Option<Bytes> {
        self.loaded.lock().get(uri).cloned()
    }
}

#[async_trait]
impl ResourceLoader for ObjectStoreResourceLoader {
    async fn load_resource(&self, resource: &FunctionResource) -> CatalogResult<()> {
        if resource.resource_type == FunctionResourceType::Archive {
            return Err(CatalogError::Unsupported {
                reason: format!(
                    "Archive {:?} can not be loaded into a session",
                    resource.uri
                ),
            });
        }

        let url = resource_url(&resource.uri)?;
        let (store, path) = object_store::parse_url(&url)?;
        let contents = store.get(&path).await?.bytes().await?;

        debug!(
            "Loaded {} resource {} ({} bytes)",
            resource.resource_type,
            resource.uri,
            contents.len()
        );
        self.loaded.lock().insert(resource.uri.clone(), contents);

        Ok(())
    }

    fn clear(&self) {
        self.loaded.lock().clear();
    }
}
