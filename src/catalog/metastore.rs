use crate::catalog::memory::MemoryStore;
use crate::catalog::{DatabaseStore, FunctionStore, PartitionStore, TableStore};
use std::sync::Arc;

// This is the durable side of the session catalog: one handle per object type. Each of
// them may be backed by a different implementation (and be arbitrarily slow), the
// session catalog only relies on the store traits.
#[derive(Clone)]
pub struct Metastore {
    pub databases: Arc<dyn DatabaseStore>,
    pub tables: Arc<dyn TableStore>,
    pub partitions: Arc<dyn PartitionStore>,
    pub functions: Arc<dyn FunctionStore>,
}

impl Metastore {
    pub fn new_from_store<S>(store: Arc<S>) -> Self
    where
        S: DatabaseStore + TableStore + PartitionStore + FunctionStore + 'static,
    {
        Self {
            databases: store.clone(),
            tables: store.clone(),
            partitions: store.clone(),
            functions: store,
        }
    }

    pub fn new_in_memory() -> Self {
        Self::new_from_store(Arc::new(MemoryStore::default()))
    }
}
