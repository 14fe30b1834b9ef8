mod scenarios;

use crate::memory::MemoryStore;
use crate::fs::CouchFs;
use serde_json::json;
use std::sync::Arc;

/// Server with one database `alpha` holding `doc1` and a design document
pub(crate) fn alpha_store() -> MemoryStore {
    MemoryStore::new()
        .with_database("alpha", ["doc1", "_design/view1"])
        .with_document("alpha", "doc1", json!({"_id": "doc1", "_rev": "1-abc", "val": 42}))
        .with_document(
            "alpha",
            "_design/view1",
            json!({"_id": "_design/view1", "_rev": "1-d", "views": {}}),
        )
}

pub(crate) fn couch_fs(store: MemoryStore) -> (CouchFs, Arc<MemoryStore>) {
    let store = Arc::new(store);
    (CouchFs::new(store.clone()), store)
}
