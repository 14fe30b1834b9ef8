use super::{alpha_store, couch_fs};
use crate::codec;
use crate::memory::MemoryStore;
use crate::store::Response;
use crate::*;
use serde_json::json;

#[tokio::test]
async fn test_root_listing_and_attributes() -> Result<()> {
    let (fs, _) = couch_fs(MemoryStore::new().with_database("alpha", Vec::<String>::new()));

    assert_eq!(fs.list("/").await?, vec![".", "..", "alpha"]);

    let attrs = fs.describe("/").await?;
    assert_eq!(attrs.entry_type, EntryType::Directory);
    assert_eq!(attrs.nlink, 3);
    Ok(())
}

#[tokio::test]
async fn test_root_keeps_server_order() -> Result<()> {
    let (fs, _) = couch_fs(
        MemoryStore::new()
            .with_database("zulu", ["z"])
            .with_database("_users", ["u"])
            .with_database("alpha", ["a"]),
    );
    assert_eq!(fs.list("/").await?, vec![".", "..", "zulu", "_users", "alpha"]);
    Ok(())
}

#[tokio::test]
async fn test_database_listing_hides_design_documents() -> Result<()> {
    let (fs, _) = couch_fs(alpha_store());

    assert_eq!(fs.list("/alpha").await?, vec![".", "..", "doc1.json"]);

    let attrs = fs.describe("/alpha").await?;
    assert_eq!(attrs.entry_type, EntryType::Directory);
    assert_eq!(attrs.nlink, 2);
    assert_eq!(attrs.size, 4096);
    Ok(())
}

#[tokio::test]
async fn test_listed_names_round_trip_to_listed_ids() -> Result<()> {
    let ids = ["a", "b.json", "_design/x", "_local_like", "with space"];
    let (fs, store) = couch_fs(MemoryStore::new().with_database("db", ids));

    let listed = store.list_document_ids("db").await?;
    let names = fs.list("/db").await?;
    for name in &names[2..] {
        let id = codec::to_document_id(name);
        assert!(!codec::is_design_document(id));
        assert!(listed.iter().any(|x| x == id), "{id} not listed");
    }
    assert_eq!(names.len(), 2 + ids.len() - 1);
    Ok(())
}

#[tokio::test]
async fn test_read_document() -> Result<()> {
    let (fs, _) = couch_fs(alpha_store());
    let expected = "{\n  \"_id\": \"doc1\",\n  \"_rev\": \"1-abc\",\n  \"val\": 42\n}";

    let attrs = fs.describe("/alpha/doc1.json").await?;
    assert_eq!(attrs.entry_type, EntryType::File);
    assert_eq!(attrs.nlink, 1);
    assert_eq!(attrs.size, expected.len() as u64);

    assert_eq!(fs.read("/alpha/doc1.json", 0, 1000).await?, expected.as_bytes());
    Ok(())
}

#[tokio::test]
async fn test_size_equals_read_length() -> Result<()> {
    let (fs, _) = couch_fs(MemoryStore::new().with_document(
        "any",
        "multi",
        json!({"_id": "multi", "_rev": "3-f", "name": "日本語", "nested": {"list": [1, {"k": "v"}]}}),
    ));

    let attrs = fs.describe("/any/multi.json").await?;
    let content = fs.read("/any/multi.json", 0, u64::MAX).await?;
    assert_eq!(attrs.size, content.len() as u64);
    Ok(())
}

#[tokio::test]
async fn test_partial_reads() -> Result<()> {
    let (fs, _) = couch_fs(alpha_store());
    let content = fs.content("/alpha/doc1.json").await?;
    let len = content.len() as u64;

    assert_eq!(fs.read("/alpha/doc1.json", 2, 5).await?, &content[2..7]);
    assert!(fs.read("/alpha/doc1.json", len, 10).await?.is_empty());
    assert!(fs.read("/alpha/doc1.json", len + 100, 10).await?.is_empty());
    assert_eq!(fs.read("/alpha/doc1.json", len - 3, 10).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_document_is_not_found() {
    let (fs, _) = couch_fs(alpha_store());

    let err = fs.describe("/alpha/nothing.json").await.unwrap_err();
    assert!(err.is_not_found());

    let err = fs.read("/alpha/nothing.json", 0, 10).await.unwrap_err();
    assert!(err.is_not_found());

    let err = fs.list("/nothing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_reading_a_database_is_a_mismatch() {
    let (fs, _) = couch_fs(alpha_store());

    let err = fs.read("/alpha", 0, 1000).await.unwrap_err();
    assert!(matches!(err, Error::ClassificationMismatch { .. }));

    let err = fs.read("/", 0, 1000).await.unwrap_err();
    assert!(matches!(err, Error::ClassificationMismatch { .. }));
}

#[tokio::test]
async fn test_deep_paths_are_not_found() {
    let (fs, store) = couch_fs(alpha_store());

    let err = fs.describe("/alpha/doc1.json/extra").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.fetch_count(), 0);
}

#[tokio::test]
async fn test_document_is_fetched_inside_its_database() -> Result<()> {
    // Same id in two databases, plus a top-level object of that id
    let (fs, store) = couch_fs(
        alpha_store()
            .with_database("beta", ["doc1"])
            .with_document("beta", "doc1", json!({"_id": "doc1", "_rev": "2-b", "val": 7}))
            .with_object("doc1", json!({"_id": "doc1", "_rev": "9-top"})),
    );

    let alpha: serde_json::Value = serde_json::from_slice(&fs.content("/alpha/doc1.json").await?)?;
    let beta: serde_json::Value = serde_json::from_slice(&fs.content("/beta/doc1.json").await?)?;
    assert_eq!(alpha["_rev"], "1-abc");
    assert_eq!(beta["_rev"], "2-b");

    // A top-level object is never reached through a database directory
    let fetches = store.fetch_count();
    assert!(fs.describe("/gamma/doc1.json").await.unwrap_err().is_not_found());
    assert_eq!(store.fetch_count(), fetches + 1);
    Ok(())
}

#[tokio::test]
async fn test_document_read_skips_listing_check() -> Result<()> {
    // `stray` exists in beta but beta's listing does not name it; the file
    // is hidden from readdir yet readable by path.
    let (fs, _) = couch_fs(
        MemoryStore::new()
            .with_database("beta", Vec::<String>::new())
            .with_document("beta", "stray", json!({"_id": "stray", "_rev": "1-s"})),
    );

    assert_eq!(fs.list("/beta").await?, vec![".", ".."]);
    assert_eq!(fs.describe("/beta/stray.json").await?.entry_type, EntryType::File);
    assert!(!fs.read("/beta/stray.json", 0, 1000).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unsuffixed_file_name_resolves() -> Result<()> {
    let (fs, _) = couch_fs(alpha_store());
    assert_eq!(
        fs.read("/alpha/doc1", 0, 1000).await?,
        fs.read("/alpha/doc1.json", 0, 1000).await?
    );
    Ok(())
}

#[tokio::test]
async fn test_top_level_document() -> Result<()> {
    // A one-segment path whose name is a document id resolves to a file
    let (fs, _) = couch_fs(
        alpha_store().with_object("top", json!({"_id": "top", "_rev": "1-t"})),
    );

    let attrs = fs.describe("/top").await?;
    assert_eq!(attrs.entry_type, EntryType::File);
    assert_eq!(fs.list("/top").await?, vec![".", ".."]);

    // Documents of a database are not top-level objects
    assert!(fs.describe("/doc1").await.unwrap_err().is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_opaque_objects() -> Result<()> {
    let (fs, _) = couch_fs(
        MemoryStore::new()
            .with_object("welcome", json!({"couchdb": "Welcome", "version": "3.3.3"}))
            .with_response(Some("db"), "text", Response::ok("not json at all")),
    );

    for path in ["/welcome", "/db/text"] {
        let attrs = fs.describe(path).await?;
        assert_eq!(attrs.entry_type, EntryType::File);
        assert_eq!(attrs.size, 0);
        assert_eq!(fs.list(path).await?, vec![".", ".."]);
        assert!(matches!(
            fs.read(path, 0, 10).await.unwrap_err(),
            Error::ClassificationMismatch { .. }
        ));
    }
    Ok(())
}

#[tokio::test]
async fn test_unexpected_status_still_classifies_body() -> Result<()> {
    let (fs, _) = couch_fs(
        MemoryStore::new()
            .with_response(
                Some("db"),
                "stale",
                Response::new(203, r#"{"_id":"stale","_rev":"7-z"}"#),
            )
            .with_response(
                None,
                "denied",
                Response::new(401, r#"{"error":"unauthorized","reason":"You are not a server admin."}"#),
            ),
    );

    assert_eq!(fs.describe("/db/stale.json").await?.entry_type, EntryType::File);
    assert!(!fs.read("/db/stale.json", 0, 100).await?.is_empty());

    let attrs = fs.describe("/denied").await?;
    assert_eq!(attrs.size, 0);
    Ok(())
}

#[tokio::test]
async fn test_store_failure_is_not_not_found() {
    // `ghost` has a descriptor but no listing in the store
    let store = MemoryStore::new().with_object(
        "ghost",
        json!({"db_name": "ghost", "update_seq": "1-a"}),
    );
    let (fs, _) = couch_fs(store);

    let err = fs.list("/ghost").await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn test_listing_uses_descriptor_name() -> Result<()> {
    // The directory name and the descriptor's db_name can differ; the
    // listing follows db_name.
    let store = MemoryStore::new()
        .with_database("real", ["r1"])
        .with_object("alias", json!({"db_name": "real", "update_seq": "1-a"}));
    let (fs, _) = couch_fs(store);

    assert_eq!(fs.list("/alias").await?, vec![".", "..", "r1.json"]);
    Ok(())
}
