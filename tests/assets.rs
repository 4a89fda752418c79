use flightboard::assets::{content_type, AssetError, AssetStore, DirAssetStore};
use std::path::Path;

fn store() -> (tempfile::TempDir, DirAssetStore) {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir_all(public.join("css")).unwrap();
    std::fs::write(public.join("index.html"), "<h1>board</h1>").unwrap();
    std::fs::write(public.join("css").join("board.css"), "body{}").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
    let store = DirAssetStore::new(public);
    (dir, store)
}

#[test]
fn dir_asset_store_load_test() {
    let (_dir, store) = store();
    let asset = store.load("/index.html").unwrap();
    assert_eq!(asset.content_type, "text/html");
    assert_eq!(asset.bytes, b"<h1>board</h1>".to_vec());
    let asset = store.load("/css/board.css").unwrap();
    assert_eq!(asset.content_type, "text/css");
}

#[test]
fn dir_asset_store_not_found_test() {
    let (_dir, store) = store();
    assert!(matches!(store.load("/missing.js"), Err(AssetError::NotFound(_))));
    assert!(matches!(store.load("/css"), Err(AssetError::NotFound(_))));
    assert!(matches!(store.load("/"), Err(AssetError::NotFound(_))));
}

#[test]
fn dir_asset_store_traversal_test() {
    let (_dir, store) = store();
    assert!(matches!(store.load("/../secret.txt"), Err(AssetError::NotFound(_))));
    assert!(matches!(store.load("/css/../../secret.txt"), Err(AssetError::NotFound(_))));
}

#[test]
fn content_type_test() {
    assert_eq!(content_type(Path::new("a/app.js")), "application/javascript");
    assert_eq!(content_type(Path::new("data.JSON")), "application/json");
    assert_eq!(content_type(Path::new("logo.svg")), "image/svg+xml");
    assert_eq!(content_type(Path::new("notes.txt")), "text/plain");
    assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
}
