//! Disk File System Tests

use gatsby_mdx_loader::host::{DiskFileSystem, FileSystem};
use std::fs;

#[tokio::test]
async fn should_read_and_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wrapper.js");
    fs::write(&path, "// gatsby-mdx wrapper").unwrap();

    let file_system = DiskFileSystem::new();
    assert_eq!(
        file_system.read_to_string(&path).await.unwrap(),
        "// gatsby-mdx wrapper"
    );

    file_system
        .write(&path, "// gatsby-mdx wrapper\n// hash abc")
        .await
        .unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "// gatsby-mdx wrapper\n// hash abc"
    );
}

#[tokio::test]
async fn should_report_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = DiskFileSystem::new()
        .read_to_string(&dir.path().join("missing.mdx"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[tokio::test]
async fn should_replace_invalid_utf8_when_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post.mdx");
    fs::write(&path, b"# Caf\xe9\n\nexport const a = 1;\n").unwrap();

    let contents = DiskFileSystem::new().read_to_string(&path).await.unwrap();
    assert_eq!(contents, "# Caf\u{FFFD}\n\nexport const a = 1;\n");
}
