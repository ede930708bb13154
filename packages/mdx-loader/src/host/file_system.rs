use async_trait::async_trait;
use std::io;
use std::path::Path;

/// The file operations the loader performs.
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// File system backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFileSystem;

impl DiskFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for DiskFileSystem {
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}
