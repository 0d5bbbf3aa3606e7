use crate::core::interfaces::FileSystemService;
use crate::utils::{BuildModeError, Result};
use std::path::Path;
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).await
            .map_err(BuildModeError::Io)
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<u64> {
        if let Some(parent) = to.parent() {
            self.create_directory(parent).await?;
        }

        fs::copy(from, to).await
            .map_err(BuildModeError::Io)
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await
            .map_err(BuildModeError::Io)
    }

    async fn remove_directory(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuildModeError::Io(e)),
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
