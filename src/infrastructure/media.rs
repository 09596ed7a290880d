//! アップロード画像のファイルシステム保存

use crate::domain::artwork::repositories::{ImageStore, RepositoryError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// アップロードディレクトリ配下に画像を保存するストア
pub struct FileImageStore {
    root: PathBuf,
}

impl FileImageStore {
    /// 保存先ディレクトリを作成してストアを開く
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            RepositoryError::storage(format!(
                "Failed to create uploads directory {}: {}",
                root.display(),
                e
            ))
        })?;
        info!("画像ストアを開く: {}", root.display());
        Ok(Self { root })
    }

    /// ファイル名を検証して保存先パスを組み立てる
    ///
    /// パス区切りや ".." を含む名前はディレクトリの外に出るため拒否する。
    fn resolve(&self, file_name: &str) -> Result<PathBuf, RepositoryError> {
        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..")
        {
            return Err(RepositoryError::invalid_operation(format!(
                "Invalid image file name: {file_name}"
            )));
        }
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<(), RepositoryError> {
        let path = self.resolve(file_name)?;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            RepositoryError::storage(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!("画像を保存: {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    async fn get(&self, file_name: &str) -> Result<Vec<u8>, RepositoryError> {
        let path = self.resolve(file_name)?;
        tokio::fs::read(&path).await.map_err(|e| {
            RepositoryError::storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    async fn remove(&self, file_name: &str) -> Result<(), RepositoryError> {
        let path = self.resolve(file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("画像を削除: {}", path.display());
                Ok(())
            }
            // 既に無い場合は成功扱い
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepositoryError::storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
