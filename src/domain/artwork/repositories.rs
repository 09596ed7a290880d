//! アートワーク集約のリポジトリトレイト
//!
//! アートワークと画像バイト列の永続化に関するトレイトを定義。
//! 永続化エンジン（JSONファイル、インメモリ）はインフラ層で実装する。

use crate::domain::artwork::entities::{Artwork, ArtworkId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ストアのエラー
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum RepositoryError {
    #[error("Artwork not found: {id}")]
    NotFound { id: ArtworkId },
    #[error("Invalid store operation: {message}")]
    InvalidOperation { message: String },
    #[error("Storage error: {message}")]
    Storage { message: String },
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// エラーがクライアント側の問題かチェック
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidOperation { .. }
        )
    }
}

/// アートワークリポジトリトレイト
#[async_trait]
pub trait ArtworkRepository: Send + Sync {
    /// アートワークを保存（新規または置き換え）
    async fn save(&self, artwork: &Artwork) -> Result<(), RepositoryError>;

    /// アートワークを取得
    async fn find_by_id(&self, id: &ArtworkId) -> Result<Option<Artwork>, RepositoryError>;

    /// アートワークを削除
    async fn delete(&self, id: &ArtworkId) -> Result<(), RepositoryError>;

    /// 展示順にすべてのアートワークを取得
    ///
    /// 表示順序の昇順。同順は作成時刻、次いでIDで安定に並ぶ。
    async fn list_ordered(&self) -> Result<Vec<Artwork>, RepositoryError>;

    /// 表示順序を一括で振り直す
    ///
    /// 与えられたID列の順に 1..N を割り当てる。ID列は保存済みの全
    /// アートワークを重複なくちょうど一度ずつ含まなければならず、
    /// 満たさない場合は何も適用せずにエラーを返す。
    async fn reorder(&self, ids: &[ArtworkId]) -> Result<(), RepositoryError>;

    /// アートワークが存在するかチェック
    async fn exists(&self, id: &ArtworkId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// 次に割り当てる表示順序を取得
    async fn next_display_order(&self) -> Result<u32, RepositoryError> {
        let artworks = self.list_ordered().await?;
        Ok(artworks
            .iter()
            .map(|a| a.display_order)
            .max()
            .map_or(1, |max| max.saturating_add(1)))
    }

    /// アートワークの総数を取得
    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list_ordered().await?.len())
    }
}

/// 画像バイト列ストアのトレイト
///
/// キーはアートワーク集約が保持する正規化済みファイル名。
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 画像を保存（同名は上書き）
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<(), RepositoryError>;

    /// 画像を読み出し
    async fn get(&self, file_name: &str) -> Result<Vec<u8>, RepositoryError>;

    /// 画像を削除（存在しない場合は何もしない）
    async fn remove(&self, file_name: &str) -> Result<(), RepositoryError>;
}
