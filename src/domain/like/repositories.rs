//! いいね集約のリポジトリトレイト

use crate::domain::artwork::entities::ArtworkId;
use crate::domain::artwork::repositories::RepositoryError;
use crate::domain::like::entities::Like;
use async_trait::async_trait;
use std::collections::HashMap;

/// いいねリポジトリトレイト
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// いいねを登録
    ///
    /// 同じ (来場者, アートワーク) の組が既に存在する場合は状態を
    /// 変更せずに `false` を返す。挿入した場合は `true` を返す。
    async fn submit(&self, like: Like) -> Result<bool, RepositoryError>;

    /// すべてのいいねを新しい順に取得
    async fn list_all(&self) -> Result<Vec<Like>, RepositoryError>;

    /// アートワークごとのいいね数を取得
    async fn counts(&self) -> Result<HashMap<ArtworkId, usize>, RepositoryError>;

    /// 特定アートワークのいいね数を取得
    async fn count_for(&self, artwork_id: &ArtworkId) -> Result<usize, RepositoryError> {
        Ok(self
            .counts()
            .await?
            .get(artwork_id)
            .copied()
            .unwrap_or(0))
    }

    /// 特定アートワークのいいねをすべて削除
    ///
    /// アートワーク削除時のカスケードに使う。削除した件数を返す。
    async fn remove_for_artwork(&self, artwork_id: &ArtworkId) -> Result<usize, RepositoryError>;

    /// すべてのいいねを削除
    ///
    /// 展示リセット用。削除した件数を返す。
    async fn clear(&self) -> Result<usize, RepositoryError>;
}
