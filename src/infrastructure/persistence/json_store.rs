//! JSONファイルによる永続化
//!
//! コレクションごとに一つのJSONファイル（配列）を持つ。変更は
//! コピーに適用してからファイルへ書き出し、成功した場合のみ
//! メモリ上の状態を入れ替える。途中で失敗しても中途半端な状態は
//! 残らない。

use crate::domain::artwork::entities::{Artwork, ArtworkId};
use crate::domain::artwork::repositories::{ArtworkRepository, RepositoryError};
use crate::domain::like::entities::Like;
use crate::domain::like::repositories::LikeRepository;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// JSONファイルに対応するレコード配列
pub struct JsonCollection<T> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// ファイルを読み込んでコレクションを開く
    ///
    /// ファイルが存在しない場合は空のコレクションとして開始する。
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RepositoryError::storage(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let records: Vec<T> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                RepositoryError::Serialization {
                    message: format!("Failed to parse {}: {}", path.display(), e),
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(RepositoryError::storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        info!(
            "JSONコレクションを開く: {} ({} 件)",
            path.display(),
            records.len()
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// レコードを参照する
    pub async fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let records = self.records.read().await;
        f(&records)
    }

    /// レコードを変更してファイルへ書き出す
    ///
    /// 変更はコピーに適用する。クロージャがエラーを返した場合と
    /// 書き出しに失敗した場合、メモリ上の状態は変わらない。
    pub async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> Result<R, RepositoryError>,
    ) -> Result<R, RepositoryError> {
        let mut guard = self.records.write().await;
        let mut working = guard.clone();
        let result = f(&mut working)?;

        let json = serde_json::to_vec_pretty(&working).map_err(|e| {
            RepositoryError::Serialization {
                message: format!("Failed to serialize {}: {}", self.path.display(), e),
            }
        })?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            RepositoryError::storage(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;

        *guard = working;
        Ok(result)
    }
}

/// JSONファイルのアートワークリポジトリ実装
pub struct JsonFileArtworkRepository {
    collection: JsonCollection<Artwork>,
}

impl JsonFileArtworkRepository {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        Ok(Self {
            collection: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl ArtworkRepository for JsonFileArtworkRepository {
    async fn save(&self, artwork: &Artwork) -> Result<(), RepositoryError> {
        self.collection
            .mutate(|records| {
                match records.iter_mut().find(|r| r.id == artwork.id) {
                    Some(existing) => *existing = artwork.clone(),
                    None => records.push(artwork.clone()),
                }
                Ok(())
            })
            .await?;
        debug!("アートワークを保存: {}", artwork.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &ArtworkId) -> Result<Option<Artwork>, RepositoryError> {
        self.collection
            .read(|records| Ok(records.iter().find(|r| &r.id == id).cloned()))
            .await
    }

    async fn delete(&self, id: &ArtworkId) -> Result<(), RepositoryError> {
        self.collection
            .mutate(|records| {
                let position = records
                    .iter()
                    .position(|r| &r.id == id)
                    .ok_or(RepositoryError::NotFound { id: *id })?;
                records.remove(position);
                Ok(())
            })
            .await?;
        debug!("アートワークを削除: {}", id);
        Ok(())
    }

    async fn list_ordered(&self) -> Result<Vec<Artwork>, RepositoryError> {
        self.collection
            .read(|records| {
                let mut artworks = records.to_vec();
                artworks.sort_by(|a, b| a.display_cmp(b));
                Ok(artworks)
            })
            .await
    }

    async fn reorder(&self, ids: &[ArtworkId]) -> Result<(), RepositoryError> {
        self.collection
            .mutate(|records| {
                validate_order(records, ids)?;
                // 並べ替えは表示順序のみ変更し、updated_at は触らない
                for (index, id) in ids.iter().enumerate() {
                    if let Some(record) = records.iter_mut().find(|r| &r.id == id) {
                        record.display_order = (index + 1) as u32;
                    }
                }
                Ok(())
            })
            .await?;
        info!("表示順序を更新: {} 件", ids.len());
        Ok(())
    }
}

/// 並べ替え要求が保存済みの全アートワークをちょうど一度ずつ
/// 含むことを検証する
fn validate_order(records: &[Artwork], ids: &[ArtworkId]) -> Result<(), RepositoryError> {
    if ids.len() != records.len() {
        return Err(RepositoryError::invalid_operation(format!(
            "Order must mention every artwork exactly once (expected {}, got {})",
            records.len(),
            ids.len()
        )));
    }

    let unique: HashSet<&ArtworkId> = ids.iter().collect();
    if unique.len() != ids.len() {
        return Err(RepositoryError::invalid_operation(
            "Order contains a duplicate artwork id",
        ));
    }

    for id in ids {
        if !records.iter().any(|r| &r.id == id) {
            return Err(RepositoryError::NotFound { id: *id });
        }
    }

    Ok(())
}

/// JSONファイルのいいねリポジトリ実装
pub struct JsonFileLikeRepository {
    collection: JsonCollection<Like>,
}

impl JsonFileLikeRepository {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        Ok(Self {
            collection: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl LikeRepository for JsonFileLikeRepository {
    async fn submit(&self, like: Like) -> Result<bool, RepositoryError> {
        // 既知の重複はファイルを書き直さずに無視する
        let already_liked = self
            .collection
            .read(|records| {
                records
                    .iter()
                    .any(|l| l.pair_matches(&like.username, &like.artwork_id))
            })
            .await;
        if already_liked {
            debug!(
                "重複したいいねを無視: visitor={}, artwork_id={}",
                like.username, like.artwork_id
            );
            return Ok(false);
        }

        self.collection
            .mutate(|records| {
                // 書き込みロック下で再確認する
                if records
                    .iter()
                    .any(|l| l.pair_matches(&like.username, &like.artwork_id))
                {
                    return Ok(false);
                }
                debug!(
                    "いいねを記録: visitor={}, artwork_id={}",
                    like.username, like.artwork_id
                );
                records.push(like.clone());
                Ok(true)
            })
            .await
    }

    async fn list_all(&self) -> Result<Vec<Like>, RepositoryError> {
        self.collection
            .read(|records| {
                let mut likes = records.to_vec();
                likes.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));
                Ok(likes)
            })
            .await
    }

    async fn counts(&self) -> Result<HashMap<ArtworkId, usize>, RepositoryError> {
        self.collection
            .read(|records| {
                let mut counts = HashMap::new();
                for like in records {
                    *counts.entry(like.artwork_id).or_insert(0) += 1;
                }
                Ok(counts)
            })
            .await
    }

    async fn remove_for_artwork(&self, artwork_id: &ArtworkId) -> Result<usize, RepositoryError> {
        let removed = self
            .collection
            .mutate(|records| {
                let before = records.len();
                records.retain(|l| &l.artwork_id != artwork_id);
                Ok(before - records.len())
            })
            .await?;
        if removed > 0 {
            debug!("いいねをカスケード削除: artwork_id={}, {} 件", artwork_id, removed);
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<usize, RepositoryError> {
        let removed = self
            .collection
            .mutate(|records| {
                let count = records.len();
                records.clear();
                Ok(count)
            })
            .await?;
        info!("いいねをリセット: {} 件", removed);
        Ok(removed)
    }
}
