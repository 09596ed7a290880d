//! インメモリの永続化実装
//!
//! テストとローカル検証用。プロセスが終了すると内容は消える。

use crate::domain::artwork::entities::{Artwork, ArtworkId};
use crate::domain::artwork::repositories::{ArtworkRepository, ImageStore, RepositoryError};
use crate::domain::like::entities::Like;
use crate::domain::like::repositories::LikeRepository;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// インメモリのアートワークリポジトリ実装
pub struct InMemoryArtworkRepository {
    artworks: Arc<RwLock<HashMap<ArtworkId, Artwork>>>,
}

impl Default for InMemoryArtworkRepository {
    fn default() -> Self {
        Self {
            artworks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl InMemoryArtworkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtworkRepository for InMemoryArtworkRepository {
    async fn save(&self, artwork: &Artwork) -> Result<(), RepositoryError> {
        let mut artworks = self.artworks.write().await;
        artworks.insert(artwork.id, artwork.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ArtworkId) -> Result<Option<Artwork>, RepositoryError> {
        let artworks = self.artworks.read().await;
        Ok(artworks.get(id).cloned())
    }

    async fn delete(&self, id: &ArtworkId) -> Result<(), RepositoryError> {
        let mut artworks = self.artworks.write().await;
        artworks
            .remove(id)
            .ok_or(RepositoryError::NotFound { id: *id })?;
        Ok(())
    }

    async fn list_ordered(&self) -> Result<Vec<Artwork>, RepositoryError> {
        let artworks = self.artworks.read().await;
        let mut list: Vec<Artwork> = artworks.values().cloned().collect();
        list.sort_by(|a, b| a.display_cmp(b));
        Ok(list)
    }

    async fn reorder(&self, ids: &[ArtworkId]) -> Result<(), RepositoryError> {
        let mut artworks = self.artworks.write().await;

        if ids.len() != artworks.len() {
            return Err(RepositoryError::invalid_operation(format!(
                "Order must mention every artwork exactly once (expected {}, got {})",
                artworks.len(),
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
            if !artworks.contains_key(id) {
                return Err(RepositoryError::NotFound { id: *id });
            }
        }

        for (index, id) in ids.iter().enumerate() {
            if let Some(artwork) = artworks.get_mut(id) {
                artwork.display_order = (index + 1) as u32;
            }
        }
        Ok(())
    }
}

/// インメモリのいいねリポジトリ実装
pub struct InMemoryLikeRepository {
    likes: Arc<RwLock<Vec<Like>>>,
}

impl Default for InMemoryLikeRepository {
    fn default() -> Self {
        Self {
            likes: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn submit(&self, like: Like) -> Result<bool, RepositoryError> {
        let mut likes = self.likes.write().await;
        if likes
            .iter()
            .any(|l| l.pair_matches(&like.username, &like.artwork_id))
        {
            return Ok(false);
        }
        likes.push(like);
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Like>, RepositoryError> {
        let likes = self.likes.read().await;
        let mut log = likes.clone();
        log.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));
        Ok(log)
    }

    async fn counts(&self) -> Result<HashMap<ArtworkId, usize>, RepositoryError> {
        let likes = self.likes.read().await;
        let mut counts = HashMap::new();
        for like in likes.iter() {
            *counts.entry(like.artwork_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn remove_for_artwork(&self, artwork_id: &ArtworkId) -> Result<usize, RepositoryError> {
        let mut likes = self.likes.write().await;
        let before = likes.len();
        likes.retain(|l| &l.artwork_id != artwork_id);
        Ok(before - likes.len())
    }

    async fn clear(&self) -> Result<usize, RepositoryError> {
        let mut likes = self.likes.write().await;
        let count = likes.len();
        likes.clear();
        Ok(count)
    }
}

/// インメモリの画像ストア実装
pub struct InMemoryImageStore {
    images: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self {
            images: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<(), RepositoryError> {
        let mut images = self.images.write().await;
        images.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, file_name: &str) -> Result<Vec<u8>, RepositoryError> {
        let images = self.images.read().await;
        images
            .get(file_name)
            .cloned()
            .ok_or_else(|| RepositoryError::storage(format!("Image not found: {file_name}")))
    }

    async fn remove(&self, file_name: &str) -> Result<(), RepositoryError> {
        let mut images = self.images.write().await;
        images.remove(file_name);
        Ok(())
    }
}
