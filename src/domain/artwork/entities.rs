//! アートワーク集約のエンティティ
//!
//! 展示作品のメタデータと表示順序を管理するエンティティを定義

use crate::domain::artwork::value_objects::ImageRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// アートワークID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtworkId(Uuid);

impl ArtworkId {
    /// 新しいIDを生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列から作成
    pub fn parse(s: &str) -> Result<Self, String> {
        let uuid = Uuid::parse_str(s).map_err(|e| format!("Invalid UUID format: {}", e))?;
        Ok(Self(uuid))
    }

    /// UUIDとして取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// 文字列として取得
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for ArtworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ArtworkId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ArtworkId> for Uuid {
    fn from(id: ArtworkId) -> Self {
        id.0
    }
}

/// 作者名の最大長（文字数）
pub const MAX_AUTHOR_LEN: usize = 120;

/// アートワークエンティティ
///
/// 展示順序と画像参照を持つ集約ルート。いいね数は集約には保持せず、
/// ライク集約から都度導出する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub author: String,
    pub display_order: u32,
    pub image: ImageRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artwork {
    /// 新しいアートワークを作成
    pub fn new(author: String, display_order: u32, image: ImageRef) -> Self {
        Self::with_id(ArtworkId::generate(), author, display_order, image)
    }

    /// 指定されたIDでアートワークを作成
    pub fn with_id(id: ArtworkId, author: String, display_order: u32, image: ImageRef) -> Self {
        debug!(artwork_id = %id, "新しいアートワークを作成中");
        let now = Utc::now();
        let artwork = Self {
            id,
            author,
            display_order,
            image,
            created_at: now,
            updated_at: now,
        };

        info!(
            artwork_id = %artwork.id,
            author = %artwork.author,
            display_order = %artwork.display_order,
            image = %artwork.image.file_name,
            "アートワークが作成されました"
        );

        artwork
    }

    /// 作者名を更新
    pub fn set_author(&mut self, author: String) {
        self.author = author;
        self.touch();
    }

    /// 表示順序を更新
    pub fn set_display_order(&mut self, display_order: u32) {
        self.display_order = display_order;
        self.touch();
    }

    /// 画像参照を差し替え
    pub fn replace_image(&mut self, image: ImageRef) {
        info!(
            artwork_id = %self.id,
            old_image = %self.image.file_name,
            new_image = %image.file_name,
            "画像が差し替えられました"
        );
        self.image = image;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// 展示順の比較
    ///
    /// 表示順序の昇順。同順の場合は作成時刻、さらにIDで決定的に順序付ける。
    pub fn display_cmp(&self, other: &Artwork) -> Ordering {
        self.display_order
            .cmp(&other.display_order)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }

    /// アートワークの検証
    pub fn validate(&self) -> Result<(), ArtworkValidationError> {
        if self.author.trim().is_empty() {
            return Err(ArtworkValidationError::EmptyAuthor);
        }

        if self.author.chars().count() > MAX_AUTHOR_LEN {
            return Err(ArtworkValidationError::AuthorTooLong);
        }

        if self.image.file_name.is_empty() {
            return Err(ArtworkValidationError::MissingImage);
        }

        Ok(())
    }
}

/// アートワークの検証エラー
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArtworkValidationError {
    #[error("Artwork author cannot be empty")]
    EmptyAuthor,
    #[error("Artwork author must not exceed {MAX_AUTHOR_LEN} characters")]
    AuthorTooLong,
    #[error("Artwork has no image attached")]
    MissingImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ImageRef {
        ImageRef::from_stored_parts("test.png", "image/png", b"not really a png")
    }

    #[test]
    fn test_artwork_id() {
        let id1 = ArtworkId::generate();
        let id2 = ArtworkId::generate();
        assert_ne!(id1, id2);

        let uuid = Uuid::new_v4();
        let id_from_uuid = ArtworkId::from_uuid(uuid);
        assert_eq!(id_from_uuid.as_uuid(), uuid);

        let id_str = id1.as_str();
        let id_from_str = ArtworkId::from_str(&id_str).unwrap();
        assert_eq!(id1, id_from_str);

        assert!(ArtworkId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_artwork_creation() {
        let artwork = Artwork::new("山田 花子".to_string(), 1, sample_image());

        assert_eq!(artwork.author, "山田 花子");
        assert_eq!(artwork.display_order, 1);
        assert_eq!(artwork.created_at, artwork.updated_at);
        assert!(artwork.validate().is_ok());
    }

    #[test]
    fn test_artwork_updates_touch_timestamp() {
        let mut artwork = Artwork::new("A".to_string(), 1, sample_image());
        let created = artwork.created_at;

        artwork.set_author("B".to_string());
        assert_eq!(artwork.author, "B");
        assert!(artwork.updated_at >= created);

        artwork.set_display_order(7);
        assert_eq!(artwork.display_order, 7);
    }

    #[test]
    fn test_display_cmp_orders_by_position_then_age() {
        let mut first = Artwork::new("A".to_string(), 1, sample_image());
        let mut second = Artwork::new("B".to_string(), 2, sample_image());
        assert_eq!(first.display_cmp(&second), Ordering::Less);

        // 同順の場合は作成時刻が早い方が先
        second.display_order = 1;
        first.created_at = second.created_at - chrono::Duration::seconds(1);
        assert_eq!(first.display_cmp(&second), Ordering::Less);

        // 作成時刻まで同じならIDで決まる
        first.created_at = second.created_at;
        let expected = first.id.cmp(&second.id);
        assert_eq!(first.display_cmp(&second), expected);
    }

    #[test]
    fn test_artwork_validation() {
        let mut artwork = Artwork::new("  ".to_string(), 1, sample_image());
        assert!(matches!(
            artwork.validate(),
            Err(ArtworkValidationError::EmptyAuthor)
        ));

        artwork.author = "あ".repeat(MAX_AUTHOR_LEN + 1);
        assert!(matches!(
            artwork.validate(),
            Err(ArtworkValidationError::AuthorTooLong)
        ));

        artwork.author = "鈴木".to_string();
        assert!(artwork.validate().is_ok());
    }
}
