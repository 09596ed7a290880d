//! いいね集約のエンティティ

use crate::domain::artwork::entities::ArtworkId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// 来場者名の最大文字数
pub const MAX_VISITOR_NAME_LEN: usize = 64;

/// 来場者の表示名
///
/// 前後の空白を取り除いた非空文字列。セッション中は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorName(String);

impl VisitorName {
    /// 入力文字列から来場者名を生成
    ///
    /// 前後の空白を除去し、空文字列と長すぎる名前を拒否する。
    pub fn parse(raw: &str) -> Result<Self, LikeValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LikeValidationError::EmptyVisitorName);
        }
        if trimmed.chars().count() > MAX_VISITOR_NAME_LEN {
            return Err(LikeValidationError::VisitorNameTooLong {
                max: MAX_VISITOR_NAME_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// いいねエンティティ
///
/// (来場者, アートワーク) の組につき高々一件しか存在しない。
/// 一意性はリポジトリ実装が保証する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub username: VisitorName,
    pub artwork_id: ArtworkId,
    pub liked_at: DateTime<Utc>,
}

impl Like {
    /// 新しいいいねを作成
    pub fn new(username: VisitorName, artwork_id: ArtworkId) -> Self {
        debug!(
            "いいねを作成: visitor={}, artwork_id={}",
            username, artwork_id
        );
        Self {
            username,
            artwork_id,
            liked_at: Utc::now(),
        }
    }

    /// 同じ (来場者, アートワーク) の組かチェック
    pub fn pair_matches(&self, username: &VisitorName, artwork_id: &ArtworkId) -> bool {
        &self.username == username && &self.artwork_id == artwork_id
    }
}

/// いいねのバリデーションエラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LikeValidationError {
    #[error("Visitor name cannot be empty")]
    EmptyVisitorName,
    #[error("Visitor name is too long (max {max} characters)")]
    VisitorNameTooLong { max: usize },
}
