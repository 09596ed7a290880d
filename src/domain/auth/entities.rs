//! 管理者認証のエンティティ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 検証済みの管理者セッション
///
/// トークン検証に成功したリクエストごとに一つ構築される。
/// 永続化はしない。
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub session_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// 指定時刻でセッションが失効しているかチェック
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// 発行済みの管理者トークン
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = AdminSession {
            session_id: Uuid::new_v4(),
            issued_at: now,
            expires_at: now + Duration::hours(12),
        };

        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(now + Duration::hours(11)));
        // 失効時刻ちょうどで失効扱い
        assert!(session.is_expired_at(now + Duration::hours(12)));
        assert!(session.is_expired_at(now + Duration::hours(13)));
    }
}
