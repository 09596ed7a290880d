//! 管理者認証のドメインサービス
//!
//! 共有パスワードの照合と、署名付き有効期限トークンの発行・検証。
//! トークンは `base64url(クレームJSON) . base64url(HMAC-SHA256タグ)`。

use crate::domain::auth::entities::{AdminSession, AdminToken};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// トークンの既定の有効期間（12時間）
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 12 * 60 * 60;

/// トークンに埋め込むクレーム
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sid: Uuid,
    iat: i64,
    exp: i64,
}

/// 認証エラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("Invalid admin password")]
    InvalidPassword,
    #[error("Missing admin token")]
    MissingToken,
    #[error("Malformed admin token")]
    MalformedToken,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Admin token has expired")]
    Expired,
}

/// 管理者認証サービス
///
/// パスワードはダイジェストのみ保持し、平文は構築後すぐに破棄される。
#[derive(Clone)]
pub struct AdminAuthService {
    password_digest: [u8; 32],
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl AdminAuthService {
    /// 認証サービスを構築
    ///
    /// `secret` が `None` の場合は起動ごとに使い捨ての鍵を生成する。
    /// その場合、発行済みトークンは再起動で無効になる。
    pub fn new(admin_password: &str, secret: Option<&str>, ttl_secs: i64) -> Self {
        let secret = match secret {
            Some(value) => value.as_bytes().to_vec(),
            None => {
                warn!("署名鍵が未設定のため使い捨ての鍵を生成: トークンは再起動で無効になる");
                let mut bytes = Vec::with_capacity(32);
                bytes.extend_from_slice(Uuid::new_v4().as_bytes());
                bytes.extend_from_slice(Uuid::new_v4().as_bytes());
                bytes
            }
        };

        Self {
            password_digest: Sha256::digest(admin_password.as_bytes()).into(),
            secret,
            ttl_secs: if ttl_secs > 0 {
                ttl_secs
            } else {
                DEFAULT_TOKEN_TTL_SECS
            },
        }
    }

    /// パスワードを照合してトークンを発行
    pub fn login(&self, password: &str) -> Result<AdminToken, AuthError> {
        let supplied: [u8; 32] = Sha256::digest(password.as_bytes()).into();
        if supplied != self.password_digest {
            warn!("管理者ログイン失敗: パスワード不一致");
            return Err(AuthError::InvalidPassword);
        }

        let token = self.issue_at(Utc::now());
        info!("管理者ログイン成功: 有効期限 {}", token.expires_at);
        Ok(token)
    }

    /// 指定時刻を発行時刻としてトークンを生成
    pub fn issue_at(&self, now: DateTime<Utc>) -> AdminToken {
        let expires_at = now + Duration::seconds(self.ttl_secs);
        let claims = TokenClaims {
            sid: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        // クレームのJSON化は構造が固定なので失敗しない
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);
        let tag_b64 = self.sign(payload_b64.as_bytes());

        AdminToken {
            token: format!("{payload_b64}.{tag_b64}"),
            expires_at,
        }
    }

    /// トークンを検証してセッションを取り出す
    pub fn verify(&self, token: &str) -> Result<AdminSession, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// 指定時刻を基準にトークンを検証
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AdminSession, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let (payload_b64, tag_b64) = token
            .split_once('.')
            .ok_or(AuthError::MalformedToken)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| AuthError::MalformedToken)?;

        // タグの照合は定数時間比較
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&tag)
            .map_err(|_| AuthError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::MalformedToken)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::MalformedToken)?;

        if now.timestamp() >= claims.exp {
            debug!("失効済みトークンを拒否: exp={}", claims.exp);
            return Err(AuthError::Expired);
        }

        let issued_at = DateTime::<Utc>::from_timestamp(claims.iat, 0)
            .ok_or(AuthError::MalformedToken)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or(AuthError::MalformedToken)?;

        Ok(AdminSession {
            session_id: claims.sid,
            issued_at,
            expires_at,
        })
    }

    fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload);
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AdminAuthService {
        AdminAuthService::new("correct-horse", Some("test-secret"), DEFAULT_TOKEN_TTL_SECS)
    }

    #[test]
    fn test_login_and_verify_roundtrip() {
        let auth = service();
        let token = auth.login("correct-horse").unwrap();
        let session = auth.verify(&token.token).unwrap();

        assert_eq!(session.expires_at, token.expires_at);
        assert!(session.issued_at < session.expires_at);
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let auth = service();
        assert_eq!(
            auth.login("incorrect-donkey").unwrap_err(),
            AuthError::InvalidPassword
        );
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = service();
        assert_eq!(auth.verify("").unwrap_err(), AuthError::MissingToken);
        assert_eq!(
            auth.verify("not-a-token").unwrap_err(),
            AuthError::MalformedToken
        );
        assert_eq!(
            auth.verify("ここに.日本語").unwrap_err(),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let auth = service();
        let token = auth.login("correct-horse").unwrap().token;
        let (payload_b64, tag_b64) = token.split_once('.').unwrap();

        // クレームを書き換えてタグはそのまま使う
        let mut payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        if let Some(byte) = payload.first_mut() {
            *byte = byte.wrapping_add(1);
        }
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(&payload), tag_b64);

        assert_eq!(auth.verify(&forged).unwrap_err(), AuthError::InvalidSignature);
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let auth = service();
        let other = AdminAuthService::new("correct-horse", Some("other-secret"), 60);
        let token = other.login("correct-horse").unwrap();

        assert_eq!(
            auth.verify(&token.token).unwrap_err(),
            AuthError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth = service();
        let issued = Utc::now() - Duration::seconds(DEFAULT_TOKEN_TTL_SECS + 1);
        let stale = auth.issue_at(issued);

        assert_eq!(
            auth.verify(&stale.token).unwrap_err(),
            AuthError::Expired
        );
        // 発行直後の時刻を基準にすれば有効
        assert!(auth.verify_at(&stale.token, issued).is_ok());
    }

    #[test]
    fn test_ephemeral_secret_when_unset() {
        let first = AdminAuthService::new("pw", None, 60);
        let second = AdminAuthService::new("pw", None, 60);
        let token = first.login("pw").unwrap();

        assert!(first.verify(&token.token).is_ok());
        // 別インスタンスの使い捨て鍵では検証できない
        assert_eq!(
            second.verify(&token.token).unwrap_err(),
            AuthError::InvalidSignature
        );
    }
}
