//! アプリケーション設定
//!
//! 待受アドレスと保存先はCLI引数、管理者パスワードと署名鍵は
//! 環境変数から受け取る。

use crate::domain::auth::services::DEFAULT_TOKEN_TTL_SECS;
use std::env;
use std::path::PathBuf;
use tracing::info;

/// 管理者パスワード（必須）
pub const ENV_ADMIN_PASSWORD: &str = "GALLERY_ADMIN_PASSWORD";
/// トークン署名鍵（省略時は起動ごとの使い捨て鍵）
pub const ENV_TOKEN_SECRET: &str = "GALLERY_TOKEN_SECRET";
/// トークン有効期間の秒数（省略時は12時間）
pub const ENV_TOKEN_TTL_SECS: &str = "GALLERY_TOKEN_TTL_SECS";

/// アプリケーション全体の設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub admin_password: String,
    pub token_secret: Option<String>,
    pub token_ttl_secs: i64,
}

impl AppConfig {
    /// CLI引数と環境変数から設定を組み立てる
    pub fn load(
        host: String,
        port: u16,
        data_dir: PathBuf,
        uploads_dir: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let admin_password = env::var(ENV_ADMIN_PASSWORD)
            .map_err(|_| anyhow::anyhow!("{ENV_ADMIN_PASSWORD} is not set"))?;
        if admin_password.trim().is_empty() {
            anyhow::bail!("{ENV_ADMIN_PASSWORD} must not be empty");
        }

        let token_secret = optional_var(ENV_TOKEN_SECRET);
        let token_ttl_secs = parse_var(ENV_TOKEN_TTL_SECS, DEFAULT_TOKEN_TTL_SECS)?;

        // アップロード先の既定はデータディレクトリ配下
        let uploads_dir = uploads_dir.unwrap_or_else(|| data_dir.join("uploads"));

        Ok(Self {
            host,
            port,
            data_dir,
            uploads_dir,
            admin_password,
            token_secret,
            token_ttl_secs,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            info!("{key} not set, using default");
            None
        }
    }
}

fn parse_var(key: &str, default: i64) -> anyhow::Result<i64> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("Invalid {key} value '{value}': {e}")),
        Err(_) => Ok(default),
    }
}
