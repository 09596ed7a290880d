//! 管理者認証
//!
//! 共有パスワードと署名付きトークンによる管理操作の保護

pub mod entities;
pub mod services;
