//! # Exhibition Gallery
//!
//! 小規模な展示会向けのWebアプリケーション。来場者はアップロード
//! されたアートワークを順番に鑑賞して名前を登録し、作品ごとに一度
//! だけ「いいね」を送れます。管理者はアートワークの登録・編集・
//! 削除・並べ替えを行い、いいねのログとランキングを確認できます。
//!
//! このクレートは Domain-Driven Design (DDD) 原則に基づいて設計されており、
//! 以下の層に分かれています：
//!
//! - **Domain Layer**: ビジネスロジックとドメインモデル
//! - **Application Layer**: ユースケースとアプリケーションサービス
//! - **Infrastructure Layer**: 永続化とファイルシステムとの統合
//! - **Interface Layer**: ユーザーインターフェース

pub mod domain;
pub mod config;
pub mod debug;
pub mod application;
pub mod infrastructure;
pub mod interfaces;

// 公開API
pub use domain::*;
