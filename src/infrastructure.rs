//! インフラストラクチャ層
//!
//! 永続化とファイルシステムとの統合を含む層

pub mod persistence;
pub mod media;
