//! アートワーク集約
//!
//! 展示作品のメタデータと画像参照の管理、検証に関するモジュール

pub mod entities;
pub mod value_objects;
pub mod repositories;
