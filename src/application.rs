//! アプリケーション層
//!
//! ユースケースとアプリケーションサービスを含む層

pub mod use_cases;
