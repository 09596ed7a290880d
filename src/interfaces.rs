//! インターフェース層
//!
//! ユーザーインターフェースを含む層

pub mod web;
