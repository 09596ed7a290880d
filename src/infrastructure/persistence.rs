//! 永続化の実装

pub mod json_store;
pub mod memory;
