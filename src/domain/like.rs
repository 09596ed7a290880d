//! いいね集約
//!
//! 来場者の「いいね」の記録、重複排除、集計に関するモジュール

pub mod entities;
pub mod repositories;
pub mod services;
