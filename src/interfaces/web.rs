//! Web インターフェース
//!
//! HTTPベースのWeb APIと埋め込み静的アセットの配信を提供します。
//! アートワーク管理、いいねの記録と集計、管理者認証などの
//! 機能を含みます。

mod artwork_handlers;
mod auth_handlers;
mod embedded_assets;
mod error_response;
mod like_handlers;
mod models;
mod state;

pub mod server;

pub use state::GalleryState;

// 内部使用のため、必要な型のみを再エクスポート
pub(crate) use artwork_handlers::{
    create_artwork, delete_artwork, get_artwork_image, list_artworks, reorder_artworks,
    update_artwork,
};
pub(crate) use auth_handlers::admin_login;
pub(crate) use like_handlers::{get_like_log, get_ranking, reset_likes, submit_like};
