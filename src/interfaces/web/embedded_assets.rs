use rust_embed::Embed;

/// 来場者向けフロントエンドの静的アセットを埋め込む
#[derive(Embed)]
#[folder = "web/"]
#[include = "*"]
#[include = "**/*"]
pub struct WebAssets;
