use crate::config::AppConfig;
use crate::domain::auth::services::AdminAuthService;
use crate::infrastructure::media::FileImageStore;
use crate::infrastructure::persistence::json_store::{
    JsonFileArtworkRepository, JsonFileLikeRepository,
};
use crate::interfaces::web::GalleryState;
use crate::interfaces::web::server::create_server;
use std::sync::Arc;
use tracing::info;

pub struct RunApplicationUseCase {
    config: AppConfig,
}

impl RunApplicationUseCase {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = &self.config;

        info!(
            "Opening stores: data={}, uploads={}",
            config.data_dir.display(),
            config.uploads_dir.display()
        );

        // Wire the JSON-file engines behind the store traits
        let artworks =
            JsonFileArtworkRepository::open(config.data_dir.join("artworks.json")).await?;
        let likes = JsonFileLikeRepository::open(config.data_dir.join("likes.json")).await?;
        let images = FileImageStore::open(&config.uploads_dir).await?;
        let auth = AdminAuthService::new(
            &config.admin_password,
            config.token_secret.as_deref(),
            config.token_ttl_secs,
        );

        let state = Arc::new(GalleryState::new(
            Arc::new(artworks),
            Arc::new(likes),
            Arc::new(images),
            auth,
        ));

        // Delegate to the web server module
        create_server(config.host.clone(), config.port, state).await
    }
}
