use std::net::SocketAddr;
use std::sync::Arc;

use common::config::StorageBackend;
use common::storage::filesystem::FilesystemObjectStore;
use common::storage::{ObjectStore, PublicUrlResolver};
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    let assets = build_object_store(&config).await?;

    let state = AppState {
        db,
        assets,
        config: config.clone(),
    };

    let app = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_object_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let urls = PublicUrlResolver::new(&config.storage.public_base_url, &config.storage.bucket);

    match config.storage.backend {
        StorageBackend::Filesystem => Ok(Arc::new(
            FilesystemObjectStore::new(config.storage.root.clone(), urls).await?,
        )),
        StorageBackend::S3 => {
            #[cfg(feature = "object-storage")]
            {
                Ok(Arc::new(common::storage::s3::S3ObjectStore::new(
                    &config.storage.endpoint,
                    &config.storage.region,
                    &config.storage.bucket,
                    &config.storage.access_key,
                    &config.storage.secret_key,
                    urls,
                )?))
            }
            #[cfg(not(feature = "object-storage"))]
            {
                anyhow::bail!(
                    "storage.backend = \"s3\" requires a build with the 'object-storage' feature"
                )
            }
        }
    }
}
