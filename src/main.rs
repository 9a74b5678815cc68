use tokio::net::TcpListener;

use plainwiki::logger::Logger;
use plainwiki::{router, AppState, Config, PageStore, TemplateComponent, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    let config = Config::from_env();
    log::debug!("Configuration: {:?}", config);

    let store = PageStore::new(config.data_dir.clone());
    store.ensure_root().await?;
    let templates = TemplateComponent::load(&config.templates_dir);
    let state = AppState::new(store, templates);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    log::info!("Wiki listening on http://{}", addr);
    axum::serve(listener, router(state)).await.map_err(WikiError::from)
}
