use parrot_chat::app::App;
use parrot_chat::config::initialize_config;
use parrot_chat::constants::STORE_FILE_NAME;
use parrot_chat::logging::init_logging;
use parrot_chat::storage::FileStore;
use parrot_chat::ui::run_ui;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = initialize_config()?;
    let _logger = init_logging(&config)?;

    let store = Arc::new(FileStore::open(config.data_path().join(STORE_FILE_NAME))?);
    log::info!("Using store at {}", store.path().display());

    let app = App::new(store, config)?;
    run_ui(app).await
}
