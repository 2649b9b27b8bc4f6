use anyhow::Result;
use mail_phish_guard::{
    app::GuardApp,
    config,
    infrastructure::{directories, logging},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let app = GuardApp::initialize(&config)?;
    app.run(std::env::args().skip(1).collect()).await
}
