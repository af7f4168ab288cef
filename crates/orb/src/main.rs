use std::sync::Arc;

use orb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), orb_core::Error> {
    orb_core::logging::init("orb");

    let cfg = Arc::new(Config::load()?);

    orb_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| orb_core::Error::Transport(format!("telegram bot failed: {e}")))?;

    Ok(())
}
