use anyhow::Result;
use liked_sync::{spotify, sync, Settings, SyncSettings};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    let spotify = spotify::connect(&settings).await?;
    let user_id = sync::resolve_user(&spotify, settings.user_id.as_deref()).await?;

    sync::run(&spotify, &user_id, &SyncSettings::default()).await?;

    log::info!("All new songs have been added to your Liked Songs!");
    Ok(())
}
