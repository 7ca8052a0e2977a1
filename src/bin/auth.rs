use anyhow::Result;
use liked_sync::{spotify, LikedLibrary, Settings};

/// Runs the OAuth prompt once so later syncs start from the cached token.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    let spotify = spotify::connect(&settings).await?;
    let user_id = spotify.current_user_id().await?;
    log::info!("Token cached for {}", user_id);
    Ok(())
}
