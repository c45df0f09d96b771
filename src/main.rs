use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{ctx_data::CtxData, settings::Settings};

mod commands;
mod ctx_data;
mod framework;
mod settings;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
pub type Context<'a> = poise::Context<'a, Arc<CtxData>, Error>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new()?;
    info!("Filing feedback into {}", settings.github.repository);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(),
            on_error: |error| Box::pin(framework::on_error(error)),
            ..Default::default()
        })
        .token(settings.discord_token.clone())
        .intents(serenity::GatewayIntents::non_privileged())
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("{} is connected!", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Arc::new(CtxData::new(settings)))
            })
        });

    framework.run().await?;

    Ok(())
}
