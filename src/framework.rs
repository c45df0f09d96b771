use std::sync::Arc;

use tracing::{error, warn};

use crate::{ctx_data::CtxData, Error};

pub async fn on_error(error: poise::FrameworkError<'_, Arc<CtxData>, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        poise::FrameworkError::Command { error, ctx } => {
            warn!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("Could not file feedback:\n```\n{error}\n```")).await {
                error!("Could not report command error: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e)
            }
        }
    }
}
