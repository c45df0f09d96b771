use std::sync::Arc;

use crate::{ctx_data::CtxData, Error};

pub mod feedback;

pub fn commands() -> Vec<poise::Command<Arc<CtxData>, Error>> {
    vec![feedback::feedback()]
}
