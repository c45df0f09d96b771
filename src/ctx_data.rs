use feedbot::GithubTarget;

use crate::settings::Settings;

#[derive(Debug)]
pub struct CtxData {
    pub settings: Settings,
    pub github: GithubTarget,
}

impl CtxData {
    pub fn new(settings: Settings) -> Self {
        let github = settings.github_target();
        Self { settings, github }
    }
}
