use std::sync::Arc;

use crate::config::Config;
use crate::profile::Profile;
use crate::relay::SubmissionRelay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub profile: Profile,
    pub relay: Arc<dyn SubmissionRelay>,
}
