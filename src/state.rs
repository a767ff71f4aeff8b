use crate::blockchain::Relay;
use crate::config::Config;

pub struct AppState {
    pub config: Config,
    pub relay: Relay,
}
