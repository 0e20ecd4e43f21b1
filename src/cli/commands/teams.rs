use crate::config::Config;
use crate::core::teams::TeamsLogic;
use crate::errors::AppResult;

pub fn handle(cfg: &Config) -> AppResult<()> {
    TeamsLogic::print(cfg)
}
