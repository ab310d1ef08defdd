use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::rest;

/// Artificial per-request latency applied to successful lookups, modeling
/// network delay for the caller.
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON dataset file to load the flight store from. When unset, the
    /// embedded seed dataset is used.
    pub dataset: Option<PathBuf>,
    #[serde(with = "humantime_serde")]
    pub response_delay: Duration,
    pub rest: rest::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            response_delay: DEFAULT_RESPONSE_DELAY,
            rest: rest::Config::default(),
        }
    }
}
