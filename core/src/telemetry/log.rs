use log::info;

/// Thin wrapper over the `log` facade used by the sampler and pipeline for
/// batch-level summaries. Point-level noise goes through `log::warn!`
/// directly.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
