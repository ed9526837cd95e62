use std::time::Duration;

use crate::errors::PricingError;

/// Default number of jobs processed concurrently.
pub const DEFAULT_WORKER_POOL_SIZE: usize = 20;

/// Default upper bound on a single source call, matching the clients' own timeout.
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(30);

/// Tuning knobs for the aggregation pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum number of jobs in flight at once
    pub worker_pool_size: usize,

    /// Timeout applied to each source call at the fan-out join point.
    /// `None` leaves timing out entirely to the adapters.
    pub adapter_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            adapter_timeout: Some(DEFAULT_ADAPTER_TIMEOUT),
        }
    }
}

impl PipelineConfig {
    /// Read overrides from `PARTQUOTE_WORKER_POOL_SIZE` and
    /// `PARTQUOTE_ADAPTER_TIMEOUT_MS`. Missing or unparsable values keep the
    /// defaults; a timeout of 0 disables the fan-out timeout.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let worker_pool_size = lookup("PARTQUOTE_WORKER_POOL_SIZE")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.worker_pool_size);

        let adapter_timeout = match lookup("PARTQUOTE_ADAPTER_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.adapter_timeout,
        };

        Self {
            worker_pool_size,
            adapter_timeout,
        }
    }

    pub fn with_worker_pool_size(mut self, size: usize) -> Self {
        self.worker_pool_size = size;
        self
    }

    pub fn with_adapter_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.worker_pool_size == 0 {
            return Err(PricingError::invalid_config(
                "worker_pool_size must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number of workers to start for a batch of `jobs`.
    pub fn workers_for(&self, jobs: usize) -> usize {
        self.worker_pool_size.min(jobs).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.worker_pool_size, 20);
        assert_eq!(config.adapter_timeout, Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = PipelineConfig::from_lookup(lookup(&[
            ("PARTQUOTE_WORKER_POOL_SIZE", "8"),
            ("PARTQUOTE_ADAPTER_TIMEOUT_MS", "1500"),
        ]));
        assert_eq!(config.worker_pool_size, 8);
        assert_eq!(config.adapter_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_env_zero_timeout_disables() {
        let config = PipelineConfig::from_lookup(lookup(&[("PARTQUOTE_ADAPTER_TIMEOUT_MS", "0")]));
        assert_eq!(config.adapter_timeout, None);
    }

    #[test]
    fn test_env_garbage_keeps_defaults() {
        let config = PipelineConfig::from_lookup(lookup(&[
            ("PARTQUOTE_WORKER_POOL_SIZE", "lots"),
            ("PARTQUOTE_ADAPTER_TIMEOUT_MS", "-5"),
        ]));
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_zero_pool_is_invalid() {
        let config = PipelineConfig::default().with_worker_pool_size(0);
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_workers_for_clamps_to_job_count() {
        let config = PipelineConfig::default();
        assert_eq!(config.workers_for(3), 3);
        assert_eq!(config.workers_for(500), 20);
        assert_eq!(config.workers_for(0), 1);
    }
}
