/// Configuration for signature polling behavior.
///
/// Controls how the relay client polls the signature-aggregation service for
/// an aggregated BLS signature over a Warp message. Use the builder methods
/// to customize, or use preset configurations for common scenarios.
///
/// # Examples
///
/// ```rust
/// use teleporter_rs::PollingConfig;
///
/// // Use defaults (30 attempts, 10 second intervals)
/// let config = PollingConfig::default();
///
/// // Customize polling behavior
/// let config = PollingConfig::default()
///     .with_max_attempts(20)
///     .with_poll_interval_secs(5);
///
/// // Use preset for local test networks (10 attempts, 1 second intervals)
/// let config = PollingConfig::local_network();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Maximum number of polling attempts before giving up.
    pub max_attempts: u32,
    /// Seconds to wait between polling attempts.
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    /// Creates a default polling configuration suitable for public networks.
    ///
    /// - `max_attempts`: 30
    /// - `poll_interval_secs`: 10
    ///
    /// This results in a maximum wait time of ~5 minutes. Aggregation
    /// normally completes within a few seconds once enough validators have
    /// seen the message's block, but a recently churned validator set can
    /// take considerably longer to reach quorum.
    fn default() -> Self {
        Self {
            max_attempts: 30,
            poll_interval_secs: 10,
        }
    }
}

impl PollingConfig {
    /// Creates a polling configuration for local test networks.
    ///
    /// - `max_attempts`: 10
    /// - `poll_interval_secs`: 1
    ///
    /// Local networks have small validator sets and sign within a block or
    /// two, so this configuration polls aggressively and gives up fast.
    pub fn local_network() -> Self {
        Self {
            max_attempts: 10,
            poll_interval_secs: 1,
        }
    }

    /// Sets the maximum number of polling attempts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use teleporter_rs::PollingConfig;
    ///
    /// let config = PollingConfig::default().with_max_attempts(60);
    /// assert_eq!(config.max_attempts, 60);
    /// ```
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the interval between polling attempts in seconds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use teleporter_rs::PollingConfig;
    ///
    /// let config = PollingConfig::default().with_poll_interval_secs(30);
    /// assert_eq!(config.poll_interval_secs, 30);
    /// ```
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Returns the total maximum wait time in seconds.
    ///
    /// This is calculated as `max_attempts * poll_interval_secs`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use teleporter_rs::PollingConfig;
    ///
    /// let config = PollingConfig::default();
    /// assert_eq!(config.total_timeout_secs(), 300); // 5 minutes
    /// ```
    pub fn total_timeout_secs(&self) -> u64 {
        self.max_attempts as u64 * self.poll_interval_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollingConfig::default();
        assert_eq!(config.max_attempts, 30);
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.total_timeout_secs(), 300); // 5 minutes
    }

    #[test]
    fn test_local_network_config() {
        let config = PollingConfig::local_network();
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.poll_interval_secs, 1);
        assert_eq!(config.total_timeout_secs(), 10);
    }

    #[test]
    fn test_builder_methods() {
        let config = PollingConfig::default()
            .with_max_attempts(20)
            .with_poll_interval_secs(5);
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.total_timeout_secs(), 100);
    }

    #[test]
    fn test_config_is_copy() {
        let config = PollingConfig::default();
        let copied = config;
        assert_eq!(config, copied);
    }
}
