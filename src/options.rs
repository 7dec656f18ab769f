use std::time::Duration;

use serde::Deserialize;

use crate::probes::DEFAULT_MEDIA_DEADLINE;

/// Per-call knobs for [`DeviceDetector::detect`](crate::DeviceDetector::detect).
///
/// Deserializable so it can sit in a host application's config file:
///
/// ```yaml
/// user_agent: "Mozilla/5.0 (X11; Linux x86_64)"
/// media_deadline_ms: 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetectOptions {
    /// Classified instead of the host's user agent when non-empty.
    user_agent: Option<String>,
    media_deadline_ms: u64,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            media_deadline_ms: DEFAULT_MEDIA_DEADLINE.as_millis() as u64,
        }
    }
}

impl DetectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Upper bound for each image codec check.
    #[must_use]
    pub fn with_media_deadline(mut self, deadline: Duration) -> Self {
        self.media_deadline_ms = deadline.as_millis() as u64;
        self
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn media_deadline(&self) -> Duration {
        Duration::from_millis(self.media_deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = DetectOptions::new();
        assert_eq!(opts.user_agent(), None);
        assert_eq!(opts.media_deadline(), Duration::from_secs(2));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let opts: DetectOptions = serde_yaml::from_str("media_deadline_ms: 250\n").unwrap();
        assert_eq!(opts.media_deadline(), Duration::from_millis(250));
        assert_eq!(opts.user_agent(), None);

        let opts: DetectOptions = serde_yaml::from_str("user_agent: curl/8.4.0\n").unwrap();
        assert_eq!(opts.user_agent(), Some("curl/8.4.0"));
        assert_eq!(opts.media_deadline(), DEFAULT_MEDIA_DEADLINE);
    }

    #[test]
    fn builder() {
        let opts = DetectOptions::new()
            .with_user_agent("ua")
            .with_media_deadline(Duration::from_millis(10));
        assert_eq!(opts.user_agent(), Some("ua"));
        assert_eq!(opts.media_deadline(), Duration::from_millis(10));
    }
}
