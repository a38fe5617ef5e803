//! Configuration types for doc-convert

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Conversion endpoint configuration
///
/// Groups settings describing how to reach the conversion service.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the host running the conversion endpoint
    pub base_url: String,

    /// Path of the conversion endpoint relative to `base_url` (default: "/convert")
    #[serde(default = "default_convert_path")]
    pub convert_path: String,

    /// Optional authentication header value sent as `Authorization`
    #[serde(default)]
    pub auth_header: Option<String>,

    /// Timeout for one conversion request (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_ms_serde")]
    pub request_timeout: Duration,

    /// Public address of the document server, when it differs from the
    /// internal address embedded in returned file URLs
    #[serde(default)]
    pub public_url: Option<String>,

    /// Internal document server address to rewrite to `public_url`
    #[serde(default)]
    pub internal_url: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            convert_path: default_convert_path(),
            auth_header: None,
            request_timeout: default_request_timeout(),
            public_url: None,
            internal_url: None,
        }
    }
}

/// Poll loop configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between poll submissions (default: 1000 ms)
    #[serde(default = "default_poll_interval", with = "duration_ms_serde")]
    pub poll_interval: Duration,

    /// Maximum total polling time before the session fails with a timeout
    /// classification (default: none — poll until the server terminates the job)
    #[serde(default, with = "optional_duration_ms_serde")]
    pub max_poll_duration: Option<Duration>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            max_poll_duration: None,
        }
    }
}

/// Main configuration for [`ConvertClient`](crate::ConvertClient)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Conversion endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Poll loop settings
    #[serde(default)]
    pub polling: PollingConfig,

    /// Message template overrides, keyed by
    /// [`MessageKey::name`](crate::classify::MessageKey::name)
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl Config {
    /// Validate the configuration
    ///
    /// Returns [`Error::Config`] naming the offending key on the first invalid
    /// value found.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.base_url.is_empty() {
            return Err(Error::Config {
                message: "base URL must not be empty".to_string(),
                key: Some("endpoint.base_url".to_string()),
            });
        }

        let base = url::Url::parse(&self.endpoint.base_url).map_err(|e| Error::Config {
            message: format!("base URL is not a valid URL: {}", e),
            key: Some("endpoint.base_url".to_string()),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("base URL scheme {:?} is not http or https", base.scheme()),
                key: Some("endpoint.base_url".to_string()),
            });
        }

        if !self.endpoint.convert_path.starts_with('/') {
            return Err(Error::Config {
                message: "convert path must start with '/'".to_string(),
                key: Some("endpoint.convert_path".to_string()),
            });
        }

        if self.polling.poll_interval.is_zero() {
            return Err(Error::Config {
                message: "poll interval must be non-zero".to_string(),
                key: Some("polling.poll_interval".to_string()),
            });
        }

        if let Some(max) = self.polling.max_poll_duration {
            if max < self.polling.poll_interval {
                return Err(Error::Config {
                    message: "max poll duration is shorter than the poll interval".to_string(),
                    key: Some("polling.max_poll_duration".to_string()),
                });
            }
        }

        // The rewrite pair only makes sense as a pair
        if self.endpoint.public_url.is_some() != self.endpoint.internal_url.is_some() {
            return Err(Error::Config {
                message: "public_url and internal_url must be set together".to_string(),
                key: Some("endpoint.public_url".to_string()),
            });
        }

        Ok(())
    }

    /// Full URL of the conversion endpoint
    pub fn convert_url(&self) -> String {
        format!(
            "{}{}",
            self.endpoint.base_url.trim_end_matches('/'),
            self.endpoint.convert_path
        )
    }
}

fn default_convert_path() -> String {
    "/convert".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(1000)
}

// Duration serialization helper (milliseconds — poll timing is sub-second)
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// Optional Duration serialization helper
mod optional_duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            endpoint: EndpointConfig {
                base_url: "http://wiki.example.com".to_string(),
                ..EndpointConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_poll_interval_is_one_second() {
        assert_eq!(PollingConfig::default().poll_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_valid_config_passes() {
        valid_config().validate().unwrap();
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config { key: Some(ref k), .. } if k == "endpoint.base_url"
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.endpoint.base_url = "ftp://wiki.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = valid_config();
        config.polling.poll_interval = Duration::ZERO;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config { key: Some(ref k), .. } if k == "polling.poll_interval"
        ));
    }

    #[test]
    fn test_max_poll_duration_below_interval_rejected() {
        let mut config = valid_config();
        config.polling.max_poll_duration = Some(Duration::from_millis(200));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unpaired_url_rewrite_rejected() {
        let mut config = valid_config();
        config.endpoint.internal_url = Some("http://ds-internal:8080".to_string());
        assert!(config.validate().is_err());

        config.endpoint.public_url = Some("https://ds.example.com".to_string());
        config.validate().unwrap();
    }

    #[test]
    fn test_convert_url_joins_without_double_slash() {
        let mut config = valid_config();
        config.endpoint.base_url = "http://wiki.example.com/".to_string();
        assert_eq!(config.convert_url(), "http://wiki.example.com/convert");
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let mut config = valid_config();
        config.polling.poll_interval = Duration::from_millis(250);
        config.polling.max_poll_duration = Some(Duration::from_millis(60_000));

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.polling.poll_interval, Duration::from_millis(250));
        assert_eq!(back.polling.max_poll_duration, Some(Duration::from_millis(60_000)));
    }
}
