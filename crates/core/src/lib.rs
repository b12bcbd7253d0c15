pub mod chart;
pub mod domain;
pub mod ingest;
pub mod time;
pub mod view;
pub mod viewer;

pub mod config {
    use anyhow::Context;

    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_RETRIES: u32 = 1;
    const DEFAULT_CHART_SIZE_PX: u32 = crate::viewer::DEFAULT_CHART_SIZE;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub chart_api_base_url: Option<String>,
        pub chart_api_timeout_secs: u64,
        pub chart_api_retries: u32,
        pub chart_size_px: u32,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                chart_api_base_url: std::env::var("CHART_API_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                chart_api_timeout_secs: parse_env("CHART_API_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
                chart_api_retries: parse_env("CHART_API_RETRIES")?.unwrap_or(DEFAULT_RETRIES),
                chart_size_px: parse_env("CHART_SIZE_PX")?.unwrap_or(DEFAULT_CHART_SIZE_PX),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_chart_api_base_url(&self) -> anyhow::Result<&str> {
            self.chart_api_base_url
                .as_deref()
                .context("CHART_API_BASE_URL is required")
        }
    }

    fn parse_env<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match std::env::var(key) {
            Ok(s) if !s.trim().is_empty() => s
                .trim()
                .parse::<T>()
                .map(Some)
                .with_context(|| format!("{key} is not a valid value: {s}")),
            _ => Ok(None),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_base_url_is_reported() {
            let settings = Settings {
                chart_api_base_url: None,
                chart_api_timeout_secs: DEFAULT_TIMEOUT_SECS,
                chart_api_retries: DEFAULT_RETRIES,
                chart_size_px: DEFAULT_CHART_SIZE_PX,
                sentry_dsn: None,
            };
            let err = settings.require_chart_api_base_url().unwrap_err();
            assert!(err.to_string().contains("CHART_API_BASE_URL"));
        }

        #[test]
        fn parse_env_rejects_garbage() {
            std::env::set_var("NATAL_TEST_PARSE_GARBAGE", "abc");
            assert!(parse_env::<u64>("NATAL_TEST_PARSE_GARBAGE").is_err());
            std::env::set_var("NATAL_TEST_PARSE_OK", " 42 ");
            assert_eq!(parse_env::<u64>("NATAL_TEST_PARSE_OK").unwrap(), Some(42));
            assert_eq!(parse_env::<u64>("NATAL_TEST_PARSE_UNSET").unwrap(), None);
        }
    }
}
