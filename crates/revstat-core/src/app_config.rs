#[derive(Clone)]
pub struct AppConfig {
    pub paapi_access_key_id: String,
    pub paapi_secret_key: String,
    pub paapi_associate_tag: Option<String>,
    pub paapi_endpoint: String,
    /// Pacing delay before each product API call, in seconds.
    pub api_delay_secs: u64,
    /// Fixed delay between retry attempts, in seconds.
    pub retry_delay_secs: u64,
    /// Per-attempt HTTP request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Total attempts per network operation (first try included).
    pub max_attempts: u32,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("paapi_access_key_id", &self.paapi_access_key_id)
            .field("paapi_secret_key", &"[redacted]")
            .field("paapi_associate_tag", &self.paapi_associate_tag)
            .field("paapi_endpoint", &self.paapi_endpoint)
            .field("api_delay_secs", &self.api_delay_secs)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
