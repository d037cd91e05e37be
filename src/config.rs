/// Environment variable holding the public base URL embedded in QR links.
pub const BASE_URL_ENV: &str = "CHECKIN_BASE_URL";

/// Environment variable holding the HMAC signing secret.
pub const SECRET_ENV: &str = "QR_SECRET_KEY";

/// Configuration for the check-in token service.
///
/// Constructed once at process startup and injected into
/// `CheckInTokenService`; there is no global singleton. The secret is
/// checked lazily at generation time so that a misconfigured deployment
/// fails with a precise error on first use instead of at load.
#[derive(Debug, Clone)]
pub struct CheckInConfig {
    /// Base URL the encoded payloads link back to, e.g. `https://app.example.com`.
    pub base_url: String,
    /// Shared secret for the HMAC-SHA256 check-in codes.
    pub secret: String,
}

impl CheckInConfig {
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret: secret.into(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// Both variables default to the empty string when unset; an empty
    /// secret is rejected at generation time.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV).unwrap_or_default(),
            secret: std::env::var(SECRET_ENV).unwrap_or_default(),
        }
    }
}
