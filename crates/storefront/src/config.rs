//! Storefront configuration loaded from environment variables.
//!
//! API credentials are deployment-time values. They are never compiled into
//! the binary and are held as [`SecretString`] once loaded.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WOO_STORE_URL` - Store root URL (e.g., `https://aarsunwoods.in/0newsite/`)
//! - `WOO_CONSUMER_KEY` - WooCommerce REST API consumer key
//! - `WOO_CONSUMER_SECRET` - WooCommerce REST API consumer secret (high entropy)
//!
//! ## Optional
//! - `WOO_AUTH_POLICY` - `catalog-basic` (default) or `prefer-bearer`
//! - `AARSUN_PLACEHOLDER_IMAGE` - Image used for products without images
//! - `AARSUN_SHIPPING_FLAT_RATE` - Flat shipping charge at checkout (default: 10.00)
//! - `AARSUN_STORAGE_PATH` - Local storage file (default: `<data dir>/aarsun/storage.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::path::PathBuf;

use aarsun_core::Price;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::woocommerce::AuthPolicy;

/// Image shown for products that have no images upstream.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/500";

/// Flat shipping charge applied at checkout, in cents.
const DEFAULT_SHIPPING_CENTS: i64 = 1000;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// WooCommerce API configuration
    pub woocommerce: WooCommerceConfig,
    /// Image URL used when a product has no images
    pub placeholder_image: String,
    /// Flat shipping charge added to every order
    pub shipping_flat_rate: Price,
    /// Explicit local storage file, if configured
    pub storage_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// WooCommerce REST API configuration.
///
/// Implements `Debug` manually to redact the application credentials.
#[derive(Clone)]
pub struct WooCommerceConfig {
    /// Store root URL without a trailing slash
    pub store_url: String,
    /// REST API consumer key (application credential)
    pub consumer_key: SecretString,
    /// REST API consumer secret (application credential)
    pub consumer_secret: SecretString,
    /// Which Authorization header each endpoint receives
    pub auth_policy: AuthPolicy,
}

impl std::fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("store_url", &self.store_url)
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .field("auth_policy", &self.auth_policy)
            .finish()
    }
}

impl WooCommerceConfig {
    /// Build a configuration from explicit values.
    ///
    /// A trailing slash on `store_url` is removed.
    #[must_use]
    pub fn new(
        store_url: &str,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            store_url: store_url.trim_end_matches('/').to_string(),
            consumer_key: SecretString::from(consumer_key.into()),
            consumer_secret: SecretString::from(consumer_secret.into()),
            auth_policy: AuthPolicy::default(),
        }
    }

    /// Replace the auth header policy.
    #[must_use]
    pub fn with_auth_policy(mut self, auth_policy: AuthPolicy) -> Self {
        self.auth_policy = auth_policy;
        self
    }

    fn from_env() -> Result<Self, ConfigError> {
        let store_url = get_required_env("WOO_STORE_URL")?;
        Url::parse(&store_url)
            .map_err(|e| ConfigError::InvalidEnvVar("WOO_STORE_URL".to_string(), e.to_string()))?;

        let auth_policy = get_env_or_default("WOO_AUTH_POLICY", "catalog-basic")
            .parse::<AuthPolicy>()
            .map_err(|e| ConfigError::InvalidEnvVar("WOO_AUTH_POLICY".to_string(), e))?;

        Ok(Self {
            store_url: store_url.trim_end_matches('/').to_string(),
            consumer_key: get_required_secret("WOO_CONSUMER_KEY")?,
            consumer_secret: get_validated_secret("WOO_CONSUMER_SECRET")?,
            auth_policy,
        })
    }
}

impl StoreConfig {
    /// Configuration with default storefront settings around `woocommerce`.
    #[must_use]
    pub fn new(woocommerce: WooCommerceConfig) -> Self {
        Self {
            woocommerce,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            shipping_flat_rate: Price::from_cents(DEFAULT_SHIPPING_CENTS),
            storage_path: None,
            sentry_dsn: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let woocommerce = WooCommerceConfig::from_env()?;
        let placeholder_image =
            get_env_or_default("AARSUN_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE);
        let shipping_flat_rate = match get_optional_env("AARSUN_SHIPPING_FLAT_RATE") {
            Some(raw) => raw.parse::<Price>().map_err(|e| {
                ConfigError::InvalidEnvVar("AARSUN_SHIPPING_FLAT_RATE".to_string(), e.to_string())
            })?,
            None => Price::from_cents(DEFAULT_SHIPPING_CENTS),
        };

        Ok(Self {
            woocommerce,
            placeholder_image,
            shipping_flat_rate,
            storage_path: get_optional_env("AARSUN_STORAGE_PATH").map(PathBuf::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Local storage file: the configured path, else `<data dir>/aarsun/storage.json`.
    #[must_use]
    pub fn resolved_storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("aarsun").join("storage.json"))
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key pair generated by WooCommerce."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

/// Expose the consumer key pair for building a Basic credential.
pub(crate) fn basic_credentials(config: &WooCommerceConfig) -> String {
    format!(
        "{}:{}",
        config.consumer_key.expose_secret(),
        config.consumer_secret.expose_secret()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("cs_your_secret_here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("cs_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_generated_key() {
        let result =
            validate_secret_strength("cs_9b1e07c4d2a85f36e0b7c1d94a2f58e63b0c7d1a", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = WooCommerceConfig::new("https://shop.test/site/", "ck", "cs");
        assert_eq!(config.store_url, "https://shop.test/site");
        assert_eq!(config.auth_policy, AuthPolicy::CatalogBasic);
    }

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::new(WooCommerceConfig::new("https://shop.test", "ck", "cs"));
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(config.shipping_flat_rate, Price::from_cents(1000));
    }

    #[test]
    fn test_explicit_storage_path_wins() {
        let mut config = StoreConfig::new(WooCommerceConfig::new("https://shop.test", "ck", "cs"));
        config.storage_path = Some(PathBuf::from("/tmp/aarsun.json"));
        assert_eq!(
            config.resolved_storage_path(),
            Some(PathBuf::from("/tmp/aarsun.json"))
        );
    }

    #[test]
    fn test_basic_credentials_joins_pair() {
        let config = WooCommerceConfig::new("https://shop.test", "ck_1", "cs_2");
        assert_eq!(basic_credentials(&config), "ck_1:cs_2");
    }

    #[test]
    fn test_woocommerce_config_debug_redacts_secrets() {
        let config = WooCommerceConfig::new(
            "https://shop.test",
            "ck_super_secret_key",
            "cs_super_secret_value",
        );

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("https://shop.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("ck_super_secret_key"));
        assert!(!debug_output.contains("cs_super_secret_value"));
    }
}
