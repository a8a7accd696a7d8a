//! Application Configuration
//!
//! Immutable configuration for the auth application layer, constructed
//! once at process start and shared by reference. Secrets are never
//! mutated after startup.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing secret for access tokens
    pub access_token_secret: Vec<u8>,
    /// Signing secret for refresh tokens (distinct from access)
    pub refresh_token_secret: Vec<u8>,
    /// Signing secret for password-reset tokens (distinct from both)
    pub reset_token_secret: Vec<u8>,
    /// Access token TTL (30 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token TTL (7 days); also the refresh cookie Max-Age
    pub refresh_token_ttl: Duration,
    /// Password-reset token TTL (15 minutes)
    pub reset_token_ttl: Duration,
    /// Name of the refresh token cookie
    pub refresh_cookie_name: String,
    /// Whether to require Secure on the refresh cookie
    pub cookie_secure: bool,
    /// SameSite policy for the refresh cookie
    pub cookie_same_site: SameSite,
    /// Emails permitted to self-register with role=admin
    pub admin_allowlist: Vec<String>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Frontend base URL used in password-reset links
    pub client_url: String,
    /// From address for outbound mail
    pub mail_from: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: vec![0u8; 32],
            refresh_token_secret: vec![0u8; 32],
            reset_token_secret: vec![0u8; 32],
            access_token_ttl: Duration::from_secs(30 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            reset_token_ttl: Duration::from_secs(15 * 60),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            admin_allowlist: Vec::new(),
            password_pepper: None,
            client_url: "http://localhost:3000".to_string(),
            mail_from: "Accounts <no-reply@localhost>".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with random, distinct per-class secrets
    pub fn with_random_secrets() -> Self {
        use rand::RngCore;

        let secret = || {
            let mut bytes = vec![0u8; 32];
            rand::rng().fill_bytes(&mut bytes);
            bytes
        };

        Self {
            access_token_secret: secret(),
            refresh_token_secret: secret(),
            reset_token_secret: secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, random secrets)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Cookie configuration for the refresh token cookie
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.refresh_token_ttl.as_secs() as i64),
        }
    }

    /// Whether an email may self-register as admin
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_allowlist.iter().any(|allowed| allowed == email)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_are_distinct_per_class() {
        let config = AuthConfig::with_random_secrets();
        assert_ne!(config.access_token_secret, config.refresh_token_secret);
        assert_ne!(config.access_token_secret, config.reset_token_secret);
        assert_ne!(config.refresh_token_secret, config.reset_token_secret);
    }

    #[test]
    fn test_development_config_is_insecure_cookie_only() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
    }

    #[test]
    fn test_refresh_cookie_matches_ttl() {
        let config = AuthConfig::default();
        let cookie = config.refresh_cookie();
        assert_eq!(cookie.name, "refreshToken");
        assert_eq!(cookie.max_age_secs, Some(7 * 24 * 3600));
        assert!(cookie.http_only);
    }

    #[test]
    fn test_admin_allowlist() {
        let config = AuthConfig {
            admin_allowlist: vec!["boss@example.com".to_string()],
            ..AuthConfig::default()
        };
        assert!(config.is_admin_email("boss@example.com"));
        assert!(!config.is_admin_email("intern@example.com"));
    }
}
