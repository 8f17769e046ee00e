//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds
    #[arg(long, env = "JWT_TTL_SECONDS", default_value_t = 86_400)]
    pub jwt_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn jwt_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(self.jwt_ttl_seconds)
    }
}
