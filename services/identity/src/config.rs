/// Identity service configuration loaded from environment variables.
#[derive(Debug)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session JWTs.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Mail relay base URL (e.g. "http://mail-relay:8025").
    pub mail_relay_url: String,
    /// Sender address for outgoing OTP mail.
    pub mail_from: String,
    /// OTP validity window in minutes (default 10). Drives both enforcement
    /// and the email copy.
    pub otp_ttl_minutes: i64,
    /// Minimum seconds between OTP issuances per (email, purpose); default 60.
    pub otp_resend_cooldown_secs: i64,
    /// Expired-code sweep interval in seconds (default hourly).
    pub otp_sweep_interval_secs: u64,
    /// TCP port to listen on (default 3310). Env var: `IDENTITY_PORT`.
    pub identity_port: u16,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            mail_relay_url: std::env::var("MAIL_RELAY_URL").expect("MAIL_RELAY_URL"),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            otp_ttl_minutes: std::env::var("OTP_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            otp_resend_cooldown_secs: std::env::var("OTP_RESEND_COOLDOWN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            otp_sweep_interval_secs: std::env::var("OTP_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            identity_port: std::env::var("IDENTITY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3310),
        }
    }
}
