use std::time::Duration;

use tracing::{error, info};

use crate::infra::db::DbOtpRepository;
use crate::infra::mailer::RelayMailer;
use crate::usecase::otp::OtpService;

/// Spawn the periodic expired-code sweep.
///
/// Pure storage hygiene: verification filters on expiry independently, so a
/// missed or late sweep never affects correctness. Runs on its own schedule
/// and takes no lock that could block issue/verify.
pub fn spawn_sweeper(otp: OtpService<DbOtpRepository, RelayMailer>, interval_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // First tick fires immediately; skip it so startup isn't a sweep.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match otp.sweep_expired().await {
                Ok(purged) => info!(purged, "expired otp sweep"),
                Err(e) => error!(error = %e, "expired otp sweep failed"),
            }
        }
    });
}
