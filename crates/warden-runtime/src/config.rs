//! Environment-driven runtime configuration.

use std::time::Duration;

use shared_types::UserId;
use tracing::warn;

/// All runtime tunables, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardenConfig {
    /// Administrator allow-list.
    pub admin_ids: Vec<UserId>,
    /// Period of the expiry sweep.
    pub sweep_period: Duration,
    /// Warnings start this many days before expiry.
    pub warn_window_days: u32,
    /// Minimum hours between two warnings to the same user.
    pub cooldown_hours: u32,
    /// Inter-send delay during a broadcast.
    pub broadcast_delay: Duration,
    /// Broadcast progress snapshot cadence, in attempts.
    pub progress_every: u64,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            admin_ids: Vec::new(),
            sweep_period: Duration::from_secs(3600),
            warn_window_days: 3,
            cooldown_hours: 24,
            broadcast_delay: Duration::from_millis(50),
            progress_every: 20,
        }
    }
}

impl WardenConfig {
    /// Loads configuration from `WARDEN_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            admin_ids: lookup("WARDEN_ADMIN_IDS")
                .map(|raw| parse_admin_ids(&raw))
                .unwrap_or_default(),
            sweep_period: Duration::from_secs(parse_or(
                lookup("WARDEN_SWEEP_PERIOD_SECS"),
                "WARDEN_SWEEP_PERIOD_SECS",
                defaults.sweep_period.as_secs(),
            )),
            warn_window_days: parse_or(
                lookup("WARDEN_WARN_WINDOW_DAYS"),
                "WARDEN_WARN_WINDOW_DAYS",
                defaults.warn_window_days,
            ),
            cooldown_hours: parse_or(
                lookup("WARDEN_COOLDOWN_HOURS"),
                "WARDEN_COOLDOWN_HOURS",
                defaults.cooldown_hours,
            ),
            broadcast_delay: Duration::from_millis(parse_or(
                lookup("WARDEN_BROADCAST_DELAY_MS"),
                "WARDEN_BROADCAST_DELAY_MS",
                defaults.broadcast_delay.as_millis() as u64,
            )),
            progress_every: parse_or(
                lookup("WARDEN_PROGRESS_EVERY"),
                "WARDEN_PROGRESS_EVERY",
                defaults.progress_every,
            )
            .max(1),
        }
    }
}

fn parse_admin_ids(raw: &str) -> Vec<UserId> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i64>() {
            Ok(id) => Some(UserId(id)),
            Err(_) => {
                warn!("[runtime] Ignoring malformed admin id {:?}", part);
                None
            }
        })
        .collect()
}

fn parse_or<T: std::str::FromStr + Copy>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("[runtime] Ignoring malformed {}={:?}", key, raw);
            default
        }),
    }
}
