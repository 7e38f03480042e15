use std::env;

use crate::services::ledger::DurationPolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub seed_demo_data: bool,
    pub duration_policy: DurationPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let duration_policy = match get("DURATION_POLICY") {
            Some(raw) => DurationPolicy::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("unknown DURATION_POLICY {raw:?}, using discrete");
                DurationPolicy::Discrete
            }),
            None => DurationPolicy::Discrete,
        };

        Self {
            port: get("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            seed_demo_data: get("SEED_DEMO_DATA")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
            duration_policy,
        }
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
