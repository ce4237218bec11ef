use serde::Deserialize;

pub const DEFAULT_ANALYTICS_PERIOD_DAYS: u64 = 30;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<u64>,
}

impl AnalyticsQuery {
    pub fn period_days(&self) -> u64 {
        self.period.unwrap_or(DEFAULT_ANALYTICS_PERIOD_DAYS)
    }
}

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub query: String,
}
