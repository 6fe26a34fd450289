use crate::domain::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The fixed symbol set every capture cycle requests.
pub const METAL_SYMBOLS: [&str; 4] = ["XAU", "XAG", "XPT", "XPD"];

/// Raw rates from a provider, in both directions, keyed by metal symbol.
/// Completeness is not guaranteed here; the snapshot mapper rejects quotes
/// that are missing required rates.
#[derive(Debug, Clone, Default)]
pub struct MetalQuote {
    pub base: String,
    /// Provider-reported capture instant, when the provider sends one.
    pub taken_at: Option<DateTime<Utc>>,
    /// Units of metal per one USD (purchasing power).
    pub units_per_usd: HashMap<String, Decimal>,
    /// USD per one unit of metal.
    pub usd_per_unit: HashMap<String, Decimal>,
    pub source: String,
}

/// Pluggable price provider.
/// Every failure shape (network, HTTP status, body parse, provider-reported
/// error) surfaces as `DomainError::QuoteFetch` so the pipeline treats them
/// uniformly as "fetch failed, try again next cycle".
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Provider label stored on each snapshot (e.g., "metals-api.com").
    fn name(&self) -> &str;

    async fn latest(
        &self,
        api_key: &str,
        base: &str,
        symbols: &[&str],
    ) -> Result<MetalQuote, DomainError>;
}
