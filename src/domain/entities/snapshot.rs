use crate::domain::error::DomainError;
use crate::domain::ports::quote_source::MetalQuote;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One captured price record. Immutable once persisted; the store enforces
/// at most one row per (calendar date, slot).
///
/// Prices are kept in both directions: `usd_per_*` is the conventional
/// USD-per-troy-ounce price, `*_per_usd` is the purchasing-power figure
/// (troy ounces obtainable for one USD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at_utc: DateTime<Utc>,
    pub run_slot: String,
    pub base_currency: String,
    pub usd_per_xau: Decimal,
    pub usd_per_xag: Decimal,
    pub usd_per_xpt: Decimal,
    pub usd_per_xpd: Decimal,
    pub xau_per_usd: Decimal,
    pub xag_per_usd: Decimal,
    pub xpt_per_usd: Decimal,
    pub xpd_per_usd: Decimal,
    pub source: String,
}

impl Snapshot {
    /// Builds the canonical record from a raw quote. All eight rates must be
    /// present; a partial quote never becomes a snapshot. The capture instant
    /// is the provider's reported timestamp when it sent one, otherwise
    /// `fallback_taken_at`.
    pub fn from_quote(
        quote: &MetalQuote,
        run_slot: &str,
        fallback_taken_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let usd_per = |symbol: &str| {
            quote.usd_per_unit.get(symbol).copied().ok_or_else(|| {
                DomainError::IncompleteQuote(format!("missing USD-per-{symbol} rate"))
            })
        };
        let per_usd = |symbol: &str| {
            quote.units_per_usd.get(symbol).copied().ok_or_else(|| {
                DomainError::IncompleteQuote(format!("missing {symbol}-per-USD rate"))
            })
        };

        Ok(Self {
            taken_at_utc: quote.taken_at.unwrap_or(fallback_taken_at),
            run_slot: run_slot.to_string(),
            base_currency: quote.base.clone(),
            usd_per_xau: usd_per("XAU")?,
            usd_per_xag: usd_per("XAG")?,
            usd_per_xpt: usd_per("XPT")?,
            usd_per_xpd: usd_per("XPD")?,
            xau_per_usd: per_usd("XAU")?,
            xag_per_usd: per_usd("XAG")?,
            xpt_per_usd: per_usd("XPT")?,
            xpd_per_usd: per_usd("XPD")?,
            source: quote.source.clone(),
        })
    }

    /// Calendar date the uniqueness key derives from.
    pub fn taken_on(&self) -> NaiveDate {
        self.taken_at_utc.date_naive()
    }
}
