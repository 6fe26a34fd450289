//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use metalsnap::domain::error::DomainError;
use metalsnap::domain::ports::clock::Clock;
use metalsnap::domain::ports::config_source::{ConfigSource, ServiceConfig};
use metalsnap::domain::ports::quote_source::{MetalQuote, QuoteSource, METAL_SYMBOLS};
use metalsnap::infrastructure::sqlite::migrations::run_migrations;
use metalsnap::infrastructure::sqlite::snapshot_repo::SqliteSnapshotStore;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::time::Duration;

pub fn memory_store() -> SqliteSnapshotStore {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteSnapshotStore::new(conn)
}

pub fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// A quote with all eight rates and a provider timestamp.
pub fn usd_quote() -> MetalQuote {
    let mut quote = usd_quote_untimed();
    quote.taken_at = Some(utc(2026, 3, 14, 8, 58));
    quote
}

/// A quote with all eight rates but no provider timestamp, so the capture
/// instant comes from the clock.
pub fn usd_quote_untimed() -> MetalQuote {
    let mut quote = MetalQuote {
        base: "USD".to_string(),
        taken_at: None,
        units_per_usd: Default::default(),
        usd_per_unit: Default::default(),
        source: "stub".to_string(),
    };
    let per_usd = [
        ("XAU", "0.000309070958342115"),
        ("XAG", "0.0302840724"),
        ("XPT", "0.001040208"),
        ("XPD", "0.0009822046"),
    ];
    let usd_per = [
        ("XAU", "3235.5"),
        ("XAG", "33.0207"),
        ("XPT", "961.345"),
        ("XPD", "1018.117"),
    ];
    for (symbol, rate) in per_usd {
        quote
            .units_per_usd
            .insert(symbol.to_string(), Decimal::from_str(rate).unwrap());
    }
    for (symbol, rate) in usd_per {
        quote
            .usd_per_unit
            .insert(symbol.to_string(), Decimal::from_str(rate).unwrap());
    }
    quote
}

/// A quote missing one of the required symbols entirely.
pub fn incomplete_quote() -> MetalQuote {
    let mut quote = usd_quote();
    quote.units_per_usd.remove("XPD");
    quote.usd_per_unit.remove("XPD");
    quote
}

pub fn test_config(times: &[&str]) -> ServiceConfig {
    ServiceConfig {
        api_key: "test-key".to_string(),
        times: times.iter().map(|s| s.to_string()).collect(),
        use_database_schedule: false,
    }
}

enum StubResponse {
    Quote(MetalQuote),
    Fail(String),
}

/// Canned quote source that counts how often it is called.
pub struct StubQuoteSource {
    pub calls: AtomicUsize,
    response: StubResponse,
}

impl StubQuoteSource {
    pub fn ok(quote: MetalQuote) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: StubResponse::Quote(quote),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: StubResponse::Fail(message.to_string()),
        }
    }
}

#[async_trait]
impl QuoteSource for StubQuoteSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn latest(
        &self,
        _api_key: &str,
        _base: &str,
        _symbols: &[&str],
    ) -> Result<MetalQuote, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Quote(quote) => Ok(quote.clone()),
            StubResponse::Fail(message) => Err(DomainError::QuoteFetch(message.clone())),
        }
    }
}

pub struct StaticConfig(pub ServiceConfig);

impl ConfigSource for StaticConfig {
    fn current(&self) -> ServiceConfig {
        self.0.clone()
    }
}

/// Clock that starts at a fixed instant and advances by each waited
/// duration, so the pipeline runs entirely on virtual time. Every wait
/// lands one second past the requested instant, the way a real cycle never
/// resumes at the exact boundary.
pub struct VirtualClock {
    now: Mutex<NaiveDateTime>,
}

impl VirtualClock {
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now_local(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.now_local(), Utc)
    }

    async fn wait(&self, duration: Duration) {
        {
            let mut now = self.now.lock().unwrap();
            let step = chrono::Duration::from_std(duration)
                .unwrap_or_else(|_| chrono::Duration::zero())
                + chrono::Duration::seconds(1);
            *now += step;
        }
        tokio::task::yield_now().await;
    }
}

/// All four symbols are present in both directions.
pub fn assert_complete(quote: &MetalQuote) {
    for symbol in METAL_SYMBOLS {
        assert!(quote.units_per_usd.contains_key(symbol));
        assert!(quote.usd_per_unit.contains_key(symbol));
    }
}
