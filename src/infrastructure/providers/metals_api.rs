use crate::domain::error::DomainError;
use crate::domain::ports::quote_source::{MetalQuote, QuoteSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://metals-api.com";

/// metals-api.com `latest` endpoint client.
///
/// The endpoint returns metal-per-USD rates under the bare symbol ("XAU")
/// and USD-per-metal rates under the base-prefixed symbol ("USDXAU"), so one
/// request carries both price directions.
pub struct MetalsApiSource {
    client: reqwest::Client,
    base_url: String,
}

impl MetalsApiSource {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }
}

impl Default for MetalsApiSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct LatestResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    rates: HashMap<String, Decimal>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    info: Option<String>,
}

fn quote_from_response(
    data: LatestResponse,
    base: &str,
    symbols: &[&str],
    source: &str,
) -> Result<MetalQuote, DomainError> {
    if !data.success {
        let (code, info) = match data.error {
            Some(e) => (e.code, e.info.unwrap_or_default()),
            None => (0, String::new()),
        };
        return Err(DomainError::QuoteFetch(format!(
            "{source} reported failure: {code} - {info}"
        )));
    }

    let mut quote = MetalQuote {
        base: data.base.unwrap_or_else(|| base.to_string()),
        taken_at: data
            .timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        units_per_usd: HashMap::new(),
        usd_per_unit: HashMap::new(),
        source: source.to_string(),
    };

    for symbol in symbols {
        if let Some(rate) = data.rates.get(*symbol) {
            quote.units_per_usd.insert((*symbol).to_string(), *rate);
        }
        if let Some(rate) = data.rates.get(&format!("{base}{symbol}")) {
            quote.usd_per_unit.insert((*symbol).to_string(), *rate);
        }
    }

    Ok(quote)
}

#[async_trait]
impl QuoteSource for MetalsApiSource {
    fn name(&self) -> &str {
        "metals-api.com"
    }

    async fn latest(
        &self,
        api_key: &str,
        base: &str,
        symbols: &[&str],
    ) -> Result<MetalQuote, DomainError> {
        let mut requested: Vec<String> = vec![base.to_string()];
        requested.extend(symbols.iter().map(|s| s.to_string()));
        requested.extend(symbols.iter().map(|s| format!("{base}{s}")));
        let symbols_param = requested.join(",");

        let resp = self
            .client
            .get(format!("{}/api/latest", self.base_url))
            .query(&[
                ("access_key", api_key),
                ("base", base),
                ("symbols", symbols_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::QuoteFetch(format!("network error: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::QuoteFetch(format!(
                "{} returned {}",
                self.name(),
                resp.status()
            )));
        }

        let data: LatestResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::QuoteFetch(format!("malformed response: {e}")))?;

        quote_from_response(data, base, symbols, self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::quote_source::METAL_SYMBOLS;
    use std::str::FromStr;

    #[test]
    fn test_success_body_maps_both_directions() {
        let body = r#"{
            "success": true,
            "timestamp": 1772102400,
            "base": "USD",
            "date": "2026-02-26",
            "rates": {
                "USD": 1,
                "XAU": 0.000309070958342115,
                "XAG": 0.0302840724,
                "XPT": 0.001040208,
                "XPD": 0.0009822046,
                "USDXAU": 3235.5,
                "USDXAG": 33.0207,
                "USDXPT": 961.345,
                "USDXPD": 1018.117
            }
        }"#;
        let data: LatestResponse = serde_json::from_str(body).unwrap();
        let quote = quote_from_response(data, "USD", &METAL_SYMBOLS, "metals-api.com").unwrap();

        assert_eq!(quote.base, "USD");
        assert_eq!(
            quote.units_per_usd.get("XAU"),
            Some(&Decimal::from_str("0.000309070958342115").unwrap())
        );
        assert_eq!(
            quote.usd_per_unit.get("XPD"),
            Some(&Decimal::from_str("1018.117").unwrap())
        );
        assert_eq!(
            quote.taken_at.map(|t| t.timestamp()),
            Some(1772102400)
        );
    }

    #[test]
    fn test_provider_error_body_is_fetch_failure() {
        let body = r#"{
            "success": false,
            "error": {"code": 101, "type": "invalid_access_key", "info": "You have not supplied a valid API Access Key."}
        }"#;
        let data: LatestResponse = serde_json::from_str(body).unwrap();
        let err = quote_from_response(data, "USD", &METAL_SYMBOLS, "metals-api.com").unwrap_err();
        assert!(matches!(err, DomainError::QuoteFetch(msg) if msg.contains("101")));
    }

    #[test]
    fn test_missing_rates_are_left_out_not_invented() {
        let body = r#"{"success": true, "timestamp": 1772102400, "base": "USD", "rates": {"XAU": 0.0003}}"#;
        let data: LatestResponse = serde_json::from_str(body).unwrap();
        let quote = quote_from_response(data, "USD", &METAL_SYMBOLS, "metals-api.com").unwrap();
        assert_eq!(quote.units_per_usd.len(), 1);
        assert!(quote.usd_per_unit.is_empty());
    }
}
