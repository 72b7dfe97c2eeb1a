use advisor_core::{AnalysisError, Bar, Fundamentals, HistoryPeriod, MarketDataProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_SUMMARY_BASE_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

// Yahoo rejects requests without a browser-looking User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Yahoo Finance market data client
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    /// Fetch daily bars from the v8 chart endpoint. Rows with any null
    /// component are skipped, matching how Yahoo reports halted sessions.
    async fn get_history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<Bar>, AnalysisError> {
        let url = format!("{}/{}", CHART_BASE_URL, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("range", period.as_str()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| AnalysisError::Provider(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(AnalysisError::NotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(AnalysisError::Provider(format!(
                "chart HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        tracing::debug!("Fetched {} chart for {}", period.as_str(), symbol);
        bars_from_chart(body, symbol)
    }

    /// Fetch company profile and valuation fields from the v10 quoteSummary
    /// endpoint. A symbol Yahoo knows no fundamentals for yields an empty
    /// record rather than an error; callers apply their own defaults.
    async fn get_info(&self, symbol: &str) -> Result<Fundamentals, AnalysisError> {
        let url = format!("{}/{}", QUOTE_SUMMARY_BASE_URL, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("modules", "price,summaryDetail,assetProfile")])
            .send()
            .await
            .map_err(|e| AnalysisError::Provider(e.to_string()))?;

        if response.status().as_u16() == 404 {
            tracing::debug!("No quoteSummary for {}", symbol);
            return Ok(Fundamentals::default());
        }
        if !response.status().is_success() {
            return Err(AnalysisError::Provider(format!(
                "quoteSummary HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let body: QuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        Ok(fundamentals_from_summary(body, symbol))
    }
}

fn bars_from_chart(response: ChartResponse, symbol: &str) -> Result<Vec<Bar>, AnalysisError> {
    if let Some(err) = response.chart.error {
        tracing::debug!("Yahoo chart error for {}: {}", symbol, err.description);
        return Err(AnalysisError::NotFound(symbol.to_string()));
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| r.pop())
        .ok_or_else(|| AnalysisError::NotFound(symbol.to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::Parse(format!("no quote block for {}", symbol)))?;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            quote.open.get(i).and_then(|x| *x),
            quote.high.get(i).and_then(|x| *x),
            quote.low.get(i).and_then(|x| *x),
            quote.close.get(i).and_then(|x| *x),
            quote.volume.get(i).and_then(|x| *x),
        ) {
            bars.push(Bar {
                timestamp: DateTime::from_timestamp(ts, 0).unwrap_or_else(|| Utc::now()),
                open,
                high,
                low,
                close,
                volume,
            });
        }
    }

    Ok(bars)
}

fn fundamentals_from_summary(response: QuoteSummaryResponse, symbol: &str) -> Fundamentals {
    let result = match response.quote_summary.result.and_then(|mut r| r.pop()) {
        Some(r) => r,
        None => {
            if let Some(err) = response.quote_summary.error {
                tracing::debug!("Yahoo quoteSummary error for {}: {}", symbol, err.description);
            }
            return Fundamentals::default();
        }
    };

    let price = result.price.unwrap_or_default();
    let summary = result.summary_detail.unwrap_or_default();
    let profile = result.asset_profile.unwrap_or_default();

    Fundamentals {
        company_name: price.long_name.or(price.short_name),
        business_summary: profile.long_business_summary,
        logo_url: profile.website.as_deref().and_then(logo_url_from_website),
        forward_pe: summary.forward_pe.and_then(|v| v.raw),
        dividend_yield: summary.dividend_yield.and_then(|v| v.raw),
    }
}

/// Clearbit logo endpoint keyed by the company's website domain.
fn logo_url_from_website(website: &str) -> Option<String> {
    let trimmed = website
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    let domain = trimmed.split('/').next()?;
    if domain.is_empty() {
        return None;
    }
    Some(format!("https://logo.clearbit.com/{}", domain))
}

// v8 chart response structures

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// v10 quoteSummary response structures

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Default, Deserialize)]
struct PriceModule {
    #[serde(rename = "longName")]
    long_name: Option<String>,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetailModule {
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfileModule {
    #[serde(rename = "longBusinessSummary")]
    long_business_summary: Option<String>,
    website: Option<String>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; only `raw` matters here.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}
