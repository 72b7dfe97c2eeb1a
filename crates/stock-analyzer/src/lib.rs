use advisor_core::{AnalysisError, Bar, Fundamentals, HistoryPeriod, MarketDataProvider, StockAnalysis};
use chrono::Duration;
use recommendation_engine::RecommendationEngine;
use std::sync::Arc;

pub mod cache;
pub mod symbol;

pub use cache::ExpiringCache;
pub use symbol::{format_symbol, SUGGESTED_SYMBOLS};

const CACHE_TTL_SECS: i64 = 300; // 5 minutes

/// Placeholder shown when the provider has no business description.
const NO_DESCRIPTION: &str = "Información no disponible";

/// Ties together symbol formatting, the data provider, the scoring engine
/// and a short-lived result cache.
pub struct StockAnalyzer {
    provider: Arc<dyn MarketDataProvider>,
    engine: RecommendationEngine,
    cache: ExpiringCache<(String, Option<String>), StockAnalysis>,
}

impl StockAnalyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            engine: RecommendationEngine::new(),
            cache: ExpiringCache::new(Duration::seconds(CACHE_TTL_SECS)),
        }
    }

    /// Analyze a symbol over the standard six-month window.
    ///
    /// Results are cached per (formatted symbol, market argument) pair; a
    /// fresh hit returns the prior result without touching the provider.
    /// A symbol with no usable history maps to `NotFound`; other provider
    /// faults propagate as-is. Failed lookups are never cached.
    pub async fn analyze(&self, raw_symbol: &str, market: Option<&str>) -> Result<StockAnalysis, AnalysisError> {
        let formatted = symbol::format_symbol(raw_symbol, market);
        let cache_key = (formatted.clone(), market.map(|m| m.to_string()));

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("Cache hit for {}", formatted);
            return Ok(cached);
        }

        tracing::info!("Analyzing {} (market: {:?})", formatted, market);

        let (history_result, info_result) = tokio::join!(
            self.provider.get_history(&formatted, HistoryPeriod::SixMonths),
            self.provider.get_info(&formatted),
        );

        // No usable history reads as an unknown symbol, whatever the cause
        let bars = match history_result {
            Ok(bars) if !bars.is_empty() => bars,
            Ok(_) => return Err(AnalysisError::NotFound(formatted)),
            Err(e) => {
                tracing::warn!("History fetch failed for {}: {}", formatted, e);
                return Err(AnalysisError::NotFound(formatted));
            }
        };
        let info = info_result?;

        let analysis = self.compose(formatted, bars, info)?;
        self.cache.put(cache_key, analysis.clone());
        Ok(analysis)
    }

    /// Derive the period metrics and assemble the final result.
    /// `bars` is non-empty by the time this runs.
    fn compose(&self, symbol: String, bars: Vec<Bar>, info: Fundamentals) -> Result<StockAnalysis, AnalysisError> {
        let recommendation = self.engine.score(&bars, &info)?;

        let first_close = bars[0].close;
        let current_price = bars[bars.len() - 1].close;
        // A 0.0 first close would divide to ±inf; report no return instead
        let period_return_pct = if first_close == 0.0 {
            0.0
        } else {
            (current_price - first_close) / first_close * 100.0
        };

        let average_volume = (bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64) as i64;
        let period_high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let period_low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let dates: Vec<String> = bars
            .iter()
            .map(|b| b.timestamp.format("%Y-%m-%d").to_string())
            .collect();

        let company_name = info.company_name.unwrap_or_else(|| symbol.clone());
        let description = info.business_summary.unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let logo_url = info.logo_url.unwrap_or_default();

        Ok(StockAnalysis {
            symbol,
            company_name,
            current_price,
            period_return_pct,
            average_volume,
            period_high,
            period_low,
            closes,
            dates,
            description,
            logo_url,
            recommendation,
        })
    }
}
