use async_trait::async_trait;
use crate::{AnalysisError, Bar, Fundamentals, HistoryPeriod};

/// Trait for market data providers
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily OHLCV history for `symbol` over `period`, oldest bar first.
    async fn get_history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<Bar>, AnalysisError>;

    /// Company profile and valuation fields for `symbol`.
    async fn get_info(&self, symbol: &str) -> Result<Fundamentals, AnalysisError>;
}
