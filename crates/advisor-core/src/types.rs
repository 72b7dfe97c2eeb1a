use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// History window accepted by data providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl HistoryPeriod {
    /// Range string in the form upstream APIs accept ("6mo", "1y", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
        }
    }
}

/// Company profile and valuation fields, as far as the provider reports them.
/// Missing fields stay `None`; consumers apply their own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    pub company_name: Option<String>,
    pub business_summary: Option<String>,
    pub logo_url: Option<String>,
    pub forward_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// Recommendation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationTier {
    Buy,
    Hold,
    Wait,
}

impl RecommendationTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 5 => RecommendationTier::Buy,
            s if s >= 3 => RecommendationTier::Hold,
            _ => RecommendationTier::Wait,
        }
    }

    /// Display label expected by the legacy frontend
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::Buy => "Comprar",
            RecommendationTier::Hold => "Mantener",
            RecommendationTier::Wait => "Esperar",
        }
    }
}

/// Risk level paired with a recommendation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Display label expected by the legacy frontend
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Bajo",
            RiskLevel::Moderate => "Moderado",
            RiskLevel::High => "Alto",
        }
    }
}

/// Actionable recommendation with the reasons that earned the score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: RecommendationTier,
    pub risk: RiskLevel,
    pub suggested_allocation: String,
    pub reasons: Vec<String>,
    pub score: u32,
}

/// Full analysis for one symbol over the requested period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    pub period_return_pct: f64,
    pub average_volume: i64,
    pub period_high: f64,
    pub period_low: f64,
    pub closes: Vec<f64>,
    pub dates: Vec<String>,
    pub description: String,
    pub logo_url: String,
    pub recommendation: Recommendation,
}
