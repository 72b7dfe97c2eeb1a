use advisor_core::{AnalysisError, Bar, Fundamentals, Recommendation, RecommendationTier, RiskLevel};
use statrs::statistics::Statistics;

pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score a price history plus fundamentals against the advisory rubric.
    ///
    /// The score is additive over five independent checks (max 7 points):
    /// upward trend +2, consistent trend (r² > 0.7) +1, moderate volatility
    /// (< 30% annualized) +2, healthy forward P/E (10–25) +1, dividend
    /// yield above 2% +1. Missing fundamentals count as 0 and simply fail
    /// their checks.
    pub fn score(&self, bars: &[Bar], fundamentals: &Fundamentals) -> Result<Recommendation, AnalysisError> {
        if bars.len() < 2 {
            return Err(AnalysisError::InsufficientData(format!(
                "need at least 2 bars to fit a trend, got {}",
                bars.len()
            )));
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let returns = self.calculate_returns(&closes);
        let volatility = self.annualized_volatility(&returns);
        let (slope, r_squared) = self.linear_regression(&closes);

        let forward_pe = fundamentals.forward_pe.unwrap_or(0.0);
        let dividend_yield = fundamentals.dividend_yield.unwrap_or(0.0);

        let mut score: u32 = 0;
        let mut reasons = Vec::new();

        if slope > 0.0 {
            score += 2;
            reasons.push("La acción muestra una tendencia alcista".to_string());
        }
        if r_squared > 0.7 {
            score += 1;
            reasons.push("La tendencia es consistente".to_string());
        }
        // NaN volatility (degenerate series) fails this comparison and scores nothing
        if volatility < 0.3 {
            score += 2;
            reasons.push("La volatilidad es moderada".to_string());
        }
        if forward_pe > 10.0 && forward_pe < 25.0 {
            score += 1;
            reasons.push("El ratio P/E está en un rango saludable".to_string());
        }
        if dividend_yield > 0.02 {
            score += 1;
            reasons.push("Ofrece un dividendo atractivo".to_string());
        }

        let tier = RecommendationTier::from_score(score);
        let (risk, suggested_allocation) = match tier {
            RecommendationTier::Buy => (
                RiskLevel::Low,
                "Se sugiere invertir hasta un 5% de tu portafolio",
            ),
            RecommendationTier::Hold => (
                RiskLevel::Moderate,
                "Se sugiere invertir hasta un 3% de tu portafolio",
            ),
            RecommendationTier::Wait => (
                RiskLevel::High,
                "No se recomienda invertir en este momento",
            ),
        };

        Ok(Recommendation {
            tier,
            risk,
            suggested_allocation: suggested_allocation.to_string(),
            reasons,
            score,
        })
    }

    /// Calculate returns from prices
    fn calculate_returns(&self, prices: &[f64]) -> Vec<f64> {
        prices
            .windows(2)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect()
    }

    /// Calculate volatility (annualized)
    fn annualized_volatility(&self, returns: &[f64]) -> f64 {
        if returns.is_empty() {
            return 0.0;
        }

        let std_dev = returns.std_dev();
        std_dev * (252.0_f64).sqrt()
    }

    /// Least-squares fit of `values` against their 0-based index.
    /// Returns (slope, r²); a series with no price variance gets r² = 0.
    fn linear_regression(&self, values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;

        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
        let sum_x2: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();
        let sum_y2: f64 = values.iter().map(|y| y * y).sum();

        let x_var = n * sum_x2 - sum_x * sum_x;
        if x_var == 0.0 {
            return (0.0, 0.0);
        }

        let slope = (n * sum_xy - sum_x * sum_y) / x_var;

        let y_var = n * sum_y2 - sum_y * sum_y;
        if y_var <= 0.0 {
            return (slope, 0.0);
        }

        let r = (n * sum_xy - sum_x * sum_y) / (x_var * y_var).sqrt();
        (slope, r * r)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn make_bars(closes: &[f64]) -> Vec<Bar> {
        let start = Utc::now() - Duration::days(closes.len() as i64);
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: (close - 1.0).max(0.0),
                close,
                volume: 10_000.0,
            })
            .collect()
    }

    fn uptrend_closes() -> Vec<f64> {
        (0..30).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn test_uptrend_with_strong_fundamentals_scores_seven() {
        let bars = make_bars(&uptrend_closes());
        let fundamentals = Fundamentals {
            forward_pe: Some(15.0),
            dividend_yield: Some(0.03),
            ..Default::default()
        };

        let rec = RecommendationEngine::new().score(&bars, &fundamentals).unwrap();
        assert_eq!(rec.score, 7);
        assert_eq!(rec.tier, RecommendationTier::Buy);
        assert_eq!(rec.risk, RiskLevel::Low);
        assert_eq!(rec.suggested_allocation, "Se sugiere invertir hasta un 5% de tu portafolio");
        assert_eq!(
            rec.reasons,
            vec![
                "La acción muestra una tendencia alcista",
                "La tendencia es consistente",
                "La volatilidad es moderada",
                "El ratio P/E está en un rango saludable",
                "Ofrece un dividendo atractivo",
            ]
        );
    }

    #[test]
    fn test_uptrend_without_fundamentals_scores_five() {
        let bars = make_bars(&uptrend_closes());

        let rec = RecommendationEngine::new().score(&bars, &Fundamentals::default()).unwrap();
        // Trend (2) + consistency (1) + low volatility (2); still a Buy at the boundary
        assert_eq!(rec.score, 5);
        assert_eq!(rec.tier, RecommendationTier::Buy);
    }

    #[test]
    fn test_smooth_downtrend_scores_three() {
        let closes: Vec<f64> = (0..30).map(|i| 130.0 - i as f64).collect();
        let bars = make_bars(&closes);

        let rec = RecommendationEngine::new().score(&bars, &Fundamentals::default()).unwrap();
        // Consistency (1) + low volatility (2), no trend points
        assert_eq!(rec.score, 3);
        assert_eq!(rec.tier, RecommendationTier::Hold);
        assert_eq!(rec.risk, RiskLevel::Moderate);
        assert_eq!(rec.suggested_allocation, "Se sugiere invertir hasta un 3% de tu portafolio");
    }

    #[test]
    fn test_flat_series_scores_volatility_only() {
        let bars = make_bars(&[50.0; 10]);

        let rec = RecommendationEngine::new().score(&bars, &Fundamentals::default()).unwrap();
        assert_eq!(rec.score, 2);
        assert_eq!(rec.tier, RecommendationTier::Wait);
        assert_eq!(rec.reasons, vec!["La volatilidad es moderada"]);
    }

    #[test]
    fn test_all_zero_series_scores_zero() {
        let bars = make_bars(&[0.0; 10]);

        let rec = RecommendationEngine::new().score(&bars, &Fundamentals::default()).unwrap();
        // Zero prices give NaN returns, so not even the volatility check passes
        assert_eq!(rec.score, 0);
        assert_eq!(rec.tier, RecommendationTier::Wait);
        assert_eq!(rec.risk, RiskLevel::High);
        assert_eq!(rec.suggested_allocation, "No se recomienda invertir en este momento");
        assert!(rec.reasons.is_empty());
    }

    #[test]
    fn test_single_bar_is_insufficient() {
        let bars = make_bars(&[100.0]);

        let err = RecommendationEngine::new().score(&bars, &Fundamentals::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
    }

    #[test]
    fn test_pe_bounds_are_exclusive() {
        let bars = make_bars(&uptrend_closes());

        for pe in [10.0, 25.0] {
            let fundamentals = Fundamentals {
                forward_pe: Some(pe),
                ..Default::default()
            };
            let rec = RecommendationEngine::new().score(&bars, &fundamentals).unwrap();
            assert_eq!(rec.score, 5, "P/E {} must not earn the valuation point", pe);
        }
    }
}
