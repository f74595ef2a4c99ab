use serde::{Deserialize, Serialize};

use crate::utils::price_ratio;

/// Latest trend indicators for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub current_price: f64,
}

impl IndicatorResult {
    pub fn sma_ratio(&self) -> Option<f64> {
        price_ratio(self.current_price, self.sma)
    }

    pub fn ema_ratio(&self) -> Option<f64> {
        price_ratio(self.current_price, self.ema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios() {
        let result = IndicatorResult { sma: Some(13.0), ema: Some(0.0), current_price: 15.6 };
        assert!((result.sma_ratio().unwrap() - 1.2).abs() < 1e-12);
        assert_eq!(result.ema_ratio(), None);
    }
}
