//! Trend indicators over chronological (oldest first) closing prices.

/// Calculate the rolling Simple Moving Average for a given period
///
/// # Arguments
/// * `closes` - Closing prices, oldest first
/// * `period` - Window length
///
/// # Returns
/// * One entry per input price; `None` until the window is full
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma_values = vec![None; closes.len()];

    if period == 0 || closes.len() < period {
        return sma_values;
    }

    for i in (period - 1)..closes.len() {
        let start_idx = i + 1 - period;
        let sum: f64 = closes[start_idx..=i].iter().sum();
        sma_values[i] = Some(sum / period as f64);
    }

    sma_values
}

/// SMA at the most recent row
pub fn latest_sma(closes: &[f64], period: usize) -> Option<f64> {
    calculate_sma(closes, period).last().copied().flatten()
}

/// Smoothing factor for an EMA spanning `period` rows: 2 / (period + 1)
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Calculate the Exponential Moving Average series
///
/// Seeded with the first close and updated recursively:
/// `ema[i] = close[i] * k + ema[i - 1] * (1 - k)`.
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<f64> {
    let k = ema_multiplier(period);
    let mut ema_values = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let value = if i == 0 {
            close
        } else {
            close * k + ema_values[i - 1] * (1.0 - k)
        };
        ema_values.push(value);
    }

    ema_values
}

/// EMA at the most recent row
pub fn latest_ema(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    calculate_ema(closes, period).last().copied()
}

/// Price relative to an indicator: `current / indicator`
///
/// Returns `None` when the indicator is absent, zero or not finite.
pub fn price_ratio(current_price: f64, indicator: Option<f64>) -> Option<f64> {
    match indicator {
        Some(value) if value != 0.0 && value.is_finite() => {
            let ratio = current_price / value;
            ratio.is_finite().then_some(ratio)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES: [f64; 5] = [10.0, 12.0, 11.0, 13.0, 15.0];

    #[test]
    fn test_sma_uses_last_period_closes() {
        assert_eq!(latest_sma(&SERIES, 3), Some(13.0));
        let rolling = calculate_sma(&SERIES, 3);
        assert_eq!(rolling[0], None);
        assert_eq!(rolling[1], None);
        assert_eq!(rolling[2], Some(11.0));
    }

    #[test]
    fn test_sma_insufficient_rows() {
        assert_eq!(latest_sma(&SERIES, 6), None);
        assert_eq!(latest_sma(&SERIES, 0), None);
    }

    #[test]
    fn test_ema_recurrence() {
        let ema = calculate_ema(&SERIES, 3);
        assert_eq!(ema, vec![10.0, 11.0, 11.0, 12.0, 13.5]);
        assert_eq!(latest_ema(&SERIES, 3), Some(13.5));
    }

    #[test]
    fn test_ema_period_one_tracks_close() {
        assert_eq!(latest_ema(&SERIES, 1), Some(15.0));
    }

    #[test]
    fn test_price_ratio_guards_denominator() {
        assert_eq!(price_ratio(20.0, Some(10.0)), Some(2.0));
        assert_eq!(price_ratio(20.0, Some(0.0)), None);
        assert_eq!(price_ratio(20.0, None), None);
        assert_eq!(price_ratio(20.0, Some(f64::NAN)), None);
    }
}
