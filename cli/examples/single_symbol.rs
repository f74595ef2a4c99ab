//! Single Symbol Example
//!
//! Downloads one symbol's trailing year and prints its latest SMA/EMA and
//! price ratios for a few periods.

use industry_strength::prelude::*;
use industry_strength::utils::{today_exchange, trailing_window_strings};
use std::error::Error;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    industry_strength::init_logger()?;

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "INFY".to_string());
    let analyzer = AnalysisBuilder::new().build()?;
    let (from_date, to_date) = trailing_window_strings(today_exchange());

    println!("{} from {} to {}", symbol, from_date, to_date);
    println!("{}", "=".repeat(60));

    for period in [14, 50, 200] {
        match analyzer.compute_indicators(&symbol, &from_date, &to_date, period).await {
            Ok(Some(result)) => println!(
                "{:>4}-day  SMA {:>10.2}  EMA {:>10.2}  price {:>10.2}  SMARatio {:.4}",
                period,
                result.sma.unwrap_or(f64::NAN),
                result.ema.unwrap_or(f64::NAN),
                result.current_price,
                result.sma_ratio().unwrap_or(f64::NAN)
            ),
            Ok(None) => println!("{:>4}-day  not enough data", period),
            Err(e) => println!("{:>4}-day  failed: {}", period, e),
        }
    }

    Ok(())
}
