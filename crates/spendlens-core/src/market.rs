//! Currency rate and stock price providers
//!
//! Dashboards only see the [`MarketData`] trait. [`StubMarketData`] returns
//! fixed quotes; a networked provider can implement the same trait.

use crate::error::Result;
use crate::models::{CurrencyRate, StockPrice};

/// Source of currency rates and stock prices
pub trait MarketData: Send + Sync {
    /// Rate for each requested currency, in request order
    fn currency_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>>;

    /// Price for each requested ticker, in request order
    fn stock_prices(&self, stocks: &[String]) -> Result<Vec<StockPrice>>;
}

/// Offline provider with fixed quotes
///
/// USD is quoted at 75.0, any other currency at 90.0, every stock at 150.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubMarketData;

impl StubMarketData {
    pub const USD_RATE: f64 = 75.0;
    pub const OTHER_RATE: f64 = 90.0;
    pub const STOCK_PRICE: f64 = 150.0;

    pub fn new() -> Self {
        Self
    }
}

impl MarketData for StubMarketData {
    fn currency_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>> {
        Ok(currencies
            .iter()
            .map(|currency| CurrencyRate {
                currency: currency.clone(),
                rate: if currency == "USD" {
                    Self::USD_RATE
                } else {
                    Self::OTHER_RATE
                },
            })
            .collect())
    }

    fn stock_prices(&self, stocks: &[String]) -> Result<Vec<StockPrice>> {
        Ok(stocks
            .iter()
            .map(|stock| StockPrice {
                stock: stock.clone(),
                price: Self::STOCK_PRICE,
            })
            .collect())
    }
}
