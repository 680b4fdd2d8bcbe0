use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::{CurrencyCode, Priced};
use crate::domain::common::*;
use crate::errors::{FinboardError, Result};

fn default_active() -> bool {
    true
}

/// A portfolio holding. Search matches both the name and the ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioAsset {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquired_on: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl PortfolioAsset {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        quantity: f64,
        unit_price: f64,
        currency: CurrencyCode,
    ) -> Result<Self> {
        let asset = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            symbol: symbol.into().trim().to_ascii_uppercase(),
            asset_type: None,
            quantity,
            unit_price,
            currency,
            acquired_on: None,
            is_active: true,
        };
        asset.validate()?;
        Ok(asset)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.symbol.trim().is_empty() {
            return Err(FinboardError::Validation(
                "assets need both a name and a symbol".into(),
            ));
        }
        let finite_non_negative = |value: f64| value.is_finite() && value >= 0.0;
        if !finite_non_negative(self.quantity) || !finite_non_negative(self.unit_price) {
            return Err(FinboardError::Validation(format!(
                "quantity and price for `{}` must be non-negative",
                self.symbol
            )));
        }
        Ok(())
    }

    pub fn market_value(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

impl HasName for PortfolioAsset {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.name, self.symbol))
    }
}

impl HasCategory for PortfolioAsset {
    fn category(&self) -> Option<&str> {
        self.asset_type.as_deref()
    }
}

impl HasAmount for PortfolioAsset {
    fn display_amount(&self) -> f64 {
        self.market_value()
    }
}

impl Priced for PortfolioAsset {
    fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}

impl Archivable for PortfolioAsset {
    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl HasDateRange for PortfolioAsset {
    fn date_span(&self) -> DateSpan {
        match self.acquired_on {
            Some(start) => DateSpan::Between { start, end: None },
            None => DateSpan::Always,
        }
    }
}
