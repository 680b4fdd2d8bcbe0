//! Currency codes, display formatting, and display-only conversion.
//!
//! Conversion here only produces comparable display amounts (for example to
//! sort a mixed-currency list); it is not a valuation engine.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::{Archivable, DateSpan, HasAmount, HasCategory, HasDateRange, HasName};
use crate::errors::{FinboardError, Result};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validates and upper-cases a three-letter code.
    pub fn parse(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(FinboardError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".into())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FinboardError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Entities carrying an amount in a specific currency.
pub trait Priced: HasAmount {
    fn currency(&self) -> &CurrencyCode;
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Separators for the handful of locales the dashboard ships with.
    pub fn for_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator) = match tag {
            "de-DE" | "es-ES" | "it-IT" | "pt-BR" | "nl-NL" => (',', '.'),
            "fr-FR" | "sv-SE" => (',', ' '),
            "de-CH" => ('.', '\''),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormatOptions {
    #[serde(default)]
    pub currency_display: CurrencyDisplay,
    #[serde(default)]
    pub negative_style: NegativeStyle,
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        "BRL" => "R$",
        "INR" => "₹",
        _ => code,
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats `value` with the locale's grouping and decimal separators.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let rendered = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rendered.as_str(), None),
    };
    let mut body = group_digits(int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        body.push(locale.decimal_separator);
        body.push_str(frac);
    }
    if value < 0.0 && rendered.chars().any(|ch| ch != '0' && ch != '.') {
        body.insert(0, '-');
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let is_negative = amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let prefixed = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", symbol_for(code.as_str()), body),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
    };
    if !is_negative {
        return prefixed;
    }
    match options.negative_style {
        NegativeStyle::Sign => format!("-{prefixed}"),
        NegativeStyle::Parentheses => format!("({prefixed})"),
    }
}

/// Rates used to express amounts in one display currency.
///
/// Each rate is "units of `base` per one unit of the keyed currency".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DisplayRates {
    pub base: CurrencyCode,
    #[serde(default)]
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl DisplayRates {
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
        }
    }

    pub fn with_rate(mut self, code: CurrencyCode, rate: f64) -> Self {
        self.rates.insert(code, rate);
        self
    }

    /// Expresses `amount` of `from` in the base currency.
    pub fn convert(&self, amount: f64, from: &CurrencyCode) -> Result<f64> {
        if *from == self.base {
            return Ok(amount);
        }
        self.rates
            .get(from)
            .filter(|rate| rate.is_finite() && **rate > 0.0)
            .map(|rate| amount * rate)
            .ok_or_else(|| FinboardError::MissingRate {
                from: from.to_string(),
                to: self.base.to_string(),
            })
    }

    /// Wraps each item with its amount expressed in the base currency.
    pub fn convert_all<'a, T: Priced>(&self, items: &'a [T]) -> Result<Vec<Converted<'a, T>>> {
        items
            .iter()
            .map(|item| {
                let amount = self.convert(item.display_amount(), item.currency())?;
                Ok(Converted { item, amount })
            })
            .collect()
    }
}

/// An item viewed through a converted display amount.
#[derive(Debug, Clone, Copy)]
pub struct Converted<'a, T> {
    pub item: &'a T,
    pub amount: f64,
}

impl<T> HasAmount for Converted<'_, T> {
    fn display_amount(&self) -> f64 {
        self.amount
    }
}

impl<T: HasName> HasName for Converted<'_, T> {
    fn name(&self) -> &str {
        self.item.name()
    }

    fn search_text(&self) -> std::borrow::Cow<'_, str> {
        self.item.search_text()
    }
}

impl<T: HasCategory> HasCategory for Converted<'_, T> {
    fn category(&self) -> Option<&str> {
        self.item.category()
    }
}

impl<T: Archivable> Archivable for Converted<'_, T> {
    fn is_active(&self) -> bool {
        self.item.is_active()
    }
}

impl<T: HasDateRange> HasDateRange for Converted<'_, T> {
    fn date_span(&self) -> DateSpan {
        self.item.date_span()
    }

    fn sort_date(&self) -> Option<chrono::NaiveDate> {
        self.item.sort_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> CurrencyCode {
        CurrencyCode::parse(value).unwrap()
    }

    #[test]
    fn currency_codes_are_validated_and_uppercased() {
        assert_eq!(code("eur").as_str(), "EUR");
        assert!(CurrencyCode::parse("EURO").is_err());
        assert!(CurrencyCode::parse("E1R").is_err());
        assert!(serde_json::from_str::<CurrencyCode>("\"us\"").is_err());
    }

    #[test]
    fn groups_digits_with_locale_separators() {
        let locale = LocaleConfig::for_tag("de-DE");
        assert_eq!(format_number(&locale, 1234567.891, 2), "1.234.567,89");
        assert_eq!(format_number(&LocaleConfig::default(), 999.0, 0), "999");
        assert_eq!(format_number(&LocaleConfig::default(), -1000.0, 0), "-1,000");
    }

    #[test]
    fn formats_negative_amounts_in_parentheses() {
        let options = FormatOptions {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Parentheses,
        };
        let rendered =
            format_currency_value(-1234.5, &code("EUR"), &LocaleConfig::for_tag("fr-FR"), &options);
        assert_eq!(rendered, "(€1 234,50)");
    }

    #[test]
    fn yen_has_no_minor_units() {
        let rendered = format_currency_value(
            1500.0,
            &code("JPY"),
            &LocaleConfig::default(),
            &FormatOptions::default(),
        );
        assert_eq!(rendered, "¥1,500");
    }

    #[test]
    fn conversion_requires_a_known_rate() {
        let rates = DisplayRates::new(code("USD")).with_rate(code("EUR"), 1.1);
        assert_eq!(rates.convert(5.0, &code("USD")).unwrap(), 5.0);
        assert!((rates.convert(10.0, &code("EUR")).unwrap() - 11.0).abs() < 1e-9);
        assert!(matches!(
            rates.convert(1.0, &code("GBP")),
            Err(FinboardError::MissingRate { .. })
        ));
    }
}
