//! Fuel station records as supplied by the dataset collaborator.

use std::collections::BTreeMap;
use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Price per litre keyed by fuel type (for example `gasoleo_a`).
///
/// A `BTreeMap` keeps serialised output stable across runs.
pub type FuelPrices = BTreeMap<String, f64>;

/// Who may buy fuel at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleType {
    /// Open to the general public.
    #[default]
    Public,
    /// Restricted to fleet cards, cooperatives or similar.
    Restricted,
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Restricted => f.write_str("restricted"),
        }
    }
}

/// A fuel station.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use refuel_core::{SaleType, Station};
///
/// let station = Station::new("4375", "REPSOL", Coord { x: -3.7, y: 40.4 }, SaleType::Public)
///     .with_price("gasoleo_a", 1.459);
///
/// assert_eq!(station.price("gasoleo_a"), Some(1.459));
/// assert_eq!(station.price("glp"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Identifier assigned by the dataset.
    pub id: String,
    /// Display name, usually the brand sign.
    pub name: String,
    /// Street address including locality.
    #[serde(default)]
    pub address: String,
    /// Free-form opening hours text.
    #[serde(default)]
    pub schedule: String,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Sale policy.
    #[serde(default)]
    pub sale_type: SaleType,
    /// Advertised prices per fuel type.
    #[serde(default)]
    pub prices: FuelPrices,
}

impl Station {
    /// Construct a station without address, schedule or prices.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coord<f64>,
        sale_type: SaleType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            schedule: String::new(),
            location,
            sale_type,
            prices: FuelPrices::new(),
        }
    }

    /// Set the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the opening hours text.
    #[must_use]
    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// Add or replace the price for a fuel type.
    #[must_use]
    pub fn with_price(mut self, fuel_type: impl Into<String>, price: f64) -> Self {
        self.prices.insert(fuel_type.into(), price);
        self
    }

    /// Usable price for `fuel_type`.
    ///
    /// Missing, non-finite and non-positive prices all mean the fuel is not
    /// on sale here.
    #[must_use]
    pub fn price(&self, fuel_type: &str) -> Option<f64> {
        self.prices
            .get(fuel_type)
            .copied()
            .filter(|price| price.is_finite() && *price > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(0.0)]
    #[case(-1.2)]
    fn unusable_prices_are_absent(#[case] price: f64) {
        let station = Station::new("1", "A", Coord { x: 0.0, y: 0.0 }, SaleType::Public)
            .with_price("gasoleo_a", price);
        assert_eq!(station.price("gasoleo_a"), None);
    }

    #[rstest]
    fn sale_type_serialises_lowercase() {
        let json = serde_json::to_string(&SaleType::Restricted).expect("serialise");
        assert_eq!(json, "\"restricted\"");
        assert_eq!(SaleType::Public.to_string(), "public");
    }

    #[rstest]
    fn station_deserialises_with_defaults() {
        let json = r#"{"id":"7","name":"CEPSA","location":{"x":-3.0,"y":40.0}}"#;
        let station: Station = serde_json::from_str(json).expect("deserialise");
        assert_eq!(station.sale_type, SaleType::Public);
        assert!(station.prices.is_empty());
        assert!(station.schedule.is_empty());
    }
}
