//! Records of the Spanish Ministry fuel price service export.
//!
//! The export is a JSON object whose `ListaEESSPrecio` array holds one record
//! per station. Every value is a string and decimals use a comma separator.

use std::collections::BTreeMap;

use geo::Coord;
use refuel_core::{SaleType, Station};
use serde::Deserialize;
use thiserror::Error;

/// Key of the station array in the export.
pub(super) const STATION_LIST_KEY: &str = "ListaEESSPrecio";

/// Export price columns and the fuel type each one is stored under.
pub const PRICE_COLUMNS: [(&str, &str); 8] = [
    ("Precio Gasoleo A", "gasoleo_a"),
    ("Precio Gasolina 95 E5", "gasolina_95_e5"),
    ("Precio Gasolina 98 E5", "gasolina_98_e5"),
    ("Precio Gasoleo Premium", "gasoleo_premium"),
    ("Precio Gasoleo B", "gasoleo_b"),
    ("Precio Gases licuados del petróleo", "glp"),
    ("Precio Gas Natural Comprimido", "gnc"),
    ("Precio Gas Natural Licuado", "gnl"),
];

#[derive(Debug, Deserialize)]
pub(super) struct MineturExport {
    #[serde(rename = "ListaEESSPrecio")]
    pub(super) records: Vec<MineturRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct MineturRecord {
    #[serde(rename = "IDEESS")]
    pub(super) id: String,
    #[serde(rename = "Rótulo")]
    sign: String,
    #[serde(rename = "Dirección")]
    street: String,
    #[serde(rename = "Localidad")]
    locality: String,
    #[serde(rename = "Latitud")]
    latitude: String,
    #[serde(rename = "Longitud (WGS84)")]
    longitude: String,
    #[serde(rename = "Tipo Venta")]
    sale_type: String,
    #[serde(rename = "Horario")]
    schedule: String,
    #[serde(flatten)]
    columns: BTreeMap<String, serde_json::Value>,
}

/// Reason a record cannot become a [`Station`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(super) enum Rejection {
    #[error("missing or invalid coordinates")]
    Coordinates,
    #[error("unknown sale type {0:?}")]
    SaleType(String),
}

/// Parse a decimal that may use a comma separator.
///
/// Blank and unparseable text yields `None`.
pub(super) fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replacen(',', ".", 1).parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_sale_type(raw: &str) -> Result<SaleType, Rejection> {
    match raw.trim() {
        "P" => Ok(SaleType::Public),
        "R" => Ok(SaleType::Restricted),
        other => Err(Rejection::SaleType(other.to_owned())),
    }
}

impl MineturRecord {
    fn location(&self) -> Option<Coord<f64>> {
        let lat = parse_decimal(&self.latitude)?;
        let lon = parse_decimal(&self.longitude)?;
        // The service writes 0 for unknown positions.
        let plausible = (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
            && lat.abs() > 0.0
            && lon.abs() > 0.0;
        plausible.then_some(Coord { x: lon, y: lat })
    }

    fn address(&self) -> String {
        [self.street.trim(), self.locality.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn price(&self, column: &str) -> Option<f64> {
        self.columns
            .get(column)
            .and_then(serde_json::Value::as_str)
            .and_then(parse_decimal)
            .filter(|price| *price > 0.0)
    }

    /// Convert into a station, keeping only prices that parse.
    pub(super) fn into_station(self) -> Result<Station, Rejection> {
        let location = self.location().ok_or(Rejection::Coordinates)?;
        let sale_type = parse_sale_type(&self.sale_type)?;
        let mut station = Station::new(self.id.trim(), self.sign.trim(), location, sale_type)
            .with_address(self.address())
            .with_schedule(self.schedule.trim());
        for (column, fuel) in PRICE_COLUMNS {
            if let Some(price) = self.price(column) {
                station.prices.insert(fuel.to_owned(), price);
            }
        }
        Ok(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(json: &str) -> MineturRecord {
        serde_json::from_str(json).expect("record should deserialise")
    }

    #[rstest]
    #[case("1,459", Some(1.459))]
    #[case(" 40,416775 ", Some(40.416_775))]
    #[case("-3,703790", Some(-3.703_79))]
    #[case("1.5", Some(1.5))]
    #[case("", None)]
    #[case("n/d", None)]
    fn decimals_accept_commas(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_decimal(raw), expected);
    }

    #[rstest]
    fn full_record_becomes_a_station() {
        let station = record(
            r#"{
                "IDEESS": "4375",
                "Rótulo": "REPSOL",
                "Dirección": "AVENIDA DE ANDALUCIA KM 10",
                "Localidad": "MADRID",
                "Latitud": "40,345111",
                "Longitud (WGS84)": "-3,700222",
                "Tipo Venta": "P",
                "Horario": "L-D: 24H",
                "Precio Gasoleo A": "1,459",
                "Precio Gasolina 95 E5": "1,559",
                "Precio Gasoleo B": "",
                "Precio Gases licuados del petróleo": "0,989",
                "Provincia": "MADRID"
            }"#,
        )
        .into_station()
        .expect("record is complete");

        assert_eq!(station.id, "4375");
        assert_eq!(station.name, "REPSOL");
        assert_eq!(station.address, "AVENIDA DE ANDALUCIA KM 10, MADRID");
        assert_eq!(station.schedule, "L-D: 24H");
        assert_eq!(station.sale_type, SaleType::Public);
        assert_eq!(station.location, Coord { x: -3.700_222, y: 40.345_111 });
        assert_eq!(station.price("gasoleo_a"), Some(1.459));
        assert_eq!(station.price("gasolina_95_e5"), Some(1.559));
        assert_eq!(station.price("glp"), Some(0.989));
        assert_eq!(station.price("gasoleo_b"), None);
        assert_eq!(station.prices.len(), 3);
    }

    #[rstest]
    fn restricted_sale_type_is_kept() {
        let station = record(
            r#"{"IDEESS": "9", "Latitud": "41,0", "Longitud (WGS84)": "-4,0", "Tipo Venta": "R"}"#,
        )
        .into_station()
        .expect("record is complete");
        assert_eq!(station.sale_type, SaleType::Restricted);
        assert!(station.prices.is_empty());
    }

    #[rstest]
    #[case(r#"{"IDEESS": "1", "Tipo Venta": "P"}"#)]
    #[case(r#"{"IDEESS": "1", "Latitud": "", "Longitud (WGS84)": "-4,0", "Tipo Venta": "P"}"#)]
    #[case(r#"{"IDEESS": "1", "Latitud": "0,0", "Longitud (WGS84)": "0,0", "Tipo Venta": "P"}"#)]
    #[case(r#"{"IDEESS": "1", "Latitud": "140,0", "Longitud (WGS84)": "-4,0", "Tipo Venta": "P"}"#)]
    fn records_without_coordinates_are_rejected(#[case] json: &str) {
        assert_eq!(record(json).into_station(), Err(Rejection::Coordinates));
    }

    #[rstest]
    fn unknown_sale_types_are_rejected() {
        let result = record(
            r#"{"IDEESS": "1", "Latitud": "41,0", "Longitud (WGS84)": "-4,0", "Tipo Venta": "X"}"#,
        )
        .into_station();
        assert_eq!(result, Err(Rejection::SaleType("X".to_owned())));
    }
}
