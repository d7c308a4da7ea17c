//! Station dataset loading.

mod minetur;

use camino::Utf8Path;
use log::{debug, warn};
use refuel_core::Station;
use serde_json::Value;

use crate::{DataError, read_json};

pub use minetur::PRICE_COLUMNS;
use minetur::{MineturExport, STATION_LIST_KEY};

const WHAT: &str = "station dataset";

/// Load stations from a JSON file.
///
/// See [`parse_stations`] for the accepted layouts.
///
/// # Errors
/// Returns [`DataError::Open`] when the file cannot be opened and the
/// [`parse_stations`] errors otherwise.
pub fn load_stations(path: &Utf8Path) -> Result<Vec<Station>, DataError> {
    let document: Value = read_json(path, WHAT)?;
    stations_from_value(document)
}

/// Parse a station dataset.
///
/// Two layouts are accepted:
/// - the fuel price service export, an object whose `ListaEESSPrecio` array
///   holds records with comma decimals and Spanish column names;
/// - a JSON array of [`Station`] records.
///
/// Export records without usable coordinates, or with a sale type other than
/// `P` or `R`, are dropped with a warning. Prices that do not parse are left
/// out of the station's price map.
///
/// # Errors
/// Returns [`DataError::Decode`] for malformed JSON and
/// [`DataError::UnrecognisedStations`] for any other layout.
///
/// # Examples
/// ```
/// use refuel_data::parse_stations;
///
/// let json = r#"{"ListaEESSPrecio": [{
///     "IDEESS": "4375", "Rótulo": "REPSOL", "Latitud": "40,41",
///     "Longitud (WGS84)": "-3,70", "Tipo Venta": "P", "Precio Gasoleo A": "1,459"
/// }]}"#;
/// let stations = parse_stations(json).expect("valid export");
/// assert_eq!(stations[0].price("gasoleo_a"), Some(1.459));
/// ```
pub fn parse_stations(json: &str) -> Result<Vec<Station>, DataError> {
    let document: Value =
        serde_json::from_str(json).map_err(|source| DataError::Decode { source, what: WHAT })?;
    stations_from_value(document)
}

fn stations_from_value(document: Value) -> Result<Vec<Station>, DataError> {
    if document.is_array() {
        let stations: Vec<Station> = serde_json::from_value(document)
            .map_err(|source| DataError::Decode { source, what: WHAT })?;
        debug!("loaded {} stations from a station list", stations.len());
        return Ok(stations);
    }
    if document.get(STATION_LIST_KEY).is_none() {
        return Err(DataError::UnrecognisedStations);
    }
    let export: MineturExport = serde_json::from_value(document)
        .map_err(|source| DataError::Decode { source, what: WHAT })?;
    Ok(stations_from_export(export))
}

fn stations_from_export(export: MineturExport) -> Vec<Station> {
    let total = export.records.len();
    let mut stations = Vec::with_capacity(total);
    for record in export.records {
        let id = record.id.clone();
        match record.into_station() {
            Ok(station) => stations.push(station),
            Err(reason) => warn!("dropping station record {id}: {reason}"),
        }
    }
    debug!(
        "loaded {} of {total} stations from the fuel price export",
        stations.len()
    );
    stations
}

#[cfg(test)]
mod tests {
    use super::*;
    use refuel_core::SaleType;
    use rstest::rstest;

    #[rstest]
    fn plain_station_lists_are_accepted() {
        let json = r#"[
            {"id": "a", "name": "A", "location": {"x": -3.0, "y": 40.0},
             "prices": {"gasoleo_a": 1.4}},
            {"id": "b", "name": "B", "location": {"x": -3.1, "y": 40.1},
             "sale_type": "restricted"}
        ]"#;
        let stations = parse_stations(json).expect("valid list");
        assert_eq!(stations.len(), 2);
        assert_eq!(stations.first().map(|s| s.price("gasoleo_a")), Some(Some(1.4)));
        assert_eq!(stations.get(1).map(|s| s.sale_type), Some(SaleType::Restricted));
    }

    #[rstest]
    fn export_drops_unusable_records() {
        let json = r#"{
            "Fecha": "18/10/2026 10:00:00",
            "ListaEESSPrecio": [
                {"IDEESS": "1", "Latitud": "40,1", "Longitud (WGS84)": "-3,1", "Tipo Venta": "P"},
                {"IDEESS": "2", "Latitud": "", "Longitud (WGS84)": "", "Tipo Venta": "P"},
                {"IDEESS": "3", "Latitud": "40,2", "Longitud (WGS84)": "-3,2", "Tipo Venta": "?"}
            ],
            "ResultadoConsulta": "OK"
        }"#;
        let stations = parse_stations(json).expect("valid export");
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1"]);
    }

    #[rstest]
    #[case(r#"{"stations": []}"#)]
    #[case("42")]
    fn other_layouts_are_rejected(#[case] json: &str) {
        assert!(matches!(
            parse_stations(json),
            Err(DataError::UnrecognisedStations)
        ));
    }

    #[rstest]
    fn malformed_list_entries_are_decode_errors() {
        let err = parse_stations(r#"[{"id": "a"}]"#).expect_err("missing fields");
        assert!(matches!(err, DataError::Decode { .. }));
    }
}
