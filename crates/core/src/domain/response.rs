use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One row of a service-computed table, keyed by column label.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
    pub tz: String,
}

/// Body of a successful `GET /api/chart`.
///
/// Longitudes are raw ecliptic degrees as computed by the service; they are not guaranteed to be
/// normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub geo: Geo,
    #[serde(rename = "house_system_cn", default)]
    pub house_system_label: Option<String>,

    pub asc: f64,
    #[serde(default)]
    pub asc_sign: String,
    pub mc: f64,
    #[serde(default)]
    pub mc_sign: String,
    #[serde(default)]
    pub cusps: Vec<f64>,

    #[serde(default)]
    pub planet_lons: BTreeMap<String, f64>,
    #[serde(default)]
    pub planet_signs: BTreeMap<String, String>,
    #[serde(default)]
    pub planet_houses: BTreeMap<String, i64>,
    #[serde(default)]
    pub north_node: Option<f64>,
    #[serde(default)]
    pub south_node: Option<f64>,
    #[serde(default)]
    pub chart_ruler: Option<String>,

    #[serde(default)]
    pub four_kings: Vec<Row>,
    #[serde(default)]
    pub summary_rows: Vec<Row>,
    #[serde(default)]
    pub detail_rows: Vec<Row>,
    #[serde(default)]
    pub aspects_rows: Vec<Row>,
    #[serde(default)]
    pub houses_rows: Vec<Row>,
    #[serde(default)]
    pub positions_rows: Vec<Row>,

    #[serde(default)]
    pub symbols: BTreeMap<String, String>,

    #[serde(default)]
    pub ai_advice_md: Option<String>,
    #[serde(default)]
    pub credits_md: Option<String>,
    #[serde(default)]
    pub ai_generated: Option<bool>,
}

impl ChartResponse {
    /// Longitude and sign of a position-row point. The angle points live in dedicated fields;
    /// everything else is looked up in the planet maps.
    pub fn point(&self, name: &str) -> (Option<f64>, Option<&str>) {
        use crate::domain::symbols::{ASCENDANT, MIDHEAVEN};
        match name {
            ASCENDANT => (Some(self.asc), Some(self.asc_sign.as_str())),
            MIDHEAVEN => (Some(self.mc), Some(self.mc_sign.as_str())),
            _ => (
                self.planet_lons.get(name).copied(),
                self.planet_signs.get(name).map(String::as_str),
            ),
        }
    }
}
