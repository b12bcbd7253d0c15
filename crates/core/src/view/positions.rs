use crate::domain::angle::SignedAngle;
use crate::domain::response::{ChartResponse, Row};
use crate::domain::symbols::{sign_glyph, SIGN_SUFFIX};
use crate::view::table::cell_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const POSITIONS_HEADERS: [&str; 6] = ["Symbol", "行星", "位置", "落宮", "守護宮", "黃道狀態"];

const COL_NAME: &str = "行星";
const COL_HOUSE: &str = "落宮";
const COL_RULED: &str = "守護宮";
const COL_STATUS: &str = "黃道狀態";

/// Status text the service uses for planets without traditional dignities.
const NO_TRADITIONAL_MARKER: &str = "無傳統";
const DASH: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRow {
    pub symbol: String,
    pub name: String,
    pub position: String,
    pub house: String,
    pub ruled_houses: String,
    pub ecliptic_status: String,
}

impl PositionRow {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        let cells = [
            &self.symbol,
            &self.name,
            &self.position,
            &self.house,
            &self.ruled_houses,
            &self.ecliptic_status,
        ];
        for (header, value) in POSITIONS_HEADERS.iter().zip(cells) {
            row.insert(header.to_string(), Value::String(value.clone()));
        }
        row
    }
}

/// `<glyph> DD°MM′SS″ <sign>座` for a raw longitude.
pub fn format_position(longitude: f64, sign: &str) -> String {
    let angle = SignedAngle::from_longitude(longitude);
    format!("{} {} {sign}{SIGN_SUFFIX}", sign_glyph(sign), angle.in_sign)
}

/// Display rows for the positions table, one per service row, in input order.
pub fn build_positions_view(resp: &ChartResponse) -> Vec<PositionRow> {
    resp.positions_rows
        .iter()
        .map(|raw| build_position_row(resp, raw))
        .collect()
}

fn build_position_row(resp: &ChartResponse, raw: &Row) -> PositionRow {
    let name = raw.get(COL_NAME).map(cell_text).unwrap_or_default();
    let symbol = resp.symbols.get(&name).cloned().unwrap_or_default();

    let (longitude, sign) = resp.point(&name);
    let position = match longitude {
        Some(lon) => format_position(lon, sign.unwrap_or_default()),
        None => DASH.to_string(),
    };

    PositionRow {
        symbol,
        house: raw.get(COL_HOUSE).map(cell_text).unwrap_or_default(),
        ruled_houses: dash_if_empty(raw.get(COL_RULED)),
        ecliptic_status: ecliptic_status(raw.get(COL_STATUS)),
        name,
        position,
    }
}

fn dash_if_empty(value: Option<&Value>) -> String {
    let text = value.map(cell_text).unwrap_or_default();
    if text.is_empty() {
        DASH.to_string()
    } else {
        text
    }
}

fn ecliptic_status(value: Option<&Value>) -> String {
    let text = value.map(cell_text).unwrap_or_default();
    if text.is_empty() || text.contains(NO_TRADITIONAL_MARKER) {
        DASH.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::fixtures;

    #[test]
    fn keeps_input_order_and_symbols() {
        let view = build_positions_view(&fixtures::sample());
        let names: Vec<_> = view.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["上升", "太陽", "月亮", "水星", "天頂"]);
        assert_eq!(view[0].symbol, "ASC");
        assert_eq!(view[1].symbol, "☉");
    }

    #[test]
    fn angle_points_use_dedicated_fields() {
        let view = build_positions_view(&fixtures::sample());
        assert_eq!(view[0].position, "♎ 20°15′00″ 天秤座");
        assert_eq!(view[4].position, "♋ 20°30′00″ 巨蟹座");
    }

    #[test]
    fn sign_boundaries_do_not_report_sixty_carries() {
        let view = build_positions_view(&fixtures::sample());
        // 359.9997 stays at the end of the recorded sign.
        assert_eq!(view[2].position, "♓ 29°59′59″ 雙魚座");
        // 30.00006 starts the new sign.
        assert_eq!(view[3].position, "♉ 00°00′00″ 金牛座");
    }

    #[test]
    fn status_and_ruled_houses_fall_back_to_dash() {
        let view = build_positions_view(&fixtures::sample());
        assert_eq!(view[1].ecliptic_status, "一般");
        assert_eq!(view[1].ruled_houses, "11");
        assert_eq!(view[2].ruled_houses, "-");
        assert_eq!(view[3].ecliptic_status, "-");
        assert_eq!(view[4].ecliptic_status, "-");
        assert_eq!(view[3].ruled_houses, "9、12");
    }

    #[test]
    fn house_numbers_render_as_text() {
        let view = build_positions_view(&fixtures::sample());
        assert_eq!(view[1].house, "4");
    }

    #[test]
    fn unknown_point_renders_dash_position() {
        let mut resp = fixtures::sample();
        resp.positions_rows = vec![serde_json::json!({"行星": "凱龍"})
            .as_object()
            .cloned()
            .unwrap()];
        let view = build_positions_view(&resp);
        assert_eq!(view[0].position, "-");
        assert_eq!(view[0].symbol, "");
        assert_eq!(view[0].house, "");
    }

    #[test]
    fn unknown_sign_keeps_degrees() {
        assert_eq!(format_position(45.5, "?"), " 15°30′00″ ?座");
        // Negative longitudes wrap before decomposing.
        assert_eq!(format_position(-10.0, "?"), " 20°00′00″ ?座");
    }

    #[test]
    fn to_row_uses_table_headers() {
        let view = build_positions_view(&fixtures::sample());
        let row = view[1].to_row();
        assert_eq!(row.len(), POSITIONS_HEADERS.len());
        assert_eq!(row.get("Symbol"), Some(&Value::String("☉".to_string())));
        assert_eq!(row.get("守護宮"), Some(&Value::String("11".to_string())));
    }
}
