use crate::domain::response::{ChartResponse, Row};
use crate::view::table::cell_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HOUSES_HEADERS: [&str; 5] = ["宮位", "宮名", "宮位意涵", "宮位星座", "宮中行星"];

/// Occupants value the service sends for an empty house.
pub const NO_OCCUPANTS: &str = "無";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRow {
    pub house: String,
    pub label: String,
    pub meaning: String,
    pub sign: String,
    pub occupants: String,
}

impl HouseRow {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        let cells = [
            &self.house,
            &self.label,
            &self.meaning,
            &self.sign,
            &self.occupants,
        ];
        for (header, value) in HOUSES_HEADERS.iter().zip(cells) {
            row.insert(header.to_string(), Value::String(value.clone()));
        }
        row
    }
}

pub fn build_houses_view(resp: &ChartResponse) -> Vec<HouseRow> {
    resp.houses_rows.iter().map(build_house_row).collect()
}

fn build_house_row(raw: &Row) -> HouseRow {
    let text = |key: &str| raw.get(key).map(cell_text).unwrap_or_default();

    // Absent or blank occupants read the same as the sentinel.
    let occupants = text(HOUSES_HEADERS[4]);
    let occupants = if occupants.is_empty() || occupants == NO_OCCUPANTS {
        "-".to_string()
    } else {
        occupants
    };

    HouseRow {
        house: text(HOUSES_HEADERS[0]),
        label: text(HOUSES_HEADERS[1]),
        meaning: text(HOUSES_HEADERS[2]),
        sign: text(HOUSES_HEADERS[3]),
        occupants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::fixtures;
    use serde_json::json;

    #[test]
    fn sentinel_occupants_become_dash() {
        let view = build_houses_view(&fixtures::sample());
        assert_eq!(view[0].occupants, "-");
        assert_eq!(view[0].meaning, "自我");
    }

    #[test]
    fn other_occupants_pass_through() {
        let view = build_houses_view(&fixtures::sample());
        assert_eq!(view[1].occupants, "太陽、月亮");
        assert_eq!(view[1].house, "第2宮");
        assert_eq!(view[1].label, "財帛宮");
        assert_eq!(view[1].sign, "天蠍");
    }

    #[test]
    fn missing_meaning_is_empty() {
        let view = build_houses_view(&fixtures::sample());
        assert_eq!(view[1].meaning, "");
    }

    #[test]
    fn blank_or_missing_occupants_become_dash() {
        let mut resp = fixtures::sample();
        resp.houses_rows = [
            json!({"宮位": "第4宮", "宮中行星": ""}),
            json!({"宮位": "第5宮"}),
            json!({"宮位": "第6宮", "宮中行星": null}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect();
        let view = build_houses_view(&resp);
        assert!(view.iter().all(|row| row.occupants == "-"));
        assert_eq!(view[0].house, "第4宮");
    }

    #[test]
    fn list_occupants_render_as_text() {
        let mut resp = fixtures::sample();
        resp.houses_rows = vec![json!({"宮位": "第3宮", "宮中行星": ["金星", "火星"]})
            .as_object()
            .cloned()
            .unwrap()];
        let view = build_houses_view(&resp);
        assert_eq!(view[0].occupants, "金星,火星");
    }
}
