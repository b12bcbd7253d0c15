use crate::view::table::RenderedTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named render targets of the chart viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Paper,
    Status,
    Geo,
    HouseSystem,
    FourKings,
    Summary,
    Detail,
    Aspects,
    Houses,
    Positions,
    Advice,
    Credits,
}

impl Region {
    pub const TABLES: [Region; 6] = [
        Region::FourKings,
        Region::Summary,
        Region::Detail,
        Region::Aspects,
        Region::Houses,
        Region::Positions,
    ];

    /// Stable element id of the region.
    pub fn id(self) -> &'static str {
        match self {
            Region::Paper => "paper",
            Region::Status => "status",
            Region::Geo => "geo",
            Region::HouseSystem => "hsys",
            Region::FourKings => "four_kings",
            Region::Summary => "summary_rows",
            Region::Detail => "detail_rows",
            Region::Aspects => "aspects_rows",
            Region::Houses => "houses_rows",
            Region::Positions => "positions_rows",
            Region::Advice => "ai_advice",
            Region::Credits => "credits",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RegionContent {
    Text(String),
    Html(String),
    Table(RenderedTable),
}

/// Where rendered output lands. Every write replaces the region's previous content.
pub trait RenderSurface {
    fn set_text(&mut self, region: Region, text: String);
    fn set_html(&mut self, region: Region, html: String);
    fn set_table(&mut self, region: Region, table: RenderedTable);
    fn clear(&mut self, region: Region);

    /// Pixel width of a region, if it has a layout.
    fn width_of(&self, _region: Region) -> Option<u32> {
        None
    }
}

/// In-memory surface: the last content written to each region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub regions: BTreeMap<Region, RegionContent>,
}

impl ViewState {
    pub fn get(&self, region: Region) -> Option<&RegionContent> {
        self.regions.get(&region)
    }

    pub fn text(&self, region: Region) -> Option<&str> {
        match self.regions.get(&region)? {
            RegionContent::Text(s) | RegionContent::Html(s) => Some(s),
            RegionContent::Table(_) => None,
        }
    }

    pub fn table(&self, region: Region) -> Option<&RenderedTable> {
        match self.regions.get(&region)? {
            RegionContent::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl RenderSurface for ViewState {
    fn set_text(&mut self, region: Region, text: String) {
        self.regions.insert(region, RegionContent::Text(text));
    }

    fn set_html(&mut self, region: Region, html: String) {
        self.regions.insert(region, RegionContent::Html(html));
    }

    fn set_table(&mut self, region: Region, table: RenderedTable) {
        self.regions.insert(region, RegionContent::Table(table));
    }

    fn clear(&mut self, region: Region) {
        self.regions.remove(&region);
    }
}
