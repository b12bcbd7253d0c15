use crate::chart::adapter::{draw_chart, to_chart_model, ChartLibraryModel, ChartOutcome};
use crate::chart::ChartFactory;
use crate::domain::request::ChartRequest;
use crate::domain::response::{ChartResponse, Row};
use crate::ingest::error::ChartServiceError;
use crate::ingest::provider::ChartService;
use crate::view::houses::{build_houses_view, HOUSES_HEADERS};
use crate::view::markdown::{render_markdown, MarkdownRenderer};
use crate::view::positions::{build_positions_view, POSITIONS_HEADERS};
use crate::view::surface::{Region, RenderSurface};
use crate::view::table::render_table;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const STATUS_COMPUTING: &str = "計算中…";
pub const STATUS_DONE: &str = "完成";
pub const ADVICE_PLACEHOLDER: &str = "（未啟用 AI 或無內容）";
pub const DEFAULT_CHART_SIZE: u32 = 800;

pub const FOUR_KINGS_HEADERS: [&str; 4] = ["項目", "宮位", "屬性", "說明"];
pub const SUMMARY_HEADERS: [&str; 3] = ["元素", "簡介", "總分"];
pub const DETAIL_HEADERS: [&str; 5] = ["Item", "Symbol", "Constellation", "Element", "Score"];
pub const ASPECTS_HEADERS: [&str; 3] = ["組合", "類型", "偏離角度"];

pub fn status_error_text(status: u16) -> String {
    format!("錯誤 {status}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum FetchOutcome {
    Rendered {
        chart: ChartOutcome,
        model: ChartLibraryModel,
    },
    /// The service answered with a non-2xx status; only the status region was touched.
    Failed { status: u16 },
}

/// Requests charts and renders every response region onto a surface.
pub struct ChartViewer<S> {
    service: S,
    chart: Option<Arc<dyn ChartFactory>>,
    markdown: Option<Arc<dyn MarkdownRenderer>>,
    chart_size: u32,
}

impl<S: ChartService> ChartViewer<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            chart: None,
            markdown: None,
            chart_size: DEFAULT_CHART_SIZE,
        }
    }

    pub fn with_chart_factory(mut self, factory: Arc<dyn ChartFactory>) -> Self {
        self.chart = Some(factory);
        self
    }

    pub fn with_markdown(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.markdown = Some(renderer);
        self
    }

    pub fn with_chart_size(mut self, size: u32) -> Self {
        self.chart_size = size;
        self
    }

    /// Fetches the chart for `req` and renders it.
    ///
    /// A non-2xx answer only rewrites the status region and leaves the previous view in place.
    /// Transport failures are returned as errors with the status still showing
    /// [`STATUS_COMPUTING`].
    pub async fn fetch<R>(&self, req: &ChartRequest, surface: &mut R) -> Result<FetchOutcome>
    where
        R: RenderSurface + Send,
    {
        surface.set_text(Region::Status, STATUS_COMPUTING.to_string());
        tracing::info!(
            service = self.service.service_name(),
            year = req.year,
            month = req.month,
            day = req.day,
            location = %req.location,
            house_system = %req.house_system,
            "requesting chart"
        );

        let resp = match self.service.fetch_chart(req).await {
            Ok(resp) => resp,
            Err(err) => {
                let Some(status_err) = err.downcast_ref::<ChartServiceError>() else {
                    return Err(err);
                };
                let status = status_err.status.as_u16();
                tracing::warn!(status, "chart service returned an error status");
                surface.set_text(Region::Status, status_error_text(status));
                return Ok(FetchOutcome::Failed { status });
            }
        };

        surface.set_text(Region::Status, STATUS_DONE.to_string());
        Ok(self.render_all(&resp, surface))
    }

    /// Rewrites every region from `resp`. Always yields [`FetchOutcome::Rendered`], carrying the
    /// model handed to the chart renderer.
    pub fn render_all(&self, resp: &ChartResponse, surface: &mut dyn RenderSurface) -> FetchOutcome {
        surface.set_text(
            Region::Geo,
            format!(
                "lat={:.5}, lon={:.5}, tz={}",
                resp.geo.lat, resp.geo.lon, resp.geo.tz
            ),
        );
        surface.set_text(
            Region::HouseSystem,
            resp.house_system_label.clone().unwrap_or_default(),
        );

        surface.set_table(
            Region::FourKings,
            render_table(&FOUR_KINGS_HEADERS, &resp.four_kings),
        );
        surface.set_table(
            Region::Summary,
            render_table(&SUMMARY_HEADERS, &resp.summary_rows),
        );
        surface.set_table(
            Region::Detail,
            render_table(&DETAIL_HEADERS, &resp.detail_rows),
        );
        surface.set_table(
            Region::Aspects,
            render_table(&ASPECTS_HEADERS, &resp.aspects_rows),
        );

        let houses: Vec<Row> = build_houses_view(resp).iter().map(|h| h.to_row()).collect();
        surface.set_table(Region::Houses, render_table(&HOUSES_HEADERS, &houses));

        let markdown = self.markdown.as_deref();
        let advice = resp
            .ai_advice_md
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(ADVICE_PLACEHOLDER);
        surface.set_html(Region::Advice, render_markdown(markdown, advice));
        surface.set_html(
            Region::Credits,
            render_markdown(markdown, resp.credits_md.as_deref().unwrap_or_default()),
        );

        let positions: Vec<Row> = build_positions_view(resp)
            .iter()
            .map(|p| p.to_row())
            .collect();
        surface.set_table(
            Region::Positions,
            render_table(&POSITIONS_HEADERS, &positions),
        );

        let model = to_chart_model(resp);
        let chart = draw_chart(self.chart.as_deref(), surface, &model, self.chart_size);
        FetchOutcome::Rendered { chart, model }
    }
}
