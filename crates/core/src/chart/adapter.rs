use crate::chart::{
    AspectOrb, ChartFactory, ChartOptions, Drawable, RadixHandle, DEFAULT_ASPECT_ORBS,
};
use crate::domain::response::ChartResponse;
use crate::domain::symbols::{chart_planet_id, CHART_ASCENDANT_ID};
use crate::view::surface::{Region, RenderSurface};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CUSP_COUNT: usize = 12;

/// Input schema of the radial-chart renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartLibraryModel {
    pub planets: BTreeMap<String, Vec<f64>>,
    pub cusps: Vec<f64>,
}

/// Reshapes a chart response for the renderer.
///
/// Only planets with a known chart-library identifier are kept, plus the ascendant. Longitudes
/// are passed through unnormalized. At most twelve cusps are kept; fewer are not padded.
pub fn to_chart_model(resp: &ChartResponse) -> ChartLibraryModel {
    let mut planets: BTreeMap<String, Vec<f64>> = resp
        .planet_lons
        .iter()
        .filter_map(|(name, lon)| chart_planet_id(name).map(|id| (id.to_string(), vec![*lon])))
        .collect();
    planets.insert(CHART_ASCENDANT_ID.to_string(), vec![resp.asc]);

    let cusps = resp.cusps.iter().take(CUSP_COUNT).copied().collect();

    ChartLibraryModel { planets, cusps }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectOutcome {
    /// The drawn chart has no aspect capability.
    Unsupported,
    /// The renderer's built-in aspect table produced lines.
    BuiltIn,
    /// Built-in aspects were unusable; the default orb table produced lines.
    DefaultTable,
    /// Both attempts failed; the chart is drawn without aspect lines.
    Omitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "chart")]
pub enum ChartOutcome {
    /// No usable renderer; the chart area stays empty.
    Unavailable,
    Drawn { aspects: AspectOutcome },
}

/// Draws the wheel for `model` onto the paper region.
///
/// The region is cleared first. A missing or failing renderer leaves it blank and is not an
/// error.
pub fn draw_chart(
    factory: Option<&dyn ChartFactory>,
    surface: &mut dyn RenderSurface,
    model: &ChartLibraryModel,
    default_size: u32,
) -> ChartOutcome {
    surface.clear(Region::Paper);

    let Some(factory) = factory else {
        tracing::debug!("no chart renderer configured; chart area left empty");
        return ChartOutcome::Unavailable;
    };

    let size = surface
        .width_of(Region::Paper)
        .filter(|w| *w > 0)
        .unwrap_or(default_size);

    let mut chart = match factory.create(Region::Paper.id(), size, size, ChartOptions::default()) {
        Ok(chart) => chart,
        Err(err) => {
            tracing::warn!(error = %err, "chart renderer unavailable; chart area left empty");
            return ChartOutcome::Unavailable;
        }
    };

    let mut radix = match chart.radix(model) {
        Ok(radix) => radix,
        Err(err) => {
            tracing::warn!(error = %err, "chart renderer rejected model; chart area left empty");
            return ChartOutcome::Unavailable;
        }
    };

    radix.draw();
    let aspects = draw_aspects(radix.as_mut());
    tracing::debug!(size, planets = model.planets.len(), ?aspects, "chart drawn");

    ChartOutcome::Drawn { aspects }
}

fn draw_aspects(radix: &mut dyn RadixHandle) -> AspectOutcome {
    if !radix.supports_aspects() {
        return AspectOutcome::Unsupported;
    }

    if let Some(mut lines) = try_aspects(radix, None) {
        lines.draw();
        return AspectOutcome::BuiltIn;
    }

    if let Some(mut lines) = try_aspects(radix, Some(&DEFAULT_ASPECT_ORBS)) {
        lines.draw();
        return AspectOutcome::DefaultTable;
    }

    AspectOutcome::Omitted
}

fn try_aspects(
    radix: &mut dyn RadixHandle,
    table: Option<&[AspectOrb]>,
) -> Option<Box<dyn Drawable>> {
    match radix.aspects(table) {
        Ok(lines) => lines,
        Err(err) => {
            tracing::warn!(error = %err, default_table = table.is_some(), "aspect computation failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::chart::RadialChart;
    use std::sync::{Arc, Mutex};

    /// How the fake renderer answers aspect requests.
    #[derive(Debug, Clone, Copy)]
    pub enum AspectBehavior {
        Unsupported,
        BuiltIn,
        OnlyWithTable,
        FailBoth,
    }

    #[derive(Debug, Default)]
    pub struct Calls {
        pub created: Vec<(String, u32, u32, ChartOptions)>,
        pub models: Vec<ChartLibraryModel>,
        pub aspect_requests: Vec<Option<Vec<AspectOrb>>>,
        pub draws: Vec<&'static str>,
    }

    #[derive(Clone)]
    pub struct FakeFactory {
        pub behavior: AspectBehavior,
        pub calls: Arc<Mutex<Calls>>,
    }

    impl FakeFactory {
        pub fn new(behavior: AspectBehavior) -> Self {
            Self {
                behavior,
                calls: Arc::new(Mutex::new(Calls::default())),
            }
        }
    }

    impl ChartFactory for FakeFactory {
        fn create(
            &self,
            surface_id: &str,
            width: u32,
            height: u32,
            options: ChartOptions,
        ) -> anyhow::Result<Box<dyn RadialChart>> {
            self.calls
                .lock()
                .unwrap()
                .created
                .push((surface_id.to_string(), width, height, options));
            Ok(Box::new(self.clone()))
        }
    }

    impl RadialChart for FakeFactory {
        fn radix(&mut self, model: &ChartLibraryModel) -> anyhow::Result<Box<dyn RadixHandle>> {
            self.calls.lock().unwrap().models.push(model.clone());
            Ok(Box::new(FakeRadix {
                behavior: self.behavior,
                calls: self.calls.clone(),
            }))
        }
    }

    struct FakeRadix {
        behavior: AspectBehavior,
        calls: Arc<Mutex<Calls>>,
    }

    impl Drawable for FakeRadix {
        fn draw(&mut self) {
            self.calls.lock().unwrap().draws.push("radix");
        }
    }

    impl RadixHandle for FakeRadix {
        fn supports_aspects(&self) -> bool {
            !matches!(self.behavior, AspectBehavior::Unsupported)
        }

        fn aspects(
            &mut self,
            table: Option<&[AspectOrb]>,
        ) -> anyhow::Result<Option<Box<dyn Drawable>>> {
            self.calls
                .lock()
                .unwrap()
                .aspect_requests
                .push(table.map(|t| t.to_vec()));
            let lines = || -> Box<dyn Drawable> {
                Box::new(FakeLines {
                    calls: self.calls.clone(),
                })
            };
            match (self.behavior, table) {
                (AspectBehavior::BuiltIn, _) => Ok(Some(lines())),
                (AspectBehavior::OnlyWithTable, None) => Ok(None),
                (AspectBehavior::OnlyWithTable, Some(_)) => Ok(Some(lines())),
                (AspectBehavior::FailBoth, _) => anyhow::bail!("aspects exploded"),
                (AspectBehavior::Unsupported, _) => Ok(None),
            }
        }
    }

    struct FakeLines {
        calls: Arc<Mutex<Calls>>,
    }

    impl Drawable for FakeLines {
        fn draw(&mut self) {
            self.calls.lock().unwrap().draws.push("aspects");
        }
    }

    pub struct BrokenFactory;

    impl ChartFactory for BrokenFactory {
        fn create(
            &self,
            _surface_id: &str,
            _width: u32,
            _height: u32,
            _options: ChartOptions,
        ) -> anyhow::Result<Box<dyn RadialChart>> {
            anyhow::bail!("renderer not loaded")
        }
    }
}
