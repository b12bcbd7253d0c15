//! Seam to the external radial-chart renderer.
//!
//! The renderer itself is not part of this crate; implementations of [`ChartFactory`] wrap
//! whatever drawing component the host provides.

pub mod adapter;

use crate::chart::adapter::ChartLibraryModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub show_planet_degrees: bool,
    pub show_cusp_degrees: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_planet_degrees: true,
            show_cusp_degrees: true,
        }
    }
}

/// Exact aspect angle and allowed orb, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectOrb {
    pub angle: f64,
    pub orb: f64,
}

/// Conjunction, sextile, square, trine, opposition.
pub const DEFAULT_ASPECT_ORBS: [AspectOrb; 5] = [
    AspectOrb { angle: 0.0, orb: 8.0 },
    AspectOrb { angle: 60.0, orb: 4.0 },
    AspectOrb { angle: 90.0, orb: 6.0 },
    AspectOrb { angle: 120.0, orb: 7.0 },
    AspectOrb { angle: 180.0, orb: 8.0 },
];

pub trait Drawable {
    fn draw(&mut self);
}

/// Constructs charts bound to a drawing surface.
pub trait ChartFactory: Send + Sync {
    fn create(
        &self,
        surface_id: &str,
        width: u32,
        height: u32,
        options: ChartOptions,
    ) -> anyhow::Result<Box<dyn RadialChart>>;
}

pub trait RadialChart {
    fn radix(&mut self, model: &ChartLibraryModel) -> anyhow::Result<Box<dyn RadixHandle>>;
}

/// A drawn natal wheel. Aspect computation is optional.
pub trait RadixHandle: Drawable {
    fn supports_aspects(&self) -> bool {
        false
    }

    /// `None` asks the renderer for its built-in aspect table.
    fn aspects(
        &mut self,
        _table: Option<&[AspectOrb]>,
    ) -> anyhow::Result<Option<Box<dyn Drawable>>> {
        Ok(None)
    }
}
