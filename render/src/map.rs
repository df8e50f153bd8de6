//! Map label rendering.
//!
//! Each render starts from a fresh copy of the base image and draws one
//! label per guessed region, centered on the region's pixel coordinate.

use mapquiz_core::{GameSession, MapImage, Region, RegionSet};
use tiny_skia::Color;

use crate::utils::box_on_canvas;

/// Text measurement and drawing used for labels
pub trait LabelPainter {
    /// Width and height of the text box for `text`
    fn measure(&mut self, text: &str) -> (f32, f32);

    /// Draw `text` with the top-left corner of its box at (x, y)
    fn draw(&mut self, canvas: &mut MapImage, text: &str, x: f32, y: f32, color: Color);
}

/// Convert centered, y-up map coordinates to raster pixel coordinates
/// (origin top-left, y down). Halves round to even.
pub fn to_pixel(x: f64, y: f64, width: u32, height: u32) -> (i64, i64) {
    let px = (x + width as f64 / 2.0).round_ties_even() as i64;
    let py = (height as f64 / 2.0 - y).round_ties_even() as i64;
    (px, py)
}

/// Where one label goes
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: String,
    /// Pixel the label is centered on
    pub center: (i64, i64),
    /// Top-left corner of the text box
    pub origin: (f32, f32),
    pub size: (f32, f32),
}

pub struct MapRenderer<P> {
    painter: P,
    label_color: Color,
}

impl<P: LabelPainter> MapRenderer<P> {
    pub fn new(painter: P, label_color: Color) -> Self {
        Self {
            painter,
            label_color,
        }
    }

    /// Place the label of one region on an image of the given size
    pub fn place(&mut self, region: &Region, width: u32, height: u32) -> LabelPlacement {
        let center = to_pixel(region.x, region.y, width, height);
        let (text_w, text_h) = self.painter.measure(&region.canonical_name);
        LabelPlacement {
            text: region.canonical_name.clone(),
            center,
            origin: (
                center.0 as f32 - text_w / 2.0,
                center.1 as f32 - text_h / 2.0,
            ),
            size: (text_w, text_h),
        }
    }

    /// Placements for every guessed name found in `regions`, in the given order
    pub fn layout<'a>(
        &mut self,
        base: &MapImage,
        regions: &RegionSet,
        guessed: impl IntoIterator<Item = &'a str>,
    ) -> Vec<LabelPlacement> {
        guessed
            .into_iter()
            .filter_map(|name| {
                let region = regions.lookup(name);
                if region.is_none() {
                    tracing::debug!(name, "Guessed name not in region set, skipping label");
                }
                region
            })
            .map(|region| self.place(region, base.width, base.height))
            .collect()
    }

    /// Draw labels for `guessed` onto a copy of `base`. Labels whose box
    /// falls entirely outside the image are skipped.
    pub fn render<'a>(
        &mut self,
        base: &MapImage,
        regions: &RegionSet,
        guessed: impl IntoIterator<Item = &'a str>,
    ) -> MapImage {
        let placements = self.layout(base, regions, guessed);
        let mut canvas = base.clone();
        for label in &placements {
            if !box_on_canvas(label.origin, label.size, canvas.width, canvas.height) {
                tracing::debug!(label = %label.text, center = ?label.center, "Label outside map, skipping");
                continue;
            }
            self.painter.draw(
                &mut canvas,
                &label.text,
                label.origin.0,
                label.origin.1,
                self.label_color,
            );
        }
        canvas
    }

    /// Render the current state of a session
    pub fn render_session(&mut self, session: &GameSession) -> MapImage {
        self.render(session.image(), session.regions(), session.guessed_names())
    }
}
