//! Software text renderer using cosmic-text and tiny-skia
//!
//! Shapes label text with cosmic-text and blends the rasterized glyph masks
//! straight into an RGBA map buffer. All rendering is done on the CPU.
use std::collections::HashMap;
use std::path::PathBuf;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache, SwashContent, fontdb,
};
use mapquiz_core::MapImage;
use tiny_skia::{Color, PixmapMut};

use crate::error::RenderError;
use crate::map::LabelPainter;
use crate::utils::box_on_canvas;

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 512;

/// Font selection for labels
#[derive(Debug, Clone)]
pub struct FontOptions {
    /// Family name; sans-serif when unset
    pub family: Option<String>,
    /// Extra font file registered with the font database
    pub font_path: Option<PathBuf>,
    pub size: f32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            family: None,
            font_path: None,
            size: 11.0,
        }
    }
}

/// Cached result of text shaping
struct CachedText {
    /// Pre-shaped glyphs with the baseline offset of their line
    glyphs: Vec<(LayoutGlyph, f32)>,
    width: f32,
    height: f32,
    /// LRU tracking: incremented on each access
    last_used: u64,
}

type TextCacheKey = String;

/// Label painter backed by the system font database
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    family: Option<String>,
    font_size: f32,
    /// Cache of shaped text; map labels are redrawn on every render
    text_cache: HashMap<TextCacheKey, CachedText>,
    /// Counter for LRU tracking
    cache_access_counter: u64,
}

impl TextRenderer {
    /// Create a renderer, loading system fonts plus `options.font_path`
    pub fn new(options: &FontOptions) -> Result<Self, RenderError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if let Some(path) = &options.font_path {
            db.load_font_file(path)
                .map_err(|source| RenderError::LoadFont {
                    path: path.clone(),
                    source,
                })?;
        }
        Self::with_database(db, options)
    }

    /// Create a renderer over an already populated font database.
    ///
    /// Fails when the database is empty or `options.family` names a family
    /// it does not contain, since either would render labels without ink.
    pub fn with_database(db: fontdb::Database, options: &FontOptions) -> Result<Self, RenderError> {
        if db.is_empty() {
            return Err(RenderError::NoFonts);
        }
        if let Some(family) = &options.family {
            let installed = db.faces().any(|face| {
                face.families
                    .iter()
                    .any(|(name, _)| name.eq_ignore_ascii_case(family))
            });
            if !installed {
                return Err(RenderError::UnknownFamily(family.clone()));
            }
        }

        let locale = sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string());
        tracing::debug!(faces = db.len(), %locale, "Font database loaded");

        Ok(Self {
            font_system: FontSystem::new_with_locale_and_db(locale, db),
            swash_cache: SwashCache::new(),
            family: options.family.clone(),
            font_size: options.size,
            text_cache: HashMap::with_capacity(64),
            cache_access_counter: 0,
        })
    }

    /// Evict least recently used entries if cache is too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        // Drop the oldest quarter
        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    /// Ensure text is cached, shaping if needed. Returns (width, height).
    fn ensure_cached(&mut self, text: &str) -> (f32, f32) {
        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        if let Some(cached) = self.text_cache.get_mut(text) {
            cached.last_used = current_access;
            return (cached.width, cached.height);
        }

        let metrics = Metrics::new(self.font_size, self.font_size * 1.2);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);

        let family = match &self.family {
            Some(name) => Family::Name(name),
            None => Family::SansSerif,
        };
        let attrs = Attrs::new().family(family);
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;

            for glyph in run.glyphs.iter() {
                glyphs.push((glyph.clone(), run.line_y));
            }
        }
        if glyphs.is_empty() && !text.trim().is_empty() {
            tracing::warn!(text, "Label shaped to no glyphs");
        }

        self.text_cache.insert(
            text.to_string(),
            CachedText {
                glyphs,
                width,
                height,
                last_used: current_access,
            },
        );
        self.evict_lru_if_needed();

        (width, height)
    }

    /// Draw text with its box's top-left corner at (x, y). Text whose box
    /// lies entirely outside the canvas is not drawn.
    pub fn draw_text(&mut self, canvas: &mut MapImage, text: &str, x: f32, y: f32, color: Color) {
        let (width, height) = (canvas.width, canvas.height);
        let size = self.ensure_cached(text);
        // Glyph positions are i32; anything this far off never reaches them
        if !box_on_canvas((x, y), size, width, height) {
            return;
        }

        let Some(cached) = self.text_cache.get(text) else {
            return;
        };
        let Some(mut pixmap) = PixmapMut::from_bytes(&mut canvas.rgba, width, height) else {
            return;
        };

        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for (glyph, line_y) in &cached.glyphs {
            let physical_glyph = glyph.physical((x, y + line_y), 1.0);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical_glyph.cache_key)
            {
                // Color bitmaps (emoji) are not used for labels
                if !matches!(image.content, SwashContent::Mask) {
                    continue;
                }

                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y - image.placement.top;

                draw_glyph_to_pixmap(
                    &mut pixmap,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                    text_color,
                );
            }
        }
    }

    /// Measure text dimensions (uses shaping cache)
    pub fn measure_text(&mut self, text: &str) -> (f32, f32) {
        self.ensure_cached(text)
    }
}

impl LabelPainter for TextRenderer {
    fn measure(&mut self, text: &str) -> (f32, f32) {
        self.measure_text(text)
    }

    fn draw(&mut self, canvas: &mut MapImage, text: &str, x: f32, y: f32, color: Color) {
        self.draw_text(canvas, text, x, y, color);
    }
}

/// Draw a glyph coverage mask onto a pixmap with alpha blending
fn draw_glyph_to_pixmap(
    pixmap: &mut PixmapMut,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&alpha) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((color.r() as u32 * src_a + data[pixel_idx] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 1] =
                ((color.g() as u32 * src_a + data[pixel_idx + 1] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 2] =
                ((color.b() as u32 * src_a + data[pixel_idx + 2] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}
