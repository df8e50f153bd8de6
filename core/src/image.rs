//! Base map images.
//!
//! Images are decoded to straight RGBA8 so the renderer can blend labels
//! directly into a copy of the buffer.

use std::path::Path;

use crate::error::LoadError;

/// Decoded RGBA map image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapImage {
    /// RGBA pixel data (width * height * 4 bytes)
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl MapImage {
    /// Wrap an existing RGBA buffer. Returns `None` if the length does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        (rgba.len() == width as usize * height as usize * 4).then_some(Self {
            rgba,
            width,
            height,
        })
    }

    /// Image filled with a single color
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let rgba = color.repeat(width as usize * height as usize);
        Self {
            rgba,
            width,
            height,
        }
    }

    /// RGBA value at (x, y), or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Load and decode a PNG or GIF file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let data = std::fs::read(path).map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        decode_image(path, &data)
    }
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const GIF_SIGNATURES: [&[u8]; 2] = [b"GIF87a", b"GIF89a"];

/// Decode image data, picking the decoder from the file signature
pub fn decode_image(path: &Path, data: &[u8]) -> Result<MapImage, LoadError> {
    if data.starts_with(PNG_SIGNATURE) {
        decode_png(path, data)
    } else if GIF_SIGNATURES.iter().any(|sig| data.starts_with(sig)) {
        decode_gif(path, data)
    } else {
        Err(LoadError::UnsupportedImage {
            path: path.to_path_buf(),
            reason: "not a PNG or GIF file".to_string(),
        })
    }
}

/// Decode PNG data to RGBA. `path` is only used for error reporting.
pub fn decode_png(path: &Path, data: &[u8]) -> Result<MapImage, LoadError> {
    let decode_err = |source| LoadError::DecodeImage {
        path: path.to_path_buf(),
        source,
    };

    let mut decoder = png::Decoder::new(data);
    // Palette and low bit depth images come out as 8-bit RGB(A) / gray
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(decode_err)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(decode_err)?;

    let width = info.width;
    let height = info.height;
    let pixels = &buf[..info.buffer_size()];
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);

    match info.color_type {
        png::ColorType::Rgba => rgba.extend_from_slice(pixels),
        png::ColorType::Rgb => {
            for chunk in pixels.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(255);
            }
        }
        png::ColorType::GrayscaleAlpha => {
            for chunk in pixels.chunks_exact(2) {
                let (gray, alpha) = (chunk[0], chunk[1]);
                rgba.extend_from_slice(&[gray, gray, gray, alpha]);
            }
        }
        png::ColorType::Grayscale => {
            for &gray in pixels {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
        }
        png::ColorType::Indexed => {
            return Err(LoadError::UnsupportedImage {
                path: path.to_path_buf(),
                reason: "indexed color was not expanded".to_string(),
            });
        }
    }

    MapImage::from_rgba(width, height, rgba).ok_or_else(|| LoadError::UnsupportedImage {
        path: path.to_path_buf(),
        reason: "pixel data does not match image dimensions".to_string(),
    })
}

/// Decode the first frame of a GIF to RGBA. The frame is placed on a
/// transparent canvas the size of the logical screen.
pub fn decode_gif(path: &Path, data: &[u8]) -> Result<MapImage, LoadError> {
    let decode_err = |source| LoadError::DecodeGif {
        path: path.to_path_buf(),
        source,
    };

    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(data).map_err(decode_err)?;
    let (screen_w, screen_h) = (decoder.width() as u32, decoder.height() as u32);

    let Some(frame) = decoder.read_next_frame().map_err(decode_err)? else {
        return Err(LoadError::UnsupportedImage {
            path: path.to_path_buf(),
            reason: "GIF has no frames".to_string(),
        });
    };

    let (left, top) = (frame.left as u32, frame.top as u32);
    let (frame_w, frame_h) = (frame.width as u32, frame.height as u32);
    let width = screen_w.max(left + frame_w);
    let height = screen_h.max(top + frame_h);
    if frame.buffer.len() != frame_w as usize * frame_h as usize * 4 {
        return Err(LoadError::UnsupportedImage {
            path: path.to_path_buf(),
            reason: "frame data does not match frame dimensions".to_string(),
        });
    }

    let mut image = MapImage::filled(width, height, [0, 0, 0, 0]);
    let row_len = frame_w as usize * 4;
    for (row, src) in frame.buffer.chunks_exact(row_len.max(1)).enumerate() {
        let start = ((top as usize + row) * width as usize + left as usize) * 4;
        image.rgba[start..start + row_len].copy_from_slice(src);
    }
    Ok(image)
}
