//! PNG output for annotated maps

use std::path::Path;

use mapquiz_core::MapImage;

use crate::error::RenderError;

/// Encode an RGBA map image as PNG bytes
pub fn encode_png(image: &MapImage) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.rgba)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Encode and write an image to `path`
pub fn write_png(image: &MapImage, path: &Path) -> Result<(), RenderError> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes).map_err(|source| RenderError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
