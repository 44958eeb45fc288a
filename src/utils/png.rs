use crate::core::{GymError, RenderFrame, Result};

/// Encode a `RenderFrame::Pixels` to a PNG byte vector.
/// - When the `image` feature is enabled, this will encode using the `image` crate.
/// - Without the feature, returns `GymError::NotSupported`.
pub fn encode_png(frame: &RenderFrame) -> Result<Vec<u8>> {
    match frame {
        RenderFrame::Pixels { width, height, data } => encode_pixels_png(*width, *height, data),
        RenderFrame::Text(_) => Err(GymError::NotSupported("text frames cannot be encoded to PNG".into())),
    }
}

#[cfg(feature = "image")]
fn encode_pixels_png(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>> {
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use std::io::Cursor;

    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(GymError::NotSupported(format!(
            "pixel buffer has {} bytes, expected {expected} for {width}x{height} RGBA",
            data.len()
        )));
    }

    let mut buf = Vec::new();
    PngEncoder::new(Cursor::new(&mut buf))
        .write_image(data, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| GymError::Io(format!("PNG encode error: {e}")))?;
    Ok(buf)
}

#[cfg(not(feature = "image"))]
fn encode_pixels_png(_width: u32, _height: u32, _data: &[u8]) -> Result<Vec<u8>> {
    Err(GymError::NotSupported("PNG encoding requires the `image` feature".into()))
}

/// Save a `RenderFrame::Pixels` as a PNG file at the given path.
/// Requires the `image` feature; otherwise returns `NotSupported`.
pub fn save_png<P: AsRef<std::path::Path>>(path: P, frame: &RenderFrame) -> Result<()> {
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes).map_err(|e| GymError::Io(format!("failed to write PNG: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::render2d::{Canvas, GREEN};

    fn frame() -> RenderFrame {
        let mut c = Canvas::for_grid(1, 2, 2);
        c.clear(GREEN);
        c.into_render_frame()
    }

    #[test]
    fn text_frames_are_rejected() {
        let err = encode_png(&RenderFrame::Text("A G".into())).unwrap_err();
        assert!(matches!(err, GymError::NotSupported(_)));
    }

    #[cfg(not(feature = "image"))]
    #[test]
    fn encode_png_without_feature_not_supported() {
        assert!(matches!(encode_png(&frame()), Err(GymError::NotSupported(_))));
    }

    #[cfg(feature = "image")]
    #[test]
    fn encode_png_with_feature_produces_png_signature() {
        let bytes = encode_png(&frame()).expect("PNG encoding should succeed");
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
