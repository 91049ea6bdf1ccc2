//! Snapshot codec: lossless PNG encoding of the raster, alpha included.
//!
//! Pixels are demultiplied on encode and premultiplied again on decode.
//! Both directions round to nearest, which reproduces every premultiplied
//! pixel exactly, so `decode(encode(r)) == r`.

use crate::raster::Raster;
use crate::renderer::RendererError;
use canopy_core::snapshot::{Snapshot, SnapshotError};
use std::io::Cursor;
use thiserror::Error;
use tiny_skia::PremultipliedColorU8;

/// Codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("PNG decoding failed: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("Unsupported PNG format: {color_type} at {bit_depth} bits")]
    UnsupportedFormat { color_type: String, bit_depth: u8 },
    #[error("Snapshot is {width}x{height}, expected {expected}x{expected}")]
    ResolutionMismatch { expected: u32, width: u32, height: u32 },
    #[error("Raster error: {0}")]
    Raster(#[from] RendererError),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Encode the full raster content into a snapshot.
pub fn encode(raster: &Raster) -> CodecResult<Snapshot> {
    let pixmap = raster.pixmap();
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let a = pixel.alpha();
        rgba.extend_from_slice(&[
            demultiply(pixel.red(), a),
            demultiply(pixel.green(), a),
            demultiply(pixel.blue(), a),
            a,
        ]);
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }

    Ok(Snapshot::from_png_bytes(&png_data))
}

/// Decode a snapshot into a fresh raster of `resolution`.
pub fn decode(snapshot: &Snapshot, resolution: u32) -> CodecResult<Raster> {
    let mut raster = Raster::new(resolution)?;
    decode_into(snapshot, &mut raster)?;
    Ok(raster)
}

/// Decode a snapshot over an existing raster, replacing every pixel.
///
/// This is a pure load: nothing is blended with previous content. On error
/// the raster is left untouched.
pub fn decode_into(snapshot: &Snapshot, raster: &mut Raster) -> CodecResult<()> {
    let bytes = snapshot.png_bytes()?;
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info()?;

    let expected = raster.resolution();
    {
        let info = reader.info();
        if info.width != expected || info.height != expected {
            return Err(CodecError::ResolutionMismatch {
                expected,
                width: info.width,
                height: info.height,
            });
        }
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    if frame.color_type != png::ColorType::Rgba || frame.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::UnsupportedFormat {
            color_type: format!("{:?}", frame.color_type),
            bit_depth: frame.bit_depth as u8,
        });
    }
    buf.truncate(frame.buffer_size());

    let pixels = raster.pixmap_mut().pixels_mut();
    for (dst, src) in pixels.iter_mut().zip(buf.chunks_exact(4)) {
        let a = src[3];
        *dst = PremultipliedColorU8::from_rgba(
            premultiply(src[0], a),
            premultiply(src[1], a),
            premultiply(src[2], a),
            a,
        )
        .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
    Ok(())
}

fn demultiply(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let (c, a) = (u32::from(c), u32::from(a));
    ((c * 255 + a / 2) / a).min(255) as u8
}

fn premultiply(c: u8, a: u8) -> u8 {
    ((u32::from(c) * u32::from(a) + 127) / 255) as u8
}
