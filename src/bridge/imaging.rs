//! Image container decoding through the `image` crate.
//!
//! Decoded pixels come back as a `SampleArray` of shape `(height, width)` for
//! single-channel images and `(height, width, channels)` otherwise. Formats the
//! linked `image` build cannot read, and every image encoder, report
//! `CodecError::Unsupported`.

use image::{DynamicImage, ImageFormat};
use ndarray::{ArrayD, IxDyn};

use crate::error::CodecError;
use crate::traits::Sample;
use crate::types::SampleArray;

/// Names of the image codecs known to the registry.
pub const IMAGE_CODECS: [&str; 8] = ["jpeg", "jpeg8", "jpeg12", "jpeg0xc3", "j2k", "jxr", "webp", "png"];

/// Maps a codec name to the container format `image` decodes it with.
fn format_for(name: &str) -> Result<ImageFormat, CodecError> {
    match name {
        "jpeg" | "jpeg8" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        "webp" => Ok(ImageFormat::WebP),
        "jpeg12" | "jpeg0xc3" | "j2k" | "jxr" => Err(CodecError::unsupported(format!(
            "{} decode is not available in this build",
            name
        ))),
        _ => Err(CodecError::unsupported(format!("unknown image codec '{}'", name))),
    }
}

fn pixels_to_array<T: Sample>(shape: &[usize], pixels: Vec<T>) -> Result<SampleArray, CodecError> {
    let array = ArrayD::from_shape_vec(IxDyn(shape), pixels)
        .map_err(|e| CodecError::InvalidShape(format!("decoded image does not fit {:?}: {}", shape, e)))?;
    Ok(T::wrap_array(array))
}

fn image_to_array(image: DynamicImage) -> Result<SampleArray, CodecError> {
    let height = image.height() as usize;
    let width = image.width() as usize;
    let channels = image.color().channel_count() as usize;
    let shape = if channels == 1 {
        vec![height, width]
    } else {
        vec![height, width, channels]
    };

    match image {
        DynamicImage::ImageLuma8(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageLuma16(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageLumaA16(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageRgb16(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageRgba16(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageRgb32F(buf) => pixels_to_array(&shape, buf.into_raw()),
        DynamicImage::ImageRgba32F(buf) => pixels_to_array(&shape, buf.into_raw()),
        other => Err(CodecError::unsupported(format!(
            "pixel layout {:?} is not supported",
            other.color()
        ))),
    }
}

/// Decodes an image container into a sample array.
pub fn decode(name: &str, input_bytes: &[u8]) -> Result<SampleArray, CodecError> {
    let format = format_for(name)?;
    let image = image::load_from_memory_with_format(input_bytes, format)?;
    log::debug!("{} decoded to {}x{} {:?}", name, image.width(), image.height(), image.color());
    image_to_array(image)
}

/// Image encoders are not provided.
pub fn encode(name: &str, _data: &SampleArray) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::unsupported(format!("{} encode", name)))
}
