// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — format sniffing, animated-input rejection, single-channel
// luma conversion, and metadata-free encoding. Operates on in-memory images
// using the `image` crate.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use graustufe_core::error::{GraustufeError, Result};
use graustufe_core::types::is_image_path;
use image::codecs::gif::GifDecoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngDecoder;
use image::{AnimationDecoder, DynamicImage, GrayImage, ImageError, ImageFormat, ImageReader, Luma, RgbImage};
use tiff::decoder::Decoder as TiffDecoder;
use tracing::{debug, info, instrument, warn};

/// JPEG quality used for every JPEG output.
pub const JPEG_QUALITY: u8 = 95;

/// A decoded, still (non-animated) image ready for grayscale conversion.
///
/// ```ignore
/// let gray = ImageProcessor::open("photo.jpg")?.into_luma();
/// ImageProcessor::save_luma(&gray, "photo_gray.jpg")?;
/// ```
pub struct ImageProcessor {
    /// The decoded source image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// The format is sniffed from the file contents, not the extension.
    /// Animated GIF, APNG, and multi-page TIFF inputs are rejected with
    /// [`GraustufeError::Animated`] before the full image is decoded.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = ImageReader::new(BufReader::new(File::open(path)?)).with_guessed_format()?;
        let format = reader.format().ok_or_else(|| {
            GraustufeError::UnrecognizedFormat(path.display().to_string())
        })?;

        if let Some(frames) = animated_frame_count(path, format)? {
            warn!(frames, "Animated image rejected");
            return Err(GraustufeError::Animated(format!(
                "{} has more than one frame",
                path.display()
            )));
        }

        let image = reader.decode().map_err(|err| decode_error(path, err))?;
        info!(
            ?format,
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Image loaded"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Conversion -----------------------------------------------------------

    /// Convert to a single 8-bit luma channel.
    ///
    /// Gray inputs keep their levels (alpha is dropped, 16-bit is scaled to
    /// 8-bit). Everything else is flattened to RGB first, discarding alpha
    /// without compositing, and then reduced with ITU-R 601-2 luma weights.
    #[instrument(skip(self), fields(color = ?self.image.color()))]
    pub fn into_luma(self) -> GrayImage {
        match self.image {
            DynamicImage::ImageLuma8(gray) => gray,
            gray @ (DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)) => gray.to_luma8(),
            other => {
                debug!("Flattening to RGB before luma conversion");
                luma_from_rgb(&other.to_rgb8())
            }
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Write a grayscale image to `path`, picking the encoder from the
    /// extension.
    ///
    /// No ICC profile or EXIF block is ever written, so thumbnails render
    /// as true gray. JPEG uses quality 95, baseline encoding, and a single
    /// channel. A partially written file is removed on failure.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_luma(gray: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = output_format(path)?;

        let result = File::create(path)
            .map_err(GraustufeError::from)
            .and_then(|file| encode_luma(gray, format, BufWriter::new(file)));

        if let Err(err) = result {
            if path.exists() {
                if let Err(cleanup) = std::fs::remove_file(path) {
                    warn!(error = %cleanup, "Could not remove partial output");
                }
            }
            return Err(err);
        }

        debug!(?format, "Image saved");
        Ok(())
    }
}

/// ITU-R 601-2 luma transform with the same fixed-point rounding as the
/// classic imaging libraries: `L = (19595 R + 38470 G + 7471 B + 0x8000) >> 16`.
pub fn luma_from_rgb(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([rgb_to_luma(r, g, b)])
    })
}

/// Luma level of one RGB triple.
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
    (weighted >> 16) as u8
}

/// Number of frames when the file is an animation (more than one frame),
/// `None` for still images.
///
/// A TIFF with a second page counts as animated. Counting stops at two.
fn animated_frame_count(path: &Path, format: ImageFormat) -> Result<Option<usize>> {
    let frames = match format {
        ImageFormat::Gif => {
            let reader = BufReader::new(File::open(path)?);
            let decoder = GifDecoder::new(reader).map_err(|err| decode_error(path, err))?;
            count_frames(decoder.into_frames())
        }
        ImageFormat::Png => {
            let reader = BufReader::new(File::open(path)?);
            let decoder = PngDecoder::new(reader).map_err(|err| decode_error(path, err))?;
            if !decoder.is_apng().map_err(|err| decode_error(path, err))? {
                return Ok(None);
            }
            let apng = decoder.apng().map_err(|err| decode_error(path, err))?;
            count_frames(apng.into_frames())
        }
        ImageFormat::Tiff => {
            let reader = BufReader::new(File::open(path)?);
            let decoder = TiffDecoder::new(reader).map_err(|err| {
                GraustufeError::Decode(format!("{}: {}", path.display(), err))
            })?;
            1 + usize::from(decoder.more_images())
        }
        _ => return Ok(None),
    };
    Ok((frames > 1).then_some(frames))
}

/// Count decodable frames, stopping as soon as the image is known to be
/// animated.
fn count_frames(frames: image::Frames<'_>) -> usize {
    frames.take(2).take_while(|frame| frame.is_ok()).count()
}

fn decode_error(path: &Path, err: ImageError) -> GraustufeError {
    match err {
        ImageError::Unsupported(detail) => GraustufeError::UnrecognizedFormat(format!(
            "{}: {}",
            path.display(),
            detail
        )),
        ImageError::IoError(io) => GraustufeError::Io(io),
        other => GraustufeError::Decode(format!("{}: {}", path.display(), other)),
    }
}

/// Map the destination extension to an encoder, limited to the formats the
/// tool reads.
fn output_format(path: &Path) -> Result<ImageFormat> {
    let unsupported = || GraustufeError::UnsupportedOutput(path.display().to_string());
    if !is_image_path(path) {
        return Err(unsupported());
    }
    ImageFormat::from_path(path).map_err(|_| unsupported())
}

fn encode_luma(gray: &GrayImage, format: ImageFormat, mut writer: BufWriter<File>) -> Result<()> {
    let encoded = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            gray.write_with_encoder(encoder)
        }
        // The GIF encoder only accepts RGB(A) buffers.
        ImageFormat::Gif => DynamicImage::ImageLuma8(gray.clone())
            .to_rgba8()
            .write_to(&mut writer, ImageFormat::Gif),
        other => gray.write_to(&mut writer, other),
    };
    encoded.map_err(|err| GraustufeError::Encode(err.to_string()))?;
    writer.flush()?;
    Ok(())
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, LumaA, Rgb, Rgba, RgbaImage};
    use tiff::encoder::{colortype, TiffEncoder};

    fn gradient_rgb(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8])
        })
    }

    fn write_gif(path: &Path, frames: usize) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        for i in 0..frames {
            let buffer = RgbaImage::from_pixel(8, 8, Rgba([i as u8 * 40, 10, 200, 255]));
            encoder
                .encode_frame(Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(100, 1)))
                .unwrap();
        }
    }

    fn write_apng(path: &Path, frames: u32) {
        let file = BufWriter::new(File::create(path).unwrap());
        let mut encoder = png::Encoder::new(file, 8, 8);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_animated(frames, 0).unwrap();
        let mut writer = encoder.write_header().unwrap();
        for i in 0..frames {
            writer.write_image_data(&[i as u8 * 60; 64]).unwrap();
        }
        writer.finish().unwrap();
    }

    fn write_tiff(path: &Path, pages: u8) {
        let file = BufWriter::new(File::create(path).unwrap());
        let mut encoder = TiffEncoder::new(file).unwrap();
        for page in 0..pages {
            encoder
                .write_image::<colortype::Gray8>(6, 4, &[page * 50; 24])
                .unwrap();
        }
    }

    /// Reference weights: pure primaries and a mid gray.
    #[test]
    fn luma_weights_match_reference() {
        assert_eq!(rgb_to_luma(255, 0, 0), 76);
        assert_eq!(rgb_to_luma(0, 255, 0), 150);
        assert_eq!(rgb_to_luma(0, 0, 255), 29);
        assert_eq!(rgb_to_luma(255, 255, 255), 255);
        assert_eq!(rgb_to_luma(128, 128, 128), 128);
        assert_eq!(rgb_to_luma(0, 0, 0), 0);
    }

    #[test]
    fn luma8_input_is_kept_verbatim() {
        let gray = GrayImage::from_fn(4, 4, |x, y| Luma([(x * 60 + y) as u8]));
        let out = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(gray.clone())).into_luma();
        assert_eq!(out, gray);
    }

    #[test]
    fn luma_alpha_drops_alpha() {
        let la = image::ImageBuffer::from_pixel(3, 3, LumaA([90u8, 10]));
        let out = ImageProcessor::from_dynamic(DynamicImage::ImageLumaA8(la)).into_luma();
        assert!(out.pixels().all(|p| p.0[0] == 90));
    }

    /// RGBA alpha is discarded, not composited against a background.
    #[test]
    fn rgba_alpha_is_discarded() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 0]));
        let out = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(rgba)).into_luma();
        assert!(out.pixels().all(|p| p.0[0] == 76));
    }

    #[test]
    fn jpeg_output_is_single_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let gray = luma_from_rgb(&gradient_rgb(16, 16));

        ImageProcessor::save_luma(&gray, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let gray = luma_from_rgb(&gradient_rgb(10, 6));

        ImageProcessor::save_luma(&gray, &path).unwrap();

        assert_eq!(image::open(&path).unwrap().to_luma8(), gray);
    }

    #[test]
    fn gif_output_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");
        let gray = GrayImage::from_pixel(5, 5, Luma([100u8]));

        ImageProcessor::save_luma(&gray, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        let [r, g, b] = decoded.get_pixel(2, 2).0;
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn unknown_output_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.webp");
        let gray = GrayImage::new(2, 2);

        let err = ImageProcessor::save_luma(&gray, &path).unwrap_err();
        assert!(matches!(err, GraustufeError::UnsupportedOutput(_)));
        assert!(!path.exists());
    }

    /// Format is sniffed from content: a PNG named `.jpg` still opens.
    #[test]
    fn open_sniffs_format_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actually_png.jpg");
        gradient_rgb(4, 4).save_with_format(&path, ImageFormat::Png).unwrap();

        let processor = ImageProcessor::open(&path).unwrap();
        assert_eq!((processor.width(), processor.height()), (4, 4));
    }

    #[test]
    fn garbage_is_unrecognized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"this is not an image at all").unwrap();

        let err = ImageProcessor::open(&path).err().unwrap();
        assert!(matches!(err, GraustufeError::UnrecognizedFormat(_)), "{err:?}");
    }

    #[test]
    fn animated_gif_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        write_gif(&path, 3);

        let err = ImageProcessor::open(&path).err().unwrap();
        assert!(matches!(err, GraustufeError::Animated(_)), "{err:?}");
    }

    #[test]
    fn single_frame_gif_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.gif");
        write_gif(&path, 1);

        let gray = ImageProcessor::open(&path).unwrap().into_luma();
        assert_eq!(gray.dimensions(), (8, 8));
    }

    #[test]
    fn animated_png_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.png");
        write_apng(&path, 2);

        let err = ImageProcessor::open(&path).err().unwrap();
        assert!(matches!(err, GraustufeError::Animated(_)), "{err:?}");
    }

    /// An APNG container holding a single frame is a still image.
    #[test]
    fn single_frame_apng_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        write_apng(&path, 1);

        let gray = ImageProcessor::open(&path).unwrap().into_luma();
        assert_eq!(gray.dimensions(), (8, 8));
    }

    #[test]
    fn multi_page_tiff_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.tif");
        write_tiff(&path, 2);

        let err = ImageProcessor::open(&path).err().unwrap();
        assert!(matches!(err, GraustufeError::Animated(_)), "{err:?}");
    }

    #[test]
    fn single_page_tiff_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.tiff");
        write_tiff(&path, 1);

        let gray = ImageProcessor::open(&path).unwrap().into_luma();
        assert_eq!(gray.dimensions(), (6, 4));
        assert!(gray.pixels().all(|p| p.0[0] == 0));
    }
}
