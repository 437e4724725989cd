//! Image pipeline: reference resolution, rescaling, and JPEG re-encoding.
//!
//! Header and footer images arrive as opaque references (URL, `data:` URI,
//! or a bare base64 payload). Whether a reference can be rasterized at all
//! depends on the host environment, so decoding goes through the
//! [`RasterHost`] capability trait: a host either reports
//! [`RasterCapability::Unsupported`] (the build proceeds without the image)
//! or decodes the reference into pixels. Decoded rasters are rescaled so the
//! width never exceeds [`MAX_IMAGE_WIDTH`] layout units and re-encoded as
//! baseline JPEG for DCTDecode embedding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::borrow::Cow;

use crate::error::{Error, Result};

/// Maximum embedded image width in layout units.
pub const MAX_IMAGE_WIDTH: u32 = 520;

/// JPEG re-encode quality (0.92 on the 0..1 scale).
const JPEG_QUALITY: u8 = 92;

/// A re-encoded raster ready for embedding, produced once per build.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// JPEG-encoded pixel data.
    pub bytes: Vec<u8>,
    /// Output width in layout units.
    pub width: u32,
    /// Output height in layout units.
    pub height: u32,
    /// Resource name the content stream refers to (e.g. `ImH`).
    pub name: String,
}

/// Whether a host can rasterize image references at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterCapability {
    /// The host can decode image references into pixels.
    Supported,
    /// No rasterization surface exists; image slots resolve to empty.
    Unsupported,
}

/// Host-side raster decoding.
///
/// The `load` call is the build's only suspension point and is unbounded by
/// design; hosts that perform real I/O should enforce their own deadline.
pub trait RasterHost {
    /// Report whether this host can rasterize at all.
    fn capability(&self) -> RasterCapability;

    /// Resolve and decode a reference into pixels.
    ///
    /// Only called when [`RasterHost::capability`] reported
    /// [`RasterCapability::Supported`]. Failures are decode failures and
    /// fail the whole build.
    fn load(&self, reference: &str) -> Result<DynamicImage>;
}

/// In-process host: decodes `data:` URIs and bare base64 payloads.
///
/// Remote references (`http:`, `https:`, `blob:`) are a decode failure here
/// since the encoder core owns no network I/O; a fetching environment can
/// supply its own [`RasterHost`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRasterHost;

impl RasterHost for EmbeddedRasterHost {
    fn capability(&self) -> RasterCapability {
        RasterCapability::Supported
    }

    fn load(&self, reference: &str) -> Result<DynamicImage> {
        let normalized = normalize_reference(reference);
        let Some(rest) = normalized.strip_prefix("data:") else {
            return Err(Error::Image(
                "cannot load a remote image reference without a fetching host".to_string(),
            ));
        };
        let payload = rest
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| Error::Image("malformed data URI: no payload".to_string()))?;
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| Error::Image(format!("invalid base64 image payload: {}", e)))?;
        image::load_from_memory(&bytes)
            .map_err(|e| Error::Image(format!("failed to decode image: {}", e)))
    }
}

/// Host with no rasterization surface. Every image slot resolves to empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessRasterHost;

impl RasterHost for HeadlessRasterHost {
    fn capability(&self) -> RasterCapability {
        RasterCapability::Unsupported
    }

    fn load(&self, _reference: &str) -> Result<DynamicImage> {
        Err(Error::Image("no rasterization surface available".to_string()))
    }
}

/// Normalize an image reference the way the dashboard historically did:
/// anything that is not already a URL or data URI is treated as a bare
/// base64 PNG payload.
pub fn normalize_reference(value: &str) -> Cow<'_, str> {
    const PASSTHROUGH: [&str; 4] = ["data:", "http:", "https:", "blob:"];
    if PASSTHROUGH.iter().any(|prefix| value.starts_with(prefix)) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("data:image/png;base64,{}", value))
    }
}

/// Convert an image reference into an embeddable payload.
///
/// Resolves to `Ok(None)` when there is nothing to embed: no reference, an
/// empty reference, or a host without rasterization support. Decode and
/// re-encode failures are errors and fail the build.
pub fn convert_image(
    host: &dyn RasterHost,
    name: &str,
    reference: Option<&str>,
) -> Result<Option<ImagePayload>> {
    let Some(reference) = reference else {
        return Ok(None);
    };
    if reference.is_empty() || host.capability() == RasterCapability::Unsupported {
        return Ok(None);
    }

    let source = host.load(reference)?;
    let (width, height) = source.dimensions();

    // A degenerate zero dimension gets a plausible landscape fallback.
    let source_width = if width == 0 { f64::from(MAX_IMAGE_WIDTH) } else { f64::from(width) };
    let source_height = if height == 0 {
        f64::from(MAX_IMAGE_WIDTH) / 6.0
    } else {
        f64::from(height)
    };

    let scale = (f64::from(MAX_IMAGE_WIDTH) / source_width).min(1.0);
    let out_width = ((source_width * scale).round() as u32).max(1);
    let out_height = ((source_height * scale).round() as u32).max(1);

    let resized = if (out_width, out_height) == (width, height) {
        source
    } else {
        source.resize_exact(out_width, out_height, FilterType::Triangle)
    };

    let rgb = resized.to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder
        .encode(rgb.as_raw(), out_width, out_height, image::ColorType::Rgb8)
        .map_err(|e| Error::Image(format!("failed to re-encode image as JPEG: {}", e)))?;

    log::debug!(
        "converted {} reference into a {}x{} JPEG payload ({} bytes)",
        name,
        out_width,
        out_height,
        bytes.len()
    );

    Ok(Some(ImagePayload {
        bytes,
        width: out_width,
        height: out_height,
        name: name.to_string(),
    }))
}
