use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use guess_core::reveal::BoxSize;
use image::DynamicImage;
use services::mosaic_png;

/// Box the mosaic is rendered into.
pub const MOSAIC_BOX: BoxSize = BoxSize::new(480, 360);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MosaicVm {
    Loading,
    /// PNG data URI of the current frame.
    Ready(String),
    Unavailable,
}

impl MosaicVm {
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            MosaicVm::Loading => Some("Loading image..."),
            MosaicVm::Ready(_) => None,
            MosaicVm::Unavailable => Some("Image unavailable"),
        }
    }
}

#[must_use]
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Mosaic of `source` at `progress`, ready for an `img` source.
///
/// Returns `None` if the frame cannot be encoded.
#[must_use]
pub fn mosaic_data_uri(source: &DynamicImage, progress: f64) -> Option<String> {
    mosaic_png(source, progress, MOSAIC_BOX)
        .ok()
        .map(|png| png_data_uri(&png))
}
