//! Strip partitioning, cropping, and resizing.
//!
//! An image of width `W` cut into `N` parts yields strip `i` spanning
//! `[floor(W/N * i), floor(W/N * (i + 1)))` at full height, with the last
//! strip always ending at `W`. Each strip is then stretched to the target
//! size without preserving its aspect ratio.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::config::{ExportConfig, ResizeFilter};
use crate::error::PipelineError;

use super::decode::{DecodedImage, ImageDecoder};
use super::validate::Validator;

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Bicubic => FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Compute the horizontal pixel ranges of `parts` equal-width strips.
///
/// Returns an empty list when `parts` is zero.
pub fn strip_bounds(width: u32, parts: u32) -> Vec<Range<u32>> {
    let step = f64::from(width) / f64::from(parts);
    (0..parts)
        .map(|i| {
            let start = (step * f64::from(i)).floor() as u32;
            let end = if i + 1 == parts {
                width
            } else {
                ((step * f64::from(i + 1)).floor() as u32).min(width)
            };
            start.min(end)..end
        })
        .collect()
}

/// One resized slice of a source image.
#[derive(Debug, Clone)]
pub struct Strip {
    /// Position of the source image in the input sequence
    pub source_index: usize,
    /// Source image path
    pub source_path: PathBuf,
    /// Position of the strip within its source image
    pub index: u32,
    /// Horizontal pixel range of the source this strip was cut from
    pub bounds: Range<u32>,
    /// Resized strip pixels
    pub image: DynamicImage,
}

/// Cuts decoded images into resized strips.
#[derive(Debug, Clone)]
pub struct StripCutter {
    part_count: u32,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
}

impl StripCutter {
    /// Create a cutter from the export settings.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            part_count: config.part_count,
            target_width: config.target_width,
            target_height: config.target_height,
            filter: config.filter.into(),
        }
    }

    /// Number of strips produced per image.
    pub fn part_count(&self) -> u32 {
        self.part_count
    }

    /// Strip ranges for an image of the given width.
    pub fn bounds(&self, width: u32) -> Vec<Range<u32>> {
        strip_bounds(width, self.part_count)
    }

    /// Crop `bounds` at full height and resize it to the target size.
    pub fn cut(&self, image: &DynamicImage, bounds: &Range<u32>) -> DynamicImage {
        let region = image.crop_imm(bounds.start, 0, bounds.len() as u32, image.height());
        if region.dimensions() == (self.target_width, self.target_height) {
            return region;
        }
        region.resize_exact(self.target_width, self.target_height, self.filter)
    }

    /// Lazily produce the strips of every path, in image order then strip order.
    ///
    /// Each path is validated and decoded only when its first strip is
    /// requested, and its pixels are dropped once its last strip is out. A
    /// failing path yields one `Err` item; iteration then moves on to the
    /// next path.
    pub fn strips<'a, P: AsRef<Path>>(
        &'a self,
        paths: &'a [P],
        validator: &'a Validator,
        decoder: &'a ImageDecoder,
    ) -> Strips<'a, P> {
        Strips {
            cutter: self,
            validator,
            decoder,
            paths: paths.iter().enumerate(),
            current: None,
        }
    }
}

/// Decoded image whose strips are being emitted.
struct CurrentImage {
    source_index: usize,
    decoded: DecodedImage,
    bounds: std::iter::Enumerate<std::vec::IntoIter<Range<u32>>>,
}

/// Lazy strip sequence over a list of image paths.
pub struct Strips<'a, P> {
    cutter: &'a StripCutter,
    validator: &'a Validator,
    decoder: &'a ImageDecoder,
    paths: std::iter::Enumerate<std::slice::Iter<'a, P>>,
    current: Option<CurrentImage>,
}

impl<P: AsRef<Path>> Strips<'_, P> {
    fn load(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let start = std::time::Instant::now();
        self.validator.validate(path)?;
        let decoded = self.decoder.decode(path)?;
        tracing::trace!("  Decode {:?}: {:?}", path, start.elapsed());
        Ok(decoded)
    }
}

impl<P: AsRef<Path>> Iterator for Strips<'_, P> {
    type Item = Result<Strip, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some((index, bounds)) = current.bounds.next() {
                    let start = std::time::Instant::now();
                    let image = self.cutter.cut(&current.decoded.image, &bounds);
                    tracing::trace!("  Strip {} {:?}: {:?}", index, bounds, start.elapsed());
                    return Some(Ok(Strip {
                        source_index: current.source_index,
                        source_path: current.decoded.path.clone(),
                        index: index as u32,
                        bounds,
                        image,
                    }));
                }
                self.current = None;
            }

            let (source_index, path) = self.paths.next()?;
            let path = path.as_ref();
            match self.load(path) {
                Ok(decoded) => {
                    tracing::debug!(
                        "Cutting {:?} ({:?}, {}x{}, {} bytes) into {} strip(s)",
                        path,
                        decoded.format,
                        decoded.width,
                        decoded.height,
                        decoded.file_size,
                        self.cutter.part_count
                    );
                    let bounds = self.cutter.bounds(decoded.width);
                    self.current = Some(CurrentImage {
                        source_index,
                        decoded,
                        bounds: bounds.into_iter().enumerate(),
                    });
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
