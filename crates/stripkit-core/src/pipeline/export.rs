//! Export orchestration: validate, decode, cut, resize, encode, write.
//!
//! Everything runs sequentially on the calling thread. Strips are written in
//! image order then strip order, and each file name is generated right
//! before its write.

use image::codecs::jpeg::JpegEncoder;
use std::path::{Path, PathBuf};

use crate::config::{Config, ExportConfig, FailurePolicy};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{ExportReport, FailedImage, WrittenStrip};

use super::decode::ImageDecoder;
use super::naming::{Clock, OutputNamer, SystemClock};
use super::strip::{Strip, StripCutter};
use super::validate::Validator;

/// Cuts a list of images into strips and writes them to a dated directory.
pub struct Exporter {
    config: ExportConfig,
    output_root: PathBuf,
    validator: Validator,
    decoder: ImageDecoder,
    cutter: StripCutter,
    namer: OutputNamer,
    clock: Box<dyn Clock>,
}

impl Exporter {
    /// Create an exporter using the system clock.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.export.clone(),
            output_root: config.output_root(),
            validator: Validator::new(config.processing.clone(), config.limits.clone()),
            decoder: ImageDecoder::new(config.limits.clone()),
            cutter: StripCutter::new(&config.export),
            namer: OutputNamer::new(&config.export),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for directory and file names.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Validator configured like the one the pipeline uses.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Number of strips written per image.
    pub fn part_count(&self) -> u32 {
        self.cutter.part_count()
    }

    /// Export every image and return the report.
    pub fn export<P: AsRef<Path>>(&self, paths: &[P]) -> PipelineResult<ExportReport> {
        self.export_with(paths, |_| {})
    }

    /// Export every image, calling `on_written` after each strip lands on disk.
    ///
    /// Configuration problems are reported before the output directory is
    /// created. A failing image either aborts the batch or is recorded and
    /// skipped, depending on `export.on_error`; write failures always abort.
    /// Files already written stay on disk when the batch aborts.
    pub fn export_with<P, F>(&self, paths: &[P], mut on_written: F) -> PipelineResult<ExportReport>
    where
        P: AsRef<Path>,
        F: FnMut(&WrittenStrip),
    {
        self.config.validate()?;

        let start = std::time::Instant::now();
        let output_dir = self.prepare_output_dir()?;
        tracing::debug!(
            "Exporting {} image(s) into {:?} ({} part(s), {}x{})",
            paths.len(),
            output_dir,
            self.config.part_count,
            self.config.target_width,
            self.config.target_height
        );

        let mut report = ExportReport {
            output_dir,
            ..ExportReport::default()
        };
        let mut last_source = None;

        for item in self.cutter.strips(paths, &self.validator, &self.decoder) {
            let strip = match item {
                Ok(strip) => strip,
                Err(e) if self.config.on_error == FailurePolicy::Skip && e.is_per_image() => {
                    tracing::warn!("Skipping image: {}", e);
                    report.failures.push(FailedImage::from_error(&e));
                    continue;
                }
                Err(e) => {
                    tracing::error!("Export aborted: {}", e);
                    return Err(e);
                }
            };

            let sequence = report.strips.len() as u64;
            let written = self.write_strip(&report.output_dir, &strip, sequence)?;
            on_written(&written);

            if last_source != Some(strip.source_index) {
                last_source = Some(strip.source_index);
                report.images_exported += 1;
            }
            report.strips.push(written);
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Wrote {} strip(s) from {} image(s) to {:?}",
            report.strips.len(),
            report.images_exported,
            report.output_dir
        );
        Ok(report)
    }

    /// Create the dated output directory, reusing it if it already exists.
    fn prepare_output_dir(&self) -> PipelineResult<PathBuf> {
        let started = self.clock.now();
        let dir = self.output_root.join(self.namer.dir_name(&started));

        std::fs::create_dir_all(&dir).map_err(|e| PipelineError::Write {
            path: dir.clone(),
            message: format!("Cannot create output directory: {}", e),
        })?;
        std::path::absolute(&dir).map_err(|e| PipelineError::Write {
            path: dir.clone(),
            message: format!("Cannot resolve output directory: {}", e),
        })
    }

    fn write_strip(&self, dir: &Path, strip: &Strip, sequence: u64) -> PipelineResult<WrittenStrip> {
        let bytes = self.encode(strip)?;
        let name = self
            .namer
            .file_name(&self.clock.now(), sequence, &bytes);
        let path = dir.join(name);

        std::fs::write(&path, &bytes).map_err(|e| PipelineError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::trace!("  Wrote {:?} ({} bytes)", path, bytes.len());

        Ok(WrittenStrip {
            path,
            source_path: strip.source_path.clone(),
            source_index: strip.source_index,
            strip_index: strip.index,
            x_start: strip.bounds.start,
            x_end: strip.bounds.end,
            width: strip.image.width(),
            height: strip.image.height(),
            file_size: bytes.len() as u64,
        })
    }

    /// Encode a strip as baseline JPEG, whatever the source format was.
    fn encode(&self, strip: &Strip) -> PipelineResult<Vec<u8>> {
        let rgb = strip.image.to_rgb8();
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.config.jpeg_quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| PipelineError::Write {
                path: strip.source_path.clone(),
                message: format!("Cannot encode strip {}: {}", strip.index, e),
            })?;
        Ok(buffer)
    }
}
