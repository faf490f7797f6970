//! Image decoding with content-based format detection and a dimension limit.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::{Path, PathBuf};

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder with configurable limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// A fully decoded image, owned by the pipeline pass that decoded it.
pub struct DecodedImage {
    /// Source file
    pub path: PathBuf,
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Original file size in bytes
    pub file_size: u64,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read and decode an image file.
    pub fn decode(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PipelineError::FileNotFound(path.to_path_buf())
            } else {
                PipelineError::Decode {
                    path: path.to_path_buf(),
                    message: format!("Cannot read file: {}", e),
                }
            }
        })?;
        self.decode_from_bytes(bytes, path)
    }

    /// Decode an image from an in-memory byte buffer.
    pub fn decode_from_bytes(
        &self,
        bytes: Vec<u8>,
        path: &Path,
    ) -> Result<DecodedImage, PipelineError> {
        let decoded = Self::decode_bytes(bytes, path)?;

        if decoded.width > self.limits.max_image_dimension
            || decoded.height > self.limits.max_image_dimension
        {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width: decoded.width,
                height: decoded.height,
                max_dim: self.limits.max_image_dimension,
            });
        }
        Ok(decoded)
    }

    fn decode_bytes(bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, PipelineError> {
        use std::io::Cursor;

        let file_size = bytes.len() as u64;
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader.format().ok_or_else(|| PipelineError::InvalidInput {
            path: path.to_path_buf(),
        })?;
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            path: path.to_path_buf(),
            image,
            format,
            width,
            height,
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn decoder() -> ImageDecoder {
        ImageDecoder::new(LimitsConfig::default())
    }

    #[test]
    fn test_format_detected_by_content() {
        // PNG bytes behind a .jpg extension are still decoded as PNG
        let dir = tempfile::tempdir().unwrap();
        let misnamed = dir.path().join("misnamed.jpg");
        RgbImage::new(6, 3)
            .save_with_format(&misnamed, ImageFormat::Png)
            .unwrap();

        let decoded = decoder().decode(&misnamed).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (6, 3));
        assert_eq!(decoded.path, misnamed);
        assert!(decoded.file_size > 0);
    }

    #[test]
    fn test_truncated_jpeg_is_decode_error() {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(64, 64, image::Rgb([200, 10, 10]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        // Keep the signature, cut inside the header segments
        bytes.truncate(40);

        let err = decoder()
            .decode_from_bytes(bytes, Path::new("cut.jpg"))
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_dimension_limit() {
        let decoder = ImageDecoder::new(LimitsConfig {
            max_image_dimension: 16,
            ..LimitsConfig::default()
        });
        let mut bytes = Vec::new();
        RgbImage::new(32, 8)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let err = decoder
            .decode_from_bytes(bytes, Path::new("wide.png"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PipelineError::ImageTooLarge {
                width: 32,
                height: 8,
                max_dim: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = decoder()
            .decode(&dir.path().join("gone.png"))
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }
}
