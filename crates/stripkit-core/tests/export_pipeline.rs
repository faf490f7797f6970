//! End-to-end export scenarios against real files on disk.

use chrono::{DateTime, Local, TimeZone};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

use stripkit_core::pipeline::{ImageDecoder, StripCutter};
use stripkit_core::{
    Config, Exporter, FailurePolicy, FixedClock, PipelineError, Validator,
};

const RED: Rgb<u8> = Rgb([220, 20, 20]);
const GREEN: Rgb<u8> = Rgb([20, 200, 20]);
const BLUE: Rgb<u8> = Rgb([20, 20, 220]);
const WHITE: Rgb<u8> = Rgb([250, 250, 250]);

fn at(hour: u32) -> FixedClock {
    let instant: DateTime<Local> = Local
        .with_ymd_and_hms(2024, 3, 9, hour, 0, 0)
        .single()
        .unwrap();
    FixedClock(instant)
}

fn config(root: &Path) -> Config {
    let mut config = Config::default();
    config.export.output_root = root.to_path_buf();
    config
}

/// 3256x860 image made of four vertical colour bands.
fn banded_source() -> RgbImage {
    RgbImage::from_fn(3256, 860, |x, _| match x {
        0..=813 => RED,
        814..=1627 => GREEN,
        1628..=2441 => BLUE,
        _ => WHITE,
    })
}

fn close_to(actual: &Rgb<u8>, expected: Rgb<u8>) -> bool {
    actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| (i16::from(*a) - i16::from(*e)).abs() <= 40)
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

fn truncated_jpeg(dir: &Path, name: &str) -> PathBuf {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(64, 64, RED)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes.truncate(40);
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn small_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(40, 20, BLUE)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

#[test]
fn reference_jpeg_splits_into_two_full_size_halves() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let source = input.path().join("panorama.jpg");
    banded_source()
        .save_with_format(&source, ImageFormat::Jpeg)
        .unwrap();

    let report = Exporter::new(&config(output.path()))
        .with_clock(at(10))
        .export(&[source])
        .unwrap();

    let files = files_in(&report.output_dir);
    assert_eq!(files.len(), 2);
    assert_eq!(report.strips.len(), 2);

    let left = image::open(&report.strips[0].path).unwrap();
    let right = image::open(&report.strips[1].path).unwrap();
    for strip in [&left, &right] {
        assert_eq!(strip.dimensions(), (3256, 860));
    }
    for path in &files {
        let header = std::fs::read(path).unwrap();
        assert_eq!(&header[..3], &[0xFF, 0xD8, 0xFF]);
    }

    // Each half is stretched 2x: its two bands now fill half the output each
    let left = left.to_rgb8();
    let right = right.to_rgb8();
    assert!(close_to(left.get_pixel(400, 430), RED));
    assert!(close_to(left.get_pixel(2800, 430), GREEN));
    assert!(close_to(right.get_pixel(400, 430), BLUE));
    assert!(close_to(right.get_pixel(2800, 430), WHITE));
}

#[test]
fn unscaled_strips_match_source_pixels_exactly() {
    let input = tempfile::tempdir().unwrap();
    let source = input.path().join("bands.png");
    let original = RgbImage::from_fn(3256, 860, |x, y| Rgb([(x % 251) as u8, (y % 253) as u8, 7]));
    original
        .save_with_format(&source, ImageFormat::Png)
        .unwrap();

    let mut cfg = Config::default();
    cfg.export.target_width = 1628;
    let cutter = StripCutter::new(&cfg.export);
    let validator = Validator::new(cfg.processing.clone(), cfg.limits.clone());
    let decoder = ImageDecoder::new(cfg.limits.clone());

    let paths = [source];
    let strips: Vec<_> = cutter
        .strips(&paths, &validator, &decoder)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(strips.len(), 2);

    let expected_left =
        DynamicImage::ImageRgb8(original.clone()).crop_imm(0, 0, 1628, 860).to_rgb8();
    let expected_right =
        DynamicImage::ImageRgb8(original).crop_imm(1628, 0, 1628, 860).to_rgb8();
    assert_eq!(strips[0].image.to_rgb8(), expected_left);
    assert_eq!(strips[1].image.to_rgb8(), expected_right);
}

#[test]
fn single_part_keeps_full_width() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let a = small_png(input.path(), "a.png");
    let b = small_png(input.path(), "b.png");

    let mut cfg = config(output.path());
    cfg.export.part_count = 1;
    cfg.export.target_width = 64;
    cfg.export.target_height = 16;
    let report = Exporter::new(&cfg).with_clock(at(10)).export(&[a, b]).unwrap();

    assert_eq!(report.strips.len(), 2);
    for strip in &report.strips {
        assert_eq!(strip.strip_index, 0);
        assert_eq!((strip.x_start, strip.x_end), (0, 40));
        assert_eq!((strip.width, strip.height), (64, 16));
    }
}

#[test]
fn empty_input_still_creates_directory() {
    let output = tempfile::tempdir().unwrap();

    let report = Exporter::new(&config(output.path()))
        .with_clock(at(10))
        .export::<PathBuf>(&[])
        .unwrap();

    assert!(report.output_dir.is_dir());
    assert!(report.output_dir.ends_with("saves-2024-03-09"));
    assert!(files_in(&report.output_dir).is_empty());
    assert_eq!(report.images_exported, 0);
}

#[test]
fn same_day_runs_share_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let source = small_png(input.path(), "a.png");
    let cfg = config(output.path());

    let morning = Exporter::new(&cfg)
        .with_clock(at(9))
        .export(&[source.clone()])
        .unwrap();
    let evening = Exporter::new(&cfg)
        .with_clock(at(18))
        .export(&[source])
        .unwrap();

    assert_eq!(morning.output_dir, evening.output_dir);
    assert_eq!(files_in(&morning.output_dir).len(), 4);
}

#[test]
fn corrupt_image_aborts_batch_by_default() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let good = small_png(input.path(), "good.png");
    let broken = truncated_jpeg(input.path(), "broken.jpg");
    let after = small_png(input.path(), "after.png");

    // Passes the content sniff
    let cfg = config(output.path());
    assert!(Validator::new(cfg.processing.clone(), cfg.limits.clone())
        .classify(&broken)
        .is_image());

    let err = Exporter::new(&cfg)
        .with_clock(at(10))
        .export(&[good, broken.clone(), after])
        .unwrap_err();

    match err {
        PipelineError::Decode { path, .. } => assert_eq!(path, broken),
        other => panic!("expected Decode error, got {other:?}"),
    }
    // Strips of the first image stay, nothing from the broken one or after it
    let dir = output.path().join("saves-2024-03-09");
    assert_eq!(files_in(&dir).len(), 2);
}

#[test]
fn corrupt_image_is_skipped_with_skip_policy() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let broken = truncated_jpeg(input.path(), "broken.jpg");
    let next = small_png(input.path(), "next.png");

    let mut cfg = config(output.path());
    cfg.export.on_error = FailurePolicy::Skip;
    let report = Exporter::new(&cfg)
        .with_clock(at(10))
        .export(&[broken.clone(), next.clone()])
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, broken);
    assert_eq!(report.images_exported, 1);
    assert!(report.strips.iter().all(|s| s.source_path == next));
    assert_eq!(files_in(&report.output_dir).len(), 2);
}

#[test]
fn renamed_text_file_is_invalid_input() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let fake = input.path().join("holiday.jpg");
    std::fs::write(&fake, "definitely not a jpeg").unwrap();

    let err = Exporter::new(&config(output.path()))
        .with_clock(at(10))
        .export(&[fake])
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput { .. }));
}
