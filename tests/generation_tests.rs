use std::fs;
use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use oddsheet::{Config, GenerateError, SheetGenerator};

/// Draw a filled dark disk on a white background, the kind of
/// high-contrast shape the binarizer expects.
fn write_disk_image(path: &Path, size: u32, radius: u32) {
    let center = (size / 2) as i32;
    let img: GrayImage = ImageBuffer::from_fn(size, size, |x, y| {
        let dx = x as i32 - center;
        let dy = y as i32 - center;
        if dx * dx + dy * dy <= (radius * radius) as i32 {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    img.save(path).unwrap();
}

fn setup_inputs(dir: &Path, count: usize) {
    for i in 0..count {
        write_disk_image(&dir.join(format!("shape_{}.png", i)), 64, 8 + 3 * i as u32);
    }
}

fn run_generator(in_dir: &Path, out_dir: &Path, seed: u64) -> Result<oddsheet::RunSummary, GenerateError> {
    let config = Config::new(in_dir.to_path_buf(), out_dir.to_path_buf());
    let generator = SheetGenerator::new(config);
    let mut rng = StdRng::seed_from_u64(seed);
    generator.run(&mut rng)
}

#[test]
fn derived_geometry_matches_the_a4_constants() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let config = Config::new(in_dir.path().to_path_buf(), out_dir.path().to_path_buf());

    let generator = SheetGenerator::new(config);
    let geometry = generator.geometry();
    assert_eq!(geometry.grid_len, 396);
    assert_eq!((geometry.canvas_width, geometry.canvas_height), (2480, 3508));
}

#[test]
fn two_images_produce_a_single_a4_page() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    setup_inputs(in_dir.path(), 2);

    let summary = run_generator(in_dir.path(), out_dir.path(), 7).unwrap();
    assert_eq!(summary.pages_written, 1);
    assert_eq!(summary.pairs_skipped, 0);

    let page = image::open(out_dir.path().join("0.jpg")).unwrap();
    assert_eq!(page.width(), 2480);
    assert_eq!(page.height(), 3508);
    assert!(!out_dir.path().join("1.jpg").exists());
}

#[test]
fn four_images_produce_three_sequential_pages() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    setup_inputs(in_dir.path(), 4);

    // 4 images -> 6 pairs -> 3 pages
    let summary = run_generator(in_dir.path(), out_dir.path(), 19).unwrap();
    assert_eq!(summary.pages_written, 3);

    for n in 0..3 {
        assert!(out_dir.path().join(format!("{}.jpg", n)).exists());
    }
    assert!(!out_dir.path().join("3.jpg").exists());
}

#[test]
fn output_directory_is_created_when_absent() {
    let in_dir = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    setup_inputs(in_dir.path(), 2);

    let out_dir = parent.path().join("sheets");
    assert!(!out_dir.exists());

    let summary = run_generator(in_dir.path(), &out_dir, 3).unwrap();
    assert_eq!(summary.pages_written, 1);
    assert!(out_dir.join("0.jpg").exists());
}

#[test]
fn existing_pages_are_overwritten() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    setup_inputs(in_dir.path(), 2);

    fs::write(out_dir.path().join("0.jpg"), b"stale").unwrap();

    run_generator(in_dir.path(), out_dir.path(), 29).unwrap();
    let page = image::open(out_dir.path().join("0.jpg")).unwrap();
    assert_eq!((page.width(), page.height()), (2480, 3508));
}

#[test]
fn undecodable_pair_is_skipped_without_output() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();

    // extensions match, contents do not decode
    fs::write(in_dir.path().join("bad_a.png"), b"not an image").unwrap();
    fs::write(in_dir.path().join("bad_b.png"), b"also not an image").unwrap();

    let summary = run_generator(in_dir.path(), out_dir.path(), 13).unwrap();
    assert_eq!(summary.pages_written, 0);
    assert_eq!(summary.pairs_skipped, 1);
    assert!(!out_dir.path().join("0.jpg").exists());
}

#[test]
fn missing_input_directory_is_rejected() {
    let scratch = TempDir::new().unwrap();
    let gone = scratch.path().join("nope");
    let out_dir = TempDir::new().unwrap();

    let err = run_generator(&gone, out_dir.path(), 1).unwrap_err();
    assert!(matches!(err, GenerateError::InputDirNotFound { .. }));
}

#[test]
fn a_single_image_is_rejected() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    setup_inputs(in_dir.path(), 1);

    let err = run_generator(in_dir.path(), out_dir.path(), 1).unwrap_err();
    match err {
        GenerateError::NotEnoughImages { found, required, .. } => {
            assert_eq!(found, 1);
            assert_eq!(required, 2);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn non_image_files_are_ignored_during_discovery() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    setup_inputs(in_dir.path(), 2);
    fs::write(in_dir.path().join("README.md"), b"ignore me").unwrap();
    fs::write(in_dir.path().join("data.csv"), b"1,2,3").unwrap();

    // still exactly one pair -> one page
    let summary = run_generator(in_dir.path(), out_dir.path(), 5).unwrap();
    assert_eq!(summary.pages_written, 1);
}
