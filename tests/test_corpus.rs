mod common;

use common::*;
use textdect::features::augment;
use textdect::features::samples::{SheetOptions, render_sample_sheet};

fn populated_dir() -> anyhow::Result<tempfile::TempDir> {
    let dir = tempfile::TempDir::new()?;
    write_image(dir.path(), "a.png", &gradient_image(12, 12));
    write_image(dir.path(), "b.PNG", &gradient_image(16, 12));
    // too small for a 4x4 window: skipped, not an error
    write_image(dir.path(), "c.png", &gradient_image(2, 2));
    std::fs::write(dir.path().join("notes.txt"), "not an image")?;
    std::fs::create_dir(dir.path().join("nested.png"))?;
    Ok(dir)
}

#[test]
fn test_extract_directory() -> anyhow::Result<()> {
    let dir = populated_dir()?;
    let extractor = CorpusExtractor::new(Tiler::new(4, 4))
        .with_stride(4)
        .with_padding(false);

    let files = extractor.image_files(dir.path())?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.png", "b.PNG", "c.png"]);

    let corpus = extractor.extract(dir.path())?;
    assert_eq!(corpus.feature_len(), 16);
    // a.png: 3 x 3, b.PNG: 3 x 4, c.png: none
    assert_eq!(corpus.len(), 9 + 12);

    let first = Tiler::new(4, 4).tile(&gradient_image(12, 12), 4, false)?;
    assert_eq!(&corpus.vectors()[..9], first.features.as_slice());

    Ok(())
}

#[test]
fn test_augmentation_order() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let img = gradient_image(20, 20);
    write_image(dir.path(), "only.png", &img);

    let tiler = Tiler::new(8, 8);
    let corpus = CorpusExtractor::new(tiler)
        .with_stride(4)
        .with_padding(false)
        .with_augmentation(true)
        .extract(dir.path())?;

    let original = tiler.tile(&img, 4, false)?;
    let clockwise = tiler.tile(&augment::rotate(&img, -25.0), 4, false)?;
    let counter = tiler.tile(&augment::rotate(&img, 25.0), 4, false)?;

    let mut expected = original.features;
    expected.extend(clockwise.features);
    expected.extend(counter.features);
    assert_eq!(corpus.vectors(), expected.as_slice());
    assert_eq!(corpus.len(), 3 * 16);

    Ok(())
}

#[test]
fn test_extension_filter() -> anyhow::Result<()> {
    let dir = populated_dir()?;
    let extractor = CorpusExtractor::new(Tiler::new(4, 4))
        .with_stride(4)
        .with_padding(false)
        .with_extensions([".PNG"]);

    // matching is case-insensitive on both sides
    assert_eq!(extractor.image_files(dir.path())?.len(), 3);

    let extractor = extractor.with_extensions([".jpg"]);
    assert!(extractor.extract(dir.path())?.is_empty());

    Ok(())
}

#[test]
fn test_corrupt_file_aborts_extraction() -> anyhow::Result<()> {
    let dir = populated_dir()?;
    std::fs::write(dir.path().join("broken.png"), b"definitely not a png")?;

    let result = CorpusExtractor::new(Tiler::new(4, 4)).extract(dir.path());
    match result {
        Err(TextDetectError::ImageDecode { path, .. }) => {
            assert!(path.ends_with("broken.png"));
        }
        other => panic!("expected decode error, got {:?}", other.map(|c| c.len())),
    }

    Ok(())
}

#[test]
fn test_missing_directory() {
    let result = CorpusExtractor::new(Tiler::new(4, 4)).extract("/nonexistent/textdect/dir");
    assert!(matches!(result, Err(TextDetectError::Io { .. })));
}

#[test]
fn test_sample_sheet_from_corpus() -> anyhow::Result<()> {
    let dir = populated_dir()?;
    let corpus = CorpusExtractor::new(Tiler::new(4, 4))
        .with_stride(4)
        .with_padding(false)
        .extract(dir.path())?;

    // 21 samples -> 5 columns, 5 rows of 4x4 cells
    let sheet = render_sample_sheet(&corpus, 4, 4, SheetOptions::default())?.unwrap();
    assert_eq!(sheet.dimensions(), (20, 20));
    assert_eq!(sheet.get_pixel(0, 0)[0], corpus.vectors()[0][0]);

    let shuffled = render_sample_sheet(
        &corpus,
        4,
        4,
        SheetOptions {
            transpose: false,
            shuffle_seed: Some(7),
        },
    )?
    .unwrap();
    assert_eq!(shuffled.dimensions(), (20, 20));

    assert!(matches!(
        render_sample_sheet(&corpus, 3, 4, SheetOptions::default()),
        Err(TextDetectError::FeatureShape { .. })
    ));

    Ok(())
}
