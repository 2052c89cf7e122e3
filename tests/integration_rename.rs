use assert_fs::prelude::*;
use assert_fs::TempDir;
use barcode_renamer::core::decoder::{BarcodeDecoder, DecodedBarcode, RxingDecoder};
use barcode_renamer::core::renamer::{RenameOutcome, RenameReport, Renamer};
use barcode_renamer::error::DecodeError;
use predicates::prelude::*;
use rxing::{BarcodeFormat, MultiFormatWriter, Writer};
use std::fs;
use std::path::Path;

/// Treats each line of the file as one decoded payload
struct LinesDecoder;

impl BarcodeDecoder for LinesDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<DecodedBarcode>, DecodeError> {
        let text = fs::read_to_string(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(text.lines().map(DecodedBarcode::new).collect())
    }
}

fn run(root: &Path) -> RenameReport {
    run_in_order(root, true)
}

fn run_in_order(root: &Path, sorted: bool) -> RenameReport {
    Renamer::builder()
        .root(root)
        .decoder(Box::new(LinesDecoder))
        .sort_entries(sorted)
        .build()
        .run()
        .unwrap()
}

fn file_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn single_specimen_barcode_becomes_the_name() {
    let temp = TempDir::new().unwrap();
    temp.child("IMG_0001.jpg").write_str("NBGW42").unwrap();

    run(temp.path());

    temp.child("IMG_0001.jpg").assert(predicate::path::missing());
    temp.child("NBGW42.jpg").assert("NBGW42");
}

#[test]
fn multi_specimen_sheet_joins_ids_in_numeric_order() {
    let temp = TempDir::new().unwrap();
    temp.child("sheet.tif").write_str("NBGW100\nNBGW7").unwrap();

    run(temp.path());

    temp.child("NBGW7-NBGW100.tif").assert(predicate::path::exists());
}

#[test]
fn non_specimen_barcode_is_used_when_nothing_else_exists() {
    let temp = TempDir::new().unwrap();
    temp.child("IMG_0002.CR2").write_str("XYZ123").unwrap();

    run(temp.path());

    temp.child("XYZ123.CR2").assert(predicate::path::exists());
}

#[test]
fn duplicate_barcodes_get_letter_suffixes() {
    let temp = TempDir::new().unwrap();
    temp.child("a.jpg").write_str("NBGW5").unwrap();
    temp.child("b.jpg").write_str("NBGW5").unwrap();

    run(temp.path());

    temp.child("NBGW5.jpg").assert(predicate::path::exists());
    temp.child("NBGW5_B.jpg").assert(predicate::path::exists());
}

#[test]
fn suffixes_are_shared_across_subfolders() {
    let temp = TempDir::new().unwrap();
    temp.child("box1/a.jpg").write_str("NBGW5").unwrap();
    temp.child("box2/a.jpg").write_str("NBGW5").unwrap();

    run(temp.path());

    temp.child("box1/NBGW5.jpg").assert(predicate::path::exists());
    temp.child("box2/NBGW5_B.jpg").assert(predicate::path::exists());
}

#[test]
fn twenty_seven_copies_run_past_z() {
    let temp = TempDir::new().unwrap();
    for i in 0..27 {
        temp.child(format!("img_{i:02}.jpg")).write_str("NBGW5").unwrap();
    }

    let report = run(temp.path());

    assert_eq!(report.renamed_count(), 27);
    temp.child("NBGW5_Z.jpg").assert(predicate::path::exists());
    temp.child("NBGW5_AA.jpg").assert(predicate::path::exists());
}

#[test]
fn already_prefixed_files_are_untouched() {
    let temp = TempDir::new().unwrap();
    temp.child("NBGW5.jpg").write_str("NBGW999").unwrap();

    let report = run(temp.path());

    assert_eq!(report.records[0].outcome, RenameOutcome::SkippedReservedPrefix);
    temp.child("NBGW5.jpg").assert("NBGW999");
    temp.child("NBGW999.jpg").assert(predicate::path::missing());
}

#[test]
fn images_without_barcodes_are_skipped() {
    let temp = TempDir::new().unwrap();
    temp.child("blank.jpg").touch().unwrap();

    let report = run(temp.path());

    assert_eq!(report.records[0].outcome, RenameOutcome::SkippedNoBarcode);
    temp.child("blank.jpg").assert(predicate::path::exists());
}

#[test]
fn second_run_renames_nothing() {
    let temp = TempDir::new().unwrap();
    temp.child("a.jpg").write_str("NBGW5").unwrap();
    temp.child("b.jpg").write_str("NBGW5").unwrap();
    temp.child("c.jpg").write_str("NBGW100\nNBGW7").unwrap();
    temp.child("d.jpg").touch().unwrap();

    let first = run(temp.path());
    assert_eq!(first.renamed_count(), 3);

    let second = run(temp.path());
    assert_eq!(second.renamed_count(), 0);
    assert_eq!(second.failed_count(), 0);
}

#[test]
fn second_run_keeps_suffixed_fallback_names_in_listing_order() {
    let temp = TempDir::new().unwrap();
    for i in 0..12 {
        temp.child(format!("img_{i:02}.jpg")).write_str("XYZ123").unwrap();
    }

    let first = run_in_order(temp.path(), false);
    assert_eq!(first.renamed_count(), 12);
    assert_eq!(first.failed_count(), 0);
    let after_first = file_names(temp.path());

    let second = run_in_order(temp.path(), false);
    assert_eq!(second.renamed_count(), 0);
    assert_eq!(second.failed_count(), 0);
    assert!(second
        .records
        .iter()
        .all(|r| r.outcome == RenameOutcome::AlreadyNamed));
    assert_eq!(file_names(temp.path()), after_first);
}

#[test]
fn new_photo_of_a_kept_specimen_gets_next_free_suffix() {
    let temp = TempDir::new().unwrap();
    temp.child("NBGW5.jpg").write_str("NBGW5").unwrap();
    temp.child("IMG_0100.jpg").write_str("NBGW5").unwrap();

    let report = run(temp.path());

    assert_eq!(report.failed_count(), 0);
    temp.child("NBGW5.jpg").assert(predicate::path::exists());
    temp.child("NBGW5_B.jpg").assert("NBGW5");
    temp.child("IMG_0100.jpg").assert(predicate::path::missing());

    let rerun = run(temp.path());
    assert_eq!(rerun.renamed_count(), 0);
    assert_eq!(rerun.failed_count(), 0);
}

#[test]
fn other_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    temp.child("notes.txt").write_str("NBGW1").unwrap();
    temp.child("scan.png").write_str("NBGW2").unwrap();

    let report = run(temp.path());

    assert!(report.records.is_empty());
    temp.child("notes.txt").assert(predicate::path::exists());
    temp.child("scan.png").assert(predicate::path::exists());
}

#[test]
fn payload_with_slashes_stays_in_its_folder() {
    let temp = TempDir::new().unwrap();
    temp.child("box1/a.jpg").write_str("../escape").unwrap();

    run(temp.path());

    temp.child("box1/.._escape.jpg").assert(predicate::path::exists());
    temp.child("escape.jpg").assert(predicate::path::missing());
}

#[test]
fn dry_run_reports_without_renaming() {
    let temp = TempDir::new().unwrap();
    temp.child("a.jpg").write_str("NBGW5").unwrap();
    temp.child("b.jpg").write_str("NBGW5").unwrap();

    let report = Renamer::builder()
        .root(temp.path())
        .decoder(Box::new(LinesDecoder))
        .sort_entries(true)
        .dry_run(true)
        .build()
        .run()
        .unwrap();

    let targets: Vec<String> = report
        .renames()
        .map(|(_, target)| target.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(targets, vec!["NBGW5.jpg", "NBGW5_B.jpg"]);
    temp.child("a.jpg").assert(predicate::path::exists());
    temp.child("NBGW5.jpg").assert(predicate::path::missing());
}

#[test]
fn report_serializes_to_json() {
    let temp = TempDir::new().unwrap();
    temp.child("a.jpg").write_str("NBGW5").unwrap();

    let report = run(temp.path());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["records"][0]["status"], "renamed");
    assert_eq!(json["dry_run"], false);
}

#[test]
fn real_decoder_skips_a_blank_photo() {
    let temp = TempDir::new().unwrap();
    let path = temp.child("blank.jpg");
    image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
        64,
        64,
        image::Luma([255u8]),
    ))
    .save_with_format(path.path(), image::ImageFormat::Jpeg)
    .unwrap();

    let report = Renamer::builder()
        .root(temp.path())
        .decoder(Box::new(RxingDecoder::new()))
        .build()
        .run()
        .unwrap();

    assert_eq!(report.records[0].outcome, RenameOutcome::SkippedNoBarcode);
    path.assert(predicate::path::exists());
}

/// Paint Code 128 symbols one above the other and save the sheet as JPEG
fn save_barcode_sheet(path: &Path, texts: &[&str]) {
    let mut canvas =
        image::GrayImage::from_pixel(680, 280 * texts.len() as u32, image::Luma([255u8]));
    for (i, text) in texts.iter().enumerate() {
        let matrix = MultiFormatWriter::default()
            .encode(text, &BarcodeFormat::CODE_128, 300, 80)
            .unwrap();
        let top = 40 + 280 * i as u32;
        for y in 0..matrix.getHeight() {
            for x in 0..matrix.getWidth() {
                if matrix.get(x, y) {
                    for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                        canvas.put_pixel(20 + 2 * x + dx, top + 2 * y + dy, image::Luma([0u8]));
                    }
                }
            }
        }
    }
    image::DynamicImage::ImageLuma8(canvas)
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

#[test]
fn real_decoder_names_a_two_label_sheet() {
    let temp = TempDir::new().unwrap();
    save_barcode_sheet(temp.child("IMG_0001.jpg").path(), &["NBGW100", "NBGW7"]);

    let report = Renamer::builder()
        .root(temp.path())
        .decoder(Box::new(RxingDecoder::new()))
        .build()
        .run()
        .unwrap();

    assert_eq!(
        report.records[0].outcome,
        RenameOutcome::Renamed {
            target: temp.path().join("NBGW7-NBGW100.jpg")
        }
    );
    temp.child("NBGW7-NBGW100.jpg").assert(predicate::path::exists());
}
