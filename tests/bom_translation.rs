//! BOM translation through files on disk.
//!
//! Each test writes its input to a fresh temporary directory under the
//! crate's `.tmp` directory.

use std::fs;
use std::path::PathBuf;

use eda_artifact_gen::bom::{self, BomLine};
use eda_artifact_gen::error::TableError;
use tempfile::TempDir;

const EXPORT: &str = "\
\"Source:\",\"/home/user/sensor.sch\"
\"Date:\",\"Mon 02 Jan 2017\"
\"Tool:\",\"Eeschema 4.0.5\"
\"Component Count:\",\"12\"

\"Collated Components:\"
\"Item\",\"Qty\",\"Reference(s)\",\"Value\",\"LibPart\",\"Footprint\",\"Digikey\"
\"1\",\"6\",\"C1, C2, C3, C4, C5, C6\",\"100n\",\"C\",\"C_0402\",\"1276-1000-1-ND\"
\"2\",\"3\",\"R1, R2, R3\",\"4k7\",\"R\",\"R_0402\",\"311-4.7KLRCT-ND\"
\"3\",\"1\",\"J1\",\"USB\",\"CONN\",\"USB_Micro\",\"NoPart\"
\"4\",\"1\",\"MH1\",\"Hole\",\"MH\",\"MountingHole\",\"\"
\"5\",\"1\",\"U1\",\"MCU\",\"MCU\",\"QFN-28\",\"MAX32660GTG+-ND\"
";

/// Creates a temporary directory inside the project's `.tmp` folder.
fn test_temp_dir() -> TempDir {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".tmp");
    fs::create_dir_all(&base).expect("Failed to create .tmp directory");
    tempfile::tempdir_in(&base).expect("Failed to create temp directory")
}

fn translate(input: &str, multiplier: u64) -> String {
    let dir = test_temp_dir();
    let input_path = dir.path().join("bom.csv");
    let output_path = dir.path().join("order.csv");
    fs::write(&input_path, input).unwrap();
    bom::translate_file(&input_path, &output_path, multiplier).unwrap();
    fs::read_to_string(&output_path).unwrap()
}

#[test]
fn translates_collated_export() {
    assert_eq!(
        translate(EXPORT, 1),
        "Digikey,Quantity\n\
         \"1276-1000-1-ND\",6\n\
         \"311-4.7KLRCT-ND\",3\n\
         \"MAX32660GTG+-ND\",1\n"
    );
}

#[test]
fn quantities_scale_with_multiplier() {
    let once = bom::read_bom(translate(EXPORT, 1).as_bytes()).unwrap();
    let tenfold = bom::read_bom(translate(EXPORT, 10).as_bytes()).unwrap();
    assert_eq!(once.len(), tenfold.len());
    for (a, b) in once.iter().zip(&tenfold) {
        assert_eq!(a.part, b.part);
        assert_eq!(a.quantity * 10, b.quantity);
    }
}

#[test]
fn translation_is_idempotent_with_multiplier_one() {
    let first = translate(EXPORT, 1);
    let second = translate(&first, 1);
    assert_eq!(first, second);
}

#[test]
fn translated_list_skips_unordered_parts() {
    let lines = bom::read_bom(translate(EXPORT, 2).as_bytes()).unwrap();
    assert!(lines.iter().all(|line| line.part != bom::NO_PART));
    assert!(!lines.contains(&BomLine {
        part: String::new(),
        quantity: 2,
    }));
    assert_eq!(lines.len(), 3);
}

#[test]
fn rejected_input_leaves_no_output() {
    let dir = test_temp_dir();
    let input_path = dir.path().join("notes.csv");
    let output_path = dir.path().join("order.csv");
    fs::write(&input_path, "just,some\ncsv,data\n").unwrap();

    let err = bom::translate_file(&input_path, &output_path, 1).unwrap_err();
    assert!(matches!(err, TableError::MissingHeader { .. }));
    assert!(!output_path.exists());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = test_temp_dir();
    let err = bom::translate_file(
        &dir.path().join("absent.csv"),
        &dir.path().join("order.csv"),
        1,
    )
    .unwrap_err();
    assert!(matches!(err, TableError::Io { .. }));
}
