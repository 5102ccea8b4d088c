//! End-to-end symbol generation from pin-out tables.

use eda_artifact_gen::error::TableError;
use eda_artifact_gen::symbol::{self, Designators, PinKind, SymbolSpec};

/// Pin-out of a small 8-pin part in two packages.
const PINOUT: &str = "\
Example Family Pinout,,,,
,,,,
Pin Function,Type,Bank,QN8,CS9
,,,,
VCC,VCC,,1,A1
GND,GND,,2,A2
IOB_0,PIO,0,3,A3
IOB_1,PIO,0,04,B1
RGB0,LED,1,5,B2
RGB1,LED,1,6,B3
CDONE,CONFIG,1,7,C1
CRESET B,CONFIG,1,8,C2
SPI_SS,PIO,1,-,C3
NC,NC,,Paddle,-
";

fn qn8_spec() -> SymbolSpec {
    SymbolSpec {
        name: "EXAMPLE-QN8".to_string(),
        package: "QN8".to_string(),
        units: 2,
        designators: Designators::Numeric { count: 8 },
        paddle: true,
    }
}

fn render(spec: &SymbolSpec) -> String {
    let pinout = symbol::read_pinout(PINOUT.as_bytes(), &spec.package).unwrap();
    let built = symbol::generate(spec, &pinout).unwrap();
    let mut buf = Vec::new();
    symbol::write_symbol(&mut buf, &built).unwrap();
    String::from_utf8(buf).unwrap()
}

// =============================================================================
// Pin-out reading
// =============================================================================

#[test]
fn unbonded_functions_are_skipped() {
    let pinout = symbol::read_pinout(PINOUT.as_bytes(), "QN8").unwrap();
    assert_eq!(pinout.len(), 8);
    assert!(pinout.values().all(|entry| entry.name != "SPI_SS"));
    assert!(pinout.values().all(|entry| entry.name != "NC"));
}

#[test]
fn numeric_designators_are_normalised() {
    let pinout = symbol::read_pinout(PINOUT.as_bytes(), "QN8").unwrap();
    assert_eq!(pinout["4"].name, "IOB_1");
}

#[test]
fn pin_types_come_from_type_column() {
    let pinout = symbol::read_pinout(PINOUT.as_bytes(), "QN8").unwrap();
    assert_eq!(pinout["1"].kind, PinKind::PowerInput);
    assert_eq!(pinout["2"].kind, PinKind::Passive);
    assert_eq!(pinout["5"].kind, PinKind::PowerOutput);
    assert_eq!(pinout["7"].kind, PinKind::Bidirectional);
}

#[test]
fn unknown_package_has_no_header() {
    let err = symbol::read_pinout(PINOUT.as_bytes(), "TQ144").unwrap_err();
    assert!(matches!(err, TableError::MissingHeader { ref marker } if marker == "TQ144"));
}

// =============================================================================
// Symbol text
// =============================================================================

#[test]
fn numeric_symbol_text() {
    let text = render(&qn8_spec());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "EESchema-LIBRARY Version 2.3");
    assert_eq!(lines[5], "DEF EXAMPLE-QN8 U 0 40 Y Y 2 L N");
    assert!(text.contains("X VCC 1 -200 -150 200 R 50 50 1 1 W\n"));
    assert!(text.contains("X IOB_1 4 -200 -450 200 R 50 50 1 1 B\n"));
    assert!(text.contains("X RGB0 5 -200 -150 200 R 50 50 2 1 w\n"));
    assert!(text.contains("X CRESET_B 8 -200 -450 200 R 50 50 2 1 B\n"));
    assert!(text.contains("X GND 0 -200 -550 200 R 50 50 1 1 P\n"));
    assert!(text.ends_with("#End Library\n"));
}

#[test]
fn ball_symbol_uses_bank_letters() {
    let spec = SymbolSpec {
        name: "EXAMPLE-CS9".to_string(),
        package: "CS9".to_string(),
        units: 3,
        designators: Designators::Ball { per_bank: 3 },
        paddle: false,
    };
    let text = render(&spec);
    assert!(text.contains("X VCC A1 -200 -150 200 R 50 50 1 1 W\n"));
    assert!(text.contains("X SPI_SS C3 -200 -350 200 R 50 50 3 1 B\n"));
    assert!(!text.contains("X GND 0 "));
}

#[test]
fn missing_designator_is_reported() {
    let spec = SymbolSpec {
        name: "EXAMPLE-QN8".to_string(),
        package: "QN8".to_string(),
        units: 3,
        designators: Designators::Numeric { count: 9 },
        paddle: false,
    };
    let pinout = symbol::read_pinout(PINOUT.as_bytes(), "QN8").unwrap();
    let err = symbol::generate(&spec, &pinout).unwrap_err();
    assert!(matches!(
        err,
        TableError::MissingPin { ref designator, .. } if designator == "9"
    ));
}

#[test]
fn presets_validate() {
    for name in symbol::presets::names() {
        let spec = symbol::presets::by_name(name).unwrap();
        assert!(spec.validate().is_ok(), "{name}");
    }
}
