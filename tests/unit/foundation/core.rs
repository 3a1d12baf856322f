use super::*;

#[test]
fn rgb8_parses_with_and_without_hash() {
    assert_eq!("#ffffff".parse::<Rgb8>().unwrap(), Rgb8::WHITE);
    assert_eq!("00ff7f".parse::<Rgb8>().unwrap(), Rgb8::new(0, 255, 127));
    assert_eq!(" #1A2b3C ".parse::<Rgb8>().unwrap(), Rgb8::new(0x1a, 0x2b, 0x3c));
}

#[test]
fn rgb8_rejects_malformed_input() {
    for bad in ["", "#fff", "#gg0000", "#12345678", "#ééé"] {
        let err = bad.parse::<Rgb8>().unwrap_err();
        assert!(matches!(err, ScanwipeError::Validation(_)), "{bad}");
    }
}

#[test]
fn rgb8_display_roundtrips_through_serde() {
    let c = Rgb8::new(255, 0, 16);
    assert_eq!(c.to_string(), "#ff0010");
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#ff0010\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn canvas_parity() {
    let c = Canvas {
        width: 4,
        height: 3,
    };
    assert!(!c.is_even());
    assert!(
        Canvas {
            width: 100,
            height: 100
        }
        .is_even()
    );
}
