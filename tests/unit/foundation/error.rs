use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScanwipeError::missing_input("x")
            .to_string()
            .contains("missing input:")
    );
    assert!(ScanwipeError::decode("x").to_string().contains("decode error:"));
    assert!(ScanwipeError::render("x").to_string().contains("render error:"));
    assert!(
        ScanwipeError::encoder_init("x")
            .to_string()
            .contains("encoder init error:")
    );
    assert!(ScanwipeError::encode("x").to_string().contains("encode error:"));
    assert!(ScanwipeError::read("x").to_string().contains("read error:"));
    assert!(
        ScanwipeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScanwipeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
