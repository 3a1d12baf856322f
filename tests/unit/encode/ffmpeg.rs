use super::*;

#[test]
fn missing_program_is_an_init_error() {
    let mut svc = FfmpegService::with_program("scanwipe-no-such-ffmpeg");
    let err = svc.init().unwrap_err();
    assert!(matches!(err, ScanwipeError::EncoderInit(_)));
    assert!(svc.workdir().is_none());
}

#[test]
fn uninitialized_service_rejects_namespace_access() {
    let mut svc = FfmpegService::new();
    assert!(svc.write_file("frame0000.png", b"x").is_err());
    assert!(svc.exec(&["-version"]).is_err());
}

#[test]
fn namespace_is_a_private_directory_removed_on_drop() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let mut svc = FfmpegService::new();
    svc.init().unwrap();
    let dir = svc.workdir().unwrap().to_path_buf();

    svc.write_file("a.bin", b"hello").unwrap();
    assert_eq!(svc.read_file("a.bin").unwrap(), b"hello");
    assert!(svc.write_file("../escape", b"x").is_err());
    svc.delete_file("a.bin").unwrap();
    svc.delete_file("a.bin").unwrap();
    assert!(matches!(svc.read_file("a.bin"), Err(ScanwipeError::Read(_))));

    drop(svc);
    assert!(!dir.exists());
}
