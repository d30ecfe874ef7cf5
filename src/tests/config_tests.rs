use super::*;

#[test]
fn missing_file_yields_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let s = Settings::load(Some(&dir.path().join("nope.json")))?;
    assert_eq!(s, Settings::default());
    assert_eq!(s.server, "http://localhost:5279");
    Ok(())
}

#[test]
fn partial_file_fills_in_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"server": "http://10.0.0.2:5279", "ch_threads": 4}"#)?;

    let s = Settings::load(Some(&path))?;
    assert_eq!(s.server, "http://10.0.0.2:5279");
    assert_eq!(s.ch_threads, 4);
    assert_eq!(s.claim_threads, 16);
    assert_eq!(s.separator, ';');
    Ok(())
}

#[test]
fn malformed_file_is_an_error_naming_the_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{not json")?;

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("settings.json"), "{}", err);
    Ok(())
}

#[test]
fn save_then_load_keeps_values() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("settings.json");
    let s = Settings {
        separator: ',',
        download_dir: Some(dir.path().join("dl")),
        ..Settings::default()
    };
    s.save(&path)?;
    assert_eq!(Settings::load(Some(&path))?, s);
    Ok(())
}
