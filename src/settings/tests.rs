use super::*;

use std::io::Write;
use std::path::PathBuf;

use assert_matches::assert_matches;
use tempfile::NamedTempFile;

use crate::error::Error;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_defaults() {
    let settings = Settings::load(None, &[] as &[PathBuf]).unwrap();
    assert_eq!(settings.interrupt_ignore_count, 3);
    assert_eq!(settings.pager.command, None);
    assert_eq!(settings.pager.paging, PagingOption::Auto);
    assert_eq!(
        settings.pager.env_vars().collect::<Vec<_>>(),
        vec![("LESS", "FRX"), ("LV", "-c")]
    );
}

#[test]
fn test_load_overrides() {
    let file = config_file(
        r#"
        interrupt-ignore-count = 0

        [pager]
        command = "most"
        paging = "always"
        "#,
    );

    let settings = Settings::load(None, &[file.path()]).unwrap();
    assert_eq!(settings.interrupt_ignore_count, 0);
    assert_eq!(settings.pager.command.as_deref(), Some("most"));
    assert_eq!(settings.pager.paging, PagingOption::Always);
}

#[test]
fn test_load_missing_default_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("config.toml");
    let settings = Settings::load(Some(missing.as_path()), &[] as &[PathBuf]).unwrap();
    assert_eq!(settings.interrupt_ignore_count, 3);
}

#[test]
fn test_load_missing_explicit_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("config.toml");
    let result = Settings::load(None, &[missing]);
    assert_matches!(result, Err(Error::Config(_)));
}

#[test]
fn test_load_invalid_paging_fails() {
    let file = config_file("[pager]\npaging = \"sometimes\"\n");
    let result = Settings::load(None, &[file.path()]);
    assert_matches!(result, Err(Error::Config(_)));
}

#[test]
fn test_env_vars_skip_malformed() {
    let settings = PagerSettings {
        env: vec!["A=1".into(), "broken".into(), "=2".into(), "B=x=y".into()],
        ..Default::default()
    };
    assert_eq!(settings.env_vars().collect::<Vec<_>>(), vec![("A", "1"), ("B", "x=y")]);
}
