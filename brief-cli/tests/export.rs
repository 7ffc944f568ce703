//! Library-level PDF export. Kept in its own test binary because it sets process
//! environment variables that spawned commands would otherwise inherit.

#[cfg(unix)]
#[test]
fn daily_export_adds_cover_and_furniture() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let work = tempfile::tempdir().unwrap();
    let chrome_stub = work.path().join("fake-chrome.sh");
    let html_copy = work.path().join("printed.html");
    let script = format!(
        r#"#!/bin/sh
for arg in "$@"; do
  case $arg in
    --print-to-pdf=*) OUTPUT="${{arg#*=}}" ;;
    file://*) cp "${{arg#file://}}" "{}" ;;
  esac
done
printf '%%PDF-1.7\n' > "$OUTPUT"
"#,
        html_copy.display()
    );
    fs::write(&chrome_stub, script).unwrap();
    fs::set_permissions(&chrome_stub, fs::Permissions::from_mode(0o755)).unwrap();
    std::env::set_var("BRIEF_CHROME_BIN", &chrome_stub);

    let config = brief_config::load_defaults().unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let pdf_path = work.path().join("news_summary_20240501.pdf");
    brief_cli::export::export_pdf(
        &config,
        std::path::Path::new("../brief-babel/tests/fixtures/daily_report.md"),
        &pdf_path,
        date,
    )
    .unwrap();

    assert!(fs::read(&pdf_path).unwrap().starts_with(b"%PDF"));
    let html = fs::read_to_string(&html_copy).unwrap();
    assert!(html.contains("<section class=\"brief-cover\">"));
    assert!(html.contains("產出日期：2024/05/01"));
    assert!(html.contains("@bottom-right"));
    assert!(html.contains("size: 210mm 297mm"));
}
