#[cfg(all(unix, feature = "native-export"))]
mod unix {
    use crate::common::published_report;
    use brief_babel::format::{Format, SerializedDocument};
    use brief_babel::formats::pdf::{PdfFormat, CHROME_ENV_VAR};
    use brief_babel::publish::{publish, PublishArtifact, PublishSpec};
    use brief_babel::FormatError;
    use std::collections::HashMap;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    /// A fake browser that copies its HTML input next to itself and writes a tiny PDF.
    fn write_stub_chrome(dir: &Path) -> PathBuf {
        let script_path = dir.join("fake-chrome.sh");
        let capture = dir.join("captured.html");
        let script = format!(
            r#"#!/bin/sh
OUTPUT=""
INPUT=""
for arg in "$@"; do
  case $arg in
    --print-to-pdf=*)
      OUTPUT="${{arg#*=}}"
      ;;
    file://*)
      INPUT="${{arg#file://}}"
      ;;
  esac
done
if [ -z "$OUTPUT" ]; then
  echo "missing output" >&2
  exit 1
fi
cp "$INPUT" "{capture}"
printf '%%PDF-1.7\n%%%%EOF\n' > "$OUTPUT"
exit 0
"#,
            capture = capture.display()
        );
        fs::write(&script_path, script).unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        script_path
    }

    fn write_failing_chrome(dir: &Path) -> PathBuf {
        let script_path = dir.join("broken-chrome.sh");
        fs::write(&script_path, "#!/bin/sh\necho 'no display' >&2\nexit 3\n").unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        script_path
    }

    // Both scenarios share one test so they never race on the environment variable.
    #[test]
    fn pdf_renderer_uses_chrome_stub() {
        let dir = tempdir().unwrap();
        let chrome_stub = write_stub_chrome(dir.path());
        let prev = std::env::var(CHROME_ENV_VAR).ok();
        std::env::set_var(CHROME_ENV_VAR, &chrome_stub);

        let doc = published_report();
        let mut options = HashMap::new();
        options.insert("size-mobile".to_string(), "true".to_string());
        match PdfFormat::default().serialize_with_options(&doc, &options).unwrap() {
            SerializedDocument::Binary(bytes) => assert!(bytes.starts_with(b"%PDF")),
            SerializedDocument::Text(_) => panic!("Expected binary PDF output"),
        }
        let captured = fs::read_to_string(dir.path().join("captured.html")).unwrap();
        assert!(captured.contains("@page { size: 90mm 160mm; margin: 5mm; }"));
        assert!(captured.contains("counter(page)"));
        assert!(captured.contains("每日生醫新聞報告"));

        let out_path = dir.path().join("out").join("news_summary_20240501.pdf");
        let artifact = publish(PublishSpec::new(&doc, "pdf").with_output_path(&out_path)).unwrap();
        assert_eq!(artifact, PublishArtifact::File(out_path.clone()));
        assert!(fs::read(&out_path).unwrap().starts_with(b"%PDF"));
        let captured = fs::read_to_string(dir.path().join("captured.html")).unwrap();
        assert!(captured.contains("@page { size: 210mm 297mm;"));

        let in_memory = publish(PublishSpec::new(&doc, "pdf"));
        assert!(matches!(in_memory, Err(FormatError::SerializationError(_))));

        std::env::set_var(CHROME_ENV_VAR, write_failing_chrome(dir.path()));
        let err = PdfFormat::default()
            .serialize_with_options(&doc, &HashMap::new())
            .unwrap_err();
        assert!(err.to_string().contains("no display"));

        if let Some(prev) = prev {
            std::env::set_var(CHROME_ENV_VAR, prev);
        } else {
            std::env::remove_var(CHROME_ENV_VAR);
        }
    }
}

#[cfg(not(all(unix, feature = "native-export")))]
#[test]
fn pdf_stub_skipped() {
    eprintln!("Skipping PDF tests (native-export feature or Unix required)");
}
