//! Golden tests for concat
//!
//! The output file format is consumed by other tools, so it must stay
//! byte-for-byte stable. The fixture tree has at most one matching file and
//! one subdirectory per directory, which makes traversal order deterministic.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample project
fn sample_project() -> PathBuf {
    fixtures_dir().join("sample_project")
}

/// Create a command for running the concat binary
fn concat_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("concat"));
    cmd.env_remove("CONCAT_EXT");
    cmd
}

/// Expected output with `<ROOT>` replaced by the real root
fn expected_output(root: &Path) -> String {
    let golden = fs::read_to_string(fixtures_dir().join("golden").join("sample_project.txt"))
        .expect("golden file present");
    golden.replace("<ROOT>", &root.display().to_string())
}

/// Run concat over the sample project, writing outside the fixture tree
fn run_on_sample(out: &Path) -> String {
    concat_cmd()
        .arg("--root")
        .arg(sample_project())
        .arg("--out")
        .arg(out)
        .assert()
        .success();
    fs::read_to_string(out).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_sample_project_output() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("salida.txt");

        let output = run_on_sample(&out);
        assert_eq!(output, expected_output(&sample_project()));
    }

    #[test]
    fn golden_output_is_idempotent() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("salida.txt");

        let first = run_on_sample(&out);
        let second = run_on_sample(&out);
        assert_eq!(first, second);
    }

    #[test]
    fn golden_sections_round_trip_file_contents() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("salida.txt");
        let root = sample_project();

        let output = run_on_sample(&out);

        for rel in ["index.ts", "src/app.tsx", "src/styles/main.css"] {
            let path = root.join(rel);
            let header = format!("---- {} ----\n", path.display());
            let start = output.find(&header).expect("header present") + header.len();
            let content = fs::read_to_string(&path).unwrap();

            assert_eq!(&output[start..start + content.len()], content);
            assert_eq!(&output[start + content.len()..start + content.len() + 2], "\n\n");
        }

        assert!(!output.contains("notes.txt"));
        assert!(!output.contains("legacy.js"));
        assert!(!output.contains("README.md"));
    }

    #[test]
    fn golden_library_matches_cli() {
        let temp = tempdir().unwrap();
        let cli_out = temp.path().join("cli.txt");
        let lib_out = temp.path().join("lib.txt");

        let cli_output = run_on_sample(&cli_out);
        let summary = concat::concatenate(
            &sample_project(),
            &lib_out,
            &concat::ExtensionSet::default(),
        )
        .unwrap();

        assert_eq!(summary.files, 3);
        assert_eq!(fs::read_to_string(&lib_out).unwrap(), cli_output);
    }
}
