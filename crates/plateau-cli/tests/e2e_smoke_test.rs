use std::{fs, path::PathBuf};

use tempfile::tempdir;

use plateau_cli::{Args, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo manifests live at the workspace root, relative to the workspace
/// rather than this crate.
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

#[test]
fn e2e_smoke_test_valid_demos() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_toml_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename =
            format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        let args = Args {
            input: demo_path.to_string_lossy().to_string(),
            output: output_path.to_string_lossy().to_string(),
            config: None,
            log_level: "off".to_string(),
        };

        if let Err(e) = run(&args) {
            failed_demos.push((demo_path.clone(), e));
        } else {
            let svg = fs::read_to_string(&output_path).expect("output should exist");
            assert!(svg.contains("</svg>"), "{}: incomplete SVG", demo_path.display());
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_invalid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let invalid_demos = collect_toml_files(demos_dir().join("errors"));
    assert!(
        !invalid_demos.is_empty(),
        "No invalid demos found in demos/errors/"
    );

    let mut passed_unexpectedly = Vec::new();

    for demo_path in &invalid_demos {
        let output_path = temp_dir.path().join("should_not_exist.svg");

        let args = Args {
            input: demo_path.to_string_lossy().to_string(),
            output: output_path.to_string_lossy().to_string(),
            config: None,
            log_level: "off".to_string(),
        };

        if run(&args).is_ok() {
            passed_unexpectedly.push(demo_path.clone());
        }
    }

    if !passed_unexpectedly.is_empty() {
        eprintln!("\nInvalid demos that passed:");
        for path in &passed_unexpectedly {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} invalid demo(s) passed unexpectedly",
            passed_unexpectedly.len()
        );
    }

    println!("✅ All {} invalid demos failed as expected", invalid_demos.len());
}
