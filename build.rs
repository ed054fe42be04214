use std::path::{Path, PathBuf};
use std::process::Command;

const MAX_LINES: usize = 750;

const CHECKED_EXTENSIONS: &[&str] = &["rs", "md", "toml"];

const EXCLUDED_DIRS: &[&str] = &["target", ".git", "examples"];

const EXCLUDED_FILES: &[&str] = &["Cargo.lock"];

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/main");
    println!("cargo:rerun-if-changed=.git/packed-refs");

    let sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=FLAVOURTOWN_GIT_SHA={}", sha);

    let root = PathBuf::from(
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set"),
    );
    let files = collect_files_to_check(&root);
    for file in &files {
        println!("cargo:rerun-if-changed={}", file.display());
    }

    let rust_files: Vec<&PathBuf> = files
        .iter()
        .filter(|p| {
            p.extension().and_then(|e| e.to_str()) == Some("rs")
                && p.file_name().and_then(|n| n.to_str()) != Some("build.rs")
        })
        .collect();

    enforce_line_limits(&root, &files);
    enforce_no_dead_code_allows(&root, &rust_files);
    enforce_serial_for_env_mutations(&root, &rust_files);
}

fn collect_files_to_check(root: &Path) -> Vec<PathBuf> {
    let tracked = Command::new("git")
        .args(["ls-files"])
        .current_dir(root)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok());

    let mut files = Vec::new();
    match tracked {
        Some(stdout) => {
            for line in stdout.lines() {
                let path = root.join(line);
                if should_check_file(&path, root) {
                    files.push(path);
                }
            }
        }
        None => walk_directory(root, root, &mut files),
    }
    files
}

fn walk_directory(dir: &Path, root: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let excluded = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| EXCLUDED_DIRS.contains(&name));
            if !excluded {
                walk_directory(&path, root, files);
            }
        } else if should_check_file(&path, root) {
            files.push(path);
        }
    }
}

fn should_check_file(path: &Path, root: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if !CHECKED_EXTENSIONS.contains(&ext) || !path.is_file() {
        return false;
    }

    let Ok(rel_path) = path.strip_prefix(root) else {
        return true;
    };
    if EXCLUDED_FILES.contains(&rel_path.to_string_lossy().as_ref()) {
        return false;
    }
    !rel_path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
    })
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn fail(title: &str, violations: &[(PathBuf, usize, String)], advice: &[&str]) -> ! {
    eprintln!("\n========================================");
    eprintln!("{}", title);
    eprintln!("========================================");
    for (path, line, message) in violations {
        eprintln!("  {}:{}", path.display(), line);
        eprintln!("    {}", message);
    }
    eprintln!("========================================");
    for line in advice {
        eprintln!("{}", line);
    }
    eprintln!();
    panic!("Build failed: {} ({} occurrence(s))", title, violations.len());
}

fn enforce_line_limits(root: &Path, files: &[PathBuf]) {
    let mut violations = Vec::new();
    for file in files {
        match std::fs::read_to_string(file) {
            Ok(content) => {
                let count = content.lines().filter(|l| !l.trim().is_empty()).count();
                if count > MAX_LINES {
                    violations.push((
                        relative(root, file),
                        count,
                        format!("{} non-empty lines (max {})", count, MAX_LINES),
                    ));
                }
            }
            Err(e) => println!(
                "cargo:warning=Could not read file {}: {}",
                relative(root, file).display(),
                e
            ),
        }
    }

    if !violations.is_empty() {
        fail(
            "FILE LINE LIMIT EXCEEDED",
            &violations,
            &["Please split these files into smaller modules."],
        );
    }
}

fn enforce_no_dead_code_allows(root: &Path, rust_files: &[&PathBuf]) {
    let mut violations = Vec::new();
    for file in rust_files {
        let Ok(content) = std::fs::read_to_string(file) else {
            continue;
        };
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if (trimmed.starts_with("#[allow(") || trimmed.starts_with("#![allow("))
                && trimmed.contains("dead_code")
            {
                violations.push((relative(root, file), i + 1, trimmed.to_string()));
            }
        }
    }

    if !violations.is_empty() {
        fail(
            "#[allow(dead_code)] IS NOT ALLOWED",
            &violations,
            &[
                "Delete unused code instead of silencing the warning.",
                "If the code is only for tests, use #[cfg(test)].",
            ],
        );
    }
}

/// Environment variables are process-global, so tests that set or remove them
/// must not run in parallel with each other.
fn enforce_serial_for_env_mutations(root: &Path, rust_files: &[&PathBuf]) {
    let mut violations = Vec::new();
    for file in rust_files {
        let Ok(content) = std::fs::read_to_string(file) else {
            continue;
        };
        let lines: Vec<&str> = content.lines().collect();

        let mut in_test_fn = false;
        let mut has_serial = false;
        let mut test_fn_start = 0;
        let mut depth: i32 = 0;

        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed == "#[serial]" || trimmed == "#[serial_test::serial]" {
                has_serial = true;
            }
            if trimmed == "#[test]" {
                in_test_fn = true;
                test_fn_start = i + 1;
                depth = 0;
            }
            if !in_test_fn {
                continue;
            }

            for c in line.chars() {
                if c == '{' {
                    depth += 1;
                } else if c == '}' {
                    depth -= 1;
                }
            }

            let mutates = !trimmed.starts_with("//")
                && (trimmed.contains("env::set_var") || trimmed.contains("env::remove_var"));
            if mutates && !has_serial {
                violations.push((
                    relative(root, file),
                    test_fn_start,
                    "test mutates env without #[serial]".to_string(),
                ));
                in_test_fn = false;
                has_serial = false;
            } else if depth == 0 && line.contains('}') {
                in_test_fn = false;
                has_serial = false;
            }
        }
    }

    if !violations.is_empty() {
        fail(
            "ENV MUTATIONS REQUIRE #[serial]",
            &violations,
            &[
                "Add #[serial] from the serial_test crate:",
                "",
                "    #[test]",
                "    #[serial]",
                "    fn test_with_env_var() { ... }",
            ],
        );
    }
}
