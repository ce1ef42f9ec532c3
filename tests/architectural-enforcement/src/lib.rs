//! Architectural Enforcement Integration Tests
//!
//! Source scans that keep the eyes engine honest:
//! - No sleep calls in the engine (it is polled, never blocks)
//! - No blocking I/O in the engine outside configuration loading
//!
//! The scans are line based. This module holds the pieces shared by the
//! test files under `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// A rule breach found by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// Offending line, trimmed
    pub line: String,
    /// What rule it breaks
    pub reason: &'static str,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line_number,
            self.reason,
            self.line
        )
    }
}

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Every `.rs` file under `dir`, relative to the workspace root
///
/// Missing directories yield nothing.
pub fn rust_sources(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Read a source file, skipping unreadable ones
pub fn read_lines(path: &Path) -> Option<Vec<String>> {
    fs::read_to_string(path)
        .ok()
        .map(|c| c.lines().map(str::to_string).collect())
}

/// The code on a line with any trailing `//` comment removed
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Number of leading lines before the `#[cfg(test)]` module
///
/// Unit tests sit at the bottom of each file, so everything after the
/// first `#[cfg(test)]` is test code.
pub fn production_len(lines: &[String]) -> usize {
    lines
        .iter()
        .position(|l| l.trim_start().starts_with("#[cfg(test)]"))
        .unwrap_or(lines.len())
}

/// Check if line is inside a `#[test]` function
pub fn is_in_test_function<S: AsRef<str>>(lines: &[S], current_idx: usize) -> bool {
    for i in (0..current_idx).rev() {
        let line = lines[i].as_ref().trim();

        if line.starts_with("#[test]") {
            return true;
        }

        if line.starts_with("fn ") && !lines_before_have_test_attr(lines, i) {
            return false;
        }

        if line.starts_with("mod ") || line.starts_with("impl ") {
            return false;
        }
    }
    false
}

fn lines_before_have_test_attr<S: AsRef<str>>(lines: &[S], fn_idx: usize) -> bool {
    fn_idx
        .checked_sub(1)
        .is_some_and(|i| lines[i].as_ref().trim().starts_with("#[test]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_part_drops_comment() {
        assert_eq!(code_part("let x = 1; // sleep(1)"), "let x = 1; ");
        assert_eq!(code_part("// std::fs::read"), "");
    }

    #[test]
    fn test_production_len_stops_at_tests() {
        let lines: Vec<String> = ["fn a() {}", "", "#[cfg(test)]", "mod tests {}"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(production_len(&lines), 2);
        assert_eq!(production_len(&lines[..2]), 2);
    }

    #[test]
    fn test_test_function_detection() {
        let code = [
            "#[test]",
            "fn test_something() {",
            "    std::thread::sleep(d);",
            "}",
        ];
        assert!(is_in_test_function(&code, 2));

        let code = ["fn run() {", "    std::thread::sleep(d);", "}"];
        assert!(!is_in_test_function(&code, 1));
    }

    #[test]
    fn test_workspace_sources_found() {
        let files = rust_sources("eyes/core/src");
        assert!(files.iter().any(|p| p.ends_with("engine.rs")));
        assert!(rust_sources("no/such/dir").is_empty());
    }
}
