//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: The eyes engine runs inside the host's polling loop and MUST
//! NOT perform blocking I/O. Output goes through the `EyeDisplay` capability
//! and diagnostics through `tracing`.
//! **Exceptions**: `config.rs` reads the configuration file once at startup.
//! Test code is exempt.

use std::path::Path;

use architectural_enforcement::{code_part, production_len, read_lines, rust_sources, Violation};

/// Files allowed to touch the file system
const CONFIG_LOADERS: &[&str] = &["config.rs"];

/// Test that engine code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_engine() {
    let violations = find_blocking_io_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O found in robot-eyes-core!");

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n❌ FORBIDDEN in the engine:");
        eprintln!("  - std::fs (outside config.rs), std::net, std::process");
        eprintln!("  - println!/eprintln!/std::io::stdout()/stdin()");
        eprintln!("\n✅ INSTEAD:");
        eprintln!("  - Draw through the EyeDisplay capability");
        eprintln!("  - Log with tracing macros");

        panic!(
            "\nFound {} blocking I/O violation(s).\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find all blocking I/O in engine production code
fn find_blocking_io_violations() -> Vec<Violation> {
    let mut violations = Vec::new();
    for path in rust_sources("eyes/core/src") {
        if let Some(lines) = read_lines(&path) {
            check_lines(&path, &lines, &mut violations);
        }
    }
    violations
}

fn check_lines(path: &Path, lines: &[String], violations: &mut Vec<Violation>) {
    let config_loader = CONFIG_LOADERS.iter().any(|name| path.ends_with(name));

    for (idx, line) in lines.iter().take(production_len(lines)).enumerate() {
        let code = code_part(line);
        let reason = if !config_loader && (code.contains("std::fs") || code.contains("fs::read")) {
            "Blocking file I/O"
        } else if code.contains("std::net") {
            "Blocking network I/O"
        } else if code.contains("std::process") {
            "Process spawning"
        } else if code.contains("std::io::stdout()")
            || code.contains("std::io::stdin()")
            || code.contains("println!(")
            || code.contains("print!(")
        {
            "Console I/O"
        } else {
            continue;
        };

        violations.push(Violation {
            path: path.to_path_buf(),
            line_number: idx + 1,
            line: line.trim().to_string(),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(code: &[&str]) -> Vec<String> {
        code.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_blocking_io_detection() {
        let code = owned(&[
            "fn load_sprite() -> String {",
            "    std::fs::read_to_string(\"eyes.bin\").unwrap()",
            "}",
            "fn debug_frame() {",
            "    println!(\"frame\");",
            "}",
        ]);
        let mut violations = Vec::new();
        check_lines(Path::new("eyes/core/src/sequence.rs"), &code, &mut violations);
        let lines: Vec<usize> = violations.iter().map(|v| v.line_number).collect();
        assert_eq!(lines, vec![2, 5]);
    }

    #[test]
    fn test_config_loader_may_read_files() {
        let code = owned(&["    let content = std::fs::read_to_string(&path)?;"]);
        let mut violations = Vec::new();
        check_lines(Path::new("eyes/core/src/config.rs"), &code, &mut violations);
        assert!(violations.is_empty());

        let code = owned(&["    let sock = std::net::TcpStream::connect(addr)?;"]);
        check_lines(Path::new("eyes/core/src/config.rs"), &code, &mut violations);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_test_module_is_exempt() {
        let code = owned(&[
            "fn run() {}",
            "#[cfg(test)]",
            "mod tests {",
            "    fn write() { std::fs::write(\"x\", \"y\").unwrap(); }",
            "}",
        ]);
        let mut violations = Vec::new();
        check_lines(Path::new("eyes/core/src/engine.rs"), &code, &mut violations);
        assert!(violations.is_empty());
    }
}
