//! Integration Test: Sleep Prohibition
//!
//! **Policy**: The eyes engine is polled from the host's loop and MUST NOT
//! sleep. Every wait is a comparison of elapsed milliseconds.
//! **Exceptions**: Frame rate limiting in the simulator's polling loop.
//! Engine tests drive a manual clock, so they never sleep either.

use std::path::Path;

use architectural_enforcement::{
    code_part, is_in_test_function, production_len, read_lines, rust_sources, Violation,
};

/// Test that the engine and the simulator do not sleep outside frame limiting
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found!");

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame rate limiting in the simulator's main loop");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Any sleep in robot-eyes-core (use elapsed time checks)");
        eprintln!("  - Sleep in tests (advance a ManualClock instead)");

        panic!(
            "\nFound {} sleep violation(s).\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find all disallowed sleep calls
fn find_sleep_violations() -> Vec<Violation> {
    let mut violations = Vec::new();

    check_directory(
        "eyes/core/src",
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: false,
            allow_tests: false,
        },
    );

    check_directory(
        "eyes/core/tests",
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: false,
            allow_tests: false,
        },
    );

    check_directory(
        "eyes/sim/src",
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: true,
            allow_tests: false,
        },
    );

    violations
}

struct SleepPolicy {
    allow_frame_limiting: bool,
    allow_tests: bool,
}

fn check_directory(dir: &str, violations: &mut Vec<Violation>, policy: &SleepPolicy) {
    for path in rust_sources(dir) {
        if let Some(lines) = read_lines(&path) {
            check_lines(&path, &lines, violations, policy);
        }
    }
}

fn check_lines(path: &Path, lines: &[String], violations: &mut Vec<Violation>, policy: &SleepPolicy) {
    for (idx, line) in lines.iter().enumerate() {
        let code = code_part(line);
        if !code.contains("::sleep(") && !code.contains(".sleep(") {
            continue;
        }

        if policy.allow_tests && is_in_test_function(lines, idx) {
            continue;
        }

        // Frame limiting is only allowed in the simulator's main loop.
        if policy.allow_frame_limiting
            && path.ends_with("main.rs")
            && idx < production_len(lines)
            && is_frame_limiting_context(lines, idx)
        {
            continue;
        }

        violations.push(Violation {
            path: path.to_path_buf(),
            line_number: idx + 1,
            line: line.trim().to_string(),
            reason: "Sleep call",
        });
    }
}

/// Check if sleep is used for frame rate limiting
fn is_frame_limiting_context<S: AsRef<str>>(lines: &[S], current_idx: usize) -> bool {
    let context_range = current_idx.saturating_sub(10)..std::cmp::min(current_idx + 5, lines.len());

    lines[context_range].iter().any(|line| {
        let line = line.as_ref().to_lowercase();
        line.contains("frame") || line.contains("rate limit") || line.contains("tick_rate")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(code: &[&str]) -> Vec<String> {
        code.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_sleep_violation_detection() {
        let code = owned(&[
            "fn wait_for_blink() {",
            "    std::thread::sleep(Duration::from_millis(10));",
            "}",
        ]);
        let mut violations = Vec::new();
        check_lines(
            Path::new("eyes/core/src/engine.rs"),
            &code,
            &mut violations,
            &SleepPolicy {
                allow_frame_limiting: true,
                allow_tests: true,
            },
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line_number, 2);
    }

    #[test]
    fn test_frame_limiting_detection() {
        let code = owned(&[
            "fn main() {",
            "    loop {",
            "        let frame_start = Instant::now();",
            "        engine.advance();",
            "        std::thread::sleep(TICK_RATE - frame_start.elapsed());",
            "    }",
            "}",
        ]);
        assert!(is_frame_limiting_context(&code, 4));

        let mut violations = Vec::new();
        check_lines(
            Path::new("eyes/sim/src/main.rs"),
            &code,
            &mut violations,
            &SleepPolicy {
                allow_frame_limiting: true,
                allow_tests: false,
            },
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_frame_limiting_only_in_main() {
        let code = owned(&["// frame pacing", "std::thread::sleep(d);"]);
        let mut violations = Vec::new();
        check_lines(
            Path::new("eyes/sim/src/terminal.rs"),
            &code,
            &mut violations,
            &SleepPolicy {
                allow_frame_limiting: true,
                allow_tests: false,
            },
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_commented_sleep_ignored() {
        let code = owned(&["let x = 1; // thread::sleep(d) would block"]);
        let mut violations = Vec::new();
        check_lines(
            Path::new("eyes/core/src/engine.rs"),
            &code,
            &mut violations,
            &SleepPolicy {
                allow_frame_limiting: false,
                allow_tests: false,
            },
        );
        assert!(violations.is_empty());
    }
}
