//! Hygiene — enforces coding standards at test time.
//!
//! Scans the canvas crate's production sources for antipatterns. Each has a
//! budget (zero); if you must add one, fix an existing one first — the
//! budget never grows.

use std::fs;
use std::path::Path;

const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    ("#[allow(dead_code)]", 0),
];

fn production_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path_str, content));
            }
        }
    }
}

#[test]
fn antipattern_budgets() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no production sources found under src/");

    let mut violations = Vec::new();
    for (pattern, budget) in BUDGETS {
        let mut hits = Vec::new();
        for (path, content) in &files {
            let count = content.lines().filter(|line| line.contains(pattern)).count();
            if count > 0 {
                hits.push(format!("  {path}: {count}"));
            }
        }
        let total: usize = files
            .iter()
            .map(|(_, c)| c.lines().filter(|l| l.contains(pattern)).count())
            .sum();
        if total > *budget {
            violations.push(format!("{pattern} budget exceeded: found {total}, max {budget}\n{}", hits.join("\n")));
        }
    }
    assert!(violations.is_empty(), "{}", violations.join("\n"));
}
