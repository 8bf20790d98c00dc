use std::fs;
use std::path::Path;

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Expressions of a corpus fixture: one per line, `#` lines are comments
pub fn corpus(name: &str) -> Vec<String> {
    load_fixture(name)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
