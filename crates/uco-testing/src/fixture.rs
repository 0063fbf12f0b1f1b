//! JSON fixture loader.
//!
//! Loads request/response samples from `fixtures/` at the workspace root.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Load a JSON fixture file relative to the workspace root.
///
/// # Example
/// ```no_run
/// use uco_testing::fixture::Fixture;
/// let val = Fixture::load("fixtures/users/register_request.json");
/// ```
pub struct Fixture;

impl Fixture {
    /// Load and parse a fixture JSON file at `workspace_root/path`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        let full_path = Self::resolve(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }

    // Walk up from the calling crate until the path exists.
    fn resolve(relative_path: &str) -> PathBuf {
        let start = std::env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap());
        start
            .ancestors()
            .map(|dir| dir.join(relative_path))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| Path::new(&start).join(relative_path))
    }
}
