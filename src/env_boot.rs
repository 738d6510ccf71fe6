use std::path::Path;

/// Load the given env file; if it is missing, fall back to `.env` at the project root.
///
/// Returns the path that was actually loaded, if any. A missing file is not an
/// error here: required keys are validated later by `util::env::preflight_check`.
pub fn ensure_dotenv(env_file: &Path) -> Option<String> {
    if dotenv::from_path(env_file).is_ok() {
        return Some(env_file.display().to_string());
    }
    // Fallback to Cargo project root
    let root = env!("CARGO_MANIFEST_DIR");
    let candidate = format!("{}/.env", root);
    dotenv::from_filename(&candidate).ok().map(|_| candidate)
}
