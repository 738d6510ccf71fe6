//! Environment helpers: env file loading and ergonomic getters.
//! Call `init_env()` once early in each binary (or rely on lazy Once).
use std::path::Path;
use std::sync::Once;
use tracing::{info, warn};

/// Keys searched for the connection string, in order of preference.
/// `DIRECT_URL` bypasses the pooler, which is what a batch seed wants.
pub const DB_URL_KEYS: &[&str] = &["DIRECT_URL", "DATABASE_URL"];

static INIT: Once = Once::new();

/// Load the env file exactly once. Safe to call many times.
pub fn init_env(env_file: &Path) {
    INIT.call_once(|| match crate::env_boot::ensure_dotenv(env_file) {
        Some(loaded) => info!(target = "env", path = %loaded, "loaded env file"),
        None => warn!(
            target = "env",
            path = %env_file.display(),
            "env file not found; relying on process environment"
        ),
    });
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Boolean flag; accepts 1/true/on/yes (case-insensitive) as true.
pub fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => {
            let v = raw.trim().to_ascii_lowercase();
            matches!(v.as_str(), "1" | "true" | "on" | "yes")
        }
        Err(_) => default,
    }
}

/// Database URL from the first of `DB_URL_KEYS` that is set.
pub fn db_url() -> anyhow::Result<String> {
    for k in DB_URL_KEYS {
        if let Some(v) = env_opt(k) {
            info!(target = "env", key = k, "database URL resolved");
            return Ok(v.trim().to_string());
        }
    }
    Err(anyhow::anyhow!(
        "no database URL env vars set ({})",
        DB_URL_KEYS.join(" | ")
    ))
}

pub fn redact_value(key: &str, val: &str) -> String {
    let k = key.to_ascii_uppercase();
    if k.contains("PASSWORD") || k.contains("SECRET") || k.contains("KEY") || k.contains("TOKEN") {
        return "***".to_string();
    }

    let val_trim = val.trim();

    // Always redact postgres DSNs even if the key isn't obviously sensitive.
    if let Ok(mut u) = url::Url::parse(val_trim) {
        let scheme = u.scheme().to_ascii_lowercase();
        if scheme == "postgres" || scheme == "postgresql" {
            if !u.username().is_empty() {
                let _ = u.set_username("***");
            }
            if u.password().is_some() {
                let _ = u.set_password(Some("***"));
            }
            return u.to_string();
        }
    }

    if (k.contains("URL") || k.contains("DSN"))
        && (val_trim.starts_with("postgres://") || val_trim.starts_with("postgresql://"))
    {
        return "postgres://***".to_string();
    }

    val_trim.to_string()
}

/// Validate that at least one of `any_of` is set and log a redacted snapshot of
/// `also_log`. Returns error naming the keys when none is present.
pub fn preflight_check(title: &str, any_of: &[&str], also_log: &[&str]) -> anyhow::Result<()> {
    let snapshot: Vec<(String, String)> = also_log
        .iter()
        .map(|&k| {
            let v = env_opt(k).unwrap_or_default();
            (k.to_string(), redact_value(k, &v))
        })
        .collect();
    info!(target = "preflight", title, snapshot = ?snapshot, "configuration snapshot");
    if any_of.iter().all(|k| env_opt(k).is_none()) {
        return Err(anyhow::anyhow!(
            "missing required env: one of {:?}",
            any_of
        ));
    }
    Ok(())
}
