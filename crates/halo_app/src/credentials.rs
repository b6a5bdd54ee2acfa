use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use halo_engine::Credentials;

/// Read the login form fields from a JSON object of strings.
pub fn load(path: &Path) -> anyhow::Result<Credentials> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading credentials from {}", path.display()))?;
    let credentials = Credentials::from_json(&raw)
        .with_context(|| format!("{} is not a JSON object of strings", path.display()))?;
    if credentials.is_empty() {
        bail!("{} holds no login fields", path.display());
    }
    Ok(credentials)
}
