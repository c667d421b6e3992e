use std::path::Path;

use anyhow::{Context, Result};
use russh::keys::ssh_key::LineEnding;
use russh::keys::{Algorithm, PrivateKey};

/// Load the server identity, creating an Ed25519 key at `path` on first run.
pub(crate) fn load_or_generate_host_key(path: &Path) -> Result<PrivateKey> {
    if path.exists() {
        return russh::keys::load_secret_key(path, None)
            .with_context(|| format!("load host key {}", path.display()));
    }

    let key = PrivateKey::random(&mut rand_core::OsRng, Algorithm::Ed25519)
        .context("generate host key")?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create host key dir {}", dir.display()))?;
    }
    let encoded = key.to_openssh(LineEnding::LF).context("encode host key")?;
    std::fs::write(path, encoded.as_bytes())
        .with_context(|| format!("write host key {}", path.display()))?;
    restrict_permissions(path)?;
    tracing::info!(path = %path.display(), "generated host key");
    Ok(key)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("chmod host key {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
