//! Persist the server session cookies between CLI invocations.
//!
//! The file holds a single `Cookie` header line (`name=value; name2=value2`) as
//! produced by the reqwest jar for the API base URL. Directory mode is 0700 and
//! file mode 0600 on Unix.

use std::fs;
use std::path::Path;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

use crate::error::ClientError;

/// Name of the cookie Django uses for its CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Load saved cookies into `jar`. A missing or empty file is not an error.
///
/// # Errors
///
/// Returns [`ClientError::CookieStore`] if the file exists but cannot be read.
pub fn restore(path: &Path, jar: &Jar, url: &Url) -> Result<usize, ClientError> {
    if !path.exists() {
        return Ok(0);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| ClientError::CookieStore(format!("read {}: {e}", path.display())))?;

    let mut restored = 0;
    for pair in split_header(content.trim()) {
        jar.add_cookie_str(pair, url);
        restored += 1;
    }
    tracing::debug!(path = %path.display(), restored, "restored session cookies");
    Ok(restored)
}

/// Write the jar's cookies for `url` to `path`. Removes the file when the jar is empty.
///
/// # Errors
///
/// Returns [`ClientError::CookieStore`] on any filesystem failure.
pub fn save(path: &Path, jar: &Jar, url: &Url) -> Result<(), ClientError> {
    let Some(header) = header_for(jar, url) else {
        return delete(path);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ClientError::CookieStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }

    fs::write(path, &header)
        .map_err(|e| ClientError::CookieStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| ClientError::CookieStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

/// Remove the cookie file if present.
///
/// # Errors
///
/// Returns [`ClientError::CookieStore`] if the file exists but cannot be removed.
pub fn delete(path: &Path) -> Result<(), ClientError> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| ClientError::CookieStore(format!("delete {}: {e}", path.display())))?;
    }
    Ok(())
}

/// Value of cookie `name` currently held for `url`.
#[must_use]
pub fn cookie_value(jar: &Jar, url: &Url, name: &str) -> Option<String> {
    let header = header_for(jar, url)?;
    split_header(&header).find_map(|pair| {
        pair.split_once('=')
            .filter(|(key, _)| key.trim() == name)
            .map(|(_, value)| value.trim().to_string())
    })
}

fn header_for(jar: &Jar, url: &Url) -> Option<String> {
    jar.cookies(url)
        .and_then(|value| value.to_str().ok().map(str::to_string))
        .filter(|header| !header.trim().is_empty())
}

fn split_header(header: &str) -> impl Iterator<Item = &str> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
}
