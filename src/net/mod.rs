pub mod fetch;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::error::SoundboardError;

/// Characters escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Path of a sound asset: the percent-encoded id under `root`.
pub fn asset_path(root: &str, id: &str) -> String {
    let encoded = utf8_percent_encode(id, URI_COMPONENT);
    if root.is_empty() || root.ends_with('/') {
        format!("{root}{encoded}")
    } else {
        format!("{root}/{encoded}")
    }
}

/// Resolves `path` against the page address, like the browser does for relative fetches.
pub fn resolve_url(base: &str, path: &str) -> Result<Url, SoundboardError> {
    let base = Url::parse(base)
        .map_err(|e| SoundboardError::Platform(format!("bad base url {base}: {e}")))?;
    base.join(path)
        .map_err(|e| SoundboardError::Platform(format!("bad url {path}: {e}")))
}
