//! Image URL resolution.
//!
//! Token images arrive as IPFS/Arweave URIs, bare filenames, site-relative
//! paths, or full URLs. [`resolve_image_url`] turns each into something a
//! renderer can load directly. Rules are checked in order; first match
//! wins:
//!
//! | Input | Output |
//! |---|---|
//! | absent or empty | `placeholder_image` |
//! | `ipfs://<hash>` | `{ipfs_gateway}/<hash>` |
//! | contains `content_hash` | `{image_gateway}/<input>` |
//! | `ar://<id>` | `{arweave_gateway}/<id>` |
//! | `data:...` | unchanged |
//! | `http...` | unchanged |
//! | `<digits>.png` or `<digits>` | `{image_gateway}/<input>.png` |
//! | `/<path>` | `{site_host}/<path>` |
//! | anything else | unchanged |

use crate::profile::CollectionProfile;

/// Resolve a raw image reference against the profile's gateways.
///
/// Pure: the same input and profile always give the same output.
pub fn resolve_image_url(raw: Option<&str>, profile: &CollectionProfile) -> String {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return profile.placeholder_image.clone(),
    };

    if let Some(hash) = raw.strip_prefix("ipfs://") {
        return format!("{}/{hash}", profile.ipfs_gateway);
    }

    if !profile.content_hash.is_empty() && raw.contains(profile.content_hash.as_str()) {
        return format!("{}/{raw}", profile.image_gateway);
    }

    if let Some(id) = raw.strip_prefix("ar://") {
        return format!("{}/{id}", profile.arweave_gateway);
    }

    if raw.starts_with("data:") || raw.starts_with("http") {
        return raw.to_string();
    }

    if is_numbered_image(raw) {
        return format!("{}/{raw}.png", profile.image_gateway);
    }

    if raw.starts_with('/') {
        return format!("{}{raw}", profile.site_host);
    }

    raw.to_string()
}

/// `^\d+\.png$` or `^\d+$`.
fn is_numbered_image(raw: &str) -> bool {
    let digits = raw.strip_suffix(".png").unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
