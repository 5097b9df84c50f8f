//! Derived-key naming for thumbnails
//!
//! The marker is used twice: to build the thumbnail key and to recognise
//! objects that are already thumbnails, which stops the upload from
//! retriggering the function forever.

/// Substring identifying a thumbnail object
pub const THUMB_MARKER: &str = "_thumb.";

/// Whether `key` already names a thumbnail
pub fn is_thumbnail(key: &str) -> bool {
    key.contains(THUMB_MARKER)
}

/// Derive the thumbnail key by replacing every `.` with the marker.
///
/// Keys with several dots get every dot rewritten, so `a.b.jpg` becomes
/// `a_thumb.b_thumb.jpg`. Returns `None` for keys without any dot: the
/// derived key would equal the source and the upload would overwrite it.
pub fn thumbnail_key(key: &str) -> Option<String> {
    if !key.contains('.') {
        return None;
    }
    Some(key.replace('.', THUMB_MARKER))
}
