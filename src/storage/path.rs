//! Request path resolution
//!
//! Turns the URL path of a request into a root-relative path that can be
//! joined onto the upload directory.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Root-relative resource path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavPath {
    segments: Vec<String>,
    collection: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path escapes the upload root: {0}")]
    Traversal(String),
}

impl DavPath {
    /// Resolve a URL path such as `/album/my%20photo.jpg`.
    ///
    /// Percent escapes are decoded before splitting, so `%2F` acts as a
    /// separator. Empty and `.` segments are dropped; `..` is rejected.
    pub fn from_uri_path(uri_path: &str) -> Result<Self, PathError> {
        let decoded = percent_decode_str(uri_path).decode_utf8_lossy();
        let trimmed = decoded.strip_prefix('/').unwrap_or(&*decoded);

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(PathError::Traversal(uri_path.to_string())),
                s => segments.push(s.to_string()),
            }
        }

        let collection = segments.is_empty() || trimmed.ends_with('/');
        Ok(Self {
            segments,
            collection,
        })
    }

    /// True for the root or a path written with a trailing slash
    pub const fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Relative filesystem path (empty for the root)
    pub fn to_relative(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Join onto a root directory
    pub fn join_onto(&self, root: &Path) -> PathBuf {
        if self.is_root() {
            root.to_path_buf()
        } else {
            root.join(self.to_relative())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        let p = DavPath::from_uri_path("/album/img1.jpg").unwrap();
        assert_eq!(p.to_relative(), PathBuf::from("album/img1.jpg"));
        assert!(!p.is_collection());
    }

    #[test]
    fn test_percent_decoding() {
        let p = DavPath::from_uri_path("/my%20album/caf%C3%A9.jpg").unwrap();
        assert_eq!(p.to_relative(), PathBuf::from("my album/café.jpg"));
    }

    #[test]
    fn test_root_and_trailing_slash() {
        let root = DavPath::from_uri_path("/").unwrap();
        assert!(root.is_root());
        assert!(root.is_collection());
        assert_eq!(root.join_onto(Path::new("/srv")), PathBuf::from("/srv"));

        let dir = DavPath::from_uri_path("/album/").unwrap();
        assert!(dir.is_collection());
        assert!(!dir.is_root());
        assert_eq!(dir.to_relative(), PathBuf::from("album"));
    }

    #[test]
    fn test_redundant_segments_are_dropped() {
        let p = DavPath::from_uri_path("//album/./img.jpg").unwrap();
        assert_eq!(p.join_onto(Path::new("/srv")), PathBuf::from("/srv/album/img.jpg"));
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(matches!(
            DavPath::from_uri_path("/../etc/passwd"),
            Err(PathError::Traversal(_))
        ));
        // Encoded separators are decoded before the check
        assert!(matches!(
            DavPath::from_uri_path("/album/..%2F..%2Fsecret"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            DavPath::from_uri_path("/album/%2E%2E/x"),
            Err(PathError::Traversal(_))
        ));
    }

    #[test]
    fn test_dots_inside_names_are_fine() {
        let p = DavPath::from_uri_path("/album/..hidden/a..b").unwrap();
        assert_eq!(p.to_relative(), PathBuf::from("album/..hidden/a..b"));
    }
}
