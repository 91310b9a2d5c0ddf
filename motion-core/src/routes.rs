//! Static route table.

use serde::{Deserialize, Serialize};

/// Top-level views of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// The portfolio landing page.
    Portfolio,
    /// IntelligTest project page.
    IntelligTest,
    /// DevFlow project page.
    DevFlow,
    /// PredBit project page.
    PredBit,
}

/// Path to view mapping. No parameters, no guards.
pub const ROUTES: &[(&str, View)] = &[
    ("/", View::Portfolio),
    ("/intelligtest", View::IntelligTest),
    ("/devflow", View::DevFlow),
    ("/predbit", View::PredBit),
];

/// Resolve a request path. A single trailing slash is ignored.
#[must_use]
pub fn resolve(path: &str) -> Option<View> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|&(_, view)| view)
}

impl View {
    /// Canonical path of this view.
    #[must_use]
    pub fn path(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, view)| *view == self)
            .map_or("/", |&(path, _)| path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        assert_eq!(resolve("/"), Some(View::Portfolio));
        assert_eq!(resolve("/devflow"), Some(View::DevFlow));
        assert_eq!(resolve("/predbit/"), Some(View::PredBit));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(resolve("/admin"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_paths_roundtrip_through_table() {
        for &(path, view) in ROUTES {
            assert_eq!(view.path(), path);
            assert_eq!(resolve(path), Some(view));
        }
    }
}
