use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Category of an external reference attached to a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKind {
    /// Practice judge (LeetCode).
    Practice,
    /// Contest archive (Codeforces).
    Contest,
    Video,
    Article,
}

impl LinkKind {
    /// Short label used when listing links next to a problem.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Practice => "LeetCode",
            LinkKind::Contest => "CF",
            LinkKind::Video => "YouTube",
            LinkKind::Article => "Article",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Optional external links of a problem, at most one per kind.
///
/// Absent kinds are simply not present in the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemLinks(BTreeMap<LinkKind, Url>);

impl ProblemLinks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any previous link of the same kind.
    #[must_use]
    pub fn with(mut self, kind: LinkKind, url: Url) -> Self {
        self.0.insert(kind, url);
        self
    }

    pub fn insert(&mut self, kind: LinkKind, url: Url) -> Option<Url> {
        self.0.insert(kind, url)
    }

    #[must_use]
    pub fn get(&self, kind: LinkKind) -> Option<&Url> {
        self.0.get(&kind)
    }

    /// Links in `LinkKind` order.
    pub fn iter(&self) -> impl Iterator<Item = (LinkKind, &Url)> {
        self.0.iter().map(|(kind, url)| (*kind, url))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
