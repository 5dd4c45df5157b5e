//! Qualified names.
//!
//! A [`FqName`] is a dot separated path such as `lumen.ui.Composable`. The
//! last segment is the short name; everything before it is the package.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A fully qualified, dot separated name.
///
/// The root (empty) name has no segment and displays as an empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FqName {
    segments: SmallVec<[String; 4]>,
}

impl FqName {
    pub const ROOT: FqName = FqName {
        segments: SmallVec::new_const(),
    };

    /// Parse a dotted path. Empty segments are dropped, so `"a..b"` and
    /// `"a.b"` are the same name.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment of the name, `None` for the root name.
    pub fn short_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Everything but the last segment. The parent of a single segment name
    /// is the root name.
    pub fn parent(&self) -> FqName {
        let mut segments = self.segments.clone();
        segments.pop();
        FqName { segments }
    }

    /// Append a segment to this name.
    pub fn child(&self, segment: impl Into<String>) -> FqName {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        FqName { segments }
    }

    /// Dotted string form, same as `to_string()`.
    pub fn as_string(&self) -> String {
        self.segments.join(".")
    }
}

impl From<&str> for FqName {
    fn from(value: &str) -> Self {
        FqName::parse(value)
    }
}

impl std::fmt::Display for FqName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_and_short_name() {
        let name = FqName::parse("lumen.lifecycle.ScreenLifecycleEffect");
        assert_eq!(name.short_name(), Some("ScreenLifecycleEffect"));
        assert_eq!(name.parent(), FqName::parse("lumen.lifecycle"));
        assert_eq!(name.parent().child("Other").to_string(), "lumen.lifecycle.Other");
    }

    #[test]
    fn root_name() {
        let root = FqName::parse("");
        assert!(root.is_root());
        assert_eq!(root, FqName::ROOT);
        assert_eq!(root.short_name(), None);
        assert_eq!(FqName::parse("Solo").parent(), FqName::ROOT);
    }
}
