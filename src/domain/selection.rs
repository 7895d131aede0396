use std::collections::{BTreeSet, HashSet};

/// Which rule sets a ruler should apply.
///
/// `All` is the default. There is no magic set name: a set called
/// "all" is selected like any other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SetSelection {
    /// Every registered set, in registration order
    #[default]
    All,
    /// A single set by name
    One(String),
    /// Several sets by name
    Many(Vec<String>),
}

impl SetSelection {
    /// Selected names with duplicates removed, keeping the first
    /// occurrence. Returns `None` for [`SetSelection::All`].
    pub fn names(&self) -> Option<Vec<&str>> {
        match self {
            SetSelection::All => None,
            SetSelection::One(name) => Some(vec![name.as_str()]),
            SetSelection::Many(names) => {
                let mut seen = HashSet::with_capacity(names.len());
                Some(
                    names
                        .iter()
                        .map(String::as_str)
                        .filter(|name| seen.insert(*name))
                        .collect(),
                )
            }
        }
    }

    /// Returns true when every registered set is selected.
    pub fn is_all(&self) -> bool {
        matches!(self, SetSelection::All)
    }
}

impl From<&str> for SetSelection {
    fn from(name: &str) -> Self {
        SetSelection::One(name.to_string())
    }
}

impl From<String> for SetSelection {
    fn from(name: String) -> Self {
        SetSelection::One(name)
    }
}

impl From<Vec<String>> for SetSelection {
    fn from(names: Vec<String>) -> Self {
        SetSelection::Many(names)
    }
}

impl From<Vec<&str>> for SetSelection {
    fn from(names: Vec<&str>) -> Self {
        SetSelection::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SetSelection {
    fn from(names: &[&str]) -> Self {
        SetSelection::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SetSelection {
    fn from(names: [&str; N]) -> Self {
        SetSelection::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<HashSet<String>> for SetSelection {
    fn from(names: HashSet<String>) -> Self {
        // Sorted so the evaluation order does not depend on hashing.
        SetSelection::Many(names.into_iter().collect::<BTreeSet<_>>().into_iter().collect())
    }
}

impl From<BTreeSet<String>> for SetSelection {
    fn from(names: BTreeSet<String>) -> Self {
        SetSelection::Many(names.into_iter().collect())
    }
}

impl From<HashSet<&str>> for SetSelection {
    fn from(names: HashSet<&str>) -> Self {
        SetSelection::Many(
            names
                .into_iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
        )
    }
}

impl From<BTreeSet<&str>> for SetSelection {
    fn from(names: BTreeSet<&str>) -> Self {
        SetSelection::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl<S: Into<SetSelection>> From<Option<S>> for SetSelection {
    fn from(selection: Option<S>) -> Self {
        selection.map_or(SetSelection::All, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(SetSelection::from("set1"), SetSelection::One("set1".to_string()));
        assert_eq!(SetSelection::from(None::<&str>), SetSelection::All);
        assert_eq!(
            SetSelection::from(Some("set1")),
            SetSelection::One("set1".to_string())
        );
        assert_eq!(
            SetSelection::from(["a", "b"]),
            SetSelection::Many(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_names_are_deduplicated_in_order() {
        let selection = SetSelection::from(vec!["b", "a", "b", "c", "a"]);

        assert_eq!(selection.names(), Some(vec!["b", "a", "c"]));
    }

    #[test]
    fn test_hash_set_order_is_stable() {
        let names: HashSet<String> = ["s3", "s1", "s2"].iter().map(|s| s.to_string()).collect();
        let selection = SetSelection::from(names);

        assert_eq!(selection.names(), Some(vec!["s1", "s2", "s3"]));
    }

    #[test]
    fn test_borrowed_name_sets() {
        let selection = SetSelection::from(HashSet::from(["s2", "s1"]));
        assert_eq!(selection.names(), Some(vec!["s1", "s2"]));

        let selection = SetSelection::from(BTreeSet::from(["b", "a"]));
        assert_eq!(selection.names(), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_all_keyword_is_a_plain_name() {
        let selection = SetSelection::from("all");

        assert!(!selection.is_all());
        assert_eq!(selection.names(), Some(vec!["all"]));
        assert!(SetSelection::default().is_all());
        assert_eq!(SetSelection::default().names(), None);
    }
}
