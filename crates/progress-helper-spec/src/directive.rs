//! Parsed directives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which items of a section to mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSelection {
    /// Every control in the section.
    All,
    /// 1-based item numbers, in the order given. Duplicates are kept.
    Items(Vec<u32>),
}

impl ItemSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, ItemSelection::All)
    }

    /// Translate 1-based item numbers into offsets within `[0, count)`.
    ///
    /// Numbers outside the range (including 0) are dropped.
    pub fn offsets(&self, count: usize) -> Vec<usize> {
        match self {
            ItemSelection::All => (0..count).collect(),
            ItemSelection::Items(items) => items
                .iter()
                .filter_map(|&k| (k as usize).checked_sub(1))
                .filter(|&offset| offset < count)
                .collect(),
        }
    }
}

/// Mark the given items of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// 1-based section number.
    pub section: u32,
    pub items: ItemSelection,
}

impl Directive {
    /// Directive for every item of `section`.
    pub fn all(section: u32) -> Self {
        Self {
            section,
            items: ItemSelection::All,
        }
    }

    /// Directive for specific items of `section`.
    pub fn items(section: u32, items: Vec<u32>) -> Self {
        Self {
            section,
            items: ItemSelection::Items(items),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.items {
            ItemSelection::All => write!(f, "{}", self.section),
            ItemSelection::Items(items) => {
                let list: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "{}:{}", self.section, list.join(","))
            }
        }
    }
}

/// Render directives back into a spec string that parses to the same list.
pub fn canonical(directives: &[Directive]) -> String {
    directives
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_all() {
        assert_eq!(ItemSelection::All.offsets(3), vec![0, 1, 2]);
        assert!(ItemSelection::All.offsets(0).is_empty());
    }

    #[test]
    fn test_offsets_drop_out_of_range() {
        let items = ItemSelection::Items(vec![0, 1, 5, 6, 10, 2]);
        assert_eq!(items.offsets(5), vec![0, 4, 1]);
    }

    #[test]
    fn test_offsets_keep_duplicates_and_order() {
        let items = ItemSelection::Items(vec![3, 1, 3]);
        assert_eq!(items.offsets(3), vec![2, 0, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Directive::all(3).to_string(), "3");
        assert_eq!(Directive::items(2, vec![1, 3, 4]).to_string(), "2:1,3,4");
    }

    #[test]
    fn test_canonical() {
        let directives = vec![Directive::all(1), Directive::items(2, vec![5])];
        assert_eq!(canonical(&directives), "1;2:5");
        assert_eq!(canonical(&[]), "");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&Directive::items(2, vec![1])).unwrap();
        assert_eq!(json, r#"{"section":2,"items":{"items":[1]}}"#);
        let json = serde_json::to_string(&Directive::all(4)).unwrap();
        assert_eq!(json, r#"{"section":4,"items":"all"}"#);
    }
}
