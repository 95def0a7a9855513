use crate::core::likes::LikeMap;
use std::collections::HashSet;

/// Anything rendered in a likeable list
pub trait Identified {
    fn id(&self) -> &str;
}

/// One row of a rendered list
#[derive(Debug, Clone, PartialEq)]
pub enum ListingEntry<T> {
    /// A loaded entity and whether the user likes it
    Loaded { item: T, liked: bool },
    /// A liked entity whose data is not part of the loaded page. Has no
    /// display data, only enough to keep the unlike action reachable
    Placeholder { id: String },
}

impl<T: Identified> ListingEntry<T> {
    pub fn id(&self) -> &str {
        match self {
            ListingEntry::Loaded { item, .. } => item.id(),
            ListingEntry::Placeholder { id } => id,
        }
    }

    pub fn is_liked(&self) -> bool {
        match self {
            ListingEntry::Loaded { liked, .. } => *liked,
            ListingEntry::Placeholder { .. } => true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ListingEntry::Placeholder { .. })
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            ListingEntry::Loaded { item, .. } => Some(item),
            ListingEntry::Placeholder { .. } => None,
        }
    }
}

/// Merges a loaded page of entities with the liked ids it is missing.
///
/// Loaded entities keep their order, duplicates by id collapse to the
/// first. Liked ids with no loaded entity are appended as placeholders
/// in ascending id order. Call again whenever the page or the map
/// changes, a placeholder disappears as soon as its entity is loaded.
pub fn reconcile_listing<T: Identified>(loaded: Vec<T>, likes: &LikeMap) -> Vec<ListingEntry<T>> {
    let mut seen: HashSet<String> = HashSet::with_capacity(loaded.len());
    let mut entries = Vec::with_capacity(loaded.len());

    for item in loaded {
        if !seen.insert(item.id().to_string()) {
            continue;
        }

        let liked = likes.is_liked(item.id());
        entries.push(ListingEntry::Loaded { item, liked });
    }

    for id in likes.liked_ids() {
        if !seen.contains(id) {
            entries.push(ListingEntry::Placeholder { id: id.to_string() });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct MemberCard {
        id: String,
        name: String,
    }

    impl MemberCard {
        fn new(id: &str, name: &str) -> Self {
            Self {
                id: id.to_string(),
                name: name.to_string(),
            }
        }
    }

    impl Identified for MemberCard {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_placeholder_for_unloaded_like() {
        let likes = LikeMap::from_ids(["u42"]);
        let page = vec![MemberCard::new("u1", "Ada"), MemberCard::new("u2", "Lin")];

        let entries = reconcile_listing(page, &likes);

        assert_eq!(entries.len(), 3);
        let placeholders: Vec<_> = entries.iter().filter(|e| e.is_placeholder()).collect();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].id(), "u42");
        assert!(placeholders[0].is_liked());
        assert!(placeholders[0].item().is_none());
    }

    #[test]
    fn test_placeholder_replaced_once_loaded() {
        let likes = LikeMap::from_ids(["u42"]);
        let page = vec![MemberCard::new("u1", "Ada"), MemberCard::new("u42", "Kai")];

        let entries = reconcile_listing(page, &likes);

        let for_u42: Vec<_> = entries.iter().filter(|e| e.id() == "u42").collect();
        assert_eq!(for_u42.len(), 1, "No duplicate card once real data is loaded");
        assert!(!for_u42[0].is_placeholder());
        assert!(for_u42[0].is_liked());
        assert_eq!(for_u42[0].item().map(|m| m.name.as_str()), Some("Kai"));
    }

    #[test]
    fn test_order_and_duplicates() {
        let likes = LikeMap::from_ids(["z9", "a1", "m2"]);
        let page = vec![
            MemberCard::new("m2", "first"),
            MemberCard::new("b3", "other"),
            MemberCard::new("m2", "second"),
        ];

        let entries = reconcile_listing(page, &likes);
        let ids: Vec<_> = entries.iter().map(|e| e.id()).collect();

        assert_eq!(ids, vec!["m2", "b3", "a1", "z9"]);
        assert_eq!(entries[0].item().map(|m| m.name.as_str()), Some("first"));
        assert!(entries[0].is_liked());
        assert!(!entries[1].is_liked());
    }

    #[test]
    fn test_empty_inputs() {
        let entries = reconcile_listing(Vec::<MemberCard>::new(), &LikeMap::new());
        assert!(entries.is_empty());
    }
}
