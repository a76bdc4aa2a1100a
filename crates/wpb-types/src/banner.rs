use std::collections::btree_map::{BTreeMap, Entry};

/// The set of relevant banners found on one talk page: raw template name
/// → importance rating, if the invocation carried one.
///
/// Insertion follows the prefer-rated rule: when the same name is seen
/// both at the top level and inside a banner shell, the version carrying
/// a rating wins regardless of which was seen first. Among two rated
/// sightings the later one wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BannerSet {
    entries: BTreeMap<String, Option<String>>,
}

impl BannerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a banner sighting. An existing rated entry is never
    /// replaced by an unrated one.
    pub fn insert(&mut self, name: impl Into<String>, rating: Option<String>) {
        match self.entries.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(rating);
            }
            Entry::Occupied(mut slot) => {
                if rating.is_some() {
                    slot.insert(rating);
                }
            }
        }
    }

    /// The rating recorded for `name`. The outer `Option` is presence in
    /// the set; the inner one is whether a rating was seen.
    pub fn rating(&self, name: &str) -> Option<Option<&str>> {
        self.entries.get(name).map(|r| r.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
