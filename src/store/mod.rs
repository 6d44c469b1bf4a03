//! Emoji store module
//!
//! Holds the full emoji dataset in memory and answers every query the API
//! serves: listing, category/group filters, random selection, search, and
//! similarity. Built once at startup and never mutated afterwards, so it can
//! be shared across connection tasks without locking.

mod loader;

pub use loader::{load, LoadError};

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One emoji record as served by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Emoji {
    /// Unique identifier, lowercase words separated by spaces
    pub name: String,
    /// Coarse classification (e.g. "smileys and people")
    pub category: String,
    /// Finer classification within a category (e.g. "face positive")
    pub group: String,
    /// Unicode glyph
    pub glyph: String,
    /// Keyword tags used for search and similarity
    #[serde(default)]
    pub tags: Vec<String>,
}

/// In-memory emoji collection with derived indices
///
/// Emojis keep their load order; `categories` and `groups` list distinct
/// names in discovery order, which is exactly the set handlers validate
/// request parameters against.
pub struct EmojiStore {
    emojis: Vec<Emoji>,
    by_name: HashMap<String, usize>,
    by_category: HashMap<String, Vec<usize>>,
    by_group: HashMap<String, Vec<usize>>,
    categories: Vec<String>,
    groups: Vec<String>,
}

impl EmojiStore {
    /// Build the store and its indices from a list of emojis
    ///
    /// Callers are expected to have validated the list (non-empty, unique
    /// names); the loader does this for dataset input.
    pub fn new(emojis: Vec<Emoji>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_category: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_group: HashMap<String, Vec<usize>> = HashMap::new();
        let mut categories = Vec::new();
        let mut groups = Vec::new();

        for (idx, emoji) in emojis.iter().enumerate() {
            by_name.insert(emoji.name.clone(), idx);

            if !by_category.contains_key(&emoji.category) {
                categories.push(emoji.category.clone());
            }
            by_category
                .entry(emoji.category.clone())
                .or_default()
                .push(idx);

            if !by_group.contains_key(&emoji.group) {
                groups.push(emoji.group.clone());
            }
            by_group.entry(emoji.group.clone()).or_default().push(idx);
        }

        Self {
            emojis,
            by_name,
            by_category,
            by_group,
            categories,
            groups,
        }
    }

    /// All emojis in load order
    pub fn all(&self) -> &[Emoji] {
        &self.emojis
    }

    /// Emojis whose category exactly matches, load order
    pub fn all_by_category(&self, category: &str) -> Vec<&Emoji> {
        self.collect(self.by_category.get(category))
    }

    /// Emojis whose group exactly matches, load order
    pub fn all_by_group(&self, group: &str) -> Vec<&Emoji> {
        self.collect(self.by_group.get(group))
    }

    /// Uniformly random emoji from the full set
    ///
    /// `None` only if the store is empty, which the loader rejects at
    /// startup.
    pub fn random(&self) -> Option<&Emoji> {
        if self.emojis.is_empty() {
            return None;
        }
        let idx = rand::rng().random_range(0..self.emojis.len());
        self.emojis.get(idx)
    }

    /// Uniformly random emoji from the given category
    pub fn random_by_category(&self, category: &str) -> Option<&Emoji> {
        self.pick(self.by_category.get(category))
    }

    /// Uniformly random emoji from the given group
    pub fn random_by_group(&self, group: &str) -> Option<&Emoji> {
        self.pick(self.by_group.get(group))
    }

    /// Case-insensitive substring search against names and tags
    ///
    /// Results come back in store (load) order, so identical queries against
    /// the same dataset always produce identical output.
    pub fn search(&self, query: &str) -> Vec<&Emoji> {
        let needle = query.to_lowercase();
        self.emojis
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Emojis related to the named one, excluding the emoji itself
    ///
    /// Related means sharing the group or at least one tag. Unknown names
    /// yield an empty list rather than an error.
    pub fn similar(&self, name: &str) -> Vec<&Emoji> {
        let Some(&idx) = self.by_name.get(name) else {
            return Vec::new();
        };
        let subject = &self.emojis[idx];

        self.emojis
            .iter()
            .enumerate()
            .filter(|(i, e)| {
                *i != idx
                    && (e.group == subject.group
                        || e.tags.iter().any(|t| subject.tags.contains(t)))
            })
            .map(|(_, e)| e)
            .collect()
    }

    /// Distinct category names in discovery order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct group names in discovery order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    fn collect(&self, indices: Option<&Vec<usize>>) -> Vec<&Emoji> {
        indices
            .map(|idxs| idxs.iter().filter_map(|&i| self.emojis.get(i)).collect())
            .unwrap_or_default()
    }

    fn pick(&self, indices: Option<&Vec<usize>>) -> Option<&Emoji> {
        let indices = indices?;
        if indices.is_empty() {
            return None;
        }
        let i = rand::rng().random_range(0..indices.len());
        self.emojis.get(*indices.get(i)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn emoji(name: &str, category: &str, group: &str, glyph: &str, tags: &[&str]) -> Emoji {
        Emoji {
            name: name.to_string(),
            category: category.to_string(),
            group: group.to_string(),
            glyph: glyph.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }

    fn sample_store() -> EmojiStore {
        EmojiStore::new(vec![
            emoji("grinning face", "smileys and people", "face positive", "😀", &["smile", "happy"]),
            emoji("crying face", "smileys and people", "face negative", "😢", &["sad", "tears"]),
            emoji("dog face", "animals and nature", "animal mammal", "🐶", &["dog", "pet"]),
            emoji("cat face", "animals and nature", "animal mammal", "🐱", &["cat", "pet"]),
            emoji("red heart", "symbols", "heart", "❤️", &["heart", "love", "happy"]),
        ])
    }

    #[test]
    fn test_all_preserves_load_order() {
        let store = sample_store();
        let names: Vec<_> = store.all().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            ["grinning face", "crying face", "dog face", "cat face", "red heart"]
        );
    }

    #[test]
    fn test_category_filter_is_exact() {
        let store = sample_store();
        let animals = store.all_by_category("animals and nature");
        assert_eq!(animals.len(), 2);
        assert!(animals.iter().all(|e| e.category == "animals and nature"));
    }

    #[test]
    fn test_categories_partition_the_store() {
        let store = sample_store();
        let total: usize = store
            .categories()
            .iter()
            .map(|c| store.all_by_category(c).len())
            .sum();
        assert_eq!(total, store.all().len());
    }

    #[test]
    fn test_groups_partition_the_store() {
        let store = sample_store();
        let total: usize = store
            .groups()
            .iter()
            .map(|g| store.all_by_group(g).len())
            .sum();
        assert_eq!(total, store.all().len());
    }

    #[test]
    fn test_distinct_names_are_discovery_ordered() {
        let store = sample_store();
        assert_eq!(
            store.categories(),
            ["smileys and people", "animals and nature", "symbols"]
        );
        assert_eq!(
            store.groups(),
            ["face positive", "face negative", "animal mammal", "heart"]
        );
    }

    #[test]
    fn test_unknown_category_and_group_yield_empty() {
        let store = sample_store();
        assert!(store.all_by_category("not a category").is_empty());
        assert!(store.all_by_group("not a group").is_empty());
        assert!(store.random_by_category("not a category").is_none());
        assert!(store.random_by_group("not a group").is_none());
    }

    #[test]
    fn test_random_is_always_a_member() {
        let store = sample_store();
        for _ in 0..100 {
            let picked = store.random().unwrap();
            assert!(store.all().contains(picked));
        }
    }

    #[test]
    fn test_random_covers_the_full_set() {
        // 500 draws over 5 emojis; missing one would be (4/5)^500.
        let store = sample_store();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(store.random().unwrap().name.clone());
        }
        assert_eq!(seen.len(), store.all().len());
    }

    #[test]
    fn test_random_by_category_stays_in_category() {
        let store = sample_store();
        for _ in 0..50 {
            let picked = store.random_by_category("animals and nature").unwrap();
            assert_eq!(picked.category, "animals and nature");
        }
    }

    #[test]
    fn test_random_by_group_stays_in_group() {
        let store = sample_store();
        for _ in 0..50 {
            let picked = store.random_by_group("animal mammal").unwrap();
            assert_eq!(picked.group, "animal mammal");
        }
    }

    #[test]
    fn test_search_matches_names_case_insensitively() {
        let store = sample_store();
        let hits = store.search("FACE");
        let names: Vec<_> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            ["grinning face", "crying face", "dog face", "cat face"]
        );
    }

    #[test]
    fn test_search_matches_tags() {
        let store = sample_store();
        let hits = store.search("pet");
        let names: Vec<_> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["dog face", "cat face"]);
    }

    #[test]
    fn test_search_is_deterministic() {
        let store = sample_store();
        let first: Vec<_> = store.search("a").iter().map(|e| e.name.clone()).collect();
        let second: Vec<_> = store.search("a").iter().map(|e| e.name.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let store = sample_store();
        assert!(store.search("zzz").is_empty());
    }

    #[test]
    fn test_similar_shares_group_or_tag() {
        let store = sample_store();
        let related = store.similar("dog face");
        let names: Vec<_> = related.iter().map(|e| e.name.as_str()).collect();
        // cat face shares the group and the "pet" tag.
        assert_eq!(names, ["cat face"]);
    }

    #[test]
    fn test_similar_never_includes_self() {
        let store = sample_store();
        for e in store.all() {
            assert!(store.similar(&e.name).iter().all(|r| r.name != e.name));
        }
    }

    #[test]
    fn test_similar_unknown_name_is_empty() {
        let store = sample_store();
        assert!(store.similar("no such emoji").is_empty());
    }

    #[test]
    fn test_similar_matches_across_categories_via_tags() {
        let store = sample_store();
        let related = store.similar("red heart");
        let names: Vec<_> = related.iter().map(|e| e.name.as_str()).collect();
        // grinning face shares the "happy" tag despite a different category.
        assert_eq!(names, ["grinning face"]);
    }

    #[test]
    fn test_emoji_json_round_trip() {
        let store = sample_store();
        let json = serde_json::to_string(store.all()).unwrap();
        let parsed: Vec<Emoji> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store.all());
    }
}
