//! Tag selection handling for the post editor.
//!
//! A post's tag set is always submitted to the backend as a split of
//! `tag_ids` (tags that exist in the catalog) and `new_tags` (names the
//! backend should create). The split is decided purely by catalog id
//! membership; names are never compared, so a freshly created entry whose
//! name matches an existing tag is still submitted as new and left for the
//! backend to reconcile.

use std::collections::HashSet;

use crate::models::Tag;

/// One entry of an edited tag selection. `value` carries the catalog id the
/// entry was resolved to, or `None` for an entry the user created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub value: Option<i64>,
    pub label: String,
}

impl TagOption {
    pub fn existing(id: i64, name: impl Into<String>) -> Self {
        Self {
            value: Some(id),
            label: name.into(),
        }
    }

    pub fn created(name: impl Into<String>) -> Self {
        Self {
            value: None,
            label: name.into(),
        }
    }
}

/// The submission form of a tag selection: ids of catalog tags to keep,
/// names of tags to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSplit {
    pub tag_ids: Vec<i64>,
    pub new_tags: Vec<String>,
}

/// The selection a post's current tags represent when the editor opens.
pub fn selection_from_post(tags: &[Tag]) -> Vec<TagOption> {
    tags.iter()
        .map(|tag| TagOption::existing(tag.id, tag.name.clone()))
        .collect()
}

/// Builds a selection from a comma-separated list of tag names, resolving
/// each name against the catalog. Names without an exact catalog match
/// become created entries. Blank fragments and repeated names are dropped;
/// nothing else is normalized.
pub fn selection_from_names(input: &str, catalog: &[Tag]) -> Vec<TagOption> {
    let mut seen = HashSet::new();
    input
        .split(',')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(|name| match catalog.iter().find(|tag| tag.name == name) {
            Some(tag) => TagOption::existing(tag.id, name),
            None => TagOption::created(name),
        })
        .collect()
}

/// Partitions a selection against the catalog: entries whose value is a
/// known catalog id go to `tag_ids`, everything else goes to `new_tags` by
/// label. Selection order is preserved on both sides; every entry lands on
/// exactly one side.
pub fn partition(selection: &[TagOption], catalog: &[Tag]) -> TagSplit {
    let catalog_ids: HashSet<i64> = catalog.iter().map(|tag| tag.id).collect();

    let mut split = TagSplit::default();
    for option in selection {
        match option.value {
            Some(id) if catalog_ids.contains(&id) => split.tag_ids.push(id),
            _ => split.new_tags.push(option.label.clone()),
        }
    }
    split
}
