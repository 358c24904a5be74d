//! Fragment group entity
//!
//! A group collects every fragment whose header key is identical.
//! Groups are kept in the order their key was first seen.

use super::header::{Header, HeaderKey};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Fragments sharing one header key
#[derive(Debug, Clone)]
pub struct FragmentGroup {
    key: HeaderKey,
    /// Header of the first member, captured while grouping
    representative: Header,
    members: Vec<PathBuf>,
}

impl FragmentGroup {
    fn new(header: Header, first_member: PathBuf) -> Self {
        Self {
            key: header.key(),
            representative: header,
            members: vec![first_member],
        }
    }

    /// Returns the header key shared by all members
    pub fn key(&self) -> &HeaderKey {
        &self.key
    }

    /// Returns the header captured from the first-inserted member
    pub fn representative_header(&self) -> &Header {
        &self.representative
    }

    /// Returns the first-inserted member
    pub fn first_member(&self) -> &Path {
        // A group is only ever created with one member and never shrinks
        &self.members[0]
    }

    /// Returns members in insertion order
    pub fn members(&self) -> &[PathBuf] {
        &self.members
    }

    /// Returns members sorted lexicographically by path
    pub fn sorted_members(&self) -> Vec<&Path> {
        let mut sorted: Vec<&Path> = self.members.iter().map(PathBuf::as_path).collect();
        sorted.sort();
        sorted
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Insertion-ordered collection of groups keyed by header
#[derive(Debug, Clone, Default)]
pub struct GroupSet {
    groups: Vec<FragmentGroup>,
    index: HashMap<HeaderKey, usize>,
}

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fragment to the group for its header, creating the group on first sight
    ///
    /// Returns the key the fragment was filed under.
    pub fn insert(&mut self, header: Header, path: PathBuf) -> HeaderKey {
        let key = header.key();
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].members.push(path),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(FragmentGroup::new(header, path));
            }
        }
        key
    }

    /// Looks up a group by key
    pub fn get(&self, key: &HeaderKey) -> Option<&FragmentGroup> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    /// Iterates groups in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, FragmentGroup> {
        self.groups.iter()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of fragments across all groups
    pub fn fragment_count(&self) -> usize {
        self.groups.iter().map(FragmentGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a GroupSet {
    type Item = &'a FragmentGroup;
    type IntoIter = std::slice::Iter<'a, FragmentGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
