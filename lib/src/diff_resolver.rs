// Copyright 2026 The git-provenance Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rename promotion over a commit's raw diff entries (§4.2).

use std::collections::HashMap;

use crate::hash::ContentDigest;
use crate::hash::hash_content;
use crate::path::PathKey;
use crate::source::DiffEntry;

/// A commit's diff entries partitioned into new/deleted/renamed/modified,
/// with matching add/delete pairs promoted to renames.
#[derive(Debug, Default)]
pub struct ResolvedDiff {
    pub new: Vec<(PathKey, Vec<u8>)>,
    pub del: Vec<(PathKey, Vec<u8>)>,
    pub ren: Vec<(PathKey, PathKey)>,
    pub modified: Vec<(PathKey, Vec<u8>, Vec<u8>)>,
}

/// Buckets `entries` by content hash and promotes 1-to-1 add/delete
/// matches to renames. Buckets with more than one entry on either side are
/// left as separate creates and removes (§4.2's ambiguity tie-break).
pub fn resolve(entries: Vec<DiffEntry>) -> ResolvedDiff {
    let mut new_by_hash: HashMap<ContentDigest, Vec<(PathKey, Vec<u8>)>> = HashMap::new();
    let mut del_by_hash: HashMap<ContentDigest, Vec<(PathKey, Vec<u8>)>> = HashMap::new();
    let mut resolved = ResolvedDiff::default();

    for entry in entries {
        match entry {
            DiffEntry::New { path, bytes } => {
                let digest = hash_content(&bytes);
                new_by_hash.entry(digest).or_default().push((path, bytes));
            }
            DiffEntry::Deleted { path, bytes } => {
                let digest = hash_content(&bytes);
                del_by_hash.entry(digest).or_default().push((path, bytes));
            }
            DiffEntry::Renamed { old_path, new_path } => resolved.ren.push((old_path, new_path)),
            DiffEntry::Modified {
                path,
                old_bytes,
                new_bytes,
            } => resolved.modified.push((path, old_bytes, new_bytes)),
        }
    }

    let shared_hashes: Vec<ContentDigest> = new_by_hash
        .keys()
        .filter(|digest| del_by_hash.contains_key(*digest))
        .copied()
        .collect();
    for digest in shared_hashes {
        if new_by_hash[&digest].len() == 1 && del_by_hash[&digest].len() == 1 {
            let (new_path, _) = new_by_hash.remove(&digest).unwrap().pop().unwrap();
            let (old_path, _) = del_by_hash.remove(&digest).unwrap().pop().unwrap();
            resolved.ren.push((old_path, new_path));
        }
    }

    resolved.new = new_by_hash.into_values().flatten().collect();
    resolved.del = del_by_hash.into_values().flatten().collect();
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(path: &str, bytes: &[u8]) -> DiffEntry {
        DiffEntry::New {
            path: path.into(),
            bytes: bytes.to_vec(),
        }
    }

    fn deleted(path: &str, bytes: &[u8]) -> DiffEntry {
        DiffEntry::Deleted {
            path: path.into(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn one_to_one_identical_content_promotes_to_rename() {
        let resolved = resolve(vec![deleted("p1", b"same"), new("p2", b"same")]);
        assert_eq!(resolved.ren, vec![("p1".into(), "p2".into())]);
        assert!(resolved.new.is_empty());
        assert!(resolved.del.is_empty());
    }

    #[test]
    fn ambiguous_two_to_two_is_not_promoted() {
        let resolved = resolve(vec![
            deleted("p1", b"same"),
            deleted("p1b", b"same"),
            new("p2", b"same"),
            new("p2b", b"same"),
        ]);
        assert!(resolved.ren.is_empty());
        assert_eq!(resolved.new.len(), 2);
        assert_eq!(resolved.del.len(), 2);
    }

    #[test]
    fn differing_content_is_never_promoted() {
        let resolved = resolve(vec![deleted("p1", b"old"), new("p2", b"new")]);
        assert!(resolved.ren.is_empty());
        assert_eq!(resolved.new.len(), 1);
        assert_eq!(resolved.del.len(), 1);
    }

    #[test]
    fn real_renames_pass_through_untouched() {
        let resolved = resolve(vec![DiffEntry::Renamed {
            old_path: "a".into(),
            new_path: "b".into(),
        }]);
        assert_eq!(resolved.ren, vec![("a".into(), "b".into())]);
    }

    #[test]
    fn modified_entries_pass_through() {
        let resolved = resolve(vec![DiffEntry::Modified {
            path: "a".into(),
            old_bytes: b"x".to_vec(),
            new_bytes: b"y".to_vec(),
        }]);
        assert_eq!(resolved.modified.len(), 1);
    }
}
