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

//! The external, "version-control collaborator" interface.
//!
//! Everything in this module is an opaque contract the replay engine
//! consumes; it has no opinion about how commits, trees or diffs are
//! actually produced. The core is tested exclusively against
//! [`crate::testutil::FakeCommitSource`]; [`crate::source::gix_source`]
//! provides the one real, on-disk implementation the CLI binary uses.

use crate::author::Author;
use crate::error::ProvenanceResult;
use crate::path::PathKey;

pub mod gix_source;

/// One commit as yielded by a [`CommitSource`].
#[derive(Clone, Debug)]
pub struct CommitInfo<Id> {
    pub id: Id,
    pub author: Author,
    pub message: String,
}

/// A single raw diff entry for one commit transition, before rename
/// promotion. Mirrors the `{new_file, deleted_file, renamed, modified}`
/// variants of §4.2.
#[derive(Clone, Debug)]
pub enum DiffEntry {
    New { path: PathKey, bytes: Vec<u8> },
    Deleted { path: PathKey, bytes: Vec<u8> },
    Renamed { old_path: PathKey, new_path: PathKey },
    Modified {
        path: PathKey,
        old_bytes: Vec<u8>,
        new_bytes: Vec<u8>,
    },
}

/// The opaque source of commits, trees and diffs the replay engine is
/// driven from.
pub trait CommitSource {
    /// A handle identifying one commit in the underlying source.
    type CommitId: Clone + std::fmt::Display;

    /// Yields every commit, newest-first, as described in §6.
    fn iter_commits_reverse(&mut self) -> ProvenanceResult<Vec<CommitInfo<Self::CommitId>>>;

    /// The full set of tracked `(path, blob bytes)` pairs at `commit`, used
    /// only to seed the initial commit (§4.5).
    fn tree(&mut self, commit: &Self::CommitId) -> ProvenanceResult<Vec<(PathKey, Vec<u8>)>>;

    /// The diff entries taking the tree at `prev` to the tree at `curr`.
    fn diff(
        &mut self,
        prev: &Self::CommitId,
        curr: &Self::CommitId,
    ) -> ProvenanceResult<Vec<DiffEntry>>;
}
