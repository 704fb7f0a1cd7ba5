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

//! An in-memory [`CommitSource`] for exercising [`crate::driver::Driver`]
//! without a real repository on disk.

use crate::author::Author;
use crate::error::ProvenanceResult;
use crate::path::PathKey;
use crate::source::CommitInfo;
use crate::source::CommitSource;
use crate::source::DiffEntry;

/// One authored commit, oldest-first in the `Vec` passed to
/// [`FakeCommitSource::new`].
pub struct FakeCommit {
    pub id: String,
    pub author: Author,
    pub message: String,
    /// The full tracked tree at this commit. Only consulted for the first
    /// commit in the sequence (§4.5's initial-commit seeding).
    pub tree: Vec<(PathKey, Vec<u8>)>,
    /// The diff entries taking the previous commit's tree to this one's.
    /// Ignored for the first commit.
    pub diff: Vec<DiffEntry>,
}

impl FakeCommit {
    pub fn new(id: &str, author: &str, message: &str) -> Self {
        Self {
            id: id.to_owned(),
            author: Author::from(author),
            message: message.to_owned(),
            tree: Vec::new(),
            diff: Vec::new(),
        }
    }

    pub fn with_tree(mut self, tree: Vec<(PathKey, Vec<u8>)>) -> Self {
        self.tree = tree;
        self
    }

    pub fn with_diff(mut self, diff: Vec<DiffEntry>) -> Self {
        self.diff = diff;
        self
    }
}

pub struct FakeCommitSource {
    commits: Vec<FakeCommit>,
}

impl FakeCommitSource {
    pub fn new(commits: Vec<FakeCommit>) -> Self {
        Self { commits }
    }
}

impl CommitSource for FakeCommitSource {
    type CommitId = String;

    fn iter_commits_reverse(&mut self) -> ProvenanceResult<Vec<CommitInfo<String>>> {
        Ok(self
            .commits
            .iter()
            .rev()
            .map(|commit| CommitInfo {
                id: commit.id.clone(),
                author: commit.author.clone(),
                message: commit.message.clone(),
            })
            .collect())
    }

    fn tree(&mut self, commit: &String) -> ProvenanceResult<Vec<(PathKey, Vec<u8>)>> {
        Ok(self
            .commits
            .iter()
            .find(|candidate| &candidate.id == commit)
            .map(|candidate| candidate.tree.clone())
            .unwrap_or_default())
    }

    fn diff(&mut self, _prev: &String, curr: &String) -> ProvenanceResult<Vec<DiffEntry>> {
        Ok(self
            .commits
            .iter()
            .find(|candidate| &candidate.id == curr)
            .map(|candidate| candidate.diff.clone())
            .unwrap_or_default())
    }
}
