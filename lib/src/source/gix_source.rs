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

//! The one real [`CommitSource`]: a bridge onto an on-disk Git repository
//! via `gix`.
//!
//! HEAD's first-parent history is walked, newest-first as the trait
//! requires; adjacent trees are diffed with rewrite tracking disabled,
//! since rename detection is [`crate::diff_resolver`]'s job, not this
//! layer's.

use std::path::Path;

use gix::bstr::ByteSlice as _;
use gix::ObjectId;
use gix::Repository;

use crate::author::Author;
use crate::error::ProvenanceError;
use crate::error::ProvenanceResult;
use crate::path::PathKey;
use crate::source::CommitInfo;
use crate::source::CommitSource;
use crate::source::DiffEntry;

fn source_error(commit_id: impl std::fmt::Display, err: impl std::error::Error + Send + Sync + 'static) -> ProvenanceError {
    ProvenanceError::SourceError {
        commit_id: commit_id.to_string(),
        source: Box::new(err),
    }
}

pub struct GixSource {
    repo: Repository,
}

impl GixSource {
    pub fn open(path: &Path) -> ProvenanceResult<Self> {
        let repo = gix::open(path).map_err(|err| source_error(path.display(), err))?;
        Ok(Self { repo })
    }

    fn blob_bytes(&self, id: ObjectId, commit_id: &ObjectId) -> ProvenanceResult<Vec<u8>> {
        let object = self.repo.find_object(id).map_err(|err| source_error(commit_id, err))?;
        Ok(object.data.to_vec())
    }
}

impl CommitSource for GixSource {
    type CommitId = ObjectId;

    /// Yields HEAD's first-parent ancestry, newest-first.
    fn iter_commits_reverse(&mut self) -> ProvenanceResult<Vec<CommitInfo<ObjectId>>> {
        let head_id = self.repo.head_id().map_err(|err| source_error("HEAD", err))?;
        let walk = self
            .repo
            .rev_walk([head_id.detach()])
            .first_parent_only()
            .all()
            .map_err(|err| source_error("HEAD", err))?;

        let mut commits = Vec::new();
        for info in walk {
            let info = info.map_err(|err| source_error("HEAD", err))?;
            let commit = info.object().map_err(|err| source_error(info.id, err))?;
            let decoded = commit.decode().map_err(|err| source_error(info.id, err))?;
            commits.push(CommitInfo {
                id: info.id,
                author: Author::new(decoded.author.name.to_str_lossy().into_owned()),
                message: decoded.message.to_str_lossy().into_owned(),
            });
        }
        Ok(commits)
    }

    /// The full set of tracked blobs at `commit`, used only to seed the
    /// initial commit (§4.5).
    fn tree(&mut self, commit: &ObjectId) -> ProvenanceResult<Vec<(PathKey, Vec<u8>)>> {
        let commit_obj = self
            .repo
            .find_commit(*commit)
            .map_err(|err| source_error(commit, err))?;
        let tree = commit_obj.tree().map_err(|err| source_error(commit, err))?;

        let entries = tree
            .traverse()
            .breadthfirst
            .files()
            .map_err(|err| source_error(commit, err))?;

        entries
            .into_iter()
            .filter(|entry| entry.mode.is_blob())
            .map(|entry| {
                let path = PathKey::new(entry.filepath.to_str_lossy().into_owned());
                let bytes = self.blob_bytes(entry.oid, commit)?;
                Ok((path, bytes))
            })
            .collect()
    }

    /// The diff entries taking the tree at `prev` to the tree at `curr`,
    /// with rewrite tracking turned off.
    fn diff(&mut self, prev: &ObjectId, curr: &ObjectId) -> ProvenanceResult<Vec<DiffEntry>> {
        let prev_tree = self
            .repo
            .find_commit(*prev)
            .map_err(|err| source_error(curr, err))?
            .tree()
            .map_err(|err| source_error(curr, err))?;
        let curr_tree = self
            .repo
            .find_commit(*curr)
            .map_err(|err| source_error(curr, err))?
            .tree()
            .map_err(|err| source_error(curr, err))?;

        let mut entries = Vec::new();
        let mut diff_error = None;
        prev_tree
            .changes()
            .map_err(|err| source_error(curr, err))?
            .track_rewrites(None)
            .for_each_to_obtain_tree(&curr_tree, |change| {
                use gix::object::tree::diff::change::Event;

                let location = change.location().to_str_lossy().into_owned();
                let result = match change.event {
                    Event::Addition { id, .. } => self
                        .blob_bytes(id.detach(), curr)
                        .map(|bytes| entries.push(DiffEntry::New { path: PathKey::new(location), bytes })),
                    Event::Deletion { id, .. } => self
                        .blob_bytes(id.detach(), curr)
                        .map(|bytes| entries.push(DiffEntry::Deleted { path: PathKey::new(location), bytes })),
                    Event::Modification { previous_id, id, .. } => {
                        let old = self.blob_bytes(previous_id.detach(), curr);
                        let new = self.blob_bytes(id.detach(), curr);
                        old.and_then(|old_bytes| {
                            new.map(|new_bytes| {
                                entries.push(DiffEntry::Modified {
                                    path: PathKey::new(location),
                                    old_bytes,
                                    new_bytes,
                                });
                            })
                        })
                    }
                    Event::Rewrite { .. } => Ok(()),
                };
                if let Err(err) = result {
                    diff_error = Some(err);
                    return Ok(gix::object::tree::diff::Action::Cancel);
                }
                Ok(gix::object::tree::diff::Action::Continue)
            })
            .map_err(|err| source_error(curr, err))?;

        if let Some(err) = diff_error {
            return Err(err);
        }
        Ok(entries)
    }
}
