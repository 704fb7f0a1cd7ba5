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

//! The authoritative working state (§4.3): path → ordered `(author, line)`
//! sequence.
//!
//! Invariant, checked at every deletion and every modification: the line
//! projection of a path's entry equals the actual line sequence of that
//! path's blob in the current commit.

use indexmap::IndexMap;

use crate::author::Author;
use crate::error::ProvenanceError;
use crate::error::ProvenanceResult;
use crate::line::Line;
use crate::path::PathKey;

pub type OwnedLine = (Author, Line);

#[derive(Default)]
pub struct Snapshot {
    paths: IndexMap<PathKey, Vec<OwnedLine>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, path: &PathKey) -> bool {
        self.paths.contains_key(path)
    }

    pub fn get_lines(&self, path: &PathKey) -> Option<&[OwnedLine]> {
        self.paths.get(path).map(Vec::as_slice)
    }

    pub fn insert_new(&mut self, path: PathKey, lines: Vec<OwnedLine>) -> ProvenanceResult<()> {
        if self.paths.contains_key(&path) {
            return Err(ProvenanceError::PreconditionViolation(format!(
                "cannot create {path}: already present in snapshot"
            )));
        }
        self.paths.insert(path, lines);
        Ok(())
    }

    pub fn remove(&mut self, path: &PathKey) -> ProvenanceResult<Vec<OwnedLine>> {
        self.paths.shift_remove(path).ok_or_else(|| {
            ProvenanceError::PreconditionViolation(format!(
                "cannot remove {path}: absent from snapshot"
            ))
        })
    }

    pub fn rename(&mut self, old: &PathKey, new: PathKey) -> ProvenanceResult<()> {
        if self.paths.contains_key(&new) {
            return Err(ProvenanceError::PreconditionViolation(format!(
                "cannot rename to {new}: already present in snapshot"
            )));
        }
        let lines = self.paths.shift_remove(old).ok_or_else(|| {
            ProvenanceError::PreconditionViolation(format!(
                "cannot rename {old}: absent from snapshot"
            ))
        })?;
        self.paths.insert(new, lines);
        Ok(())
    }

    pub fn replace_sequence(
        &mut self,
        path: &PathKey,
        new_lines: Vec<OwnedLine>,
        commit_id: &str,
        expected: &[Line],
    ) -> ProvenanceResult<()> {
        check_projection(path, commit_id, &new_lines, expected)?;
        let entry = self.paths.get_mut(path).ok_or_else(|| {
            ProvenanceError::PreconditionViolation(format!(
                "cannot modify {path}: absent from snapshot"
            ))
        })?;
        *entry = new_lines;
        Ok(())
    }
}

/// Asserts that the line content half of `lines` equals `expected`,
/// line-for-line. Fatal when violated (§3, §7).
pub fn check_projection(
    path: &PathKey,
    commit_id: &str,
    lines: &[OwnedLine],
    expected: &[Line],
) -> ProvenanceResult<()> {
    if lines.len() != expected.len() || lines.iter().map(|(_, l)| l).ne(expected.iter()) {
        tracing::warn!(%path, commit_id, "snapshot line projection disagrees with blob content");
        return Err(ProvenanceError::InvariantViolation {
            path: path.clone(),
            commit_id: commit_id.to_owned(),
            detail: "snapshot line projection disagrees with blob content".to_owned(),
        });
    }
    Ok(())
}
