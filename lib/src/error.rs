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

//! The error taxonomy for the replay engine and its collaborators.

use thiserror::Error;

use crate::path::PathKey;

/// Top-level error type shared by the core engine and its concrete
/// `CommitSource` implementations.
#[derive(Debug, Error)]
pub enum ProvenanceError {
    /// The snapshot's projected line content disagrees with the blob's
    /// actual line content after a mutation. Always fatal: a silent
    /// miscount is worse than a crash.
    #[error("invariant violated for {path} at commit {commit_id}: {detail}")]
    InvariantViolation {
        path: PathKey,
        commit_id: String,
        detail: String,
    },

    /// A precondition of a Snapshot operation was not met: `new` on an
    /// existing path, `del`/`ren` on an absent path, or `ren` targeting an
    /// existing path. Indicates a bug in the DiffResolver or corrupt input.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The version-control collaborator failed to enumerate commits, read a
    /// blob, or produce a diff.
    #[error("source error while processing commit {commit_id}: {source}")]
    SourceError {
        commit_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The CLI was invoked with the wrong number of arguments.
    #[error("usage: {0} <REPO_PATH>")]
    UsageError(String),
}

pub type ProvenanceResult<T> = Result<T, ProvenanceError>;
