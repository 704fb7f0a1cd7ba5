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

//! Replays a repository's commit history and reconstructs per-line
//! authorship provenance, deriving author/path/conflict statistics and a
//! lexical index of commit messages along the way.
//!
//! The engine (see [`replay_engine`]) is generic over the [`source`]
//! trait: it is exercised in this crate's tests against an in-memory fake
//! ([`testutil`]) and, for a real repository on disk, against
//! [`source::gix_source`].

pub mod author;
pub mod diff_resolver;
pub mod driver;
pub mod error;
pub mod hash;
pub mod line;
pub mod line_differ;
pub mod message_indexer;
pub mod path;
pub mod replay_engine;
pub mod reporter;
pub mod snapshot;
pub mod source;
pub mod stats;

#[cfg(test)]
pub mod testutil;
