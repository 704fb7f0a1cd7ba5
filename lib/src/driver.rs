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

//! Walks a [`CommitSource`] oldest-to-newest and drives a [`ReplayEngine`]
//! through it (§5, §6).

use crate::diff_resolver::resolve;
use crate::error::ProvenanceResult;
use crate::message_indexer::IgnorePatterns;
use crate::replay_engine::ReplayEngine;
use crate::source::CommitSource;

/// Orchestrates one full history replay over `S`.
pub struct Driver<S: CommitSource> {
    source: S,
    engine: ReplayEngine,
}

impl<S: CommitSource> Driver<S> {
    pub fn new(source: S, ignore_patterns: IgnorePatterns) -> Self {
        Self {
            source,
            engine: ReplayEngine::new(ignore_patterns),
        }
    }

    pub fn engine(&self) -> &ReplayEngine {
        &self.engine
    }

    /// Replays the full commit history. `progress` is called with each
    /// commit id as it finishes processing, oldest-first, for the caller to
    /// surface as it sees fit (the CLI writes `commit <id>` to stderr).
    pub fn run(&mut self, mut progress: impl FnMut(&str)) -> ProvenanceResult<()> {
        let mut commits = self.source.iter_commits_reverse()?;
        commits.reverse();

        let Some(first) = commits.first() else {
            tracing::debug!("empty commit history, nothing to replay");
            return Ok(());
        };
        tracing::debug!(commit_id = %first.id, "seeding snapshot from initial commit's tree");
        for (path, bytes) in self.source.tree(&first.id)? {
            self.engine.new_file(&first.author, &path, &bytes)?;
        }
        self.engine.commit(&first.author, &first.message);
        progress(&first.id.to_string());

        for pair in commits.windows(2) {
            let prev = &pair[0];
            let curr = &pair[1];
            let diff = self.source.diff(&prev.id, &curr.id)?;
            let resolved = resolve(diff);
            let commit_id = curr.id.to_string();
            tracing::debug!(
                %commit_id,
                new = resolved.new.len(),
                del = resolved.del.len(),
                ren = resolved.ren.len(),
                modified = resolved.modified.len(),
                "applying commit"
            );

            for (path, bytes) in resolved.new {
                self.engine.new_file(&curr.author, &path, &bytes)?;
            }
            for (path, bytes) in resolved.del {
                self.engine.del_file(&commit_id, &curr.author, &path, &bytes)?;
            }
            for (old_path, new_path) in resolved.ren {
                self.engine.ren_file(&curr.author, &old_path, &new_path)?;
            }
            for (path, old_bytes, new_bytes) in resolved.modified {
                self.engine.mod_file(&commit_id, &curr.author, &path, &old_bytes, &new_bytes)?;
            }

            self.engine.commit(&curr.author, &curr.message);
            progress(&commit_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::Author;
    use crate::source::DiffEntry;
    use crate::testutil::FakeCommit;
    use crate::testutil::FakeCommitSource;

    #[test]
    fn seeds_initial_commit_from_tree_and_applies_one_modification() {
        let source = FakeCommitSource::new(vec![
            FakeCommit::new("c1", "A", "initial").with_tree(vec![("a.txt".into(), b"x\ny\nz".to_vec())]),
            FakeCommit::new("c2", "B", "tweak").with_diff(vec![DiffEntry::Modified {
                path: "a.txt".into(),
                old_bytes: b"x\ny\nz".to_vec(),
                new_bytes: b"x\ny2\nz".to_vec(),
            }]),
        ]);
        let mut driver = Driver::new(source, IgnorePatterns::default());
        let mut seen = Vec::new();
        driver.run(|id| seen.push(id.to_owned())).unwrap();

        assert_eq!(seen, vec!["c1", "c2"]);
        assert_eq!(driver.engine().stats().global().create, 1);
        assert_eq!(driver.engine().stats().global().change, 1);
        assert_eq!(driver.engine().stats().global().commit, 2);
        let made = driver.engine().stats().conflict_made();
        assert_eq!(made.get(&Author::from("B")).unwrap().peer_change, 1);
    }

    #[test]
    fn empty_history_produces_no_events() {
        let source = FakeCommitSource::new(vec![]);
        let mut driver = Driver::new(source, IgnorePatterns::default());
        driver.run(|_| panic!("no commits to report progress for")).unwrap();
        assert_eq!(driver.engine().stats().global().commit, 0);
    }

    #[test]
    fn rename_then_modify_targets_the_new_path() {
        let source = FakeCommitSource::new(vec![
            FakeCommit::new("c1", "A", "initial").with_tree(vec![("old.txt".into(), b"x".to_vec())]),
            FakeCommit::new("c2", "A", "rename").with_diff(vec![DiffEntry::Renamed {
                old_path: "old.txt".into(),
                new_path: "new.txt".into(),
            }]),
            FakeCommit::new("c3", "B", "edit").with_diff(vec![DiffEntry::Modified {
                path: "new.txt".into(),
                old_bytes: b"x".to_vec(),
                new_bytes: b"y".to_vec(),
            }]),
        ]);
        let mut driver = Driver::new(source, IgnorePatterns::default());
        driver.run(|_| {}).unwrap();

        assert!(!driver.engine().snapshot().has(&"old.txt".into()));
        assert_eq!(driver.engine().snapshot().get_lines(&"new.txt".into()).unwrap().len(), 1);
        let path_stats = driver.engine().stats().path_stats();
        assert!(path_stats.get(&"new.txt".into()).unwrap().global.change >= 1);
    }
}
