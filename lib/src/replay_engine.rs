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

//! The per-line state machine that drives [`Snapshot`] and
//! [`StatsAggregator`] from diff opcodes (§4.5).

use crate::author::Author;
use crate::error::ProvenanceError;
use crate::error::ProvenanceResult;
use crate::line::split_lines;
use crate::line_differ::Opcode;
use crate::line_differ::diff_opcodes;
use crate::message_indexer::IgnorePatterns;
use crate::message_indexer::MessageIndexer;
use crate::message_indexer::clean_message;
use crate::path::PathKey;
use crate::snapshot::Snapshot;
use crate::snapshot::check_projection;
use crate::stats::ActionKind;
use crate::stats::Event;
use crate::stats::StatsAggregator;

pub struct ReplayEngine {
    snapshot: Snapshot,
    stats: StatsAggregator,
    messages: MessageIndexer,
}

impl ReplayEngine {
    pub fn new(ignore_patterns: IgnorePatterns) -> Self {
        Self {
            snapshot: Snapshot::new(),
            stats: StatsAggregator::new(),
            messages: MessageIndexer::new(ignore_patterns),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn messages(&self) -> &MessageIndexer {
        &self.messages
    }

    fn file_event(&mut self, action: ActionKind, editor: &Author, path: &PathKey) {
        self.stats.record(Event {
            action,
            editor: editor.clone(),
            path: Some(path.clone()),
            original: None,
            last_path: None,
        });
    }

    /// `new(author, path, bytes)` (§4.5).
    pub fn new_file(
        &mut self,
        author: &Author,
        path: &PathKey,
        bytes: &[u8],
    ) -> ProvenanceResult<()> {
        let lines = split_lines(bytes);
        for _ in &lines {
            self.file_event(ActionKind::Insert, author, path);
        }
        let owned = lines.into_iter().map(|line| (author.clone(), line)).collect();
        self.snapshot.insert_new(path.clone(), owned)?;
        self.file_event(ActionKind::Create, author, path);
        Ok(())
    }

    /// `del(author, path, bytes)` (§4.5).
    pub fn del_file(
        &mut self,
        commit_id: &str,
        author: &Author,
        path: &PathKey,
        bytes: &[u8],
    ) -> ProvenanceResult<()> {
        let expected = split_lines(bytes);
        let current = self.snapshot.get_lines(path).ok_or_else(|| {
            ProvenanceError::PreconditionViolation(format!("cannot delete {path}: absent from snapshot"))
        })?;
        check_projection(path, commit_id, current, &expected)?;

        let original_authors: Vec<Author> = current.iter().map(|(author, _)| author.clone()).collect();
        for original in original_authors {
            self.stats.record(Event {
                action: ActionKind::Delete,
                editor: author.clone(),
                path: Some(path.clone()),
                original: Some(original),
                last_path: None,
            });
        }
        self.snapshot.remove(path)?;
        self.file_event(ActionKind::Remove, author, path);
        Ok(())
    }

    /// `ren(author, oldpath, newpath)` (§4.5).
    pub fn ren_file(
        &mut self,
        author: &Author,
        old_path: &PathKey,
        new_path: &PathKey,
    ) -> ProvenanceResult<()> {
        self.snapshot.rename(old_path, new_path.clone())?;
        self.stats.record(Event {
            action: ActionKind::Rename,
            editor: author.clone(),
            path: Some(new_path.clone()),
            original: None,
            last_path: Some(old_path.clone()),
        });
        Ok(())
    }

    /// `mod(author, path, a_bytes, b_bytes)` (§4.5).
    pub fn mod_file(
        &mut self,
        commit_id: &str,
        author: &Author,
        path: &PathKey,
        a_bytes: &[u8],
        b_bytes: &[u8],
    ) -> ProvenanceResult<()> {
        let current = self
            .snapshot
            .get_lines(path)
            .ok_or_else(|| {
                ProvenanceError::PreconditionViolation(format!("cannot modify {path}: absent from snapshot"))
            })?
            .to_vec();
        let a_lines = split_lines(a_bytes);
        let b_lines = split_lines(b_bytes);

        let mut new_sequence = Vec::with_capacity(b_lines.len());
        for op in diff_opcodes(&a_lines, &b_lines) {
            match op {
                Opcode::Equal { i1, i2, .. } => {
                    new_sequence.extend(current[i1..i2].iter().cloned());
                }
                Opcode::Insert { j1, j2, .. } => {
                    for j in j1..j2 {
                        new_sequence.push((author.clone(), b_lines[j].clone()));
                        self.stats.record(Event {
                            action: ActionKind::Insert,
                            editor: author.clone(),
                            path: Some(path.clone()),
                            original: None,
                            last_path: None,
                        });
                    }
                }
                Opcode::Replace { i1, i2, j1, j2 } => {
                    for i in i1..i2 {
                        self.stats.record(Event {
                            action: ActionKind::Change,
                            editor: author.clone(),
                            path: Some(path.clone()),
                            original: Some(current[i].0.clone()),
                            last_path: None,
                        });
                    }
                    for j in j1..j2 {
                        new_sequence.push((author.clone(), b_lines[j].clone()));
                    }
                }
                Opcode::Delete { i1, i2, .. } => {
                    for i in i1..i2 {
                        self.stats.record(Event {
                            action: ActionKind::Delete,
                            editor: author.clone(),
                            path: Some(path.clone()),
                            original: Some(current[i].0.clone()),
                            last_path: None,
                        });
                    }
                }
            }
        }

        self.snapshot.replace_sequence(path, new_sequence, commit_id, &b_lines)?;
        self.file_event(ActionKind::Modify, author, path);
        Ok(())
    }

    /// `commit(author, message)` (§4.5).
    pub fn commit(&mut self, author: &Author, message: &str) {
        let cleaned = clean_message(message);
        if cleaned.trim().is_empty() {
            self.stats.record(Event {
                action: ActionKind::NoMsg,
                editor: author.clone(),
                path: None,
                original: None,
                last_path: None,
            });
        }
        self.messages.index(author, &cleaned);
        self.stats.record(Event {
            action: ActionKind::Commit,
            editor: author.clone(),
            path: None,
            original: None,
            last_path: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn engine() -> ReplayEngine {
        ReplayEngine::new(IgnorePatterns::default())
    }

    #[test]
    fn scenario_1_single_commit_single_file() {
        let mut engine = engine();
        let author = Author::from("A");
        let path = PathKey::from("a.txt");
        engine.new_file(&author, &path, b"x\ny\nz").unwrap();
        engine.commit(&author, "add a.txt");

        assert_eq!(engine.stats().global().create, 1);
        assert_eq!(engine.stats().global().insert, 3);
        assert_eq!(engine.stats().global().commit, 1);
        let lines = engine.snapshot().get_lines(&path).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|(a, _)| a == &author));
    }

    #[test]
    fn scenario_2_peer_change_is_a_conflict() {
        let mut engine = engine();
        let author_a = Author::from("A");
        let author_b = Author::from("B");
        let path = PathKey::from("a.txt");
        engine.new_file(&author_a, &path, b"x\ny\nz").unwrap();
        engine.commit(&author_a, "initial");

        engine.mod_file("c2", &author_b, &path, b"x\ny\nz", b"x\ny2\nz").unwrap();
        engine.commit(&author_b, "change y");

        assert_eq!(engine.stats().global().change, 1);
        let made = engine.stats().conflict_made();
        assert_eq!(made.get(&author_b).unwrap().peer_change, 1);
        let recv = engine.stats().conflict_recv();
        assert_eq!(recv.get(&author_a).unwrap().peer_change, 1);
    }

    #[test]
    fn scenario_3_self_delete_is_a_self_conflict() {
        let mut engine = engine();
        let author = Author::from("A");
        let path = PathKey::from("a.txt");
        engine.new_file(&author, &path, b"x\ny\nz").unwrap();
        engine.commit(&author, "initial");

        engine.del_file("c2", &author, &path, b"x\ny\nz").unwrap();
        engine.commit(&author, "remove a.txt");

        assert_eq!(engine.stats().global().delete, 3);
        assert_eq!(engine.stats().global().remove, 1);
        let made = engine.stats().conflict_made();
        assert_eq!(made.get(&author).unwrap().self_delete, 3);
        let recv = engine.stats().conflict_recv();
        assert_eq!(recv.get(&author).unwrap().self_delete, 3);
        assert!(!engine.snapshot().has(&path));
    }

    #[test]
    fn scenario_6_cleaned_empty_message_triggers_no_msg() {
        let mut engine = engine();
        let author = Author::from("A");
        engine.commit(&author, "   \n\n  ");
        assert_eq!(engine.stats().global().no_msg, 1);
        assert_eq!(engine.stats().author_stats().get(&author).unwrap().global.no_msg, 1);
    }

    #[test]
    fn scenario_6_svn_id_only_message_is_not_empty_after_cleanup() {
        let mut engine = engine();
        let author = Author::from("A");
        engine.commit(&author, "fix bug\n\ngit-svn-id: http://example@42");
        assert_eq!(engine.stats().global().no_msg, 0);
        assert_eq!(engine.messages().global().term.get("fix"), Some(&1));
        assert_eq!(engine.messages().global().term.get("bug"), Some(&1));
    }

    #[test]
    fn rename_preserves_line_identity() {
        let mut engine = engine();
        let author = Author::from("A");
        let old_path = PathKey::from("old.txt");
        let new_path = PathKey::from("new.txt");
        engine.new_file(&author, &old_path, b"x\ny").unwrap();
        engine.ren_file(&author, &old_path, &new_path).unwrap();

        assert!(!engine.snapshot().has(&old_path));
        assert_eq!(engine.snapshot().get_lines(&new_path).unwrap().len(), 2);
        assert_eq!(engine.stats().global().rename, 1);
    }

    #[test]
    fn rename_by_author_who_never_touched_the_old_path_does_not_panic() {
        let mut engine = engine();
        let alice = Author::from("alice");
        let bob = Author::from("bob");
        let old_path = PathKey::from("old.txt");
        let new_path = PathKey::from("new.txt");
        engine.new_file(&alice, &old_path, b"x\ny").unwrap();
        engine.ren_file(&bob, &old_path, &new_path).unwrap();

        assert!(!engine.snapshot().has(&old_path));
        assert_eq!(engine.snapshot().get_lines(&new_path).unwrap().len(), 2);
        let bob_stats = engine.stats().author_stats().get(&bob).unwrap();
        assert_eq!(bob_stats.path.get(&new_path).unwrap().rename, 1);
        let new_path_stats = engine.stats().path_stats().get(&new_path).unwrap();
        assert_eq!(new_path_stats.global.create, 1);
        assert_eq!(new_path_stats.global.rename, 1);
        assert_eq!(new_path_stats.author.get(&bob).unwrap().rename, 1);
    }

    #[test]
    fn mod_with_pure_insert_is_not_a_conflict() {
        let mut engine = engine();
        let author = Author::from("A");
        let path = PathKey::from("a.txt");
        engine.new_file(&author, &path, b"x\nz").unwrap();
        engine.mod_file("c2", &author, &path, b"x\nz", b"x\ny\nz").unwrap();

        assert_eq!(engine.stats().global().insert, 3);
        assert_eq!(engine.stats().global().delete, 0);
        assert!(engine.stats().conflict_table().is_empty());
    }

    #[test]
    fn del_detects_invariant_violation() {
        let mut engine = engine();
        let author = Author::from("A");
        let path = PathKey::from("a.txt");
        engine.new_file(&author, &path, b"x\ny").unwrap();
        let err = engine.del_file("c2", &author, &path, b"not-what-is-there").unwrap_err();
        assert_matches!(err, ProvenanceError::InvariantViolation { .. });
    }
}
