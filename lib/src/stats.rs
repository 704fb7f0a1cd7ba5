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

//! Global, per-author, per-path and conflict aggregation (§4.6).
//!
//! `StatsAggregator` is an owned value, not process-wide state: all
//! mutation goes through [`StatsAggregator::record`].

use indexmap::IndexMap;

use crate::author::Author;
use crate::path::PathKey;

/// The closed set of action kinds §3 defines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
    Create,
    Remove,
    Modify,
    Rename,
    Insert,
    Delete,
    Change,
    Commit,
    NoMsg,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Create,
        ActionKind::Remove,
        ActionKind::Modify,
        ActionKind::Rename,
        ActionKind::Insert,
        ActionKind::Delete,
        ActionKind::Change,
        ActionKind::Commit,
        ActionKind::NoMsg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Remove => "remove",
            ActionKind::Modify => "modify",
            ActionKind::Rename => "rename",
            ActionKind::Insert => "insert",
            ActionKind::Delete => "delete",
            ActionKind::Change => "change",
            ActionKind::Commit => "commit",
            ActionKind::NoMsg => "no_msg",
        }
    }
}

/// A zero-initialized counter per [`ActionKind`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ActionCounters {
    pub create: u64,
    pub remove: u64,
    pub modify: u64,
    pub rename: u64,
    pub insert: u64,
    pub delete: u64,
    pub change: u64,
    pub commit: u64,
    pub no_msg: u64,
}

impl ActionCounters {
    pub fn bump(&mut self, kind: ActionKind) {
        let counter = match kind {
            ActionKind::Create => &mut self.create,
            ActionKind::Remove => &mut self.remove,
            ActionKind::Modify => &mut self.modify,
            ActionKind::Rename => &mut self.rename,
            ActionKind::Insert => &mut self.insert,
            ActionKind::Delete => &mut self.delete,
            ActionKind::Change => &mut self.change,
            ActionKind::Commit => &mut self.commit,
            ActionKind::NoMsg => &mut self.no_msg,
        };
        *counter += 1;
    }

    pub fn get(&self, kind: ActionKind) -> u64 {
        match kind {
            ActionKind::Create => self.create,
            ActionKind::Remove => self.remove,
            ActionKind::Modify => self.modify,
            ActionKind::Rename => self.rename,
            ActionKind::Insert => self.insert,
            ActionKind::Delete => self.delete,
            ActionKind::Change => self.change,
            ActionKind::Commit => self.commit,
            ActionKind::NoMsg => self.no_msg,
        }
    }
}

#[derive(Default, Debug)]
pub struct AuthorStats {
    pub global: ActionCounters,
    pub path: IndexMap<PathKey, ActionCounters>,
}

#[derive(Default, Debug)]
pub struct PathStats {
    pub global: ActionCounters,
    pub author: IndexMap<Author, ActionCounters>,
}

/// `{delete, change, total, self_*, peer_*}`, derived from a [`ConflictTable`]
/// row or column (§3).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ConflictCounters {
    pub delete: u64,
    pub change: u64,
    pub total: u64,
    pub self_delete: u64,
    pub self_change: u64,
    pub self_total: u64,
    pub peer_delete: u64,
    pub peer_change: u64,
    pub peer_total: u64,
}

impl ConflictCounters {
    fn accumulate(&mut self, counters: &ActionCounters, is_self: bool) {
        let total = counters.delete + counters.change;
        self.delete += counters.delete;
        self.change += counters.change;
        self.total += total;
        if is_self {
            self.self_delete += counters.delete;
            self.self_change += counters.change;
            self.self_total += total;
        } else {
            self.peer_delete += counters.delete;
            self.peer_change += counters.change;
            self.peer_total += total;
        }
    }
}

/// A two-level `editor -> original -> ActionCounters` table, plus a
/// separate row for the per-pair total used by conflict listing.
pub type ConflictTable = IndexMap<Author, IndexMap<Author, ActionCounters>>;

/// One flattened `editor, original, delete, change, total` row.
#[derive(Clone, Debug)]
pub struct ConflictRow {
    pub editor: Author,
    pub original: Author,
    pub delete: u64,
    pub change: u64,
    pub total: u64,
}

/// An event as emitted by the [`crate::replay_engine::ReplayEngine`] (§4.6).
#[derive(Clone, Debug)]
pub struct Event {
    pub action: ActionKind,
    pub editor: Author,
    pub path: Option<PathKey>,
    pub original: Option<Author>,
    pub last_path: Option<PathKey>,
}

#[derive(Default)]
pub struct StatsAggregator {
    global: ActionCounters,
    author_stats: IndexMap<Author, AuthorStats>,
    path_stats: IndexMap<PathKey, PathStats>,
    conflict_table: ConflictTable,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(&self) -> &ActionCounters {
        &self.global
    }

    pub fn author_stats(&self) -> &IndexMap<Author, AuthorStats> {
        &self.author_stats
    }

    pub fn path_stats(&self) -> &IndexMap<PathKey, PathStats> {
        &self.path_stats
    }

    pub fn conflict_table(&self) -> &ConflictTable {
        &self.conflict_table
    }

    /// Applies the rules of §4.6 for a single event.
    pub fn record(&mut self, event: Event) {
        self.global.bump(event.action);
        self.author_stats.entry(event.editor.clone()).or_default();

        if let Some(path) = &event.path {
            if let Some(last_path) = &event.last_path {
                self.migrate_path(last_path, path);
            }

            self.author_stats
                .get_mut(&event.editor)
                .unwrap()
                .path
                .entry(path.clone())
                .or_default();
            self.path_stats.entry(path.clone()).or_default();
            self.path_stats
                .get_mut(path)
                .unwrap()
                .author
                .entry(event.editor.clone())
                .or_default();

            let author_entry = self.author_stats.get_mut(&event.editor).unwrap();
            author_entry.global.bump(event.action);
            author_entry.path.get_mut(path).unwrap().bump(event.action);

            let path_entry = self.path_stats.get_mut(path).unwrap();
            path_entry.global.bump(event.action);
            path_entry.author.get_mut(&event.editor).unwrap().bump(event.action);
        } else {
            // Commit-level actions (`commit`, `no_msg`) carry no path: only
            // the author's global counter is touched.
            self.author_stats.get_mut(&event.editor).unwrap().global.bump(event.action);
        }

        if let Some(original) = &event.original {
            self.conflict_table
                .entry(event.editor.clone())
                .or_default()
                .entry(original.clone())
                .or_default()
                .bump(event.action);
        }
    }

    /// Migrates every author's per-path entry and the global per-path entry
    /// from `last_path` to `path` (rename preservation, §4.6 rule 3).
    fn migrate_path(&mut self, last_path: &PathKey, path: &PathKey) {
        let authors: Vec<Author> = self.author_stats.keys().cloned().collect();
        for author in authors {
            if let Some(counters) = self.author_stats.get_mut(&author).unwrap().path.shift_remove(last_path) {
                self.author_stats.get_mut(&author).unwrap().path.insert(path.clone(), counters);
            }
        }
        if let Some(stats) = self.path_stats.shift_remove(last_path) {
            self.path_stats.insert(path.clone(), stats);
        }
    }

    /// Flattens the conflict table into per-pair rows.
    pub fn conflict_rows(&self) -> Vec<ConflictRow> {
        self.conflict_table
            .iter()
            .flat_map(|(editor, row)| {
                row.iter().map(move |(original, counters)| ConflictRow {
                    editor: editor.clone(),
                    original: original.clone(),
                    delete: counters.delete,
                    change: counters.change,
                    total: counters.delete + counters.change,
                })
            })
            .collect()
    }

    /// Derives the `conflict_made` view, keyed by editor.
    pub fn conflict_made(&self) -> IndexMap<Author, ConflictCounters> {
        let mut made: IndexMap<Author, ConflictCounters> = IndexMap::new();
        for (editor, row) in &self.conflict_table {
            let entry = made.entry(editor.clone()).or_default();
            for (original, counters) in row {
                entry.accumulate(counters, editor == original);
            }
        }
        made
    }

    /// Derives the `conflict_recv` view, keyed by original author.
    pub fn conflict_recv(&self) -> IndexMap<Author, ConflictCounters> {
        let mut recv: IndexMap<Author, ConflictCounters> = IndexMap::new();
        for (editor, row) in &self.conflict_table {
            for (original, counters) in row {
                let entry = recv.entry(original.clone()).or_default();
                entry.accumulate(counters, editor == original);
            }
        }
        recv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: ActionKind, editor: &str, path: Option<&str>, original: Option<&str>) -> Event {
        Event {
            action,
            editor: editor.into(),
            path: path.map(PathKey::from),
            original: original.map(Author::from),
            last_path: None,
        }
    }

    #[test]
    fn global_and_author_stats_agree() {
        let mut agg = StatsAggregator::new();
        agg.record(event(ActionKind::Create, "A", Some("a.txt"), None));
        agg.record(event(ActionKind::Insert, "A", Some("a.txt"), None));
        agg.record(event(ActionKind::Insert, "A", Some("a.txt"), None));
        assert_eq!(agg.global().create, 1);
        assert_eq!(agg.global().insert, 2);
        assert_eq!(agg.author_stats().get(&Author::from("A")).unwrap().global.insert, 2);
        assert_eq!(agg.path_stats().get(&PathKey::from("a.txt")).unwrap().global.insert, 2);
    }

    #[test]
    fn conflict_self_vs_peer() {
        let mut agg = StatsAggregator::new();
        agg.record(event(ActionKind::Change, "B", Some("a.txt"), Some("A")));
        agg.record(event(ActionKind::Delete, "A", Some("a.txt"), Some("A")));

        let made = agg.conflict_made();
        assert_eq!(made.get(&Author::from("B")).unwrap().peer_change, 1);
        assert_eq!(made.get(&Author::from("A")).unwrap().self_delete, 1);

        let recv = agg.conflict_recv();
        assert_eq!(recv.get(&Author::from("A")).unwrap().peer_change, 1);
        assert_eq!(recv.get(&Author::from("A")).unwrap().self_delete, 1);
    }

    #[test]
    fn rename_migrates_path_keyed_stats() {
        let mut agg = StatsAggregator::new();
        agg.record(event(ActionKind::Create, "A", Some("old.txt"), None));
        agg.record(event(ActionKind::Insert, "A", Some("old.txt"), None));
        agg.record(Event {
            action: ActionKind::Rename,
            editor: "A".into(),
            path: Some("new.txt".into()),
            original: None,
            last_path: Some("old.txt".into()),
        });

        let author_a = agg.author_stats().get(&Author::from("A")).unwrap();
        assert!(!author_a.path.contains_key(&PathKey::from("old.txt")));
        assert_eq!(author_a.path.get(&PathKey::from("new.txt")).unwrap().insert, 1);
        assert!(!agg.path_stats().contains_key(&PathKey::from("old.txt")));
        let new_path_stats = agg.path_stats().get(&PathKey::from("new.txt")).unwrap();
        assert_eq!(new_path_stats.global.insert, 1);
        assert_eq!(new_path_stats.global.rename, 1);
    }
}
