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

//! Serialises the final aggregates to a plain-text report (§4.8).
//!
//! The exact textual format is not a normative contract; the section
//! ordering and the sort order within each section are.

use std::fmt::Write as _;

use crate::message_indexer::MessageIndexer;
use crate::message_indexer::MessageStats;
use crate::stats::ActionCounters;
use crate::stats::ConflictRow;
use crate::stats::StatsAggregator;

fn write_counters(out: &mut String, indent: &str, counters: &ActionCounters) {
    for action in crate::stats::ActionKind::ALL {
        let _ = writeln!(out, "{indent}{}: {}", action.as_str(), counters.get(action));
    }
}

fn write_message_stats(out: &mut String, indent: &str, stats: &MessageStats) {
    let mut terms: Vec<_> = stats.term.iter().collect();
    terms.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (term, count) in terms {
        let _ = writeln!(out, "{indent}term {term}: {count}");
    }

    let mut bigrams: Vec<_> = stats.bigram.iter().collect();
    bigrams.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for ((a, b), count) in bigrams {
        let _ = writeln!(out, "{indent}bigram {a} {b}: {count}");
    }

    let mut trigrams: Vec<_> = stats.trigram.iter().collect();
    trigrams.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for ((a, b, c), count) in trigrams {
        let _ = writeln!(out, "{indent}trigram {a} {b} {c}: {count}");
    }
}

fn sort_conflict_rows_desc(rows: &mut [ConflictRow]) {
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.editor.as_str().cmp(b.editor.as_str()))
            .then_with(|| a.original.as_str().cmp(b.original.as_str()))
    });
}

/// Renders the full report for `stats`/`messages` as described in §4.8.
pub fn render(stats: &StatsAggregator, messages: &MessageIndexer) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== global ==");
    write_counters(&mut out, "  ", stats.global());

    let _ = writeln!(out, "== authors ==");
    for (author, author_stats) in stats.author_stats() {
        let _ = writeln!(out, "-- {author} --");
        write_counters(&mut out, "  ", &author_stats.global);
        for (path, counters) in &author_stats.path {
            let _ = writeln!(out, "  -- {path} --");
            write_counters(&mut out, "    ", counters);
        }
    }

    let _ = writeln!(out, "== paths ==");
    for (path, path_stats) in stats.path_stats() {
        let _ = writeln!(out, "-- {path} --");
        write_counters(&mut out, "  ", &path_stats.global);
        for (author, counters) in &path_stats.author {
            let _ = writeln!(out, "  -- {author} --");
            write_counters(&mut out, "    ", counters);
        }
    }

    let _ = writeln!(out, "== conflicts ==");
    let mut rows = stats.conflict_rows();
    sort_conflict_rows_desc(&mut rows);
    for row in &rows {
        let _ = writeln!(
            out,
            "  {} <- {}: delete={} change={} total={}",
            row.editor, row.original, row.delete, row.change, row.total
        );
    }

    let _ = writeln!(out, "== conflicts made ==");
    let mut made: Vec<_> = stats.conflict_made().into_iter().collect();
    made.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    for (author, counters) in &made {
        let _ = writeln!(
            out,
            "  {author}: total={} self={} peer={}",
            counters.total, counters.self_total, counters.peer_total
        );
    }

    let _ = writeln!(out, "== conflicts received ==");
    let mut received: Vec<_> = stats.conflict_recv().into_iter().collect();
    received.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    for (author, counters) in &received {
        let _ = writeln!(
            out,
            "  {author}: total={} self={} peer={}",
            counters.total, counters.self_total, counters.peer_total
        );
    }

    let _ = writeln!(out, "== messages ==");
    write_message_stats(&mut out, "  ", messages.global());

    let _ = writeln!(out, "== messages by author ==");
    for (author, author_message_stats) in messages.author_stats() {
        let _ = writeln!(out, "-- {author} --");
        write_message_stats(&mut out, "  ", author_message_stats);
    }

    out
}
