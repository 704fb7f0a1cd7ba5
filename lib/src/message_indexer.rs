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

//! Commit message cleanup and lexical indexing (§4.7).

use indexmap::IndexMap;
use itertools::Itertools as _;
use regex::Regex;

use crate::author::Author;

/// A compiled, ordered list of regex patterns applied (as empty-string
/// substitutions) to each message line before tokenisation.
///
/// The patterns themselves are an embedded, compile-time list (§10); this
/// type only owns the compiled form.
#[derive(Clone, Default)]
pub struct IgnorePatterns(Vec<Regex>);

impl IgnorePatterns {
    pub fn compile(patterns: &[&str]) -> Result<Self, regex::Error> {
        Ok(Self(patterns.iter().map(|p| Regex::new(p)).collect::<Result<_, _>>()?))
    }

    fn apply(&self, line: &str) -> String {
        let mut cleaned = line.to_owned();
        for pattern in &self.0 {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
        }
        cleaned
    }
}

/// Strips any line whose left-trimmed prefix is `git-svn-id`, joining the
/// remaining lines with `\n`.
pub fn clean_message(message: &str) -> String {
    message
        .lines()
        .filter(|line| !line.trim_start().starts_with("git-svn-id"))
        .join("\n")
}

fn token_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+|[^\w\s]+").unwrap())
}

/// Splits `line` into word-or-punctuation tokens, discarding any of length
/// at most one character.
fn tokenize(line: &str) -> Vec<String> {
    token_pattern()
        .find_iter(line)
        .map(|m| m.as_str().to_owned())
        .filter(|tok| tok.chars().count() > 1)
        .collect()
}

#[derive(Default, Debug)]
pub struct MessageStats {
    pub term: IndexMap<String, u64>,
    pub bigram: IndexMap<(String, String), u64>,
    pub trigram: IndexMap<(String, String, String), u64>,
}

impl MessageStats {
    fn index_line_tokens(&mut self, tokens: &[String]) {
        for token in tokens {
            *self.term.entry(token.clone()).or_insert(0) += 1;
        }
        for window in tokens.windows(2) {
            *self.bigram.entry((window[0].clone(), window[1].clone())).or_insert(0) += 1;
        }
        for window in tokens.windows(3) {
            *self
                .trigram
                .entry((window[0].clone(), window[1].clone(), window[2].clone()))
                .or_insert(0) += 1;
        }
    }
}

#[derive(Default)]
pub struct MessageIndexer {
    ignore_patterns: IgnorePatterns,
    global: MessageStats,
    author: IndexMap<Author, MessageStats>,
}

impl MessageIndexer {
    pub fn new(ignore_patterns: IgnorePatterns) -> Self {
        Self {
            ignore_patterns,
            global: MessageStats::default(),
            author: IndexMap::new(),
        }
    }

    pub fn global(&self) -> &MessageStats {
        &self.global
    }

    pub fn author_stats(&self) -> &IndexMap<Author, MessageStats> {
        &self.author
    }

    /// Indexes an already-cleaned commit `message` for `author`. N-grams do
    /// not span line boundaries.
    pub fn index(&mut self, author: &Author, message: &str) {
        let author_stats = self.author.entry(author.clone()).or_default();
        for line in message.lines() {
            let cleaned = self.ignore_patterns.apply(line);
            let tokens = tokenize(&cleaned);
            self.global.index_line_tokens(&tokens);
            author_stats.index_line_tokens(&tokens);
        }
    }
}
