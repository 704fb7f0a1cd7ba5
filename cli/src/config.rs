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

//! The embedded configuration surface (§10).
//!
//! There is no external configuration file or layering: the ignore
//! patterns §4.7 depends on are a compile-time list, compiled once at
//! startup into a typed [`IgnorePatterns`].

use provenance_core::message_indexer::IgnorePatterns;

/// Line-level noise patterns stripped before commit-message tokenisation.
/// `git-svn-id` trailers are handled separately by `clean_message`; these
/// catch the other common boilerplate this tool's original deployments
/// saw in the wild.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    r"^Signed-off-by:.*$",
    r"^Change-Id:\s*\S+$",
];

/// Compiles the built-in ignore patterns. The list is a fixed constant
/// known to be valid regex, so a compile failure here is a bug in this
/// file, not a runtime condition callers need to handle.
pub fn default_ignore_patterns() -> IgnorePatterns {
    IgnorePatterns::compile(DEFAULT_IGNORE_PATTERNS).expect("DEFAULT_IGNORE_PATTERNS are valid regex")
}
