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

//! Line splitting.
//!
//! A line is a byte sequence obtained by splitting a blob on newline
//! separators; the separator itself is discarded and no re-encoding is
//! performed.

use std::fmt;

use bstr::ByteSlice as _;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Line(Vec<u8>);

impl Line {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_bstr(), f)
    }
}

/// Splits `bytes` into lines on `\n`, discarding the separator.
///
/// An empty input yields zero lines. A trailing newline does not produce a
/// final empty line, matching `str.splitlines()` semantics in the original
/// implementation this crate replays.
pub fn split_lines(bytes: &[u8]) -> Vec<Line> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let trimmed = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    trimmed.split(|&b| b == b'\n').map(|chunk| Line(chunk.to_vec())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_newline_and_drops_separator() {
        let lines = split_lines(b"x\ny\nz");
        assert_eq!(lines.iter().map(Line::as_bytes).collect::<Vec<_>>(), vec![
            b"x".as_slice(),
            b"y",
            b"z"
        ]);
    }

    #[test]
    fn trailing_newline_does_not_add_empty_line() {
        let lines = split_lines(b"x\ny\n");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn embedded_blank_lines_are_preserved() {
        let lines = split_lines(b"x\n\ny");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].as_bytes(), b"");
    }
}
