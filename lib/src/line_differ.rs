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

//! Line-level opcode computation (§4.4).
//!
//! The engine only depends on opcode shape, not on which specific lines are
//! matched when multiple alignments exist, so any standard LCS-style
//! matcher works; this one delegates to the `similar` crate's Myers
//! implementation rather than hand-rolling one.

use similar::Algorithm;
use similar::DiffOp;
use similar::capture_diff_slices;

use crate::line::Line;

/// A single line-level diff instruction, covering `a[i1..i2]` and
/// `b[j1..j2]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    Equal { i1: usize, i2: usize, j1: usize, j2: usize },
    Insert { i1: usize, i2: usize, j1: usize, j2: usize },
    Delete { i1: usize, i2: usize, j1: usize, j2: usize },
    Replace { i1: usize, i2: usize, j1: usize, j2: usize },
}

/// Computes the opcode sequence between `a` and `b`, covering both slices
/// exhaustively and in order.
pub fn diff_opcodes(a: &[Line], b: &[Line]) -> Vec<Opcode> {
    capture_diff_slices(Algorithm::Myers, a, b)
        .into_iter()
        .map(|op| match op {
            DiffOp::Equal { old_index, new_index, len } => Opcode::Equal {
                i1: old_index,
                i2: old_index + len,
                j1: new_index,
                j2: new_index + len,
            },
            DiffOp::Delete { old_index, old_len, new_index } => Opcode::Delete {
                i1: old_index,
                i2: old_index + old_len,
                j1: new_index,
                j2: new_index,
            },
            DiffOp::Insert { old_index, new_index, new_len } => Opcode::Insert {
                i1: old_index,
                i2: old_index,
                j1: new_index,
                j2: new_index + new_len,
            },
            DiffOp::Replace { old_index, old_len, new_index, new_len } => Opcode::Replace {
                i1: old_index,
                i2: old_index + old_len,
                j1: new_index,
                j2: new_index + new_len,
            },
        })
        .collect()
}
