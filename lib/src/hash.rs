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

//! Content fingerprinting, used only as a rename-promotion key.

use blake2::Blake2b512;
use blake2::Digest as _;

/// A fixed-length, collision-resistant fingerprint of a blob's bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ContentDigest([u8; 64]);

/// Fingerprints `bytes` for use as a rename-promotion bucket key.
///
/// This is the only place content hashing is used; it has no bearing on the
/// replayed line content itself.
pub fn hash_content(bytes: &[u8]) -> ContentDigest {
    let mut hasher = Blake2b512::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    ContentDigest(digest.into())
}
