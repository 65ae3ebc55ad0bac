// Copyright (c) 2026, gfxscript contributors
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of the copyright holder nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! The `FileSystem` capability trait (spec.md §1, `import` resolution).
//! `gfxscript-cli` backs this with `std::fs`; tests can back it with an
//! in-memory map of path -> source.

use std::path::Path;

/// Resolves `import "path";` statements to source text. Kept as a trait
/// (rather than calling `std::fs` directly from the driver) so an embedding
/// host can serve imports from a virtual filesystem, a bundle, or a network
/// fetch, per spec.md's "FileSystem for `import` resolution" collaborator.
pub trait FileSystem
{
    /// `from_dir` is the directory containing the file whose `import`
    /// statement named `path`, relative to this `FileSystem`'s own root
    /// (empty for the top-level script). Each nested import is resolved
    /// against its own importer's directory this way, rather than always
    /// the top-level script's, mirroring spec.md §6's "relative to the
    /// script's directory, then CWD" rule applied at every import hop.
    fn read_to_string(&self, path: &str, from_dir: &str) -> std::io::Result<String>;
}

/// Lexically joins `from_dir` and `path` (no filesystem access), used by
/// every `FileSystem` implementation to rebase a nested import and by the
/// driver to compute the next hop's `from_dir`.
pub fn join_relative(from_dir: &str, path: &str) -> String
{
    if from_dir.is_empty() {
        path.to_string()
    } else {
        Path::new(from_dir).join(path).to_string_lossy().into_owned()
    }
}

/// A `FileSystem` backed by a fixed in-memory map, used by interpreter and
/// driver tests that exercise `import` without touching disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem
{
    files: std::collections::HashMap<String, String>
}

impl MemoryFileSystem
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self
    {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl FileSystem for MemoryFileSystem
{
    fn read_to_string(&self, path: &str, from_dir: &str) -> std::io::Result<String>
    {
        let joined = join_relative(from_dir, path);
        self.files
            .get(&joined)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, format!("no such import: {}", joined)))
    }
}
