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

//! The real-disk `FileSystem` (spec.md §1 "FileSystem for `import`
//! resolution", §6 "resolved first against the script's directory, then
//! CWD" — the same search order spec.md prescribes for image assets).

use std::path::PathBuf;

use gfxscript_runtime::fs::FileSystem;

pub struct RealFileSystem
{
    script_dir: PathBuf
}

impl RealFileSystem
{
    pub fn new(script_dir: PathBuf) -> Self
    {
        Self { script_dir }
    }
}

impl FileSystem for RealFileSystem
{
    fn read_to_string(&self, path: &str, from_dir: &str) -> std::io::Result<String>
    {
        let beside_importer = self.script_dir.join(from_dir).join(path);
        if beside_importer.is_file() {
            return std::fs::read_to_string(beside_importer);
        }
        let beside_script = self.script_dir.join(path);
        if beside_script.is_file() {
            return std::fs::read_to_string(beside_script);
        }
        std::fs::read_to_string(path)
    }
}
