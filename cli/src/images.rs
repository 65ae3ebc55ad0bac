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

//! The real `ImageLoader` (spec.md §1 "ImageLoader capability: decode path ->
//! pixels/dimensions/channels"). Image decoding internals are an explicit
//! Non-goal of the core (spec.md §1); this crate is the external collaborator
//! that actually owns a decoder, using the `image` crate the way the rest of
//! this corpus reaches for it for asset decoding.

use std::path::PathBuf;

use gfxscript_runtime::image::{DecodedImage, ImageLoader};
use image::GenericImageView;

pub struct RealImageLoader
{
    script_dir: PathBuf
}

impl RealImageLoader
{
    pub fn new(script_dir: PathBuf) -> Self
    {
        Self { script_dir }
    }

    fn resolve(&self, path: &str) -> PathBuf
    {
        let beside_script = self.script_dir.join(path);
        if beside_script.is_file() {
            beside_script
        } else {
            PathBuf::from(path)
        }
    }
}

impl ImageLoader for RealImageLoader
{
    fn load(&self, path: &str) -> Result<DecodedImage, String>
    {
        let resolved = self.resolve(path);
        let img = image::open(&resolved).map_err(|e| format!("{}: {}", resolved.display(), e))?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        Ok(DecodedImage { width, height, channels: 4, pixels: rgba.into_raw() })
    }
}
