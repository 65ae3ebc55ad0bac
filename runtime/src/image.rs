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

//! The `ImageLoader` capability trait (spec.md §1/§4.F E.12: `texture2D <-
//! string` loads the path through this). Image decoding itself is an
//! explicit non-goal of the core; `gfxscript-cli` backs this with the
//! `image` crate.

/// Decoded image data, always normalized to 8-bit-per-channel RGBA before it
/// reaches the interpreter, so `Texture::channels` is uniform across
/// backends.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage
{
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub pixels: Vec<u8>
}

pub trait ImageLoader
{
    fn load(&self, path: &str) -> Result<DecodedImage, String>;
}

/// An `ImageLoader` that always fails; used where a script never assigns a
/// string to a `texture2D` and a real decoder would be unused weight.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullImageLoader;

impl ImageLoader for NullImageLoader
{
    fn load(&self, path: &str) -> Result<DecodedImage, String>
    {
        Err(format!("no ImageLoader configured, cannot decode '{}'", path))
    }
}
