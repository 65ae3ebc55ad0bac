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

//! The `GpuBackend` capability contract (spec.md §4.H). Specified as an
//! abstract set of operations, not a GL binding, so the interpreter can run
//! against a recording mock in tests and `gfxscript-cli`'s headless demo.

/// Opaque handle newtypes. All are plain indices assigned by whatever
/// `GpuBackend` implementation is in use; the interpreter never inspects
/// their value, only stores and re-passes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttribLocation(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Result of `compile_shader`/`link_program`: a success flag plus whatever
/// the backend's compiler/linker printed, surfaced to the host `Logger`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompileLog
{
    pub success: bool,
    pub message: String
}

/// Uniform value shapes `set_uniform_*` accepts (spec.md §4.H table row).
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue
{
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat2([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16])
}

/// Thin contract wrapping shader compile/link, buffer/VBO/EBO,
/// texture/framebuffer, uniform upload, and draw (spec.md §4.H). No
/// threading guarantees are required beyond "invoked from a single
/// context-owning thread" — the trait is `&mut self` throughout rather than
/// `Send`/`Sync`.
pub trait GpuBackend
{
    fn create_program(&mut self) -> ProgramHandle;
    fn compile_shader(&mut self, program: ProgramHandle, vs_src: &str, fs_src: &str) -> CompileLog;
    fn link_program(&mut self, program: ProgramHandle) -> CompileLog;
    fn use_program(&mut self, program: ProgramHandle);

    fn create_buffer(&mut self) -> BufferHandle;
    fn create_index_buffer(&mut self) -> BufferHandle;
    fn bind_array(&mut self, buffer: BufferHandle);
    fn upload_array(&mut self, bytes: &[f32]);
    fn bind_elements(&mut self, buffer: BufferHandle);
    fn upload_elements(&mut self, indices: &[u32]);

    fn attrib_location(&mut self, program: ProgramHandle, name: &str) -> Option<AttribLocation>;
    fn set_attrib_pointer(&mut self, loc: AttribLocation, components: u32, stride: u32, offset: u32);
    fn enable_attrib(&mut self, loc: AttribLocation);

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;
    fn set_uniform(&mut self, loc: UniformLocation, value: UniformValue);

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextureHandle;
    fn bind_texture(&mut self, slot: u32, texture: TextureHandle);
    fn active_texture(&mut self, slot: u32);

    fn create_framebuffer(&mut self) -> FramebufferHandle;
    fn attach_color(&mut self, framebuffer: FramebufferHandle, texture: TextureHandle);
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>);

    fn clear(&mut self, rgb: [f32; 3]);
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);
    fn draw_arrays(&mut self, count: u32);
    fn draw_elements(&mut self, count: u32);
}
