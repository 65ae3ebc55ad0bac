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

//! A recording [`GpuBackend`] standing in for an actual OpenGL context
//! (spec.md §1 names the OpenGL context and its windowing host as an
//! explicit external collaborator / non-goal of the core). This is the same
//! kind of mock the design notes (§9) call for driving tests against, wired
//! up here so `gfxscript` can run a script headlessly and report what it
//! would have drawn, rather than needing a real GL context.

use std::{cell::RefCell, rc::Rc};

use gfxscript_runtime::backend::{
    AttribLocation,
    BufferHandle,
    CompileLog,
    FramebufferHandle,
    GpuBackend,
    ProgramHandle,
    TextureHandle,
    UniformLocation,
    UniformValue
};
use log::trace;

/// A cheaply-cloned handle onto a [`RecordingBackend`], so `main` can read
/// `draw_count`/`vertex_count` back after handing the backend's `Box<dyn
/// GpuBackend>` ownership off to the `Driver`.
#[derive(Clone, Default)]
pub struct SharedBackend(Rc<RefCell<RecordingBackend>>);

impl SharedBackend
{
    pub fn draw_count(&self) -> u64
    {
        self.0.borrow().draw_count
    }

    pub fn vertex_count(&self) -> u64
    {
        self.0.borrow().vertex_count
    }
}

macro_rules! forward {
    ($self:ident, $method:ident($($arg:ident),*)) => {
        $self.0.borrow_mut().$method($($arg),*)
    };
}

impl GpuBackend for SharedBackend
{
    fn create_program(&mut self) -> ProgramHandle
    {
        forward!(self, create_program())
    }

    fn compile_shader(&mut self, program: ProgramHandle, vs_src: &str, fs_src: &str) -> CompileLog
    {
        forward!(self, compile_shader(program, vs_src, fs_src))
    }

    fn link_program(&mut self, program: ProgramHandle) -> CompileLog
    {
        forward!(self, link_program(program))
    }

    fn use_program(&mut self, program: ProgramHandle)
    {
        forward!(self, use_program(program))
    }

    fn create_buffer(&mut self) -> BufferHandle
    {
        forward!(self, create_buffer())
    }

    fn create_index_buffer(&mut self) -> BufferHandle
    {
        forward!(self, create_index_buffer())
    }

    fn bind_array(&mut self, buffer: BufferHandle)
    {
        forward!(self, bind_array(buffer))
    }

    fn upload_array(&mut self, bytes: &[f32])
    {
        forward!(self, upload_array(bytes))
    }

    fn bind_elements(&mut self, buffer: BufferHandle)
    {
        forward!(self, bind_elements(buffer))
    }

    fn upload_elements(&mut self, indices: &[u32])
    {
        forward!(self, upload_elements(indices))
    }

    fn attrib_location(&mut self, program: ProgramHandle, name: &str) -> Option<AttribLocation>
    {
        forward!(self, attrib_location(program, name))
    }

    fn set_attrib_pointer(&mut self, loc: AttribLocation, components: u32, stride: u32, offset: u32)
    {
        forward!(self, set_attrib_pointer(loc, components, stride, offset))
    }

    fn enable_attrib(&mut self, loc: AttribLocation)
    {
        forward!(self, enable_attrib(loc))
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>
    {
        forward!(self, uniform_location(program, name))
    }

    fn set_uniform(&mut self, loc: UniformLocation, value: UniformValue)
    {
        forward!(self, set_uniform(loc, value))
    }

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextureHandle
    {
        forward!(self, create_texture(width, height, pixels))
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureHandle)
    {
        forward!(self, bind_texture(slot, texture))
    }

    fn active_texture(&mut self, slot: u32)
    {
        forward!(self, active_texture(slot))
    }

    fn create_framebuffer(&mut self) -> FramebufferHandle
    {
        forward!(self, create_framebuffer())
    }

    fn attach_color(&mut self, framebuffer: FramebufferHandle, texture: TextureHandle)
    {
        forward!(self, attach_color(framebuffer, texture))
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>)
    {
        forward!(self, bind_framebuffer(framebuffer))
    }

    fn clear(&mut self, rgb: [f32; 3])
    {
        forward!(self, clear(rgb))
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32)
    {
        forward!(self, viewport(x, y, width, height))
    }

    fn draw_arrays(&mut self, count: u32)
    {
        forward!(self, draw_arrays(count))
    }

    fn draw_elements(&mut self, count: u32)
    {
        forward!(self, draw_elements(count))
    }
}

#[derive(Default)]
pub struct RecordingBackend
{
    next_program: u32,
    next_buffer: u32,
    next_texture: u32,
    next_framebuffer: u32,
    pub draw_count: u64,
    pub vertex_count: u64
}

impl GpuBackend for RecordingBackend
{
    fn create_program(&mut self) -> ProgramHandle
    {
        self.next_program += 1;
        trace!("create_program -> {}", self.next_program);
        ProgramHandle(self.next_program)
    }

    fn compile_shader(&mut self, program: ProgramHandle, vs_src: &str, fs_src: &str) -> CompileLog
    {
        trace!("compile_shader({:?}):\n--- vertex ---\n{}\n--- fragment ---\n{}", program, vs_src, fs_src);
        CompileLog { success: true, message: String::new() }
    }

    fn link_program(&mut self, program: ProgramHandle) -> CompileLog
    {
        trace!("link_program({:?})", program);
        CompileLog { success: true, message: String::new() }
    }

    fn use_program(&mut self, program: ProgramHandle)
    {
        trace!("use_program({:?})", program);
    }

    fn create_buffer(&mut self) -> BufferHandle
    {
        self.next_buffer += 1;
        BufferHandle(self.next_buffer)
    }

    fn create_index_buffer(&mut self) -> BufferHandle
    {
        self.next_buffer += 1;
        BufferHandle(self.next_buffer)
    }

    fn bind_array(&mut self, buffer: BufferHandle)
    {
        trace!("bind_array({:?})", buffer);
    }

    fn upload_array(&mut self, bytes: &[f32])
    {
        trace!("upload_array({} floats)", bytes.len());
    }

    fn bind_elements(&mut self, buffer: BufferHandle)
    {
        trace!("bind_elements({:?})", buffer);
    }

    fn upload_elements(&mut self, indices: &[u32])
    {
        trace!("upload_elements({} indices)", indices.len());
    }

    fn attrib_location(&mut self, program: ProgramHandle, name: &str) -> Option<AttribLocation>
    {
        trace!("attrib_location({:?}, {})", program, name);
        Some(AttribLocation(fnv1a(name)))
    }

    fn set_attrib_pointer(&mut self, loc: AttribLocation, components: u32, stride: u32, offset: u32)
    {
        trace!("set_attrib_pointer({:?}, {}, {}, {})", loc, components, stride, offset);
    }

    fn enable_attrib(&mut self, loc: AttribLocation)
    {
        trace!("enable_attrib({:?})", loc);
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>
    {
        trace!("uniform_location({:?}, {})", program, name);
        Some(UniformLocation(fnv1a(name)))
    }

    fn set_uniform(&mut self, loc: UniformLocation, value: UniformValue)
    {
        trace!("set_uniform({:?}, {:?})", loc, value);
    }

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextureHandle
    {
        self.next_texture += 1;
        trace!("create_texture({}x{}, {} bytes) -> {}", width, height, pixels.len(), self.next_texture);
        TextureHandle(self.next_texture)
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureHandle)
    {
        trace!("bind_texture(slot {}, {:?})", slot, texture);
    }

    fn active_texture(&mut self, slot: u32)
    {
        trace!("active_texture({})", slot);
    }

    fn create_framebuffer(&mut self) -> FramebufferHandle
    {
        self.next_framebuffer += 1;
        FramebufferHandle(self.next_framebuffer)
    }

    fn attach_color(&mut self, framebuffer: FramebufferHandle, texture: TextureHandle)
    {
        trace!("attach_color({:?}, {:?})", framebuffer, texture);
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>)
    {
        trace!("bind_framebuffer({:?})", framebuffer);
    }

    fn clear(&mut self, rgb: [f32; 3])
    {
        trace!("clear({:?})", rgb);
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32)
    {
        trace!("viewport({}, {}, {}, {})", x, y, width, height);
    }

    fn draw_arrays(&mut self, count: u32)
    {
        trace!("draw_arrays({})", count);
        self.draw_count += 1;
        self.vertex_count += count as u64;
    }

    fn draw_elements(&mut self, count: u32)
    {
        trace!("draw_elements({})", count);
        self.draw_count += 1;
        self.vertex_count += count as u64;
    }
}

/// Attribute/uniform locations have no real backing GL state here; hashing
/// the name gives each one a stable, distinct value across calls within a
/// frame without needing a name -> location table.
fn fnv1a(s: &str) -> u32
{
    let mut hash: u32 = 0x811c9dc5;
    for b in s.as_bytes() {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(0x01000193);
    }
    hash
}
