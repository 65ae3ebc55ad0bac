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

//! Scenarios S1-S6 from spec.md §8, driven against a recording mock
//! [`GpuBackend`] (the exact testing strategy design notes §9 asks for).

use std::{cell::RefCell, rc::Rc};

use gfxscript_lang::Span;
use gfxscript_runtime::{
    backend::{
        AttribLocation,
        BufferHandle,
        CompileLog,
        FramebufferHandle,
        GpuBackend,
        ProgramHandle,
        TextureHandle,
        UniformLocation,
        UniformValue
    },
    glsl::{self, ShaderKind},
    image::{DecodedImage, ImageLoader, NullImageLoader},
    logger::{LogLevel, Logger},
    Interpreter
};

/// An `ImageLoader` that decodes any path to a fixed 1x1 RGBA pixel, for
/// scenarios that need `texture2D` assignment to succeed without touching
/// disk.
#[derive(Default)]
struct FakeImageLoader;

impl ImageLoader for FakeImageLoader
{
    fn load(&self, _path: &str) -> Result<DecodedImage, String>
    {
        Ok(DecodedImage { width: 1, height: 1, channels: 4, pixels: vec![255, 255, 255, 255] })
    }
}

#[derive(Default)]
struct Recorder
{
    messages: RefCell<Vec<String>>
}

impl Logger for Recorder
{
    fn log(&self, _level: LogLevel, _span: Option<Span>, message: &str)
    {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
struct MockBackend
{
    next_program: u32,
    next_buffer: u32,
    draw_arrays_calls: RefCell<Vec<u32>>,
    draw_elements_calls: RefCell<Vec<u32>>,
    use_program_calls: RefCell<Vec<ProgramHandle>>,
    set_uniform_calls: RefCell<Vec<(String, UniformValue)>>,
    uniform_names: RefCell<std::collections::HashMap<u32, String>>,
    active_texture_slots: RefCell<Vec<u32>>
}

impl GpuBackend for MockBackend
{
    fn create_program(&mut self) -> ProgramHandle
    {
        self.next_program += 1;
        ProgramHandle(self.next_program)
    }

    fn compile_shader(&mut self, _program: ProgramHandle, _vs_src: &str, _fs_src: &str) -> CompileLog
    {
        CompileLog { success: true, message: String::new() }
    }

    fn link_program(&mut self, _program: ProgramHandle) -> CompileLog
    {
        CompileLog { success: true, message: String::new() }
    }

    fn use_program(&mut self, program: ProgramHandle)
    {
        self.use_program_calls.borrow_mut().push(program);
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

    fn bind_array(&mut self, _buffer: BufferHandle) {}

    fn upload_array(&mut self, _bytes: &[f32]) {}

    fn bind_elements(&mut self, _buffer: BufferHandle) {}

    fn upload_elements(&mut self, _indices: &[u32]) {}

    fn attrib_location(&mut self, _program: ProgramHandle, _name: &str) -> Option<AttribLocation>
    {
        Some(AttribLocation(1))
    }

    fn set_attrib_pointer(&mut self, _loc: AttribLocation, _components: u32, _stride: u32, _offset: u32) {}

    fn enable_attrib(&mut self, _loc: AttribLocation) {}

    fn uniform_location(&mut self, _program: ProgramHandle, name: &str) -> Option<UniformLocation>
    {
        let id = self.uniform_names.borrow().len() as u32 + 1;
        self.uniform_names.borrow_mut().insert(id, name.to_string());
        Some(UniformLocation(id))
    }

    fn set_uniform(&mut self, loc: UniformLocation, value: UniformValue)
    {
        let name = self.uniform_names.borrow().get(&loc.0).cloned().unwrap_or_default();
        self.set_uniform_calls.borrow_mut().push((name, value));
    }

    fn create_texture(&mut self, _width: u32, _height: u32, _pixels: &[u8]) -> TextureHandle
    {
        TextureHandle(1)
    }

    fn bind_texture(&mut self, _slot: u32, _texture: TextureHandle) {}

    fn active_texture(&mut self, slot: u32)
    {
        self.active_texture_slots.borrow_mut().push(slot);
    }

    fn create_framebuffer(&mut self) -> FramebufferHandle
    {
        FramebufferHandle(1)
    }

    fn attach_color(&mut self, _framebuffer: FramebufferHandle, _texture: TextureHandle) {}

    fn bind_framebuffer(&mut self, _framebuffer: Option<FramebufferHandle>) {}

    fn clear(&mut self, _rgb: [f32; 3]) {}

    fn viewport(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {}

    fn draw_arrays(&mut self, count: u32)
    {
        self.draw_arrays_calls.borrow_mut().push(count);
    }

    fn draw_elements(&mut self, count: u32)
    {
        self.draw_elements_calls.borrow_mut().push(count);
    }
}

/// A cheaply-cloned handle onto a [`MockBackend`], so a test can keep
/// inspecting recorded calls after handing the backend's `Box<dyn
/// GpuBackend>` ownership off to the `Interpreter`. Mirrors
/// `gfxscript-cli`'s `SharedBackend`.
#[derive(Clone, Default)]
struct SharedMockBackend(Rc<RefCell<MockBackend>>);

macro_rules! forward {
    ($self:ident, $method:ident($($arg:ident),*)) => {
        $self.0.borrow_mut().$method($($arg),*)
    };
}

impl GpuBackend for SharedMockBackend
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

fn run(source: &str) -> (Interpreter, std::rc::Rc<Recorder>)
{
    let recorder = std::rc::Rc::new(Recorder::default());
    struct Forward(std::rc::Rc<Recorder>);
    impl Logger for Forward
    {
        fn log(&self, level: LogLevel, span: Option<Span>, message: &str)
        {
            self.0.log(level, span, message)
        }
    }
    let ast = gfxscript_lang::parse(source).expect("source parses");
    let mut interp = Interpreter::new(100, 100, Box::new(MockBackend::default()), Box::new(Forward(recorder.clone())), Box::new(NullImageLoader));
    interp.load_program(ast);
    interp.compile_program();
    interp.execute_init().expect("init runs");
    (interp, recorder)
}

#[test]
fn s1_hello()
{
    let (_interp, recorder) = run(r#"func init(){ print("hi"); } func loop(){}"#);
    assert_eq!(recorder.messages.borrow().as_slice(), ["hi"]);
}

#[test]
fn s2_arith()
{
    let (_interp, recorder) = run(r#"func init(){ print(1+2); print(3/2); print(|[1.0,2.0,2.0]|); } func loop(){}"#);
    assert_eq!(recorder.messages.borrow().as_slice(), ["3", "1.500000", "3.000000"]);
}

const PASSTHROUGH_SHADERS: &str = r#"
vertex simple {
    input vec3 pos;
    func main() {
        FinalPosition = pos;
    }
}
fragment simple {
    func main() {
    }
}
"#;

#[test]
fn s3_upload_and_draw_issues_one_draw_arrays_per_frame()
{
    let source = format!(
        r#"
{shaders}
buffer b;
func init() {{
    upload b.pos <- {{[-1.0,-1.0,0.0], [1.0,-1.0,0.0], [0.0,1.0,0.0]}};
}}
func loop() {{
    clear [0,0,0];
    draw b using simple;
}}
"#,
        shaders = PASSTHROUGH_SHADERS
    );
    let ast = gfxscript_lang::parse(&source).expect("source parses");
    let backend = SharedMockBackend::default();
    let mut interp = Interpreter::new(100, 100, Box::new(backend.clone()), Box::new(Recorder::default()), Box::new(NullImageLoader));
    interp.load_program(ast);
    interp.compile_program();
    interp.execute_init().expect("init runs");
    interp.execute_loop().expect("loop runs");
    interp.execute_loop().expect("loop runs");
    assert_eq!(backend.0.borrow().draw_arrays_calls.borrow().as_slice(), [3, 3]);
    assert!(backend.0.borrow().draw_elements_calls.borrow().is_empty());
}

#[test]
fn s4_uniform_upload_selects_program_then_sets_uniform()
{
    let source = r#"
vertex p {
    func main() { FinalPosition = [0.0,0.0,0.0,1.0]; }
}
fragment p {
    uniform vec3 color;
    func main() { }
}
func init() {
}
func loop() {
    p.color = [1.0, 0.5, 0.25];
}
"#;
    let ast = gfxscript_lang::parse(source).expect("source parses");
    let backend = SharedMockBackend::default();
    let mut interp = Interpreter::new(100, 100, Box::new(backend.clone()), Box::new(Recorder::default()), Box::new(NullImageLoader));
    interp.load_program(ast);
    interp.compile_program();
    interp.execute_init().expect("init runs");
    interp.execute_loop().expect("loop runs");
    assert_eq!(backend.0.borrow().use_program_calls.borrow().len(), 1);
    let uniform_calls = backend.0.borrow().set_uniform_calls.borrow().clone();
    assert_eq!(uniform_calls.len(), 1);
    assert_eq!(uniform_calls[0].0, "color");
    match uniform_calls[0].1 {
        UniformValue::Vec3(v) => assert_eq!(v, [1.0, 0.5, 0.25]),
        ref other => panic!("expected Vec3, got {:?}", other)
    }
}

#[test]
fn s5_final_position_aliases_to_gl_position_and_is_omitted_from_outputs()
{
    let source = r#"
vertex p {
    output vec2 uv;
    func main() {
        uv = [0.5, 0.5];
        FinalPosition = [0.0, 0.0, 0.0, 1.0];
    }
}
fragment p {
    func main() { }
}
"#;
    let ast = gfxscript_lang::parse(source).expect("source parses");
    let pair = ast.shaders.get("p").expect("shader pair exists");
    let vertex = pair.vertex.as_ref().expect("vertex half exists");
    let glsl = glsl::transpile(vertex, &ast.layouts, ShaderKind::Vertex).expect("vertex transpiles");
    assert!(glsl.contains("gl_Position = vec4(0.0, 0.0, 0.0, 1.0);"));
    assert!(!glsl.contains("out vec4 FinalPosition"));
    assert!(glsl.contains("out vec2 uv;"));
}

#[test]
fn s6_two_texture_uniforms_bind_to_sequential_slots()
{
    let source = r#"
vertex p {
    func main() { FinalPosition = [0.0,0.0,0.0,1.0]; }
}
fragment p {
    uniform texture2D tex;
    uniform texture2D mask;
    func main() { }
}
func init() {
    p.tex = "a.png";
    p.mask = "m.png";
}
func loop() {
}
"#;
    let ast = gfxscript_lang::parse(source).expect("source parses");
    let backend = SharedMockBackend::default();
    let mut interp = Interpreter::new(100, 100, Box::new(backend.clone()), Box::new(Recorder::default()), Box::new(FakeImageLoader));
    interp.load_program(ast);
    interp.compile_program();
    interp.execute_init().expect("init runs");
    assert_eq!(backend.0.borrow().active_texture_slots.borrow().as_slice(), [0, 1]);
}
