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

//! Component I: per-frame orchestration (spec.md §2 control flow, §5
//! concurrency model). Single-threaded, cooperative: one [`Driver`] owns an
//! [`Interpreter`] and reparses only when told the source changed, mirroring
//! the editor's `code_changed` flag + ~60 Hz paint callback without requiring
//! an actual GUI host.

use std::collections::HashSet;

use gfxscript_lang::{ast::Program as AstProgram, parser};

use crate::{backend::GpuBackend, fs::FileSystem, image::ImageLoader, interpreter::Interpreter, logger::Logger};

/// What happened on the most recent `tick()`, so a host (or a test) can
/// assert on it without re-deriving state from the `Interpreter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome
{
    /// No reload was pending; only `loop` ran.
    LoopOnly,
    /// A reload ran (parse -> compile_program -> execute_init) and then `loop`.
    Reloaded,
    /// A reload ran but failed to parse; the previous program, if any, is
    /// left running untouched (spec.md §4.A "Error policy").
    ReloadFailed
}

/// Drives one [`Interpreter`] through the reload/frame cycle described by
/// spec.md §2 and §5. Owns the "does the source need reparsing" flag the
/// editor would otherwise set; `mark_changed`/`set_source` are how a host
/// (or `gfxscript-cli --watch`) signals that.
pub struct Driver<F>
{
    interpreter: Interpreter,
    fs: F,
    source_path: String,
    source: String,
    code_changed: bool,
    /// Guards against an `import` cycle re-entering itself during recursive
    /// resolution; spec.md doesn't define cycle behaviour explicitly, but an
    /// unbounded recursive load is clearly not intended.
    importing: HashSet<String>
}

impl<F: FileSystem> Driver<F>
{
    pub fn new(width: u32, height: u32, backend: Box<dyn GpuBackend>, logger: Box<dyn Logger>, images: Box<dyn ImageLoader>, fs: F, source_path: impl Into<String>, source: impl Into<String>) -> Self
    {
        Self {
            interpreter: Interpreter::new(width, height, backend, logger, images),
            fs,
            source_path: source_path.into(),
            source: source.into(),
            code_changed: true,
            importing: HashSet::new()
        }
    }

    pub fn interpreter(&self) -> &Interpreter
    {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter
    {
        &mut self.interpreter
    }

    /// Replaces the source buffer and arms a reload on the next `tick()`
    /// (the editor's `code_changed = true`).
    pub fn set_source(&mut self, path: impl Into<String>, source: impl Into<String>)
    {
        self.source_path = path.into();
        self.source = source.into();
        self.code_changed = true;
    }

    pub fn mark_changed(&mut self)
    {
        self.code_changed = true;
    }

    /// The per-frame entry point (spec.md §5): at most one reload when
    /// `code_changed` is set, then one `loop` invocation. Never panics on a
    /// malformed script; a parse failure just leaves the previous program
    /// (if any) running, per spec.md §4.A's error policy.
    pub fn tick(&mut self) -> TickOutcome
    {
        if self.code_changed {
            self.code_changed = false;
            match self.reload() {
                Ok(()) => {
                    self.run_loop();
                    return TickOutcome::Reloaded;
                },
                Err(e) => {
                    let span = gfxscript_lang::Span::point(e.line, e.col);
                    self.interpreter.log(crate::logger::LogLevel::Error, Some(span), &e.etype.to_string());
                    return TickOutcome::ReloadFailed;
                }
            }
        }
        self.run_loop();
        TickOutcome::LoopOnly
    }

    fn run_loop(&mut self)
    {
        if let Err(e) = self.interpreter.execute_loop() {
            self.interpreter.log(crate::logger::LogLevel::Error, e.span, &e.message);
        }
    }

    /// `reset()` then parse -> resolve imports -> compile_program ->
    /// execute_init (spec.md §3 Lifecycle, §2 control flow).
    fn reload(&mut self) -> Result<(), parser::Error>
    {
        self.interpreter.reset();
        self.importing.clear();
        let mut ast = gfxscript_lang::parse(&self.source)?;
        let root_dir = dir_of(&self.source_path);
        self.resolve_imports(&mut ast, &root_dir)?;
        self.interpreter.load_program(ast);
        self.interpreter.compile_program();
        if let Err(e) = self.interpreter.execute_init() {
            self.interpreter.log(crate::logger::LogLevel::Error, e.span, &e.message);
        }
        Ok(())
    }

    /// Recursively resolves every `import "path";` in `ast` (and everything
    /// those imports themselves import), merging each resolved module's
    /// tables into `ast` in declaration order (spec.md §2 "loads imports
    /// recursively", `ast::Program::merge`). `from_dir` is the directory of
    /// the file currently being resolved, relative to `self.fs`'s own root;
    /// each nested import is rebased against *its own* importer's directory
    /// via `fs::join_relative`, rather than always the top-level script's,
    /// consistent with spec.md §6's "relative to the script's directory,
    /// then CWD" rule applied at every import hop.
    fn resolve_imports(&mut self, ast: &mut AstProgram, from_dir: &str) -> Result<(), parser::Error>
    {
        let imports = ast.imports.clone();
        for path in imports {
            let resolved = crate::fs::join_relative(from_dir, &path);
            if !self.importing.insert(resolved.clone()) {
                continue;
            }
            let text = self.fs.read_to_string(&path, from_dir).unwrap_or_else(|e| {
                self.interpreter.log(crate::logger::LogLevel::Error, None, &format!("import '{}': {}", path, e));
                String::new()
            });
            if text.is_empty() {
                continue;
            }
            let mut imported = gfxscript_lang::parse(&text)?;
            self.resolve_imports(&mut imported, &dir_of(&resolved))?;
            ast.merge(imported);
        }
        Ok(())
    }
}

/// The directory component of `path`, relative to the same root `path`
/// itself is relative to; empty if `path` has none.
fn dir_of(path: &str) -> String
{
    std::path::Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{backend::*, fs::MemoryFileSystem, image::NullImageLoader, logger::NullLogger};

    #[derive(Default)]
    struct RecordingBackend
    {
        draw_calls: u32
    }

    impl GpuBackend for RecordingBackend
    {
        fn create_program(&mut self) -> ProgramHandle
        {
            ProgramHandle(1)
        }

        fn compile_shader(&mut self, _program: ProgramHandle, _vs_src: &str, _fs_src: &str) -> CompileLog
        {
            CompileLog { success: true, message: String::new() }
        }

        fn link_program(&mut self, _program: ProgramHandle) -> CompileLog
        {
            CompileLog { success: true, message: String::new() }
        }

        fn use_program(&mut self, _program: ProgramHandle) {}

        fn create_buffer(&mut self) -> BufferHandle
        {
            BufferHandle(1)
        }

        fn create_index_buffer(&mut self) -> BufferHandle
        {
            BufferHandle(2)
        }

        fn bind_array(&mut self, _buffer: BufferHandle) {}

        fn upload_array(&mut self, _bytes: &[f32]) {}

        fn bind_elements(&mut self, _buffer: BufferHandle) {}

        fn upload_elements(&mut self, _indices: &[u32]) {}

        fn attrib_location(&mut self, _program: ProgramHandle, _name: &str) -> Option<AttribLocation>
        {
            Some(AttribLocation(0))
        }

        fn set_attrib_pointer(&mut self, _loc: AttribLocation, _components: u32, _stride: u32, _offset: u32) {}

        fn enable_attrib(&mut self, _loc: AttribLocation) {}

        fn uniform_location(&mut self, _program: ProgramHandle, _name: &str) -> Option<UniformLocation>
        {
            Some(UniformLocation(0))
        }

        fn set_uniform(&mut self, _loc: UniformLocation, _value: UniformValue) {}

        fn create_texture(&mut self, _width: u32, _height: u32, _pixels: &[u8]) -> TextureHandle
        {
            TextureHandle(1)
        }

        fn bind_texture(&mut self, _slot: u32, _texture: TextureHandle) {}

        fn active_texture(&mut self, _slot: u32) {}

        fn create_framebuffer(&mut self) -> FramebufferHandle
        {
            FramebufferHandle(1)
        }

        fn attach_color(&mut self, _framebuffer: FramebufferHandle, _texture: TextureHandle) {}

        fn bind_framebuffer(&mut self, _framebuffer: Option<FramebufferHandle>) {}

        fn clear(&mut self, _rgb: [f32; 3]) {}

        fn viewport(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {}

        fn draw_arrays(&mut self, _count: u32)
        {
            self.draw_calls += 1;
        }

        fn draw_elements(&mut self, _count: u32)
        {
            self.draw_calls += 1;
        }
    }

    fn driver(source: &str) -> Driver<MemoryFileSystem>
    {
        Driver::new(100, 100, Box::new(RecordingBackend::default()), Box::new(NullLogger), Box::new(NullImageLoader), MemoryFileSystem::new(), "main.gfx", source)
    }

    #[test]
    fn reload_failure_reports_and_keeps_running()
    {
        let mut d = driver("func init( { broken");
        assert_eq!(d.tick(), TickOutcome::ReloadFailed);
    }

    #[test]
    fn tick_only_reloads_once_then_runs_loop_each_frame()
    {
        let mut d = driver("func init(){} func loop(){}");
        assert_eq!(d.tick(), TickOutcome::Reloaded);
        assert_eq!(d.tick(), TickOutcome::LoopOnly);
        assert_eq!(d.tick(), TickOutcome::LoopOnly);
    }

    #[test]
    fn mark_changed_forces_a_reload_on_the_next_tick()
    {
        let mut d = driver("func init(){} func loop(){}");
        d.tick();
        d.mark_changed();
        assert_eq!(d.tick(), TickOutcome::Reloaded);
    }

    #[test]
    fn import_is_merged_recursively()
    {
        let fs = MemoryFileSystem::new().with_file("util.gfx", "func helper(){ print(1); }");
        let mut d = Driver::new(
            100,
            100,
            Box::new(RecordingBackend::default()),
            Box::new(NullLogger),
            Box::new(NullImageLoader),
            fs,
            "main.gfx",
            "import \"util.gfx\"; func init(){ helper(); } func loop(){}"
        );
        assert_eq!(d.tick(), TickOutcome::Reloaded);
        assert!(d.interpreter().ast.functions.contains_key("helper"));
    }

    /// `main.gfx` imports `sub/mod.gfx`, which in turn imports `helper.gfx`
    /// meant to sit beside it in `sub/`, not beside `main.gfx`.
    #[test]
    fn nested_import_resolves_relative_to_its_own_importer()
    {
        let fs = MemoryFileSystem::new()
            .with_file("sub/mod.gfx", "import \"helper.gfx\"; func mid(){ helper(); }")
            .with_file("sub/helper.gfx", "func helper(){ print(1); }");
        let mut d = Driver::new(
            100,
            100,
            Box::new(RecordingBackend::default()),
            Box::new(NullLogger),
            Box::new(NullImageLoader),
            fs,
            "main.gfx",
            "import \"sub/mod.gfx\"; func init(){ mid(); } func loop(){}"
        );
        assert_eq!(d.tick(), TickOutcome::Reloaded);
        assert!(d.interpreter().ast.functions.contains_key("helper"));
        assert!(d.interpreter().ast.functions.contains_key("mid"));
    }
}
