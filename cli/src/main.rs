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

//! `gfxscript` — spec.md §6 CLI surface: a single positional argument, the
//! path to a `.gfx` script opened at startup. Since the OpenGL context and
//! its windowing host are explicit external collaborators (spec.md §1), this
//! binary drives the interpreter against [`backend::RecordingBackend`] and
//! reports what it would have drawn, the way `shaderc`'s binaries report
//! compiled targets without ever opening a GPU context themselves.

mod backend;
mod fs;
mod images;
mod logger;

use std::{path::Path, thread, time::Duration};

use clap::{Arg, Command};
use gfxscript_runtime::driver::{Driver, TickOutcome};
use log::{error, info, LevelFilter};

use crate::{backend::SharedBackend, fs::RealFileSystem, images::RealImageLoader, logger::StdoutLogger};

fn alloc_verbosity_level(verbosity: u64)
{
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    log::set_max_level(level);
}

fn main()
{
    let matches = Command::new("gfxscript")
        .author("gfxscript contributors")
        .about("Runs a gfxscript (.gfx) program headlessly: parses, transpiles its shaders to GLSL, links them against a recording GpuBackend, then executes init once and loop per frame.")
        .version("0.1.0")
        .arg(Arg::new("verbose").short('v').long("verbose").multiple_occurrences(true).help("Enable verbose diagnostic output (repeatable)"))
        .arg(Arg::new("watch").short('w').long("watch").help("Re-run init+loop whenever the script file's mtime changes, modelling the editor's code_changed flag"))
        .arg(Arg::new("frames").short('n').long("frames").takes_value(true).default_value("1").help("Number of loop ticks to run before exiting (ignored with --watch)"))
        .arg(Arg::new("width").long("width").takes_value(true).default_value("1280").help("Value bound to the WIDTH implicit constant"))
        .arg(Arg::new("height").long("height").takes_value(true).default_value("720").help("Value bound to the HEIGHT implicit constant"))
        .arg(Arg::new("script").required(true).help("Path to the .gfx script to run"))
        .get_matches();

    alloc_verbosity_level(matches.occurrences_of("verbose"));
    let res = bp3d_logger::Logger::new().add_stdout().run(|| run(matches));
    std::process::exit(res);
}

fn run(matches: clap::ArgMatches) -> i32
{
    let script_path = Path::new(matches.value_of("script").expect("required"));
    let source = match std::fs::read_to_string(script_path) {
        Ok(s) => s,
        Err(e) => {
            error!("could not read '{}': {}", script_path.display(), e);
            return 1;
        }
    };
    let script_dir = script_path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
    let width: u32 = matches.value_of_t("width").unwrap_or(1280);
    let height: u32 = matches.value_of_t("height").unwrap_or(720);
    let watch = matches.is_present("watch");
    let frames: u64 = if watch { u64::MAX } else { matches.value_of_t("frames").unwrap_or(1) };

    let backend = SharedBackend::default();
    let mut driver = Driver::new(
        width,
        height,
        Box::new(backend.clone()),
        Box::new(StdoutLogger),
        Box::new(RealImageLoader::new(script_dir.clone())),
        RealFileSystem::new(script_dir),
        script_path.display().to_string(),
        source
    );

    info!("running '{}' ({}x{})", script_path.display(), width, height);
    let mut last_mtime = script_path.metadata().and_then(|m| m.modified()).ok();
    let mut ran_with_error = false;
    for frame in 0..frames {
        if watch && frame > 0 {
            thread::sleep(Duration::from_millis(16));
            if let Ok(mtime) = script_path.metadata().and_then(|m| m.modified()) {
                if Some(mtime) != last_mtime {
                    last_mtime = Some(mtime);
                    match std::fs::read_to_string(script_path) {
                        Ok(source) => driver.set_source(script_path.display().to_string(), source),
                        Err(e) => error!("could not re-read '{}': {}", script_path.display(), e)
                    }
                }
            }
        }
        if matches!(driver.tick(), TickOutcome::ReloadFailed) {
            ran_with_error = true;
        }
    }

    info!("{} draw call(s), {} vertices total", backend.draw_count(), backend.vertex_count());
    if ran_with_error {
        1
    } else {
        0
    }
}
