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

//! The `Logger` capability trait (spec.md §1/§6 component A). A host embeds
//! gfxscript by supplying one of these; the driver also forwards every
//! message to the `log` facade so nothing is lost if the host ignores its
//! own sink.

use std::fmt::{self, Display, Formatter};

use gfxscript_lang::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel
{
    Error,
    Warn,
    Info,
    Debug,
    Trace
}

impl LogLevel
{
    /// The `LABEL` half of spec §7's `LABEL at line L[-L2]: message` format.
    pub fn label(&self) -> &'static str
    {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace"
        }
    }

    fn to_log_level(self) -> log::Level
    {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace
        }
    }
}

impl Display for LogLevel
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.label())
    }
}

/// A host-supplied diagnostic sink. `gfxscript-cli`'s implementation writes
/// to stdout/stderr via `bp3d_logger`; tests use an in-memory recorder.
pub trait Logger
{
    fn log(&self, level: LogLevel, span: Option<Span>, message: &str);
}

/// Formats a diagnostic the way spec §7 prescribes, then hands it to both
/// the host `Logger` and the `log` facade (mirrors `shaderc`'s targets,
/// which return `Result`s *and* call `log::error!` along the way).
pub fn emit(logger: &dyn Logger, level: LogLevel, span: Option<Span>, message: &str)
{
    logger.log(level, span, message);
    let formatted = format_diagnostic(level, span, message);
    match level.to_log_level() {
        log::Level::Error => log::error!("{}", formatted),
        log::Level::Warn => log::warn!("{}", formatted),
        log::Level::Info => log::info!("{}", formatted),
        log::Level::Debug => log::debug!("{}", formatted),
        log::Level::Trace => log::trace!("{}", formatted)
    }
}

pub fn format_diagnostic(level: LogLevel, span: Option<Span>, message: &str) -> String
{
    match span {
        Some(span) if span.first_line == span.last_line => {
            format!("{} at line {}: {}", level.label(), span.first_line, message)
        },
        Some(span) => format!("{} at line {}-{}: {}", level.label(), span.first_line, span.last_line, message),
        None => format!("{}: {}", level.label(), message)
    }
}

/// A `Logger` that discards everything; useful as a default for headless
/// embedding where only the `log` facade matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger
{
    fn log(&self, _level: LogLevel, _span: Option<Span>, _message: &str) {}
}

#[cfg(test)]
mod tests
{
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder
    {
        messages: RefCell<Vec<String>>
    }

    impl Logger for Recorder
    {
        fn log(&self, level: LogLevel, span: Option<Span>, message: &str)
        {
            self.messages.borrow_mut().push(format_diagnostic(level, span, message));
        }
    }

    #[test]
    fn single_line_span_formats_without_a_range()
    {
        let span = Span::point(4, 1);
        assert_eq!(format_diagnostic(LogLevel::Error, Some(span), "bad stuff"), "error at line 4: bad stuff");
    }

    #[test]
    fn recorder_observes_emitted_messages()
    {
        let recorder = Recorder::default();
        emit(&recorder, LogLevel::Warn, None, "heads up");
        assert_eq!(recorder.messages.borrow()[0], "warning: heads up");
    }
}
