// Diagnostic report rendering
//
//  Copyright (C) 2015-2022 The m2c Authors.
//
//  This file is part of m2c.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Rendering of diagnostic information.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines,
//     rather than using both.

use super::Diagnostic;
use crate::source::LineSource;
use std::fmt::Write as _;
use std::io;
use unicode_width::UnicodeWidthChar;

/// Destination of diagnostics.
pub trait Reporter {
    /// Report a diagnostic.
    ///
    /// `source` provides the text of the offending line for reporters
    ///   that echo it.
    ///
    /// This method _does not return [`Result`]_ and should never fail;
    ///   reporters that write to fallible sinks must retain the failure
    ///   for their owner to inspect.
    fn emit(&mut self, diagnostic: &Diagnostic, source: &dyn LineSource);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn emit(&mut self, diagnostic: &Diagnostic, source: &dyn LineSource) {
        (**self).emit(diagnostic, source)
    }
}

/// Render diagnostics as human-readable text.
///
/// When verbose,
///   each positioned diagnostic is followed by the offending source line
///   and a caret beneath the offending column,
///     unless the offending input is a control character.
///
/// Each diagnostic is rendered in full before being written,
///   so that output is not interleaved with that of concurrent processes.
pub struct VisualReporter<W: io::Write> {
    out: W,
    verbose: bool,
    error: Option<io::Error>,
}

impl<W: io::Write> VisualReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            error: None,
        }
    }

    /// Recover the sink,
    ///   failing with the first write error encountered,
    ///   if any.
    pub fn into_inner(self) -> Result<W, io::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn render(
        &self,
        diagnostic: &Diagnostic,
        source: &dyn LineSource,
    ) -> String {
        let mut report = diagnostic.to_string();
        report.push('\n');

        let echo = self.verbose && !diagnostic.is_control_char();

        if let (true, Some(pos)) = (echo, diagnostic.pos) {
            if let Some(line) = source.source_for_line(pos.line) {
                let _ = write!(
                    report,
                    "{line}\n{}^\n",
                    caret_indent(line.as_bytes(), pos.col)
                );
            }
        }

        report
    }
}

impl<W: io::Write> Reporter for VisualReporter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, source: &dyn LineSource) {
        let report = self.render(diagnostic, source);

        if let Err(e) = self.out.write_all(report.as_bytes()) {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

/// Whitespace placing a caret beneath column `col` of `line`.
///
/// Tabs are preserved so that the caret aligns regardless of tab width;
///   every other character is replaced by spaces of its display width.
fn caret_indent(line: &[u8], col: u32) -> String {
    let end = (col as usize).saturating_sub(1).min(line.len());

    String::from_utf8_lossy(&line[..end])
        .chars()
        .flat_map(|c| match c {
            '\t' => vec!['\t'],
            c => vec![' '; c.width().unwrap_or(0)],
        })
        .collect()
}

/// Retain diagnostics in emission order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Kinds of all diagnostics in emission order.
    pub fn kinds(&self) -> Vec<super::ErrorKind> {
        self.diagnostics.iter().map(|d| d.kind).collect()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for CollectingReporter {
    fn emit(&mut self, diagnostic: &Diagnostic, _source: &dyn LineSource) {
        self.diagnostics.push(diagnostic.clone());
    }
}

#[cfg(test)]
mod test;
