// Dialect and feature options
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

//! Dialect and feature options.
//!
//! [`Options`] is a vector of boolean [`Flag`]s that parameterises the
//!   lexer and the parser.
//! Flags are either _dialect_ flags,
//!   which change the language accepted,
//!   or _diagnostic_ flags,
//!     which change only what is reported.
//!
//! Two dialect bundles are provided,
//!   [`Options::pim3`] and [`Options::pim4`],
//!   corresponding to the third and fourth editions of
//!   _Programming in Modula-2_.
//! The default is the PIM4 bundle.
//!
//! Command Line
//! ============
//! [`process_args`] interprets command line arguments of the form
//!   `sourcefile [option...]`.
//! Each dialect flag has a long option `--name` and its negation
//!   `--no-name`.
//! Selecting a bundle with `--pim3` or `--pim4` locks out every other
//!   dialect option,
//!     and using any other dialect option locks out the bundles;
//!       diagnostic flags are never locked out.
//! All offending arguments are reported,
//!   not just the first.

use crate::diagnose::{Diagnostic, ErrorKind};
use std::fmt::{self, Debug};

/// A boolean option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Verbose,
    Synonyms,
    LineComments,
    PrefixLiterals,
    OctalLiterals,
    EscapeTabAndNewline,
    SubtypeCardinals,
    SafeStringTermination,
    ErrantSemicolon,
    LowlineInIdentifiers,
    ConstParameters,
    AdditionalTypes,
    UnifiedConversion,
    UnifiedCast,
    Coroutines,
    VariantRecords,
    LocalModules,
    LexerDebug,
    ParserDebug,
}

impl Flag {
    pub const COUNT: usize = Self::ParserDebug as usize + 1;

    pub const ALL: [Flag; Self::COUNT] = {
        use Flag::*;
        [
            Verbose,
            Synonyms,
            LineComments,
            PrefixLiterals,
            OctalLiterals,
            EscapeTabAndNewline,
            SubtypeCardinals,
            SafeStringTermination,
            ErrantSemicolon,
            LowlineInIdentifiers,
            ConstParameters,
            AdditionalTypes,
            UnifiedConversion,
            UnifiedCast,
            Coroutines,
            VariantRecords,
            LocalModules,
            LexerDebug,
            ParserDebug,
        ]
    };

    /// Identifier of this flag,
    ///   as recorded in the syntax tree.
    pub fn name(self) -> &'static str {
        use Flag::*;

        match self {
            Verbose => "verbose",
            Synonyms => "synonyms",
            LineComments => "line-comments",
            PrefixLiterals => "prefix-literals",
            OctalLiterals => "octal-literals",
            EscapeTabAndNewline => "escape-tab-and-newline",
            SubtypeCardinals => "subtype-cardinals",
            SafeStringTermination => "safe-string-termination",
            ErrantSemicolon => "errant-semicolon",
            LowlineInIdentifiers => "lowline-identifiers",
            ConstParameters => "const-parameters",
            AdditionalTypes => "additional-types",
            UnifiedConversion => "unified-conversion",
            UnifiedCast => "unified-cast",
            Coroutines => "coroutines",
            VariantRecords => "variant-records",
            LocalModules => "local-modules",
            LexerDebug => "lexer-debug",
            ParserDebug => "parser-debug",
        }
    }

    /// Description for command line help.
    pub fn description(self) -> &'static str {
        use Flag::*;

        match self {
            Verbose => "echo offending source lines in diagnostics",
            Synonyms => "accept `&`, `~` and `<>` as synonyms",
            LineComments => "accept `!` line comments",
            PrefixLiterals => {
                "use prefix number literals (0x, 0u); \
                 --suffix-literals selects suffix literals"
            }
            OctalLiterals => "accept octal B and C suffix literals",
            EscapeTabAndNewline => "interpret \\t and \\n in strings",
            SubtypeCardinals => "treat CARDINAL as a subtype of INTEGER",
            SafeStringTermination => "require terminated string values",
            ErrantSemicolon => "warn about superfluous semicolons",
            LowlineInIdentifiers => "accept `_` within identifiers",
            ConstParameters => "accept CONST formal parameters",
            AdditionalTypes => "provide additional built-in types",
            UnifiedConversion => "use a single conversion function",
            UnifiedCast => "use a single cast function",
            Coroutines => "provide coroutines",
            VariantRecords => "accept variant records",
            LocalModules => "accept local modules",
            LexerDebug => "trace lexer symbols to standard error",
            ParserDebug => "trace parser productions to standard error",
        }
    }

    /// Whether this flag changes the language accepted.
    ///
    /// Only dialect flags are subject to bundle lockout.
    pub fn is_dialect(self) -> bool {
        !matches!(
            self,
            Self::Verbose
                | Self::ErrantSemicolon
                | Self::LexerDebug
                | Self::ParserDebug
        )
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.name() == name)
    }
}

/// Option values.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Options {
    flags: [bool; Flag::COUNT],
}

impl Options {
    /// Options with every flag off.
    const fn none() -> Self {
        Self {
            flags: [false; Flag::COUNT],
        }
    }

    fn with(mut self, flags: &[Flag]) -> Self {
        flags.iter().for_each(|&flag| self.set(flag, true));
        self
    }

    /// Dialect flags common to both bundles.
    fn pim_common() -> Self {
        use Flag::*;

        Self::none().with(&[
            Synonyms,
            OctalLiterals,
            Coroutines,
            VariantRecords,
            LocalModules,
        ])
    }

    /// PIM third edition bundle.
    pub fn pim3() -> Self {
        Self::pim_common()
    }

    /// PIM fourth edition bundle.
    pub fn pim4() -> Self {
        use Flag::*;
        Self::pim_common().with(&[SubtypeCardinals, SafeStringTermination])
    }

    #[inline]
    pub fn get(&self, flag: Flag) -> bool {
        self.flags[flag as usize]
    }

    #[inline]
    pub fn set(&mut self, flag: Flag, value: bool) {
        self.flags[flag as usize] = value;
    }

    /// Copy of `self` with `flag` set to `value`.
    pub fn with_flag(mut self, flag: Flag, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    /// Flags that are on,
    ///   in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.iter().copied().filter(|&flag| self.get(flag))
    }

    /// Whether the dialect flags of `self` and `other` agree.
    pub fn same_dialect(&self, other: &Options) -> bool {
        Flag::ALL
            .iter()
            .filter(|flag| flag.is_dialect())
            .all(|&flag| self.get(flag) == other.get(flag))
    }

    /// Replace every dialect flag with that of `bundle`,
    ///   retaining diagnostic flags.
    fn load_dialect(&mut self, bundle: &Options) {
        Flag::ALL
            .iter()
            .filter(|flag| flag.is_dialect())
            .for_each(|&flag| self.set(flag, bundle.get(flag)));
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::pim4()
    }
}

impl Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.enabled().map(Flag::name))
            .finish()
    }
}

/// Action requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Compile { path: String, options: Options },
    Help,
    Version,
}

/// Bundle lockout state during argument processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lock {
    Open,
    Bundle,
    Dialect,
}

/// Interpret command line arguments,
///   the first of which is the program name.
///
/// Every invalid argument is reported;
///   processing fails after all arguments have been examined.
pub fn process_args<S: AsRef<str>>(
    args: &[S],
) -> Result<Command, Vec<Diagnostic>> {
    let args = args.iter().map(|arg| arg.as_ref()).collect::<Vec<&str>>();

    let path = match args.get(1..) {
        Some(["-h" | "--help"]) => return Ok(Command::Help),
        Some(["-V" | "--version"]) => return Ok(Command::Version),
        Some([path, ..]) if !path.starts_with('-') => path.to_string(),
        _ => return Err(vec![Diagnostic::new(ErrorKind::MissingFilename)]),
    };

    let mut options = Options::default();
    let mut lock = Lock::Open;
    let mut errors = Vec::new();

    for &arg in &args[2..] {
        if let Err(kind) = process_arg(arg, &mut options, &mut lock) {
            errors.push(Diagnostic::new(kind).with_text(arg));
        }
    }

    if errors.is_empty() {
        Ok(Command::Compile { path, options })
    } else {
        Err(errors)
    }
}

fn process_arg(
    arg: &str,
    options: &mut Options,
    lock: &mut Lock,
) -> Result<(), ErrorKind> {
    let bundle = match arg {
        "--pim3" => Some(Options::pim3()),
        "--pim4" => Some(Options::pim4()),
        _ => None,
    };

    if let Some(bundle) = bundle {
        if *lock != Lock::Open {
            return Err(ErrorKind::InvalidOption);
        }

        options.load_dialect(&bundle);
        *lock = Lock::Bundle;
        return Ok(());
    }

    let (flag, value) = match arg {
        "-v" => (Flag::Verbose, true),
        "--suffix-literals" => (Flag::PrefixLiterals, false),
        _ => match arg.strip_prefix("--") {
            Some(name) => parse_long(name).ok_or(ErrorKind::InvalidOption)?,
            None => return Err(ErrorKind::InvalidArgument),
        },
    };

    if flag.is_dialect() {
        if *lock == Lock::Bundle {
            return Err(ErrorKind::InvalidOption);
        }
        *lock = Lock::Dialect;
    }

    if flag == Flag::OctalLiterals && value && options.get(Flag::PrefixLiterals)
    {
        return Err(ErrorKind::InvalidOption);
    }

    options.set(flag, value);
    Ok(())
}

fn parse_long(name: &str) -> Option<(Flag, bool)> {
    match name.strip_prefix("no-") {
        Some(negated) => Flag::from_name(negated).map(|flag| (flag, false)),
        None => Flag::from_name(name).map(|flag| (flag, true)),
    }
}

/// Usage text for `program`,
///   generated from the flag table.
pub fn usage(program: &str) -> String {
    let mut opts = getopts::Options::new();

    opts.optflag("h", "help", "print this help menu and exit");
    opts.optflag("V", "version", "print version information and exit");
    opts.optflag("", "pim3", "select the PIM third edition dialect");
    opts.optflag("", "pim4", "select the PIM fourth edition dialect");

    for flag in Flag::ALL {
        let short = if flag == Flag::Verbose { "v" } else { "" };
        opts.optflag(short, flag.name(), flag.description());
    }

    opts.usage(&format!(
        "Usage: {program} SOURCEFILE [OPTIONS]\n\n\
         SOURCEFILE must end in .def or .mod.  \
         Each option --NAME may be negated as --no-NAME."
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use Flag::*;

    fn args(rest: &[&str]) -> Vec<String> {
        std::iter::once("m2c")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    fn compile_opts(rest: &[&str]) -> Options {
        match process_args(&args(rest)) {
            Ok(Command::Compile { options, .. }) => options,
            other => panic!("expected compile: {other:?}"),
        }
    }

    fn error_kinds(rest: &[&str]) -> Vec<ErrorKind> {
        match process_args(&args(rest)) {
            Err(diagnostics) => diagnostics.iter().map(|d| d.kind).collect(),
            other => panic!("expected errors: {other:?}"),
        }
    }

    #[test]
    fn default_is_pim4() {
        assert_eq!(Options::pim4(), Options::default());
    }

    #[test]
    fn bundles_differ_only_in_cardinals_and_strings() {
        let pim3 = Options::pim3();
        let pim4 = Options::pim4();

        for flag in Flag::ALL {
            let differs =
                matches!(flag, SubtypeCardinals | SafeStringTermination);
            assert_eq!(differs, pim3.get(flag) != pim4.get(flag), "{flag:?}");
        }

        assert!(pim3.get(Coroutines) && pim3.get(LocalModules));
        assert!(!pim4.get(PrefixLiterals));
        assert!(!pim4.get(Verbose));
    }

    #[test]
    fn pim_bundle_selection_equals_bundle() {
        assert!(compile_opts(&["--pim3"]).same_dialect(&Options::pim3()));
        assert!(compile_opts(&["--pim4"]).same_dialect(&Options::pim4()));
    }

    #[test]
    fn bundle_retains_diagnostic_flags() {
        let opts = compile_opts(&["-v", "--pim3", "--parser-debug"]);

        assert!(opts.get(Verbose));
        assert!(opts.get(ParserDebug));
        assert!(opts.same_dialect(&Options::pim3()));
    }

    #[test]
    fn missing_filename() {
        assert_eq!(vec![ErrorKind::MissingFilename], error_kinds(&[]));
        assert_eq!(
            vec![ErrorKind::MissingFilename],
            error_kinds(&["--synonyms"])
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(Ok(Command::Help), process_args(&args(&["-h"])));
        assert_eq!(Ok(Command::Help), process_args(&args(&["--help"])));
        assert_eq!(Ok(Command::Version), process_args(&args(&["-V"])));
        assert_eq!(Ok(Command::Version), process_args(&args(&["--version"])));
    }

    #[test]
    fn compile_with_flags() {
        let result = process_args(&args(&[
            "Foo.mod",
            "--line-comments",
            "--no-synonyms",
            "--lowline-identifiers",
        ]));

        let expected = Options::default()
            .with_flag(LineComments, true)
            .with_flag(Synonyms, false)
            .with_flag(LowlineInIdentifiers, true);

        assert_eq!(
            Ok(Command::Compile {
                path: "Foo.mod".into(),
                options: expected,
            }),
            result
        );
    }

    #[test]
    fn bundle_locks_out_dialect_options() {
        assert_eq!(
            vec![ErrorKind::InvalidOption, ErrorKind::InvalidOption],
            error_kinds(&["Foo.mod", "--pim3", "--pim4", "--synonyms"])
        );
    }

    #[test]
    fn dialect_option_locks_out_bundles() {
        assert_eq!(
            vec![ErrorKind::InvalidOption],
            error_kinds(&["Foo.mod", "--no-coroutines", "--pim4"])
        );
    }

    #[test]
    fn diagnostic_flags_never_locked() {
        let opts = compile_opts(&[
            "Foo.mod",
            "--pim4",
            "--errant-semicolon",
            "--lexer-debug",
            "--verbose",
        ]);

        assert!(opts.get(ErrantSemicolon));
        assert!(opts.get(LexerDebug));
        assert!(opts.get(Verbose));
    }

    #[test]
    fn octal_literals_requires_suffix_literals() {
        assert_eq!(
            vec![ErrorKind::InvalidOption],
            error_kinds(&["Foo.mod", "--prefix-literals", "--octal-literals"])
        );

        let opts = compile_opts(&[
            "Foo.mod",
            "--prefix-literals",
            "--suffix-literals",
            "--octal-literals",
        ]);
        assert!(!opts.get(PrefixLiterals));
        assert!(opts.get(OctalLiterals));

        // Disabling is always permitted.
        let opts = compile_opts(&[
            "Foo.mod",
            "--prefix-literals",
            "--no-octal-literals",
        ]);
        assert!(!opts.get(OctalLiterals));
    }

    #[test]
    fn accumulates_invalid_options_and_arguments() {
        let result = process_args(&args(&[
            "Foo.mod",
            "--bogus",
            "-x",
            "stray",
            "--no-",
        ]));

        let diagnostics = result.unwrap_err();

        assert_eq!(
            vec![
                ErrorKind::InvalidOption,
                ErrorKind::InvalidArgument,
                ErrorKind::InvalidArgument,
                ErrorKind::InvalidOption,
            ],
            diagnostics.iter().map(|d| d.kind).collect::<Vec<_>>()
        );
        assert_eq!(
            "error: invalid option: --bogus",
            diagnostics[0].to_string()
        );
    }

    #[test]
    fn usage_lists_every_flag() {
        let usage = usage("m2c");

        assert!(usage.starts_with("Usage: m2c SOURCEFILE [OPTIONS]"));
        for flag in Flag::ALL {
            assert!(usage.contains(&format!("--{}", flag.name())), "{flag:?}");
        }
        assert!(usage.contains("--pim3"));
    }

    #[test]
    fn enabled_flags_in_order() {
        let opts = Options::pim3().with_flag(Verbose, true);

        assert_eq!(
            vec![
                Verbose,
                Synonyms,
                OctalLiterals,
                Coroutines,
                VariantRecords,
                LocalModules
            ],
            opts.enabled().collect::<Vec<_>>()
        );
    }
}
