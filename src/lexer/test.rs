// Tests for the Modula-2 lexer
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

use super::*;
use crate::diagnose::CollectingReporter;
use crate::test::{lex_all, lexer};
use ErrorKind as E;
use Token as T;

type Lexed = Vec<(Token, Option<String>)>;

fn lex(src: &str) -> (Lexed, Vec<ErrorKind>) {
    lex_all(src, Options::default())
}

fn lex_with(src: &str, flag: Flag, value: bool) -> (Lexed, Vec<ErrorKind>) {
    lex_all(src, Options::default().with_flag(flag, value))
}

fn tok(token: Token) -> (Token, Option<String>) {
    (token, None)
}

fn lexeme(token: Token, text: &str) -> (Token, Option<String>) {
    (token, Some(text.into()))
}

#[test]
fn tokenizes_program_module() {
    let (syms, errors) = lex("MODULE X; BEGIN a := 1 END X.");

    assert_eq!(
        vec![
            tok(T::Module),
            lexeme(T::Identifier, "X"),
            tok(T::Semicolon),
            tok(T::Begin),
            lexeme(T::Identifier, "a"),
            tok(T::Assign),
            lexeme(T::Integer, "1"),
            tok(T::End),
            lexeme(T::Identifier, "X"),
            tok(T::Period),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(Vec::<ErrorKind>::new(), errors);
}

#[test]
fn reserved_words() {
    for token in Token::ALL.iter().filter(|t| t.is_reserved_word()) {
        let text = token.lexeme().unwrap();
        let (syms, errors) = lex(text);

        assert_eq!(vec![tok(*token), tok(T::EndOfFile)], syms, "{text}");
        assert!(errors.is_empty());
    }
}

#[test]
fn identifiers_resembling_reserved_words() {
    let (syms, _) = lex("ANDY begin Begin END2");

    assert_eq!(
        vec![
            lexeme(T::Identifier, "ANDY"),
            lexeme(T::Identifier, "begin"),
            lexeme(T::Identifier, "Begin"),
            lexeme(T::Identifier, "END2"),
            tok(T::EndOfFile),
        ],
        syms
    );
}

#[test]
fn lowline_identifiers_enabled() {
    let (syms, errors) =
        lex_with("foo_bar a_b_c x_", Flag::LowlineInIdentifiers, true);

    assert_eq!(
        vec![
            lexeme(T::Identifier, "foo_bar"),
            lexeme(T::Identifier, "a_b_c"),
            lexeme(T::Identifier, "x"),
            tok(T::EndOfFile),
        ],
        syms
    );

    // The trailing lowline is not sandwiched between alphanumerics.
    assert_eq!(vec![E::InvalidInputChar], errors);
}

#[test]
fn lowline_identifiers_disabled() {
    let (syms, errors) =
        lex_with("foo_bar", Flag::LowlineInIdentifiers, false);

    assert_eq!(
        vec![
            lexeme(T::Identifier, "foo"),
            lexeme(T::Identifier, "bar"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::InvalidInputChar], errors);
}

#[test]
fn double_lowline_is_rejected() {
    let (syms, errors) = lex_with("a__b", Flag::LowlineInIdentifiers, true);

    assert_eq!(
        vec![
            lexeme(T::Identifier, "a"),
            lexeme(T::Identifier, "b"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::InvalidInputChar, E::InvalidInputChar], errors);
}

#[test]
fn special_symbols() {
    let (syms, errors) =
        lex("# ( ) * + , - . .. / := : ; <= < = >= > [ ] ^ { | }");

    let expected = [
        T::NotEqual,
        T::LParen,
        T::RParen,
        T::Asterisk,
        T::Plus,
        T::Comma,
        T::Minus,
        T::Period,
        T::Range,
        T::Solidus,
        T::Assign,
        T::Colon,
        T::Semicolon,
        T::LessOrEqual,
        T::Less,
        T::Equal,
        T::GreaterOrEqual,
        T::Greater,
        T::LBracket,
        T::RBracket,
        T::Deref,
        T::LBrace,
        T::Bar,
        T::RBrace,
        T::EndOfFile,
    ];

    assert_eq!(expected.iter().copied().map(tok).collect::<Lexed>(), syms);
    assert!(errors.is_empty());
}

#[test]
fn adjacent_symbols_without_whitespace() {
    let (syms, _) = lex("a[i]^.b:=c..d");

    assert_eq!(
        vec![
            lexeme(T::Identifier, "a"),
            tok(T::LBracket),
            lexeme(T::Identifier, "i"),
            tok(T::RBracket),
            tok(T::Deref),
            tok(T::Period),
            lexeme(T::Identifier, "b"),
            tok(T::Assign),
            lexeme(T::Identifier, "c"),
            tok(T::Range),
            lexeme(T::Identifier, "d"),
            tok(T::EndOfFile),
        ],
        syms
    );
}

#[test]
fn synonyms_enabled() {
    let (syms, errors) = lex_with("& ~ <>", Flag::Synonyms, true);

    assert_eq!(
        vec![tok(T::And), tok(T::Not), tok(T::NotEqual), tok(T::EndOfFile)],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn synonyms_disabled() {
    let (syms, errors) = lex_with("& ~ <>", Flag::Synonyms, false);

    assert_eq!(vec![tok(T::EndOfFile)], syms);
    assert_eq!(
        vec![E::InvalidInputChar, E::InvalidInputChar, E::InvalidInputChar],
        errors
    );
}

#[test]
fn suffix_base16() {
    let (syms, errors) = lex_with("0DEADH", Flag::PrefixLiterals, false);

    assert_eq!(
        vec![lexeme(T::Integer, "0DEADH"), tok(T::EndOfFile)],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn suffix_base16_missing_suffix() {
    let (syms, errors) = lex_with("0DEAD", Flag::PrefixLiterals, false);

    assert_eq!(
        vec![lexeme(T::MalformedInteger, "0DEAD"), tok(T::EndOfFile)],
        syms
    );
    assert_eq!(vec![E::MissingSuffix], errors);
}

#[test]
fn suffix_octal() {
    let (syms, errors) = lex("177B 101C 0B");

    assert_eq!(
        vec![
            lexeme(T::Integer, "177B"),
            lexeme(T::Char, "101C"),
            lexeme(T::Integer, "0B"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn suffix_octal_malformed() {
    // Decimal digit,
    //   letter not in last position,
    //   and more than one letter.
    let (syms, errors) = lex("19B 1B2 1BB");

    assert_eq!(
        vec![
            lexeme(T::MalformedInteger, "19B"),
            lexeme(T::MalformedInteger, "1B2"),
            lexeme(T::MalformedInteger, "1BB"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::MissingSuffix; 3], errors);
}

#[test]
fn suffix_octal_disabled() {
    let (syms, errors) = lex_with("177B", Flag::OctalLiterals, false);

    assert_eq!(
        vec![lexeme(T::MalformedInteger, "177B"), tok(T::EndOfFile)],
        syms
    );
    assert_eq!(vec![E::MissingSuffix], errors);
}

#[test]
fn prefix_base16() {
    let (syms, errors) =
        lex_with("0xDEAD 0u41 42", Flag::PrefixLiterals, true);

    assert_eq!(
        vec![
            lexeme(T::Integer, "0xDEAD"),
            lexeme(T::Char, "0u41"),
            lexeme(T::Integer, "42"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn prefix_disables_suffixes() {
    let (syms, _) = lex_with("7FH", Flag::PrefixLiterals, true);

    assert_eq!(
        vec![
            lexeme(T::Integer, "7"),
            lexeme(T::Identifier, "FH"),
            tok(T::EndOfFile),
        ],
        syms
    );
}

#[test]
fn real_numbers() {
    let (syms, errors) = lex("3.14 1.5E3 2.0E-7 6.E+2 10.");

    assert_eq!(
        vec![
            lexeme(T::Real, "3.14"),
            lexeme(T::Real, "1.5E3"),
            lexeme(T::Real, "2.0E-7"),
            lexeme(T::Real, "6.E+2"),
            lexeme(T::Real, "10."),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn real_missing_exponent() {
    for flag in [true, false] {
        let (syms, errors) = lex_with("1.5E+;", Flag::PrefixLiterals, flag);

        assert_eq!(
            vec![
                lexeme(T::MalformedReal, "1.5E+"),
                tok(T::Semicolon),
                tok(T::EndOfFile),
            ],
            syms
        );
        assert_eq!(vec![E::MissingExponent], errors);
    }
}

#[test]
fn integer_before_range() {
    for flag in [true, false] {
        let (syms, _) = lex_with("[0..9]", Flag::PrefixLiterals, flag);

        assert_eq!(
            vec![
                tok(T::LBracket),
                lexeme(T::Integer, "0"),
                tok(T::Range),
                lexeme(T::Integer, "9"),
                tok(T::RBracket),
                tok(T::EndOfFile),
            ],
            syms
        );
    }
}

#[test]
fn strings() {
    let (syms, errors) = lex(r#""it's" 'say "hi"' "" 'x'"#);

    assert_eq!(
        vec![
            lexeme(T::String, "it's"),
            lexeme(T::String, "say \"hi\""),
            lexeme(T::String, ""),
            lexeme(T::String, "x"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn string_at_eof() {
    let (syms, errors) = lex("\"abc");

    assert_eq!(
        vec![lexeme(T::MalformedString, "abc"), tok(T::EndOfFile)],
        syms
    );
    assert_eq!(vec![E::EofInString, E::MissingStringDelimiter], errors);
}

#[test]
fn string_with_newline() {
    let (syms, errors) = lex("'ab\nX");

    assert_eq!(
        vec![
            lexeme(T::MalformedString, "ab"),
            lexeme(T::Identifier, "X"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::NewlineInString, E::MissingStringDelimiter], errors);
}

#[test]
fn string_with_control_char() {
    let (syms, errors) = lex("\"a\tb\"");

    // The lexeme cannot be interned.
    assert_eq!(vec![tok(T::String), tok(T::EndOfFile)], syms);
    assert_eq!(vec![E::InvalidInputChar], errors);
}

#[test]
fn escape_sequences() {
    let (syms, errors) =
        lex_with(r#""a\nb\t\\" "\q""#, Flag::EscapeTabAndNewline, true);

    assert_eq!(
        vec![
            lexeme(T::String, r"a\nb\t\\"),
            lexeme(T::String, r"\q"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::InvalidEscapeSequence], errors);
}

#[test]
fn escaped_delimiter_does_not_close_string() {
    let (syms, errors) =
        lex_with(r#""a\\" x"#, Flag::EscapeTabAndNewline, true);

    assert_eq!(
        vec![
            lexeme(T::String, r"a\\"),
            lexeme(T::Identifier, "x"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn backslash_without_escapes() {
    let (syms, errors) =
        lex_with(r#""\q""#, Flag::EscapeTabAndNewline, false);

    assert_eq!(vec![lexeme(T::String, r"\q"), tok(T::EndOfFile)], syms);
    assert!(errors.is_empty());
}

#[test]
fn nested_block_comment() {
    let (syms, errors) = lex("(* outer (* inner *) still outer *) X");

    assert_eq!(vec![lexeme(T::Identifier, "X"), tok(T::EndOfFile)], syms);
    assert!(errors.is_empty());
}

#[test]
fn block_comment_spanning_lines() {
    let (syms, errors) = lex("(* one\n\ttwo *)\n(**)Y");

    assert_eq!(vec![lexeme(T::Identifier, "Y"), tok(T::EndOfFile)], syms);
    assert!(errors.is_empty());
}

#[test]
fn block_comment_at_eof() {
    let (syms, errors) = lex("A (* (* *)");

    assert_eq!(vec![lexeme(T::Identifier, "A"), tok(T::EndOfFile)], syms);
    assert_eq!(vec![E::EofInBlockComment], errors);
}

#[test]
fn block_comment_with_control_char() {
    let (syms, errors) = lex("(* \x07 *)");

    assert_eq!(vec![tok(T::EndOfFile)], syms);
    assert_eq!(vec![E::InvalidInputChar], errors);
}

#[test]
fn line_comments_enabled() {
    let (syms, errors) = lex_with("! note\nA", Flag::LineComments, true);

    assert_eq!(vec![lexeme(T::Identifier, "A"), tok(T::EndOfFile)], syms);
    assert!(errors.is_empty());
}

#[test]
fn line_comments_disabled() {
    let (syms, errors) = lex_with("! note\nA", Flag::LineComments, false);

    assert_eq!(
        vec![
            lexeme(T::Identifier, "note"),
            lexeme(T::Identifier, "A"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::InvalidInputChar], errors);
}

#[test]
fn pragma() {
    let (syms, errors) = lex("<*INLINE*> <* a, b *>");

    assert_eq!(
        vec![
            lexeme(T::Pragma, "INLINE"),
            lexeme(T::Pragma, " a, b "),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert!(errors.is_empty());
}

#[test]
fn pragma_at_eof() {
    let (syms, errors) = lex("<* open");

    assert_eq!(
        vec![lexeme(T::Pragma, " open"), tok(T::EndOfFile)],
        syms
    );
    assert_eq!(vec![E::EofInPragma], errors);
}

#[test]
fn disabled_code_section() {
    let mut reporter = CollectingReporter::new();
    let mut sut = lexer(
        "?<\nanything including (*comments*)\n>?\nX",
        Options::default(),
        &mut reporter,
    );

    assert_eq!(T::Identifier, sut.next_sym());
    assert_eq!(T::EndOfFile, sut.consume_sym());
    assert_eq!(1, sut.warning_count());
    assert_eq!(0, sut.error_count());

    drop(sut);

    assert_eq!(
        &[Diagnostic::at(E::DisabledCodeSection, Pos::new(1, 1))
            .with_detail(Detail::Lines { first: 1, last: 3 })],
        reporter.diagnostics()
    );
}

#[test]
fn disabled_code_requires_first_column() {
    let (syms, errors) = lex(" ?<");

    assert_eq!(vec![tok(T::Less), tok(T::EndOfFile)], syms);
    assert_eq!(vec![E::InvalidInputChar], errors);
}

#[test]
fn invalid_chars_are_skipped() {
    let (syms, errors) = lex("a $ b\x04c");

    assert_eq!(
        vec![
            lexeme(T::Identifier, "a"),
            lexeme(T::Identifier, "b"),
            lexeme(T::Identifier, "c"),
            tok(T::EndOfFile),
        ],
        syms
    );
    assert_eq!(vec![E::InvalidInputChar, E::InvalidInputChar], errors);
}

#[test]
fn positions_and_accessors() {
    let mut reporter = CollectingReporter::new();
    let mut sut = lexer("A\r\n  bc 12", Options::default(), &mut reporter);

    assert_eq!(T::Identifier, sut.next_sym());
    assert_eq!((1, 1), (sut.lookahead_line(), sut.lookahead_col()));
    assert_eq!(b"A", sut.lookahead_lexeme().unwrap().as_bytes());
    assert_eq!(None, sut.current_lexeme());

    assert_eq!(T::Identifier, sut.read_sym());
    assert_eq!((1, 1), (sut.current_line(), sut.current_col()));
    assert_eq!((2, 3), (sut.lookahead_line(), sut.lookahead_col()));
    assert_eq!(b"bc", sut.lookahead_lexeme().unwrap().as_bytes());

    assert_eq!(T::Integer, sut.consume_sym());
    assert_eq!(b"bc", sut.current_lexeme().unwrap().as_bytes());
    assert_eq!((2, 6), (sut.lookahead_line(), sut.lookahead_col()));

    assert_eq!(T::EndOfFile, sut.consume_sym());
    assert_eq!(T::EndOfFile, sut.consume_sym());
    assert_eq!(2, sut.line_count());
    assert_eq!("test.mod", sut.filename());
}

#[test]
fn lexemes_are_released_on_advance() {
    let mut reporter = CollectingReporter::new();
    let mut sut =
        lexer("uniqueone uniquetwo ;", Options::default(), &mut reporter);

    assert!(sym::intern(b"uniqueone").is_ok());
    let before = sym::live_count().unwrap();

    // Each lexeme is released once the symbol after it is consumed.
    sut.read_sym();
    sut.read_sym();
    sut.read_sym();

    assert_eq!(before - 1, sym::live_count().unwrap());
    assert_eq!(T::EndOfFile, sut.next_sym());
}

#[test]
fn counts_errors_and_warnings() {
    let mut reporter = CollectingReporter::new();
    let mut sut = lexer(
        "?<\n>?\n$ 0DEAD \"x",
        Options::default().with_flag(Flag::PrefixLiterals, false),
        &mut reporter,
    );

    while sut.read_sym() != T::EndOfFile {}

    assert_eq!(1, sut.warning_count());
    assert_eq!(4, sut.error_count());

    let reporter = sut.release();
    assert_eq!(5, reporter.diagnostics().len());
}

#[test]
fn malformed_literal_reported_at_symbol_start() {
    let mut reporter = CollectingReporter::new();
    let sut = lexer("  12AB", Options::default(), &mut reporter);

    drop(sut);

    assert_eq!(
        Some(Pos::new(1, 3)),
        reporter.diagnostics()[0].pos,
    );
}
