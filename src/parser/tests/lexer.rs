use crate::parser::{Lexer, LexerError, SourcePosition, Spanning, Token};

fn tokenize_to_vec(s: &str) -> Vec<Spanning<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexer::new(s);

    loop {
        match lexer.next() {
            Some(Ok(t)) => {
                let at_eof = t.item == Token::EndOfFile;
                tokens.push(t);
                if at_eof {
                    break;
                }
            }
            Some(Err(e)) => panic!("Error in input stream: {e:#?} for {s:#?}"),
            None => panic!("EOF before EndOfFile token in {s:#?}"),
        }
    }

    tokens
}

fn tokenize_single(s: &str) -> Spanning<Token<'_>> {
    let mut tokens = tokenize_to_vec(s);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].item, Token::EndOfFile);

    tokens.remove(0)
}

fn tokenize_error(s: &str) -> Spanning<LexerError> {
    let mut lexer = Lexer::new(s);

    loop {
        match lexer.next() {
            Some(Ok(t)) => {
                if t.item == Token::EndOfFile {
                    panic!("Tokenizer did not return error for {s:#?}");
                }
            }
            Some(Err(e)) => {
                return e;
            }
            None => panic!("Tokenizer did not return error for {s:#?}"),
        }
    }
}

#[test]
fn empty_source() {
    assert_eq!(
        tokenize_to_vec(""),
        vec![Spanning::zero_width(
            &SourcePosition::new_origin(),
            Token::EndOfFile,
        )]
    );
}

#[test]
fn disallows_control_codes() {
    assert_eq!(
        Lexer::new("\u{0007}").next(),
        Some(Err(Spanning::zero_width(
            &SourcePosition::new_origin(),
            LexerError::UnknownCharacter('\u{0007}')
        )))
    );
}

#[test]
fn skips_whitespace_and_commas() {
    assert_eq!(
        tokenize_to_vec(",,,foo,,,"),
        vec![
            Spanning::start_end(
                &SourcePosition::new(3, 0, 3),
                &SourcePosition::new(6, 0, 6),
                Token::Name("foo"),
            ),
            Spanning::zero_width(&SourcePosition::new(9, 0, 9), Token::EndOfFile),
        ]
    );
}

#[test]
fn skips_comments() {
    assert_eq!(
        tokenize_to_vec("#comment\nfoo#comment"),
        vec![
            Spanning::start_end(
                &SourcePosition::new(9, 1, 0),
                &SourcePosition::new(12, 1, 3),
                Token::Name("foo"),
            ),
            Spanning::zero_width(&SourcePosition::new(20, 1, 11), Token::EndOfFile),
        ]
    );
}

#[test]
fn tracks_line_breaks() {
    assert_eq!(
        tokenize_to_vec("foo\nbar"),
        vec![
            Spanning::start_end(
                &SourcePosition::new(0, 0, 0),
                &SourcePosition::new(3, 0, 3),
                Token::Name("foo"),
            ),
            Spanning::start_end(
                &SourcePosition::new(4, 1, 0),
                &SourcePosition::new(7, 1, 3),
                Token::Name("bar"),
            ),
            Spanning::zero_width(&SourcePosition::new(7, 1, 3), Token::EndOfFile),
        ]
    );
}

#[test]
fn error_positions() {
    assert_eq!(
        tokenize_error("\n\n?"),
        Spanning::zero_width(
            &SourcePosition::new(2, 2, 0),
            LexerError::UnknownCharacter('?'),
        )
    );
}

#[test]
fn names() {
    assert_eq!(
        tokenize_single("simple"),
        Spanning::start_end(
            &SourcePosition::new(0, 0, 0),
            &SourcePosition::new(6, 0, 6),
            Token::Name("simple"),
        )
    );

    assert_eq!(tokenize_single("_underscored").item, Token::Name("_underscored"));
    assert_eq!(tokenize_single("with_123_digits").item, Token::Name("with_123_digits"));
}

#[test]
fn keywords_stay_names() {
    assert_eq!(tokenize_single("query").item, Token::Name("query"));
    assert_eq!(tokenize_single("mutation").item, Token::Name("mutation"));
    assert_eq!(tokenize_single("fragment").item, Token::Name("fragment"));
    assert_eq!(tokenize_single("on").item, Token::Name("on"));
}

#[test]
fn boolean_and_null_words() {
    assert_eq!(tokenize_single("true").item, Token::Boolean(true));
    assert_eq!(tokenize_single("false").item, Token::Boolean(false));
    assert_eq!(tokenize_single("null").item, Token::Null);

    // Only the exact words are special.
    assert_eq!(tokenize_single("truely").item, Token::Name("truely"));
    assert_eq!(tokenize_single("nullable").item, Token::Name("nullable"));
}

#[test]
fn integers() {
    assert_eq!(tokenize_single("0").item, Token::Int("0"));
    assert_eq!(tokenize_single("42").item, Token::Int("42"));
    assert_eq!(tokenize_single("-43").item, Token::Int("-43"));
    assert_eq!(tokenize_single("-0").item, Token::Int("-0"));
}

#[test]
fn floats() {
    assert_eq!(tokenize_single("1.23").item, Token::Float("1.23"));
    assert_eq!(tokenize_single("-1.23").item, Token::Float("-1.23"));
    assert_eq!(tokenize_single("1e5").item, Token::Float("1e5"));
    assert_eq!(tokenize_single("1E5").item, Token::Float("1E5"));
    assert_eq!(tokenize_single("1e-5").item, Token::Float("1e-5"));
    assert_eq!(tokenize_single("1e+5").item, Token::Float("1e+5"));
    assert_eq!(tokenize_single("0.5").item, Token::Float("0.5"));
}

#[test]
fn float_token_carries_the_lexeme() {
    assert_eq!(
        tokenize_single("2.5e10"),
        Spanning::start_end(
            &SourcePosition::new(0, 0, 0),
            &SourcePosition::new(6, 0, 6),
            Token::Float("2.5e10"),
        )
    );
}

#[test]
fn number_errors() {
    assert_eq!(
        tokenize_error("00").item,
        LexerError::UnexpectedCharacter('0')
    );
    assert_eq!(tokenize_error("1.").item, LexerError::UnexpectedEndOfFile);
    assert_eq!(
        tokenize_error("1.A").item,
        LexerError::UnexpectedCharacter('A')
    );
    assert_eq!(tokenize_error("1e").item, LexerError::UnexpectedEndOfFile);
    assert_eq!(
        tokenize_error("1.2e-").item,
        LexerError::UnexpectedEndOfFile
    );
    assert_eq!(tokenize_error("+5").item, LexerError::UnknownCharacter('+'));
}

#[test]
fn strings() {
    assert_eq!(
        tokenize_single(r#""simple""#).item,
        Token::String("simple".into())
    );
    assert_eq!(
        tokenize_single(r#"" white space ""#).item,
        Token::String(" white space ".into())
    );
    assert_eq!(
        tokenize_single(r#""quote \"""#).item,
        Token::String("quote \"".into())
    );
    assert_eq!(
        tokenize_single(r#""escaped \n\r\b\t\f""#).item,
        Token::String("escaped \n\r\u{0008}\t\u{000c}".into())
    );
    assert_eq!(
        tokenize_single(r#""slashes \\ \/""#).item,
        Token::String("slashes \\ /".into())
    );
    assert_eq!(
        tokenize_single(r#""unicode é""#).item,
        Token::String("unicode \u{00e9}".into())
    );
}

#[test]
fn string_errors() {
    assert_eq!(
        tokenize_error(r#""no end"#).item,
        LexerError::UnterminatedString
    );
    assert_eq!(
        tokenize_error("\"line\nbreak\"").item,
        LexerError::UnterminatedString
    );
    assert_eq!(
        tokenize_error(r#""bad escape \x""#).item,
        LexerError::UnknownEscapeSequence("\\x".into())
    );
    assert_eq!(
        tokenize_error(r#""bad unicode \uXYZA""#).item,
        LexerError::UnknownEscapeSequence("\\uXYZA".into())
    );
}

#[test]
fn ellipsis() {
    assert_eq!(
        tokenize_single("..."),
        Spanning::start_end(
            &SourcePosition::new(0, 0, 0),
            &SourcePosition::new(3, 0, 3),
            Token::Ellipsis,
        )
    );
}

#[test]
fn lone_dots_are_errors() {
    assert_eq!(tokenize_error(".").item, LexerError::UnexpectedEndOfFile);
    assert_eq!(tokenize_error("..").item, LexerError::UnexpectedEndOfFile);
    assert_eq!(
        tokenize_error(". .").item,
        LexerError::UnexpectedCharacter('.')
    );
}

#[test]
fn punctuation() {
    assert_eq!(tokenize_single("!").item, Token::ExclamationMark);
    assert_eq!(tokenize_single("$").item, Token::Dollar);
    assert_eq!(tokenize_single("(").item, Token::ParenOpen);
    assert_eq!(tokenize_single(")").item, Token::ParenClose);
    assert_eq!(tokenize_single("[").item, Token::BracketOpen);
    assert_eq!(tokenize_single("]").item, Token::BracketClose);
    assert_eq!(tokenize_single("{").item, Token::CurlyOpen);
    assert_eq!(tokenize_single("}").item, Token::CurlyClose);
    assert_eq!(tokenize_single(":").item, Token::Colon);
    assert_eq!(tokenize_single("=").item, Token::Equals);
    assert_eq!(tokenize_single("@").item, Token::At);
    assert_eq!(tokenize_single("|").item, Token::Pipe);
}

#[test]
fn display_is_the_source_form() {
    assert_eq!(Token::Name("foo").to_string(), "foo");
    assert_eq!(Token::Int("42").to_string(), "42");
    assert_eq!(Token::Float("2.5e10").to_string(), "2.5e10");
    assert_eq!(Token::String("a\"b".into()).to_string(), "\"a\\\"b\"");
    assert_eq!(Token::Boolean(false).to_string(), "false");
    assert_eq!(Token::Null.to_string(), "null");
    assert_eq!(Token::Ellipsis.to_string(), "...");
}
