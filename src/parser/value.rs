use crate::ast::InputValue;
use crate::parser::{ParseError, ParseResult, Parser, Spanning, Token};

pub fn parse_value_literal<'a>(parser: &mut Parser<'a>, is_const: bool) -> ParseResult<InputValue> {
    match *parser.peek() {
        Spanning {
            item: Token::BracketOpen,
            ..
        } => parse_list_literal(parser, is_const),
        Spanning {
            item: Token::CurlyOpen,
            ..
        } => parse_object_literal(parser, is_const),
        Spanning {
            item: Token::Dollar,
            ..
        } if !is_const => parse_variable_literal(parser),
        Spanning {
            item: Token::Int(_),
            ..
        } => {
            let token = parser.next_token()?;
            if let Token::Int(lexeme) = token.item {
                match lexeme.parse::<i64>() {
                    Ok(i) => Ok(Spanning::new(token.span, InputValue::int(i))),
                    Err(_) => Err(Spanning::new(token.span, ParseError::InvalidNumber)),
                }
            } else {
                panic!("Internal parse error in `parse_value_literal`");
            }
        }
        Spanning {
            item: Token::Float(_),
            ..
        } => {
            let token = parser.next_token()?;
            if let Token::Float(lexeme) = token.item {
                match lexeme.parse::<f64>() {
                    Ok(f) => Ok(Spanning::new(token.span, InputValue::float(f))),
                    Err(_) => Err(Spanning::new(token.span, ParseError::InvalidNumber)),
                }
            } else {
                panic!("Internal parse error in `parse_value_literal`");
            }
        }
        Spanning {
            item: Token::String(_),
            ..
        } => {
            let token = parser.next_token()?;
            if let Token::String(s) = token.item {
                Ok(Spanning::new(token.span, InputValue::String(s)))
            } else {
                panic!("Internal parse error in `parse_value_literal`");
            }
        }
        Spanning {
            item: Token::Boolean(b),
            ..
        } => Ok(parser.next_token()?.map(|_| InputValue::boolean(b))),
        Spanning {
            item: Token::Null, ..
        } => Ok(parser.next_token()?.map(|_| InputValue::null())),
        Spanning {
            item: Token::Name(name),
            ..
        } => Ok(parser.next_token()?.map(|_| InputValue::enum_value(name))),
        _ => Err(parser.next_token()?.map(ParseError::unexpected_token)),
    }
}

fn parse_list_literal<'a>(parser: &mut Parser<'a>, is_const: bool) -> ParseResult<InputValue> {
    Ok(parser
        .delimited_list(
            &Token::BracketOpen,
            |p| parse_value_literal(p, is_const),
            &Token::BracketClose,
        )?
        .map(InputValue::parsed_list))
}

fn parse_object_literal<'a>(parser: &mut Parser<'a>, is_const: bool) -> ParseResult<InputValue> {
    Ok(parser
        .delimited_list(
            &Token::CurlyOpen,
            |p| parse_object_field(p, is_const),
            &Token::CurlyClose,
        )?
        .map(|items| InputValue::parsed_object(items.into_iter().map(|s| s.item).collect())))
}

fn parse_object_field<'a>(
    parser: &mut Parser<'a>,
    is_const: bool,
) -> ParseResult<(Spanning<String>, Spanning<InputValue>)> {
    let key = parser.expect_name()?;

    parser.expect(&Token::Colon)?;

    let value = parse_value_literal(parser, is_const)?;
    let end = value.span.end;

    Ok(Spanning::start_end(
        &key.span.start,
        &end,
        (key.map(String::from), value),
    ))
}

fn parse_variable_literal<'a>(parser: &mut Parser<'a>) -> ParseResult<InputValue> {
    let start_pos = parser.expect(&Token::Dollar)?.span.start;
    let name = parser.expect_name()?;

    Ok(Spanning::start_end(
        &start_pos,
        &name.span.end,
        InputValue::variable(name.item),
    ))
}
