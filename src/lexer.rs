use crate::error::Error;
use crate::token::{Op, Token, NEGATE_PRECEDENCE};
use crate::util::is_function;
use std::iter::Peekable;
use std::str::Chars;

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    previous: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(string: &'a str) -> Lexer<'a> {
        Lexer {
            input: string.chars().peekable(),
            previous: None,
        }
    }

    /// Tokenize the whole input and reorder it in reverse polish notation with
    /// the Shunting-Yard algorithm.
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        let mut operators = Vec::new();
        let mut expect_call = false;

        'tokens: while let Some(token) = self.next_token()? {
            if expect_call && token != Token::LParen {
                return Err(Error::ParseError("expected '(' after function name".into()));
            }
            expect_call = false;

            match token {
                Token::Name(ref name) if is_function(name) => {
                    operators.push(token.clone());
                    expect_call = true;
                }
                Token::Number(_) | Token::Name(_) => output.push(token),
                // prefix operators never pop anything
                Token::Negate => operators.push(token),
                Token::Op(o1) => {
                    'operators: while let Some(top) = operators.last().cloned() {
                        let p2 = match top {
                            Token::Op(o2) => o2.precedence(),
                            Token::Negate => NEGATE_PRECEDENCE,
                            _ => break 'operators,
                        };
                        let pop_me = o1.is_left_associative() && o1.precedence() <= p2;
                        let pop_me = pop_me || o1.is_right_associative() && o1.precedence() < p2;
                        if pop_me {
                            operators.pop();
                            output.push(top);
                        } else {
                            break 'operators;
                        }
                    }
                    operators.push(token)
                }
                Token::LParen => operators.push(token),
                Token::RParen => {
                    while let Some(token) = operators.pop() {
                        match token {
                            Token::LParen => {
                                let next_is_fn = matches!(
                                    operators.last(),
                                    Some(Token::Name(name)) if is_function(name)
                                );
                                if next_is_fn {
                                    if let Some(function) = operators.pop() {
                                        output.push(function);
                                    }
                                }
                                continue 'tokens;
                            }
                            Token::Op(_) | Token::Negate => output.push(token),
                            other => {
                                return Err(Error::ParseError(format!(
                                    "unexpected {:?} in operators stack",
                                    other
                                )))
                            }
                        }
                    }
                    return Err(Error::ParseError("mismatched parenthesis".into()));
                }
            }
        }

        if expect_call {
            return Err(Error::ParseError("expected '(' after function name".into()));
        }

        while let Some(token) = operators.pop() {
            match token {
                Token::LParen => return Err(Error::ParseError("mismatched parenthesis".into())),
                Token::Op(_) | Token::Negate => output.push(token),
                other => {
                    return Err(Error::ParseError(format!(
                        "unexpected {:?} in operators stack",
                        other
                    )))
                }
            }
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        let token = self.read_token()?;
        self.previous = token.clone();
        Ok(token)
    }

    /// A sign is a prefix operator when nothing that ends an operand precedes it
    fn sign_is_prefix(&self) -> bool {
        matches!(
            self.previous,
            None | Some(Token::Op(_)) | Some(Token::Negate) | Some(Token::LParen)
        )
    }

    /// Read an exponent suffix like `e20` or `e-7` after a number literal, as
    /// printed for large results. Nothing is consumed unless a digit follows
    /// the `e` and its optional sign, so `2e` stays a number and a name.
    fn read_exponent(&mut self) -> Option<String> {
        let mut ahead = self.input.clone();
        let mut exponent = String::new();
        match ahead.next() {
            Some(c @ ('e' | 'E')) => exponent.push(c),
            _ => return None,
        }
        if let Some(&sign @ ('+' | '-')) = ahead.peek() {
            ahead.next();
            exponent.push(sign);
        }
        while let Some(&c) = ahead.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            ahead.next();
            exponent.push(c);
        }
        if !exponent.ends_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        self.input = ahead;
        Some(exponent)
    }

    fn read_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(c) = self.input.next() {
            let token = match c {
                ' ' | '\t' | '\n' | '\r' => continue,
                c if is_number_part(c) => {
                    let mut literal = String::new();
                    literal.push(c);
                    while let Some(&c) = self.input.peek() {
                        if !is_number_part(c) {
                            break;
                        }
                        self.input.next();
                        literal.push(c);
                    }
                    if let Some(exponent) = self.read_exponent() {
                        literal.push_str(&exponent);
                    }
                    let number = literal
                        .parse()
                        .map_err(|_| Error::ParseError(format!("invalid number {}", literal)))?;
                    Token::Number(number)
                }
                c if is_name_start(c) => {
                    let mut name = String::new();
                    name.push(c);
                    while let Some(&c) = self.input.peek() {
                        if !is_name_part(c) {
                            break;
                        }
                        self.input.next();
                        name.push(c);
                    }
                    Token::Name(name)
                }
                '+' if self.sign_is_prefix() => continue,
                '+' => Token::Op(Op::Plus),
                '-' if self.sign_is_prefix() => Token::Negate,
                '-' => Token::Op(Op::Minus),
                '*' => {
                    if self.input.peek() == Some(&'*') {
                        self.input.next();
                        Token::Op(Op::Exp)
                    } else {
                        Token::Op(Op::Mul)
                    }
                }
                '/' => Token::Op(Op::Div),
                '(' => Token::LParen,
                ')' => Token::RParen,
                other => {
                    return Err(Error::ParseError(format!(
                        "unexpected character in input: {}",
                        other
                    )));
                }
            };
            return Ok(Some(token));
        }
        Ok(None)
    }
}

/// Check if `c` can appear in a number literal
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Check if `c` can appear at the first character of a name
fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Check if `c` can appear inside a name
fn is_name_part(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Op, Token};
    use test_case::test_case;

    fn num(value: f64) -> Token {
        Token::Number(value)
    }

    #[test_case("2 + 2" => Ok(vec![num(2.0), num(2.0), Token::Op(Op::Plus)]) ; "addition is parsed properly")]
    #[test_case("2+2" => Ok(vec![num(2.0), num(2.0), Token::Op(Op::Plus)]) ; "no spaces needed")]
    #[test_case("7-3" => Ok(vec![num(7.0), num(3.0), Token::Op(Op::Minus)]) ; "binary minus")]
    #[test_case("-2**2" => Ok(vec![num(2.0), num(2.0), Token::Op(Op::Exp), Token::Negate]) ; "power binds tighter than negation")]
    #[test_case("2**-1" => Ok(vec![num(2.0), num(1.0), Token::Negate, Token::Op(Op::Exp)]) ; "negated exponent")]
    #[test_case("2**3**2" => Ok(vec![num(2.0), num(3.0), num(2.0), Token::Op(Op::Exp), Token::Op(Op::Exp)]) ; "power is right associative")]
    #[test_case("+5" => Ok(vec![num(5.0)]) ; "prefix plus is dropped")]
    #[test_case("1e20+1" => Ok(vec![num(1e20), num(1.0), Token::Op(Op::Plus)]) ; "scientific notation")]
    #[test_case("2.5e-3" => Ok(vec![num(2.5e-3)]) ; "negative exponent in literal")]
    #[test_case("2e-x" => Ok(vec![num(2.0), Token::Name("e".into()), Token::Name("x".into()), Token::Op(Op::Minus)]) ; "e without digits is a name")]
    fn parse(equation: &str) -> Result<Vec<Token>, Error> {
        Lexer::new(equation).parse()
    }

    #[test]
    fn function_calls() {
        let tokens = Lexer::new("sqrt(9)").parse().unwrap();
        assert_eq!(tokens, vec![num(9.0), Token::Name("sqrt".into())]);

        let tokens = Lexer::new("-sin(0)*2").parse().unwrap();
        assert_eq!(
            tokens,
            vec![
                num(0.0),
                Token::Name("sin".into()),
                Token::Negate,
                num(2.0),
                Token::Op(Op::Mul)
            ]
        );
    }

    #[test_case("(1+2" ; "unclosed group")]
    #[test_case("1+2)" ; "unopened group")]
    #[test_case("3.1.4" ; "two decimal points")]
    #[test_case("2^3" ; "caret is not in the grammar")]
    #[test_case("50%" ; "percent is not in the grammar")]
    #[test_case("sqrt 9" ; "call without parenthesis")]
    fn rejected(equation: &str) {
        assert!(Lexer::new(equation).parse().is_err(), "{} should not parse", equation);
    }

    #[test]
    fn names() {
        for c in ['c', 'Z', '_', 'f'] {
            assert!(is_name_start(c));
        }
        for c in ['3', 'à', '@', 'π', '.'] {
            assert!(!is_name_start(c));
        }
        for c in ['c', '0', '_'] {
            assert!(is_name_part(c));
        }
        for c in ['.', '(', '[', 'π'] {
            assert!(!is_name_part(c));
        }
    }
}
