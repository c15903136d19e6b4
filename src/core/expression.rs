//! Parsing and evaluation of user-authored mathematical expressions.
//!
//! Source text is tokenized with nom, parsed by recursive descent into a
//! tagged AST, and interpreted by a small tree walker. The grammar covers
//! numeric literals, the constants `pi` and `e`, up to two declared free
//! variables, `+ - * / ^` (with `**` accepted as a power alias), unary minus,
//! parentheses, and a fixed allow-list of named functions. Unknown
//! identifiers and malformed token sequences fail at parse time with a byte
//! position; non-finite evaluation results flow back to the caller as values.

use std::f64::consts::{E, PI};
use std::sync::atomic::{AtomicU64, Ordering};

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{map, recognize},
    number::complete::double,
    sequence::pair,
    IResult,
};

use crate::errors::{EvalError, ParseError};

/// Upper limit on declared free variables per expression.
pub const MAX_VARIABLES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn token(input: &str) -> IResult<&str, Tok> {
    alt((
        map(tag("**"), |_| Tok::Caret),
        map(char('+'), |_| Tok::Plus),
        map(char('-'), |_| Tok::Minus),
        map(char('*'), |_| Tok::Star),
        map(char('/'), |_| Tok::Slash),
        map(char('^'), |_| Tok::Caret),
        map(char('('), |_| Tok::LParen),
        map(char(')'), |_| Tok::RParen),
        map(char(','), |_| Tok::Comma),
        map(identifier, |s: &str| Tok::Ident(s.to_string())),
        map(double, Tok::Num),
    ))(input)
}

fn lex(source: &str) -> Result<Vec<(Tok, usize)>, ParseError> {
    let total = source.len();
    let mut rest = source.trim_start();
    let mut toks = Vec::new();
    while !rest.is_empty() {
        let position = total - rest.len();
        let (next, tok) =
            token(rest).map_err(|_| ParseError::UnexpectedChar { position })?;
        toks.push((tok, position));
        rest = next.trim_start();
    }
    Ok(toks)
}

/// Allow-listed named functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Exp,
    Log,
    Log10,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Round,
    Min,
    Max,
    Pow,
}

impl Func {
    fn from_name(name: &str) -> Option<Func> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "exp" => Func::Exp,
            "log" => Func::Log,
            "log10" => Func::Log10,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "floor" => Func::Floor,
            "ceil" => Func::Ceil,
            "round" => Func::Round,
            "min" => Func::Min,
            "max" => Func::Max,
            "pow" => Func::Pow,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Log10 => "log10",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Floor => "floor",
            Func::Ceil => "ceil",
            Func::Round => "round",
            Func::Min => "min",
            Func::Max => "max",
            Func::Pow => "pow",
        }
    }

    fn arity(self) -> usize {
        match self {
            Func::Min | Func::Max | Func::Pow => 2,
            _ => 1,
        }
    }

    fn apply(self, args: &[f64]) -> f64 {
        match self {
            Func::Sin => args[0].sin(),
            Func::Cos => args[0].cos(),
            Func::Tan => args[0].tan(),
            Func::Asin => args[0].asin(),
            Func::Acos => args[0].acos(),
            Func::Atan => args[0].atan(),
            Func::Exp => args[0].exp(),
            Func::Log => args[0].ln(),
            Func::Log10 => args[0].log10(),
            Func::Sqrt => args[0].sqrt(),
            Func::Abs => args[0].abs(),
            Func::Floor => args[0].floor(),
            Func::Ceil => args[0].ceil(),
            Func::Round => args[0].round(),
            Func::Min => args[0].min(args[1]),
            Func::Max => args[0].max(args[1]),
            Func::Pow => args[0].powf(args[1]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Num(f64),
    Var(usize),
    Neg(Box<Node>),
    Bin(BinOp, Box<Node>, Box<Node>),
    Call(Func, Vec<Node>),
}

impl Node {
    fn eval(&self, bindings: &[f64]) -> f64 {
        match self {
            Node::Num(v) => *v,
            Node::Var(i) => bindings[*i],
            Node::Neg(inner) => -inner.eval(bindings),
            Node::Bin(op, lhs, rhs) => {
                let a = lhs.eval(bindings);
                let b = rhs.eval(bindings);
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Pow => a.powf(b),
                }
            }
            Node::Call(func, args) => match args.as_slice() {
                [a] => func.apply(&[a.eval(bindings)]),
                [a, b] => func.apply(&[a.eval(bindings), b.eval(bindings)]),
                _ => f64::NAN,
            },
        }
    }
}

static NEXT_EXPR_ID: AtomicU64 = AtomicU64::new(0);

/// An immutable parsed expression.
///
/// Built once per source string by [`parse`] and evaluated any number of
/// times against positional bindings in the declared variable order. The id
/// is process-unique and serves only as cache identity; it never influences
/// evaluated values.
#[derive(Debug, Clone)]
pub struct Expression {
    root: Node,
    arity: usize,
    id: u64,
}

impl Expression {
    /// The number of free variables this expression was parsed with.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Evaluates at the given bindings, positional in declared variable
    /// order. A length mismatch is a contract violation and errors; NaN and
    /// infinity are returned as ordinary values for the caller to filter.
    pub fn eval(&self, bindings: &[f64]) -> Result<f64, EvalError> {
        if bindings.len() != self.arity {
            return Err(EvalError::BindingMismatch {
                expected: self.arity,
                found: bindings.len(),
            });
        }
        Ok(self.root.eval(bindings))
    }
}

struct Parser<'a> {
    toks: &'a [(Tok, usize)],
    pos: usize,
    vars: &'a [&'a str],
    source_len: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Tok, usize)> {
        let t = self.toks.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn position(&self) -> usize {
        self.toks
            .get(self.pos)
            .map(|(_, p)| *p)
            .unwrap_or(self.source_len)
    }

    fn expression(&mut self) -> Result<Node, ParseError> {
        self.additive()
    }

    fn additive(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Tok::Plus) => BinOp::Add,
                Some(Tok::Minus) => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.multiplicative()?;
            lhs = Node::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Tok::Star) => BinOp::Mul,
                Some(Tok::Slash) => BinOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = Node::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // Unary minus binds looser than power: -x^2 is -(x^2).
    fn unary(&mut self) -> Result<Node, ParseError> {
        if let Some(Tok::Minus) = self.peek() {
            self.bump();
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        self.power()
    }

    // Right associative: a^b^c is a^(b^c), and 2^-3 parses.
    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.atom()?;
        if let Some(Tok::Caret) = self.peek() {
            self.bump();
            let exp = self.unary()?;
            return Ok(Node::Bin(BinOp::Pow, Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Node, ParseError> {
        match self.next() {
            Some((Tok::Num(v), _)) => Ok(Node::Num(v)),
            Some((Tok::LParen, _)) => {
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some((Tok::Ident(name), position)) => self.identifier(name, position),
            Some((_, position)) => Err(ParseError::UnexpectedToken {
                expected: "a number, identifier, '-' or '('",
                position,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn identifier(&mut self, name: String, position: usize) -> Result<Node, ParseError> {
        if let Some(Tok::LParen) = self.peek() {
            self.bump();
            let func = Func::from_name(&name)
                .ok_or(ParseError::UnknownIdentifier { name, position })?;
            let mut args = vec![self.expression()?];
            while let Some(Tok::Comma) = self.peek() {
                self.bump();
                args.push(self.expression()?);
            }
            self.expect_rparen()?;
            if args.len() != func.arity() {
                return Err(ParseError::WrongArity {
                    name: func.name(),
                    expected: func.arity(),
                    found: args.len(),
                    position,
                });
            }
            return Ok(Node::Call(func, args));
        }

        // Declared variables shadow the built-in constants.
        if let Some(i) = self.vars.iter().position(|v| *v == name) {
            return Ok(Node::Var(i));
        }
        match name.as_str() {
            "pi" => Ok(Node::Num(PI)),
            "e" => Ok(Node::Num(E)),
            _ => Err(ParseError::UnknownIdentifier { name, position }),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.next() {
            Some((Tok::RParen, _)) => Ok(()),
            Some((_, position)) => Err(ParseError::UnexpectedToken {
                expected: "')'",
                position,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// Parses `source` into an [`Expression`] over the given free variables.
///
/// * `source` - Expression text, e.g. `"sin(x) + x^2"`
/// * `variables` - Distinct variable symbols, at most [`MAX_VARIABLES`];
///     evaluation bindings are positional in this order
pub fn parse(source: &str, variables: &[&str]) -> Result<Expression, ParseError> {
    if variables.len() > MAX_VARIABLES {
        return Err(ParseError::TooManyVariables {
            max: MAX_VARIABLES,
            found: variables.len(),
        });
    }
    for (i, name) in variables.iter().enumerate() {
        if variables[..i].contains(name) {
            return Err(ParseError::DuplicateVariable {
                name: name.to_string(),
            });
        }
    }

    let toks = lex(source)?;
    if toks.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser {
        toks: &toks,
        pos: 0,
        vars: variables,
        source_len: source.len(),
    };
    let root = parser.expression()?;
    if parser.pos < toks.len() {
        return Err(ParseError::TrailingInput {
            position: parser.position(),
        });
    }
    Ok(Expression {
        root,
        arity: variables.len(),
        id: NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed),
    })
}
