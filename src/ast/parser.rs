use crate::ast::{ASTNode, Expression, Function, Operator, ParseError, Variable};
use log::{debug, trace};
use std::collections::HashMap;

/// Deepest tree a build may produce. Parsing, evaluation and drop all recurse per level.
const MAX_DEPTH: usize = 512;

/// Recursive-descent parser that turns source text into an [`Expression`].
///
/// Grammar:
///
/// ```text
/// expression = term { ("+" | "-") term }
/// term       = factor { ("*" | "/") factor }
/// factor     = ("+" | "-") factor
///            | ( "(" expression ")" | number | variable | function factor ) [ "^" factor ]
/// ```
///
/// A sign is handled before the trailing `^` check, so `-x^y` is `-(x^y)`, and the
/// right operand of `^` is a fresh factor, which makes `2^3^2` equal to `2^(3^2)`.
pub struct ExpressionBuilder {
    source: String,
    chars: Vec<char>,
    /// Index of the lookahead character; `None` before the first `advance`.
    cursor: Option<usize>,
    ch: Option<char>,
    depth: usize,
    variables: HashMap<String, Variable>,
}

impl ExpressionBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let chars = source.chars().collect();
        Self {
            source,
            chars,
            cursor: None,
            ch: None,
            depth: 0,
            variables: HashMap::new(),
        }
    }

    /// Binds `name` to a cell, replacing any earlier binding of the same name.
    ///
    /// A variable shadows a builtin function of the same name and never takes an argument.
    pub fn add_variable(mut self, name: impl Into<String>, variable: &Variable) -> Self {
        let name = name.into();
        trace!("Registering variable '{}' = {}", name, variable);
        self.variables.insert(name, variable.clone());
        self
    }

    /// The text this builder parses.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parses the whole source. The first error aborts the build.
    pub fn build(mut self) -> Result<Expression, ParseError> {
        debug!("Building expression: {}", self.source);
        self.advance();
        let root = self.parse_expression()?;

        self.skip_spaces();
        if self.ch.is_some() {
            return Err(self.unexpected());
        }

        debug!("Built expression tree: {:?}", root);
        Ok(Expression::new(self.source, root))
    }

    fn position(&self) -> usize {
        self.cursor.map_or(0, |pos| pos.min(self.chars.len()))
    }

    fn advance(&mut self) {
        let pos = self.cursor.map_or(0, |pos| pos + 1);
        self.cursor = Some(pos);
        self.ch = self.chars.get(pos).copied();
    }

    /// Only the ASCII space counts as whitespace.
    fn skip_spaces(&mut self) {
        while self.ch == Some(' ') {
            self.advance();
        }
    }

    fn consume_if(&mut self, expected: char) -> bool {
        self.skip_spaces();
        if self.ch == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_operator(&mut self, candidates: [Operator; 2]) -> Option<Operator> {
        candidates
            .into_iter()
            .find(|operator| self.consume_if(operator.symbol()))
    }

    /// Counts one more level of nesting; past `MAX_DEPTH` the build fails.
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.unexpected());
        }
        Ok(())
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedCharacter {
            found: self.ch,
            position: self.position(),
        }
    }

    fn parse_expression(&mut self) -> Result<ASTNode, ParseError> {
        trace!("Parsing expression at {}", self.position());
        self.enter()?;
        let mut node = self.parse_term()?;
        let mut folds = 0;

        while let Some(operator) = self.consume_operator([Operator::Add, Operator::Subtract]) {
            // each fold nests the previous result one level deeper
            self.enter()?;
            folds += 1;
            let right = self.parse_term()?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        self.depth -= folds + 1;
        Ok(node)
    }

    fn parse_term(&mut self) -> Result<ASTNode, ParseError> {
        trace!("Parsing term at {}", self.position());
        let mut node = self.parse_factor()?;
        let mut folds = 0;

        while let Some(operator) = self.consume_operator([Operator::Multiply, Operator::Divide]) {
            self.enter()?;
            folds += 1;
            let right = self.parse_factor()?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        self.depth -= folds;
        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<ASTNode, ParseError> {
        trace!("Parsing factor at {}", self.position());
        self.enter()?;
        let node = self.parse_signed_factor()?;
        self.depth -= 1;
        Ok(node)
    }

    fn parse_signed_factor(&mut self) -> Result<ASTNode, ParseError> {
        if self.consume_if('+') {
            return self.parse_factor();
        }
        if self.consume_if('-') {
            let operand = self.parse_factor()?;
            return Ok(ASTNode::Negate(Box::new(operand)));
        }

        let start = self.position();
        let node = if self.consume_if('(') {
            let inner = self.parse_expression()?;
            if !self.consume_if(')') {
                return Err(self.unexpected());
            }
            inner
        } else if self.ch.is_some_and(is_number_char) {
            self.parse_number(start)?
        } else if self.ch.is_some_and(|ch| ch.is_ascii_lowercase()) {
            self.parse_identifier(start)?
        } else {
            return Err(self.unexpected());
        };

        if self.consume_if(Operator::Power.symbol()) {
            let exponent = self.parse_factor()?;
            return Ok(ASTNode::BinaryOperation {
                left: Box::new(node),
                operator: Operator::Power,
                right: Box::new(exponent),
            });
        }

        Ok(node)
    }

    fn parse_number(&mut self, start: usize) -> Result<ASTNode, ParseError> {
        while self.ch.is_some_and(is_number_char) {
            self.advance();
        }

        let literal: String = self.chars[start..self.position()].iter().collect();
        let value = literal
            .parse::<f64>()
            .map_err(|source| ParseError::InvalidNumber {
                literal,
                position: start,
                source,
            })?;

        trace!("Parsed number {}", value);
        Ok(ASTNode::Constant(value))
    }

    fn parse_identifier(&mut self, start: usize) -> Result<ASTNode, ParseError> {
        while self.ch.is_some_and(|ch| ch.is_ascii_lowercase()) {
            self.advance();
        }

        let name: String = self.chars[start..self.position()].iter().collect();
        if let Some(variable) = self.variables.get(&name) {
            trace!("Resolved variable '{}'", name);
            return Ok(ASTNode::Variable(variable.clone()));
        }

        let function = Function::try_from(name.as_str()).map_err(|_| ParseError::UnknownFunction {
            name,
            position: start,
        })?;
        trace!("Resolved function '{}'", function.name());

        let argument = self.parse_factor()?;
        Ok(ASTNode::FunctionCall {
            function,
            argument: Box::new(argument),
        })
    }
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}
