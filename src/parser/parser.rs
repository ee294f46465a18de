use log::{debug, trace};

use crate::{
    il::{Constant, NameGenerator, Operand, Operator, Triad, TriadListing},
    scanner::{CharExt, CharScanner},
};

use super::error::*;

type ParseResult<T> = Result<T, ParseError>;
type Fallible<T> = Result<T, Reason>;

/// How deeply parentheses and unary minus may nest inside one statement.
pub const MAX_NESTING: usize = 256;

/// Parses a single whitespace-free statement of the form `target:=expression;`,
/// returning the triads it reduces to. The closing assignment is always the
/// last triad.
///
/// Every call starts a fresh session: sequence numbers and temporaries are
/// numbered from `1`.
pub fn parse(source: &str) -> ParseResult<TriadListing> {
    Parser::new(source).run()
}

struct Parser<'a> {
    scanner: CharScanner<'a>,
    names: NameGenerator,
    listing: TriadListing,
    /// Number of enclosing parentheses and unary minus signs.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            scanner: CharScanner::new(source),
            names: NameGenerator::new(),
            listing: TriadListing::new(),
            depth: 0,
        }
    }

    fn run(mut self) -> ParseResult<TriadListing> {
        self.statement()?;
        Ok(self.listing)
    }

    /// `Statement := Term ":=" AddExpr ";"`
    ///
    /// The target is a bare term, never a full expression.
    fn statement(&mut self) -> ParseResult<()> {
        let target = self.term().add_stage(Stage::AssignTarget, &self.scanner)?;
        self.expect(":=")
            .add_stage(Stage::AssignOperator, &self.scanner)?;

        let value = self.add_expr()?;

        self.expect(";")
            .add_stage(Stage::StatementEnd, &self.scanner)?;
        if !self.scanner.is_finished() {
            return Err(ParseError::new(
                Stage::StatementEnd,
                Reason::TrailingInput,
                &self.scanner,
            ));
        }

        self.emit_assign(target, value);
        Ok(())
    }

    /// `AddExpr := MulExpr { ("+"|"-") MulExpr }`
    fn add_expr(&mut self) -> ParseResult<Operand> {
        trace!("add_expr at '{}'", self.scanner.remainder());
        let mut lhs = self.mul_expr()?;

        loop {
            let op = if self.scanner.recognise('+') {
                Operator::Add
            } else if self.scanner.recognise('-') {
                Operator::Subtract
            } else {
                return Ok(lhs);
            };

            let rhs = self.mul_expr()?;
            lhs = self.emit_binary(op, lhs, rhs);
        }
    }

    /// `MulExpr := Atom { ("*"|"/") Atom }`
    fn mul_expr(&mut self) -> ParseResult<Operand> {
        trace!("mul_expr at '{}'", self.scanner.remainder());
        let mut lhs = self.atom()?;

        loop {
            let op = if self.scanner.recognise('*') {
                Operator::Multiply
            } else if self.scanner.recognise('/') {
                Operator::Divide
            } else {
                return Ok(lhs);
            };

            let rhs = self.atom()?;
            lhs = self.emit_binary(op, lhs, rhs);
        }
    }

    /// `Atom := "(" AddExpr ")" | "-" Atom | Term`
    fn atom(&mut self) -> ParseResult<Operand> {
        if self.scanner.recognise('(') {
            self.descend()?;
            let inner = self.add_expr()?;
            self.expect(")")
                .add_stage(Stage::ParenExprEnd, &self.scanner)?;
            self.depth -= 1;
            Ok(inner)
        } else if self.scanner.recognise('-') {
            self.descend()?;
            // Unary minus does not produce a triad of its own.
            let operand = self.atom()?.negate();
            self.depth -= 1;
            Ok(operand)
        } else {
            self.term().add_stage(Stage::Operand, &self.scanner)
        }
    }

    /// `Term := Identifier | NumberLiteral | CharLiteral`
    fn term(&mut self) -> Fallible<Operand> {
        match self.scanner.peek() {
            None => Err(Reason::UnexpectedEndOfInput),
            Some(ch) if ch.is_identifier_start() => {
                let name = self.scanner.consume_while(|c| c.is_identifier_continue());
                Ok(Operand::Variable(name))
            }
            Some(ch) if ch.is_number_literal() => self.number_literal(),
            Some('\'') => self.char_literal(),
            Some(ch) => Err(Reason::UnexpectedCharacter(ch)),
        }
    }

    /// Enters one more level of nesting, failing once [`MAX_NESTING`] is exceeded.
    fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseError::new(
                Stage::Operand,
                Reason::NestingTooDeep(MAX_NESTING),
                &self.scanner,
            ));
        }
        Ok(())
    }

    fn number_literal(&mut self) -> Fallible<Operand> {
        let start = self.scanner.clone();
        let literal = self.scanner.consume_while(|c| c.is_number_literal());
        match literal.parse() {
            Ok(value) => Ok(Operand::Constant(Constant::Number(value))),
            Err(_) => {
                // Report the error at the start of the literal.
                self.scanner = start;
                Err(Reason::MalformedNumber(literal))
            }
        }
    }

    /// A single letter or digit enclosed in single quotes.
    fn char_literal(&mut self) -> Fallible<Operand> {
        if !self.scanner.recognise('\'') {
            return Err(Reason::MalformedCharLiteral("expected an opening quote"));
        }

        let value = match self.scanner.peek() {
            Some(ch) if ch.is_char_literal_content() => {
                self.scanner.try_next();
                ch
            }
            _ => return Err(Reason::MalformedCharLiteral("expected a letter or digit")),
        };

        if !self.scanner.recognise('\'') {
            return Err(Reason::MalformedCharLiteral("expected a closing quote"));
        }

        Ok(Operand::Constant(Constant::Char(value)))
    }

    /// Tries to read a literal token. If the token does not match, the scanner is not
    /// advanced, and an error is returned instead.
    fn expect(&mut self, token: &'static str) -> Fallible<()> {
        if self.scanner.recognise_str(token) {
            Ok(())
        } else {
            Err(Reason::TokenMismatch { expected: token })
        }
    }

    /// Emits a triad for a binary operation and returns the temporary holding
    /// its result. The temporary is allocated right before the triad's
    /// sequence number, which keeps `^k` pointing at triad `k`.
    fn emit_binary(&mut self, op: Operator, lhs: Operand, rhs: Operand) -> Operand {
        let temp = self.names.next_temp();
        let seq = self.names.next_sequence();
        let triad = Triad::with_result(seq, op, lhs, rhs, temp);

        debug!("emit {} {} -> {}", seq, triad, temp);
        self.listing.push(triad);
        Operand::Temporary(temp)
    }

    fn emit_assign(&mut self, target: Operand, value: Operand) {
        let seq = self.names.next_sequence();
        let triad = Triad::new(seq, Operator::Assign, target, value);

        debug!("emit {} {}", seq, triad);
        self.listing.push(triad);
    }
}
