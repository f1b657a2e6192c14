use indexmap::IndexMap;
use thiserror::Error;

use crate::io::gene_rule_parse::token::Token;
use crate::metabolic_model::gene::{Gene, GeneOperatorType, GeneRule};
/*
Gene Rule Grammar:
expression -> binary
binary -> unary (("AND" | "OR") unary )*;
unary -> "NOT" unary | primary  ;
primary -> GENE | "(" expression ")" ;

e.g. ( Gene1 AND Gene2) OR (Gene3 AND NOT Gene4)
 */

/// Deepest allowed nesting of `not` operators and parenthesized groups
pub const MAX_NESTING_DEPTH: usize = 128;

/// Gene rule parser
pub struct GeneRuleParser<'gm> {
    /// Tokens of the rule, terminated by [`Token::Eof`]
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
    /// Nesting depth of the expression being parsed
    depth: usize,
    /// Genes of the model, genes first seen in a rule are added
    pub(crate) gene_map: &'gm mut IndexMap<String, Gene>,
}

impl<'gm> GeneRuleParser<'gm> {
    pub fn new(tokens: Vec<Token>, gene_map: &'gm mut IndexMap<String, Gene>) -> Self {
        GeneRuleParser {
            tokens,
            current: 0,
            depth: 0,
            gene_map,
        }
    }

    /// Parse the token vector into a gene rule AST
    pub fn parse(&mut self) -> Result<GeneRule, ParseError> {
        let rule = self.binary()?;
        if !self.is_at_end() {
            return Err(ParseError::EarlyTermination);
        }
        Ok(rule)
    }

    // Operators are left associative without precedence, `a and b or c` is `(a and b) or c`
    fn binary(&mut self) -> Result<GeneRule, ParseError> {
        let mut expr = self.unary()?;
        loop {
            let operator = match self.peek() {
                Token::And => GeneOperatorType::And,
                Token::Or => GeneOperatorType::Or,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            expr = GeneRule::new_binary_operation(expr, operator, right)
                .map_err(|_| ParseError::InvalidBinaryOperator)?;
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<GeneRule, ParseError> {
        if self.peek() == &Token::Not {
            self.advance();
            self.descend()?;
            let operand = self.unary()?;
            self.depth -= 1;
            return GeneRule::new_unary_operation(GeneOperatorType::Not, operand)
                .map_err(|_| ParseError::InvalidUnaryOperator);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<GeneRule, ParseError> {
        match self.peek().clone() {
            Token::Identifier(id) => {
                self.advance();
                self.insert_if_needed(&id);
                Ok(GeneRule::Gene(id))
            }
            Token::LeftParen => {
                self.advance();
                self.descend()?;
                let expr = self.binary()?;
                self.depth -= 1;
                self.consume(Token::RightParen, "Expect ')' after expression.")?;
                Ok(expr)
            }
            _ => Err(ParseError::ExpectedExpression),
        }
    }

    // region parsing helper functions

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::ExcessiveNesting(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek() == &Token::Eof
    }

    /// Current token, [`Token::Eof`] past the end of the source
    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&Token::Eof)
    }

    /// Advance past `token` or report it as missing
    fn consume(&mut self, token: Token, msg: &str) -> Result<(), ParseError> {
        if self.peek() == &token {
            self.advance();
            return Ok(());
        }
        Err(ParseError::MissingToken(msg.to_string()))
    }

    // endregion parsing helper functions

    /// Check if a gene_id exists as a key in gene_map, if it doesn't insert a new gene with that id
    fn insert_if_needed(&mut self, gene_id: &str) {
        if !self.gene_map.contains_key(gene_id) {
            self.gene_map
                .insert(gene_id.to_string(), Gene::new(gene_id));
        }
    }
}

/// Enum representing possible parse errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    /// Token was expected to be a binary operator but was not
    #[error("Invalid binary operator encountered, expected only `and` and `or`")]
    InvalidBinaryOperator,
    /// Token was expected to be a unary operator but was not
    #[error("Invalid unary operator encountered, expected only `not`")]
    InvalidUnaryOperator,
    /// Missing expected token (e.g. a right parenthesis)
    #[error("Missing expected token: {0}")]
    MissingToken(String),
    /// No expression found when one was expected
    #[error("No expression found, check that the gene rule is not empty")]
    ExpectedExpression,
    /// Expression was not completed when parsing terminated
    #[error("Parsing terminated early, check for a `not` between two gene identifiers/grouped expressions")]
    EarlyTermination,
    /// Operators or groups nested deeper than the parser allows
    #[error("Gene rule nests operators or groups deeper than {0} levels")]
    ExcessiveNesting(usize),
}
