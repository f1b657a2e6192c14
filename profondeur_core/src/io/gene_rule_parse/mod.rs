//! Module for parsing gene rule strings into AST values
use indexmap::IndexMap;
use thiserror::Error;

use crate::io::gene_rule_parse::lexer::LexerError;
use crate::io::gene_rule_parse::parser::ParseError;
use crate::metabolic_model::gene::{Gene, GeneRule};

mod lexer;
pub mod parser;
mod token;

/// Parse a gene rule string into a GeneRule tree
///
/// # Parameters
/// - `input`: &str representing the gene rule
/// - `gene_map`: map of gene id strings to genes, genes not yet present are added
///
/// # Returns
/// Parse result which is
/// - `Ok`: the root node of the gene rule tree
/// - `Err`: the GeneRuleParseError describing the issue with the rule which was being parsed
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use profondeur_core::io::gene_rule_parse::parse_gene_rule;
/// let mut gene_map = IndexMap::new();
/// let rule = parse_gene_rule("Rv0001 and Rv0002", &mut gene_map).unwrap();
/// assert_eq!(rule.to_string(), "(Rv0001 and Rv0002)");
/// assert_eq!(gene_map.len(), 2);
/// ```
pub fn parse_gene_rule(
    input: &str,
    gene_map: &mut IndexMap<String, Gene>,
) -> Result<GeneRule, GeneRuleParseError> {
    let tokens = lexer::Lexer::new(input).lex()?;
    let mut parser = parser::GeneRuleParser::new(tokens, gene_map);
    Ok(parser.parse()?)
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error)]
pub enum GeneRuleParseError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of gene rule string to tokens)")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to gene rule tree)")]
    ParsingError(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gene_rule() {
        let mut gene_map: IndexMap<String, Gene> = IndexMap::new();
        let rule = parse_gene_rule("Rv0001 and (Rv0002 or Rv0003)", &mut gene_map).unwrap();
        assert_eq!(rule.to_string(), "(Rv0001 and (Rv0002 or Rv0003))");
        let genes: Vec<String> = rule.genes().into_iter().collect();
        assert_eq!(genes, vec!["Rv0001", "Rv0002", "Rv0003"]);
        assert_eq!(gene_map.len(), 3);
    }

    #[test]
    fn errors() {
        let mut gene_map = IndexMap::new();
        assert!(matches!(
            parse_gene_rule("a & b", &mut gene_map),
            Err(GeneRuleParseError::LexingError(_))
        ));
        assert!(matches!(
            parse_gene_rule("a b", &mut gene_map),
            Err(GeneRuleParseError::ParsingError(ParseError::EarlyTermination))
        ));
    }
}
