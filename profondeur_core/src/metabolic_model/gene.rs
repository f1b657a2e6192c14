//! This module provides the Gene struct, representing a gene, and the GeneRule enum,
//! representing the genes a reaction requires
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structure Representing a Gene
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Human Readable Gene Name
    #[builder(default = "None")]
    pub name: Option<String>,
}

impl Gene {
    /// Create a gene with only an identifier
    pub fn new(id: &str) -> Gene {
        Gene {
            id: id.to_string(),
            name: None,
        }
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Representation of a gene requirement rule as an AST
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneRule {
    /// Operation on one or two sub rules (see [`GeneOperation`])
    Operation(GeneOperation),
    /// A terminal gene node, holding the gene id
    Gene(String),
}

/// Possible operations on genes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneOperation {
    Or {
        left: Box<GeneRule>,
        right: Box<GeneRule>,
    },
    And {
        left: Box<GeneRule>,
        right: Box<GeneRule>,
    },
    Not {
        val: Box<GeneRule>,
    },
}

/// Types of allowed gene rule operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneOperatorType {
    /// Either side suffices
    Or,
    /// Both sides are required
    And,
    /// Negation of the operand
    Not,
}

impl GeneRule {
    /// Create a new binary operation node
    pub fn new_binary_operation(
        left: GeneRule,
        operator: GeneOperatorType,
        right: GeneRule,
    ) -> Result<GeneRule, GeneRuleError> {
        let op = match operator {
            GeneOperatorType::Or => GeneOperation::Or {
                left: Box::new(left),
                right: Box::new(right),
            },
            GeneOperatorType::And => GeneOperation::And {
                left: Box::new(left),
                right: Box::new(right),
            },
            GeneOperatorType::Not => return Err(GeneRuleError::InvalidBinaryOp),
        };
        Ok(GeneRule::Operation(op))
    }

    /// Create a new unary operation node
    pub fn new_unary_operation(
        operator: GeneOperatorType,
        operand: GeneRule,
    ) -> Result<GeneRule, GeneRuleError> {
        match operator {
            GeneOperatorType::Not => Ok(GeneRule::Operation(GeneOperation::Not {
                val: Box::new(operand),
            })),
            _ => Err(GeneRuleError::InvalidUnaryOp),
        }
    }

    /// Identifiers of every gene referenced by the rule, sorted
    pub fn genes(&self) -> BTreeSet<String> {
        let mut genes = BTreeSet::new();
        self.collect_genes(&mut genes);
        genes
    }

    fn collect_genes(&self, genes: &mut BTreeSet<String>) {
        match self {
            GeneRule::Gene(id) => {
                genes.insert(id.clone());
            }
            GeneRule::Operation(GeneOperation::Or { left, right })
            | GeneRule::Operation(GeneOperation::And { left, right }) => {
                left.collect_genes(genes);
                right.collect_genes(genes);
            }
            GeneRule::Operation(GeneOperation::Not { val }) => val.collect_genes(genes),
        }
    }
}

impl Display for GeneRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneRule::Operation(GeneOperation::Or { left, right }) => {
                write!(f, "({} or {})", left, right)
            }
            GeneRule::Operation(GeneOperation::And { left, right }) => {
                write!(f, "({} and {})", left, right)
            }
            GeneRule::Operation(GeneOperation::Not { val }) => write!(f, "(not {})", val),
            GeneRule::Gene(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeneRuleError {
    #[error("Invalid Binary Operation")]
    InvalidBinaryOp,
    #[error("Invalid Unary Operation")]
    InvalidUnaryOp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(id: &str) -> GeneRule {
        GeneRule::Gene(id.to_string())
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", gene("b0001")), "b0001");

        let or = GeneRule::new_binary_operation(gene("b0001"), GeneOperatorType::Or, gene("b0002"))
            .unwrap();
        assert_eq!(format!("{}", or), "(b0001 or b0002)");

        let not = GeneRule::new_unary_operation(GeneOperatorType::Not, gene("b0003")).unwrap();
        let and = GeneRule::new_binary_operation(or, GeneOperatorType::And, not).unwrap();
        assert_eq!(format!("{}", and), "((b0001 or b0002) and (not b0003))");
    }

    #[test]
    fn invalid_operators() {
        assert_eq!(
            GeneRule::new_binary_operation(gene("a"), GeneOperatorType::Not, gene("b")),
            Err(GeneRuleError::InvalidBinaryOp)
        );
        assert_eq!(
            GeneRule::new_unary_operation(GeneOperatorType::And, gene("a")),
            Err(GeneRuleError::InvalidUnaryOp)
        );
    }

    #[test]
    fn collect_genes() {
        let rule = GeneRule::new_binary_operation(
            GeneRule::new_binary_operation(gene("b2"), GeneOperatorType::And, gene("b1")).unwrap(),
            GeneOperatorType::Or,
            GeneRule::new_unary_operation(GeneOperatorType::Not, gene("b2")).unwrap(),
        )
        .unwrap();
        let genes: Vec<String> = rule.genes().into_iter().collect();
        assert_eq!(genes, vec!["b1".to_string(), "b2".to_string()]);
    }

    #[test]
    fn gene_builder() {
        let g = GeneBuilder::default()
            .id("b1241".to_string())
            .name(Some("adhE".to_string()))
            .build()
            .unwrap();
        assert_eq!(g.to_string(), "b1241");
        assert_eq!(g.name.unwrap(), "adhE");
    }
}
