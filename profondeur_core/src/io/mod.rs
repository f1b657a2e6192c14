//! Module for reading models and writing networks
pub mod gene_rule_parse;
pub mod json;
