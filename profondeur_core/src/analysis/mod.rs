//! Model level analyses which complement network assembly

pub mod filter;
pub mod processes;
pub mod replicates;
