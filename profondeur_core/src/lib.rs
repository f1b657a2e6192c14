//! Core of Profondeur, assembling node and link networks from genome scale metabolic models.
//!
//! A [`Model`](metabolic_model::model::Model) is read with [`io::json`], reactions are selected
//! with [`analysis::filter`], and [`network::builder::build_network`] turns the selection into a
//! [`Network`](network::builder::Network) of reaction and metabolite nodes joined by directed
//! links.

pub mod analysis;
pub mod configuration;
pub mod identifier;
pub mod io;
pub mod metabolic_model;
pub mod network;
