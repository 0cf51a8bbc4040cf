//! busmap library entry points.
//!
//! This crate parses one transit request document, builds the in-memory
//! transit catalogue, answers route and stop statistics queries, and renders
//! the network as a schematic vector-graphics map. Higher-level consumers
//! (the CLI) should only depend on the types exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod catalogue;
pub mod error;
pub mod geo;
pub mod json;
pub mod render;
pub mod request;
pub mod svg;

pub use catalogue::{Bus, BusStats, Catalogue, Stop, StopStats};
pub use error::{Error, Result};
pub use geo::Coordinates;
pub use json::{Document, Value};
pub use render::{render_map, RenderSettings, SphereProjector};
pub use request::{Session, StatKind, StatRequest};
