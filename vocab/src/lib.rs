//! Typed vocabulary graph model.
//!
//! The `lexigen-vocab` crate holds everything the resolution pipeline
//! shares: the raw statement types an external markup parser produces, the
//! insertion-ordered node arena those statements build into, the resolver
//! configuration tables, and the data model of the pipeline's output
//! (semantic types, canonical phrase records, emitted type definitions).
//!
//! # Entry Point
//!
//! ```
//! use lexigen_vocab::config::ResolverConfig;
//! use lexigen_vocab::graph::build_graph;
//! use lexigen_vocab::model::ClassStatement;
//!
//! let config = ResolverConfig::default();
//! let classes = vec![ClassStatement {
//!     name: "Thing".to_owned(),
//!     parents: vec![],
//!     comment: "The universal root type.".to_owned(),
//! }];
//! let graph = build_graph(&classes, &[], &[], &config).unwrap();
//! assert!(graph.contains("Thing"));
//! ```
//!
//! # Serialization
//!
//! With the default `serializers` feature, emitted definitions render to a
//! neutral JSON document via [`serializer::to_json`].

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod graph;
pub mod model;
#[cfg(feature = "serializers")]
pub mod serializer;

pub use config::ResolverConfig;
pub use graph::{build_graph, GraphBuilder, GraphError, VocabGraph};
pub use model::{
    CanonicalRecord, ClassStatement, InstanceStatement, PhraseRole, PropertyDef,
    PropertyStatement, Representation, ResolvedField, SemanticType, TypeDefinition, TypeNode,
};
