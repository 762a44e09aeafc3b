//! Ontology resolver and canonical-phrase synthesizer.
//!
//! The `lexigen-resolver` crate turns a raw vocabulary graph into an
//! ordered sequence of type definitions ready for a downstream grammar
//! serializer. Every class is classified into a representation strategy
//! (enumeration, list wrapper, inlined struct, entity reference) with
//! representation cycles broken automatically, and every surviving
//! property gets a resolved semantic type plus a categorized set of
//! natural-language phrase templates.
//!
//! # Entry Point
//!
//! ```
//! use lexigen_resolver::{resolve, LexiconTagger};
//! use lexigen_vocab::config::ResolverConfig;
//! use lexigen_vocab::graph::build_graph;
//! use lexigen_vocab::model::ClassStatement;
//!
//! let config = ResolverConfig::default();
//! let classes = vec![
//!     ClassStatement {
//!         name: "Thing".to_owned(),
//!         parents: vec![],
//!         comment: String::new(),
//!     },
//!     ClassStatement {
//!         name: "Person".to_owned(),
//!         parents: vec!["Thing".to_owned()],
//!         comment: String::new(),
//!     },
//! ];
//! let graph = build_graph(&classes, &[], &[], &config).unwrap();
//! let resolution = resolve(graph, &config, &LexiconTagger).unwrap();
//! assert_eq!(resolution.definitions.len(), 2);
//! ```
//!
//! The whole graph is resolved in one pass; resolving the same input twice
//! yields identical ordered output.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod canonical;
pub mod classify;
pub mod compound;
pub mod emit;
pub mod pos;
pub mod property;
pub mod report;

use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::graph::{build_graph, VocabGraph};
use lexigen_vocab::model::{
    ClassStatement, InstanceStatement, PropertyStatement, TypeDefinition,
};

pub use canonical::CanonicalSynthesizer;
pub use compound::ResolveError;
pub use pos::{LexiconTagger, PosTag, PosTagger};
pub use report::{Diagnostic, ResolutionReport, Severity};

/// The pipeline's result: ordered definitions plus accumulated
/// diagnostics.
#[derive(Debug)]
pub struct Resolution {
    /// Emitted type definitions, parents before children.
    pub definitions: Vec<TypeDefinition>,
    /// Diagnostics from every phase, in emission order.
    pub report: ResolutionReport,
}

/// Runs classification, property resolution, phrase synthesis, and
/// emission over a built graph.
///
/// # Errors
///
/// Returns [`ResolveError::EmptyCompound`] when a struct-representable
/// type keeps zero fields.
pub fn resolve(
    mut graph: VocabGraph,
    config: &ResolverConfig,
    tagger: &dyn PosTagger,
) -> Result<Resolution, ResolveError> {
    let mut report = ResolutionReport::new();
    classify::classify(&mut graph, config, &mut report);
    let synthesizer = CanonicalSynthesizer::new(config, tagger);
    let definitions = emit::emit(&graph, config, &synthesizer, &mut report)?;
    Ok(Resolution {
        definitions,
        report,
    })
}

/// Convenience entry point: builds the graph from raw statements and
/// resolves it.
///
/// # Errors
///
/// Returns an error for a malformed statement or an empty compound type.
pub fn resolve_statements(
    classes: &[ClassStatement],
    properties: &[PropertyStatement],
    instances: &[InstanceStatement],
    config: &ResolverConfig,
    tagger: &dyn PosTagger,
) -> anyhow::Result<Resolution> {
    let graph = build_graph(classes, properties, instances, config)?;
    let resolution = resolve(graph, config, tagger)?;
    Ok(resolution)
}
