//! Ordered emission of resolved type definitions.
//!
//! Entity classes are emitted in topological order, parents before
//! children, with declaration order breaking ties. Actions, enumerations,
//! list wrappers, and struct-representable classes are never emitted on
//! their own — they surface only as field types inside other definitions.

use std::collections::HashSet;

use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::graph::VocabGraph;
use lexigen_vocab::model::{Representation, TypeDefinition, TypeNode};

use crate::canonical::CanonicalSynthesizer;
use crate::compound::{self, ResolveError};
use crate::report::ResolutionReport;

/// Emits the ordered type definitions for every emittable node.
///
/// # Errors
///
/// Propagates [`ResolveError::EmptyCompound`] from compound field
/// assembly.
pub fn emit(
    graph: &VocabGraph,
    config: &ResolverConfig,
    synthesizer: &CanonicalSynthesizer<'_>,
    report: &mut ResolutionReport,
) -> Result<Vec<TypeDefinition>, ResolveError> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut definitions: Vec<TypeDefinition> = Vec::new();
    for name in graph.names() {
        visit(graph, config, synthesizer, report, &name, &mut visited, &mut definitions)?;
    }
    Ok(definitions)
}

/// Depth-first topological visit: parents first, then the node itself.
fn visit(
    graph: &VocabGraph,
    config: &ResolverConfig,
    synthesizer: &CanonicalSynthesizer<'_>,
    report: &mut ResolutionReport,
    name: &str,
    visited: &mut HashSet<String>,
    definitions: &mut Vec<TypeDefinition>,
) -> Result<(), ResolveError> {
    if !visited.insert(name.to_owned()) {
        return Ok(());
    }
    let Some(node) = graph.get(name) else {
        return Ok(());
    };
    for parent in &node.parents {
        visit(graph, config, synthesizer, report, parent, visited, definitions)?;
    }
    if is_emittable(node) {
        definitions.push(build_definition(node, graph, config, synthesizer, report)?);
    }
    Ok(())
}

/// Only plain entity classes are emitted.
fn is_emittable(node: &TypeNode) -> bool {
    !node.is_action && node.representation == Representation::EntityReference
}

fn build_definition(
    node: &TypeNode,
    graph: &VocabGraph,
    config: &ResolverConfig,
    synthesizer: &CanonicalSynthesizer<'_>,
    report: &mut ResolutionReport,
) -> Result<TypeDefinition, ResolveError> {
    let mut fields = Vec::new();
    for (name, def) in &node.properties {
        let Some(field) = compound::resolve_field(name, def, graph, config, synthesizer, report)?
        else {
            continue;
        };
        fields.push(field);
    }
    Ok(TypeDefinition {
        name: node.name.clone(),
        parents: node.parents.clone(),
        fields,
    })
}
