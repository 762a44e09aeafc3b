//! Type classification.
//!
//! Assigns every class node its representation strategy (enumeration,
//! list wrapper, struct, entity reference) and its action/struct-lineage
//! flags, then breaks representation cycles and propagates non-struct
//! status to ancestors. After this phase the struct-reference graph is
//! acyclic and the node set is immutable.

use std::collections::HashSet;

use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::graph::VocabGraph;
use lexigen_vocab::model::Representation;

use crate::property;
use crate::report::{Diagnostic, ResolutionReport};

/// Classifies every node in the graph, in first-declaration order.
pub fn classify(graph: &mut VocabGraph, config: &ResolverConfig, report: &mut ResolutionReport) {
    assign_representations(graph, config, report);
    break_cycles(graph, config, report);
    propagate_non_struct(graph, report);
}

/// First pass: flags and initial representation per node.
fn assign_representations(
    graph: &mut VocabGraph,
    config: &ResolverConfig,
    report: &mut ResolutionReport,
) {
    for name in graph.names() {
        let is_action = graph.extends(&name, &config.action_root);
        let is_struct_lineage = config
            .struct_roots
            .iter()
            .any(|root| graph.extends(&name, root));

        let has_instances = graph
            .get(&name)
            .is_some_and(|n| !n.declared_instances.is_empty());
        let representation = if has_instances || graph.extends(&name, &config.enum_root) {
            let values = graph
                .get(&name)
                .map(|n| n.declared_instances.clone())
                .unwrap_or_default();
            Representation::Enum { values }
        } else if name == config.collection_root {
            // The root wrapper denotes "a list of anything".
            Representation::ListWrapper {
                element: config.universal_root.clone(),
            }
        } else if graph.extends(&name, &config.collection_root) {
            let element = wrapper_element(&name, graph, config, report);
            Representation::ListWrapper { element }
        } else if is_struct_lineage && !config.forced_non_struct.contains(&name) {
            Representation::Struct
        } else {
            Representation::EntityReference
        };

        if let Some(node) = graph.get_mut(&name) {
            node.is_action = is_action;
            node.is_struct_lineage = is_struct_lineage;
            node.representation = representation;
        }
    }
}

/// Derives a list wrapper's element type by stripping a recognized
/// collection suffix; unknown remainders fall back to the universal root.
fn wrapper_element(
    name: &str,
    graph: &VocabGraph,
    config: &ResolverConfig,
    report: &mut ResolutionReport,
) -> String {
    for suffix in &config.collection_suffixes {
        if let Some(remainder) = name.strip_suffix(suffix.as_str()) {
            if !remainder.is_empty() && graph.contains(remainder) {
                return remainder.to_owned();
            }
        }
    }
    report.push(Diagnostic::warn(
        "classify",
        format!(
            "list wrapper `{name}` has no recognizable element type; falling back to `{}`",
            config.universal_root
        ),
    ));
    config.universal_root.clone()
}

/// Second pass: demote any struct node that can reach itself through
/// resolved property edges.
///
/// Nodes are visited in declaration order; the first node found to close a
/// cycle is demoted, and every later search resolves against the updated
/// flags. This guarantees no struct type is ever emitted as a field of
/// itself, directly or transitively.
fn break_cycles(graph: &mut VocabGraph, config: &ResolverConfig, report: &mut ResolutionReport) {
    for name in graph.names() {
        let is_candidate = graph
            .get(&name)
            .is_some_and(|n| n.is_struct_lineage && n.is_struct());
        if !is_candidate {
            continue;
        }
        let mut visited = HashSet::new();
        if reaches_struct(graph, config, &name, &name, &mut visited) {
            if let Some(node) = graph.get_mut(&name) {
                node.representation = Representation::EntityReference;
            }
            report.push(Diagnostic::info(
                "classify",
                format!("representation cycle through `{name}`; demoting to entity reference"),
            ));
        }
    }
}

/// True if `target` is reachable from `from` over property edges into
/// currently struct-representable nodes.
fn reaches_struct(
    graph: &VocabGraph,
    config: &ResolverConfig,
    from: &str,
    target: &str,
    visited: &mut HashSet<String>,
) -> bool {
    let Some(node) = graph.get(from) else {
        return false;
    };
    for def in node.properties.values() {
        let Some(candidate) = property::best_candidate(def, graph, config) else {
            continue;
        };
        if !graph.get(candidate).is_some_and(|n| n.is_struct()) {
            continue;
        }
        if candidate == target {
            return true;
        }
        if visited.insert(candidate.to_owned())
            && reaches_struct(graph, config, candidate, target, visited)
        {
            return true;
        }
    }
    false
}

/// Third pass: every node that is not struct-representable forces all of
/// its ancestors (via `parents`) out of struct representation, recursively.
///
/// Propagation runs toward parents, not children. Compound field sets are
/// collected from ancestor chains, so a non-struct node anywhere below an
/// ancestor means that ancestor's chain can no longer be inlined as one
/// value.
fn propagate_non_struct(graph: &mut VocabGraph, report: &mut ResolutionReport) {
    let mut stack: Vec<String> = graph
        .nodes()
        .filter(|n| !n.is_struct())
        .map(|n| n.name.clone())
        .collect();
    let mut visited: HashSet<String> = stack.iter().cloned().collect();

    while let Some(name) = stack.pop() {
        let parents = match graph.get(&name) {
            Some(node) => node.parents.clone(),
            None => continue,
        };
        for parent in parents {
            if graph.get(&parent).is_some_and(|n| n.is_struct()) {
                if let Some(node) = graph.get_mut(&parent) {
                    node.representation = Representation::EntityReference;
                }
                report.push(Diagnostic::info(
                    "classify",
                    format!(
                        "`{parent}` demoted to entity reference: descendant `{name}` is not \
                         struct-representable"
                    ),
                ));
            }
            if visited.insert(parent.clone()) {
                stack.push(parent);
            }
        }
    }
}
