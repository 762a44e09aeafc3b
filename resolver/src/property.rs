//! Property type resolution.
//!
//! Scores a property's candidate value-types, applies the array-ness
//! heuristic and the manual override tables, and resolves to one semantic
//! type. A property whose best candidate scores negative is dropped.

use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::graph::VocabGraph;
use lexigen_vocab::model::{PropertyDef, Representation, SemanticType};

use crate::report::{Diagnostic, ResolutionReport};

/// Relative preference of a candidate value-type.
///
/// Enumerations make the best filter targets, builtin scalars next, then
/// inlined structs, free text, and finally plain entity references.
/// Unknown names score negative so a property with only unknown candidates
/// is dropped.
fn score_candidate(candidate: &str, graph: &VocabGraph, config: &ResolverConfig) -> i32 {
    // Builtin names are authoritative even when the vocabulary also
    // declares a class of the same name.
    if candidate == config.generic_text_type {
        return 2;
    }
    if config.is_builtin_scalar(candidate) {
        return 4;
    }
    if let Some(node) = graph.get(candidate) {
        return match node.representation {
            Representation::Enum { .. } => 5,
            Representation::Struct => 3,
            _ => 1,
        };
    }
    -1
}

/// Picks the best-scoring candidate; the earliest declared wins ties.
/// Returns `None` when there are no candidates or the best score is
/// negative.
#[must_use]
pub fn best_candidate<'a>(
    def: &'a PropertyDef,
    graph: &VocabGraph,
    config: &ResolverConfig,
) -> Option<&'a str> {
    let mut best: Option<(&str, i32)> = None;
    for candidate in &def.candidate_types {
        let score = score_candidate(candidate, graph, config);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    match best {
        Some((candidate, score)) if score >= 0 => Some(candidate),
        _ => None,
    }
}

/// Resolves one property to `(chosen candidate, semantic type)`.
///
/// Returns `None` for blocked properties and for properties whose best
/// candidate scores negative; both mean the property is dropped from its
/// owning type.
#[must_use]
pub fn resolve_type(
    name: &str,
    def: &PropertyDef,
    graph: &VocabGraph,
    config: &ResolverConfig,
    report: &mut ResolutionReport,
) -> Option<(String, SemanticType)> {
    if config.blocked_properties.contains(name) {
        return None;
    }
    let winner = best_candidate(def, graph, config)?;

    // Array-ness is decided before the override tables get a say; the
    // force-not-array list is checked last and wins.
    let mut is_array = def
        .candidate_types
        .iter()
        .any(|c| graph.get(c).is_some_and(|n| n.is_list_wrapper()))
        || comment_starts_with_article(&def.comment);
    if config.forced_array_properties.contains(name) {
        is_array = true;
    }
    if config.forced_not_array_properties.contains(name) {
        is_array = false;
    }

    let mut semantic = base_semantic(name, winner, graph, config, report);
    if is_array
        && !semantic.is_array()
        && !semantic.is_boolean()
        && !semantic.is_enumerated()
    {
        semantic = SemanticType::Array(Box::new(semantic));
    }

    if let Some(override_type) = config.type_overrides.get(name) {
        semantic = override_type.clone();
    }

    Some((winner.to_owned(), semantic))
}

/// Maps the winning candidate to its un-wrapped semantic type.
fn base_semantic(
    property_name: &str,
    winner: &str,
    graph: &VocabGraph,
    config: &ResolverConfig,
    report: &mut ResolutionReport,
) -> SemanticType {
    if winner == config.generic_text_type {
        return SemanticType::String;
    }
    if winner == config.ambiguous_numeric_type {
        return disambiguate_numeric(property_name, report);
    }
    if let Some(scalar) = config.builtin_scalars.get(winner) {
        return scalar.clone();
    }
    match graph.get(winner).map(|n| &n.representation) {
        Some(Representation::Enum { .. }) => SemanticType::Enumerated(winner.to_owned()),
        Some(Representation::Struct) => SemanticType::Compound {
            class: winner.to_owned(),
            fields: Vec::new(),
        },
        Some(Representation::ListWrapper { element }) => {
            SemanticType::Array(Box::new(element_semantic(element, graph)))
        }
        _ => SemanticType::Entity(winner.to_owned()),
    }
}

/// Semantic type of a list wrapper's element.
fn element_semantic(element: &str, graph: &VocabGraph) -> SemanticType {
    match graph.get(element).map(|n| &n.representation) {
        Some(Representation::Enum { .. }) => SemanticType::Enumerated(element.to_owned()),
        Some(Representation::Struct) => SemanticType::Compound {
            class: element.to_owned(),
            fields: Vec::new(),
        },
        _ => SemanticType::Entity(element.to_owned()),
    }
}

/// The ambiguous numeric-like type resolves by property-name hint, with a
/// diagnostic when no hint applies.
fn disambiguate_numeric(property_name: &str, report: &mut ResolutionReport) -> SemanticType {
    let lowered = property_name.to_lowercase();
    if lowered.contains("quantity") || lowered.contains("level") || lowered.contains("number") {
        return SemanticType::Number;
    }
    if lowered.contains("duration") {
        return SemanticType::Measure("ms".to_owned());
    }
    report.push(Diagnostic::warn(
        "property",
        format!("property `{property_name}` has an ambiguous numeric type; defaulting to number"),
    ));
    SemanticType::Number
}

/// True if the comment opens with an indefinite article, the heuristic
/// proxy for a repeatable field.
fn comment_starts_with_article(comment: &str) -> bool {
    let mut words = comment.trim_start().split_whitespace();
    match words.next() {
        Some(first) => {
            let first = first.to_lowercase();
            first == "a" || first == "an"
        }
        None => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lexigen_vocab::graph::GraphBuilder;
    use lexigen_vocab::model::{ClassStatement, TypeNode};

    fn graph_with(nodes: Vec<TypeNode>) -> VocabGraph {
        let config = ResolverConfig::default();
        let mut builder = GraphBuilder::new(&config);
        let mut graph = {
            for node in &nodes {
                builder
                    .add_class(&ClassStatement {
                        name: node.name.clone(),
                        parents: node.parents.clone(),
                        comment: String::new(),
                    })
                    .unwrap();
            }
            builder.finish()
        };
        for node in nodes {
            let slot = graph.get_mut(&node.name).unwrap();
            slot.representation = node.representation;
            slot.is_struct_lineage = node.is_struct_lineage;
        }
        graph
    }

    fn node(name: &str, representation: Representation) -> TypeNode {
        let mut n = TypeNode::new(name);
        n.representation = representation;
        n
    }

    fn def(candidates: &[&str], comment: &str) -> PropertyDef {
        PropertyDef {
            candidate_types: candidates.iter().map(|s| (*s).to_owned()).collect(),
            comment: comment.to_owned(),
        }
    }

    #[test]
    fn enumeration_outranks_scalar_and_entity() {
        let graph = graph_with(vec![
            node("GenreType", Representation::Enum { values: vec![] }),
            node("CreativeWork", Representation::EntityReference),
        ]);
        let config = ResolverConfig::default();
        let mut report = ResolutionReport::new();
        let (source, semantic) = resolve_type(
            "genre",
            &def(&["CreativeWork", "Text", "GenreType"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(source, "GenreType");
        assert_eq!(semantic, SemanticType::Enumerated("GenreType".to_owned()));
    }

    #[test]
    fn all_unknown_candidates_drop_the_property() {
        let graph = graph_with(vec![]);
        let config = ResolverConfig::default();
        let mut report = ResolutionReport::new();
        assert!(resolve_type(
            "specialty",
            &def(&["Specialty", "MedicalSpecialty"], ""),
            &graph,
            &config,
            &mut report,
        )
        .is_none());
    }

    #[test]
    fn comment_article_implies_array() {
        let graph = graph_with(vec![node("Organization", Representation::EntityReference)]);
        let config = ResolverConfig::default();
        let mut report = ResolutionReport::new();
        let (_, semantic) = resolve_type(
            "affiliation",
            &def(&["Organization"], "An organization this person is affiliated with."),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(
            semantic,
            SemanticType::Array(Box::new(SemanticType::Entity("Organization".to_owned())))
        );
    }

    #[test]
    fn forced_not_array_wins_over_article_and_wrapper_candidates() {
        let graph = graph_with(vec![
            node(
                "ReviewList",
                Representation::ListWrapper {
                    element: "Review".to_owned(),
                },
            ),
            node("Review", Representation::EntityReference),
        ]);
        let mut config = ResolverConfig::default();
        config.forced_array_properties.insert("review".to_owned());
        config.forced_not_array_properties.insert("review".to_owned());
        let mut report = ResolutionReport::new();
        let (_, semantic) = resolve_type(
            "review",
            &def(&["Review"], "A review of the item."),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(semantic, SemanticType::Entity("Review".to_owned()));
    }

    #[test]
    fn list_wrapper_winner_is_not_double_wrapped() {
        let graph = graph_with(vec![
            node(
                "ReviewList",
                Representation::ListWrapper {
                    element: "Review".to_owned(),
                },
            ),
            node("Review", Representation::EntityReference),
        ]);
        let mut config = ResolverConfig::default();
        config.forced_array_properties.insert("reviews".to_owned());
        let mut report = ResolutionReport::new();
        let (source, semantic) = resolve_type(
            "reviews",
            &def(&["ReviewList"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(source, "ReviewList");
        assert_eq!(
            semantic,
            SemanticType::Array(Box::new(SemanticType::Entity("Review".to_owned())))
        );
    }

    #[test]
    fn booleans_and_enums_never_become_arrays() {
        let graph = graph_with(vec![node(
            "DayOfWeek",
            Representation::Enum { values: vec![] },
        )]);
        let mut config = ResolverConfig::default();
        config.forced_array_properties.insert("isAccessible".to_owned());
        config.forced_array_properties.insert("dayOfWeek".to_owned());
        let mut report = ResolutionReport::new();

        let (_, semantic) = resolve_type(
            "isAccessible",
            &def(&["Boolean"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(semantic, SemanticType::Boolean);

        let (_, semantic) = resolve_type(
            "dayOfWeek",
            &def(&["DayOfWeek"], "A day of the week."),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(semantic, SemanticType::Enumerated("DayOfWeek".to_owned()));
    }

    #[test]
    fn type_override_replaces_computed_type() {
        let graph = graph_with(vec![]);
        let mut config = ResolverConfig::default();
        config
            .type_overrides
            .insert("telephone".to_owned(), SemanticType::String);
        let mut report = ResolutionReport::new();
        let (source, semantic) = resolve_type(
            "telephone",
            &def(&["Number"], "A contact number."),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        // Provenance still records the scored winner.
        assert_eq!(source, "Number");
        assert_eq!(semantic, SemanticType::String);
    }

    #[test]
    fn ambiguous_numeric_disambiguates_by_name() {
        let graph = graph_with(vec![]);
        let config = ResolverConfig::default();
        let mut report = ResolutionReport::new();

        let (_, semantic) = resolve_type(
            "cookingDuration",
            &def(&["Quantity"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(semantic, SemanticType::Measure("ms".to_owned()));

        let (_, semantic) = resolve_type(
            "streetNumber",
            &def(&["Quantity"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(semantic, SemanticType::Number);
        assert_eq!(report.warning_count(), 0);

        let (_, semantic) = resolve_type(
            "yearsInOperation",
            &def(&["Quantity"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(semantic, SemanticType::Number);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn blocked_property_resolves_to_none() {
        let graph = graph_with(vec![]);
        let config = ResolverConfig::default();
        let mut report = ResolutionReport::new();
        assert!(resolve_type("sameAs", &def(&["Text"], ""), &graph, &config, &mut report).is_none());
    }

    #[test]
    fn tie_breaks_on_earliest_candidate() {
        let graph = graph_with(vec![
            node("Person", Representation::EntityReference),
            node("Organization", Representation::EntityReference),
        ]);
        let config = ResolverConfig::default();
        let mut report = ResolutionReport::new();
        let (source, _) = resolve_type(
            "provider",
            &def(&["Person", "Organization"], ""),
            &graph,
            &config,
            &mut report,
        )
        .unwrap();
        assert_eq!(source, "Person");
    }
}
