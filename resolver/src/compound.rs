//! Compound field assembly for struct-representable types.
//!
//! A struct-representable class inlines its instances wherever they appear
//! as property values, so its full field set — own properties plus those
//! inherited along the struct lineage — is assembled here. Termination is
//! guaranteed because the classifier has already broken every cycle in the
//! struct-reference graph.

use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::graph::VocabGraph;
use lexigen_vocab::model::{PropertyDef, ResolvedField, SemanticType};

use crate::canonical::CanonicalSynthesizer;
use crate::property;
use crate::report::ResolutionReport;

/// A fatal resolution failure.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A struct-representable type kept zero fields after resolution; an
    /// empty compound cannot be emitted meaningfully.
    #[error("structured type `{0}` resolved to zero fields")]
    EmptyCompound(String),
}

/// Assembles the ordered field list for a struct-representable class.
///
/// Fields are collected from the class and its ancestors (first-seen name
/// wins, so a more specific declaration is never overwritten), stopping at
/// the struct-lineage boundary unless the class is configured to include
/// universal-root properties. Each collected property is resolved and
/// canonicalized; dropped properties are skipped.
///
/// # Errors
///
/// Returns [`ResolveError::EmptyCompound`] when no field survives.
pub fn build_compound(
    type_name: &str,
    graph: &VocabGraph,
    config: &ResolverConfig,
    synthesizer: &CanonicalSynthesizer<'_>,
    report: &mut ResolutionReport,
) -> Result<Vec<ResolvedField>, ResolveError> {
    let mut collected: Vec<(String, PropertyDef)> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    collect_properties(graph, config, type_name, type_name, &mut collected, &mut seen);

    let mut fields = Vec::new();
    for (name, def) in collected {
        let Some(field) = resolve_field(&name, &def, graph, config, synthesizer, report)? else {
            continue;
        };
        fields.push(field);
    }
    if fields.is_empty() {
        return Err(ResolveError::EmptyCompound(type_name.to_owned()));
    }
    Ok(fields)
}

/// Resolves one property into a field, deepening nested compound types.
/// Returns `Ok(None)` for properties that resolve to nothing.
///
/// # Errors
///
/// Propagates [`ResolveError::EmptyCompound`] from nested compound
/// assembly.
pub fn resolve_field(
    name: &str,
    def: &PropertyDef,
    graph: &VocabGraph,
    config: &ResolverConfig,
    synthesizer: &CanonicalSynthesizer<'_>,
    report: &mut ResolutionReport,
) -> Result<Option<ResolvedField>, ResolveError> {
    let Some((source_type, shallow)) = property::resolve_type(name, def, graph, config, report)
    else {
        return Ok(None);
    };
    let semantic_type = deepen(shallow, graph, config, synthesizer, report)?;
    let canonical = synthesizer.synthesize(
        name,
        &semantic_type,
        config.external_labels.get(name).map(Vec::as_slice),
    );
    Ok(Some(ResolvedField {
        name: name.to_owned(),
        semantic_type,
        canonical,
        filterable: !config.non_filterable_properties.contains(name),
        source_type,
    }))
}

/// Replaces shallow compound references with their assembled field lists,
/// recursively through arrays.
fn deepen(
    semantic: SemanticType,
    graph: &VocabGraph,
    config: &ResolverConfig,
    synthesizer: &CanonicalSynthesizer<'_>,
    report: &mut ResolutionReport,
) -> Result<SemanticType, ResolveError> {
    match semantic {
        SemanticType::Compound { class, fields } if fields.is_empty() => {
            let fields = build_compound(&class, graph, config, synthesizer, report)?;
            Ok(SemanticType::Compound { class, fields })
        }
        SemanticType::Array(inner) => {
            let inner = deepen(*inner, graph, config, synthesizer, report)?;
            Ok(SemanticType::Array(Box::new(inner)))
        }
        other => Ok(other),
    }
}

/// Walks the node and its parents, collecting properties first-seen-wins.
fn collect_properties(
    graph: &VocabGraph,
    config: &ResolverConfig,
    name: &str,
    start: &str,
    out: &mut Vec<(String, PropertyDef)>,
    seen: &mut Vec<String>,
) {
    let Some(node) = graph.get(name) else { return };
    for (prop_name, def) in &node.properties {
        if !seen.contains(prop_name) {
            seen.push(prop_name.clone());
            out.push((prop_name.clone(), def.clone()));
        }
    }
    for parent in &node.parents {
        let Some(parent_node) = graph.get(parent) else {
            continue;
        };
        // The struct-lineage boundary: ancestors outside the lineage (the
        // universal root above all) contribute nothing unless the starting
        // node opts in.
        if !parent_node.is_struct_lineage && !config.include_root_properties.contains(start) {
            continue;
        }
        collect_properties(graph, config, parent, start, out, seen);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::classify;
    use crate::pos::LexiconTagger;
    use lexigen_vocab::graph::build_graph;
    use lexigen_vocab::model::{ClassStatement, PropertyStatement};

    fn class(name: &str, parents: &[&str]) -> ClassStatement {
        ClassStatement {
            name: name.to_owned(),
            parents: parents.iter().map(|s| (*s).to_owned()).collect(),
            comment: String::new(),
        }
    }

    fn property(name: &str, domains: &[&str], ranges: &[&str]) -> PropertyStatement {
        PropertyStatement {
            name: name.to_owned(),
            domains: domains.iter().map(|s| (*s).to_owned()).collect(),
            ranges: ranges.iter().map(|s| (*s).to_owned()).collect(),
            comment: String::new(),
        }
    }

    fn classified_graph(
        config: &ResolverConfig,
        classes: &[ClassStatement],
        properties: &[PropertyStatement],
    ) -> VocabGraph {
        let mut graph = build_graph(classes, properties, &[], config).unwrap();
        let mut report = ResolutionReport::new();
        classify::classify(&mut graph, config, &mut report);
        graph
    }

    #[test]
    fn inherited_fields_collected_specific_first() {
        let config = ResolverConfig::default();
        let graph = classified_graph(
            &config,
            &[
                class("Thing", &[]),
                class("Rating", &["Thing"]),
                class("AggregateRating", &["Rating"]),
            ],
            &[
                property("ratingValue", &["Rating"], &["Number"]),
                property("reviewCount", &["AggregateRating"], &["Integer"]),
                // Shadowed by the more specific declaration below.
                property("ratingValue", &["AggregateRating"], &["Text"]),
            ],
        );
        let tagger = LexiconTagger;
        let synthesizer = CanonicalSynthesizer::new(&config, &tagger);
        let mut report = ResolutionReport::new();
        let fields =
            build_compound("AggregateRating", &graph, &config, &synthesizer, &mut report).unwrap();

        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ratingValue", "reviewCount"]);
        // The specific (Text) declaration wins over the ancestor's Number.
        let rating_value = &fields[0];
        assert_eq!(rating_value.source_type, "Text");
    }

    #[test]
    fn boundary_excludes_universal_root_properties() {
        let config = ResolverConfig::default();
        let graph = classified_graph(
            &config,
            &[
                class("Thing", &[]),
                class("Intangible", &["Thing"]),
                class("Rating", &["Intangible"]),
            ],
            &[
                property("name", &["Thing"], &["Text"]),
                property("ratingValue", &["Rating"], &["Number"]),
            ],
        );
        let tagger = LexiconTagger;
        let synthesizer = CanonicalSynthesizer::new(&config, &tagger);
        let mut report = ResolutionReport::new();
        let fields = build_compound("Rating", &graph, &config, &synthesizer, &mut report).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ratingValue"]);
    }

    #[test]
    fn include_root_override_crosses_the_boundary() {
        let mut config = ResolverConfig::default();
        config.include_root_properties.insert("Rating".to_owned());
        let graph = classified_graph(
            &config,
            &[
                class("Thing", &[]),
                class("Rating", &["Thing"]),
            ],
            &[
                property("name", &["Thing"], &["Text"]),
                property("ratingValue", &["Rating"], &["Number"]),
            ],
        );
        let tagger = LexiconTagger;
        let synthesizer = CanonicalSynthesizer::new(&config, &tagger);
        let mut report = ResolutionReport::new();
        let fields = build_compound("Rating", &graph, &config, &synthesizer, &mut report).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ratingValue", "name"]);
    }

    #[test]
    fn zero_surviving_fields_is_a_named_failure() {
        let config = ResolverConfig::default();
        let graph = classified_graph(
            &config,
            &[class("Thing", &[]), class("Rating", &["Thing"])],
            &[property("ratingExplanation", &["Rating"], &["UnknownType"])],
        );
        let tagger = LexiconTagger;
        let synthesizer = CanonicalSynthesizer::new(&config, &tagger);
        let mut report = ResolutionReport::new();
        let err = build_compound("Rating", &graph, &config, &synthesizer, &mut report).unwrap_err();
        assert!(matches!(err, ResolveError::EmptyCompound(name) if name == "Rating"));
    }

    #[test]
    fn nested_compounds_are_deepened() {
        let config = ResolverConfig::default();
        let graph = classified_graph(
            &config,
            &[
                class("Thing", &[]),
                class("Offer", &["Thing"]),
                class("Rating", &["Thing"]),
            ],
            &[
                property("priceRating", &["Offer"], &["Rating"]),
                property("ratingValue", &["Rating"], &["Number"]),
            ],
        );
        let tagger = LexiconTagger;
        let synthesizer = CanonicalSynthesizer::new(&config, &tagger);
        let mut report = ResolutionReport::new();
        let fields = build_compound("Offer", &graph, &config, &synthesizer, &mut report).unwrap();
        match &fields[0].semantic_type {
            SemanticType::Compound { class, fields } => {
                assert_eq!(class, "Rating");
                assert_eq!(fields[0].name, "ratingValue");
            }
            other => panic!("expected compound, got {other:?}"),
        }
    }
}
