//! Resolver configuration tables.
//!
//! Every block-list and override the pipeline consults lives in one
//! immutable [`ResolverConfig`] value with an explicit named field per
//! table. The `Default` impl carries the standard web-vocabulary tables;
//! callers targeting a different vocabulary replace fields as needed.

use std::collections::{HashMap, HashSet};

use crate::model::{CanonicalRecord, SemanticType};

/// Static configuration for the classification/resolution/synthesis
/// pipeline.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Classes excluded from the graph entirely.
    pub blocked_classes: HashSet<String>,
    /// Properties excluded from the graph entirely.
    pub blocked_properties: HashSet<String>,

    /// Root class marking action types ("Action").
    pub action_root: String,
    /// Root class marking enumeration types ("Enumeration").
    pub enum_root: String,
    /// The universal root type ("Thing"), also the fallback element type
    /// for unrecognizable list wrappers.
    pub universal_root: String,
    /// Root class marking list-wrapper types ("ItemList").
    pub collection_root: String,
    /// Name suffixes stripped from a list wrapper to find its element type.
    pub collection_suffixes: Vec<String>,

    /// Roots of the designated structured-value lineages. A class that is,
    /// or transitively extends, one of these is struct-lineage.
    pub struct_roots: Vec<String>,
    /// Classes forced out of struct representation regardless of lineage.
    pub forced_non_struct: HashSet<String>,

    /// Properties forced to array type.
    pub forced_array_properties: HashSet<String>,
    /// Properties forced to non-array type; wins over the forced-array set
    /// when both name the same property.
    pub forced_not_array_properties: HashSet<String>,

    /// Per-property semantic type overrides; replace the computed type
    /// outright.
    pub type_overrides: HashMap<String, SemanticType>,
    /// Per-property canonical overrides, always active.
    pub canonical_overrides: HashMap<String, CanonicalRecord>,
    /// Per-property canonical overrides consulted only in manual
    /// annotation mode.
    pub manual_canonical_overrides: HashMap<String, CanonicalRecord>,
    /// Whether manual annotation mode is active.
    pub manual_mode: bool,

    /// Properties downstream generators must not build filters over.
    pub non_filterable_properties: HashSet<String>,
    /// Classes whose compound field collection crosses the struct-lineage
    /// boundary into the universal root.
    pub include_root_properties: HashSet<String>,
    /// When no classification rule produced any phrase, fall back to the
    /// raw identifier as a single base template.
    pub always_base_canonical: bool,

    /// The generic free-text range name ("Text").
    pub generic_text_type: String,
    /// The ambiguous numeric-like range name, disambiguated by property
    /// name ("Quantity").
    pub ambiguous_numeric_type: String,
    /// Builtin scalar range names and the semantic type each maps to.
    pub builtin_scalars: HashMap<String, SemanticType>,

    /// Optional external label source: property name to ordered candidate
    /// phrases collected from human annotation.
    pub external_labels: HashMap<String, Vec<String>>,
}

fn names(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let builtin_scalars: HashMap<String, SemanticType> = [
            ("Number", SemanticType::Number),
            ("Integer", SemanticType::Number),
            ("Float", SemanticType::Number),
            ("Boolean", SemanticType::Boolean),
            ("Date", SemanticType::Date),
            ("DateTime", SemanticType::Date),
            ("Time", SemanticType::Time),
            ("Duration", SemanticType::Measure("ms".to_owned())),
            ("Mass", SemanticType::Measure("kg".to_owned())),
            ("Energy", SemanticType::Measure("kcal".to_owned())),
            ("Distance", SemanticType::Measure("m".to_owned())),
            ("PriceSpecification", SemanticType::Currency),
        ]
        .into_iter()
        .map(|(name, t)| (name.to_owned(), t))
        .collect();

        Self {
            // Meta-vocabulary classes that never describe instances.
            blocked_classes: names(&["DataType", "Class", "Property"]),
            blocked_properties: names(&[
                "sameAs",
                "url",
                "additionalType",
                "identifier",
                "mainEntityOfPage",
                "potentialAction",
                "subjectOf",
            ]),

            action_root: "Action".to_owned(),
            enum_root: "Enumeration".to_owned(),
            universal_root: "Thing".to_owned(),
            collection_root: "ItemList".to_owned(),
            collection_suffixes: vec![
                "List".to_owned(),
                "Collection".to_owned(),
                "Section".to_owned(),
                "Catalog".to_owned(),
            ],

            struct_roots: vec![
                "StructuredValue".to_owned(),
                "Rating".to_owned(),
                "Offer".to_owned(),
            ],
            forced_non_struct: names(&["QualitativeValue", "BroadcastService"]),

            forced_array_properties: names(&["image", "keywords", "review", "worksFor"]),
            forced_not_array_properties: names(&["name", "description"]),

            type_overrides: HashMap::new(),
            canonical_overrides: HashMap::new(),
            manual_canonical_overrides: HashMap::new(),
            manual_mode: false,

            non_filterable_properties: names(&["name", "description", "image", "logo"]),
            include_root_properties: HashSet::new(),
            always_base_canonical: true,

            generic_text_type: "Text".to_owned(),
            ambiguous_numeric_type: "Quantity".to_owned(),
            builtin_scalars,

            external_labels: HashMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Returns true if the range name is a builtin scalar (including the
    /// ambiguous numeric-like type).
    #[must_use]
    pub fn is_builtin_scalar(&self, range: &str) -> bool {
        range == self.ambiguous_numeric_type || self.builtin_scalars.contains_key(range)
    }
}
