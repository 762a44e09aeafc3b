//! Core vocabulary model types.
//!
//! These types represent a raw web vocabulary (classes, properties, named
//! instances) and everything the resolution pipeline derives from it:
//! representation strategies, semantic types, canonical phrase records, and
//! the emitted type definitions. Raw statements are produced by an external
//! markup parser; the graph itself is assembled by
//! [`GraphBuilder`](crate::graph::GraphBuilder).

use std::collections::BTreeMap;

/// A raw class declaration: `{name, parentNames[], comment}`.
///
/// Duplicate declarations of the same class are merged by the graph builder
/// (parents unioned in order, first non-empty comment wins).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassStatement {
    /// Class name, unique within the vocabulary.
    pub name: String,
    /// Names of parent classes, in declaration order.
    pub parents: Vec<String>,
    /// Free-text description.
    pub comment: String,
}

/// A raw property declaration: `{name, domainClassNames[], rangeTypeNames[], comment}`.
///
/// The property is attached to every listed domain class; the ranges become
/// the candidate value-types scored by the property type resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyStatement {
    /// Property name.
    pub name: String,
    /// Classes this property is declared on.
    pub domains: Vec<String>,
    /// Candidate value-type names, in declaration order.
    pub ranges: Vec<String>,
    /// Free-text description, consumed by the array-ness heuristic.
    pub comment: String,
}

/// A raw named-instance declaration: an individual of a class.
///
/// Directly declared instances are the source of explicit enumeration
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceStatement {
    /// Instance name.
    pub name: String,
    /// Name of the class this instance belongs to.
    pub class_name: String,
}

/// A property as attached to a class node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDef {
    /// Candidate value-type names (ranges), in declaration order.
    pub candidate_types: Vec<String>,
    /// Free-text description.
    pub comment: String,
}

/// How instances of a class are represented downstream.
///
/// Closed set: every class ends up as exactly one of these after
/// classification. The default before classification is
/// [`Representation::EntityReference`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Representation {
    /// A closed enumeration; carries the directly declared values in
    /// declaration order. Empty only for purely inherited enumerations.
    Enum {
        /// Directly declared instance names.
        values: Vec<String>,
    },
    /// A "list of X" wrapper class; never emitted itself, collapses to an
    /// array of the element type.
    ListWrapper {
        /// Name of the element type the wrapper collapses to.
        element: String,
    },
    /// An inlined structured value: instances appear as compound values
    /// wherever the class is used as a property's value type.
    Struct,
    /// Addressed by reference to an instance of the class.
    EntityReference,
}

/// A class node in the vocabulary graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeNode {
    /// Class name, the node's unique key.
    pub name: String,
    /// Parent class names, in declaration order. Names that never resolve
    /// to a declared node are kept (external upper-ontology references)
    /// and skipped by traversals.
    pub parents: Vec<String>,
    /// Properties declared on this class.
    pub properties: BTreeMap<String, PropertyDef>,
    /// Free-text description.
    pub comment: String,
    /// Directly declared instance names, in declaration order.
    pub declared_instances: Vec<String>,
    /// Whether this class transitively extends the action root.
    pub is_action: bool,
    /// Whether this class sits within a designated structured-value
    /// lineage, independent of whether it is currently struct-representable
    /// after demotion.
    pub is_struct_lineage: bool,
    /// Representation strategy, assigned by the classifier.
    pub representation: Representation,
}

impl TypeNode {
    /// Creates a fresh, unclassified node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            properties: BTreeMap::new(),
            comment: String::new(),
            declared_instances: Vec::new(),
            is_action: false,
            is_struct_lineage: false,
            representation: Representation::EntityReference,
        }
    }

    /// Returns true if the node is currently struct-representable.
    #[must_use]
    pub fn is_struct(&self) -> bool {
        self.representation == Representation::Struct
    }

    /// Returns true if the node is an enumeration.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.representation, Representation::Enum { .. })
    }

    /// Returns true if the node is a list wrapper.
    #[must_use]
    pub fn is_list_wrapper(&self) -> bool {
        matches!(self.representation, Representation::ListWrapper { .. })
    }
}

/// The semantic type a property resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SemanticType {
    /// Free-form text.
    String,
    /// A plain number.
    Number,
    /// A monetary amount.
    Currency,
    /// A measured quantity with a fixed unit code (e.g. `"ms"`, `"kg"`).
    Measure(String),
    /// A calendar date.
    Date,
    /// A time of day.
    Time,
    /// A boolean flag.
    Boolean,
    /// A value of a closed enumeration class.
    Enumerated(String),
    /// An inlined structured value of the named class, carrying the
    /// assembled field list. The field list is empty while the type is
    /// still shallow (before compound assembly).
    Compound {
        /// The struct-representable class.
        class: String,
        /// Assembled fields; empty until deepened by the compound builder.
        fields: Vec<ResolvedField>,
    },
    /// A reference to an instance of the named class.
    Entity(String),
    /// An array of the inner type.
    Array(Box<SemanticType>),
}

impl SemanticType {
    /// Returns true if this is an array type.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, SemanticType::Array(_))
    }

    /// Returns true if this is a measured quantity (directly, not through
    /// an array).
    #[must_use]
    pub fn is_measure(&self) -> bool {
        matches!(self, SemanticType::Measure(_))
    }

    /// Returns true if this is a boolean.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, SemanticType::Boolean)
    }

    /// Returns true if this is an enumerated type.
    #[must_use]
    pub fn is_enumerated(&self) -> bool {
        matches!(self, SemanticType::Enumerated(_))
    }
}

/// Grammatical role of a canonical phrase template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhraseRole {
    /// Base noun phrase ("rating", "director").
    Base,
    /// Verb phrase with an optional `#` value placeholder ("works # for").
    Verb,
    /// Passive verb / predicative phrase ("available", "written by").
    PassiveVerb,
    /// Adjective phrase, populated through override tables.
    Adjective,
    /// Possessive property phrase, populated through override tables.
    Property,
    /// Reverse-property phrase ("author of").
    ReverseProperty,
}

impl PhraseRole {
    /// Returns the role's key string as used in override tables and output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PhraseRole::Base => "base",
            PhraseRole::Verb => "verb",
            PhraseRole::PassiveVerb => "passive_verb",
            PhraseRole::Adjective => "adjective",
            PhraseRole::Property => "property",
            PhraseRole::ReverseProperty => "reverse_property",
        }
    }
}

/// The set of canonical phrase templates for one property, keyed by
/// grammatical role.
///
/// A template is literal text with an optional single `#` placeholder
/// standing for the property's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalRecord {
    entries: BTreeMap<PhraseRole, Vec<String>>,
}

impl CanonicalRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(role, templates)` pairs, mainly for override
    /// tables.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (PhraseRole, Vec<S>)>,
        S: Into<String>,
    {
        let mut record = Self::new();
        for (role, templates) in pairs {
            for t in templates {
                record.push(role, t);
            }
        }
        record
    }

    /// Appends a template to a role's sequence unless the role already
    /// holds an identical entry.
    pub fn push(&mut self, role: PhraseRole, template: impl Into<String>) {
        let template = template.into();
        let list = self.entries.entry(role).or_default();
        if !list.contains(&template) {
            list.push(template);
        }
    }

    /// Returns the templates recorded for a role.
    #[must_use]
    pub fn get(&self, role: PhraseRole) -> &[String] {
        self.entries.get(&role).map_or(&[], Vec::as_slice)
    }

    /// Returns true if no role holds any template.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Iterates over `(role, templates)` in role order.
    pub fn iter(&self) -> impl Iterator<Item = (PhraseRole, &[String])> {
        self.entries.iter().map(|(role, v)| (*role, v.as_slice()))
    }
}

/// A property after resolution: target type, canonical phrases, and
/// provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedField {
    /// Property name.
    pub name: String,
    /// The resolved semantic type.
    pub semantic_type: SemanticType,
    /// Canonical phrase templates for sentence generation.
    pub canonical: CanonicalRecord,
    /// Whether downstream generators may build filters over this field.
    pub filterable: bool,
    /// The candidate type chosen by scoring, kept for provenance and
    /// override lookups.
    pub source_type: String,
}

/// An emitted type definition, ready for a downstream grammar serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDefinition {
    /// Class name.
    pub name: String,
    /// Parent class names, in declaration order.
    pub parents: Vec<String>,
    /// The class's own resolved fields; inherited fields come through
    /// `parents` downstream.
    pub fields: Vec<ResolvedField>,
}
