//! Vocabulary graph arena and builder.
//!
//! The graph is an arena: nodes live in a `Vec` in first-declaration order
//! (the order every later phase iterates and breaks ties in), with a
//! name-to-index map beside it. Traversal functions take the arena and a
//! starting key explicitly; no traversal closes over shared mutable state.

use std::collections::HashMap;

use crate::config::ResolverConfig;
use crate::model::{
    ClassStatement, InstanceStatement, PropertyDef, PropertyStatement, TypeNode,
};

/// A malformed statement shape. Fatal: a consistent graph cannot be
/// recovered, so the whole run aborts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// A class statement with an empty name.
    #[error("class statement with empty name")]
    EmptyClassName,
    /// A property statement with an empty name.
    #[error("property statement with empty name (domains: {0:?})")]
    EmptyPropertyName(Vec<String>),
    /// An instance statement with an empty name.
    #[error("instance statement with empty name (class `{0}`)")]
    EmptyInstanceName(String),
    /// A property statement without any domain class.
    #[error("property `{0}` has no domain classes")]
    MissingDomain(String),
    /// A property statement without any candidate range type.
    #[error("property `{0}` has no candidate range types")]
    MissingRange(String),
    /// A property statement naming a domain class that was never declared.
    #[error("property `{property}` declared on unknown class `{domain}`")]
    UnknownDomain {
        /// The property name.
        property: String,
        /// The undeclared domain class.
        domain: String,
    },
    /// An instance statement naming a class that was never declared.
    #[error("instance `{instance}` declared for unknown class `{class}`")]
    UnknownInstanceClass {
        /// The instance name.
        instance: String,
        /// The undeclared class.
        class: String,
    },
}

/// The in-memory vocabulary graph: an insertion-ordered arena of
/// [`TypeNode`]s.
#[derive(Debug, Clone, Default)]
pub struct VocabGraph {
    nodes: Vec<TypeNode>,
    index: HashMap<String, usize>,
}

impl VocabGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a node by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Looks up a node by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeNode> {
        let idx = self.index.get(name).copied()?;
        self.nodes.get_mut(idx)
    }

    /// Returns true if a node with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over nodes in first-declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter()
    }

    /// Node names in first-declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `start` is, or transitively extends, `target` via
    /// `parents`. Parent names without a declared node are skipped; parent
    /// cycles are tolerated.
    #[must_use]
    pub fn extends(&self, start: &str, target: &str) -> bool {
        if start == target {
            return true;
        }
        let mut visited: Vec<&str> = Vec::new();
        let mut stack: Vec<&str> = vec![start];
        while let Some(name) = stack.pop() {
            let Some(node) = self.get(name) else { continue };
            for parent in &node.parents {
                if parent == target {
                    return true;
                }
                if !visited.contains(&parent.as_str()) {
                    visited.push(parent.as_str());
                    stack.push(parent.as_str());
                }
            }
        }
        false
    }

    fn insert(&mut self, node: TypeNode) -> usize {
        let idx = self.nodes.len();
        self.index.insert(node.name.clone(), idx);
        self.nodes.push(node);
        idx
    }
}

/// Assembles a [`VocabGraph`] from raw statements, merging duplicates and
/// applying the configured block-lists.
///
/// Classes must be added before the properties and instances that
/// reference them; [`build_graph`] enforces that ordering.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    config: &'a ResolverConfig,
    graph: VocabGraph,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder using the given configuration's block-lists.
    #[must_use]
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self {
            config,
            graph: VocabGraph::new(),
        }
    }

    /// Adds a class statement, merging into an existing node when the
    /// class was already declared. Blocked classes are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyClassName`] for a nameless statement.
    pub fn add_class(&mut self, stmt: &ClassStatement) -> Result<(), GraphError> {
        if stmt.name.is_empty() {
            return Err(GraphError::EmptyClassName);
        }
        if self.config.blocked_classes.contains(&stmt.name) {
            return Ok(());
        }
        let idx = match self.graph.index.get(&stmt.name) {
            Some(&i) => i,
            None => self.graph.insert(TypeNode::new(&stmt.name)),
        };
        let node = &mut self.graph.nodes[idx];
        for parent in &stmt.parents {
            if !node.parents.contains(parent) {
                node.parents.push(parent.clone());
            }
        }
        if node.comment.is_empty() {
            node.comment = stmt.comment.clone();
        }
        Ok(())
    }

    /// Adds a property statement, attaching a [`PropertyDef`] to every
    /// declared domain class. Blocked properties, and blocked domain
    /// classes, are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for a nameless statement, a statement with
    /// no domains or ranges, or a domain naming an undeclared class.
    pub fn add_property(&mut self, stmt: &PropertyStatement) -> Result<(), GraphError> {
        if stmt.name.is_empty() {
            return Err(GraphError::EmptyPropertyName(stmt.domains.clone()));
        }
        if stmt.domains.is_empty() {
            return Err(GraphError::MissingDomain(stmt.name.clone()));
        }
        if stmt.ranges.is_empty() {
            return Err(GraphError::MissingRange(stmt.name.clone()));
        }
        if self.config.blocked_properties.contains(&stmt.name) {
            return Ok(());
        }
        for domain in &stmt.domains {
            if self.config.blocked_classes.contains(domain) {
                continue;
            }
            let Some(node) = self.graph.get_mut(domain) else {
                return Err(GraphError::UnknownDomain {
                    property: stmt.name.clone(),
                    domain: domain.clone(),
                });
            };
            let def = node
                .properties
                .entry(stmt.name.clone())
                .or_insert_with(|| PropertyDef {
                    candidate_types: Vec::new(),
                    comment: stmt.comment.clone(),
                });
            for range in &stmt.ranges {
                if !def.candidate_types.contains(range) {
                    def.candidate_types.push(range.clone());
                }
            }
            if def.comment.is_empty() {
                def.comment = stmt.comment.clone();
            }
        }
        Ok(())
    }

    /// Adds a named-instance statement to its class's declared instances.
    /// Instances of blocked classes are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for a nameless statement or an undeclared
    /// class.
    pub fn add_instance(&mut self, stmt: &InstanceStatement) -> Result<(), GraphError> {
        if stmt.name.is_empty() {
            return Err(GraphError::EmptyInstanceName(stmt.class_name.clone()));
        }
        if self.config.blocked_classes.contains(&stmt.class_name) {
            return Ok(());
        }
        let Some(node) = self.graph.get_mut(&stmt.class_name) else {
            return Err(GraphError::UnknownInstanceClass {
                instance: stmt.name.clone(),
                class: stmt.class_name.clone(),
            });
        };
        if !node.declared_instances.contains(&stmt.name) {
            node.declared_instances.push(stmt.name.clone());
        }
        Ok(())
    }

    /// Consumes the builder and returns the finished graph.
    #[must_use]
    pub fn finish(self) -> VocabGraph {
        self.graph
    }
}

/// Builds a complete graph from raw statements: all classes first, then
/// properties, then instances.
///
/// # Errors
///
/// Returns the first [`GraphError`] encountered; the run aborts on any
/// malformed statement.
pub fn build_graph(
    classes: &[ClassStatement],
    properties: &[PropertyStatement],
    instances: &[InstanceStatement],
    config: &ResolverConfig,
) -> Result<VocabGraph, GraphError> {
    let mut builder = GraphBuilder::new(config);
    for stmt in classes {
        builder.add_class(stmt)?;
    }
    for stmt in properties {
        builder.add_property(stmt)?;
    }
    for stmt in instances {
        builder.add_instance(stmt)?;
    }
    Ok(builder.finish())
}
