//! Directive tree
//!
//! A [`Node`] is either the synthetic document root or a single
//! directive, block or comment line. Parents own their children outright;
//! nothing points back up the tree.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Marker that starts a comment line.
pub const COMMENT_MARKER: char = '#';

/// A configuration node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "is_false")]
    root: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    directive: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Node {
    /// Build a node from a statement: the first word is the directive,
    /// the remaining words are its arguments.
    ///
    /// A root node must come from an empty statement and a non-root node
    /// must not.
    pub fn new(statement: Vec<String>, root: bool) -> Result<Self> {
        let mut words = statement.into_iter();
        let directive = words.next().unwrap_or_default();
        let args: Vec<String> = words.collect();

        if root && !directive.is_empty() {
            return Err(Error::RootDirective(directive));
        }
        if !root && directive.is_empty() {
            return Err(Error::NonRootMissingDirective);
        }

        Ok(Self {
            root,
            directive,
            args,
            children: Vec::new(),
        })
    }

    /// An empty document root
    pub fn root() -> Self {
        Self {
            root: true,
            directive: String::new(),
            args: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether the node renders as `directive args { ... }`
    pub fn is_block(&self) -> bool {
        !self.root && !self.children.is_empty()
    }

    /// Whether the node is a comment line
    pub fn is_comment(&self) -> bool {
        self.directive.starts_with(COMMENT_MARKER)
    }

    /// Append a child at the end of the children list.
    pub fn push_child(&mut self, child: Node) -> Result<()> {
        if child.root {
            return Err(Error::NestedRoot);
        }
        self.children.push(child);
        Ok(())
    }

    /// Check the tree invariants for this node and all of its descendants.
    pub fn validate(&self) -> Result<()> {
        if self.root && !self.directive.is_empty() {
            return Err(Error::RootDirective(self.directive.clone()));
        }
        if !self.root && self.directive.is_empty() {
            return Err(Error::NonRootMissingDirective);
        }
        for child in &self.children {
            if child.root {
                return Err(Error::NestedRoot);
            }
            child.validate()?;
        }
        Ok(())
    }

    /// Whether this node is named `directive` and its arguments start
    /// with `args`.
    fn matches(&self, directive: &str, args: &[&str]) -> bool {
        self.directive == directive
            && self.args.len() >= args.len()
            && self.args.iter().zip(args).all(|(have, want)| have == want)
    }

    /// Return the direct children named `directive` whose arguments start
    /// with `args`, in source order.
    ///
    /// With empty `args` the directive name alone decides.
    pub fn get(&self, directive: &str, args: &[&str]) -> Vec<&Node> {
        self.children
            .iter()
            .filter(|child| child.matches(directive, args))
            .collect()
    }

    /// Mutable variant of [`Node::get`].
    pub fn get_mut(&mut self, directive: &str, args: &[&str]) -> Vec<&mut Node> {
        self.children
            .iter_mut()
            .filter(|child| child.matches(directive, args))
            .collect()
    }

    /// Add a simple child and return it.
    ///
    /// If a child already matches `get(directive, args)`, the first one is
    /// returned unchanged and nothing is appended.
    ///
    /// An empty `directive` names no valid child: nothing is appended and
    /// `self` is returned.
    pub fn add(&mut self, directive: &str, args: &[&str]) -> &mut Node {
        if directive.is_empty() {
            tracing::warn!("refusing to add a node without a directive");
            return self;
        }

        let index = match self
            .children
            .iter()
            .position(|child| child.matches(directive, args))
        {
            Some(index) => index,
            None => {
                tracing::debug!("adding `{} {}`", directive, args.join(" "));
                self.children.push(Node {
                    root: false,
                    directive: directive.to_string(),
                    args: args.iter().map(|arg| arg.to_string()).collect(),
                    children: Vec::new(),
                });
                self.children.len() - 1
            }
        };

        &mut self.children[index]
    }

    /// Remove every direct child matched by `get(directive, args)`.
    ///
    /// With empty `args` all children named `directive` are removed.
    pub fn del(&mut self, directive: &str, args: &[&str]) {
        let before = self.children.len();
        self.children.retain(|child| !child.matches(directive, args));

        let removed = before - self.children.len();
        if removed > 0 {
            tracing::debug!("removed {} `{}` node(s)", removed, directive);
        }
    }
}
