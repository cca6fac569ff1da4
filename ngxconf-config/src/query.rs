//! Path selectors
//!
//! A selector is a `/`-separated list of steps, each step being a
//! directive followed by an argument prefix:
//!
//! ```text
//! stream/upstream backend/server backend1:443
//! ```
//!
//! Every step is resolved with [`Node::get`], so arguments match by
//! prefix and all matches are followed.

use ngxconf_core::Node;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("step {index} of the selector has no directive")]
    EmptyStep { index: usize },
}

/// One step of a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub directive: String,
    pub args: Vec<String>,
}

impl Step {
    fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directive)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A path of steps from some node down to its descendants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// All nodes reached by following the steps from `node`.
    pub fn select<'a>(&self, node: &'a Node) -> Vec<&'a Node> {
        let mut current = vec![node];
        for step in &self.steps {
            let args = step.arg_refs();
            current = current
                .into_iter()
                .flat_map(|n| n.get(&step.directive, &args))
                .collect();
        }
        current
    }

    /// Mutable variant of [`Selector::select`].
    pub fn select_mut<'a>(&self, node: &'a mut Node) -> Vec<&'a mut Node> {
        select_steps_mut(node, &self.steps)
    }

    /// Split into the path leading to the parents and the final step.
    ///
    /// The parent path may be empty, in which case it selects the node
    /// it is applied to.
    pub fn split_last(&self) -> Option<(Selector, &Step)> {
        let (last, parents) = self.steps.split_last()?;
        let parents = Selector {
            steps: parents.to_vec(),
        };
        Some((parents, last))
    }
}

fn select_steps_mut<'a>(node: &'a mut Node, steps: &[Step]) -> Vec<&'a mut Node> {
    match steps.split_first() {
        None => vec![node],
        Some((step, rest)) => {
            let args = step.arg_refs();
            node.get_mut(&step.directive, &args)
                .into_iter()
                .flat_map(|child| select_steps_mut(child, rest))
                .collect()
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let steps = s
            .split('/')
            .enumerate()
            .map(|(index, part)| -> Result<Step, SelectorError> {
                let mut words = part.split_whitespace().map(str::to_string);
                let directive = words.next().ok_or(SelectorError::EmptyStep { index })?;
                Ok(Step {
                    directive,
                    args: words.collect(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Selector { steps })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const CONF: &str = "
stream {
    upstream backend {
        server backend1:443 max_fails=3;
        server backend2:443;
    }
    upstream cache {
        server cache1:6379;
    }
}";

    #[test]
    fn test_parse_selector() {
        let selector: Selector = "stream/upstream  backend/server".parse().unwrap();
        assert_eq!(selector.steps().len(), 3);
        assert_eq!(selector.steps()[1].directive, "upstream");
        assert_eq!(selector.steps()[1].args, vec!["backend".to_string()]);
        assert_eq!(selector.to_string(), "stream/upstream backend/server");
    }

    #[test]
    fn test_invalid_selectors() {
        assert_eq!("".parse::<Selector>(), Err(SelectorError::Empty));
        assert_eq!(
            "http//server".parse::<Selector>(),
            Err(SelectorError::EmptyStep { index: 1 })
        );
    }

    #[test]
    fn test_select_follows_all_matches() {
        let root = parse(CONF).unwrap();
        let servers = "stream/upstream/server".parse::<Selector>().unwrap();
        assert_eq!(servers.select(&root).len(), 3);

        let backend = "stream/upstream backend/server backend1:443"
            .parse::<Selector>()
            .unwrap();
        let found = backend.select(&root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].args(), ["backend1:443", "max_fails=3"]);
    }

    #[test]
    fn test_select_mut_and_split_last() {
        let mut root = parse(CONF).unwrap();
        let selector = "stream/upstream/server".parse::<Selector>().unwrap();
        let (parents, last) = selector.split_last().unwrap();
        assert_eq!(last.directive, "server");

        for upstream in parents.select_mut(&mut root) {
            upstream.del(&last.directive, &[]);
        }
        assert!(selector.select(&root).is_empty());
        assert_eq!(root.to_string(), "stream {\n    upstream backend;\n    upstream cache;\n}");
    }
}
