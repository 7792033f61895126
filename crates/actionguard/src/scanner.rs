use ahash::AHashSet;
use serde::Serialize;

use crate::{
    paths::InstancePath,
    rules::{is_transport_key, RuleSet, CONSTRUCTOR_CHAIN, RULES},
    value::{Node, NodeId, ValueTree},
};

/// Maximum traversal depth; branches past it are abandoned with a reason.
///
/// The limit is checked on entry to a node: a node at depth 13 contributes
/// only the depth reason and its content is never read.
pub const MAX_DEPTH: usize = 12;

/// Verdict of a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    blocked: bool,
    reasons: Vec<String>,
}

impl Inspection {
    fn from_reasons(reasons: Vec<String>) -> Inspection {
        Inspection {
            blocked: !reasons.is_empty(),
            reasons,
        }
    }

    /// True iff at least one reason was recorded.
    pub fn blocked(&self) -> bool {
        self.blocked
    }

    /// Human-readable findings, deduplicated by text, in first-discovery
    /// order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }
}

/// Inspect a payload tree against the process-wide rule set.
///
/// Total over its input: any tree, cyclic or arbitrarily deep, yields a
/// well-formed [`Inspection`]; there is no error path.
pub fn inspect(tree: &ValueTree) -> Inspection {
    inspect_with(tree, &RULES)
}

/// Inspect a payload tree against an explicit rule set.
pub fn inspect_with(tree: &ValueTree, rules: &RuleSet) -> Inspection {
    let mut scanner = Scanner {
        tree,
        rules,
        visited: vec![false; tree.len()],
        reasons: Reasons::new(),
    };
    scanner.visit(tree.root(), &InstancePath::root(), 0);
    Inspection::from_reasons(scanner.reasons.items)
}

/// Reason accumulator: keeps first-discovery order, drops exact duplicates.
struct Reasons {
    items: Vec<String>,
    seen: AHashSet<String>,
}

impl Reasons {
    fn new() -> Reasons {
        Reasons {
            items: Vec::new(),
            seen: AHashSet::new(),
        }
    }

    fn push(&mut self, reason: String) {
        if !self.seen.contains(&reason) {
            self.seen.insert(reason.clone());
            self.items.push(reason);
        }
    }
}

struct Scanner<'a> {
    tree: &'a ValueTree,
    rules: &'a RuleSet,
    visited: Vec<bool>,
    reasons: Reasons,
}

impl Scanner<'_> {
    fn visit(&mut self, id: NodeId, path: &InstancePath<'_, '_>, depth: usize) {
        if depth > MAX_DEPTH {
            self.reasons
                .push(format!("Depth limit exceeded at {}", path.render()));
            return;
        }

        let Some(node) = self.tree.get(id) else {
            // Id minted by a different builder; nothing to look at.
            return;
        };

        match node {
            Node::Null | Node::Bool(_) | Node::Number(_) => {}
            Node::String(text) => self.scan_string(text, path),
            Node::Array(items) => {
                if self.enter(id) {
                    return;
                }
                for (index, item) in items.iter().enumerate() {
                    let item_path = path.push(index);
                    self.visit(*item, &item_path, depth + 1);
                }
            }
            Node::Object(members) => {
                if self.enter(id) {
                    return;
                }
                for (key, value) in members {
                    self.scan_key(key, *value, path);
                    let member_path = path.push(key.as_str());
                    self.visit(*value, &member_path, depth + 1);
                }
            }
        }
    }

    /// Mark a container visited; true if it was already entered in this scan
    /// (through this or any other path).
    fn enter(&mut self, id: NodeId) -> bool {
        if let Some(slot) = self.visited.get_mut(id.index()) {
            std::mem::replace(slot, true)
        } else {
            false
        }
    }

    fn scan_string(&mut self, text: &str, path: &InstancePath<'_, '_>) {
        let lowered = text.to_ascii_lowercase();
        // Every rule is evaluated; one string may yield several reasons.
        for rule in self.rules.tokens() {
            if rule.is_match(text, &lowered) {
                self.reasons
                    .push(format!("Detected {} at {}", rule.label(), path.render()));
            }
        }
    }

    /// Key-shaped checks, recorded at the containing object's path.
    fn scan_key(&mut self, key: &str, value: NodeId, path: &InstancePath<'_, '_>) {
        if self.rules.is_blocked_key(key) {
            self.reasons
                .push(format!("Blocked key \"{key}\" at {}", path.render()));
        }
        if key.contains(CONSTRUCTOR_CHAIN) {
            self.reasons
                .push(format!("Detected constructor chain key at {}", path.render()));
        }
        if is_transport_key(key) && self.is_container(value) {
            self.reasons.push(format!(
                "Blocked transport object \"{key}\" at {}",
                path.render()
            ));
        }
    }

    fn is_container(&self, id: NodeId) -> bool {
        matches!(self.tree.get(id), Some(Node::Array(_) | Node::Object(_)))
    }
}
