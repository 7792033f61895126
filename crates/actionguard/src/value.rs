use std::hash::{Hash, Hasher};

use serde_json::Value;

/// Identity of a node within a [`ValueTree`] arena.
///
/// Two `NodeId`s are the same node iff they are equal; reachability of the
/// same id through multiple parents is how shared subgraphs and cycles are
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of a parsed payload: exactly the six JSON kinds.
///
/// Container nodes hold ids into the owning arena rather than child values,
/// so the same child may be referenced from more than one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeId>),
    Object(Vec<(String, NodeId)>),
}

#[derive(Debug, Copy, Clone)]
pub enum Number {
    PositiveInteger(u64),
    NegativeInteger(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::PositiveInteger(a), Number::PositiveInteger(b)) => a == b,
            (Number::NegativeInteger(a), Number::NegativeInteger(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, h: &mut H) {
        match *self {
            Number::PositiveInteger(i) => i.hash(h),
            Number::NegativeInteger(i) => i.hash(h),
            Number::Float(f) => {
                if f == 0.0f64 {
                    0.0f64.to_bits().hash(h);
                } else {
                    f.to_bits().hash(h);
                }
            }
        }
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::PositiveInteger(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        if let Ok(value) = u64::try_from(value) {
            Number::PositiveInteger(value)
        } else {
            Number::NegativeInteger(value)
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(value: &serde_json::Number) -> Self {
        if let Some(u) = value.as_u64() {
            Number::PositiveInteger(u)
        } else if let Some(i) = value.as_i64() {
            Number::NegativeInteger(i)
        } else {
            // `as_f64` is total for numbers parsed without arbitrary
            // precision; NaN keeps the conversion total either way.
            Number::Float(value.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// An immutable, arena-backed payload tree.
///
/// Built once (by [`TreeBuilder`] or [`ValueTree::from_json`]) and read-only
/// afterwards; safe to scan from any number of threads.
#[derive(Debug, Clone)]
pub struct ValueTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl ValueTree {
    /// Convert a parsed `serde_json` document into an (acyclic) tree.
    pub fn from_json(value: &Value) -> ValueTree {
        let mut builder = TreeBuilder::new();
        let root = builder.push_json(value);
        builder.build(root)
    }

    pub fn builder() -> TreeBuilder {
        TreeBuilder::new()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id. `None` for ids minted by a different builder.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Push-style builder for [`ValueTree`].
///
/// Children are pushed before their parents; [`TreeBuilder::placeholder`] +
/// [`TreeBuilder::fill`] cover forward references, which is what makes
/// cyclic and shared-subgraph trees expressible.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> TreeBuilder {
        TreeBuilder { nodes: Vec::new() }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("value tree arena overflow");
        self.nodes.push(node);
        NodeId(id)
    }

    pub fn null(&mut self) -> NodeId {
        self.push(Node::Null)
    }

    pub fn bool(&mut self, value: bool) -> NodeId {
        self.push(Node::Bool(value))
    }

    pub fn number(&mut self, value: impl Into<Number>) -> NodeId {
        self.push(Node::Number(value.into()))
    }

    pub fn string(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::String(value.into()))
    }

    pub fn array(&mut self, items: Vec<NodeId>) -> NodeId {
        self.push(Node::Array(items))
    }

    pub fn object(&mut self, members: Vec<(String, NodeId)>) -> NodeId {
        self.push(Node::Object(members))
    }

    /// Reserve an id to be filled later via [`TreeBuilder::fill`].
    ///
    /// An unfilled placeholder stays `Null`, which is terminal to any
    /// traversal.
    pub fn placeholder(&mut self) -> NodeId {
        self.push(Node::Null)
    }

    /// Replace a previously pushed node. No-op for foreign ids.
    pub fn fill(&mut self, id: NodeId, node: Node) {
        if let Some(slot) = self.nodes.get_mut(id.index()) {
            *slot = node;
        }
    }

    pub(crate) fn push_json(&mut self, value: &Value) -> NodeId {
        match value {
            Value::Null => self.null(),
            Value::Bool(b) => self.bool(*b),
            Value::Number(num) => self.number(num),
            Value::String(s) => self.string(s.as_str()),
            Value::Array(items) => {
                let items: Vec<NodeId> = items.iter().map(|item| self.push_json(item)).collect();
                self.array(items)
            }
            Value::Object(members) => {
                let members: Vec<(String, NodeId)> = members
                    .iter()
                    .map(|(key, value)| (key.clone(), self.push_json(value)))
                    .collect();
                self.object(members)
            }
        }
    }

    pub fn build(self, root: NodeId) -> ValueTree {
        ValueTree {
            nodes: self.nodes,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(null), Node::Null; "null")]
    #[test_case(json!(true), Node::Bool(true); "bool")]
    #[test_case(json!(42u64), Node::Number(Number::PositiveInteger(42)); "positive number")]
    #[test_case(json!(-42), Node::Number(Number::NegativeInteger(-42)); "negative number")]
    #[test_case(json!(3.5), Node::Number(Number::Float(3.5)); "float number")]
    #[test_case(json!("hello"), Node::String("hello".into()); "string")]
    fn scalar_conversion(value: Value, expected: Node) {
        let tree = ValueTree::from_json(&value);
        assert_eq!(tree.get(tree.root()), Some(&expected));
    }

    #[test]
    fn array_conversion() {
        let tree = ValueTree::from_json(&json!([1, "two", null]));
        let Some(Node::Array(items)) = tree.get(tree.root()) else {
            panic!("expected array root");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(
            tree.get(items[0]),
            Some(&Node::Number(Number::PositiveInteger(1)))
        );
        assert_eq!(tree.get(items[1]), Some(&Node::String("two".into())));
        assert_eq!(tree.get(items[2]), Some(&Node::Null));
    }

    #[test]
    fn object_conversion() {
        let tree = ValueTree::from_json(&json!({"a": 1, "b": {"c": false}}));
        let Some(Node::Object(members)) = tree.get(tree.root()) else {
            panic!("expected object root");
        };
        assert_eq!(members.len(), 2);
        let (key, inner) = &members[1];
        assert_eq!(key, "b");
        let Some(Node::Object(inner)) = tree.get(*inner) else {
            panic!("expected nested object");
        };
        assert_eq!(inner[0].0, "c");
    }

    #[test]
    fn placeholder_fill_builds_cycles() {
        let mut builder = ValueTree::builder();
        let slot = builder.placeholder();
        let array = builder.array(vec![slot]);
        builder.fill(slot, Node::Object(vec![("back".into(), array)]));
        let tree = builder.build(array);

        let Some(Node::Array(items)) = tree.get(tree.root()) else {
            panic!("expected array root");
        };
        let Some(Node::Object(members)) = tree.get(items[0]) else {
            panic!("expected filled object");
        };
        assert_eq!(members[0].1, tree.root());
    }

    #[test]
    fn foreign_id_lookup_is_none() {
        let mut other = ValueTree::builder();
        for _ in 0..4 {
            other.null();
        }
        let foreign = other.null();

        let mut builder = ValueTree::builder();
        let root = builder.null();
        let tree = builder.build(root);
        assert!(tree.get(foreign).is_none());
    }
}
