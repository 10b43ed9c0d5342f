//! Scope nodes — the configuration tree's chain of variable bindings.

use indexmap::IndexMap;
use restprobe_types::Value;
use std::sync::Arc;

/// One node of the endpoint tree: local variable bindings plus a non-owning
/// link to the enclosing scope.
///
/// Nodes are built once when the spec document is loaded and never mutated
/// afterwards. The parent link is an `Arc` set at construction, so the chain
/// is acyclic by construction and a parent always outlives its children.
#[derive(Debug)]
pub struct ScopeNode {
    name: Option<String>,
    vars: IndexMap<String, Value>,
    parent: Option<Arc<ScopeNode>>,
    /// Raw request specifications declared at this node, opaque to the
    /// evaluator beyond being handed back on demand.
    requests: Vec<Value>,
}

impl ScopeNode {
    /// Create a root node (no parent).
    pub fn root(
        name: Option<String>,
        vars: IndexMap<String, Value>,
        requests: Vec<Value>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            vars,
            parent: None,
            requests,
        })
    }

    /// Create a child of `parent`.
    pub fn child(
        parent: &Arc<ScopeNode>,
        name: Option<String>,
        vars: IndexMap<String, Value>,
        requests: Vec<Value>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            vars,
            parent: Some(Arc::clone(parent)),
            requests,
        })
    }

    /// The node's human-readable identifier, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&Arc<ScopeNode>> {
        self.parent.as_ref()
    }

    /// The raw request specifications declared at this node.
    pub fn requests(&self) -> &[Value] {
        &self.requests
    }

    /// Look up `name`, searching local bindings first and then the ancestor
    /// chain. A child's binding always shadows an ancestor's binding of the
    /// same name. Returns `None` on a root miss — not an error by itself;
    /// callers combine this with the runtime namespace before failing.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut node = self;
        loop {
            if let Some(value) = node.vars.get(name) {
                return Some(value);
            }
            match node.parent.as_deref() {
                Some(parent) => node = parent,
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn lookup_walks_the_chain() {
        let root = ScopeNode::root(None, vars(&[("base_url", "http://api")]), vec![]);
        let child = ScopeNode::child(&root, Some("users".into()), IndexMap::new(), vec![]);
        assert_eq!(
            child.lookup("base_url"),
            Some(&Value::from("http://api"))
        );
    }

    #[test]
    fn child_binding_shadows_ancestor() {
        let root = ScopeNode::root(None, vars(&[("token", "root")]), vec![]);
        let child = ScopeNode::child(&root, None, vars(&[("token", "child")]), vec![]);
        assert_eq!(child.lookup("token"), Some(&Value::from("child")));
        assert_eq!(root.lookup("token"), Some(&Value::from("root")));
    }

    #[test]
    fn root_miss_returns_none() {
        let root = ScopeNode::root(None, IndexMap::new(), vec![]);
        assert_eq!(root.lookup("missing"), None);
    }

    #[test]
    fn requests_are_returned_verbatim() {
        let req = Value::Mapping(indexmap! {
            "name".to_string() => Value::from("list_users"),
        });
        let root = ScopeNode::root(None, IndexMap::new(), vec![req.clone()]);
        assert_eq!(root.requests(), [req]);
    }
}
