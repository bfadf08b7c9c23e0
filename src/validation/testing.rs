//! Minimal in-memory tree for unit tests

use crate::model::Node;

#[derive(Debug, Clone)]
pub struct TestNode {
    pub name: String,
    pub kind: String,
    pub children: Vec<TestNode>,
}

impl TestNode {
    pub fn leaf(name: &str, kind: &str) -> Self {
        Self::branch(name, kind, Vec::new())
    }

    pub fn branch(name: &str, kind: &str, children: Vec<TestNode>) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            children,
        }
    }
}

impl Node for TestNode {
    type Id = String;

    fn id(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}
