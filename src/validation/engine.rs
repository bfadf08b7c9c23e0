//! Validation Engine
//!
//! Walks a document tree depth-first in pre-order and hands every node to the
//! rules bound to its kind, in the order the rules were supplied.

use super::diagnostic::DiagnosticSink;
use super::error::ValidationError;
use super::report::ValidationReport;
use super::rule::Rule;
use crate::model::{ExactKinds, KindHierarchy, Node};

/// Trees nested deeper than this are treated as malformed
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Runs rules against a tree and aggregates their diagnostics
#[derive(Debug, Clone)]
pub struct ValidationEngine<H = ExactKinds> {
    hierarchy: H,
    max_depth: usize,
}

impl Default for ValidationEngine<ExactKinds> {
    fn default() -> Self {
        Self::new(ExactKinds)
    }
}

impl<H: KindHierarchy> ValidationEngine<H> {
    /// Create an engine that matches rules to nodes through `hierarchy`
    pub fn new(hierarchy: H) -> Self {
        Self {
            hierarchy,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    /// Validate the tree under `root`.
    ///
    /// The rules are borrowed mutably for the whole run, so a stateful rule
    /// instance can never take part in two runs at once. A rule returning
    /// `Err` aborts the run; no partial report is produced.
    pub fn validate<'a, N, R>(
        &self,
        root: &'a N,
        rules: &mut [R],
    ) -> Result<ValidationReport<'a, N>, ValidationError>
    where
        N: Node,
        R: Rule<N>,
    {
        let mut report = ValidationReport::new();
        let mut visited = 0usize;
        let mut stack: Vec<(&'a N, usize)> = vec![(root, 0)];

        while let Some((node, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(ValidationError::MalformedTree {
                    node: node.id().to_string(),
                    max_depth: self.max_depth,
                });
            }
            visited += 1;

            let mut sink = DiagnosticSink::new(node);
            for rule in rules.iter_mut() {
                if !self.hierarchy.is_kind_of(node.kind(), rule.kind()) {
                    continue;
                }

                log::trace!("Applying rule '{}' to '{}'", rule.name(), node.id());
                rule.check(node, &mut sink)
                    .map_err(|source| ValidationError::RuleFault {
                        rule: rule.name().to_string(),
                        node: node.id().to_string(),
                        source,
                    })?;
            }
            report.record(node, sink.into_diagnostics());

            // Reversed so the first child is popped next
            let children: Vec<&'a N> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }

        log::debug!(
            "Validated {} nodes with {} rules: {} errors, {} warnings",
            visited,
            rules.len(),
            report.error_count(),
            report.warning_count()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRegistry;
    use crate::model::types::TypeDef;
    use crate::validation::diagnostic::Severity;
    use crate::validation::rule::FnRule;
    use crate::validation::testing::TestNode;
    use anyhow::bail;

    type BoxedRule<'r> = Box<dyn Rule<TestNode> + 'r>;

    fn engine() -> ValidationEngine {
        ValidationEngine::default()
    }

    fn zoo() -> TestNode {
        TestNode::branch(
            "zoo",
            "animals",
            vec![
                TestNode::leaf("tweety", "bird"),
                TestNode::branch(
                    "flock",
                    "flock",
                    vec![TestNode::leaf("daisy", "bird"), TestNode::leaf("rex", "dog")],
                ),
                TestNode::leaf("polly", "bird"),
            ],
        )
    }

    fn warn_all<'r>(kind: &str, code: i32) -> BoxedRule<'r> {
        Box::new(FnRule::new(
            format!("warn-{}", code),
            kind,
            move |node: &TestNode, sink: &mut DiagnosticSink<'_, TestNode>| {
                sink.warning(code, format!("{} flagged", node.name));
                Ok(())
            },
        ))
    }

    fn animal_types() -> TypeRegistry {
        let mut types = TypeRegistry::new();
        let defs = [
            ("animal", None),
            ("bird", Some("animal")),
            ("dog", Some("animal")),
        ];
        for (name, extends) in defs {
            types.add_type(TypeDef {
                name: name.to_string(),
                extends: extends.map(str::to_string),
                is_abstract: false,
            });
        }
        types
    }

    #[test]
    fn test_empty_rules() {
        let tree = zoo();
        let mut rules: Vec<BoxedRule> = Vec::new();
        let report = engine().validate(&tree, &mut rules).unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.error_count(), 0);
        assert!(report.is_empty());
    }

    #[test]
    fn test_pre_order_document_order() {
        let tree = zoo();
        let mut rules = vec![warn_all("bird", 1), warn_all("dog", 2), warn_all("animals", 3)];
        let report = engine().validate(&tree, &mut rules).unwrap();

        let order: Vec<String> = report.results().map(|(n, _)| n.id()).collect();
        assert_eq!(order, vec!["zoo", "tweety", "daisy", "rex", "polly"]);
        // flock matched no rule and is absent
        assert!(report.diagnostics_for(&tree.children[1]).is_none());
    }

    #[test]
    fn test_rule_registration_order_within_node() {
        let tree = TestNode::leaf("tweety", "bird");
        let mut rules = vec![
            warn_all("bird", 3),
            Box::new(FnRule::new(
                "two-errors",
                "bird",
                |_: &TestNode, sink: &mut DiagnosticSink<'_, TestNode>| {
                    sink.error(1, "one");
                    sink.error(2, "two");
                    Ok(())
                },
            )) as BoxedRule,
            warn_all("bird", 0),
        ];
        let report = engine().validate(&tree, &mut rules).unwrap();

        let codes: Vec<i32> = report
            .diagnostics_for(&tree)
            .unwrap()
            .iter()
            .map(|d| d.code())
            .collect();
        assert_eq!(codes, vec![3, 1, 2, 0]);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn test_subtype_matching() {
        let tree = zoo();
        let types = animal_types();
        let mut rules = vec![warn_all("animal", 7)];

        let exact = engine().validate(&tree, &mut rules).unwrap();
        assert!(exact.is_empty());

        let report = ValidationEngine::new(&types).validate(&tree, &mut rules).unwrap();
        assert_eq!(report.warning_count(), 4);
        let order: Vec<String> = report.results().map(|(n, _)| n.id()).collect();
        assert_eq!(order, vec!["tweety", "daisy", "rex", "polly"]);
    }

    #[test]
    fn test_counts_match_results() {
        let tree = zoo();
        let types = animal_types();
        let mut rules = vec![warn_all("animal", 1), warn_all("bird", 2), warn_all("flock", 3)];
        let report = ValidationEngine::new(types).validate(&tree, &mut rules).unwrap();

        let total: usize = report.results().map(|(_, d)| d.len()).sum();
        assert_eq!(report.error_count() + report.warning_count(), total);
        assert!(report.results().all(|(_, d)| !d.is_empty()));
    }

    #[test]
    fn test_rule_fault_aborts() {
        let tree = zoo();
        let mut rules = vec![
            warn_all("bird", 1),
            Box::new(FnRule::new(
                "broken",
                "dog",
                |_: &TestNode, _: &mut DiagnosticSink<'_, TestNode>| bail!("lost internal state"),
            )) as BoxedRule,
        ];
        let err = engine().validate(&tree, &mut rules).unwrap_err();

        match err {
            ValidationError::RuleFault { rule, node, source } => {
                assert_eq!(rule, "broken");
                assert_eq!(node, "rex");
                assert_eq!(source.to_string(), "lost internal state");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_depth_guard() {
        let mut tree = TestNode::leaf("leaf", "bird");
        for i in 0..5 {
            tree = TestNode::branch(&format!("n{}", i), "wrapper", vec![tree]);
        }
        let mut rules: Vec<BoxedRule> = Vec::new();

        let err = engine()
            .with_max_depth(3)
            .validate(&tree, &mut rules)
            .unwrap_err();
        assert!(matches!(err, ValidationError::MalformedTree { max_depth: 3, .. }));

        assert!(
            engine()
                .with_max_depth(5)
                .validate(&tree, &mut rules)
                .is_ok()
        );
    }

    #[test]
    fn test_idempotent() {
        let tree = zoo();
        let mut rules = vec![warn_all("bird", 1), warn_all("dog", 2)];
        let validator = engine();

        let first = validator.validate(&tree, &mut rules).unwrap();
        let second = validator.validate(&tree, &mut rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stateful_rule() {
        struct Counter {
            seen: usize,
        }

        impl Rule<TestNode> for Counter {
            fn kind(&self) -> &str {
                "bird"
            }

            fn check(
                &mut self,
                _: &TestNode,
                sink: &mut DiagnosticSink<'_, TestNode>,
            ) -> anyhow::Result<()> {
                self.seen += 1;
                if self.seen > 2 {
                    sink.report(Severity::Error, 99, "too many birds");
                }
                Ok(())
            }
        }

        let tree = zoo();
        let mut rules = [Counter { seen: 0 }];
        let report = engine().validate(&tree, &mut rules).unwrap();

        assert_eq!(rules[0].seen, 3);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.results().next().unwrap().0.name, "polly");
    }
}
