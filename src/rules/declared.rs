//! Declared Rules
//!
//! Rules built from rule file definitions, checking [`Element`]s of a model
//! instance.

use super::schema::{Check, RuleDef};
use crate::model::{Element, KindHierarchy, Node, TypeRegistry};
use crate::validation::{DiagnosticSink, Rule, Severity};
use regex::Regex;
use std::sync::Arc;

/// A check with its pattern compiled
#[derive(Debug, Clone)]
enum CompiledCheck {
    RequiredAttribute { attribute: String },
    ForbiddenValue { attribute: String, values: Vec<String> },
    AttributePattern { attribute: String, pattern: Regex },
    MinValue { attribute: String, min: f64 },
    MaxChildren { max: usize },
    RequiredChild { kind: String },
}

/// A rule loaded from a rule file
#[derive(Debug, Clone)]
pub struct DeclaredRule {
    name: String,
    kind: String,
    severity: Severity,
    code: i32,
    message: String,
    check: CompiledCheck,
    types: Arc<TypeRegistry>,
}

impl DeclaredRule {
    /// Compile a rule definition. Fails only on an invalid pattern.
    pub fn compile(def: RuleDef, types: Arc<TypeRegistry>) -> Result<Self, regex::Error> {
        let check = match def.check {
            Check::RequiredAttribute { attribute } => {
                CompiledCheck::RequiredAttribute { attribute }
            }
            Check::ForbiddenValue { attribute, values } => {
                CompiledCheck::ForbiddenValue { attribute, values }
            }
            Check::AttributePattern { attribute, pattern } => {
                // Anchored so the whole value has to match
                let pattern = Regex::new(&format!("^(?:{})$", pattern))?;
                CompiledCheck::AttributePattern { attribute, pattern }
            }
            Check::MinValue { attribute, min } => CompiledCheck::MinValue { attribute, min },
            Check::MaxChildren { max } => CompiledCheck::MaxChildren { max },
            Check::RequiredChild { kind } => CompiledCheck::RequiredChild { kind },
        };

        Ok(Self {
            name: def.name,
            kind: def.kind,
            severity: def.severity,
            code: def.code,
            message: def.message,
            check,
            types,
        })
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// The offending attribute value, or `None` when the element passes
    fn violation<'e>(&self, element: &'e Element) -> Option<Option<&'e str>> {
        match &self.check {
            CompiledCheck::RequiredAttribute { attribute } => {
                element.attribute(attribute).is_none().then_some(None)
            }
            CompiledCheck::ForbiddenValue { attribute, values } => element
                .attribute(attribute)
                .filter(|value| values.iter().any(|v| v.as_str() == *value))
                .map(Some),
            CompiledCheck::AttributePattern { attribute, pattern } => element
                .attribute(attribute)
                .filter(|value| !pattern.is_match(value))
                .map(Some),
            CompiledCheck::MinValue { attribute, min } => element
                .attribute(attribute)
                .filter(|value| {
                    // NaN and infinities parse as f64 but are not numbers here
                    value
                        .trim()
                        .parse::<f64>()
                        .map_or(true, |v| !v.is_finite() || v < *min)
                })
                .map(Some),
            CompiledCheck::MaxChildren { max } => {
                (element.child_elements().len() > *max).then_some(None)
            }
            CompiledCheck::RequiredChild { kind } => {
                let found = element
                    .child_elements()
                    .iter()
                    .any(|child| self.types.is_kind_of(child.kind(), kind));
                (!found).then_some(None)
            }
        }
    }

    fn render_message(&self, element: &Element, value: Option<&str>) -> String {
        let attribute = match &self.check {
            CompiledCheck::RequiredAttribute { attribute }
            | CompiledCheck::ForbiddenValue { attribute, .. }
            | CompiledCheck::AttributePattern { attribute, .. }
            | CompiledCheck::MinValue { attribute, .. } => attribute.as_str(),
            CompiledCheck::MaxChildren { .. } | CompiledCheck::RequiredChild { .. } => "",
        };

        self.message
            .replace("{id}", &element.label())
            .replace("{kind}", element.kind())
            .replace("{attribute}", attribute)
            .replace("{value}", value.unwrap_or(""))
    }
}

impl Rule<Element> for DeclaredRule {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn check(
        &mut self,
        node: &Element,
        sink: &mut DiagnosticSink<'_, Element>,
    ) -> anyhow::Result<()> {
        if let Some(value) = self.violation(node) {
            let message = self.render_message(node, value);
            sink.report(self.severity, self.code, message);
        }
        Ok(())
    }
}
