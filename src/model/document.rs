//! Model Instance
//!
//! A concrete element tree built from an XML document. Elements are kinded by
//! their local tag name and identified by their position in document order.

use super::ModelError;
use super::node::Node;
use crate::validation::DEFAULT_MAX_DEPTH;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt;
use std::path::Path;

/// Identity of an element within its model instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId {
    position: usize,
    label: String,
}

impl ElementId {
    /// Pre-order position of the element, starting at 0 for the root
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// One element of a model instance
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    position: usize,
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Local tag name, also the element kind
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn child_elements(&self) -> &[Element] {
        &self.children
    }

    /// The `id` attribute, or `<tag>#<position>` when there is none
    pub fn label(&self) -> String {
        match self.attribute("id") {
            Some(id) => id.to_string(),
            None => format!("{}#{}", self.tag, self.position),
        }
    }

    fn find(&self, id: &str) -> Option<&Element> {
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            if element.attribute("id") == Some(id) {
                return Some(element);
            }
            pending.extend(element.children.iter().rev());
        }
        None
    }
}

// Flattened so deep trees do not drop recursively
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut element) = pending.pop() {
            pending.append(&mut element.children);
        }
    }
}

impl Node for Element {
    type Id = ElementId;

    fn id(&self) -> ElementId {
        ElementId {
            position: self.position,
            label: self.label(),
        }
    }

    fn kind(&self) -> &str {
        &self.tag
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}

/// A parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    root: Element,
    element_count: usize,
}

impl ModelInstance {
    /// Parse an XML document into an element tree, nesting at most
    /// [`DEFAULT_MAX_DEPTH`] levels below the root
    pub fn parse(content: &str) -> Result<Self, ModelError> {
        Self::parse_with_max_depth(content, DEFAULT_MAX_DEPTH)
    }

    /// Parse an XML document, rejecting elements nested deeper than
    /// `max_depth` levels below the root
    pub fn parse_with_max_depth(content: &str, max_depth: usize) -> Result<Self, ModelError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut next_position = 0;

        loop {
            let event = reader.read_event().map_err(|err| ModelError::Xml {
                position: reader.error_position(),
                message: err.to_string(),
            })?;

            match event {
                Event::Start(start) => {
                    check_depth(&stack, max_depth)?;
                    let element = new_element(&start, next_position)
                        .map_err(|message| xml_error(&reader, message))?;
                    next_position += 1;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    check_depth(&stack, max_depth)?;
                    let element = new_element(&start, next_position)
                        .map_err(|message| xml_error(&reader, message))?;
                    next_position += 1;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        xml_error(&reader, "unexpected closing tag".to_string())
                    })?;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::Eof => break,
                // Text, comments, declarations and processing instructions carry no elements
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ModelError::Structure(format!(
                "element <{}> is never closed",
                open.tag
            )));
        }

        let root = root.ok_or_else(|| ModelError::Structure("document has no root element".into()))?;
        log::debug!("Parsed {} elements, root <{}>", next_position, root.tag);

        Ok(Self {
            root,
            element_count: next_position,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        Self::from_file_with_max_depth(path, DEFAULT_MAX_DEPTH)
    }

    pub fn from_file_with_max_depth(path: &Path, max_depth: usize) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with_max_depth(&content, max_depth)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// First element in document order whose `id` attribute equals `id`
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }
}

fn new_element(start: &BytesStart<'_>, position: usize) -> Result<Element, String> {
    let tag = String::from_utf8_lossy(start.local_name().as_ref()).to_string();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        // Namespace declarations are not element attributes
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        attributes.push((key, value.into_owned()));
    }

    Ok(Element {
        position,
        tag,
        attributes,
        children: Vec::new(),
    })
}

/// The next element opens at depth `stack.len()`
fn check_depth(stack: &[Element], max_depth: usize) -> Result<(), ModelError> {
    if stack.len() > max_depth {
        let parent = stack.last().map(Element::label).unwrap_or_default();
        return Err(ModelError::Structure(format!(
            "element inside '{}' is nested deeper than {} levels",
            parent, max_depth
        )));
    }
    Ok(())
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ModelError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if let Some(existing) = root {
        return Err(ModelError::Structure(format!(
            "second root element <{}> after <{}>",
            element.tag, existing.tag
        )));
    }
    *root = Some(element);
    Ok(())
}

fn xml_error(reader: &Reader<&[u8]>, message: String) -> ModelError {
    ModelError::Xml {
        position: reader.buffer_position(),
        message,
    }
}
