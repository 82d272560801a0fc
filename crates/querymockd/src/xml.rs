//! Minimal XML element tree and its serialiser.
//!
//! Result values are rendered the way the Query protocol expects: record
//! fields become child elements in field order, sequences become `<member>`
//! children, mappings become `<entry><key/><value/></entry>` children in key
//! order, and scalars become text using the decoder's wire rendering.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use querymock_codec::Value;
use thiserror::Error;

/// Element name used for sequence members.
pub const MEMBER_ELEMENT: &str = "member";

/// Element name used for mapping entries.
pub const ENTRY_ELEMENT: &str = "entry";

/// Failure to serialise an element tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The underlying writer rejected an event.
    #[error("failed to write XML element <{element}>: {message}")]
    Write {
        /// Element being written.
        element: String,
        /// Writer diagnostic.
        message: String,
    },
}

impl EncodeError {
    fn write(element: &str, error: impl std::fmt::Display) -> Self {
        Self::Write {
            element: element.to_owned(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Children(Vec<Element>),
}

/// An XML element holding either text or child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    content: Content,
}

impl Element {
    /// Creates an element with no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            content: Content::Children(Vec::new()),
        }
    }

    /// Creates an element holding `text`.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            content: Content::Text(text.into()),
        }
    }

    /// Renders `value` as an element named `name`.
    #[must_use]
    pub fn from_value(name: impl Into<String>, value: &Value) -> Self {
        match value {
            Value::Scalar(scalar) => Self::text(name, scalar.render()),
            Value::Record(record) => record
                .iter()
                .fold(Self::new(name), |parent, (field, child)| {
                    parent.with_child(Self::from_value(field, child))
                }),
            Value::Sequence(items) => items.iter().fold(Self::new(name), |parent, item| {
                parent.with_child(Self::from_value(MEMBER_ELEMENT, item))
            }),
            Value::Mapping(entries) => entries.iter().fold(Self::new(name), |parent, (key, item)| {
                let entry = Self::new(ENTRY_ELEMENT)
                    .with_child(Self::text("key", key.as_str()))
                    .with_child(Self::from_value("value", item));
                parent.with_child(entry)
            }),
        }
    }

    /// Sets the default namespace declared on this element.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Appends `child`, replacing any text content.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push(child);
        self
    }

    /// Appends `child`, replacing any text content.
    pub fn push(&mut self, child: Self) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::Text(_) => self.content = Content::Children(vec![child]),
        }
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared default namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Text content, when the element holds text.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// Child elements; empty for text elements.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.content {
            Content::Children(children) => children,
            Content::Text(_) => &[],
        }
    }

    /// First child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Serialises the element without an XML declaration.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when the writer rejects an event.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Writes the element and its descendants to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when the writer rejects an event.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), EncodeError> {
        let mut start = BytesStart::new(self.name.as_str());
        if let Some(namespace) = &self.namespace {
            start.push_attribute(("xmlns", namespace.as_str()));
        }
        writer
            .write_event(Event::Start(start))
            .map_err(|error| EncodeError::write(&self.name, error))?;
        match &self.content {
            Content::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|error| EncodeError::write(&self.name, error))?,
            Content::Children(children) => {
                for child in children {
                    child.write_to(writer)?;
                }
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|error| EncodeError::write(&self.name, error))
    }
}
