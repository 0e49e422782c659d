//! # Flat Tag/Value XML Documents
//!
//! Every document the callback exchanges has the same shape: an `<xml>` root
//! holding one level of leaf elements, string values usually wrapped in
//! CDATA. Nested elements deeper than one level are skipped on read.

use crate::EnvelopeError;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use std::collections::BTreeMap;

/// Root element name of every callback document.
pub const ROOT_TAG: &str = "xml";

/// A single leaf element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Element name.
    pub name: String,
    /// Text content with CDATA sections and entities resolved.
    pub value: String,
    /// Whether the value is (or will be) written as CDATA.
    pub cdata: bool,
}

/// An ordered list of leaf elements under `<xml>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDocument {
    fields: Vec<Field>,
}

impl TagDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a CDATA-wrapped field.
    pub fn with_cdata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value, true);
        self
    }

    /// Append a plain-text field (numbers, timestamps).
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value, false);
        self
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>, cdata: bool) {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            cdata,
        });
    }

    /// Value of the first field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Value of the first field named `name`, if present and not blank.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    /// All fields in document order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields as a name → value map (first occurrence wins).
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for field in &self.fields {
            map.entry(field.name.clone())
                .or_insert_with(|| field.value.clone());
        }
        map
    }

    /// Parse a document.
    ///
    /// # Errors
    ///
    /// - `EnvelopeError::Xml` if the input is not well-formed.
    /// - `EnvelopeError::MissingRoot` if the root element is not `<xml>`.
    pub fn parse(xml: &str) -> Result<Self, EnvelopeError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut fields = Vec::new();
        let mut current: Option<Field> = None;
        let mut depth = 0usize;
        let mut root_seen = false;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => {
                    depth += 1;
                    let name = element_name(&e)?;
                    match depth {
                        1 => open_root(name, &mut root_seen)?,
                        2 => {
                            current = Some(Field {
                                name,
                                value: String::new(),
                                cdata: false,
                            })
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    let name = element_name(&e)?;
                    match depth {
                        0 => open_root(name, &mut root_seen)?,
                        1 => fields.push(Field {
                            name,
                            value: String::new(),
                            cdata: false,
                        }),
                        _ => {}
                    }
                }
                Event::Text(t) if depth == 2 => {
                    if let Some(field) = current.as_mut() {
                        field.value.push_str(&t.unescape().map_err(xml_error)?);
                    }
                }
                Event::CData(c) if depth == 2 => {
                    if let Some(field) = current.as_mut() {
                        let text = std::str::from_utf8(&c).map_err(xml_error)?;
                        field.value.push_str(text);
                        field.cdata = true;
                    }
                }
                Event::End(_) => {
                    if depth == 2 {
                        if let Some(field) = current.take() {
                            fields.push(field);
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(EnvelopeError::Xml("unexpected end of document".into()));
        }
        if !root_seen {
            return Err(EnvelopeError::MissingRoot(String::new()));
        }

        Ok(Self { fields })
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::Xml` if the writer fails.
    pub fn to_xml(&self) -> Result<String, EnvelopeError> {
        let mut writer = Writer::new(Vec::new());

        write(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;
        for field in &self.fields {
            write(&mut writer, Event::Start(BytesStart::new(field.name.as_str())))?;
            if field.cdata {
                write_cdata(&mut writer, &field.value)?;
            } else {
                write(&mut writer, Event::Text(BytesText::new(&field.value)))?;
            }
            write(&mut writer, Event::End(BytesEnd::new(field.name.as_str())))?;
        }
        write(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

        String::from_utf8(writer.into_inner()).map_err(xml_error)
    }
}

fn open_root(name: String, root_seen: &mut bool) -> Result<(), EnvelopeError> {
    if *root_seen || name != ROOT_TAG {
        return Err(EnvelopeError::MissingRoot(name));
    }
    *root_seen = true;
    Ok(())
}

fn element_name(e: &BytesStart<'_>) -> Result<String, EnvelopeError> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_owned)
        .map_err(xml_error)
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), EnvelopeError> {
    writer.write_event(event).map_err(xml_error)
}

/// Write `value` as CDATA, splitting around any `]]>` terminator.
fn write_cdata(writer: &mut Writer<Vec<u8>>, value: &str) -> Result<(), EnvelopeError> {
    let mut parts = value.split("]]>").peekable();
    let mut first = true;
    while let Some(part) = parts.next() {
        let mut section = String::with_capacity(part.len() + 3);
        if !first {
            section.push('>');
        }
        section.push_str(part);
        if parts.peek().is_some() {
            section.push_str("]]");
        }
        write(writer, Event::CData(BytesCData::new(section)))?;
        first = false;
    }
    Ok(())
}

fn xml_error(e: impl std::fmt::Display) -> EnvelopeError {
    EnvelopeError::Xml(e.to_string())
}
