//! Reading and writing XML with quick-xml

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{Document, Element, NodeId, NodeKind, XmlDecl};
use crate::utils::error::{TemplateError, TemplateResult};

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn element_from_start(start: &BytesStart<'_>) -> TemplateResult<Element> {
    let mut element = Element::new(lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        element.attrs.insert(lossy(attr.key.as_ref()), value);
    }
    Ok(element)
}

fn decl_from_event(decl: &BytesDecl<'_>) -> TemplateResult<XmlDecl> {
    let version = lossy(&decl.version()?);
    let encoding = match decl.encoding() {
        Some(enc) => Some(lossy(&enc?)),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(sa) => Some(lossy(&sa?)),
        None => None,
    };
    Ok(XmlDecl {
        version,
        encoding,
        standalone,
    })
}

impl Document {
    /// Parse a WordprocessingML part.
    ///
    /// Whitespace is kept as-is so `w:t` runs with `xml:space="preserve"`
    /// survive a round trip. Processing instructions and doctypes are dropped.
    pub fn parse(xml: &str) -> TemplateResult<Self> {
        let mut doc = Document::new();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut stack = vec![doc.root()];

        loop {
            let parent = *stack.last().unwrap_or(&doc.root());
            match reader.read_event() {
                Ok(Event::Decl(decl)) => {
                    doc.decl = Some(decl_from_event(&decl)?);
                }
                Ok(Event::Start(start)) => {
                    let element = element_from_start(&start)?;
                    let id = doc.create_node(NodeKind::Element(element));
                    doc.append_child(parent, id);
                    stack.push(id);
                }
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&start)?;
                    let id = doc.create_node(NodeKind::Element(element));
                    doc.append_child(parent, id);
                }
                Ok(Event::End(end)) => {
                    if stack.len() <= 1 {
                        return Err(TemplateError::xml_at(
                            format!("unexpected closing tag '{}'", lossy(end.name().as_ref())),
                            reader.buffer_position(),
                        ));
                    }
                    stack.pop();
                }
                Ok(Event::Text(text)) => {
                    let text = text.unescape()?.into_owned();
                    if !text.is_empty() {
                        let id = doc.create_node(NodeKind::Text(text));
                        doc.append_child(parent, id);
                    }
                }
                Ok(Event::CData(data)) => {
                    let id = doc.create_node(NodeKind::CData(lossy(&data.into_inner())));
                    doc.append_child(parent, id);
                }
                Ok(Event::Comment(comment)) => {
                    let id = doc.create_node(NodeKind::Comment(lossy(&comment)));
                    doc.append_child(parent, id);
                }
                Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(err) => {
                    return Err(TemplateError::xml_at(
                        err.to_string(),
                        reader.buffer_position(),
                    ))
                }
            }
        }

        if stack.len() > 1 {
            let open = stack
                .last()
                .and_then(|&id| doc.name(id))
                .unwrap_or_default()
                .to_string();
            return Err(TemplateError::xml(format!("unclosed element '{}'", open)));
        }

        Ok(doc)
    }

    /// Serialize the whole document, declaration included
    pub fn to_xml(&self) -> TemplateResult<String> {
        let mut writer = Writer::new(Vec::new());
        if let Some(decl) = &self.decl {
            let event = BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            );
            writer
                .write_event(Event::Decl(event))
                .map_err(|e| TemplateError::write(e.to_string()))?;
        }
        for &child in self.children(self.root()) {
            self.write_node(&mut writer, child)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| TemplateError::write(e.to_string()))
    }

    /// Serialize one subtree (no declaration)
    pub fn outer_xml(&self, id: NodeId) -> TemplateResult<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, id)?;
        String::from_utf8(writer.into_inner()).map_err(|e| TemplateError::write(e.to_string()))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> TemplateResult<()> {
        let event = match self.kind(id) {
            NodeKind::Document => {
                for &child in self.children(id) {
                    self.write_node(writer, child)?;
                }
                return Ok(());
            }
            NodeKind::Element(element) => {
                let mut start = BytesStart::new(element.name.as_str());
                for (key, value) in &element.attrs {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                if self.children(id).is_empty() {
                    Event::Empty(start)
                } else {
                    writer
                        .write_event(Event::Start(start))
                        .map_err(|e| TemplateError::write(e.to_string()))?;
                    for &child in self.children(id) {
                        self.write_node(writer, child)?;
                    }
                    Event::End(BytesEnd::new(element.name.as_str()))
                }
            }
            NodeKind::Text(text) => Event::Text(BytesText::new(text)),
            NodeKind::CData(text) => Event::CData(BytesCData::new(text.as_str())),
            NodeKind::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        };
        writer
            .write_event(event)
            .map_err(|e| TemplateError::write(e.to_string()))
    }
}
