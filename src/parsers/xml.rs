//! Minimal XML element tree built from `quick-xml` events.
//!
//! BOM dialects are shallow and small enough that the strategies work best
//! on an owned tree they can search repeatedly. Namespace prefixes are
//! stripped; only local names are kept. Entities declared in an internal
//! DTD subset are expanded like the predefined ones.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::traits::ParseError;

/// An element with its direct text, attributes and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Direct text of this element, trimmed once the element closes.
    /// Pieces split by comments or child elements are joined as-is.
    pub text: String,
}

impl XmlElement {
    /// Pre-order traversal starting with `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element in document order named `name`, including `self`.
    #[must_use]
    pub fn find_first(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.name == name)
    }

    /// Direct children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first direct child named `name`.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.text.as_str())
    }

    /// Text of the first direct child whose name matches case-insensitively.
    #[must_use]
    pub fn child_text_ignore_case(&self, name: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.text.as_str())
    }

    /// Attribute value matched case-insensitively on the local name.
    #[must_use]
    pub fn attribute_ignore_case(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Iterator returned by [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A parsed, well-formed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlDocument {
    /// Parse `content`, rejecting anything that is not well-formed.
    ///
    /// Rejected: syntax errors, mismatched or unclosed tags, undefined
    /// entities, no root element, several root elements, and non-blank text
    /// outside the root.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = Reader::from_str(content);

        let mut entities = Entities::default();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(xml_error(position, "multiple root elements"));
                    }
                    stack.push(element_from_start(e, &entities, position)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e, &entities, position)?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| xml_error(position, "unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape_with(|name| entities.resolve(name))
                        .map_err(|err| xml_error(position, &err.to_string()))?;
                    push_text(&mut stack, &text, position)?;
                }
                Ok(Event::CData(ref e)) => {
                    push_text(&mut stack, &String::from_utf8_lossy(e), position)?;
                }
                Ok(Event::DocType(ref e)) => {
                    entities.declare_from(&String::from_utf8_lossy(e));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ParseError::XmlError {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    });
                }
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(xml_error(
                reader.buffer_position() as u64,
                &format!("unclosed element <{}>", open.name),
            ));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| xml_error(0, "no root element"))
    }
}

/// `<!ENTITY name "value">` inside a DOCTYPE internal subset.
/// Parameter entities (`<!ENTITY % ..>`) and external ones are skipped.
static ENTITY_DECL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s%"'>]+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).ok()
});

/// General entities declared by the document.
#[derive(Debug, Default)]
struct Entities {
    declared: HashMap<String, String>,
}

impl Entities {
    fn declare_from(&mut self, doctype: &str) {
        let Some(re) = ENTITY_DECL.as_ref() else {
            return;
        };
        for caps in re.captures_iter(doctype) {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            // First declaration is binding
            self.declared
                .entry(caps[1].to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        resolve_predefined_entity(name).or_else(|| self.declared.get(name).map(String::as_str))
    }
}

fn xml_error(position: u64, message: &str) -> ParseError {
    ParseError::XmlError {
        position,
        message: message.to_string(),
    }
}

fn local_name(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.into_owned(),
    }
}

fn element_from_start(
    e: &BytesStart<'_>,
    entities: &Entities,
    position: u64,
) -> Result<XmlElement, ParseError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(position, &err.to_string()))?;
        let key = local_name(attr.key.as_ref());
        if key == "xmlns" || attr.key.as_ref().starts_with(b"xmlns:") {
            continue;
        }
        let value = attr
            .unescape_value_with(|name| entities.resolve(name))
            .map_err(|err| xml_error(position, &err.to_string()))?;
        attributes.push((key, value.trim().to_string()));
    }
    Ok(XmlElement {
        name: local_name(e.name().as_ref()),
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Hand a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    mut element: XmlElement,
    position: u64,
) -> Result<(), ParseError> {
    let trimmed = element.text.trim();
    if trimmed.len() != element.text.len() {
        element.text = trimmed.to_string();
    }
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(xml_error(position, "multiple root elements")),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str, position: u64) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(xml_error(position, "text outside of the root element")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_tree_with_local_names() {
        let doc = XmlDocument::parse(
            r#"<?xml version="1.0"?>
            <b:BOM xmlns:b="urn:bom"><b:Item ref="R1">10K &amp; 1%</b:Item><Empty/></b:BOM>"#,
        )
        .unwrap();
        assert_eq!(doc.root.name, "BOM");
        assert_eq!(doc.root.children.len(), 2);
        let item = &doc.root.children[0];
        assert_eq!(item.name, "Item");
        assert_eq!(item.text, "10K & 1%");
        assert_eq!(item.attribute_ignore_case("REF"), Some("R1"));
        assert!(doc.root.attributes.is_empty());
    }

    #[test]
    fn test_descendants_are_document_order() {
        let doc = XmlDocument::parse("<a><b><c/></b><d/></a>").unwrap();
        let names: Vec<_> = doc.root.descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(doc.root.find_first("d").map(|e| e.name.as_str()), Some("d"));
        assert!(doc.root.find_first("z").is_none());
    }

    #[test]
    fn test_cdata_is_text() {
        let doc = XmlDocument::parse("<a><![CDATA[ R1 < R2 ]]></a>").unwrap();
        assert_eq!(doc.root.text, "R1 < R2");
    }

    #[test]
    fn test_child_text_outlives_the_lookup_name() {
        let doc = XmlDocument::parse("<RECORD><REFDES>R7</REFDES></RECORD>").unwrap();
        let reference = {
            let name = String::from("REFDES");
            doc.root.child_text(&name)
        };
        assert_eq!(reference, Some("R7"));
        assert_eq!(doc.root.child_text("QTY"), None);
    }

    #[test]
    fn test_comment_split_text_is_joined_without_separator() {
        let doc = XmlDocument::parse("<REFDES>R1<!-- moved -->X</REFDES>").unwrap();
        assert_eq!(doc.root.text, "R1X");

        let doc = XmlDocument::parse("<A>\n  <B> 10K </B>\n</A>").unwrap();
        assert_eq!(doc.root.text, "");
        assert_eq!(doc.root.children[0].text, "10K");
    }

    #[test]
    fn test_internal_dtd_entities_are_expanded() {
        let doc = XmlDocument::parse(
            r#"<?xml version="1.0"?>
<!DOCTYPE BOM [
  <!ENTITY vendor "Yageo">
  <!ENTITY pkg '0603'>
]>
<BOM><Item mfr="&vendor;">&pkg; &amp; &vendor;</Item></BOM>"#,
        )
        .unwrap();
        let item = &doc.root.children[0];
        assert_eq!(item.text, "0603 & Yageo");
        assert_eq!(item.attribute_ignore_case("mfr"), Some("Yageo"));

        // Declared entities do not make unknown ones acceptable
        let err = XmlDocument::parse(
            r#"<!DOCTYPE b [<!ENTITY x "y">]><b>&x;&z;</b>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::XmlError { .. }));
    }

    #[test]
    fn test_rejects_malformed_documents() {
        for bad in [
            "",
            "   ",
            "<BOM><RECORD>",
            "<BOM><RECORD></BOM>",
            "<BOM></BOM><BOM></BOM>",
            "<BOM/><BOM/>",
            "stray<BOM/>",
            "<BOM><A>&undefined;</A></BOM>",
            "<BOM attr=unquoted/>",
            "<BOM",
        ] {
            assert!(
                matches!(XmlDocument::parse(bad), Err(ParseError::XmlError { .. })),
                "expected XmlError for {bad:?}"
            );
        }
    }
}
