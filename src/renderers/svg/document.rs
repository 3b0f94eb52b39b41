//! Parsed SVG document
//!
//! The template is parsed into a roxmltree tree, which holds entity-expanded
//! text and attribute values, and written back out with a quick-xml writer.
//! Only the root's canvas attributes are rewritten; overlaid text is appended
//! after everything the template already contains.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::escape::partial_escape;
use quick_xml::Writer;
use roxmltree::{Node, NodeType, ParsingOptions};

use super::elements::{format_number, TextContent, TextElement};
use super::ReportError;
use crate::models::defaults::{SVG_NAMESPACE, XML_HEADER};

const CANVAS_ATTRIBUTES: [&str; 3] = ["width", "height", "viewBox"];

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An SVG document open for overlaying text
#[derive(Debug)]
pub struct SvgDocument<'a> {
    tree: roxmltree::Document<'a>,
    overlays: Vec<TextElement>,
    canvas: Option<(f64, f64)>,
}

impl<'a> SvgDocument<'a> {
    pub fn parse(markup: &'a str) -> Result<Self, ReportError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let tree = roxmltree::Document::parse_with_options(markup, options)?;
        log::debug!(
            "Parsed template: root <{}>, {} nodes",
            tree.root_element().tag_name().name(),
            tree.descendants().count()
        );

        Ok(Self {
            tree,
            overlays: Vec::new(),
            canvas: None,
        })
    }

    /// Force width, height and viewBox on the root element
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas = Some((width, height));
    }

    /// Append a text element after all existing content
    pub fn append_text(&mut self, element: TextElement) {
        self.overlays.push(element);
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Serialize the document element behind the fixed XML header
    ///
    /// The prolog (declaration, DOCTYPE, comments before the root) and
    /// anything after the root element are not written.
    pub fn serialize(&self) -> Result<String, ReportError> {
        let mut writer = Writer::new(Vec::new());
        let root = self.tree.root_element();
        let start = self.root_start(root);

        if !root.has_children() && self.overlays.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            let end = start.to_end().into_owned();
            writer.write_event(Event::Start(start))?;
            for child in root.children() {
                write_node(&mut writer, child)?;
            }
            let needs_namespace = root.lookup_namespace_uri(None) != Some(SVG_NAMESPACE);
            for overlay in &self.overlays {
                write_text(&mut writer, overlay, needs_namespace)?;
            }
            writer.write_event(Event::End(end))?;
        }

        let body = String::from_utf8(writer.into_inner())?;
        Ok(format!("{}\n{}", XML_HEADER, body))
    }

    /// Root start tag with the canvas attributes applied
    fn root_start(&self, root: Node) -> BytesStart<'static> {
        let overrides = self.canvas.map(|(width, height)| {
            [
                format_number(width),
                format_number(height),
                format!("0 0 {} {}", format_number(width), format_number(height)),
            ]
        });
        let mut seen = [false; 3];

        let mut start = start_tag(root);
        for attr in root.attributes() {
            let canvas_slot = match attr.namespace() {
                None => CANVAS_ATTRIBUTES.iter().position(|name| *name == attr.name()),
                Some(_) => None,
            };
            match (canvas_slot, &overrides) {
                (Some(i), Some(values)) => {
                    seen[i] = true;
                    push_attribute(&mut start, CANVAS_ATTRIBUTES[i], &values[i]);
                }
                _ => push_attribute(&mut start, &attribute_name(root, &attr), attr.value()),
            }
        }

        if let Some(values) = &overrides {
            for (i, name) in CANVAS_ATTRIBUTES.iter().enumerate() {
                if !seen[i] {
                    push_attribute(&mut start, name, &values[i]);
                }
            }
        }

        start
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: Node) -> Result<(), ReportError> {
    match node.node_type() {
        NodeType::Element => {
            let mut start = start_tag(node);
            for attr in node.attributes() {
                push_attribute(&mut start, &attribute_name(node, &attr), attr.value());
            }
            if node.has_children() {
                let end = start.to_end().into_owned();
                writer.write_event(Event::Start(start))?;
                for child in node.children() {
                    write_node(writer, child)?;
                }
                writer.write_event(Event::End(end))?;
            } else {
                writer.write_event(Event::Empty(start))?;
            }
        }
        NodeType::Text => {
            if let Some(text) = node.text() {
                writer.write_event(Event::Text(escaped_text(text)))?;
            }
        }
        NodeType::Comment => {
            if let Some(text) = node.text() {
                writer.write_event(Event::Comment(BytesText::from_escaped(text)))?;
            }
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                let content = match pi.value {
                    Some(value) => format!("{} {}", pi.target, value),
                    None => pi.target.to_string(),
                };
                writer.write_event(Event::PI(BytesText::from_escaped(content)))?;
            }
        }
        NodeType::Root => {}
    }
    Ok(())
}

fn write_text(
    writer: &mut Writer<Vec<u8>>,
    element: &TextElement,
    needs_namespace: bool,
) -> Result<(), ReportError> {
    let mut start = BytesStart::new("text");
    if needs_namespace {
        push_attribute(&mut start, "xmlns", SVG_NAMESPACE);
    }
    for (name, value) in element.attributes() {
        push_attribute(&mut start, name, &value);
    }

    match &element.content {
        TextContent::Plain(text) if text.is_empty() => {
            writer.write_event(Event::Empty(start))?;
        }
        TextContent::Lines(spans) if spans.is_empty() => {
            writer.write_event(Event::Empty(start))?;
        }
        TextContent::Plain(text) => {
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Text(escaped_text(text)))?;
            writer.write_event(Event::End(BytesEnd::new("text")))?;
        }
        TextContent::Lines(spans) => {
            writer.write_event(Event::Start(start))?;
            for span in spans {
                let mut tspan = BytesStart::new("tspan");
                push_attribute(&mut tspan, "x", &format_number(span.x));
                push_attribute(&mut tspan, "dy", &format_number(span.dy));
                writer.write_event(Event::Start(tspan))?;
                writer.write_event(Event::Text(escaped_text(&span.text)))?;
                writer.write_event(Event::End(BytesEnd::new("tspan")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("text")))?;
        }
    }

    Ok(())
}

/// Start tag carrying the element's qualified name and the namespace
/// declarations it introduces relative to its parent
fn start_tag(node: Node) -> BytesStart<'static> {
    let mut start = BytesStart::new(element_name(node));

    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    let mut declares_default = false;
    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }
        declares_default |= ns.name().is_none();
        if inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        match ns.name() {
            Some(prefix) => push_attribute(&mut start, &format!("xmlns:{}", prefix), ns.uri()),
            None => push_attribute(&mut start, "xmlns", ns.uri()),
        }
    }

    // Default namespace undeclared below an element that had one
    if !declares_default && inherited.iter().any(|(name, _)| name.is_none()) {
        push_attribute(&mut start, "xmlns", "");
    }

    start
}

fn element_name(node: Node) -> String {
    let tag = node.tag_name();
    let Some(uri) = tag.namespace() else {
        return tag.name().to_string();
    };
    if node.namespaces().any(|ns| ns.name().is_none() && ns.uri() == uri) {
        return tag.name().to_string();
    }
    match node.namespaces().find(|ns| ns.uri() == uri).and_then(|ns| ns.name()) {
        Some(prefix) => format!("{}:{}", prefix, tag.name()),
        None => tag.name().to_string(),
    }
}

fn attribute_name(node: Node, attr: &roxmltree::Attribute) -> String {
    let prefix = match attr.namespace() {
        None => None,
        Some(XML_NAMESPACE) => Some("xml"),
        Some(uri) => node
            .namespaces()
            .find(|ns| ns.uri() == uri && ns.name().is_some())
            .and_then(|ns| ns.name()),
    };
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, attr.name()),
        None => attr.name().to_string(),
    }
}

/// Attribute values are escaped for `&`, `<`, `>` and `"`; apostrophes stay
/// literal since values are always double-quoted.
fn push_attribute(start: &mut BytesStart, name: &str, value: &str) {
    let escaped = partial_escape(value).replace('"', "&quot;");
    start.push_attribute((name.as_bytes(), escaped.as_bytes()));
}

/// Text content escaped for `&`, `<` and `>` only
fn escaped_text(text: &str) -> BytesText<'_> {
    BytesText::from_escaped(partial_escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PositionedVariable;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="10" height="10"/></svg>"#;

    #[test]
    fn test_round_trip_without_changes() {
        let doc = SvgDocument::parse(SVG).unwrap();
        let out = doc.serialize().unwrap();
        assert_eq!(out, format!("{}\n{}", XML_HEADER, SVG));
    }

    #[test]
    fn test_canvas_attributes_overwritten_in_place() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        doc.set_canvas_size(2480.0, 3508.0);
        let out = doc.serialize().unwrap();
        assert!(out.contains(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="2480" height="3508" viewBox="0 0 2480 3508">"#
        ), "got: {}", out);
        // Child attributes of the same name are left alone
        assert!(out.contains(r#"<rect width="10" height="10"/>"#));
    }

    #[test]
    fn test_existing_view_box_replaced() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" id="bg"/>"#;
        let mut doc = SvgDocument::parse(svg).unwrap();
        doc.set_canvas_size(200.0, 100.0);
        let out = doc.serialize().unwrap();
        assert!(out.ends_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100" id="bg" width="200" height="100"/>"#
        ), "got: {}", out);
    }

    #[test]
    fn test_prolog_and_epilog_dropped() {
        let svg = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#, "\n",
            r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#, "\n",
            "<!-- Generator: test -->\n",
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#,
            "\n<!-- trailing -->\n",
        );
        let doc = SvgDocument::parse(svg).unwrap();
        let out = doc.serialize().unwrap();
        assert_eq!(
            out,
            format!("{}\n{}", XML_HEADER, r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#)
        );
    }

    #[test]
    fn test_comments_and_whitespace_inside_root_kept() {
        let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <!-- layer 1 -->\n  <g/>\n</svg>";
        let doc = SvgDocument::parse(svg).unwrap();
        let out = doc.serialize().unwrap();
        assert_eq!(out, format!("{}\n{}", XML_HEADER, svg));
    }

    #[test]
    fn test_internal_entities_are_expanded() {
        let svg = r#"<!DOCTYPE svg [
  <!ENTITY ns_svg "http://www.w3.org/2000/svg">
  <!ENTITY co "ACME Filhos">
]>
<svg xmlns="&ns_svg;"><text>&co;</text><g id="&co;"/></svg>"#;
        let doc = SvgDocument::parse(svg).unwrap();
        let out = doc.serialize().unwrap();
        assert!(out.contains(r#"<svg xmlns="http://www.w3.org/2000/svg">"#), "got: {}", out);
        assert!(out.contains("<text>ACME Filhos</text>"), "got: {}", out);
        assert!(out.contains(r#"<g id="ACME Filhos"/>"#), "got: {}", out);
        assert!(!out.contains("&co;") && !out.contains("&ns_svg;"));
    }

    #[test]
    fn test_text_appended_after_content() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let var = PositionedVariable::new("A & B <c>", 1.0, 2.0);
        doc.append_text(TextElement::from_variable(&var));
        let out = doc.serialize().unwrap();
        assert!(out.ends_with(
            r##"<rect width="10" height="10"/><text x="1" y="2" font-size="24" font-family="Arial" fill="#000000">A &amp; B &lt;c&gt;</text></svg>"##
        ), "got: {}", out);
    }

    #[test]
    fn test_apostrophe_in_attribute_left_literal() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let var = PositionedVariable::new("x", 0.0, 0.0).with_font_family("O'Brien Sans");
        doc.append_text(TextElement::from_variable(&var));
        let out = doc.serialize().unwrap();
        assert!(out.contains(r#"font-family="O'Brien Sans""#), "got: {}", out);
    }

    #[test]
    fn test_self_closing_root_expanded_when_text_appended() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        let mut doc = SvgDocument::parse(svg).unwrap();
        doc.append_text(TextElement::from_variable(&PositionedVariable::new("Hi", 0.0, 0.0)));
        let out = doc.serialize().unwrap();
        assert!(out.ends_with(
            r##"<svg xmlns="http://www.w3.org/2000/svg"><text x="0" y="0" font-size="24" font-family="Arial" fill="#000000">Hi</text></svg>"##
        ), "got: {}", out);
    }

    #[test]
    fn test_namespace_added_when_root_has_no_default_svg_namespace() {
        let svg = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"></svg:svg>"#;
        let mut doc = SvgDocument::parse(svg).unwrap();
        doc.append_text(TextElement::from_variable(&PositionedVariable::new("Hi", 0.0, 0.0)));
        let out = doc.serialize().unwrap();
        assert!(out.contains(r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg">"#), "got: {}", out);
        assert!(
            out.contains(r#"<text xmlns="http://www.w3.org/2000/svg" x="0""#),
            "got: {}", out
        );
        assert!(out.ends_with("</svg:svg>"));
    }

    #[test]
    fn test_prefixed_attributes_keep_their_prefix() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a" xml:space="preserve"/></svg>"##;
        let doc = SvgDocument::parse(svg).unwrap();
        let out = doc.serialize().unwrap();
        assert!(out.contains(r##"<use xlink:href="#a" xml:space="preserve"/>"##), "got: {}", out);
        assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#), "got: {}", out);
    }

    #[test]
    fn test_double_quote_in_attribute_escaped() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" data-note='say "hi"'/>"#;
        let doc = SvgDocument::parse(svg).unwrap();
        let out = doc.serialize().unwrap();
        assert!(out.contains(r#"data-note="say &quot;hi&quot;""#), "got: {}", out);
    }

    #[test]
    fn test_malformed_markup_rejected() {
        let err = SvgDocument::parse("<svg><g></svg>").unwrap_err();
        assert!(matches!(err, ReportError::Xml(_)), "got: {:?}", err);
    }

    #[test]
    fn test_empty_markup_rejected() {
        assert!(SvgDocument::parse("").is_err());
    }
}
