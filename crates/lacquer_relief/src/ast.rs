//! Angular template AST node types.
//!
//! The node set mirrors what the Angular template parser hands to
//! template visitors: elements with their plain attributes, property
//! bindings (`inputs`) and event bindings (`outputs`), plus text nodes.
//! Nodes own their data, so a tree can be deserialized and linted without
//! keeping the parser around.

use lacquer_carton::{CompactString, LineIndex};
use serde::{Deserialize, Serialize};

/// Source position in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Byte offset from start of file
    pub offset: u32,
    /// 1-indexed line number
    #[serde(default)]
    pub line: u32,
    /// 1-indexed column number
    #[serde(default)]
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Source span [start, end) together with the text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
    /// Exact template text between `start` and `end`
    pub source: CompactString,
}

impl Default for SourceSpan {
    fn default() -> Self {
        Self::STUB
    }
}

impl SourceSpan {
    /// Stub span for synthesized nodes
    pub const STUB: Self = Self {
        start: Position {
            offset: 0,
            line: 1,
            column: 1,
        },
        end: Position {
            offset: 0,
            line: 1,
            column: 1,
        },
        source: CompactString::const_new(""),
    };

    pub fn new(start: Position, end: Position, source: impl Into<CompactString>) -> Self {
        Self {
            start,
            end,
            source: source.into(),
        }
    }

    /// Build a span over `template[start..end]`, filling in line and column.
    ///
    /// Returns `None` when the range is out of bounds or splits a character.
    pub fn from_template(template: &str, start: u32, end: u32) -> Option<Self> {
        let text = template.get(start as usize..end as usize)?;
        let index = LineIndex::new(template);
        let (start_line, start_column) = index.line_col(start);
        let (end_line, end_column) = index.line_col(end);
        Some(Self {
            start: Position::new(start, start_line, start_column),
            end: Position::new(end, end_line, end_column),
            source: CompactString::from(text),
        })
    }

    /// The template text covered by this span
    #[inline]
    pub fn as_str(&self) -> &str {
        self.source.as_str()
    }

    /// Length of the span in bytes
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of a parsed template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    /// Full template source the spans point into
    pub source: String,
    #[serde(default)]
    pub children: Vec<TemplateNode>,
}

impl RootNode {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

/// All template child node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplateNode {
    Element(ElementNode),
    Text(TextNode),
    BoundText(BoundTextNode),
}

/// Element type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    #[default]
    Element,
    /// `<ng-template>` and structural-directive sugar (`*ngIf`)
    Template,
    /// `<ng-container>`
    Container,
}

/// Element node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: CompactString,
    #[serde(default)]
    pub element_type: ElementType,
    /// Plain `name="value"` attributes
    #[serde(default)]
    pub attributes: Vec<TextAttributeNode>,
    /// Property bindings (`[prop]`, `bind-prop`, the input half of `[(prop)]`)
    #[serde(default)]
    pub inputs: Vec<BoundAttributeNode>,
    /// Event bindings (`(event)`, `on-event`, the output half of `[(prop)]`)
    #[serde(default)]
    pub outputs: Vec<BoundEventNode>,
    #[serde(default)]
    pub children: Vec<TemplateNode>,
    pub source_span: SourceSpan,
}

impl ElementNode {
    pub fn new(tag: impl Into<CompactString>, source_span: SourceSpan) -> Self {
        Self {
            tag: tag.into(),
            element_type: ElementType::Element,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            children: Vec::new(),
            source_span,
        }
    }

    pub fn with_input(mut self, input: BoundAttributeNode) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_output(mut self, output: BoundEventNode) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Plain attribute node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributeNode {
    pub name: CompactString,
    #[serde(default)]
    pub value: CompactString,
    pub source_span: SourceSpan,
}

/// Kind of property binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BindingType {
    /// `[prop]="expr"`
    #[default]
    Property,
    /// `[attr.name]="expr"`
    Attribute,
    /// `[class.name]="expr"`
    Class,
    /// `[style.name]="expr"`
    Style,
    /// `[@trigger]="expr"`
    Animation,
    /// Input half of `[(prop)]="expr"`
    TwoWay,
}

/// Property binding node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundAttributeNode {
    pub name: CompactString,
    #[serde(default)]
    pub binding_type: BindingType,
    /// Bound expression source
    #[serde(default)]
    pub value: CompactString,
    pub source_span: SourceSpan,
}

impl BoundAttributeNode {
    pub fn new(
        name: impl Into<CompactString>,
        binding_type: BindingType,
        value: impl Into<CompactString>,
        source_span: SourceSpan,
    ) -> Self {
        Self {
            name: name.into(),
            binding_type,
            value: value.into(),
            source_span,
        }
    }
}

/// Kind of event binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ParsedEventType {
    /// DOM or directive output
    #[default]
    Regular,
    /// Animation callback (`(@trigger.done)`)
    Animation,
    /// Output half of `[(prop)]="expr"`
    TwoWay,
}

/// Event binding node
///
/// For `([ngModel])="name"` the parser strips the outer parens and yields an
/// event named `[ngModel]`; `source_span` still covers the whole attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundEventNode {
    pub name: CompactString,
    #[serde(default)]
    pub event_type: ParsedEventType,
    /// Handler expression source
    #[serde(default)]
    pub handler: CompactString,
    /// Global event target (`window`, `document` or `body`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<CompactString>,
    pub source_span: SourceSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_span: Option<SourceSpan>,
}

impl BoundEventNode {
    pub fn new(
        name: impl Into<CompactString>,
        handler: impl Into<CompactString>,
        source_span: SourceSpan,
    ) -> Self {
        Self {
            name: name.into(),
            event_type: ParsedEventType::Regular,
            handler: handler.into(),
            target: None,
            source_span,
            key_span: None,
        }
    }

    pub fn with_event_type(mut self, event_type: ParsedEventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_target(mut self, target: impl Into<CompactString>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Static text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub value: CompactString,
    pub source_span: SourceSpan,
}

/// Text with interpolations (`Hello {{ name }}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundTextNode {
    pub value: CompactString,
    pub source_span: SourceSpan,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<div>\n  <input ([ngModel])=\"name\">\n</div>";

    #[test]
    fn test_span_from_template() {
        let start = TEMPLATE.find("([").unwrap() as u32;
        let end = start + "([ngModel])=\"name\"".len() as u32;
        let span = SourceSpan::from_template(TEMPLATE, start, end).unwrap();

        assert_eq!(span.as_str(), "([ngModel])=\"name\"");
        assert_eq!(span.start.line, 2);
        assert_eq!(span.start.column, 10);
        assert_eq!(span.len(), end - start);
        assert_eq!(span.to_string(), "([ngModel])=\"name\"");
    }

    #[test]
    fn test_span_out_of_bounds() {
        assert!(SourceSpan::from_template(TEMPLATE, 10, 1000).is_none());
    }

    #[test]
    fn test_stub_span_is_empty() {
        assert!(SourceSpan::STUB.is_empty());
        assert_eq!(SourceSpan::default().as_str(), "");
    }

    #[test]
    fn test_node_json_round_trip_shape() {
        let span = SourceSpan::from_template(TEMPLATE, 8, 34).unwrap();
        let root = RootNode::new(TEMPLATE).with_child(TemplateNode::Element(
            ElementNode::new("input", span.clone())
                .with_output(BoundEventNode::new("[ngModel]", "name", span)),
        ));

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["children"][0]["type"], "element");
        assert_eq!(json["children"][0]["outputs"][0]["name"], "[ngModel]");
        assert_eq!(json["children"][0]["outputs"][0]["eventType"], "regular");

        let back: RootNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn test_deserialize_minimal_event() {
        let json = r#"{
            "name": "click",
            "sourceSpan": {
                "start": { "offset": 5 },
                "end": { "offset": 25 },
                "source": "(click)=\"onClick()\""
            }
        }"#;
        let event: BoundEventNode = serde_json::from_str(json).unwrap();
        assert_eq!(event.name, "click");
        assert_eq!(event.event_type, ParsedEventType::Regular);
        assert_eq!(event.source_span.start.offset, 5);
        assert_eq!(event.source_span.start.line, 0);
        assert!(event.target.is_none());
    }

    #[test]
    fn test_window_event_round_trip() {
        let template = r#"<div (window:resize)="onResize()"></div>"#;
        let span = SourceSpan::from_template(template, 5, 33).unwrap();
        let event = BoundEventNode::new("resize", "onResize()", span).with_target("window");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["target"], "window");
        assert!(json.get("keySpan").is_none());

        let back: BoundEventNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_two_way_event_type() {
        let event = BoundEventNode::new("ngModelChange", "name = $event", SourceSpan::STUB)
            .with_event_type(ParsedEventType::TwoWay);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "twoWay");
        assert!(json.get("target").is_none());
    }
}
