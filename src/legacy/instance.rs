use super::value::{InputAddress, InputId, InputValue, NodeType, OutputLink, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A borrowed view of one legacy input, before it is copied into a descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputRef<'a> {
    /// An input stored under its stable ID.
    Keyed(&'a InputValue),
    /// A raw widget value from the positional array.
    Widget(&'a Value),
}

impl InputRef<'_> {
    pub fn to_input_value(self) -> InputValue {
        match self {
            InputRef::Keyed(value) => value.clone(),
            InputRef::Widget(value) => InputValue::Literal(value.clone()),
        }
    }
}

impl fmt::Display for InputRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRef::Keyed(value) => write!(f, "{}", value),
            InputRef::Widget(value) => write!(f, "{}", value),
        }
    }
}

/// A serialized node built against a deprecated node type, as the host graph
/// hands it over. Read-only to the resolver.
///
/// Inputs exist in two shapes: keyed by stable ID (connected inputs and
/// anything the host already serialized by name) and positional widget
/// values, whose IDs are only known through a record's widget positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyNodeInstance {
    pub id: String,
    #[serde(alias = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub inputs: BTreeMap<InputId, InputValue>,
    #[serde(default, alias = "widgets_values")]
    pub widget_values: Vec<Value>,
    #[serde(default)]
    pub output_links: Vec<OutputLink>,
}

impl LegacyNodeInstance {
    pub fn new(id: impl Into<String>, node_type: impl Into<NodeType>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, id: impl Into<InputId>, value: InputValue) -> Self {
        self.inputs.insert(id.into(), value);
        self
    }

    pub fn with_widget_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.widget_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_link(mut self, link: OutputLink) -> Self {
        self.output_links.push(link);
        self
    }

    /// Every input the node carries, tagged with how it is addressed.
    /// Keyed inputs come first, in ID order, followed by widget values in
    /// positional order. Values are borrowed; callers copy what they keep.
    pub fn entries(&self) -> impl Iterator<Item = (InputAddress, InputRef<'_>)> {
        let keyed = self
            .inputs
            .iter()
            .map(|(id, value)| (InputAddress::ById(id.clone()), InputRef::Keyed(value)));
        let positional = self
            .widget_values
            .iter()
            .enumerate()
            .map(|(i, v)| (InputAddress::ByPosition(i), InputRef::Widget(v)));
        keyed.chain(positional)
    }

    /// Downstream links leaving the given output slot.
    pub fn links_from(&self, slot: u32) -> impl Iterator<Item = &OutputLink> {
        self.output_links
            .iter()
            .filter(move |link| link.origin_slot == slot)
    }
}
