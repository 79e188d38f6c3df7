//! Documentation model decoded from the external parser's JSON output.
//!
//! The parser emits one JSON object keyed by class identifier. Every nested
//! object is decoded into an [`IndexMap`] so it keeps the order it had in the
//! JSON text, which is the order classes and documentables appear on the
//! generated page. A repeated key keeps its first position and takes the
//! last value.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Name of the anonymous group the parser puts ungrouped entries into.
pub const DEFAULT_SECTION: &str = "__default";

/// Kind of a supersection. The parser keys supersections by these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Example,
    Constructor,
    Option,
    Event,
    Method,
    Function,
    Property,
    Pane,
}

impl SectionKind {
    /// Order in which kinds appear inside a class block.
    pub const PAGE_ORDER: [SectionKind; 8] = [
        SectionKind::Example,
        SectionKind::Constructor,
        SectionKind::Option,
        SectionKind::Event,
        SectionKind::Method,
        SectionKind::Function,
        SectionKind::Property,
        SectionKind::Pane,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::PAGE_ORDER.into_iter().find(|kind| kind.key() == key)
    }

    /// Supersection key used by the parser.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Example => "example",
            SectionKind::Constructor => "constructor",
            SectionKind::Option => "option",
            SectionKind::Event => "event",
            SectionKind::Method => "method",
            SectionKind::Function => "function",
            SectionKind::Property => "property",
            SectionKind::Pane => "pane",
        }
    }

    /// Heading text for the kind.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Example => "Examples",
            SectionKind::Constructor => "Constructor",
            SectionKind::Option => "Options",
            SectionKind::Event => "Events",
            SectionKind::Method => "Methods",
            SectionKind::Function => "Functions",
            SectionKind::Property => "Properties",
            SectionKind::Pane => "Panes",
        }
    }

    /// Suffix joined to the class name to form the heading anchor.
    pub fn anchor_suffix(self) -> &'static str {
        match self {
            SectionKind::Example => "examples-list",
            SectionKind::Constructor => "constructor-list",
            SectionKind::Option => "options-list",
            SectionKind::Event => "events-list",
            SectionKind::Method => "methods-list",
            SectionKind::Function => "functions-list",
            SectionKind::Property => "properties-list",
            SectionKind::Pane => "panes-list",
        }
    }

    /// Listed kinds have their sections sorted by name. Examples and
    /// constructors keep parser order.
    pub fn is_listed(self) -> bool {
        !matches!(self, SectionKind::Example | SectionKind::Constructor)
    }

    /// Whether subclasses show this kind from their ancestors.
    pub fn is_inheritable(self) -> bool {
        matches!(
            self,
            SectionKind::Option | SectionKind::Event | SectionKind::Method | SectionKind::Property
        )
    }
}

/// The complete class table for one version.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct RootDoc {
    classes: IndexMap<String, ClassDoc>,
}

impl RootDoc {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn get(&self, id: &str) -> Option<&ClassDoc> {
        self.classes.get(id)
    }

    /// Look up a class together with the identifier it is keyed by.
    pub fn get_entry(&self, id: &str) -> Option<(&str, &ClassDoc)> {
        self.classes
            .get_key_value(id)
            .map(|(key, class)| (key.as_str(), class))
    }

    /// Classes in table order, with their identifiers.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &ClassDoc)> {
        self.classes.iter().map(|(id, class)| (id.as_str(), class))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

/// Documentation record for one class.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ClassDoc {
    pub name: String,
    #[serde(default)]
    pub aka: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub supersections: IndexMap<String, SuperSection>,
    #[serde(default)]
    pub inherits: Vec<String>,
    #[serde(default)]
    pub id: String,
}

impl ClassDoc {
    pub fn supersection(&self, kind: SectionKind) -> Option<&SuperSection> {
        self.supersections.get(kind.key())
    }

    /// Supersection keys that do not name a [`SectionKind`].
    pub fn unknown_supersections(&self) -> impl Iterator<Item = &str> {
        self.supersections
            .keys()
            .map(String::as_str)
            .filter(|key| SectionKind::from_key(key).is_none())
    }
}

/// All sections of one kind for a class.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct SuperSection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aka: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub sections: IndexMap<String, Section>,
}

/// A named group of documentables of the same kind.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub aka: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub uninheritable: bool,
    #[serde(default)]
    pub documentables: IndexMap<String, Documentable>,
    #[serde(default, rename = "type")]
    pub entry_kind: String,
}

impl Section {
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SECTION
    }

    /// No documentables and no comments.
    pub fn is_blank(&self) -> bool {
        self.documentables.is_empty() && self.comments.is_empty()
    }
}

/// One documented unit: a method overload, option, property, event or pane.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Documentable {
    pub name: String,
    #[serde(default)]
    pub aka: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub params: IndexMap<String, Param>,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, rename = "defaultValue")]
    pub default_value: Option<DefaultValue>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
}

/// A scalar default as written in the source comment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Number(n) => match n.as_f64() {
                // Whole floats print like integers: `1.0` renders as `1`.
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e21 => {
                    write!(f, "{}", x as i128)
                }
                _ => write!(f, "{}", n),
            },
            DefaultValue::Text(s) => f.write_str(s),
        }
    }
}

/// Invariant violations in the class table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown class: {0}")]
    UnknownClass(String),
    #[error("class {class} inherits from unknown parent {parent}")]
    UnknownParent { class: String, parent: String },
    #[error("inheritance cycle: {}", .chain.join(" -> "))]
    InheritanceCycle { chain: Vec<String> },
}
