//! The decoded value tree.
//!
//! Every node keeps the byte range of the message it was decoded
//! from, an optional display text supplied by the decoding profile
//! and the non-fatal diagnostics that were raised while decoding it.
use std::{borrow::Cow, fmt, ops::Range};

use z3950_grammar::Semantic;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Cow<'static, str>,
    pub semantic: Semantic,
    pub span: Range<usize>,
    pub value: Value,
    pub display: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    BitString(BitString),
    OctetString(Vec<u8>),
    /// Octets of a character string type, as received
    CharacterString(Vec<u8>),
    ObjectIdentifier(ObjectIdentifier),
    GeneralizedTime(String),
    /// Named components of a SEQUENCE, SET or EXTERNAL, or of a
    /// record that was interpreted by a profile
    Sequence(Vec<Node>),
    SequenceOf(Vec<Node>),
    /// The chosen alternative, named after it
    Choice(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier(pub Vec<u128>);

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u128] {
        &self.0
    }
}

impl From<&[u128]> for ObjectIdentifier {
    fn from(value: &[u128]) -> Self {
        ObjectIdentifier(value.to_vec())
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut arcs = self.0.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
        }
        arcs.try_for_each(|arc| write!(f, ".{arc}"))
    }
}

/// A BIT STRING with its trailing unused bits removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    pub bytes: Vec<u8>,
    pub unused_bits: u8,
}

impl BitString {
    pub fn len(&self) -> usize {
        self.bytes.len() * 8 - self.unused_bits as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit 0 is the most significant bit of the first octet.
    pub fn bit(&self, index: usize) -> bool {
        index < self.len() && self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    pub fn set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|i| self.bit(*i))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    InvalidValue,
    InvalidRecordLength,
    InvalidDirectoryEntry,
    MissingTerminator,
    TrailingData,
}

/// A problem that did not stop decoding, attached to the node it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub details: String,
    pub span: Range<usize>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, details: impl Into<String>, span: Range<usize>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind,
            details: details.into(),
            span,
        }
    }

    pub fn error(kind: DiagnosticKind, details: impl Into<String>, span: Range<usize>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind,
            details: details.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} at {}..{}: {}",
            self.severity, self.kind, self.span.start, self.span.end, self.details
        )
    }
}

/// One line of the flattened tree handed to an inspection UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord<'a> {
    pub path: String,
    pub semantic: Semantic,
    pub value: &'a Value,
    pub display: Option<&'a str>,
    pub span: Range<usize>,
    pub diagnostics: &'a [Diagnostic],
}

impl Node {
    pub fn new(name: impl Into<Cow<'static, str>>, span: Range<usize>, value: Value) -> Self {
        Node {
            name: name.into(),
            semantic: Semantic::Plain,
            span,
            value,
            display: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_semantic(mut self, semantic: Semantic) -> Self {
        self.semantic = semantic;
        self
    }

    pub fn with_display(mut self, display: Option<String>) -> Self {
        self.display = display;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Direct children, in decoding order
    pub fn children(&self) -> &[Node] {
        match &self.value {
            Value::Sequence(children) | Value::SequenceOf(children) => children,
            Value::Choice(chosen) => std::slice::from_ref(chosen.as_ref()),
            _ => &[],
        }
    }

    /// Resolves a dotted path of component names below this node.
    ///
    /// A segment matches a SEQUENCE component by name, a SEQUENCE OF
    /// element by index, or the chosen alternative of a CHOICE by its
    /// name. CHOICE nodes are also stepped through transparently when
    /// the segment names a component of the chosen alternative, so
    /// `query.rpn` and `query.type-1.rpn` resolve to the same node.
    pub fn get(&self, path: &str) -> Option<&Node> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.step(segment))
    }

    fn step(&self, segment: &str) -> Option<&Node> {
        match &self.value {
            Value::Sequence(children) => children.iter().find(|c| c.name == segment),
            Value::SequenceOf(children) => segment.parse::<usize>().ok().and_then(|i| children.get(i)),
            Value::Choice(chosen) if chosen.name == segment => Some(&**chosen),
            Value::Choice(chosen) => chosen.step(segment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::GeneralizedTime(s) => Some(s),
            Value::CharacterString(bytes) | Value::OctetString(bytes) => {
                std::str::from_utf8(bytes).ok()
            }
            Value::Choice(chosen) => chosen.as_str(),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match &self.value {
            Value::Integer(i) => Some(*i),
            Value::Choice(chosen) => chosen.as_integer(),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&ObjectIdentifier> {
        match &self.value {
            Value::ObjectIdentifier(oid) => Some(oid),
            Value::Choice(chosen) => chosen.as_oid(),
            _ => None,
        }
    }

    /// The name of the chosen alternative, if this is a CHOICE.
    pub fn chosen(&self) -> Option<&str> {
        match &self.value {
            Value::Choice(chosen) => Some(&*chosen.name),
            _ => None,
        }
    }

    /// Pre-order walk producing one record per node. SEQUENCE OF
    /// elements are addressed by index.
    pub fn flatten(&self) -> Vec<FieldRecord<'_>> {
        let mut records = Vec::new();
        self.flatten_into(self.name.to_string(), &mut records);
        records
    }

    fn flatten_into<'a>(&'a self, path: String, records: &mut Vec<FieldRecord<'a>>) {
        records.push(FieldRecord {
            path: path.clone(),
            semantic: self.semantic,
            value: &self.value,
            display: self.display.as_deref(),
            span: self.span.clone(),
            diagnostics: &self.diagnostics,
        });
        match &self.value {
            Value::SequenceOf(children) => children
                .iter()
                .enumerate()
                .for_each(|(i, child)| child.flatten_into(format!("{path}.{i}"), records)),
            _ => self
                .children()
                .iter()
                .for_each(|child| child.flatten_into(format!("{path}.{}", child.name), records)),
        }
    }

    /// All diagnostics of this node and its descendants
    pub fn all_diagnostics(&self) -> Vec<&Diagnostic> {
        let mut all: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        for child in self.children() {
            all.extend(child.all_diagnostics());
        }
        all
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::BitString(bits) => {
                bits.bytes.iter().try_for_each(|b| write!(f, "{b:02x}"))?;
                write!(f, " ({} unused)", bits.unused_bits)
            }
            Value::OctetString(bytes) => bytes.iter().try_for_each(|b| write!(f, "{b:02x}")),
            Value::CharacterString(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Value::GeneralizedTime(s) => write!(f, "{s}"),
            Value::ObjectIdentifier(oid) => write!(f, "{oid}"),
            Value::Sequence(c) => write!(f, "{} components", c.len()),
            Value::SequenceOf(c) => write!(f, "{} items", c.len()),
            Value::Choice(chosen) => write!(f, "{}", chosen.name),
        }
    }
}
