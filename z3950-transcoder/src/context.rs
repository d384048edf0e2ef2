use z3950_grammar::Semantic;

use crate::{
    error::{DecodingError, DecodingErrorType},
    profile::Profile,
    value::{ObjectIdentifier, Value},
};

/// Limits and leniency settings of one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    pub max_depth: usize,
    pub max_nodes: usize,
    /// Skip unknown trailing SEQUENCE components instead of failing
    pub allow_trailing_data: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_depth: 64,
            max_nodes: 65_536,
            allow_trailing_data: true,
        }
    }
}

impl DecoderOptions {
    /// Maximum nesting of constructed encodings
    pub fn max_depth(mut self, max_depth: usize) -> DecoderOptions {
        self.max_depth = max_depth;
        self
    }

    /// Maximum number of nodes in one decoded tree
    pub fn max_nodes(mut self, max_nodes: usize) -> DecoderOptions {
        self.max_nodes = max_nodes;
        self
    }

    pub fn allow_trailing_data(mut self, allow: bool) -> DecoderOptions {
        self.allow_trailing_data = allow;
        self
    }
}

/// State that is threaded through one decode call tree.
///
/// Besides the resource budget it carries the values that earlier
/// siblings establish for later ones: the attribute set selected by
/// an `AttributeSetId`, the last `attributeType` and the diagnostic
/// set of a `DefaultDiagFormat`. These are scoped lexically, every
/// SEQUENCE restores them when it is left.
pub struct DecodeContext<'p> {
    pub(crate) options: DecoderOptions,
    pub(crate) profile: &'p dyn Profile,
    depth: usize,
    nodes: usize,
    scope: Scope,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    attribute_set: Option<ObjectIdentifier>,
    attribute_type: Option<i64>,
    diagnostic_set: Option<ObjectIdentifier>,
}

impl<'p> DecodeContext<'p> {
    pub fn new(options: DecoderOptions, profile: &'p dyn Profile) -> Self {
        DecodeContext {
            options,
            profile,
            depth: 0,
            nodes: 0,
            scope: Scope::default(),
        }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn attribute_set(&self) -> Option<&ObjectIdentifier> {
        self.scope.attribute_set.as_ref()
    }

    pub fn attribute_type(&self) -> Option<i64> {
        self.scope.attribute_type
    }

    pub fn diagnostic_set(&self) -> Option<&ObjectIdentifier> {
        self.scope.diagnostic_set.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub(crate) fn descend(&mut self, offset: usize) -> Result<(), DecodingError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodingError::new(
                &format!("nesting exceeds {} levels", self.options.max_depth),
                DecodingErrorType::DepthLimitExceeded,
            )
            .at(offset));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn count_node(&mut self, offset: usize) -> Result<(), DecodingError> {
        if self.nodes >= self.options.max_nodes {
            return Err(DecodingError::new(
                &format!("tree exceeds {} nodes", self.options.max_nodes),
                DecodingErrorType::NodeLimitExceeded,
            )
            .at(offset));
        }
        self.nodes += 1;
        Ok(())
    }

    pub(crate) fn save_scope(&self) -> Scope {
        self.scope.clone()
    }

    pub(crate) fn restore_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    /// Records what a decoded value means for the values that follow it.
    pub(crate) fn observe(&mut self, semantic: Semantic, value: &Value) {
        match (semantic, value) {
            (Semantic::AttributeSetId, Value::ObjectIdentifier(oid)) => {
                self.scope.attribute_set = Some(oid.clone())
            }
            (Semantic::AttributeType, Value::Integer(t)) => self.scope.attribute_type = Some(*t),
            (Semantic::DiagnosticSetId, Value::ObjectIdentifier(oid)) => {
                self.scope.diagnostic_set = Some(oid.clone())
            }
            _ => (),
        }
    }

    /// Display text for a decoded primitive.
    pub(crate) fn describe(&self, semantic: Semantic, value: &Value) -> Option<String> {
        self.profile.describe(semantic, value, self)
    }
}
