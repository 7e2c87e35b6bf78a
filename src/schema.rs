//! Composable schema nodes.
//!
//! A `Schema` is a tagged tree describing an expected data shape. Container
//! variants carry their children inline; `When` is a two-branch conditional
//! that collapses to a concrete node via `resolve`; `Ref` is a terminal
//! pointer that traversal returns as-is.

use indexmap::IndexMap;
use serde_json::Value;

use crate::segment::get_path;

// ------------------------------- Nodes ------------------------------------ //

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Scalar(ScalarKind),
    Object { fields: IndexMap<String, Schema> },
    Array { item: Box<Schema> },
    Tuple { elems: Vec<Schema> },
    Ref(Reference),
    When(When),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Mixed,
    Boolean,
    Number,
    String,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Mixed => "mixed",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Number => "number",
            ScalarKind::String => "string",
        }
    }
}

/// Terminal pointer to a sibling value (`"sibling.path"`) or an ambient
/// context value (`"$ctx.path"`). Never traversed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub key: String,
    pub is_context: bool,
}

impl Reference {
    pub fn new(key: impl Into<String>) -> Self {
        let raw: String = key.into();
        match raw.strip_prefix('$') {
            Some(rest) => Reference { key: rest.to_string(), is_context: true },
            None => Reference { key: raw, is_context: false },
        }
    }

    /// Read the referenced concrete value out of a resolution context.
    pub fn resolve_value(&self, ctx: &ResolveContext<'_>) -> Option<Value> {
        let root = if self.is_context { ctx.context } else { ctx.parent };
        root.and_then(|v| get_path(v, &self.key)).cloned()
    }
}

/// Two-branch conditional: probe `key`, compare against `is`, pick a branch.
///
/// `key` names a field on the enclosing object's value; a `$`-prefixed key is
/// read from the ambient context value instead. Dotted keys walk nested
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct When {
    pub key: String,
    pub is: Value,
    pub then: Box<Schema>,
    pub otherwise: Box<Schema>,
}

impl When {
    fn pick<'s>(&'s self, ctx: &ResolveContext<'_>) -> &'s Schema {
        let probe = match self.key.strip_prefix('$') {
            Some(ctx_key) => ctx.context.and_then(|c| get_path(c, ctx_key)),
            None => ctx.parent.and_then(|p| get_path(p, &self.key)),
        };
        match probe {
            Some(v) if *v == self.is => &self.then,
            _ => &self.otherwise,
        }
    }
}

// --------------------------- Resolution context --------------------------- //

/// One level of enclosing context: the parent schema and the parent's
/// concrete value at that level. The chain is ordered most-recent-first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ancestor {
    pub schema: Schema,
    pub value: Option<Value>,
}

/// Everything conditional logic may inspect when collapsing a node.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Ambient value supplied by the caller (defaults to the root value).
    pub context: Option<&'a Value>,
    /// Concrete value one level up from the current location.
    pub parent: Option<&'a Value>,
    /// Concrete value at the current location.
    pub value: Option<&'a Value>,
    /// Enclosing `{schema, value}` pairs, nearest first.
    pub from: &'a [Ancestor],
}

// ------------------------------ Operations -------------------------------- //

impl Schema {
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Scalar(k) => k.as_str(),
            Schema::Object { .. } => "object",
            Schema::Array { .. } => "array",
            Schema::Tuple { .. } => "tuple",
            Schema::Ref(_) => "ref",
            Schema::When(_) => "when",
        }
    }

    /// Collapse conditional definitions against a resolution context.
    ///
    /// Identity on every variant except `When`, which picks a branch and
    /// resolves it recursively (branches may themselves be conditional).
    /// Idempotent: resolving an already-concrete node is a clone.
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Schema {
        match self {
            Schema::When(w) => w.pick(ctx).resolve(ctx),
            other => other.clone(),
        }
    }

    // -- constructors --

    pub fn mixed() -> Self {
        Schema::Scalar(ScalarKind::Mixed)
    }
    pub fn boolean() -> Self {
        Schema::Scalar(ScalarKind::Boolean)
    }
    pub fn number() -> Self {
        Schema::Scalar(ScalarKind::Number)
    }
    pub fn string() -> Self {
        Schema::Scalar(ScalarKind::String)
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Object {
            fields: fields.into_iter().map(|(k, s)| (k.into(), s)).collect(),
        }
    }

    pub fn array(item: Schema) -> Self {
        Schema::Array { item: Box::new(item) }
    }

    pub fn tuple<I: IntoIterator<Item = Schema>>(elems: I) -> Self {
        Schema::Tuple { elems: elems.into_iter().collect() }
    }

    pub fn when(key: impl Into<String>, is: Value, then: Schema, otherwise: Schema) -> Self {
        Schema::When(When {
            key: key.into(),
            is,
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    pub fn reference(key: impl Into<String>) -> Self {
        Schema::Ref(Reference::new(key))
    }
}

// -------------------------------- Tests ----------------------------------- //
