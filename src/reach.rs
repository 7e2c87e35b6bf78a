//! Path resolution against a schema tree.
//!
//! Consumes classified path segments one at a time against a traversal
//! accumulator (current schema, parent value, current value, ancestry chain)
//! and yields the schema governing the addressed location plus the context
//! needed to re-collapse conditional nodes there.
//!
//! Three entry points:
//! - `locate` returns the full traversal record;
//! - `reach` returns just the declared node (possibly still conditional);
//! - `locate_resolved` applies one final `resolve` so conditional nodes
//!   collapse to their concrete shape.

use serde_json::Value;

use crate::schema::{Ancestor, ResolveContext, Schema};
use crate::segment::{self, Segment};

// ------------------------------- Errors ----------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReachError {
    /// A tuple-shaped node was addressed by a bare key instead of `[i]`.
    #[error(
        "cannot implicitly index into a tuple type: the path segment \"{at}\" \
         must contain an index to the tuple element, e.g. \"{at}[0]\""
    )]
    TupleIndexRequired { at: String },

    /// The requested index is past the end of the concrete value (or past
    /// the tuple's fixed arity).
    #[error("cannot resolve an array item at {segment} in the path \"{path}\": no value at that index")]
    IndexOutOfRange { segment: String, path: String },

    /// The current node has no field matching the requested key.
    #[error("the schema does not contain the path \"{path}\" (failed at {segment}, which is a \"{kind}\" type)")]
    UnknownField {
        segment: String,
        path: String,
        kind: &'static str,
    },
}

// ------------------------------- Result ----------------------------------- //

/// Everything `locate` learned on the way to a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Node reachable at the path. Not passed through a final `resolve`;
    /// see `locate_resolved`.
    pub schema: Schema,
    /// Concrete value one level up from the located value.
    pub parent: Option<Value>,
    /// Last path segment consumed; empty for the empty path.
    pub parent_path: String,
    /// Ancestry chain, nearest enclosing object first.
    pub from: Vec<Ancestor>,
    /// Concrete value at the located path, when one was supplied and the
    /// path does not run past the available data.
    pub value: Option<Value>,
}

// ----------------------------- Entry points ------------------------------- //

/// Resolve `path` against `root`, threading an optional concrete `value`
/// rooted at the same point. `context` is the ambient value handed to
/// conditional logic; it defaults to `value`.
///
/// The empty path short-circuits: the root comes back untouched, with no
/// resolution applied.
pub fn locate(
    root: &Schema,
    path: &str,
    value: Option<&Value>,
    context: Option<&Value>,
) -> Result<Located, ReachError> {
    let context = context.or(value);

    if path.is_empty() {
        return Ok(Located {
            schema: root.clone(),
            parent: None,
            parent_path: String::new(),
            from: Vec::new(),
            value: value.cloned(),
        });
    }

    let mut walk = Walk::start(root.clone(), value.cloned());
    for seg in segment::segments(path) {
        walk = walk.step(&seg, path, context)?;
    }
    Ok(walk.finish())
}

/// The declared node at `path`, without a final resolution pass. A path that
/// lands on a conditional node returns the conditional itself.
pub fn reach(
    root: &Schema,
    path: &str,
    value: Option<&Value>,
    context: Option<&Value>,
) -> Result<Schema, ReachError> {
    Ok(locate(root, path, value, context)?.schema)
}

/// `locate`, then one more `resolve` on the located node using the
/// accumulated ancestry, so a path terminating on a conditional collapses to
/// the branch selected by sibling/ancestor data.
pub fn locate_resolved(
    root: &Schema,
    path: &str,
    value: Option<&Value>,
    context: Option<&Value>,
) -> Result<Schema, ReachError> {
    let context = context.or(value);
    let hit = locate(root, path, value, context)?;
    Ok(hit.schema.resolve(&ResolveContext {
        context,
        parent: hit.parent.as_ref(),
        value: hit.value.as_ref(),
        from: &hit.from,
    }))
}

// ------------------------------ Traversal --------------------------------- //

/// Fold accumulator for one resolution call. `step` is the whole per-segment
/// transition; it takes and returns the accumulator by value.
#[derive(Debug, Clone)]
struct Walk {
    schema: Schema,
    parent: Option<Value>,
    value: Option<Value>,
    from: Vec<Ancestor>,
    last: Option<String>,
    last_rendered: Option<String>,
}

impl Walk {
    fn start(schema: Schema, value: Option<Value>) -> Self {
        Walk {
            schema,
            parent: None,
            value,
            from: Vec::new(),
            last: None,
            last_rendered: None,
        }
    }

    fn step(mut self, seg: &Segment, path: &str, context: Option<&Value>) -> Result<Self, ReachError> {
        // Collapse conditionals before inspecting the shape.
        let mut schema = self.schema.resolve(&ResolveContext {
            context,
            parent: self.parent.as_ref(),
            value: self.value.as_ref(),
            from: &self.from,
        });

        // Array/tuple refinement. For a non-index segment this is the
        // implicit hop: the key lookup below still runs in this same
        // iteration, against the refined element schema.
        schema = match schema {
            Schema::Tuple { elems } => {
                if !seg.is_index {
                    let at = self.last_rendered.clone().unwrap_or_default();
                    return Err(ReachError::TupleIndexRequired { at });
                }
                let idx = parse_index(seg, path)?;
                self.check_bounds(seg, idx, path)?;
                self.descend_index(idx);
                elems
                    .into_iter()
                    .nth(idx)
                    .ok_or_else(|| ReachError::IndexOutOfRange {
                        segment: seg.render(),
                        path: path.to_string(),
                    })?
            }
            Schema::Array { item } => {
                let idx = if seg.is_index { parse_index(seg, path)? } else { 0 };
                self.check_bounds(seg, idx, path)?;
                self.descend_index(idx);
                *item
            }
            other => other,
        };

        // Key lookup, unless the segment was the index itself.
        if !seg.is_index {
            let key = seg.name();
            let child = match &schema {
                Schema::Object { fields } => fields.get(key).cloned(),
                _ => None,
            };
            let Some(child) = child else {
                return Err(ReachError::UnknownField {
                    segment: seg.render(),
                    path: path.to_string(),
                    kind: schema.kind(),
                });
            };
            let parent = self.value.take();
            self.from.insert(0, Ancestor { schema, value: parent.clone() });
            self.value = parent.as_ref().and_then(|v| v.get(key)).cloned();
            self.parent = parent;
            schema = child;
        }

        self.schema = schema;
        self.last = Some(seg.name().to_string());
        self.last_rendered = Some(seg.render());
        Ok(self)
    }

    /// Bounds are only checkable when the concrete value has a length
    /// (array or string); without one the element schema is still reachable.
    fn check_bounds(&self, seg: &Segment, idx: usize, path: &str) -> Result<(), ReachError> {
        let len = match self.value.as_ref() {
            Some(Value::Array(items)) => Some(items.len()),
            Some(Value::String(s)) => Some(s.chars().count()),
            _ => None,
        };
        if let Some(len) = len {
            if idx >= len {
                return Err(ReachError::IndexOutOfRange {
                    segment: seg.render(),
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }

    /// In-place index descent. Pushes no ancestry entry: the container's own
    /// entry is the relevant enclosing context, not a synthetic per-index one.
    /// Indexing a string value yields the character at that position.
    fn descend_index(&mut self, idx: usize) {
        let parent = self.value.take();
        self.value = match parent.as_ref() {
            Some(Value::Array(items)) => items.get(idx).cloned(),
            Some(Value::String(s)) => {
                s.chars().nth(idx).map(|c| Value::String(c.to_string()))
            }
            _ => None,
        };
        self.parent = parent;
    }

    fn finish(self) -> Located {
        Located {
            schema: self.schema,
            parent: self.parent,
            parent_path: self.last.unwrap_or_default(),
            from: self.from,
            value: self.value,
        }
    }
}

fn parse_index(seg: &Segment, path: &str) -> Result<usize, ReachError> {
    // All-digit by classification; can still overflow usize, which no value
    // length can satisfy.
    seg.raw.parse::<usize>().map_err(|_| ReachError::IndexOutOfRange {
        segment: seg.render(),
        path: path.to_string(),
    })
}
