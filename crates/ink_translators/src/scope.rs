//! Lexical scopes of names to the types they were declared with.
//!
//! Frames live in a single arena and point at their parent by index, so entering and
//! leaving blocks never moves a frame.

use crate::types::Primitive;
use std::collections::HashMap;

/// The type a name was bound with
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    Primitive(Primitive),
    Record(String),
    Enum(String),
    Annotation { namespace: String, property: String },
    /// Bound without a type that could be inferred
    Unknown,
}

impl TypeTag {
    /// Values of owned types are moved on use, so repeated uses need an explicit clone
    pub fn is_owned(&self) -> bool {
        match self {
            TypeTag::Primitive(primitive) => *primitive == Primitive::String,
            TypeTag::Record(_) | TypeTag::Annotation { .. } => true,
            TypeTag::Enum(_) | TypeTag::Unknown => false,
        }
    }
}

/// Index of a frame in a [`Scope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Frame {
    parent: Option<ScopeId>,
    bindings: HashMap<String, TypeTag>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScopeError {
    #[error("'{0}' is not defined in any enclosing scope")]
    Unresolved(String),
}

/// A chain of frames, innermost last
#[derive(Debug)]
pub struct Scope {
    frames: Vec<Frame>,
    current: ScopeId,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Creates a scope with only the root frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            current: ScopeId(0),
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Enters a new frame whose parent is the current one
    pub fn push(&mut self) -> ScopeId {
        let id = ScopeId(self.frames.len());
        self.frames.push(Frame {
            parent: Some(self.current),
            bindings: HashMap::new(),
        });
        self.current = id;
        id
    }

    /// Leaves the current frame, discarding it. The root frame is never left.
    pub fn pop(&mut self) {
        if let Some(parent) = self.frames[self.current.0].parent {
            self.frames.truncate(self.current.0);
            self.current = parent;
        }
    }

    /// Binds a name in the current frame, shadowing any outer binding
    pub fn define(&mut self, name: impl Into<String>, tag: TypeTag) {
        self.frames[self.current.0]
            .bindings
            .insert(name.into(), tag);
    }

    /// Checks whether a name is bound in this frame or any enclosing one
    pub fn resolve(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Gets the type a name is bound with
    pub fn type_of(&self, name: &str) -> Result<&TypeTag, ScopeError> {
        self.lookup(name)
            .ok_or_else(|| ScopeError::Unresolved(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Option<&TypeTag> {
        let mut frame = Some(self.current);
        while let Some(ScopeId(index)) = frame {
            let Frame { parent, bindings } = &self.frames[index];
            if let Some(tag) = bindings.get(name) {
                return Some(tag);
            }
            frame = *parent;
        }
        None
    }
}
