//! Registry of annotations created through the channel.

use std::collections::HashMap;
use std::fmt;

use mapconv::options::{
    interpret_circle_options, interpret_line_options, interpret_symbol_options, CircleOptions, LineOptions,
    SymbolOptions,
};
use serde_json::Value;

/// Kind of map annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Icon and/or text label at a point.
    Symbol,
    /// Polyline.
    Line,
    /// Circle around a point.
    Circle,
}

impl AnnotationKind {
    /// Name used in method names and as the id argument key, e.g. `symbol#add` and `{"symbol": id}`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Line => "line",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of a registered annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Annotation<'a> {
    /// Symbol style and position.
    Symbol(&'a SymbolOptions),
    /// Line style and path.
    Line(&'a LineOptions),
    /// Circle style and position.
    Circle(&'a CircleOptions),
}

/// Stored annotation options that can be built and patched from option payloads.
pub trait AnnotationOptions: Default {
    /// Kind of the annotation.
    const KIND: AnnotationKind;

    /// Overwrites the stored values with the recognized keys of the payload.
    fn patch(&mut self, options: &Value);

    /// Borrowed view for the host.
    fn as_annotation(&self) -> Annotation<'_>;
}

impl AnnotationOptions for SymbolOptions {
    const KIND: AnnotationKind = AnnotationKind::Symbol;

    fn patch(&mut self, options: &Value) {
        interpret_symbol_options(options, self);
    }

    fn as_annotation(&self) -> Annotation<'_> {
        Annotation::Symbol(self)
    }
}

impl AnnotationOptions for LineOptions {
    const KIND: AnnotationKind = AnnotationKind::Line;

    fn patch(&mut self, options: &Value) {
        interpret_line_options(options, self);
    }

    fn as_annotation(&self) -> Annotation<'_> {
        Annotation::Line(self)
    }
}

impl AnnotationOptions for CircleOptions {
    const KIND: AnnotationKind = AnnotationKind::Circle;

    fn patch(&mut self, options: &Value) {
        interpret_circle_options(options, self);
    }

    fn as_annotation(&self) -> Annotation<'_> {
        Annotation::Circle(self)
    }
}

/// Annotations of one kind, keyed by generated ids.
#[derive(Debug, Clone)]
pub struct AnnotationRegistry<T> {
    next_id: u64,
    items: HashMap<String, T>,
}

impl<T> Default for AnnotationRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: HashMap::new(),
        }
    }
}

impl<T> AnnotationRegistry<T> {
    /// Stores the annotation and returns its new id. Ids are never reused.
    pub fn insert(&mut self, item: T) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.items.insert(id.clone(), item);
        id
    }

    /// Annotation with the given id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    /// Mutable annotation with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    /// Removes the annotation.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.items.remove(id)
    }

    /// Number of stored annotations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(id, annotation)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }
}
