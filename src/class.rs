//! Vestigial. Nothing in the grammar produces a class declaration and
//! nothing in the resolver or interpreter constructs a `Class`; it is kept
//! around, unwired, the way the source it was distilled from keeps its own
//! `LoxClass` stub un-constructed.

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Class {
    pub name: String,
}
