//! Declarative field tree for the figure editor.
//!
//! The generator turns line/marker counts plus saved values into a
//! [`FieldTree`](field::FieldTree); [`FigureForm`](form::FigureForm) drives
//! edit events against it.

pub mod field;
pub mod form;
pub mod generator;
pub(crate) mod ids;
