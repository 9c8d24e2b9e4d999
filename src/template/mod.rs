//! Tables and the per-column directive grammar.

pub mod directive;
pub mod table;

pub use directive::{Directive, Template};
pub use table::{Column, Row, Table, TableLayout};
