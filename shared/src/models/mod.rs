//! Domain models for inventory reconciliation

mod line_item;
mod settings;
mod source;
mod valuation;

pub use line_item::*;
pub use settings::*;
pub use source::*;
pub use valuation::*;
