//! Output rendering for finished report tables.
//!
//! # Submodules
//!
//! - [`excel`]: Writes the styled `.xlsx` artifact (the report proper)
//! - [`console`]: Renders the table for standard output, as aligned text
//!   or JSON
//!
//! Both renderers bind to the same column order: the eight canonical
//! fields, then `report_date`, then the `type` tag when the combined
//! pipeline produced one.

pub mod console;
pub mod excel;
