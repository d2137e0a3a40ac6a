//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del Lorry Receipt que mapean
//! al schema PostgreSQL.

pub mod line_item;
pub mod lorry_receipt;

pub use line_item::{total_pieces, ItemCell, ItemRow, ItemRows, ItemRowsError, LineItem};
pub use lorry_receipt::{
    format_display_date, pdf_file_name, LrDetails, LrRecord, LrType, Party, TemplateDesign,
};

#[cfg(test)]
pub(crate) mod fixtures;
