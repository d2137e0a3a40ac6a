//! Modelo de líneas de carga (items) del LR
//!
//! Las líneas viajan embebidas en el registro como un documento JSON
//! ordenado. `ItemRows` es el editor de filas: mantiene la numeración
//! contigua 1..N y nunca permite quedarse sin filas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Línea de carga tal como se persiste en la columna `items`
///
/// Se serializa en camelCase, igual que el formulario. Los alias snake_case
/// permiten leer filas guardadas con el formato anterior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(alias = "sequence_no")]
    pub sequence_no: u32,
    pub description: String,
    #[serde(alias = "piece_count")]
    pub piece_count: Option<u32>,
    pub weight: Option<Decimal>,
}

impl LineItem {
    pub fn blank(sequence_no: u32) -> Self {
        Self {
            sequence_no,
            description: String::new(),
            piece_count: None,
            weight: None,
        }
    }
}

/// Total de bultos de una secuencia de líneas (blancos cuentan como 0)
pub fn total_pieces(items: &[LineItem]) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item.piece_count.unwrap_or(0)))
        .sum()
}

/// Celda editable de una fila
#[derive(Debug, Clone, PartialEq)]
pub enum ItemCell {
    Description(String),
    PieceCount(Option<u32>),
    Weight(Option<Decimal>),
}

#[derive(Debug, Error, PartialEq)]
pub enum ItemRowsError {
    #[error("At least one item row is required")]
    LastRow,

    #[error("Item row {0} does not exist")]
    UnknownRow(u64),
}

/// Fila del editor: identidad estable + contenido
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub row_id: u64,
    pub item: LineItem,
}

/// Editor de filas de items
#[derive(Debug, Clone)]
pub struct ItemRows {
    rows: Vec<ItemRow>,
    next_row_id: u64,
}

impl Default for ItemRows {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRows {
    /// Editor nuevo con una fila en blanco
    pub fn new() -> Self {
        Self {
            rows: vec![ItemRow {
                row_id: 1,
                item: LineItem::blank(1),
            }],
            next_row_id: 2,
        }
    }

    /// Cargar líneas existentes (p. ej. al editar un LR). Una lista vacía
    /// produce una fila en blanco.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        if items.is_empty() {
            return Self::new();
        }

        let rows: Vec<ItemRow> = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| ItemRow {
                row_id: idx as u64 + 1,
                item,
            })
            .collect();
        let next_row_id = rows.len() as u64 + 1;

        let mut editor = Self { rows, next_row_id };
        editor.renumber();
        editor
    }

    /// Añadir una fila al final con el siguiente número de secuencia
    pub fn add(&mut self) -> u64 {
        let row_id = self.next_row_id;
        self.next_row_id += 1;
        let sequence_no = self.rows.len() as u32 + 1;
        self.rows.push(ItemRow {
            row_id,
            item: LineItem::blank(sequence_no),
        });
        row_id
    }

    /// Eliminar una fila por identidad; nunca elimina la última
    pub fn remove(&mut self, row_id: u64) -> Result<(), ItemRowsError> {
        let position = self
            .rows
            .iter()
            .position(|row| row.row_id == row_id)
            .ok_or(ItemRowsError::UnknownRow(row_id))?;

        if self.rows.len() == 1 {
            return Err(ItemRowsError::LastRow);
        }

        self.rows.remove(position);
        self.renumber();
        Ok(())
    }

    /// Editar una celda de una fila sin tocar las demás
    pub fn update(&mut self, row_id: u64, cell: ItemCell) -> Result<(), ItemRowsError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.row_id == row_id)
            .ok_or(ItemRowsError::UnknownRow(row_id))?;

        match cell {
            ItemCell::Description(description) => row.item.description = description,
            ItemCell::PieceCount(count) => row.item.piece_count = count,
            ItemCell::Weight(weight) => row.item.weight = weight,
        }
        Ok(())
    }

    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.rows.into_iter().map(|row| row.item).collect()
    }

    fn renumber(&mut self) {
        for (idx, row) in self.rows.iter_mut().enumerate() {
            row.item.sequence_no = idx as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(rows: &ItemRows) -> Vec<u32> {
        rows.rows().iter().map(|row| row.item.sequence_no).collect()
    }

    #[test]
    fn test_new_editor_has_one_blank_row() {
        let rows = ItemRows::new();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].item, LineItem::blank(1));
    }

    #[test]
    fn test_add_and_remove_keep_contiguous_sequence() {
        let mut rows = ItemRows::new();
        let second = rows.add();
        let third = rows.add();
        let fourth = rows.add();
        assert_eq!(sequence(&rows), vec![1, 2, 3, 4]);

        rows.remove(second).unwrap();
        assert_eq!(sequence(&rows), vec![1, 2, 3]);

        rows.remove(fourth).unwrap();
        let fifth = rows.add();
        assert_eq!(sequence(&rows), vec![1, 2, 3]);

        // Las identidades eliminadas no se reutilizan
        assert!(fifth > fourth);
        assert_eq!(rows.remove(second), Err(ItemRowsError::UnknownRow(second)));
        assert!(rows.rows().iter().any(|row| row.row_id == third));
    }

    #[test]
    fn test_remove_refuses_last_row() {
        let mut rows = ItemRows::new();
        let only = rows.rows()[0].row_id;
        assert_eq!(rows.remove(only), Err(ItemRowsError::LastRow));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_update_touches_only_target_row() {
        let mut rows = ItemRows::new();
        let first = rows.rows()[0].row_id;
        let second = rows.add();

        rows.update(second, ItemCell::Description("STEEL COILS".to_string()))
            .unwrap();
        rows.update(second, ItemCell::PieceCount(Some(10))).unwrap();
        rows.update(first, ItemCell::Weight(Some(Decimal::from(5)))).unwrap();

        let items = rows.into_items();
        assert_eq!(items[0].description, "");
        assert_eq!(items[0].weight, Some(Decimal::from(5)));
        assert_eq!(items[1].description, "STEEL COILS");
        assert_eq!(items[1].piece_count, Some(10));
        assert_eq!(items[1].sequence_no, 2);
    }

    #[test]
    fn test_from_items_renumbers() {
        let items = vec![
            LineItem { sequence_no: 7, ..LineItem::blank(0) },
            LineItem { sequence_no: 3, ..LineItem::blank(0) },
        ];
        let rows = ItemRows::from_items(items);
        assert_eq!(sequence(&rows), vec![1, 2]);
        assert_eq!(ItemRows::from_items(Vec::new()).len(), 1);
    }

    #[test]
    fn test_total_pieces_ignores_blanks() {
        let items = vec![
            LineItem { piece_count: Some(10), ..LineItem::blank(1) },
            LineItem::blank(2),
            LineItem { piece_count: Some(5), ..LineItem::blank(3) },
        ];
        assert_eq!(total_pieces(&items), 15);
    }

    #[test]
    fn test_items_json_round_trip_keeps_order() {
        let items = vec![
            LineItem {
                sequence_no: 1,
                description: "STEEL COILS".to_string(),
                piece_count: Some(10),
                weight: Some(Decimal::from(100)),
            },
            LineItem {
                sequence_no: 2,
                description: "PIPES".to_string(),
                piece_count: None,
                weight: Some(Decimal::new(255, 1)),
            },
        ];
        let json = serde_json::to_value(&items).unwrap();
        let back: Vec<LineItem> = serde_json::from_value(json).unwrap();
        assert_eq!(back, items);
    }
}
