use crate::domain::menu::{MenuItem, MenuItemId};
use crate::domain::money::Money;
use serde::{Deserialize, Serialize};

/// One menu item in the cart, copied by value, with its quantity and note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub show_notes: bool,
}

impl CartLine {
    fn new(item: &MenuItem) -> Self {
        Self {
            item: item.clone(),
            quantity: 1,
            notes: String::new(),
            show_notes: false,
        }
    }

    pub fn id(&self) -> MenuItemId {
        self.item.id
    }

    pub fn line_total(&self) -> Money {
        self.item.price * self.quantity
    }
}

/// The customer's in-progress selection, in the order items were first added.
///
/// Holds at most one line per menu item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, appending a new line the first time it is seen.
    pub fn add_item(&mut self, item: &MenuItem) -> &CartLine {
        let index = match self.position(item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                index
            }
            None => {
                self.lines.push(CartLine::new(item));
                self.lines.len() - 1
            }
        };
        &self.lines[index]
    }

    /// Adjusts a line's quantity by `delta`, never going below 1.
    ///
    /// Returns the new quantity, or `None` if the item is not in the cart.
    pub fn set_quantity(&mut self, id: MenuItemId, delta: i64) -> Option<u32> {
        let line = self.line_mut(id)?;
        let next = (i64::from(line.quantity) + delta).clamp(1, i64::from(u32::MAX));
        line.quantity = next as u32;
        Some(line.quantity)
    }

    pub fn remove_item(&mut self, id: MenuItemId) -> Option<CartLine> {
        let index = self.position(id)?;
        Some(self.lines.remove(index))
    }

    /// Shows or hides the note field. Hiding it discards whatever was typed.
    ///
    /// Returns the new visibility, or `None` if the item is not in the cart.
    pub fn toggle_notes(&mut self, id: MenuItemId) -> Option<bool> {
        let line = self.line_mut(id)?;
        if line.show_notes {
            line.show_notes = false;
            line.notes.clear();
        } else {
            line.show_notes = true;
        }
        Some(line.show_notes)
    }

    /// Replaces a line's note. Ignored unless the note field is visible.
    pub fn set_note(&mut self, id: MenuItemId, text: impl Into<String>) -> bool {
        match self.line_mut(id) {
            Some(line) if line.show_notes => {
                line.notes = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn get(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Copies the current lines. Later cart edits do not reach the copy.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, id: MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == id)
    }

    fn line_mut(&mut self, id: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }
}
