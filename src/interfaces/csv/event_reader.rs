use crate::domain::location::Coordinates;
use crate::domain::menu::MenuItemId;
use crate::domain::order::OrderId;
use crate::error::{Result, StorefrontError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Add,
    Quantity,
    Remove,
    ToggleNote,
    Note,
    Name,
    Phone,
    Date,
    Time,
    Address,
    Pin,
    Lookup,
    Submit,
    Advance,
}

/// One row of an event script, as written.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EventRecord {
    pub action: EventKind,
    pub id: Option<u64>,
    pub value: Option<i64>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Date,
    Time,
    Address,
}

/// A customer or staff action replayed against the storefront.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Add(MenuItemId),
    Quantity { id: MenuItemId, delta: i64 },
    Remove(MenuItemId),
    ToggleNote(MenuItemId),
    Note { id: MenuItemId, text: String },
    Fill { field: FormField, text: String },
    Pin(Coordinates),
    Lookup(String),
    Submit,
    Advance(OrderId),
}

impl TryFrom<EventRecord> for Event {
    type Error = StorefrontError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let action = record.action;
        let id = || {
            record
                .id
                .ok_or_else(|| StorefrontError::InvalidEvent(format!("{action:?} needs an id")))
        };
        let item = || {
            MenuItemId::try_from(id()?).map_err(|_| {
                StorefrontError::InvalidEvent(format!("{action:?} id is not a menu item"))
            })
        };
        let text = || record.text.clone().unwrap_or_default();
        let fill = |field| Event::Fill {
            field,
            text: text(),
        };

        Ok(match action {
            EventKind::Add => Event::Add(item()?),
            EventKind::Quantity => Event::Quantity {
                id: item()?,
                delta: record.value.ok_or_else(|| {
                    StorefrontError::InvalidEvent("Quantity needs a value".to_string())
                })?,
            },
            EventKind::Remove => Event::Remove(item()?),
            EventKind::ToggleNote => Event::ToggleNote(item()?),
            EventKind::Note => Event::Note {
                id: item()?,
                text: text(),
            },
            EventKind::Name => fill(FormField::Name),
            EventKind::Phone => fill(FormField::Phone),
            EventKind::Date => fill(FormField::Date),
            EventKind::Time => fill(FormField::Time),
            EventKind::Address => fill(FormField::Address),
            EventKind::Pin => Event::Pin(
                text()
                    .parse()
                    .map_err(|e| StorefrontError::InvalidEvent(format!("Pin: {e}")))?,
            ),
            EventKind::Lookup => Event::Lookup(text()),
            EventKind::Submit => Event::Submit,
            EventKind::Advance => Event::Advance(id()?),
        })
    }
}

/// Reads events from a CSV script with the header `action,id,value,text`.
///
/// Trailing columns may be omitted, so `submit` alone is a valid row.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and converts events. A bad row yields an error and the
    /// following rows are still read.
    pub fn events(self) -> impl Iterator<Item = Result<Event>> {
        self.reader
            .into_deserialize::<EventRecord>()
            .map(|result| result.map_err(StorefrontError::from).and_then(Event::try_from))
    }
}
