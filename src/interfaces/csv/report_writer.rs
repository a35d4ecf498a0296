use crate::currency::format_cop;
use crate::domain::cart::CartLine;
use crate::domain::menu::Catalog;
use crate::domain::status::StatusBuckets;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

const REPORT_HEADER: [&str; 9] = [
    "order", "status", "name", "phone", "date", "time", "address", "items", "total",
];

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    order: u64,
    status: &'a str,
    name: &'a str,
    phone: &'a str,
    date: &'a str,
    time: &'a str,
    address: &'a str,
    items: String,
    total: u64,
}

#[derive(Debug, Serialize)]
struct MenuRow<'a> {
    id: u32,
    name: &'a str,
    price: u64,
    label: String,
    ingredients: String,
    description: &'a str,
}

/// Writes the staff dashboard as CSV, one row per order, followed by the
/// collected total.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes pending, then cooking, then delivered orders, and the line
    /// `Total collected: $ N` for the delivered ones.
    pub fn write_dashboard(mut self, buckets: &StatusBuckets<'_>) -> Result<W> {
        self.writer.write_record(REPORT_HEADER)?;
        for (status, order) in buckets.iter() {
            self.writer.serialize(ReportRow {
                order: order.id,
                status: status.as_str(),
                name: &order.name,
                phone: &order.phone,
                date: &order.date,
                time: &order.time,
                address: &order.address,
                items: describe_items(&order.items),
                total: order.total().value(),
            })?;
        }
        self.writer.flush()?;

        let mut sink = self.writer.into_inner().map_err(|e| e.into_error())?;
        writeln!(sink, "Total collected: {}", format_cop(buckets.collected_total()))?;
        Ok(sink)
    }
}

/// Writes the catalog as CSV: `id,name,price,label,ingredients,description`.
pub fn write_menu<W: Write>(sink: W, catalog: &Catalog) -> Result<W> {
    let mut writer = csv::Writer::from_writer(sink);
    for item in catalog.items() {
        writer.serialize(MenuRow {
            id: item.id,
            name: &item.name,
            price: item.price.value(),
            label: format_cop(item.price),
            ingredients: item.ingredients.join("; "),
            description: &item.description,
        })?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

fn describe_items(items: &[CartLine]) -> String {
    items
        .iter()
        .map(|line| {
            if line.notes.is_empty() {
                format!("{}x {}", line.quantity, line.item.name)
            } else {
                format!("{}x {} ({})", line.quantity, line.item.name, line.notes)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
