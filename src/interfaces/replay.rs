use crate::application::dashboard::StatusTracker;
use crate::application::storefront::Storefront;
use crate::error::{Result, StorefrontError};
use crate::interfaces::csv::event_reader::{Event, FormField};
use tracing::debug;

/// Applies one scripted event to the customer session or the staff dashboard.
pub async fn apply(
    event: Event,
    storefront: &mut Storefront,
    tracker: &mut StatusTracker,
) -> Result<()> {
    debug!(?event, "Replaying event");
    match event {
        Event::Add(id) => {
            storefront.add_to_cart(id)?;
        }
        Event::Quantity { id, delta } => {
            storefront.set_quantity(id, delta).ok_or_else(|| not_in_cart(id))?;
        }
        Event::Remove(id) => {
            storefront.remove_item(id).ok_or_else(|| not_in_cart(id))?;
        }
        Event::ToggleNote(id) => {
            storefront.toggle_notes(id).ok_or_else(|| not_in_cart(id))?;
        }
        Event::Note { id, text } => {
            if !storefront.set_note(id, text) {
                return Err(StorefrontError::Validation(format!(
                    "Item {id} has no open note field"
                )));
            }
        }
        Event::Fill { field, text } => {
            let form = storefront.form_mut();
            let slot = match field {
                FormField::Name => &mut form.name,
                FormField::Phone => &mut form.phone,
                FormField::Date => &mut form.date,
                FormField::Time => &mut form.time,
                FormField::Address => &mut form.address,
            };
            *slot = text;
        }
        Event::Pin(coords) => storefront.pin_location(coords).await?,
        Event::Lookup(address) => {
            storefront.lookup_address(&address).await?;
        }
        Event::Submit => {
            storefront.submit().await?;
        }
        Event::Advance(id) => {
            // Staff act on what a fresh dashboard shows
            tracker.load().await?;
            tracker.advance(id)?;
        }
    }
    Ok(())
}

fn not_in_cart(id: u32) -> StorefrontError {
    StorefrontError::Validation(format!("Item {id} is not in the cart"))
}
