use crate::application::checkout::{Checkout, CheckoutForm};
use crate::application::location::LocationPicker;
use crate::domain::cart::{Cart, CartLine};
use crate::domain::location::Coordinates;
use crate::domain::menu::{Catalog, MenuItemId};
use crate::domain::money::Money;
use crate::domain::notice::Notice;
use crate::domain::order::OrderId;
use crate::domain::ports::NotifierBox;
use crate::error::{Result, StorefrontError};
use tracing::debug;

/// One customer's browsing session: the menu, their cart and the order form.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    form: CheckoutForm,
    checkout: Checkout,
    location: LocationPicker,
    notifier: NotifierBox,
}

impl Storefront {
    pub fn new(
        catalog: Catalog,
        checkout: Checkout,
        location: LocationPicker,
        notifier: NotifierBox,
    ) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            form: CheckoutForm::new(),
            checkout,
            location,
            notifier,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Adds one unit of a menu item and confirms it to the customer.
    pub fn add_to_cart(&mut self, id: MenuItemId) -> Result<&CartLine> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::Validation(format!("Unknown menu item {id}")))?;
        self.notifier.notify(&Notice::ItemAdded {
            name: item.name.clone(),
        });
        let line = self.cart.add_item(item);
        debug!(item = id, quantity = line.quantity, "Added to cart");
        Ok(line)
    }

    pub fn set_quantity(&mut self, id: MenuItemId, delta: i64) -> Option<u32> {
        self.cart.set_quantity(id, delta)
    }

    pub fn remove_item(&mut self, id: MenuItemId) -> Option<CartLine> {
        self.cart.remove_item(id)
    }

    pub fn toggle_notes(&mut self, id: MenuItemId) -> Option<bool> {
        self.cart.toggle_notes(id)
    }

    pub fn set_note(&mut self, id: MenuItemId, text: impl Into<String>) -> bool {
        self.cart.set_note(id, text)
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(&self.cart)
    }

    pub async fn submit(&mut self) -> Result<OrderId> {
        self.checkout.submit(&mut self.cart, &mut self.form).await
    }

    pub async fn restore_location(&mut self) -> Result<Option<Coordinates>> {
        self.location.restore(&mut self.form).await
    }

    pub async fn pin_location(&mut self, coords: Coordinates) -> Result<()> {
        self.location.pin(&mut self.form, coords).await
    }

    pub async fn lookup_address(&mut self, address: &str) -> Result<Coordinates> {
        self.location.lookup(&mut self.form, address).await
    }
}
