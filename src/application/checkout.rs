use crate::domain::cart::Cart;
use crate::domain::notice::Notice;
use crate::domain::order::{NewOrder, OrderId};
use crate::domain::ports::{NotifierBox, OrderRepositoryBox};
use crate::error::{Result, StorefrontError};
use tracing::{info, warn};

/// Shown when any required field is missing. No per-field detail is given.
pub const INCOMPLETE_FORM_MESSAGE: &str = "Please complete all fields";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Also clear address and location after a successful order. Off by
    /// default so a returning customer keeps their delivery spot.
    pub reset_location_on_success: bool,
}

/// Customer and delivery details typed into the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    /// Human-readable delivery address, typed or resolved from the map.
    pub address: String,
    /// Raw `"lat,lng"` of the delivery spot. Optional.
    pub location: String,
    submitting: bool,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Checks that every required field is filled and the cart has items.
    pub fn validate(&self, cart: &Cart) -> Result<()> {
        let required = [&self.name, &self.phone, &self.date, &self.time, &self.address];
        if required.iter().any(|field| field.trim().is_empty()) || cart.is_empty() {
            return Err(StorefrontError::Validation(
                INCOMPLETE_FORM_MESSAGE.to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self, cart: &Cart) -> bool {
        !self.submitting && self.validate(cart).is_ok()
    }

    fn reset_after_submit(&mut self, config: CheckoutConfig) {
        self.name.clear();
        self.phone.clear();
        self.date.clear();
        self.time.clear();
        if config.reset_location_on_success {
            self.address.clear();
            self.location.clear();
        }
    }
}

/// Holds the form's in-flight flag for the duration of one insert. The flag
/// is cleared on drop, so a cancelled submit leaves the form usable.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Turns a filled form and cart into a stored order.
pub struct Checkout {
    orders: OrderRepositoryBox,
    notifier: NotifierBox,
    config: CheckoutConfig,
}

impl Checkout {
    pub fn new(orders: OrderRepositoryBox, notifier: NotifierBox, config: CheckoutConfig) -> Self {
        Self {
            orders,
            notifier,
            config,
        }
    }

    /// Validates, snapshots the cart and inserts the order.
    ///
    /// On success the cart and the personal fields are cleared. On any error
    /// both are left exactly as they were so the customer can retry.
    pub async fn submit(&self, cart: &mut Cart, form: &mut CheckoutForm) -> Result<OrderId> {
        if form.submitting {
            return Err(StorefrontError::SubmissionInFlight);
        }
        if let Err(e) = form.validate(cart) {
            warn!(error = %e, "Order form incomplete");
            self.notifier.notify(&Notice::ValidationFailed {
                message: INCOMPLETE_FORM_MESSAGE.to_string(),
            });
            return Err(e);
        }

        let order = NewOrder {
            name: form.name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            location: form.location.clone(),
            date: form.date.clone(),
            time: form.time.clone(),
            items: cart.snapshot(),
        };
        let total = cart.total();

        let result = {
            let _in_flight = InFlight::start(&mut form.submitting);
            self.orders.insert(order).await
        };

        match result {
            Ok(id) => {
                info!(order_id = id, total = total.value(), lines = cart.len(), "Order submitted");
                self.notifier.notify(&Notice::OrderSubmitted);
                cart.clear();
                form.reset_after_submit(self.config);
                Ok(id)
            }
            Err(e) => {
                let message = match e {
                    StorefrontError::Submission(message) => message,
                    other => other.to_string(),
                };
                warn!(error = %message, "Order store rejected the order");
                self.notifier.notify(&Notice::SubmissionFailed);
                Err(StorefrontError::Submission(message))
            }
        }
    }
}
