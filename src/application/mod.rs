//! Application layer: the services that drive the storefront.
//!
//! [`storefront::Storefront`] is the customer session (cart, order form,
//! delivery location) and [`dashboard::StatusTracker`] is the staff view over
//! submitted orders. Both reach the outside world only through the ports in
//! [`crate::domain::ports`].

pub mod checkout;
pub mod dashboard;
pub mod location;
pub mod storefront;
