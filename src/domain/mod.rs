//! Storefront domain: menu, cart, orders and their fulfillment status.
//!
//! Everything here is plain owned data. Talking to the order store, local
//! storage, the geocoder or the notification channel goes through [`ports`].

pub mod cart;
pub mod location;
pub mod menu;
pub mod money;
pub mod notice;
pub mod order;
pub mod ports;
pub mod status;
