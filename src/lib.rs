//! A small food-ordering storefront.
//!
//! Customers fill a [`domain::cart::Cart`] from the [`domain::menu::Catalog`]
//! and submit it through [`application::checkout::Checkout`]; staff follow the
//! stored orders through Pending, Cooking and Delivered on the
//! [`application::dashboard::StatusTracker`].

pub mod application;
pub mod currency;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
