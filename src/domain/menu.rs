use crate::domain::money::Money;
use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type MenuItemId = u32;

/// A dish or drink offered by the storefront.
///
/// Items come from the [`Catalog`]; customers never create them. The serialized
/// form uses camelCase keys because it is embedded in persisted order records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub image_url: String,
}

impl MenuItem {
    /// Creates a menu item, rejecting a zero price.
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
        ingredients: &[&str],
        image_url: impl Into<String>,
    ) -> Result<Self> {
        if price.is_zero() {
            return Err(StorefrontError::Validation(format!(
                "Menu item {id} must have a positive price"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            image_url: image_url.into(),
        })
    }
}

/// The fixed list of items on sale, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(items: Vec<MenuItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(StorefrontError::Validation(format!(
                    "Duplicate menu item id {}",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }

    /// The menu the storefront ships with.
    pub fn house_menu() -> Result<Self> {
        Self::new(vec![
            MenuItem::new(
                1,
                "Hamburguesa Clásica",
                Money::new(10_000),
                "Deliciosa hamburguesa con carne jugosa, queso cheddar, lechuga fresca y tomate.",
                &["Carne", "Queso cheddar", "Lechuga", "Tomate", "Pan"],
                "https://images.unsplash.com/photo-1607013251379-e6eecfffe234",
            )?,
            MenuItem::new(
                2,
                "Hamburguesa BBQ",
                Money::new(12_500),
                "Jugosa hamburguesa con queso derretido, cebolla caramelizada y salsa BBQ.",
                &["Carne", "Queso", "Cebolla caramelizada", "Salsa BBQ", "Pan"],
                "https://images.unsplash.com/photo-1728776448564-761583fc8bfb",
            )?,
            MenuItem::new(
                3,
                "Hamburguesa con huevo y aguacate",
                Money::new(10_000),
                "Hamburguesa con huevo frito, aguacate cremoso y queso fundido.",
                &["Carne", "Huevo", "Aguacate", "Queso", "Pan"],
                "https://images.unsplash.com/photo-1609796632543-65cdda96651c",
            )?,
            MenuItem::new(
                4,
                "Maracumango",
                Money::new(6_000),
                "Refrescante bebida de mango y maracuyá, perfecta para el calor.",
                &["Mango", "Maracuyá", "Azúcar", "Hielo", "Agua o soda"],
                "https://images.unsplash.com/photo-1574891548685-3e13f565419a",
            )?,
            MenuItem::new(
                5,
                "Fresa con leche",
                Money::new(7_000),
                "Bebida cremosa de fresa natural con leche y un toque dulce.",
                &["Fresas", "Leche", "Azúcar", "Hielo"],
                "https://images.unsplash.com/photo-1611928237590-087afc90c6fd",
            )?,
        ])
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}
