// Inventory manager built the way an application would consume the crate:
// a HashTable of products keyed by id, driven through set/get/get_mut/
// remove/values only.
use chained_collections::{HashTable, RemovalMode, TableConfig};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
enum InventoryError {
    #[error("invalid product id {0:?}")]
    InvalidKey(String),
    #[error("stock must be greater than 0")]
    Validation,
    #[error("product {0:?} is out of stock")]
    OutOfStock(String),
    #[error("insufficient stock for {id:?}: {available} < {requested}")]
    Insufficient {
        id: String,
        available: u32,
        requested: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Product {
    id: String,
    stock: u32,
}

struct Inventory {
    table: HashTable<Product>,
    size: usize,
}

impl Inventory {
    fn new() -> Self {
        // Products must stay reachable when a neighbour is removed.
        Self {
            table: HashTable::with_config(TableConfig {
                removal: RemovalMode::Entry,
                ..TableConfig::default()
            }),
            size: 0,
        }
    }

    fn all_products(&self) -> Vec<&Product> {
        self.table.values()
    }

    fn add_product(&mut self, id: &str, stock: u32) -> Result<(), InventoryError> {
        if stock == 0 {
            return Err(InventoryError::Validation);
        }
        if self.table.get(id).is_some() {
            self.add_stock(id, stock)?;
            return Ok(());
        }
        self.table.set(
            id,
            Product {
                id: id.to_owned(),
                stock,
            },
        );
        self.size += 1;
        Ok(())
    }

    fn remove_product(&mut self, id: &str) -> Option<Product> {
        let product = self.table.remove(id)?;
        self.size -= 1;
        Some(product)
    }

    fn add_stock(&mut self, id: &str, quantity: u32) -> Result<bool, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::Validation);
        }
        match self.table.get_mut(id) {
            Some(product) => {
                product.stock += quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_stock(&mut self, id: &str, quantity: u32) -> Result<(), InventoryError> {
        let product = self
            .table
            .get_mut(id)
            .ok_or_else(|| InventoryError::InvalidKey(id.to_owned()))?;
        product.stock = quantity;
        Ok(())
    }

    fn buy_product(&mut self, id: &str, quantity: u32) -> Result<(), InventoryError> {
        let available = self.stock(id);
        if available == 0 {
            return Err(InventoryError::OutOfStock(id.to_owned()));
        }
        if available < quantity {
            return Err(InventoryError::Insufficient {
                id: id.to_owned(),
                available,
                requested: quantity,
            });
        }
        let product = self
            .table
            .get_mut(id)
            .ok_or_else(|| InventoryError::InvalidKey(id.to_owned()))?;
        product.stock -= quantity;
        Ok(())
    }

    fn stock(&self, id: &str) -> u32 {
        self.table.get(id).map_or(0, |p| p.stock)
    }
}

#[test]
fn add_buy_and_restock() {
    let mut inv = Inventory::new();
    inv.add_product("apple", 10).unwrap();
    inv.add_product("pear", 3).unwrap();
    inv.add_product("apple", 5).unwrap();
    assert_eq!(inv.size, 2);
    assert_eq!(inv.stock("apple"), 15);

    inv.buy_product("apple", 15).unwrap();
    assert_eq!(inv.stock("apple"), 0);
    assert_eq!(
        inv.buy_product("apple", 1),
        Err(InventoryError::OutOfStock("apple".into()))
    );
    assert_eq!(
        inv.buy_product("pear", 4),
        Err(InventoryError::Insufficient {
            id: "pear".into(),
            available: 3,
            requested: 4
        })
    );
    assert_eq!(inv.add_stock("apple", 2), Ok(true));
    assert_eq!(inv.add_stock("kiwi", 2), Ok(false));
    assert_eq!(inv.stock("apple"), 2);
}

#[test]
fn validation_and_missing_keys() {
    let mut inv = Inventory::new();
    assert_eq!(inv.add_product("x", 0), Err(InventoryError::Validation));
    assert_eq!(inv.size, 0);
    assert_eq!(
        inv.set_stock("ghost", 4),
        Err(InventoryError::InvalidKey("ghost".into()))
    );
    assert_eq!(inv.stock("ghost"), 0);
    assert!(inv.remove_product("ghost").is_none());
    assert_eq!(
        InventoryError::Validation.to_string(),
        "stock must be greater than 0"
    );
}

#[test]
fn listing_and_removal() {
    let mut inv = Inventory::new();
    for (i, id) in ["a", "t", "hello", "abc"].iter().enumerate() {
        inv.add_product(id, i as u32 + 1).unwrap();
    }
    inv.set_stock("hello", 42).unwrap();
    let mut listed: Vec<(String, u32)> = inv
        .all_products()
        .into_iter()
        .map(|p| (p.id.clone(), p.stock))
        .collect();
    listed.sort();
    assert_eq!(
        listed,
        vec![
            ("a".into(), 1),
            ("abc".into(), 4),
            ("hello".into(), 42),
            ("t".into(), 2)
        ]
    );

    // "a" and "t" share a bucket; entry removal keeps "t".
    let removed = inv.remove_product("a").unwrap();
    assert_eq!(removed.stock, 1);
    assert_eq!(inv.stock("t"), 2);
    assert_eq!(inv.size, 3);
    assert_eq!(inv.all_products().len(), 3);
}
