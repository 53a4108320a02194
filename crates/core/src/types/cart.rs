//! The cart document model.
//!
//! A cart is a list of product/quantity lines embedded in the owning user
//! document (a jsonb column in the store). Lines are merged by product
//! identity. Decoding from the store is lenient: a line whose price or
//! quantity is not numeric is skipped rather than failing the whole cart,
//! and the total is computed over the remaining valid lines only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Money, ProductId};

/// One product/quantity pairing held pending checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at the time the line was added.
    pub name: String,
    /// Unit price at the time the line was added.
    pub unit_price: Money,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// An ordered list of cart lines, merged by product identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Merge a line into the cart: an existing line for the same product
    /// has its quantity incremented, otherwise the line is appended.
    pub fn merge(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Set the quantity of an existing line. A quantity of zero removes
    /// the line. Returns `false` if no line matches the product.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for a product. Returns `false` if no line matches.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::ZERO, |acc, line| acc.add(line.line_total()))
    }

    /// Decode a cart from raw stored JSON values.
    ///
    /// Returns the cart of valid lines plus the number of lines skipped
    /// because their price or quantity was missing or non-numeric. The
    /// caller decides how to surface skipped lines; the total is never
    /// affected by them.
    #[must_use]
    pub fn from_stored(values: &[Value]) -> (Self, usize) {
        let mut cart = Self::new();
        let mut skipped = 0;
        for value in values {
            match decode_line(value) {
                Some(line) => cart.merge(line),
                None => skipped += 1,
            }
        }
        (cart, skipped)
    }

    /// Encode the cart as the JSON array persisted on the user document.
    #[must_use]
    pub fn to_stored(&self) -> Value {
        serde_json::to_value(&self.lines).unwrap_or_else(|_| Value::Array(Vec::new()))
    }
}

/// Decode one stored line, tolerating prices and quantities written as
/// either JSON numbers or strings. Returns `None` for anything that is
/// not a valid line.
fn decode_line(value: &Value) -> Option<CartLine> {
    let obj = value.as_object()?;

    let product_id = obj.get("product_id")?.as_i64()?;
    let product_id = ProductId::new(i32::try_from(product_id).ok()?);

    let name = obj.get("name")?.as_str()?.to_owned();

    let unit_price = match obj.get("unit_price")? {
        Value::String(s) => Money::parse(s).ok()?,
        Value::Number(n) => Money::parse(&n.to_string()).ok()?,
        _ => return None,
    };

    let quantity = match obj.get("quantity")? {
        Value::String(s) => s.trim().parse::<u32>().ok()?,
        Value::Number(n) => u32::try_from(n.as_i64()?).ok()?,
        _ => return None,
    };
    if quantity == 0 {
        return None;
    }

    Some(CartLine {
        product_id,
        name,
        unit_price,
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(id: i32, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("product-{id}"),
            unit_price: Money::parse(price).expect("valid price"),
            quantity,
        }
    }

    #[test]
    fn test_merge_by_product_identity() {
        let mut cart = Cart::new();
        cart.merge(line(1, "2.50", 1));
        cart.merge(line(2, "1.00", 3));
        cart.merge(line(1, "2.50", 2));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_total_sums_line_totals() {
        let mut cart = Cart::new();
        cart.merge(line(1, "4.00", 2));
        cart.merge(line(2, "1.50", 1));
        assert_eq!(cart.total(), Money::parse("9.50").expect("valid"));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert!(Cart::new().total().is_zero());
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let mut cart = Cart::new();
        cart.merge(line(1, "2.00", 5));

        assert!(cart.set_quantity(ProductId::new(1), 2));
        assert_eq!(cart.lines()[0].quantity, 2);

        // Zero quantity removes the line.
        assert!(cart.set_quantity(ProductId::new(1), 0));
        assert!(cart.is_empty());

        assert!(!cart.remove(ProductId::new(1)));
        assert!(!cart.set_quantity(ProductId::new(9), 1));
    }

    #[test]
    fn test_from_stored_skips_invalid_lines() {
        let stored = vec![
            json!({"product_id": 1, "name": "Apple", "unit_price": "2.50", "quantity": 2}),
            json!({"product_id": 2, "name": "Banana", "unit_price": "not-a-price", "quantity": 1}),
            json!({"product_id": 3, "name": "Milk", "unit_price": 1.8, "quantity": "oops"}),
            json!("not even an object"),
        ];

        let (cart, skipped) = Cart::from_stored(&stored);
        assert_eq!(skipped, 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Money::parse("5.00").expect("valid"));
    }

    #[test]
    fn test_from_stored_accepts_numeric_and_string_forms() {
        let stored = vec![
            json!({"product_id": 1, "name": "Pen", "unit_price": 1.0, "quantity": 2}),
            json!({"product_id": 2, "name": "Chips", "unit_price": "2.00", "quantity": "3"}),
        ];

        let (cart, skipped) = Cart::from_stored(&stored);
        assert_eq!(skipped, 0);
        assert_eq!(cart.total(), Money::parse("8.00").expect("valid"));
    }

    #[test]
    fn test_stored_roundtrip() {
        let mut cart = Cart::new();
        cart.merge(line(4, "5.00", 1));

        let stored = cart.to_stored();
        let values = stored.as_array().expect("array").clone();
        let (decoded, skipped) = Cart::from_stored(&values);

        assert_eq!(skipped, 0);
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_zero_quantity_line_is_invalid() {
        let stored = vec![json!({
            "product_id": 1, "name": "Apple", "unit_price": "2.50", "quantity": 0
        })];
        let (cart, skipped) = Cart::from_stored(&stored);
        assert!(cart.is_empty());
        assert_eq!(skipped, 1);
    }
}
