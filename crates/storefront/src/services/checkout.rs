//! Checkout service.
//!
//! Validates the order before handing it to the checkout transaction in
//! [`crate::db::orders`].

use sqlx::PgPool;
use thiserror::Error;

use minimart_core::{Cart, Email, Money, UserId};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::TransactionRecord;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing in the cart to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// Repository/database error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order for the shopper's current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart, or forwards
    /// the repository error (`InsufficientFunds`, `OutOfStock`, ...) from
    /// the checkout transaction.
    pub async fn place_order(
        &self,
        user_id: UserId,
        email: &Email,
        cart: &Cart,
    ) -> Result<TransactionRecord, CheckoutError> {
        order_total(cart)?;
        let record = self.orders.place(user_id, email, cart).await?;
        Ok(record)
    }
}

/// Total an order, rejecting empty carts.
fn order_total(cart: &Cart) -> Result<Money, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(cart.total())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimart_core::{CartLine, ProductId};

    use super::*;

    fn cart_with(lines: &[(&str, &str, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (i, (name, price, qty)) in lines.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            cart.merge(CartLine {
                product_id: ProductId::new(i as i32 + 1),
                name: (*name).to_string(),
                unit_price: Money::parse(price).unwrap(),
                quantity: *qty,
            });
        }
        cart
    }

    #[test]
    fn test_order_total_rejects_empty_cart() {
        assert!(matches!(
            order_total(&Cart::new()),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_order_total_sums_lines() {
        let cart = cart_with(&[("Apple", "2.50", 2), ("Milk", "1.80", 1)]);
        assert_eq!(order_total(&cart).unwrap(), Money::parse("6.80").unwrap());
    }

    #[test]
    fn test_wallet_covers_order() {
        // A ten dollar wallet covers an eight dollar order with two left.
        let cart = cart_with(&[("Notebook", "4.00", 2)]);
        let total = order_total(&cart).unwrap();
        let wallet = Money::parse("10.00").unwrap();
        assert_eq!(wallet.checked_sub(total), Some(Money::parse("2.00").unwrap()));
    }

    #[test]
    fn test_wallet_cannot_cover_order() {
        let cart = cart_with(&[("Notebook", "4.00", 2)]);
        let total = order_total(&cart).unwrap();
        let wallet = Money::parse("5.00").unwrap();
        assert_eq!(wallet.checked_sub(total), None);
    }
}
