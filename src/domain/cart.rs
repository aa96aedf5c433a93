use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{OrderLine, Product};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} is not in the cart")]
    NotInCart(Uuid),

    #[error("cart is empty")]
    Empty,

    #[error("at most {MAX_QUANTITY} units of one product per order")]
    QuantityLimit,

    #[error("cart total is too large")]
    TotalOverflow,

    #[error("checkout already in progress")]
    CheckoutPending,
}

pub const MAX_QUANTITY: i32 = 999;

/// What the cart remembers about a product at the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartLine {
    pub product: ProductSnapshot,
    pub quantity: i32,
}

impl CartLine {
    /// `None` when the amount does not fit in an `i64`.
    pub fn subtotal(&self) -> Option<i64> {
        self.product.price.checked_mul(i64::from(self.quantity))
    }
}

/// Lines keep insertion order; at most one line per product.
///
/// While a checkout is pending the lines are frozen: every edit and a second
/// checkout fail with [`CartError::CheckoutPending`] until
/// [`Cart::finish_checkout`] runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    checkout_pending: bool,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: Uuid) -> Option<i32> {
        self.position(product_id).map(|idx| self.lines[idx].quantity)
    }

    pub fn is_checkout_pending(&self) -> bool {
        self.checkout_pending
    }

    /// Adds one unit, inserting the product with quantity 1 when absent.
    /// Returns the new quantity of that line.
    pub fn add(&mut self, product: ProductSnapshot) -> Result<i32, CartError> {
        self.ensure_open()?;
        match self.position(product.id) {
            Some(idx) => self.bump(idx),
            None => {
                self.lines.push(CartLine {
                    product,
                    quantity: 1,
                });
                if let Err(err) = self.total() {
                    self.lines.pop();
                    return Err(err);
                }
                Ok(1)
            }
        }
    }

    pub fn increase(&mut self, product_id: Uuid) -> Result<i32, CartError> {
        self.ensure_open()?;
        let idx = self
            .position(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        self.bump(idx)
    }

    /// Removes one unit; a line that would drop below 1 is removed and `0` is returned.
    pub fn decrease(&mut self, product_id: Uuid) -> Result<i32, CartError> {
        self.ensure_open()?;
        let idx = self
            .position(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        if self.lines[idx].quantity > 1 {
            self.lines[idx].quantity -= 1;
            Ok(self.lines[idx].quantity)
        } else {
            self.lines.remove(idx);
            Ok(0)
        }
    }

    pub fn remove(&mut self, product_id: Uuid) -> Result<(), CartError> {
        self.ensure_open()?;
        let idx = self
            .position(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        self.lines.remove(idx);
        Ok(())
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| i64::from(line.quantity)).sum()
    }

    pub fn total(&self) -> Result<i64, CartError> {
        self.lines.iter().try_fold(0i64, |sum, line| {
            line.subtotal()
                .and_then(|subtotal| sum.checked_add(subtotal))
                .ok_or(CartError::TotalOverflow)
        })
    }

    /// Freezes the lines for an order and locks the cart until
    /// [`Cart::finish_checkout`].
    pub fn begin_checkout(&mut self) -> Result<Vec<OrderLine>, CartError> {
        self.ensure_open()?;
        let lines = self.freeze()?;
        self.checkout_pending = true;
        Ok(lines)
    }

    /// Unlocks the cart. The frozen lines are dropped only when the order was placed.
    pub fn finish_checkout(&mut self, placed: bool) {
        if placed {
            self.lines.clear();
        }
        self.checkout_pending = false;
    }

    /// Deep copy of the lines for an order. The result shares nothing with the cart.
    pub fn freeze(&self) -> Result<Vec<OrderLine>, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(self
            .lines
            .iter()
            .map(|line| OrderLine {
                product_id: Some(line.product.id),
                name: line.product.name.clone(),
                unit_price: line.product.price,
                quantity: line.quantity,
            })
            .collect())
    }

    fn ensure_open(&self) -> Result<(), CartError> {
        if self.checkout_pending {
            return Err(CartError::CheckoutPending);
        }
        Ok(())
    }

    fn bump(&mut self, idx: usize) -> Result<i32, CartError> {
        let line = &mut self.lines[idx];
        if line.quantity >= MAX_QUANTITY {
            return Err(CartError::QuantityLimit);
        }
        line.quantity += 1;
        if let Err(err) = self.total() {
            self.lines[idx].quantity -= 1;
            return Err(err);
        }
        Ok(self.lines[idx].quantity)
    }

    fn position(&self, product_id: Uuid) -> Option<usize> {
        self.lines.iter().position(|line| line.product.id == product_id)
    }
}
