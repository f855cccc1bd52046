use rust_decimal::Decimal;

/// Custom actions for Product entities.
///
/// These are the stock ledger operations; they run inside the product actor
/// so the check and the write of each one happen together.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes units out of stock and reports the unit price at that moment.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Puts units back into stock.
    Restock(u32),
    /// Changes the catalog price. Orders already placed keep their snapshot.
    SetPrice(Decimal),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reserved { unit_price: Decimal, remaining: u32 },
    Restocked(u32),
    PriceSet(Decimal),
}
