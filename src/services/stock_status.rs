// src/services/stock_status.rs

//! Classificação de estoque baixo.
//!
//! Funções puras sobre um snapshot de produtos: sem I/O, sem estado entre
//! chamadas. Contagem e filtro usam o mesmo predicado
//! ([`Product::is_low_stock`]), então sempre concordam entre si.

use crate::models::product::Product;

/// Quantos produtos estão com `quantity <= threshold`.
pub fn count_low_stock(products: &[Product]) -> usize {
    products.iter().filter(|p| p.is_low_stock()).count()
}

/// Os produtos com estoque baixo, na mesma ordem relativa da entrada.
pub fn filter_low_stock(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_low_stock()).cloned().collect()
}

/// Uma única leitura da tabela de produtos por requisição.
///
/// Dashboard, relatório e exportação derivam tudo daqui, então o contador
/// e a lista nunca divergem por causa de uma escrita concorrente entre duas
/// consultas.
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    products: Vec<Product>,
}

impl InventorySnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn low_stock_count(&self) -> usize {
        count_low_stock(&self.products)
    }

    pub fn low_stock(&self) -> Vec<Product> {
        filter_low_stock(&self.products)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    pub(crate) fn product(id: i64, name: &str, quantity: i32, threshold: i32) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            category: "General".to_string(),
            quantity,
            price: Decimal::new(100, 2),
            sku: format!("SKU{id}"),
            threshold,
            created_at: now,
            updated_at: now,
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_inventory_has_no_low_stock() {
        assert_eq!(count_low_stock(&[]), 0);
        assert!(filter_low_stock(&[]).is_empty());
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let at = product(1, "at", 10, 10);
        let above = product(2, "above", 11, 10);
        assert!(at.is_low_stock());
        assert!(!above.is_low_stock());
        assert_eq!(count_low_stock(&[at, above]), 1);
    }

    #[test]
    fn zero_quantity_with_zero_threshold_is_low() {
        assert_eq!(count_low_stock(&[product(1, "zero", 0, 0)]), 1);
    }

    #[test]
    fn negative_quantity_is_not_special_cased() {
        let products = vec![product(1, "owed", -3, 0), product(2, "deep", -3, -5)];
        assert_eq!(names(&filter_low_stock(&products)), vec!["owed"]);
    }

    #[test]
    fn filter_keeps_input_order() {
        let products = vec![
            product(7, "c", 1, 5),
            product(3, "ok", 9, 5),
            product(1, "a", 0, 5),
            product(5, "b", 5, 5),
        ];
        assert_eq!(names(&filter_low_stock(&products)), vec!["c", "a", "b"]);
    }

    #[test]
    fn count_agrees_with_filter() {
        let products: Vec<Product> = (0..40)
            .map(|i| product(i, &format!("p{i}"), (i as i32 * 7) % 13 - 3, (i as i32 * 5) % 11))
            .collect();
        assert_eq!(count_low_stock(&products), filter_low_stock(&products).len());
    }

    #[test]
    fn report_scenario_only_lists_products_at_risk() {
        let widget = product(1, "Widget", 5, 10);
        let gadget = product(2, "Gadget", 20, 5);
        let snapshot = InventorySnapshot::new(vec![widget, gadget]);

        assert_eq!(names(&snapshot.low_stock()), vec!["Widget"]);
        assert_eq!(snapshot.low_stock_count(), 1);
        assert_eq!(snapshot.products().len(), 2);
    }
}
