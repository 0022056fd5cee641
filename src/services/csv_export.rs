// src/services/csv_export.rs

use rust_decimal::Decimal;

use crate::models::product::Product;

pub const EXPORT_FILENAME: &str = "inventory_report.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

const HEADER: [&str; 6] = ["Name", "Category", "Quantity", "Price", "SKU", "Threshold"];
const LINE_END: &str = "\r\n";

/// Monta o CSV do inventário inteiro (sem filtro de estoque baixo).
pub fn render_inventory_csv(products: &[Product]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|h| h.to_string()));

    for p in products {
        push_row(
            &mut out,
            [
                p.name.clone(),
                p.category.clone(),
                p.quantity.to_string(),
                format_price(p.price),
                p.sku.clone(),
                p.threshold.to_string(),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let row: Vec<String> = fields.into_iter().map(|f| csv_escape(&f)).collect();
    out.push_str(&row.join(","));
    out.push_str(LINE_END);
}

/// Aspas só quando o campo tem vírgula, aspas ou quebra de linha.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// 2.50 -> "2.5", 9.99 -> "9.99", 10.00 -> "10.0"
fn format_price(price: Decimal) -> String {
    let text = price.normalize().to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stock_status::tests::product;

    fn priced(
        name: &str,
        category: &str,
        quantity: i32,
        price: Decimal,
        sku: &str,
        threshold: i32,
    ) -> Product {
        let mut p = product(0, name, quantity, threshold);
        p.category = category.to_string();
        p.price = price;
        p.sku = sku.to_string();
        p
    }

    #[test]
    fn exports_every_product_regardless_of_stock() {
        let products = vec![
            priced("Widget", "Hardware", 5, Decimal::new(250, 2), "SKU1", 10),
            priced("Gadget", "Electronics", 20, Decimal::new(999, 2), "SKU2", 5),
        ];

        let csv = render_inventory_csv(&products);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Name,Category,Quantity,Price,SKU,Threshold",
                "Widget,Hardware,5,2.5,SKU1,10",
                "Gadget,Electronics,20,9.99,SKU2,5",
            ]
        );
        assert!(csv.ends_with("\r\n"));
    }

    #[test]
    fn empty_inventory_is_just_the_header() {
        assert_eq!(
            render_inventory_csv(&[]),
            "Name,Category,Quantity,Price,SKU,Threshold\r\n"
        );
    }

    #[test]
    fn quotes_fields_with_commas_and_quotes() {
        let products = vec![priced(
            "Bolt, 10mm",
            "The \"good\" stuff",
            -2,
            Decimal::new(5, 1),
            "B-10",
            0,
        )];

        let csv = render_inventory_csv(&products);
        let row = csv.lines().nth(1).unwrap();

        assert_eq!(row, "\"Bolt, 10mm\",\"The \"\"good\"\" stuff\",-2,0.5,B-10,0");
    }

    #[test]
    fn whole_prices_keep_one_decimal_place() {
        assert_eq!(format_price(Decimal::new(1000, 2)), "10.0");
        assert_eq!(format_price(Decimal::ZERO), "0.0");
        assert_eq!(format_price(Decimal::new(1999, 2)), "19.99");
    }
}
