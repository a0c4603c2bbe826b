//! Pretty-printing of an extraction result.

use billscan_core::FinalResponse;

use crate::terminal_output::{render_table, styled, Column, BOLD, DIM};

const RULE_WIDTH: usize = 44;
const NAME_WIDTH: usize = 28;

/// Render the line items, totals, and token accounting of a successful
/// extraction.
pub fn render_receipt(resp: &FinalResponse, color: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&styled(BOLD, &format!("{:^RULE_WIDTH$}", "RECEIPT EXTRACTOR"), color));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for page in &resp.data.pagewise_line_items {
        out.push_str(&styled(
            DIM,
            &format!("Page {} ({})", page.page_no, page.page_type),
            color,
        ));
        out.push('\n');

        let columns = [
            Column::left("ITEM NAME").max_width(NAME_WIDTH),
            Column::right("QTY"),
            Column::right("RATE"),
            Column::right("AMOUNT"),
        ];
        let rows: Vec<Vec<String>> = page
            .bill_items
            .iter()
            .map(|item| {
                vec![
                    item.item_name.clone(),
                    format!("{}", item.item_quantity),
                    format!("{:.2}", item.item_rate),
                    format!("{:.2}", item.item_amount),
                ]
            })
            .collect();
        out.push_str(&render_table(&columns, &rows, color));
    }

    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("{:<24}{:>20}\n", "TOTAL ITEMS", resp.data.total_item_count));
    out.push_str(&styled(
        BOLD,
        &format!("{:<24}{:>20.2}", "RECONCILED TOTAL", resp.reconciled_amount()),
        color,
    ));
    out.push('\n');
    let usage = &resp.token_usage;
    out.push_str(&styled(
        DIM,
        &format!(
            "tokens: {} in / {} out / {} total",
            usage.input_tokens, usage.output_tokens, usage.total_tokens
        ),
        color,
    ));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscan_core::{BillItem, PageType, TokenUsage};

    fn item(name: &str, qty: f64, rate: f64) -> BillItem {
        BillItem {
            item_name: name.into(),
            item_amount: qty * rate,
            item_rate: rate,
            item_quantity: qty,
        }
    }

    #[test]
    fn renders_every_item_and_total() {
        let resp = FinalResponse::single_page(
            PageType::FinalBill,
            vec![item("Coffee", 2.0, 3.5), item("Bagel", 1.0, 2.25)],
            TokenUsage::new(900, 45, None),
        );
        let text = render_receipt(&resp, false);

        assert!(text.contains("Page 1 (Final Bill)"));
        assert!(text.contains("Coffee"));
        assert!(text.contains("Bagel"));
        assert!(text.contains("7.00"));
        assert!(text.contains("2.25"));
        assert!(text.contains("TOTAL ITEMS"));
        let total_line = text.lines().find(|l| l.starts_with("RECONCILED TOTAL")).unwrap();
        assert!(total_line.ends_with("9.25"));
        assert!(text.contains("tokens: 900 in / 45 out / 945 total"));
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let resp = FinalResponse::single_page(PageType::BillDetail, vec![], TokenUsage::default());
        let text = render_receipt(&resp, false);
        assert!(!text.contains('\x1b'));
        assert!(text.contains("RECEIPT EXTRACTOR"));
    }
}
