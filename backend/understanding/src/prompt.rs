/// Fixed instruction sent alongside every bill image.
///
/// The page-type labels must stay in sync with `PageType::label`.
pub const BILL_PROMPT: &str = r#"Analyze this bill image and extract its line items strictly.

1. Identify the "page_type": choose exactly one of ["Bill Detail", "Final Bill", "Pharmacy"].
2. Extract every line item with its name, rate, quantity and amount.
3. Rules:
   - Do NOT include subtotals, totals, taxes or discounts in the item list.
   - If the quantity is missing, use 1.
4. Return valid JSON only, with no commentary, in exactly this format:
{
    "page_type": "...",
    "items": [
        {"item_name": "...", "item_rate": 0.0, "item_quantity": 1.0, "item_amount": 0.0}
    ]
}
"#;
