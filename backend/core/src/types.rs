//! Wire types for the `/extract-bill-data` contract.
//!
//! Field declaration order matches the JSON layout callers expect.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Inbound request: a single image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRequest {
    /// URL of the bill image.
    pub document: String,
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// Closed classification of a bill page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageType {
    #[default]
    #[serde(rename = "Bill Detail")]
    BillDetail,
    #[serde(rename = "Final Bill")]
    FinalBill,
    #[serde(rename = "Pharmacy")]
    Pharmacy,
}

impl PageType {
    pub const ALL: [PageType; 3] = [PageType::BillDetail, PageType::FinalBill, PageType::Pharmacy];

    /// The label as it appears on the wire and in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BillDetail => "Bill Detail",
            Self::FinalBill => "Final Bill",
            Self::Pharmacy => "Pharmacy",
        }
    }

    /// Match a model-supplied label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One purchased line on a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    pub item_name: String,
    pub item_amount: f64,
    pub item_rate: f64,
    pub item_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    pub page_no: String,
    pub page_type: PageType,
    pub bill_items: Vec<BillItem>,
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Token accounting reported by the model for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub total_tokens: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Build usage from input/output counts, deriving the total when the
    /// provider does not report one.
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: Option<u64>) -> Self {
        Self {
            total_tokens: total_tokens.unwrap_or_else(|| input_tokens.saturating_add(output_tokens)),
            input_tokens,
            output_tokens,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBlock {
    pub pagewise_line_items: Vec<PageItem>,
    pub total_item_count: usize,
}

/// Response body of `POST /extract-bill-data`, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResponse {
    pub is_success: bool,
    pub token_usage: TokenUsage,
    pub data: DataBlock,
}

impl FinalResponse {
    /// Uniform failure envelope: zero usage, no pages.
    pub fn failure() -> Self {
        Self {
            is_success: false,
            token_usage: TokenUsage::default(),
            data: DataBlock::default(),
        }
    }

    /// Success envelope holding exactly one page numbered "1".
    pub fn single_page(page_type: PageType, bill_items: Vec<BillItem>, token_usage: TokenUsage) -> Self {
        let total_item_count = bill_items.len();
        Self {
            is_success: true,
            token_usage,
            data: DataBlock {
                pagewise_line_items: vec![PageItem {
                    page_no: "1".to_string(),
                    page_type,
                    bill_items,
                }],
                total_item_count,
            },
        }
    }

    /// All line items across pages, in order.
    pub fn items(&self) -> impl Iterator<Item = &BillItem> {
        self.data
            .pagewise_line_items
            .iter()
            .flat_map(|page| page.bill_items.iter())
    }

    /// Sum of `item_amount` over every line item.
    pub fn reconciled_amount(&self) -> f64 {
        self.items().map(|item| item.item_amount).sum()
    }
}
