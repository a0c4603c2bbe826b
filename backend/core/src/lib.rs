pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;

pub use error::ExtractError;
pub use normalize::{normalize_reply, LooseScalar, NormalizedBill, RawBillItem, RawBillReply};
pub use traits::{InlineImage, ModelReply, VisionModel};
pub use types::{BillItem, BillRequest, DataBlock, FinalResponse, PageItem, PageType, TokenUsage};
