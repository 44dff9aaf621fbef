//! Rule-based building blocks shared by the purchase-order parser.

pub mod header;
pub mod normalize;
pub mod patterns;
pub mod region;
pub mod validator;

pub use header::{HeaderFieldExtractor, HeaderFields};
pub use normalize::{collapse_whitespace, is_footer_line, is_row_terminator, normalize_newlines};
pub use region::{TableRegion, TableRegionLocator};
pub use validator::{CandidateRow, LineItemValidator};
