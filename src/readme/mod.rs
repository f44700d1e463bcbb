//! README content transformation

pub mod disclaimer;

pub use disclaimer::{
    contains_disclaimer, disclaimer_block, patch_readme, strip_disclaimers, CAUTION_STATEMENT_CN,
    CAUTION_STATEMENT_EN,
};
