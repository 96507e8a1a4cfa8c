//! momo-extract: body-text rule cascades and record assembly for MoMo SMS
//! backups.

pub mod assemble;
pub mod rules;

pub use assemble::{build_record, parse_backup};
pub use rules::{
    classify_payment_type, classify_status, classify_transaction_type, BodyExtractor,
};
