//! Record types produced for each message in a MoMo SMS backup.
//!
//! One input message yields exactly one (message, transaction, category)
//! triple, joined by the transaction id. Records are immutable once built;
//! the pipeline is a pure transform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The raw SMS envelope, normalized from backup attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// SMS protocol code (0 when the backup omits it)
    pub protocol: i64,
    /// Originating address, e.g. "M-Money"
    pub address: String,
    pub is_read: bool,
    pub subject: Option<String>,
    /// Full notification text; empty string when the backup omits it, never absent
    pub body: String,
    /// Delivery-protocol status string, carried through verbatim
    pub sms_protocol: Option<String>,
    pub service_center: Option<String>,
    /// Phone-book name; the backup's "(Unknown)" sentinel is normalized to absent
    pub contact_name: Option<String>,
    pub sub_id: Option<i64>,
    pub readable_date: Option<String>,
}

/// The financial side of a message, as far as the rule engine could recover it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Extracted id, or the assembler's timestamp#position fallback; never absent
    pub transaction_id: String,
    pub user_id: Option<i64>,
    pub transaction_date: DateTime<Utc>,
    /// Type-of-address fields, carried through verbatim for downstream use
    pub toa: Option<String>,
    pub sc_toa: Option<String>,
    pub readable_date: Option<String>,
    /// Amount in RWF; absent when no pattern matched
    pub amount: Option<f64>,
    pub status: TransactionStatus,
    pub service_center_number: Option<String>,
    /// Counterparty named in the message text
    pub sender_name: Option<String>,
}

/// Direction and payment-channel classification, always both present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub transaction_type: TransactionType,
    pub payment_type: PaymentType,
}

/// Outcome keywords found in the body; COMPLETED is the default, not a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "COMPLETED")]
    Completed,
}

/// Money direction relative to the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "DEBIT")]
    Debit,
}

/// Payment channel; MoMoPay is the default when no keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "Airtime")]
    Airtime,
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "MoMoPay")]
    MomoPay,
}

/// The assembled triple for one backup message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub message: MessageRecord,
    pub transaction: TransactionRecord,
    pub category: CategoryRecord,
}

impl ParsedRecord {
    /// Join key shared by anyone persisting the three records separately.
    pub fn transaction_id(&self) -> &str {
        &self.transaction.transaction_id
    }
}

impl TransactionRecord {
    /// Returns true if an amount was recovered from the body.
    pub fn has_amount(&self) -> bool {
        self.amount.is_some()
    }
}
