//! Extraction rules over MoMo notification text.
//!
//! The vocabulary is the fixed set of phrasings MTN mobile-money
//! notifications use ("You have received ... RWF from ...", "Your payment
//! of ... RWF to ... has been completed", "... RWF transferred to ...",
//! "A bank deposit of ... RWF"). Each derived value has its own ordered
//! cascade, and every extractor is total: a body that matches nothing
//! yields an absent value or the documented default, never an error.

use anyhow::Result;
use momo_core::{PaymentType, TransactionStatus, TransactionType};
use regex::Regex;

/// Compiled pattern cascade for the regex-backed extractions.
///
/// Build one per run and reuse it across messages.
pub struct BodyExtractor {
    amount_re: Regex,
    raw_amount_re: Regex,
    tx_id_re: Regex,
    counterparty_res: [Regex; 4],
    trailing_paren_re: Regex,
}

impl BodyExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            amount_re: Regex::new(
                r"(?i)(?:received|payment of|transferred\s*(?:to)?|deposit of)\s*([\d,]+)\s*RWF",
            )?,
            raw_amount_re: Regex::new(r"(?i)(\d[\d,]*)\s*RWF")?,
            tx_id_re: Regex::new(r"(?i)(?:TxId:|Financial Transaction Id:)\s*(\d+)")?,
            // Directional patterns in priority order; each capture stops at
            // the first period or open parenthesis after the name.
            counterparty_res: [
                Regex::new(r"(?i)received\s+[\d,]+\s*RWF\s+from\s+([^.(]+)")?,
                Regex::new(r"(?i)payment\s+of\s+[\d,]+\s*RWF\s+to\s+([^.(]+)")?,
                Regex::new(r"(?i)transferred\s+[\d,]+\s*RWF\s+to\s+([^.(]+)")?,
                Regex::new(r"(?i)transferred\s+[\d,]+\s*RWF\s+from\s+([^.(]+)")?,
            ],
            trailing_paren_re: Regex::new(r"\(.*?\)$")?,
        })
    }

    /// Amount in RWF.
    ///
    /// Tries the trigger-phrase pattern first, then the loosest fallback:
    /// the first digit run immediately before "RWF" anywhere in the text.
    /// Grouping commas are stripped before the numeric parse.
    pub fn amount(&self, body: &str) -> Option<f64> {
        let caps = self
            .amount_re
            .captures(body)
            .or_else(|| self.raw_amount_re.captures(body))?;
        caps[1].replace(',', "").parse().ok()
    }

    /// Explicit transaction id, labelled "TxId:" or
    /// "Financial Transaction Id:". No fallback here; the assembler
    /// synthesizes one when this returns None.
    pub fn transaction_id(&self, body: &str) -> Option<String> {
        self.tx_id_re
            .captures(body)
            .map(|caps| caps[1].to_string())
    }

    /// Counterparty name from the first matching directional pattern.
    ///
    /// The capture is trimmed and any trailing parenthetical annotation
    /// stripped; a name that comes out empty counts as no match and the
    /// cascade moves on.
    pub fn counterparty(&self, body: &str) -> Option<String> {
        for rule in &self.counterparty_res {
            let Some(caps) = rule.captures(body) else {
                continue;
            };
            let candidate = caps[1].trim();
            let candidate = self.trailing_paren_re.replace(candidate, "");
            let candidate = candidate.trim();
            if !candidate.is_empty() {
                return Some(candidate.to_string());
            }
        }
        None
    }
}

/// "failed" outranks "pending"; anything else reads as completed.
pub fn classify_status(body: &str) -> TransactionStatus {
    let lowered = body.to_lowercase();
    if lowered.contains("failed") {
        TransactionStatus::Failed
    } else if lowered.contains("pending") {
        TransactionStatus::Pending
    } else {
        TransactionStatus::Completed
    }
}

/// Incoming money says "received" or "deposit"; everything else is a debit.
pub fn classify_transaction_type(body: &str) -> TransactionType {
    let lowered = body.to_lowercase();
    if lowered.contains("received") || lowered.contains("deposit") {
        TransactionType::Credit
    } else {
        TransactionType::Debit
    }
}

/// Payment channel keywords, fixed order: "airtime" wins even when "cash"
/// also appears; "deposit" counts as cash; MoMoPay is the default.
pub fn classify_payment_type(body: &str) -> PaymentType {
    let lowered = body.to_lowercase();
    if lowered.contains("airtime") {
        PaymentType::Airtime
    } else if lowered.contains("cash") || lowered.contains("deposit") {
        PaymentType::Cash
    } else {
        PaymentType::MomoPay
    }
}
