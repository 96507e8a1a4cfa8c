//! Composes normalized attributes and body extractions into record triples.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use momo_core::{CategoryRecord, MessageRecord, ParsedRecord, TransactionRecord};
use momo_ingest::backup::BackupReader;
use momo_ingest::normalize::{
    known_contact, optional_text, parse_epoch_millis, parse_flag, parse_optional_int,
};

use crate::rules::{
    classify_payment_type, classify_status, classify_transaction_type, BodyExtractor,
};

fn attr<'a>(raw: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    raw.get(key).map(String::as_str)
}

/// Build one (message, transaction, category) triple from a raw `<sms>`
/// attribute map.
///
/// `position` is the 1-based document position; it only feeds the fallback
/// transaction id, which combines the timestamp with the position so two
/// id-less messages stay distinct even at the same instant. Never fails:
/// an empty or unmatchable body still produces a complete triple with
/// defaulted or absent fields.
pub fn build_record(
    raw: &HashMap<String, String>,
    position: usize,
    rules: &BodyExtractor,
) -> ParsedRecord {
    let body = attr(raw, "body").unwrap_or_default().to_string();
    let transaction_date = parse_epoch_millis(attr(raw, "date"));
    let transaction_id = rules
        .transaction_id(&body)
        .unwrap_or_else(|| format!("{}#{}", transaction_date.to_rfc3339(), position));

    let transaction = TransactionRecord {
        transaction_id,
        user_id: parse_optional_int(attr(raw, "sub_id")),
        transaction_date,
        toa: attr(raw, "toa").map(str::to_string),
        sc_toa: attr(raw, "sc_toa").map(str::to_string),
        readable_date: attr(raw, "readable_date").map(str::to_string),
        amount: rules.amount(&body),
        status: classify_status(&body),
        service_center_number: attr(raw, "service_center").map(str::to_string),
        sender_name: rules.counterparty(&body),
    };

    let category = CategoryRecord {
        transaction_type: classify_transaction_type(&body),
        payment_type: classify_payment_type(&body),
    };

    let message = MessageRecord {
        protocol: attr(raw, "protocol").and_then(|s| s.parse().ok()).unwrap_or(0),
        address: attr(raw, "address").unwrap_or_default().to_string(),
        is_read: parse_flag(attr(raw, "read")),
        subject: optional_text(attr(raw, "subject")),
        sms_protocol: attr(raw, "status").map(str::to_string),
        service_center: attr(raw, "service_center").map(str::to_string),
        contact_name: known_contact(attr(raw, "contact_name")),
        sub_id: parse_optional_int(attr(raw, "sub_id")),
        readable_date: attr(raw, "readable_date").map(str::to_string),
        body,
    };

    ParsedRecord {
        message,
        transaction,
        category,
    }
}

/// Stream a backup file into assembled records, in document order.
///
/// Fatal on a missing file or ill-formed XML; everything per-field is
/// absorbed into defaults by the normalizers and extractors.
pub fn parse_backup(path: impl AsRef<Path>) -> Result<Vec<ParsedRecord>> {
    let rules = BodyExtractor::new()?;
    let mut records = Vec::new();
    for (idx, item) in BackupReader::from_path(path.as_ref())?.enumerate() {
        let raw = item.with_context(|| format!("reading {}", path.as_ref().display()))?;
        records.push(build_record(&raw, idx + 1, &rules));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use momo_core::{PaymentType, TransactionStatus, TransactionType};

    fn rules() -> BodyExtractor {
        BodyExtractor::new().unwrap()
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builds_full_triple() {
        let raw = raw(&[
            ("protocol", "0"),
            ("address", "M-Money"),
            ("date", "1715351458724"),
            ("read", "1"),
            ("subject", "null"),
            (
                "body",
                "You have received 2000 RWF from Jane Smith (*********013) on your mobile money account. Financial Transaction Id: 76662021700.",
            ),
            ("toa", "null"),
            ("sc_toa", "null"),
            ("service_center", "+250788110381"),
            ("status", "-1"),
            ("sub_id", "6"),
            ("readable_date", "10 May 2024 4:30:58 PM"),
            ("contact_name", "(Unknown)"),
        ]);

        let record = build_record(&raw, 1, &rules());

        assert_eq!(record.transaction.transaction_id, "76662021700");
        assert_eq!(record.transaction.amount, Some(2000.0));
        assert_eq!(record.transaction.sender_name, Some("Jane Smith".to_string()));
        assert_eq!(record.transaction.status, TransactionStatus::Completed);
        assert_eq!(record.transaction.user_id, Some(6));
        assert_eq!(
            record.transaction.transaction_date.to_rfc3339(),
            "2024-05-10T14:30:58.724+00:00"
        );
        // toa is carried verbatim, even when the backup wrote "null"
        assert_eq!(record.transaction.toa, Some("null".to_string()));

        assert_eq!(record.category.transaction_type, TransactionType::Credit);
        assert_eq!(record.category.payment_type, PaymentType::MomoPay);

        assert_eq!(record.message.protocol, 0);
        assert_eq!(record.message.address, "M-Money");
        assert!(record.message.is_read);
        assert_eq!(record.message.subject, None);
        assert_eq!(record.message.contact_name, None);
        assert_eq!(record.message.sms_protocol, Some("-1".to_string()));
        assert_eq!(
            record.message.service_center,
            Some("+250788110381".to_string())
        );
    }

    #[test]
    fn test_fallback_ids_distinct_at_same_timestamp() {
        let raw = raw(&[("date", "1715351458724"), ("body", "no id in this one")]);
        let rules = rules();

        let first = build_record(&raw, 1, &rules);
        let second = build_record(&raw, 2, &rules);

        assert_eq!(
            first.transaction.transaction_id,
            "2024-05-10T14:30:58.724+00:00#1"
        );
        assert_eq!(
            second.transaction.transaction_id,
            "2024-05-10T14:30:58.724+00:00#2"
        );
        assert_ne!(
            first.transaction.transaction_id,
            second.transaction.transaction_id
        );
    }

    #[test]
    fn test_empty_attribute_map_still_assembles() {
        let record = build_record(&HashMap::new(), 1, &rules());

        assert_eq!(record.message.body, "");
        assert_eq!(record.message.address, "");
        assert_eq!(record.message.protocol, 0);
        assert!(!record.message.is_read);
        assert_eq!(record.transaction.amount, None);
        assert_eq!(record.transaction.sender_name, None);
        assert_eq!(record.transaction.status, TransactionStatus::Completed);
        assert_eq!(record.category.transaction_type, TransactionType::Debit);
        assert_eq!(record.category.payment_type, PaymentType::MomoPay);
        assert!(record.transaction.transaction_id.ends_with("#1"));
    }

    #[test]
    fn test_unparseable_protocol_defaults_to_zero() {
        let raw = raw(&[("protocol", "abc"), ("body", "")]);
        let record = build_record(&raw, 1, &rules());
        assert_eq!(record.message.protocol, 0);
    }
}
