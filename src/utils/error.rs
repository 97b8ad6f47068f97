/// Shortens provider error text for logs and banners.
///
/// JSON-RPC errors from wallets and nodes routinely embed the full request
/// payload (`data: ...`, `transaction={...}`) and sometimes a backtrace; those
/// are dropped, whitespace runs are collapsed and the result is capped at
/// `max_len` characters.
pub fn compact_error_message(message: &str, max_len: usize) -> String {
    let mut raw = message;
    for marker in ["Stack backtrace:", " transaction={", " data: "] {
        if let Some((prefix, _)) = raw.split_once(marker) {
            raw = prefix;
        }
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_len {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(max_len).collect();
    out.push_str("...(truncated)");
    out
}

#[cfg(test)]
mod tests {
    use super::compact_error_message;

    #[test]
    fn drops_payload_and_backtrace() {
        let raw = "user rejected action (action=\"sendTransaction\", transaction={ \"to\": \"0x..\" })\nStack backtrace:\n 0: frame";
        let compact = compact_error_message(raw, 260);
        assert_eq!(compact, "user rejected action (action=\"sendTransaction\",");
    }

    #[test]
    fn truncates_long_messages() {
        let raw = "x".repeat(50);
        let compact = compact_error_message(&raw, 10);
        assert_eq!(compact, format!("{}...(truncated)", "x".repeat(10)));
    }
}
