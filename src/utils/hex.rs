use alloy::primitives::Address;
use std::str::FromStr;

/// Clean a hex string by removing "0x" prefix and whitespace
pub fn clean_hex(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parses a 0x-prefixed 20-byte hex address.
///
/// All-lowercase and all-uppercase inputs are accepted as-is; mixed case must
/// carry a valid EIP-55 checksum.
pub fn parse_address(raw: &str) -> Option<Address> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix("0x")?;
    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let parsed = Address::from_str(trimmed).ok()?;
    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && parsed.to_checksum(None) != trimmed {
        return None;
    }
    Some(parsed)
}

/// `0x1234...abcd` form used by the wallet badge.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Longer `0x12345678...9abcdef0` form used in dashboard cards.
pub fn medium_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..10], &full[full.len() - 8..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn clean_hex_strips_prefix_and_whitespace() {
        assert_eq!(clean_hex("  0xabcd "), "abcd");
        assert_eq!(clean_hex("0XABCD"), "ABCD");
        assert_eq!(clean_hex("abcd"), "abcd");
    }

    #[test]
    fn parse_address_follows_checksum_rules() {
        let lower = "0x000000000000000000000000000000000000dead";
        assert_eq!(parse_address(lower), Some(Address::from_str(lower).unwrap()));
        let checksummed = Address::from_str(lower).unwrap().to_checksum(None);
        assert!(parse_address(&checksummed).is_some());
        assert!(parse_address("0x000000000000000000000000000000000000DeAd").is_none());
        assert!(parse_address("0xZZZ").is_none());
        assert!(parse_address("000000000000000000000000000000000000dead").is_none());
        assert!(parse_address("").is_none());
    }

    #[test]
    fn short_address_keeps_head_and_tail() {
        let addr = address!("78D49B70CCe71E527af992ce1e7e15331C41F151");
        assert_eq!(short_address(&addr).to_ascii_lowercase(), "0x78d4...f151");
        assert_eq!(
            medium_address(&addr).to_ascii_lowercase(),
            "0x78d49b70...1c41f151"
        );
    }
}
