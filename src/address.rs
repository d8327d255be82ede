//! Wallet address normalization

use alloy_primitives::Address;

/// Canonicalize a wallet to its EIP-55 checksummed form.
///
/// Uniform-case input is accepted as-is; mixed-case input must carry a valid
/// checksum. Anything that does not parse falls back to lowercase.
pub fn normalize_address(wallet: &str) -> String {
    checksummed(wallet).unwrap_or_else(|| wallet.to_lowercase())
}

fn checksummed(wallet: &str) -> Option<String> {
    let hex = wallet.strip_prefix("0x").unwrap_or(wallet);
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());

    let address = if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{hex}"), None).ok()?
    } else {
        hex.parse::<Address>().ok()?
    };

    Some(address.to_checksum(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_lowercase_is_checksummed() {
        assert_eq!(normalize_address(&CHECKSUMMED.to_lowercase()), CHECKSUMMED);
    }

    #[test]
    fn test_missing_prefix_is_accepted() {
        let bare = CHECKSUMMED.trim_start_matches("0x").to_uppercase();
        assert_eq!(normalize_address(&bare), CHECKSUMMED);
    }

    #[test]
    fn test_valid_checksum_is_kept() {
        assert_eq!(normalize_address(CHECKSUMMED), CHECKSUMMED);
    }

    #[test]
    fn test_bad_checksum_falls_back_to_lowercase() {
        let broken = "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(normalize_address(broken), broken.to_lowercase());
    }

    #[test]
    fn test_non_address_falls_back_to_lowercase() {
        assert_eq!(normalize_address("Vitalik.ETH"), "vitalik.eth");
    }
}
