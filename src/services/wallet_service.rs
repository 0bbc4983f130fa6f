// Wallet service for ERC-20 read-only lookups
//
// Balances are display data fetched straight from public JSON-RPC
// endpoints with the fixed minimal ERC-20 read interface. Nothing here
// writes to a chain.

use reqwest::Client;
use serde::Serialize;

// Function selectors of the fixed read ABI
const SELECTOR_BALANCE_OF: &str = "70a08231";
const SELECTOR_DECIMALS: &str = "313ce567";
const SELECTOR_SYMBOL: &str = "95d89b41";
const SELECTOR_NAME: &str = "06fdde03";

/// Token balance overview for a wallet, ready for display
#[derive(Debug, Serialize)]
pub struct TokenBalance {
    pub address: String,
    pub contract: String,
    pub network: String,
    pub balance_raw: String,
    pub balance: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

pub struct WalletService;

impl WalletService {
    /// Fetches balance, decimals, symbol and name for a wallet against one
    /// token contract.
    pub async fn get_token_balance(
        client: &Client,
        rpc_url: &str,
        network: &str,
        contract: &str,
        address: &str,
    ) -> Result<TokenBalance, String> {
        let contract = normalize_address(contract)?;
        let address = normalize_address(address)?;

        let balance_data = format!("0x{}{}", SELECTOR_BALANCE_OF, pad_address(&address)?);
        let balance_hex = eth_call(client, rpc_url, &contract, &balance_data).await?;
        let decimals_hex =
            eth_call(client, rpc_url, &contract, &format!("0x{}", SELECTOR_DECIMALS)).await?;
        let symbol_hex =
            eth_call(client, rpc_url, &contract, &format!("0x{}", SELECTOR_SYMBOL)).await?;
        let name_hex =
            eth_call(client, rpc_url, &contract, &format!("0x{}", SELECTOR_NAME)).await?;

        let balance_raw = decode_uint(&balance_hex)?;
        let decimals = decode_uint(&decimals_hex)?.min(38) as u8;

        Ok(TokenBalance {
            address,
            contract,
            network: network.to_string(),
            balance_raw: balance_raw.to_string(),
            balance: format_units(balance_raw, decimals),
            decimals,
            symbol: decode_abi_string(&symbol_hex),
            name: decode_abi_string(&name_hex),
        })
    }
}

/// Single `eth_call` round trip, returning the raw hex result
async fn eth_call(
    client: &Client,
    rpc_url: &str,
    to: &str,
    data: &str,
) -> Result<String, String> {
    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "method": "eth_call",
        "params": [{"to": to, "data": data}, "latest"],
        "id": 1,
    });

    let response = client
        .post(rpc_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| format!("RPC request failed: {}", e))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| format!("RPC response was not JSON: {}", e))?;

    if let Some(err) = body.get("error") {
        return Err(format!("RPC error: {}", err));
    }

    body.get("result")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| "RPC response missing result".to_string())
}

/// Validates and lowercases a `0x`-prefixed 20-byte hex address
fn normalize_address(address: &str) -> Result<String, String> {
    let trimmed = address.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| format!("address missing 0x prefix: {}", trimmed))?;

    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed address: {}", trimmed));
    }

    Ok(format!("0x{}", body.to_lowercase()))
}

/// Left-pads an address to the 32-byte ABI word used as call argument
fn pad_address(address: &str) -> Result<String, String> {
    let normalized = normalize_address(address)?;
    Ok(format!("{:0>64}", &normalized[2..]))
}

/// Decodes a hex quantity result into an integer. Values wider than 128
/// bits are out of displayable range for this storefront.
fn decode_uint(result: &str) -> Result<u128, String> {
    let body = result.trim().trim_start_matches("0x");
    let trimmed = body.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(0);
    }
    if trimmed.len() > 32 {
        return Err("value out of displayable range".to_string());
    }
    u128::from_str_radix(trimmed, 16).map_err(|e| format!("bad hex quantity: {}", e))
}

/// Decodes an ABI-encoded string result. Falls back to treating the word
/// as fixed bytes32 for the older tokens that return those, and to an
/// empty string on anything unparseable.
fn decode_abi_string(result: &str) -> String {
    let Ok(bytes) = hex::decode(result.trim().trim_start_matches("0x")) else {
        return String::new();
    };

    let text = if bytes.len() >= 64 {
        let offset = word_as_usize(&bytes[..32]);
        let Some(len_end) = offset.checked_add(32) else {
            return String::new();
        };
        let Some(len_word) = bytes.get(offset..len_end) else {
            return String::new();
        };
        let len = word_as_usize(len_word);
        match len_end.checked_add(len).and_then(|end| bytes.get(len_end..end)) {
            Some(data) => String::from_utf8_lossy(data).into_owned(),
            None => String::new(),
        }
    } else {
        // bytes32-style return
        String::from_utf8_lossy(&bytes).into_owned()
    };

    text.trim_matches('\0').trim().to_string()
}

/// Big-endian 32-byte word to usize, saturating on the high bytes
fn word_as_usize(word: &[u8]) -> usize {
    word.iter().fold(0usize, |acc, b| {
        acc.saturating_mul(256).saturating_add(*b as usize)
    })
}

/// Formats a raw integer amount with `decimals` fractional digits,
/// trimming trailing zeros ("1500000" at 6 decimals -> "1.5")
fn format_units(value: u128, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let digits = value.to_string();
    let decimals = decimals as usize;
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let split = padded.len() - decimals;
    let (int_part, frac_part) = padded.split_at(split);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_normalize_to_lowercase() {
        let mixed = "0xDE0B295669a9FD93d5F28D9Ec85E40f4cb697BAe";
        let normalized = normalize_address(mixed).unwrap();
        assert_eq!(normalized, "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae");

        assert!(normalize_address("de0b295669a9fd93d5f28d9ec85e40f4cb697bae").is_err());
        assert!(normalize_address("0x1234").is_err());
        assert!(normalize_address("0xzz0b295669a9fd93d5f28d9ec85e40f4cb697bae").is_err());
    }

    #[test]
    fn balance_call_data_is_selector_plus_padded_address() {
        let padded = pad_address("0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae").unwrap();
        assert_eq!(padded.len(), 64);
        assert!(padded.starts_with("000000000000000000000000de0b2956"));
    }

    #[test]
    fn uint_results_decode() {
        assert_eq!(decode_uint("0x").unwrap(), 0);
        assert_eq!(decode_uint("0x0").unwrap(), 0);
        assert_eq!(
            decode_uint("0x0000000000000000000000000000000000000000000000000000000000001680")
                .unwrap(),
            5760
        );
    }

    #[test]
    fn dynamic_strings_decode() {
        // ABI encoding of the string "USDC"
        let encoded = concat!(
            "0x",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000004",
            "5553444300000000000000000000000000000000000000000000000000000000",
        );
        assert_eq!(decode_abi_string(encoded), "USDC");
    }

    #[test]
    fn bytes32_strings_decode() {
        // Older tokens return bytes32 instead of a dynamic string
        let encoded =
            "0x4d4b520000000000000000000000000000000000000000000000000000000000";
        assert_eq!(decode_abi_string(encoded), "MKR");
    }

    #[test]
    fn garbage_strings_decode_to_empty() {
        assert_eq!(decode_abi_string("0xnothex"), "");
        assert_eq!(decode_abi_string("0x"), "");
    }

    #[test]
    fn units_format_with_decimals() {
        assert_eq!(format_units(1_500_000, 6), "1.5");
        assert_eq!(format_units(1_000_000, 6), "1");
        assert_eq!(format_units(42, 0), "42");
        assert_eq!(format_units(1, 6), "0.000001");
        assert_eq!(format_units(0, 18), "0");
    }
}
