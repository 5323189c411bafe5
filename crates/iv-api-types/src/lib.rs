use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stakeable asset. `id` is the price-lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub id: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    /// `0x368E6e2eb54D...` -> `0x368E...93dE`
    pub fn short(&self) -> String {
        let addr = self.0.as_str();
        if addr.len() <= 10 || !addr.is_char_boundary(6) || !addr.is_char_boundary(addr.len() - 4) {
            return addr.to_owned();
        }
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Price API body: `{"binancecoin": {"usd": 620.0}, ...}`.
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Snapshot of the contract's `users(address)` mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStakeRecord {
    pub amount: u128,
    pub last_update: u64,
    pub reward: u128,
}

// ── EIP-1193 request payloads ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRequest {
    pub to: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    /// `0x1` on success, `0x0` when reverted.
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => status != "0x0",
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_addresses() {
        let addr = WalletAddress("0x368E6e2eb54D0c4F0bdC79381343A92BE3A193dE".to_owned());
        assert_eq!(addr.short(), "0x368E...93dE");
        assert_eq!(WalletAddress("0xabc".to_owned()).short(), "0xabc");
    }

    #[test]
    fn receipt_status_reflects_revert() {
        let receipt: TransactionReceipt = serde_json::from_str(
            r#"{"transactionHash":"0xaa","blockNumber":"0x10","status":"0x0"}"#,
        )
        .expect("receipt should parse");
        assert!(!receipt.succeeded());
        assert_eq!(receipt.block_number.as_deref(), Some("0x10"));
    }
}
