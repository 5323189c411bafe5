//! Minimal ABI codec for the staking contract's four entry points.
//!
//! Every argument and return value of the interface is a single static
//! 32-byte word, so no dynamic-type encoding is needed.

use crate::ContractError;
use iv_api_types::UserStakeRecord;

pub const WORD: usize = 32;

/// `claim()`
pub const CLAIM_SELECTOR: [u8; 4] = [0x4e, 0x71, 0xd9, 0x2d];
/// `stake(uint256)`
pub const STAKE_SELECTOR: [u8; 4] = [0xa6, 0x94, 0xfc, 0x3a];
/// `unstake()`
pub const UNSTAKE_SELECTOR: [u8; 4] = [0x2d, 0xef, 0x66, 0x20];
/// `users(address)`
pub const USERS_SELECTOR: [u8; 4] = [0xa8, 0x74, 0x30, 0xba];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingCall {
    Claim,
    Stake { amount: u128 },
    Unstake,
    Users { account: [u8; 20] },
}

impl StakingCall {
    pub fn signature(&self) -> &'static str {
        match self {
            StakingCall::Claim => "claim()",
            StakingCall::Stake { .. } => "stake(uint256)",
            StakingCall::Unstake => "unstake()",
            StakingCall::Users { .. } => "users(address)",
        }
    }

    pub fn selector(&self) -> [u8; 4] {
        match self {
            StakingCall::Claim => CLAIM_SELECTOR,
            StakingCall::Stake { .. } => STAKE_SELECTOR,
            StakingCall::Unstake => UNSTAKE_SELECTOR,
            StakingCall::Users { .. } => USERS_SELECTOR,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + WORD);
        data.extend_from_slice(&self.selector());
        match self {
            StakingCall::Stake { amount } => {
                data.extend_from_slice(&[0_u8; 16]);
                data.extend_from_slice(&amount.to_be_bytes());
            }
            StakingCall::Users { account } => {
                data.extend_from_slice(&[0_u8; 12]);
                data.extend_from_slice(account);
            }
            StakingCall::Claim | StakingCall::Unstake => {}
        }
        data
    }

    /// `0x`-prefixed calldata for `eth_sendTransaction` / `eth_call`.
    pub fn calldata(&self) -> String {
        encode_hex(&self.encode())
    }
}

pub fn encode_hex(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(2 + bytes.len() * 2);
    output.push_str("0x");
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

pub fn decode_hex(input: &str) -> Result<Vec<u8>, ContractError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if digits.len() % 2 != 0 {
        return Err(ContractError::InvalidHex(input.to_owned()));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ContractError::InvalidHex(input.to_owned()))
        })
        .collect()
}

/// Parse a `0x` + 40 hex digit account address.
pub fn parse_address(input: &str) -> Result<[u8; 20], ContractError> {
    let trimmed = input.trim();
    if !(trimmed.starts_with("0x") || trimmed.starts_with("0X")) || trimmed.len() != 42 {
        return Err(ContractError::InvalidAddress(input.to_owned()));
    }
    let bytes = decode_hex(trimmed).map_err(|_| ContractError::InvalidAddress(input.to_owned()))?;
    let mut account = [0_u8; 20];
    account.copy_from_slice(&bytes);
    Ok(account)
}

/// Parse a JSON-RPC hex quantity such as `0x1bc16d674ec80000`.
pub fn parse_quantity(input: &str) -> Result<u128, ContractError> {
    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::InvalidHex(input.to_owned()))?;
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 32 {
        let significant = digits.trim_start_matches('0');
        if significant.len() > 32 {
            return Err(ContractError::WordOverflow);
        }
        return u128::from_str_radix(if significant.is_empty() { "0" } else { significant }, 16)
            .map_err(|_| ContractError::InvalidHex(input.to_owned()));
    }
    u128::from_str_radix(digits, 16).map_err(|_| ContractError::InvalidHex(input.to_owned()))
}

fn word_u128(word: &[u8]) -> Result<u128, ContractError> {
    let (high, low) = word.split_at(WORD - 16);
    if high.iter().any(|b| *b != 0) {
        return Err(ContractError::WordOverflow);
    }
    let mut buf = [0_u8; 16];
    buf.copy_from_slice(low);
    Ok(u128::from_be_bytes(buf))
}

/// Decode the `(uint256 amount, uint256 lastUpdate, uint256 reward)` tuple.
pub fn decode_user_record(data: &[u8]) -> Result<UserStakeRecord, ContractError> {
    if data.len() < 3 * WORD {
        return Err(ContractError::MalformedReturn {
            expected: 3 * WORD,
            actual: data.len(),
        });
    }
    let amount = word_u128(&data[..WORD])?;
    let last_update =
        u64::try_from(word_u128(&data[WORD..2 * WORD])?).map_err(|_| ContractError::WordOverflow)?;
    let reward = word_u128(&data[2 * WORD..3 * WORD])?;
    Ok(UserStakeRecord {
        amount,
        last_update,
        reward,
    })
}
