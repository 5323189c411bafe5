pub mod abi;

use anyhow::Result;
use async_trait::async_trait;
use iv_api_types::{CallRequest, TransactionReceipt, TransactionRequest, UserStakeRecord, WalletAddress};
use iv_units::{ETHER_DECIMALS, UnitsError};
use tracing::{debug, warn};

use abi::StakingCall;

pub const STAKING_CONTRACT_ADDRESS: &str = "0x368E6e2eb54D0c4F0bdC79381343A92BE3A193dE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid hex data: {0}")]
    InvalidHex(String),
    #[error("malformed return data: expected {expected} bytes, got {actual}")]
    MalformedReturn { expected: usize, actual: usize },
    #[error("returned value does not fit the supported range")]
    WordOverflow,
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error(transparent)]
    Units(#[from] UnitsError),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("provider error: {0}")]
    Provider(String),
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },
    #[error("transaction {tx_hash} not confirmed after {polls} polls")]
    ConfirmationTimeout { tx_hash: String, polls: u32 },
}

impl ContractError {
    fn provider(err: anyhow::Error) -> Self {
        Self::Provider(format!("{err:#}"))
    }
}

/// An injected EIP-1193 wallet provider.
///
/// Browser providers are `!Send`, hence `?Send`.
#[async_trait(?Send)]
pub trait EthereumProvider {
    async fn request_accounts(&self) -> Result<Vec<String>>;
    /// Returns the transaction hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String>;
    /// Returns the raw `0x` return data.
    async fn call(&self, req: &CallRequest) -> Result<String>;
    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>>;
    /// Native balance as a hex quantity.
    async fn balance(&self, account: &str) -> Result<String>;
    /// Yield to the event loop between receipt polls.
    async fn pause(&self, millis: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolling {
    pub interval_ms: u32,
    pub max_polls: u32,
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval_ms: 1_500,
            max_polls: 400,
        }
    }
}

/// Binding of the staking contract to a signing provider.
#[derive(Clone)]
pub struct StakingContract<P> {
    provider: P,
    address: WalletAddress,
    polling: ReceiptPolling,
}

impl<P> StakingContract<P>
where
    P: EthereumProvider,
{
    pub fn new(provider: P, address: &str, polling: ReceiptPolling) -> Result<Self, ContractError> {
        abi::parse_address(address)?;
        Ok(Self {
            provider,
            address: WalletAddress(address.trim().to_owned()),
            polling,
        })
    }

    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    /// Stake a human decimal amount, e.g. `"2.5"`.
    pub async fn stake(
        &self,
        from: &WalletAddress,
        human_amount: &str,
    ) -> Result<TransactionReceipt, ContractError> {
        let amount = iv_units::parse_units(human_amount, ETHER_DECIMALS)?;
        if amount == 0 {
            return Err(ContractError::InvalidAmount);
        }
        self.submit(from, StakingCall::Stake { amount }).await
    }

    pub async fn unstake(&self, from: &WalletAddress) -> Result<TransactionReceipt, ContractError> {
        self.submit(from, StakingCall::Unstake).await
    }

    pub async fn claim(&self, from: &WalletAddress) -> Result<TransactionReceipt, ContractError> {
        self.submit(from, StakingCall::Claim).await
    }

    pub async fn users(&self, account: &WalletAddress) -> Result<UserStakeRecord, ContractError> {
        let call = StakingCall::Users {
            account: abi::parse_address(&account.0)?,
        };
        let req = CallRequest {
            to: self.address.0.clone(),
            data: call.calldata(),
        };
        let raw = self
            .provider
            .call(&req)
            .await
            .map_err(ContractError::provider)?;
        abi::decode_user_record(&abi::decode_hex(&raw)?)
    }

    /// Native balance in wei.
    pub async fn native_balance(&self, account: &WalletAddress) -> Result<u128, ContractError> {
        let raw = self
            .provider
            .balance(&account.0)
            .await
            .map_err(ContractError::provider)?;
        abi::parse_quantity(&raw)
    }

    async fn submit(
        &self,
        from: &WalletAddress,
        call: StakingCall,
    ) -> Result<TransactionReceipt, ContractError> {
        let tx = TransactionRequest {
            from: from.0.clone(),
            to: self.address.0.clone(),
            data: call.calldata(),
        };
        debug!(call = call.signature(), from = %from, "submitting transaction");
        let tx_hash = self
            .provider
            .send_transaction(&tx)
            .await
            .map_err(ContractError::provider)?;
        self.wait_for_receipt(&tx_hash).await
    }

    /// Poll until the transaction is mined; a reverted receipt is an error.
    pub async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt, ContractError> {
        for attempt in 0..self.polling.max_polls {
            let receipt = self
                .provider
                .transaction_receipt(tx_hash)
                .await
                .map_err(ContractError::provider)?;
            if let Some(receipt) = receipt {
                if !receipt.succeeded() {
                    warn!(tx_hash, "transaction reverted");
                    return Err(ContractError::Reverted {
                        tx_hash: tx_hash.to_owned(),
                    });
                }
                debug!(tx_hash, attempt, "transaction confirmed");
                return Ok(receipt);
            }
            self.provider.pause(self.polling.interval_ms).await;
        }
        Err(ContractError::ConfirmationTimeout {
            tx_hash: tx_hash.to_owned(),
            polls: self.polling.max_polls,
        })
    }
}

/// A connected wallet: the selected account plus the contract binding
/// that signs through the same provider.
#[derive(Clone)]
pub struct Session<P> {
    pub account: WalletAddress,
    pub contract: StakingContract<P>,
}

impl<P> Session<P>
where
    P: EthereumProvider,
{
    pub async fn connect(
        provider: P,
        contract_address: &str,
        polling: ReceiptPolling,
    ) -> Result<Self, ContractError> {
        let accounts = provider
            .request_accounts()
            .await
            .map_err(ContractError::provider)?;
        let Some(first) = accounts.into_iter().next() else {
            return Err(ContractError::NoAccounts);
        };
        let contract = StakingContract::new(provider, contract_address, polling)?;
        Ok(Self {
            account: WalletAddress(first),
            contract,
        })
    }

    pub async fn user_record(&self) -> Result<UserStakeRecord, ContractError> {
        self.contract.users(&self.account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    const ACCOUNT: &str = "0x00000000000000000000000000000000000000a1";

    #[derive(Default)]
    struct MockState {
        accounts: Option<Vec<String>>,
        sent: Vec<TransactionRequest>,
        calls: Vec<CallRequest>,
        receipts: VecDeque<Option<TransactionReceipt>>,
        call_result: String,
        send_fails: bool,
        pauses: u32,
    }

    #[derive(Clone, Default)]
    struct MockProvider {
        state: Rc<RefCell<MockState>>,
    }

    impl MockProvider {
        fn with_account() -> Self {
            let mock = Self::default();
            mock.state.borrow_mut().accounts = Some(vec![ACCOUNT.to_owned()]);
            mock
        }

        fn push_receipt(&self, status: Option<&str>) {
            self.state.borrow_mut().receipts.push_back(status.map(|s| TransactionReceipt {
                transaction_hash: "0xfeed".to_owned(),
                block_number: Some("0x1".to_owned()),
                status: Some(s.to_owned()),
            }));
        }
    }

    #[async_trait(?Send)]
    impl EthereumProvider for MockProvider {
        async fn request_accounts(&self) -> Result<Vec<String>> {
            self.state
                .borrow()
                .accounts
                .clone()
                .ok_or_else(|| anyhow!("User rejected the request."))
        }

        async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String> {
            let mut state = self.state.borrow_mut();
            if state.send_fails {
                return Err(anyhow!("user denied transaction signature"));
            }
            state.sent.push(tx.clone());
            Ok("0xfeed".to_owned())
        }

        async fn call(&self, req: &CallRequest) -> Result<String> {
            let mut state = self.state.borrow_mut();
            state.calls.push(req.clone());
            Ok(state.call_result.clone())
        }

        async fn transaction_receipt(&self, _tx_hash: &str) -> Result<Option<TransactionReceipt>> {
            Ok(self.state.borrow_mut().receipts.pop_front().flatten())
        }

        async fn balance(&self, _account: &str) -> Result<String> {
            Ok("0xde0b6b3a7640000".to_owned())
        }

        async fn pause(&self, _millis: u32) {
            self.state.borrow_mut().pauses += 1;
        }
    }

    async fn session(mock: &MockProvider) -> Session<MockProvider> {
        Session::connect(mock.clone(), STAKING_CONTRACT_ADDRESS, ReceiptPolling::default())
            .await
            .expect("session should connect")
    }

    #[tokio::test]
    async fn connect_takes_first_account() {
        let mock = MockProvider::with_account();
        let session = session(&mock).await;
        assert_eq!(session.account.0, ACCOUNT);
        assert_eq!(session.contract.address().0, STAKING_CONTRACT_ADDRESS);
    }

    #[tokio::test]
    async fn rejected_connect_is_a_provider_error() {
        let result =
            Session::connect(MockProvider::default(), STAKING_CONTRACT_ADDRESS, ReceiptPolling::default()).await;
        assert!(matches!(result, Err(ContractError::Provider(msg)) if msg.contains("rejected")));

        let empty = MockProvider::default();
        empty.state.borrow_mut().accounts = Some(Vec::new());
        let result = Session::connect(empty, STAKING_CONTRACT_ADDRESS, ReceiptPolling::default()).await;
        assert!(matches!(result, Err(ContractError::NoAccounts)));
    }

    #[tokio::test]
    async fn stake_waits_for_confirmation() -> anyhow::Result<()> {
        let mock = MockProvider::with_account();
        mock.state.borrow_mut().receipts.push_back(None);
        mock.state.borrow_mut().receipts.push_back(None);
        mock.push_receipt(Some("0x1"));

        let session = session(&mock).await;
        let receipt = session.contract.stake(&session.account, "2.5").await?;
        assert_eq!(receipt.transaction_hash, "0xfeed");

        let state = mock.state.borrow();
        assert_eq!(state.pauses, 2);
        assert_eq!(state.sent.len(), 1);
        assert_eq!(state.sent[0].from, ACCOUNT);
        assert_eq!(state.sent[0].to, STAKING_CONTRACT_ADDRESS);
        assert!(state.sent[0].data.starts_with("0xa694fc3a"));
        assert!(state.sent[0].data.ends_with("22b1c8c1227a0000"));
        Ok(())
    }

    #[tokio::test]
    async fn zero_or_malformed_stake_never_reaches_the_wallet() {
        let mock = MockProvider::with_account();
        let session = session(&mock).await;

        assert_eq!(
            session.contract.stake(&session.account, "0").await,
            Err(ContractError::InvalidAmount)
        );
        assert!(matches!(
            session.contract.stake(&session.account, "").await,
            Err(ContractError::Units(UnitsError::Empty))
        ));
        assert!(matches!(
            session.contract.stake(&session.account, "-1").await,
            Err(ContractError::Units(UnitsError::Negative))
        ));
        assert!(mock.state.borrow().sent.is_empty());
    }

    #[tokio::test]
    async fn reverted_and_rejected_transactions_fail() {
        let mock = MockProvider::with_account();
        mock.push_receipt(Some("0x0"));
        let session = session(&mock).await;
        assert!(matches!(
            session.contract.claim(&session.account).await,
            Err(ContractError::Reverted { .. })
        ));

        mock.state.borrow_mut().send_fails = true;
        assert!(matches!(
            session.contract.unstake(&session.account).await,
            Err(ContractError::Provider(_))
        ));
    }

    #[tokio::test]
    async fn unconfirmed_transaction_times_out() {
        let mock = MockProvider::with_account();
        let polling = ReceiptPolling {
            interval_ms: 10,
            max_polls: 3,
        };
        let session = Session::connect(mock.clone(), STAKING_CONTRACT_ADDRESS, polling)
            .await
            .expect("connect");
        let result = session.contract.unstake(&session.account).await;
        assert!(matches!(
            result,
            Err(ContractError::ConfirmationTimeout { polls: 3, .. })
        ));
        assert_eq!(mock.state.borrow().pauses, 3);
        assert!(mock.state.borrow().sent[0].data == "0x2def6620");
    }

    #[tokio::test]
    async fn reads_user_record_and_balance() -> anyhow::Result<()> {
        let mock = MockProvider::with_account();
        mock.state.borrow_mut().call_result = format!(
            "0x{:064x}{:064x}{:064x}",
            1_234_500_000_000_000_000_u128, 1_700_000_000_u64, 7_u8
        );
        let session = session(&mock).await;

        let record = session.user_record().await?;
        assert_eq!(record.amount, 1_234_500_000_000_000_000);
        assert_eq!(record.last_update, 1_700_000_000);
        assert_eq!(record.reward, 7);
        assert!(mock.state.borrow().calls[0].data.starts_with("0xa87430ba"));

        let wei = session.contract.native_balance(&session.account).await?;
        assert_eq!(wei, 1_000_000_000_000_000_000);
        Ok(())
    }
}
