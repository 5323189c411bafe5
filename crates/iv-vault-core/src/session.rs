//! Async wallet and contract flows, mapped onto `VaultError` classes.
//!
//! None of these touch `Vault`; callers apply the results so that no state
//! borrow is held across an await point.

use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::vault::TxKind;
use iv_api_types::{TransactionReceipt, UserStakeRecord};
use iv_contract::{EthereumProvider, Session};
use tracing::{debug, warn};

/// Connect through the injected provider, if there is one.
pub async fn open_session<P>(provider: Option<P>, config: &VaultConfig) -> Result<Session<P>, VaultError>
where
    P: EthereumProvider,
{
    let Some(provider) = provider else {
        return Err(VaultError::NoProvider);
    };
    let session = Session::connect(provider, &config.contract_address, config.receipt_polling())
        .await
        .map_err(VaultError::connection)?;
    debug!(account = %session.account, "wallet connected");
    Ok(session)
}

/// Submit one contract transaction and wait for its receipt.
pub async fn submit<P>(
    session: &Session<P>,
    kind: TxKind,
    amount: &str,
) -> Result<TransactionReceipt, VaultError>
where
    P: EthereumProvider,
{
    let result = match kind {
        TxKind::Stake => session.contract.stake(&session.account, amount).await,
        TxKind::Unstake => session.contract.unstake(&session.account).await,
        TxKind::Claim => session.contract.claim(&session.account).await,
    };
    result.map_err(|err| {
        warn!(?kind, error = %err, "transaction failed");
        VaultError::transaction(err)
    })
}

/// Staked record of the session account, from `users(address)`.
pub async fn read_staked<P>(session: &Session<P>) -> Result<UserStakeRecord, VaultError>
where
    P: EthereumProvider,
{
    session.user_record().await.map_err(VaultError::read)
}

/// Native wallet balance (wei) of the session account. Independent of the
/// contract read.
pub async fn read_wallet_balance<P>(session: &Session<P>) -> Result<u128, VaultError>
where
    P: EthereumProvider,
{
    session
        .contract
        .native_balance(&session.account)
        .await
        .map_err(VaultError::read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Vault;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use iv_api_types::{CallRequest, TransactionRequest};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Wallet {
        reject: bool,
        revert: bool,
        balance: Option<&'static str>,
        sent: Rc<Cell<u32>>,
    }

    #[async_trait(?Send)]
    impl EthereumProvider for Wallet {
        async fn request_accounts(&self) -> Result<Vec<String>> {
            if self.reject {
                return Err(anyhow!("User rejected the request."));
            }
            Ok(vec!["0x00000000000000000000000000000000000000b2".to_owned()])
        }

        async fn send_transaction(&self, _tx: &TransactionRequest) -> Result<String> {
            self.sent.set(self.sent.get() + 1);
            Ok("0x01".to_owned())
        }

        async fn call(&self, _req: &CallRequest) -> Result<String> {
            Err(anyhow!("execution reverted"))
        }

        async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>> {
            Ok(Some(TransactionReceipt {
                transaction_hash: tx_hash.to_owned(),
                block_number: Some("0x2".to_owned()),
                status: Some(if self.revert { "0x0" } else { "0x1" }.to_owned()),
            }))
        }

        async fn balance(&self, _account: &str) -> Result<String> {
            self.balance
                .map(str::to_owned)
                .ok_or_else(|| anyhow!("balance unavailable"))
        }

        async fn pause(&self, _millis: u32) {}
    }

    #[tokio::test]
    async fn missing_provider_is_no_provider() {
        let result = open_session::<Wallet>(None, &VaultConfig::default()).await;
        assert!(matches!(result, Err(VaultError::NoProvider)));
    }

    #[tokio::test]
    async fn rejection_maps_to_connection_rejected() {
        let wallet = Wallet {
            reject: true,
            ..Wallet::default()
        };
        let result = open_session(Some(wallet), &VaultConfig::default()).await;
        assert!(matches!(result, Err(VaultError::ConnectionRejected(_))));
    }

    #[tokio::test]
    async fn transactions_map_to_their_error_class() {
        let wallet = Wallet::default();
        let session = open_session(Some(wallet.clone()), &VaultConfig::default())
            .await
            .expect("session");

        assert!(submit(&session, TxKind::Stake, "1.5").await.is_ok());
        assert!(submit(&session, TxKind::Claim, "").await.is_ok());
        assert_eq!(
            submit(&session, TxKind::Stake, "0").await.map(|_| ()),
            Err(VaultError::InvalidAmount)
        );
        assert_eq!(wallet.sent.get(), 2);

        let reverting = Wallet {
            revert: true,
            ..Wallet::default()
        };
        let session = open_session(Some(reverting), &VaultConfig::default())
            .await
            .expect("session");
        assert!(matches!(
            submit(&session, TxKind::Unstake, "").await,
            Err(VaultError::TransactionFailure(_))
        ));
    }

    #[tokio::test]
    async fn failed_read_is_read_failure() {
        let session = open_session(Some(Wallet::default()), &VaultConfig::default())
            .await
            .expect("session");
        assert!(matches!(read_staked(&session).await, Err(VaultError::ReadFailure(_))));
        assert!(matches!(
            read_wallet_balance(&session).await,
            Err(VaultError::ReadFailure(_))
        ));
    }

    #[tokio::test]
    async fn wallet_balance_survives_a_failed_contract_read() {
        let wallet = Wallet {
            balance: Some("0x1bc16d674ec80000"),
            ..Wallet::default()
        };
        let session = open_session(Some(wallet), &VaultConfig::default())
            .await
            .expect("session");

        assert!(read_staked(&session).await.is_err());
        let wei = read_wallet_balance(&session).await.expect("balance");
        assert_eq!(wei, 2_000_000_000_000_000_000);

        let mut vault = Vault::new(VaultConfig::default());
        vault.set_wallet_balance(wei);
        assert_eq!(vault.wallet_balance_display(), "2.0000");
        assert_eq!(vault.quick_fill(50), "1.0000");
        assert_eq!(vault.staked_display(), "0.0000");
    }
}
