use iv_contract::ContractError;

/// User-facing failure classes and how each one surfaces.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum VaultError {
    #[error("no wallet provider found")]
    NoProvider,
    #[error("wallet connection rejected: {0}")]
    ConnectionRejected(String),
    #[error("contract read failed: {0}")]
    ReadFailure(String),
    #[error("transaction failed: {0}")]
    TransactionFailure(String),
    #[error("price fetch failed: {0}")]
    PriceFetchFailure(String),
    #[error("wallet not connected")]
    NotConnected,
    #[error("invalid stake amount")]
    InvalidAmount,
    #[error("unknown asset: {0}")]
    UnknownAsset(String),
}

impl VaultError {
    pub fn connection(err: ContractError) -> Self {
        Self::ConnectionRejected(err.to_string())
    }

    pub fn read(err: ContractError) -> Self {
        Self::ReadFailure(err.to_string())
    }

    pub fn transaction(err: ContractError) -> Self {
        match err {
            ContractError::InvalidAmount | ContractError::Units(_) => Self::InvalidAmount,
            other => Self::TransactionFailure(other.to_string()),
        }
    }

    /// Text for a blocking `alert()`, if this error warrants one.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            VaultError::NoProvider => Some("Please install MetaMask or use Trust Wallet browser!"),
            VaultError::ConnectionRejected(_) => Some("Wallet connection was rejected."),
            VaultError::NotConnected => Some("Please connect wallet first!"),
            VaultError::InvalidAmount => Some("Enter a valid amount!"),
            _ => None,
        }
    }

    /// Activity ledger line, if this error is logged there.
    pub fn ledger_line(&self) -> Option<&'static str> {
        match self {
            VaultError::NoProvider => Some("No Wallet Provider Found"),
            VaultError::ConnectionRejected(_) => Some("Connection Rejected"),
            VaultError::TransactionFailure(_) => Some("Transaction Failed"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_follow_the_error_class() {
        assert!(VaultError::NoProvider.alert().is_some());
        assert_eq!(VaultError::NoProvider.ledger_line(), Some("No Wallet Provider Found"));
        assert!(VaultError::ReadFailure("x".into()).alert().is_none());
        assert!(VaultError::ReadFailure("x".into()).ledger_line().is_none());
        assert!(VaultError::PriceFetchFailure("x".into()).alert().is_none());
        assert!(VaultError::PriceFetchFailure("x".into()).ledger_line().is_none());
        assert!(VaultError::TransactionFailure("x".into()).alert().is_none());
        assert_eq!(
            VaultError::transaction(ContractError::InvalidAmount),
            VaultError::InvalidAmount
        );
    }
}
