//! The page controller state: current asset, prices, stake input, session
//! status and the activity ledger, owned in one place.

use crate::calculator::{self, StakeInput};
use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::ledger::Ledger;
use crate::prices::{self, PriceOrigin, PriceOutcome, PriceSync, PriceTable, PriceTicket};
use crate::selector::AssetSelector;
use iv_api_types::{Asset, Severity, UserStakeRecord, WalletAddress};
use iv_units::{ETHER_DECIMALS, format_price, format_units_rounded};
use tracing::debug;

pub const CONNECT_LABEL: &str = "CONNECT WALLET";
pub const CONNECTING_LABEL: &str = "CONNECTING...";
pub const EMPTY_BALANCE: &str = "0.0000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectState {
    Idle,
    Connecting,
    Connected(WalletAddress),
}

impl ConnectState {
    pub fn label(&self) -> String {
        match self {
            ConnectState::Idle => CONNECT_LABEL.to_owned(),
            ConnectState::Connecting => CONNECTING_LABEL.to_owned(),
            ConnectState::Connected(account) => account.short(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Stake,
    Unstake,
    Claim,
}

impl TxKind {
    pub fn idle_label(self) -> &'static str {
        match self {
            TxKind::Stake => "EXECUTE PROTOCOL",
            TxKind::Unstake => "UNSTAKE",
            TxKind::Claim => "CLAIM REWARDS",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            TxKind::Stake => "PROCESSING...",
            TxKind::Unstake => "UNSTAKING...",
            TxKind::Claim => "CLAIMING...",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            TxKind::Stake => "Stake Successful!",
            TxKind::Unstake => "Unstake Successful!",
            TxKind::Claim => "Rewards Claimed!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vault {
    config: VaultConfig,
    selector: AssetSelector,
    prices: PriceTable,
    price_origin: Option<PriceOrigin>,
    sync: PriceSync,
    input: StakeInput,
    ledger: Ledger,
    connect: ConnectState,
    staked: String,
    wallet_balance: Option<f64>,
}

impl Vault {
    pub fn new(config: VaultConfig) -> Self {
        Self::with_asset(config, crate::assets::DEFAULT_ASSET_ID)
    }

    /// Start on a previously remembered asset id.
    pub fn with_asset(config: VaultConfig, asset_id: &str) -> Self {
        Self {
            selector: AssetSelector::starting_at(asset_id),
            prices: PriceTable::fallback(&config),
            price_origin: None,
            sync: PriceSync::default(),
            input: StakeInput::default(),
            ledger: Ledger::with_capacity(config.ledger_capacity),
            connect: ConnectState::Idle,
            staked: EMPTY_BALANCE.to_owned(),
            wallet_balance: None,
            config,
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn log(&mut self, message: impl Into<String>, severity: Severity) {
        self.ledger.push(message, severity);
    }

    // ── Asset selector ──

    pub fn current_asset(&self) -> &'static Asset {
        self.selector.current()
    }

    pub fn dropdown_open(&self) -> bool {
        self.selector.is_open()
    }

    pub fn toggle_dropdown(&mut self) -> bool {
        self.selector.toggle();
        self.selector.is_open()
    }

    pub fn close_dropdown(&mut self) {
        self.selector.close();
    }

    /// Switch asset, clear the stake input and close the menu. The caller
    /// follows up with a price sync.
    pub fn select_asset(&mut self, id: &str) -> Result<&'static Asset, VaultError> {
        let asset = self.selector.select(id)?;
        self.input.clear();
        Ok(asset)
    }

    // ── Prices ──

    pub fn current_price(&self) -> f64 {
        let id = self.current_asset().id;
        self.prices
            .get(id)
            .unwrap_or_else(|| self.config.fallback_price(id))
    }

    pub fn price_display(&self) -> String {
        format_price(self.current_price())
    }

    pub fn price_origin(&self) -> Option<&PriceOrigin> {
        self.price_origin.as_ref()
    }

    pub fn begin_price_sync(&mut self) -> PriceTicket {
        self.sync.begin(prices::price_query_url(&self.config))
    }

    /// Apply a finished sync. Outcomes of superseded tickets are dropped.
    pub fn finish_price_sync(&mut self, ticket: &PriceTicket, outcome: PriceOutcome) -> bool {
        if !self.sync.is_current(ticket) {
            debug!("discarding superseded price sync");
            return false;
        }
        self.prices = outcome.table;
        self.price_origin = Some(outcome.origin);
        let price = self.current_price();
        self.input.recompute(price);
        true
    }

    // ── Stake input ──

    pub fn input(&self) -> &StakeInput {
        &self.input
    }

    pub fn usd_display(&self) -> &str {
        self.input.usd()
    }

    pub fn update_input(&mut self, raw: &str) -> &str {
        let price = self.current_price();
        self.input.set(raw, price)
    }

    /// Fill the input with `percent` of the wallet balance; returns the text.
    pub fn quick_fill(&mut self, percent: u8) -> String {
        let raw = calculator::quick_fill_amount(self.wallet_balance.unwrap_or(0.0), percent);
        self.update_input(&raw);
        raw
    }

    // ── Wallet session ──

    pub fn connect_state(&self) -> &ConnectState {
        &self.connect
    }

    pub fn account(&self) -> Option<&WalletAddress> {
        match &self.connect {
            ConnectState::Connected(account) => Some(account),
            _ => None,
        }
    }

    pub fn begin_connect(&mut self) {
        self.connect = ConnectState::Connecting;
    }

    pub fn connected(&mut self, account: WalletAddress) {
        self.connect = ConnectState::Connected(account);
        self.log("Wallet Connected Successfully", Severity::Success);
    }

    /// Reset to idle and record the failure; returns the alert text, if any.
    pub fn connect_failed(&mut self, err: &VaultError) -> Option<&'static str> {
        self.connect = ConnectState::Idle;
        if let Some(line) = err.ledger_line() {
            self.log(line, Severity::Error);
        }
        err.alert()
    }

    // ── Contract gateway ──

    /// Local checks before a stake reaches the wallet.
    pub fn check_stake(&self, raw: &str) -> Result<(), VaultError> {
        if self.account().is_none() {
            return Err(VaultError::NotConnected);
        }
        if calculator::stakeable_amount(raw).is_none() {
            return Err(VaultError::InvalidAmount);
        }
        Ok(())
    }

    pub fn check_connected(&self) -> Result<(), VaultError> {
        match self.account() {
            Some(_) => Ok(()),
            None => Err(VaultError::NotConnected),
        }
    }

    pub fn begin_transaction(&mut self, kind: TxKind) {
        debug!(?kind, "transaction pending");
        self.log("Transaction Pending...", Severity::Info);
    }

    pub fn transaction_succeeded(&mut self, kind: TxKind) {
        self.log(kind.success_message(), Severity::Success);
    }

    /// Returns the alert text, if any.
    pub fn transaction_failed(&mut self, err: &VaultError) -> Option<&'static str> {
        if let Some(line) = err.ledger_line() {
            self.log(line, Severity::Error);
        }
        err.alert()
    }

    pub fn set_user_record(&mut self, record: &UserStakeRecord) {
        self.staked = format_units_rounded(record.amount, ETHER_DECIMALS, 4)
            .unwrap_or_else(|_| EMPTY_BALANCE.to_owned());
    }

    pub fn set_wallet_balance(&mut self, wei: u128) {
        let balance = iv_units::format_units(wei, ETHER_DECIMALS)
            .ok()
            .and_then(|s| s.parse::<f64>().ok());
        self.wallet_balance = balance;
    }

    pub fn staked_display(&self) -> &str {
        &self.staked
    }

    pub fn wallet_balance_display(&self) -> String {
        iv_units::format_fixed(self.wallet_balance.unwrap_or(0.0), 4)
    }
}
