//! Wallet and contract operations.
//!
//! Each handler runs one user-triggered flow from `iv_vault_core::session`
//! and reports through the ledger. Wire new handlers in `events.rs`.

use crate::dom::{self, Elements};
use crate::ethereum::BrowserProvider;
use crate::ledger;
use crate::state;
use iv_vault_core::session;
use iv_vault_core::{ConnectState, TxKind};
use web_sys::HtmlElement;

/// Accent border once a wallet is connected.
const CONNECTED_BORDER: &str = "#00f2ff";

pub fn render_connect(els: &Elements) {
    let connect = state::with(|s| s.vault.connect_state().clone());
    els.connect_btn.set_text_content(Some(&connect.label()));
    let style = els.connect_btn.style();
    let _ = match connect {
        ConnectState::Connected(_) => style.set_property("border-color", CONNECTED_BORDER),
        _ => style.remove_property("border-color").map(|_| ()),
    };
}

pub fn render_balances(els: &Elements) {
    let (staked, wallet) = state::with(|s| {
        (
            s.vault.staked_display().to_owned(),
            s.vault.wallet_balance_display(),
        )
    });
    dom::set_text(&els.staked_bal, &staked);
    dom::set_text(&els.wallet_bal, &wallet);
}

/// eth_requestAccounts → session → balances
pub async fn on_connect(els: &Elements) {
    let provider = BrowserProvider::detect();
    if provider.is_some() {
        state::with_mut(|s| s.vault.begin_connect());
        render_connect(els);
    }

    let config = state::with(|s| s.vault.config().clone());
    match session::open_session(provider, &config).await {
        Ok(opened) => {
            let account = opened.account.clone();
            state::set_session(opened);
            state::with_mut(|s| s.vault.connected(account));
            render_connect(els);
            ledger::render(els);
            refresh_balances(els).await;
        }
        Err(err) => {
            gloo_console::error!(err.to_string());
            let alert = state::with_mut(|s| s.vault.connect_failed(&err));
            render_connect(els);
            ledger::render(els);
            if let Some(message) = alert {
                dom::alert(message);
            }
        }
    }
}

/// users(account) and eth_getBalance, applied independently. Failures go to
/// the console only and leave the previous display in place.
pub async fn refresh_balances(els: &Elements) {
    let Some(active) = state::session() else {
        return;
    };
    match session::read_staked(&active).await {
        Ok(record) => state::with_mut(|s| s.vault.set_user_record(&record)),
        Err(err) => gloo_console::error!("Fetch Error:", err.to_string()),
    }
    match session::read_wallet_balance(&active).await {
        Ok(wei) => state::with_mut(|s| s.vault.set_wallet_balance(wei)),
        Err(err) => gloo_console::error!("Balance Error:", err.to_string()),
    }
    render_balances(els);
}

pub async fn on_stake(els: &Elements) {
    run_transaction(els, TxKind::Stake).await;
}

pub async fn on_unstake(els: &Elements) {
    run_transaction(els, TxKind::Unstake).await;
}

pub async fn on_claim(els: &Elements) {
    run_transaction(els, TxKind::Claim).await;
}

fn button_for(els: &Elements, kind: TxKind) -> &HtmlElement {
    match kind {
        TxKind::Stake => &els.execute_btn,
        TxKind::Unstake => &els.unstake_btn,
        TxKind::Claim => &els.claim_btn,
    }
}

/// Validate locally, submit, await the receipt, restore the button.
async fn run_transaction(els: &Elements, kind: TxKind) {
    let amount = match kind {
        TxKind::Stake => els.stake_amount.value().trim().to_owned(),
        TxKind::Unstake | TxKind::Claim => String::new(),
    };
    let checked = state::with(|s| match kind {
        TxKind::Stake => s.vault.check_stake(&amount),
        TxKind::Unstake | TxKind::Claim => s.vault.check_connected(),
    });
    if let Err(err) = checked {
        if let Some(message) = err.alert() {
            dom::alert(message);
        }
        return;
    }
    let Some(active) = state::session() else {
        return;
    };

    let button = button_for(els, kind);
    state::with_mut(|s| s.vault.begin_transaction(kind));
    ledger::render(els);
    button.set_text_content(Some(kind.busy_label()));

    let result = session::submit(&active, kind, &amount).await;
    button.set_text_content(Some(kind.idle_label()));

    match result {
        Ok(receipt) => {
            gloo_console::log!("confirmed", receipt.transaction_hash);
            state::with_mut(|s| s.vault.transaction_succeeded(kind));
            ledger::render(els);
            refresh_balances(els).await;
        }
        Err(err) => {
            gloo_console::error!(err.to_string());
            let alert = state::with_mut(|s| s.vault.transaction_failed(&err));
            ledger::render(els);
            if let Some(message) = alert {
                dom::alert(message);
            }
        }
    }
}
