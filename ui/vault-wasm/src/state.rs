//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Never hold a borrow across an `.await`: copy what a flow needs out with
//! `with`, await, then write the result back with `with_mut`.

use crate::ethereum::BrowserProvider;
use gloo_storage::{LocalStorage, Storage};
use iv_contract::Session;
use iv_vault_core::{Vault, VaultConfig};
use std::cell::RefCell;

const SELECTED_ASSET_KEY: &str = "iv_selected_asset";

pub struct AppState {
    pub vault: Vault,
    /// Present only after a successful connect; never persisted.
    pub session: Option<Session<BrowserProvider>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            vault: Vault::new(VaultConfig::default()),
            session: None,
        }
    }
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn install_vault(vault: Vault) {
    with_mut(|s| s.vault = vault);
}

pub fn session() -> Option<Session<BrowserProvider>> {
    with(|s| s.session.clone())
}

pub fn set_session(session: Session<BrowserProvider>) {
    with_mut(|s| s.session = Some(session));
}

// ── localStorage helpers ──

pub fn remembered_asset() -> Option<String> {
    LocalStorage::get(SELECTED_ASSET_KEY).ok()
}

pub fn remember_asset(id: &str) {
    let _ = LocalStorage::set(SELECTED_ASSET_KEY, id);
}
