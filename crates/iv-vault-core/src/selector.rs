//! Asset dropdown state.

use crate::assets::{self, ASSETS};
use crate::error::VaultError;
use iv_api_types::Asset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone)]
pub struct AssetSelector {
    state: DropdownState,
    current: usize,
}

impl Default for AssetSelector {
    fn default() -> Self {
        Self::starting_at(assets::DEFAULT_ASSET_ID)
    }
}

impl AssetSelector {
    /// Start on `id`, or on the default asset when `id` is unknown.
    pub fn starting_at(id: &str) -> Self {
        let current = assets::index_of(id)
            .or_else(|| assets::index_of(assets::DEFAULT_ASSET_ID))
            .unwrap_or(0);
        Self {
            state: DropdownState::Closed,
            current,
        }
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }

    pub fn current(&self) -> &'static Asset {
        &ASSETS[self.current]
    }

    pub fn toggle(&mut self) -> DropdownState {
        self.state = match self.state {
            DropdownState::Closed => DropdownState::Open,
            DropdownState::Open => DropdownState::Closed,
        };
        self.state
    }

    pub fn close(&mut self) {
        self.state = DropdownState::Closed;
    }

    /// Make `id` current and close the menu. Unknown ids change nothing.
    pub fn select(&mut self, id: &str) -> Result<&'static Asset, VaultError> {
        let index = assets::index_of(id).ok_or_else(|| VaultError::UnknownAsset(id.to_owned()))?;
        self.current = index;
        self.state = DropdownState::Closed;
        Ok(&ASSETS[index])
    }
}
