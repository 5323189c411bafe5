//! Static catalog of stakeable assets.

use iv_api_types::Asset;

pub const DEFAULT_ASSET_ID: &str = "binancecoin";

pub static ASSETS: [Asset; 5] = [
    Asset {
        id: "binancecoin",
        symbol: "BNB",
        name: "BNB Chain",
        icon: "assets/icons/bnb.svg",
    },
    Asset {
        id: "tether",
        symbol: "USDT",
        name: "Tether USD",
        icon: "assets/icons/usdt.svg",
    },
    Asset {
        id: "ethereum",
        symbol: "ETH",
        name: "Ethereum",
        icon: "assets/icons/eth.svg",
    },
    Asset {
        id: "solana",
        symbol: "SOL",
        name: "Solana",
        icon: "assets/icons/sol.svg",
    },
    Asset {
        id: "tron",
        symbol: "TRX",
        name: "TRON",
        icon: "assets/icons/trx.svg",
    },
];

pub fn index_of(id: &str) -> Option<usize> {
    ASSETS.iter().position(|a| a.id == id)
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    ASSETS.iter().map(|a| a.id)
}
