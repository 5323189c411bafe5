//! Injected EIP-1193 wallet provider (`window.ethereum`).

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use iv_api_types::{CallRequest, RpcRequest, TransactionReceipt, TransactionRequest};
use iv_contract::EthereumProvider;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type Eip1193;

    #[wasm_bindgen(method, catch)]
    fn request(this: &Eip1193, args: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Clone, Debug)]
pub struct BrowserProvider {
    inner: Eip1193,
}

impl BrowserProvider {
    /// `None` when no wallet extension injected a provider.
    pub fn detect() -> Option<Self> {
        let window = gloo_utils::window();
        let value = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        Some(Self {
            inner: value.unchecked_into(),
        })
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T> {
        let req = RpcRequest {
            method: method.to_owned(),
            params,
        };
        let args = req
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| anyhow!("{method}: {e}"))?;
        let promise = self.inner.request(&args).map_err(js_error)?;
        let result = JsFuture::from(promise).await.map_err(js_error)?;
        serde_wasm_bindgen::from_value(result).map_err(|e| anyhow!("{method}: {e}"))
    }
}

/// Wallet errors are `{code, message}` objects; fall back to the debug form.
fn js_error(value: JsValue) -> anyhow::Error {
    let message = js_sys::Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    anyhow!(message)
}

#[async_trait(?Send)]
impl EthereumProvider for BrowserProvider {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        self.rpc("eth_requestAccounts", Vec::new()).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String> {
        self.rpc("eth_sendTransaction", vec![serde_json::to_value(tx)?])
            .await
    }

    async fn call(&self, req: &CallRequest) -> Result<String> {
        self.rpc("eth_call", vec![serde_json::to_value(req)?, json!("latest")])
            .await
    }

    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>> {
        self.rpc("eth_getTransactionReceipt", vec![json!(tx_hash)])
            .await
    }

    async fn balance(&self, account: &str) -> Result<String> {
        self.rpc("eth_getBalance", vec![json!(account), json!("latest")])
            .await
    }

    async fn pause(&self, millis: u32) {
        TimeoutFuture::new(millis).await;
    }
}
