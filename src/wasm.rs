use std::str::FromStr;

use alloy_primitives::{U256, hex};
use alloy_sol_types::SolCall;
use wasm_bindgen::prelude::*;

use crate::config::LengthPolicy;
use crate::instruction;
use crate::pool;
use crate::types::{SwapInstruction, TransferType};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

fn parse_policy(policy: Option<String>) -> Option<LengthPolicy> {
    match policy {
        None => Some(LengthPolicy::Exact),
        Some(s) => s.parse::<LengthPolicy>().ok(),
    }
}

fn decode_hex_instruction(
    data_hex: &str,
    policy: Option<String>,
) -> Result<SwapInstruction, String> {
    let Some(policy) = parse_policy(policy) else {
        return Err("Unknown length policy".to_string());
    };
    let data = hex::decode(data_hex).map_err(|e| format!("Invalid hex: {e}"))?;
    instruction::decode(&data, policy).map_err(|e| e.to_string())
}

/// Decode a hex instruction into `{pool, tokenIn, indexIn, indexOut, receiver, transferType}`.
#[wasm_bindgen]
pub fn decode_instruction(data_hex: &str, policy: Option<String>) -> JsValue {
    match decode_hex_instruction(data_hex, policy) {
        Ok(ix) => serde_wasm_bindgen::to_value(&ix).unwrap_or(JsValue::NULL),
        Err(msg) => error_result(&msg),
    }
}

/// Encode an instruction given as JSON into `0x`-prefixed hex.
#[wasm_bindgen]
pub fn encode_instruction(json: &str) -> JsValue {
    match serde_json::from_str::<SwapInstruction>(json) {
        Ok(ix) => to_js(&serde_json::Value::String(hex::encode_prefixed(ix.encode()))),
        Err(e) => error_result(&format!("Invalid instruction JSON: {e}")),
    }
}

/// Build the pool `swap` calldata the adapter would send for this instruction.
#[wasm_bindgen]
pub fn pre_funded_swap_calldata(data_hex: &str, amount: &str) -> JsValue {
    let ix = match decode_hex_instruction(data_hex, None) {
        Ok(ix) => ix,
        Err(msg) => return error_result(&msg),
    };
    let Ok(amount) = U256::from_str(amount) else {
        return error_result("Invalid amount");
    };
    if amount.is_zero() {
        return error_result("Amount must be positive");
    }
    let calldata = pool::pre_funded_swap_call(&ix, amount).abi_encode();
    let obj = serde_json::json!({
        "pool": ix.pool,
        "calldata": hex::encode_prefixed(calldata),
    });
    to_js(&obj)
}

/// Transfer type names keyed by their wire byte.
#[wasm_bindgen]
pub fn get_transfer_types() -> JsValue {
    let result: serde_json::Map<String, serde_json::Value> = TransferType::ALL
        .iter()
        .map(|tt| {
            (
                (*tt as u8).to_string(),
                serde_json::Value::String(tt.as_ref().to_string()),
            )
        })
        .collect();
    to_js(&serde_json::Value::Object(result))
}
