#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod config;
pub mod error;
pub mod executor;
pub mod instruction;
pub mod pool;
pub mod transfer;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{AdapterConfig, LengthPolicy};
pub use error::{Error, Revert};
pub use executor::SwapAdapter;
pub use instruction::{SWAP_INSTRUCTION_LEN, decode, encode};
pub use pool::{IPartyPool, PoolCaller, pre_funded_swap_call};
pub use transfer::TransferStrategy;
pub use types::{FundingMode, FundingSelector, SwapInstruction, SwapResult, TransferType};
