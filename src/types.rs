use alloy_primitives::{Address, FixedBytes, U256};
use serde::{Deserialize, Serialize};

/// How the transfer strategy moves the input token to the pool.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::FromRepr,
)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransferType {
    /// Tokens already sit at the destination; nothing is moved.
    None = 0,
    /// Move tokens held by the caller itself.
    Transfer = 1,
    /// Pull tokens from the user under a standing authorization.
    TransferFrom = 2,
}

impl TransferType {
    pub const ALL: [Self; 3] = [Self::None, Self::Transfer, Self::TransferFrom];

    pub fn moves_funds(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A decoded router instruction targeting one pool swap.
///
/// Lives for a single adapter call. Field validity (pool code, asset
/// indexes, receiver) is left to the pool; the decoder only projects bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInstruction {
    pub pool: Address,
    pub token_in: Address,
    pub index_in: u8,
    pub index_out: u8,
    pub receiver: Address,
    pub transfer_type: TransferType,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum FundingMode {
    /// The pool pulls tokens from the payer under an existing approval.
    AlreadyApproved,
    /// The pool trusts its own balance delta; unused input is never refunded.
    PreFunded,
    /// The pool calls back into the payer, which may settle any amount.
    Callback,
}

/// Four-byte tag telling the pool how its input will be funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FundingSelector(pub FixedBytes<4>);

impl FundingSelector {
    pub const APPROVALS: Self = Self(FixedBytes::new([0, 0, 0, 0]));
    pub const PRE_FUNDED: Self = Self(FixedBytes::new([0, 0, 0, 1]));

    pub fn mode(self) -> FundingMode {
        if self == Self::APPROVALS {
            FundingMode::AlreadyApproved
        } else if self == Self::PRE_FUNDED {
            FundingMode::PreFunded
        } else {
            FundingMode::Callback
        }
    }

    pub fn is_callback(self) -> bool {
        self.mode() == FundingMode::Callback
    }

    pub fn into_inner(self) -> FixedBytes<4> {
        self.0
    }
}

impl From<FixedBytes<4>> for FundingSelector {
    fn from(tag: FixedBytes<4>) -> Self {
        Self(tag)
    }
}

/// Amounts reported by the pool for one swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapResult {
    /// Input actually consumed, fee included.
    pub amount_in: U256,
    /// Output delivered to the receiver.
    pub amount_out: U256,
    /// Portion of `amount_in` taken as fee.
    pub fee: U256,
}
