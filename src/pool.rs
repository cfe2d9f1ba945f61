use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, sol};

use crate::error::Revert;
use crate::types::{FundingSelector, SwapInstruction, SwapResult};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IPartyPool {
        function swap(
            address payer,
            bytes4 fundingSelector,
            address receiver,
            uint256 inputTokenIndex,
            uint256 outputTokenIndex,
            uint256 maxAmountIn,
            int128 limitPrice,
            uint256 deadline,
            bool unwrap,
            bytes cbData
        ) external payable returns (uint256 amountIn, uint256 amountOut, uint256 inFee);

        function allProtocolFeesOwed() external view returns (uint256[] memory);
    }
}

/// Invokes pool contracts by address.
///
/// Implementations backed by an EVM encode the call with
/// [`SolCall::abi_encode`] and decode the reply with
/// [`SwapResult::from_return_data`]. Any revert, including malformed return
/// data, is reported as a [`Revert`].
pub trait PoolCaller {
    fn swap(&mut self, pool: Address, call: &IPartyPool::swapCall) -> Result<SwapResult, Revert>;

    fn all_protocol_fees_owed(&self, pool: Address) -> Result<Vec<U256>, Revert>;
}

impl<P: PoolCaller + ?Sized> PoolCaller for &mut P {
    fn swap(&mut self, pool: Address, call: &IPartyPool::swapCall) -> Result<SwapResult, Revert> {
        (**self).swap(pool, call)
    }

    fn all_protocol_fees_owed(&self, pool: Address) -> Result<Vec<U256>, Revert> {
        (**self).all_protocol_fees_owed(pool)
    }
}

/// Marshals a swap against tokens already sitting at the pool.
///
/// Payer is unused under pre-funding, and the limit price and deadline are
/// both disabled (zero).
pub fn pre_funded_swap_call(ix: &SwapInstruction, max_amount_in: U256) -> IPartyPool::swapCall {
    IPartyPool::swapCall {
        payer: Address::ZERO,
        fundingSelector: FundingSelector::PRE_FUNDED.into_inner(),
        receiver: ix.receiver,
        inputTokenIndex: U256::from(ix.index_in),
        outputTokenIndex: U256::from(ix.index_out),
        maxAmountIn: max_amount_in,
        limitPrice: 0,
        deadline: U256::ZERO,
        unwrap: false,
        cbData: Bytes::new(),
    }
}

impl From<IPartyPool::swapReturn> for SwapResult {
    fn from(ret: IPartyPool::swapReturn) -> Self {
        Self {
            amount_in: ret.amountIn,
            amount_out: ret.amountOut,
            fee: ret.inFee,
        }
    }
}

impl SwapResult {
    pub fn from_return_data(data: &[u8]) -> Result<Self, Revert> {
        IPartyPool::swapCall::abi_decode_returns(data)
            .map(Self::from)
            .map_err(|e| Revert::new(format!("malformed swap return data: {e}")))
    }
}

pub fn protocol_fees_from_return_data(data: &[u8]) -> Result<Vec<U256>, Revert> {
    IPartyPool::allProtocolFeesOwedCall::abi_decode_returns(data)
        .map_err(|e| Revert::new(format!("malformed protocol fee data: {e}")))
}
