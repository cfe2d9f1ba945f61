use alloy_primitives::{Address, U256};

use crate::config::AdapterConfig;
use crate::error::Error;
use crate::instruction;
use crate::pool::{self, PoolCaller};
use crate::transfer::TransferStrategy;
use crate::types::SwapInstruction;

/// Router-facing adapter for Liquidity Party pools.
///
/// Each [`swap`](Self::swap) is decode, pre-fund, invoke, return. Nothing
/// survives between calls; if any step fails the host must discard the
/// effects of the earlier ones. Input the pool does not consume stays at the
/// pool: pre-funded swaps are never refunded.
pub struct SwapAdapter<T, P> {
    transfer: T,
    pools: P,
    config: AdapterConfig,
}

impl<T, P> SwapAdapter<T, P>
where
    T: TransferStrategy,
    P: PoolCaller,
{
    pub fn new(transfer: T, pools: P) -> Self {
        Self::with_config(transfer, pools, AdapterConfig::default())
    }

    pub fn with_config(transfer: T, pools: P, config: AdapterConfig) -> Self {
        Self {
            transfer,
            pools,
            config,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn into_parts(self) -> (T, P) {
        (self.transfer, self.pools)
    }

    pub fn decode_data(&self, data: &[u8]) -> Result<SwapInstruction, Error> {
        instruction::decode(data, self.config.length_policy)
    }

    /// Swaps `given_amount` of the instruction's input token and returns the
    /// amount delivered to the receiver.
    pub fn swap(&mut self, given_amount: U256, data: &[u8]) -> Result<U256, Error> {
        let ix = self.decode_data(data)?;
        if given_amount.is_zero() {
            return Err(Error::ZeroAmount);
        }
        tracing::debug!(
            pool = %ix.pool,
            token_in = %ix.token_in,
            index_in = ix.index_in,
            index_out = ix.index_out,
            receiver = %ix.receiver,
            transfer_type = %ix.transfer_type,
            "decoded swap instruction"
        );

        self.transfer
            .transfer(ix.pool, ix.transfer_type, ix.token_in, given_amount)
            .map_err(|revert| {
                tracing::warn!(pool = %ix.pool, token = %ix.token_in, %revert, "pre-funding rejected");
                Error::FundingFailed {
                    token: ix.token_in,
                    reason: revert.reason,
                }
            })?;
        tracing::debug!(pool = %ix.pool, amount = %given_amount, "pool pre-funded");

        let call = pool::pre_funded_swap_call(&ix, given_amount);
        let result = self.pools.swap(ix.pool, &call).map_err(|revert| {
            tracing::warn!(pool = %ix.pool, %revert, "pool rejected swap");
            Error::PoolRejected {
                pool: ix.pool,
                reason: revert.reason,
            }
        })?;

        if result.amount_in > given_amount {
            return Err(Error::PoolRejected {
                pool: ix.pool,
                reason: format!(
                    "pool reported consuming {} of {given_amount} funded",
                    result.amount_in
                ),
            });
        }

        let dust = given_amount - result.amount_in;
        tracing::debug!(
            pool = %ix.pool,
            amount_in = %result.amount_in,
            amount_out = %result.amount_out,
            fee = %result.fee,
            %dust,
            "swap executed"
        );

        Ok(result.amount_out)
    }

    pub fn protocol_fees_owed(&self, pool: Address) -> Result<Vec<U256>, Error> {
        self.pools
            .all_protocol_fees_owed(pool)
            .map_err(|revert| Error::PoolRejected {
                pool,
                reason: revert.reason,
            })
    }
}
