use alloy_primitives::{Address, U256};

use crate::error::Revert;
use crate::types::TransferType;

/// Moves token value on the adapter's behalf.
///
/// The adapter holds no token-movement capability of its own; every balance
/// change it causes goes through this trait. Implementations must either move
/// exactly `amount` to `receiver` or fail without effect, rejecting tokens
/// whose transfers deliver less than requested.
pub trait TransferStrategy {
    fn transfer(
        &mut self,
        receiver: Address,
        transfer_type: TransferType,
        token: Address,
        amount: U256,
    ) -> Result<(), Revert>;
}

impl<T: TransferStrategy + ?Sized> TransferStrategy for &mut T {
    fn transfer(
        &mut self,
        receiver: Address,
        transfer_type: TransferType,
        token: Address,
        amount: U256,
    ) -> Result<(), Revert> {
        (**self).transfer(receiver, transfer_type, token, amount)
    }
}

impl<T: TransferStrategy + ?Sized> TransferStrategy for Box<T> {
    fn transfer(
        &mut self,
        receiver: Address,
        transfer_type: TransferType,
        token: Address,
        amount: U256,
    ) -> Result<(), Revert> {
        (**self).transfer(receiver, transfer_type, token, amount)
    }
}
