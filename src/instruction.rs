//! Fixed-width router instruction for a single pool swap.
//!
//! Layout, no length prefix, no padding, no version tag:
//!
//! | bytes   | field          |
//! |---------|----------------|
//! | 0..20   | pool           |
//! | 20..40  | token_in       |
//! | 40      | index_in       |
//! | 41      | index_out      |
//! | 42..62  | receiver       |
//! | 62      | transfer_type  |
//!
//! Reordering or resizing any field is a breaking protocol change.

use alloy_primitives::Address;
use alloy_sol_types::SolValue;

use crate::config::LengthPolicy;
use crate::error::Error;
use crate::types::{SwapInstruction, TransferType};

pub const POOL_OFFSET: usize = 0;
pub const TOKEN_IN_OFFSET: usize = 20;
pub const INDEX_IN_OFFSET: usize = 40;
pub const INDEX_OUT_OFFSET: usize = 41;
pub const RECEIVER_OFFSET: usize = 42;
pub const TRANSFER_TYPE_OFFSET: usize = 62;
pub const SWAP_INSTRUCTION_LEN: usize = 63;

const ADDRESS_LEN: usize = 20;

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, field: &'static str, width: usize) -> Result<&'a [u8], Error> {
        let end = self.offset + width;
        let bytes = self.data.get(self.offset..end).ok_or(Error::OutOfBounds {
            field,
            offset: self.offset,
            end,
            len: self.data.len(),
        })?;
        self.offset = end;
        Ok(bytes)
    }

    fn address(&mut self, field: &'static str) -> Result<Address, Error> {
        self.take(field, ADDRESS_LEN).map(Address::from_slice)
    }

    fn byte(&mut self, field: &'static str) -> Result<u8, Error> {
        Ok(self.take(field, 1)?[0])
    }
}

/// Decodes one instruction, reading fields strictly left to right.
///
/// Truncated input fails on the first field that cannot be read. A transfer
/// type outside `0..=2` fails after every other field was read.
pub fn decode(data: &[u8], policy: LengthPolicy) -> Result<SwapInstruction, Error> {
    if policy == LengthPolicy::Exact && data.len() > SWAP_INSTRUCTION_LEN {
        return Err(Error::TrailingBytes {
            expected: SWAP_INSTRUCTION_LEN,
            len: data.len(),
        });
    }

    let mut reader = Reader::new(data);
    let pool = reader.address("pool")?;
    let token_in = reader.address("token_in")?;
    let index_in = reader.byte("index_in")?;
    let index_out = reader.byte("index_out")?;
    let receiver = reader.address("receiver")?;
    let raw_transfer_type = reader.byte("transfer_type")?;
    let transfer_type =
        TransferType::from_repr(raw_transfer_type).ok_or(Error::InvalidEnum {
            field: "transfer_type",
            value: raw_transfer_type,
        })?;

    Ok(SwapInstruction {
        pool,
        token_in,
        index_in,
        index_out,
        receiver,
        transfer_type,
    })
}

/// Packs an instruction into the exact bytes [`decode`] accepts.
pub fn encode(ix: &SwapInstruction) -> Vec<u8> {
    (
        ix.pool,
        ix.token_in,
        [ix.index_in],
        [ix.index_out],
        ix.receiver,
        [ix.transfer_type as u8],
    )
        .abi_encode_packed()
}

impl SwapInstruction {
    /// Builds an instruction by locating `token_in` and `token_out` in the
    /// pool's ordered asset list.
    pub fn for_pool(
        pool: Address,
        pool_tokens: &[Address],
        token_in: Address,
        token_out: Address,
        receiver: Address,
        transfer_type: TransferType,
    ) -> Result<Self, Error> {
        Ok(Self {
            pool,
            token_in,
            index_in: token_index(pool_tokens, token_in)?,
            index_out: token_index(pool_tokens, token_out)?,
            receiver,
            transfer_type,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }
}

fn token_index(pool_tokens: &[Address], token: Address) -> Result<u8, Error> {
    let index = pool_tokens
        .iter()
        .position(|candidate| *candidate == token)
        .ok_or(Error::TokenNotInPool { token })?;
    u8::try_from(index).map_err(|_| Error::IndexOverflow { index })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};

    const POOL: Address = address!("fa0be6148f66a6499666cf790d647d00dab76904");
    const USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const WSOL: Address = address!("d31a59c85ae9d8edefec411d448f90841571b89c");
    const BOB: Address = address!("1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e");

    fn mainnet_tokens() -> Vec<Address> {
        vec![
            address!("dac17f958d2ee523a2206206994597c13d831ec7"),
            USDC,
            address!("2260fac5e5542a773aa44fbcfedf7c193bc2c599"),
            address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984"),
            WSOL,
        ]
    }

    fn sample() -> SwapInstruction {
        SwapInstruction {
            pool: POOL,
            token_in: USDC,
            index_in: 1,
            index_out: 5,
            receiver: BOB,
            transfer_type: TransferType::Transfer,
        }
    }

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    fn random_bytes(state: &mut u64, len: usize) -> Vec<u8> {
        (0..len).map(|_| (lcg_next(state) >> 33) as u8).collect()
    }

    #[test]
    fn field_offsets_tile_the_instruction() {
        assert_eq!(TOKEN_IN_OFFSET, POOL_OFFSET + ADDRESS_LEN);
        assert_eq!(INDEX_IN_OFFSET, TOKEN_IN_OFFSET + ADDRESS_LEN);
        assert_eq!(INDEX_OUT_OFFSET, INDEX_IN_OFFSET + 1);
        assert_eq!(RECEIVER_OFFSET, INDEX_OUT_OFFSET + 1);
        assert_eq!(TRANSFER_TYPE_OFFSET, RECEIVER_OFFSET + ADDRESS_LEN);
        assert_eq!(SWAP_INSTRUCTION_LEN, TRANSFER_TYPE_OFFSET + 1);
    }

    #[test]
    fn encode_matches_known_layout() {
        let encoded = sample().encode();
        assert_eq!(
            hex::encode(&encoded),
            concat!(
                "fa0be6148f66a6499666cf790d647d00dab76904",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "01",
                "05",
                "1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e",
                "01",
            )
        );
        assert_eq!(encoded.len(), SWAP_INSTRUCTION_LEN);
    }

    #[test]
    fn decode_reads_absolute_offsets() {
        let mut data = vec![0_u8; SWAP_INSTRUCTION_LEN];
        data[POOL_OFFSET..TOKEN_IN_OFFSET].copy_from_slice(POOL.as_slice());
        data[TOKEN_IN_OFFSET..INDEX_IN_OFFSET].copy_from_slice(USDC.as_slice());
        data[INDEX_IN_OFFSET] = 1;
        data[INDEX_OUT_OFFSET] = 5;
        data[RECEIVER_OFFSET..TRANSFER_TYPE_OFFSET].copy_from_slice(BOB.as_slice());
        data[TRANSFER_TYPE_OFFSET] = 1;

        assert_eq!(decode(&data, LengthPolicy::Exact).unwrap(), sample());
    }

    #[test]
    fn zero_receiver_is_accepted() {
        let ix = SwapInstruction {
            receiver: Address::ZERO,
            ..sample()
        };
        assert_eq!(decode(&ix.encode(), LengthPolicy::Exact).unwrap(), ix);
    }

    #[test]
    fn truncated_input_names_first_unreadable_field() {
        let data = sample().encode();
        let cases = [
            (0, "pool"),
            (19, "pool"),
            (20, "token_in"),
            (39, "token_in"),
            (40, "index_in"),
            (41, "index_out"),
            (42, "receiver"),
            (61, "receiver"),
            (62, "transfer_type"),
        ];
        for (len, expected_field) in cases {
            let err = decode(&data[..len], LengthPolicy::Exact).unwrap_err();
            let Error::OutOfBounds {
                field, len: got, ..
            } = err
            else {
                panic!("expected OutOfBounds for len {len}, got {err:?}");
            };
            assert_eq!(field, expected_field, "len {len}");
            assert_eq!(got, len);
        }
    }

    #[test]
    fn truncation_wins_over_bad_transfer_type() {
        let mut data = sample().encode();
        data[TRANSFER_TYPE_OFFSET] = 9;
        let err = decode(&data[..TRANSFER_TYPE_OFFSET], LengthPolicy::Exact).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn undefined_transfer_type_is_invalid_enum() {
        let mut data = sample().encode();
        data[TRANSFER_TYPE_OFFSET] = 3;
        let err = decode(&data, LengthPolicy::Exact).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEnum {
                field: "transfer_type",
                value: 3
            }
        ));
    }

    #[test]
    fn trailing_bytes_follow_length_policy() {
        let mut data = sample().encode();
        data.extend_from_slice(&[0xff; 5]);

        let err = decode(&data, LengthPolicy::Exact).unwrap_err();
        assert!(matches!(
            err,
            Error::TrailingBytes {
                expected: SWAP_INSTRUCTION_LEN,
                len: 68
            }
        ));

        assert_eq!(decode(&data, LengthPolicy::Prefix).unwrap(), sample());
    }

    #[test]
    fn for_pool_resolves_indexes() {
        let ix = SwapInstruction::for_pool(
            POOL,
            &mainnet_tokens(),
            USDC,
            WSOL,
            BOB,
            TransferType::Transfer,
        )
        .unwrap();
        assert_eq!(ix, sample());
    }

    #[test]
    fn for_pool_rejects_unlisted_token() {
        let stranger = Address::repeat_byte(0x42);
        let err = SwapInstruction::for_pool(
            POOL,
            &mainnet_tokens(),
            USDC,
            stranger,
            BOB,
            TransferType::None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::TokenNotInPool { token } if token == stranger));
    }

    #[test]
    fn for_pool_rejects_index_beyond_one_byte() {
        let mut tokens: Vec<Address> = (0..=256_u16)
            .map(|i| {
                let mut raw = [0_u8; 20];
                raw[18..].copy_from_slice(&i.to_be_bytes());
                Address::from(raw)
            })
            .collect();
        let last = Address::repeat_byte(0xee);
        tokens.push(last);
        let err = SwapInstruction::for_pool(
            POOL,
            &tokens,
            tokens[0],
            last,
            BOB,
            TransferType::Transfer,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IndexOverflow { index: 257 }));
    }

    #[test]
    fn random_valid_instructions_roundtrip_bytes() {
        let mut seed = 0x5EED_u64;
        for _ in 0..5_000 {
            let mut data = random_bytes(&mut seed, SWAP_INSTRUCTION_LEN);
            data[TRANSFER_TYPE_OFFSET] = (lcg_next(&mut seed) % 3) as u8;
            let ix = decode(&data, LengthPolicy::Exact).unwrap();
            assert_eq!(encode(&ix), data);
        }
    }

    #[test]
    fn random_short_inputs_are_out_of_bounds() {
        let mut seed = 0xB0B_u64;
        for _ in 0..5_000 {
            let len = (lcg_next(&mut seed) % SWAP_INSTRUCTION_LEN as u64) as usize;
            let data = random_bytes(&mut seed, len);
            for policy in [LengthPolicy::Exact, LengthPolicy::Prefix] {
                assert!(matches!(
                    decode(&data, policy),
                    Err(Error::OutOfBounds { .. })
                ));
            }
        }
    }

    #[test]
    fn random_bad_tags_are_invalid_enum() {
        let mut seed = 0xBAD_u64;
        for _ in 0..5_000 {
            let mut data = random_bytes(&mut seed, SWAP_INSTRUCTION_LEN);
            let tag = 3 + (lcg_next(&mut seed) % 253) as u8;
            data[TRANSFER_TYPE_OFFSET] = tag;
            assert!(matches!(
                decode(&data, LengthPolicy::Exact),
                Err(Error::InvalidEnum { value, .. }) if value == tag
            ));
        }
    }
}
