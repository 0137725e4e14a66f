//! Assembly of init, runtime and factory bytecode for deployment tests.

use alloy_primitives::{Bytes, U256};
use revm::bytecode::opcode::{CREATE, CREATE2, MSTORE, PUSH0, RETURN, SSTORE, STOP};

/// A builder for assembling EVM bytecode.
#[derive(Debug, Default)]
pub struct BytecodeBuilder {
    code: Vec<u8>,
}

impl BytecodeBuilder {
    /// Build the bytecode.
    pub fn build(self) -> Bytes {
        self.code.into()
    }

    /// Append a single opcode or byte.
    pub fn append(mut self, opcode: u8) -> Self {
        self.code.push(opcode);
        self
    }

    /// Append a PUSH opcode and the bytes to push.
    pub fn push_bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        let bytes: &[u8] = bytes.as_ref();
        assert!(bytes.len() <= 32);
        self.code.push(PUSH0 + bytes.len() as u8);
        self.code.extend_from_slice(bytes);
        self
    }

    /// Append a PUSH opcode and the number to push, using the minimal width.
    pub fn push_number(self, number: u64) -> Self {
        let bytes = number.to_be_bytes();
        let skip = bytes.iter().take_while(|byte| **byte == 0).count();
        self.push_bytes(&bytes[skip..])
    }

    /// Append a PUSH opcode and the u256 value to push.
    pub fn push_u256(self, value: U256) -> Self {
        self.push_bytes(value.to_be_bytes_vec())
    }

    /// Append a series of MSTORE opcodes to store the given bytes at the given offset.
    pub fn mstore(self, offset: usize, bytes: impl AsRef<[u8]>) -> Self {
        let padded = right_pad_bytes(bytes, 32);
        let mut this = self;
        for (i, chunk) in padded.chunks(32).enumerate() {
            this = this.push_bytes(chunk).push_number((offset + i * 32) as u64).append(MSTORE);
        }
        this
    }

    /// Append a SSTORE opcode to store the given value at the given slot.
    pub fn sstore(self, slot: u64, value: U256) -> Self {
        self.push_u256(value).store_top(slot)
    }

    /// Append a SSTORE opcode storing the top of the stack at the given slot.
    pub fn store_top(self, slot: u64) -> Self {
        self.push_number(slot).append(SSTORE)
    }

    /// Append a STOP opcode.
    pub fn stop(self) -> Self {
        self.append(STOP)
    }

    /// Append a RETURN opcode with the given return data.
    pub fn return_with_data(self, data: impl AsRef<[u8]>) -> Self {
        let data_len = data.as_ref().len();
        self.mstore(0x0, data).push_number(data_len as u64).push_number(0x0).append(RETURN)
    }

    /// Append a CREATE of `init_code`, leaving the created address (or zero) on the stack.
    pub fn create(self, init_code: impl AsRef<[u8]>) -> Self {
        let len = init_code.as_ref().len();
        self.mstore(0x0, init_code)
            .push_number(len as u64)
            .push_number(0x0)
            .push_number(0x0)
            .append(CREATE)
    }

    /// Append a CREATE2 of `init_code` with `salt`, leaving the created address (or zero) on the
    /// stack.
    pub fn create2(self, init_code: impl AsRef<[u8]>, salt: U256) -> Self {
        let len = init_code.as_ref().len();
        self.mstore(0x0, init_code)
            .push_u256(salt)
            .push_number(len as u64)
            .push_number(0x0)
            .push_number(0x0)
            .append(CREATE2)
    }

    /// Init code that deploys `runtime` as the contract's code.
    pub fn deploy(runtime: impl AsRef<[u8]>) -> Bytes {
        Self::default().return_with_data(runtime).build()
    }
}

/// Pads the bytes to the right with 0s to make it a multiple of the length.
pub fn right_pad_bytes(bytes: impl AsRef<[u8]>, multiple_of: usize) -> Vec<u8> {
    let bytes = bytes.as_ref();
    let padding = (multiple_of - (bytes.len() % multiple_of)) % multiple_of;
    [bytes, vec![0u8; padding].as_slice()].concat()
}
