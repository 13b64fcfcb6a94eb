use std::vec::Vec;

use embedded_hal::blocking::i2c::{Write, WriteRead};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockError;

/// One bus transaction as seen on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub(crate) address: u8,
    pub(crate) bytes: Vec<u8>,
    /// Length of the inbound buffer, `None` for write-only transactions.
    pub(crate) read_len: Option<usize>,
}

/// Emulates the chip's register file with pointer auto-increment and
/// records every transaction.
#[derive(Clone, Debug)]
pub(crate) struct MockI2c {
    regs: [u8; 256],
    transactions: Vec<Transaction>,
    fail_at: Option<usize>,
}

impl Default for MockI2c {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            transactions: Vec::new(),
            fail_at: None,
        }
    }
}

impl MockI2c {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    /// Fails the transaction with zero-based index `index`. The failed
    /// attempt is still recorded.
    pub(crate) fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// Outbound bytes of every write-only transaction, in order.
    pub(crate) fn writes(&self) -> Vec<Vec<u8>> {
        self.transactions
            .iter()
            .filter(|t| t.read_len.is_none())
            .map(|t| t.bytes.clone())
            .collect()
    }

    fn record(&mut self, address: u8, bytes: &[u8], read_len: Option<usize>) -> Result<(), MockError> {
        let index = self.transactions.len();
        self.transactions.push(Transaction {
            address,
            bytes: bytes.to_vec(),
            read_len,
        });
        if self.fail_at == Some(index) {
            return Err(MockError);
        }
        Ok(())
    }
}

impl Write for MockI2c {
    type Error = MockError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.record(address, bytes, None)?;
        if let Some((&reg, data)) = bytes.split_first() {
            for (offset, value) in data.iter().enumerate() {
                let addr = reg.wrapping_add(offset as u8);
                self.regs[addr as usize] = *value;
            }
        }
        Ok(())
    }
}

impl WriteRead for MockI2c {
    type Error = MockError;

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.record(address, bytes, Some(buffer.len()))?;
        let reg = bytes.first().copied().unwrap_or(0);
        for (offset, slot) in buffer.iter_mut().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            *slot = self.regs[addr as usize];
        }
        Ok(())
    }
}
