//! Testing infrastructure (mock bus).

pub(crate) mod mock;

pub(crate) use mock::{MockError, MockI2c, Transaction};
