/// Errors returned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transaction failed. Carries the transport's error unchanged.
    Bus(E),
    /// A register write payload runs past the end of the register file.
    /// Nothing was sent.
    PayloadTooLong,
}

