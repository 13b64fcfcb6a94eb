/*!
A platform agnostic Rust driver for the drv2605 haptic driver, based on the
[`embedded-hal`] blocking I2C traits.

The driver is a thin layer over the chip's register file: every operation is
one or more synchronous register transactions, and nothing is cached.

```rust,ignore
use drv2605_i2c::{Drv2605, Mode, ADDRESS};

// at least 250 ms after the supply came up
let mut haptic = Drv2605::new(i2c, ADDRESS);
haptic.init()?;
haptic.set_waveform(0, 47)?;
haptic.set_waveform(1, 0)?;
haptic.go()?;

haptic.set_mode(Mode::RealTimePlayback.into())?;
haptic.set_realtime_value(0x40)?;
```

Enable the `defmt` feature to trace register traffic.

[`embedded-hal`]: https://docs.rs/embedded-hal/~0.2
*/
#![cfg_attr(not(test), no_std)]

mod device;
mod error;
pub mod registers;

#[cfg(test)]
mod testing;

pub use device::{Drv2605, ADDRESS};
pub use error::Error;
pub use registers::{
    Control3Reg, FeedbackControlReg, GoReg, LibraryReg, LibrarySelection, Mode, ModeReg, Motor,
    Register, StatusReg, WaveformReg,
};
