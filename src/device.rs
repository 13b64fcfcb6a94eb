use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::error::Error;
use crate::registers::{
    Control3Reg, FeedbackControlReg, GoReg, LibraryReg, LibrarySelection, Mode, ModeReg, Motor,
    Register, StatusReg, WaveformReg, DEFAULT_AUDIO_MAX, REGISTER_FILE_LEN, WAVEFORM_SLOTS,
};

/// The datasheet address of the driver. All parts share it, so several
/// drivers on one bus can be addressed together to play the same waveform.
pub const ADDRESS: u8 = 0x5a;

/// A DRV2605 on an I2C bus.
///
/// The driver caches nothing; every read goes to the chip. To put several
/// chips on one bus, hand each driver a bus proxy and keep the real bus
/// yourself.
pub struct Drv2605<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Drv2605<I2C>
where
    I2C: WriteRead<Error = E> + Write<Error = E>,
{
    /// Construct a driver instance, but don't do any initialization
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit bus address in use.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Changes the 7-bit bus address, e.g. for a chip behind a translator.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Releases the underlying bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Brings the chip to a known baseline: out of standby, internal
    /// trigger, RTP input and waveform time offsets zeroed, default
    /// audio-to-vibe ceiling, ERM motor, and every control 3 bit except
    /// ERM_OPEN_LOOP cleared.
    ///
    /// The chip needs 250 ms after power-up before it accepts this. The
    /// sequence stops at the first failed transaction.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("drv2605@{=u8:#x}: init", self.address);

        // clears STANDBY
        self.write(Register::Mode, 0x00)?;

        self.set_mode(Mode::InternalTrigger.into())?;
        self.set_realtime_value(0)?;
        self.set_overdrive_time_offset(0)?;
        self.set_sustain_time_offset_positive(0)?;
        self.set_sustain_time_offset_negative(0)?;
        self.set_brake_time_offset(0)?;
        self.write(Register::AudioToVibeMaxInputLevel, DEFAULT_AUDIO_MAX)?;

        self.use_erm()?;

        let current = Control3Reg::from(self.read(Register::Control3)?);
        let mut control3 = Control3Reg::from(0);
        control3.set_erm_open_loop(current.erm_open_loop());
        self.write(Register::Control3, u8::from(control3))
    }

    /// Writes `data` starting at `register` in a single transaction. The
    /// chip auto-increments its register pointer for each byte after the
    /// first.
    pub fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Error<E>> {
        let mut buf = [0u8; REGISTER_FILE_LEN + 1];
        let frame = buf.get_mut(..=data.len()).ok_or(Error::PayloadTooLong)?;
        frame[0] = register;
        frame[1..].copy_from_slice(data);

        #[cfg(feature = "defmt")]
        defmt::trace!("drv2605 write {=u8:#x}: {=[u8]:#x}", register, data);

        self.i2c
            .write(self.address, frame)
            .map_err(Error::Bus)
    }

    /// Read an 8-bit value from `register`
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(Error::Bus)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("drv2605 read {=u8:#x}: {=u8:#x}", register, buf[0]);

        Ok(buf[0])
    }

    fn write(&mut self, register: Register, value: u8) -> Result<(), Error<E>> {
        self.write_register(register.addr(), &[value])
    }

    fn read(&mut self, register: Register) -> Result<u8, Error<E>> {
        self.read_register(register.addr())
    }

    /// Writes the MODE register as is. Values above 7 also land in the
    /// STANDBY and DEV_RESET bits.
    pub fn set_mode(&mut self, mode: u8) -> Result<(), Error<E>> {
        self.write(Register::Mode, mode)
    }

    pub fn mode(&mut self) -> Result<ModeReg, Error<E>> {
        self.read(Register::Mode).map(ModeReg::from)
    }

    pub fn status(&mut self) -> Result<StatusReg, Error<E>> {
        self.read(Register::Status).map(StatusReg::from)
    }

    /// 3: DRV2605, 4: DRV2604, 6: DRV2604L, 7: DRV2605L
    pub fn device_id(&mut self) -> Result<u8, Error<E>> {
        self.status().map(|status| status.device_id())
    }

    /// performs the equivalent operation of power
    /// cycling the device. Any playback operations are immediately interrupted,
    /// and all registers are reset to the default values.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        let mut mode = ModeReg::from(0);
        mode.set_dev_reset(true);
        self.write(Register::Mode, u8::from(mode))
    }

    /// Put the device into standby mode, or wake it up from standby
    pub fn set_standby(&mut self, standby: bool) -> Result<(), Error<E>> {
        let mut mode = ModeReg::from(self.read(Register::Mode)?);
        mode.set_standby(standby);
        self.write(Register::Mode, u8::from(mode))
    }

    /// Selects the library the playback engine uses when GO is set.
    pub fn set_library(&mut self, library: LibrarySelection) -> Result<(), Error<E>> {
        let mut register = LibraryReg::from(self.read(Register::Library)?);
        register.set_library_selection(library as u8);
        self.write(Register::Library, u8::from(register))
    }

    /// Puts the output driver in a true high-impedance state.
    pub fn set_high_impedance_state(&mut self, value: bool) -> Result<(), Error<E>> {
        let mut register = LibraryReg::from(self.read(Register::Library)?);
        register.set_hi_z(value);
        self.write(Register::Library, u8::from(register))
    }

    /// Places waveform `waveform` in sequencer slot `slot` (0-7). Library
    /// waveforms are numbered 1-123. Neither value is checked.
    pub fn set_waveform(&mut self, slot: u8, waveform: u8) -> Result<(), Error<E>> {
        self.write_register(Register::waveform_slot(slot), &[waveform])
    }

    /// Sets all eight sequencer slots in one transaction.
    pub fn set_sequence(&mut self, sequence: &[WaveformReg; WAVEFORM_SLOTS]) -> Result<(), Error<E>> {
        let mut buf = [0u8; WAVEFORM_SLOTS];
        for (byte, entry) in buf.iter_mut().zip(sequence.iter()) {
            *byte = u8::from(*entry);
        }
        self.write_register(Register::WaveformSequence1.addr(), &buf)
    }

    /// Plays `waveform` on its own: slot 0 holds the effect and slot 1
    /// terminates the sequence.
    pub fn set_single_effect(&mut self, waveform: u8) -> Result<(), Error<E>> {
        self.write_register(
            Register::WaveformSequence1.addr(),
            &[
                u8::from(WaveformReg::new_effect(waveform)),
                u8::from(WaveformReg::new_stop()),
            ],
        )
    }

    /// Starts playback of the sequencer via the internal trigger.
    pub fn go(&mut self) -> Result<(), Error<E>> {
        let mut register = GoReg::from(0);
        register.set_go(true);
        self.write(Register::Go, u8::from(register))
    }

    /// Cancels playback.
    pub fn stop(&mut self) -> Result<(), Error<E>> {
        self.write(Register::Go, u8::from(GoReg::from(0)))
    }

    /// GO stays set until the sequence, calibration or diagnostic finishes.
    pub fn is_playing(&mut self) -> Result<bool, Error<E>> {
        self.read(Register::Go).map(|reg| GoReg::from(reg).go())
    }

    /// Drives the actuator directly while in [`Mode::RealTimePlayback`].
    /// The current mode is not checked.
    pub fn set_realtime_value(&mut self, value: u8) -> Result<(), Error<E>> {
        self.write(Register::RealTimePlaybackInput, value)
    }

    /// Adds a signed time offset to the overdrive portion of library
    /// waveforms. Open loop only.
    /// Overdrive Time Offset (ms) = ODT\[7:0\] × PLAYBACK_INTERVAL
    pub fn set_overdrive_time_offset(&mut self, value: i8) -> Result<(), Error<E>> {
        self.write(Register::OverdriveTimeOffset, value as u8)
    }

    /// Sustain-Time Positive Offset (ms) = SPT\[7:0\] × PLAYBACK_INTERVAL
    pub fn set_sustain_time_offset_positive(&mut self, value: i8) -> Result<(), Error<E>> {
        self.write(Register::SustainTimeOffsetPositive, value as u8)
    }

    /// Sustain-Time Negative Offset (ms) = SNT\[7:0\] × PLAYBACK_INTERVAL
    pub fn set_sustain_time_offset_negative(&mut self, value: i8) -> Result<(), Error<E>> {
        self.write(Register::SustainTimeOffsetNegative, value as u8)
    }

    /// Adds a signed time offset to the braking portion of library
    /// waveforms. Open loop only.
    pub fn set_brake_time_offset(&mut self, value: i8) -> Result<(), Error<E>> {
        self.write(Register::BrakeTimeOffset, value as u8)
    }

    /// Selects ERM open-loop (true) or closed-loop (false) operation.
    pub fn set_erm_open_loop(&mut self, open_loop: bool) -> Result<(), Error<E>> {
        let mut control3 = Control3Reg::from(self.read(Register::Control3)?);
        control3.set_erm_open_loop(open_loop);
        self.write(Register::Control3, u8::from(control3))
    }

    /// Use an ERM (eccentric rotating mass) motor. This is the default.
    pub fn use_erm(&mut self) -> Result<(), Error<E>> {
        self.set_motor(Motor::Erm)
    }

    /// Use an LRA (linear resonant actuator) motor.
    pub fn use_lra(&mut self) -> Result<(), Error<E>> {
        self.set_motor(Motor::Lra)
    }

    /// Flips N_ERM_LRA and keeps the rest of the feedback configuration.
    /// The read and the write are separate transactions.
    pub fn set_motor(&mut self, motor: Motor) -> Result<(), Error<E>> {
        let mut feedback = FeedbackControlReg::from(self.read(Register::FeedbackControl)?);
        feedback.set_n_erm_lra(motor == Motor::Lra);

        #[cfg(feature = "defmt")]
        defmt::debug!("drv2605@{=u8:#x}: motor {}", self.address, motor);

        self.write(Register::FeedbackControl, u8::from(feedback))
    }

    pub fn motor(&mut self) -> Result<Motor, Error<E>> {
        self.read(Register::FeedbackControl)
            .map(|reg| FeedbackControlReg::from(reg).motor())
    }
}
