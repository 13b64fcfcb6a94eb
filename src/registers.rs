//! Register addresses, mode values and bit-level views of the DRV2605
//! register file.

use bitfield::bitfield;

/// Motor-type bit (N_ERM_LRA) in the feedback control register.
pub const FEEDBACK_N_ERM_LRA: u8 = 0x80;

/// ERM_OPEN_LOOP bit in control register 3.
pub const CONTROL3_ERM_OPEN_LOOP: u8 = 0x20;

/// GO bit in the go register.
pub const GO_BIT: u8 = 0x01;

/// Audio-to-vibe maximum input level written by `init`.
pub const DEFAULT_AUDIO_MAX: u8 = 0x64;

/// Number of addressable bytes in the register file (0x00..=0x22).
pub const REGISTER_FILE_LEN: usize = 0x23;

/// Number of waveform sequencer slots.
pub const WAVEFORM_SLOTS: usize = 8;

/// Register addresses as documented in the datasheet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Status = 0x00,
    Mode = 0x01,
    /// Entry point for real-time playback data. Driven to the load while
    /// MODE\[2:0\] = 5. Interpreted as signed unless DATA_FORMAT_RTP is set
    /// in control register 3.
    RealTimePlaybackInput = 0x02,
    /// Library selection and HI_Z.
    Library = 0x03,
    WaveformSequence1 = 0x04,
    WaveformSequence2 = 0x05,
    WaveformSequence3 = 0x06,
    WaveformSequence4 = 0x07,
    WaveformSequence5 = 0x08,
    WaveformSequence6 = 0x09,
    WaveformSequence7 = 0x0a,
    WaveformSequence8 = 0x0b,
    Go = 0x0c,
    OverdriveTimeOffset = 0x0d,
    SustainTimeOffsetPositive = 0x0e,
    SustainTimeOffsetNegative = 0x0f,
    BrakeTimeOffset = 0x10,
    AudioToVibeControl = 0x11,
    AudioToVibeMinInputLevel = 0x12,
    AudioToVibeMaxInputLevel = 0x13,
    AudioToVibeMinOutputDrive = 0x14,
    AudioToVibeMaxOutputDrive = 0x15,

    /// Reference voltage for full-scale output during closed-loop operation.
    /// Must hold the motor's rated voltage before auto calibration runs.
    RatedVoltage = 0x16,

    /// Clamp for automatic overdrive in closed loop, full-scale reference in
    /// open loop.
    OverdriveClampVoltage = 0x17,

    /// Voltage-compensation result of auto calibration.
    /// Coefficient = 1 + A_CAL_COMP\[7:0\] / 255
    AutoCalibrationCompensationResult = 0x18,

    /// Rated back-EMF result of auto calibration.
    /// Back-EMF (V) = (A_CAL_BEMF\[7:0\] / 255) × 1.22 V / BEMF_GAIN\[1:0\]
    AutoCalibrationBackEmfResult = 0x19,

    FeedbackControl = 0x1a,
    Control1 = 0x1b,
    Control2 = 0x1c,
    Control3 = 0x1d,
    Control4 = 0x1e,
    VbatVoltageMonitor = 0x21,
    LraResonancePeriod = 0x22,
}

impl Register {
    /// The raw register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Address of waveform sequencer slot `slot`, where slot 0 is
    /// `WaveformSequence1`. The slot is not range checked.
    pub const fn waveform_slot(slot: u8) -> u8 {
        (Register::WaveformSequence1 as u8).wrapping_add(slot)
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register.addr()
    }
}

/// Value of MODE\[2:0\].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Waveforms are fired by setting the GO bit.
    InternalTrigger = 0,
    /// A rising edge on IN/TRIG sets GO. A second rising edge cancels the
    /// waveform if GO has not cleared yet.
    ExternalTriggerRisingEdge = 1,
    /// GO follows the level of IN/TRIG.
    ExternalTriggerLevel = 2,
    /// A PWM or analog signal on IN/TRIG is the driving source, selected by
    /// N_PWM_ANALOG.
    PwmInputAndAnalogInput = 3,
    /// An AC-coupled audio signal on IN/TRIG is converted to vibration.
    /// AC_COUPLE and N_PWM_ANALOG should also be set.
    AudioToVibe = 4,
    /// The actuator is driven with the contents of the RTP input register.
    RealTimePlayback = 5,
    /// Setting GO runs an actuator diagnostic. DIAG_RESULT holds the outcome.
    Diagnostics = 6,
    /// Setting GO runs auto calibration.
    AutoCalibration = 7,
}

impl From<u8> for Mode {
    fn from(val: u8) -> Mode {
        match val & 0x07 {
            0 => Mode::InternalTrigger,
            1 => Mode::ExternalTriggerRisingEdge,
            2 => Mode::ExternalTriggerLevel,
            3 => Mode::PwmInputAndAnalogInput,
            4 => Mode::AudioToVibe,
            5 => Mode::RealTimePlayback,
            6 => Mode::Diagnostics,
            _ => Mode::AutoCalibration,
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode as u8
    }
}

/// ROM library used by the playback engine when GO is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LibrarySelection {
    Empty = 0,
    A = 1,
    B = 2,
    C = 3,
    D = 4,
    E = 5,
    Lra = 6,
    Reserved = 7,
}

impl From<u8> for LibrarySelection {
    fn from(val: u8) -> LibrarySelection {
        match val & 0x07 {
            0 => LibrarySelection::Empty,
            1 => LibrarySelection::A,
            2 => LibrarySelection::B,
            3 => LibrarySelection::C,
            4 => LibrarySelection::D,
            5 => LibrarySelection::E,
            6 => LibrarySelection::Lra,
            _ => LibrarySelection::Reserved,
        }
    }
}

/// Actuator type selected by the N_ERM_LRA bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    /// Eccentric rotating mass. Power-on default.
    Erm,
    /// Linear resonant actuator.
    Lra,
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct StatusReg(u8);
    impl Debug;
    /// Latching overcurrent flag. Set when the load impedance drops below
    /// the threshold and the device shuts down.
    pub oc_detected, _: 0;
    /// Latching overtemperature flag. Clears upon read.
    pub over_temp, _: 1;
    /// ERM back-EMF has been zero for ~10 ms, or the LRA tracker lost
    /// frequency lock. Debug only. Clears upon read.
    pub feedback_controller_timed_out, _: 2;
    /// Result of whichever of auto calibration or diagnostics ran last.
    /// Not valid until GO self-clears.
    /// 0: passed / actuator functioning
    /// 1: failed / actuator missing, shorted or out of range
    pub diagnostic_result, _: 3;
    /// 3: DRV2605, 4: DRV2604, 6: DRV2604L, 7: DRV2605L
    pub device_id, _: 7, 5;
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ModeReg(u8);
    impl Debug;
    /// Equivalent of a power cycle. Self-clears once the reset completes.
    pub dev_reset, set_dev_reset: 7;
    /// Software standby.
    pub standby, set_standby: 6;
    pub into Mode, mode, set_mode: 2, 0;
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct LibraryReg(u8);
    impl Debug;
    /// True high-impedance output. Takes effect immediately, even mid
    /// transaction.
    pub hi_z, set_hi_z: 4;
    pub into LibrarySelection, library_selection, set_library_selection: 2, 0;
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct WaveformReg(u8);
    impl Debug;
    /// When set, the low seven bits are a wait time of 10 ms units instead
    /// of a waveform identifier.
    pub wait, set_wait: 7;
    /// Waveform identifier into the ROM library. The sequencer plays slots
    /// 0x04 through 0x0B in order and stops at the first zero.
    pub waveform_seq, set_waveform_seq: 6, 0;
}

impl WaveformReg {
    /// Terminates the sequence.
    pub fn new_stop() -> Self {
        WaveformReg(0)
    }

    /// Plays library waveform `id`.
    pub fn new_effect(id: u8) -> Self {
        let mut w = WaveformReg(0);
        w.set_waveform_seq(id);
        w
    }

    /// Idles for `tens_of_ms` × 10 ms before the next slot.
    pub fn new_wait_time(tens_of_ms: u8) -> Self {
        let mut w = WaveformReg(0);
        w.set_wait(true);
        w.set_waveform_seq(tens_of_ms);
        w
    }
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct GoReg(u8);
    impl Debug;
    /// Fires the process selected by MODE\[2:0\]. Stays high until the
    /// sequence completes. Clearing it cancels playback.
    pub go, set_go: 0;
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct FeedbackControlReg(u8);
    impl Debug;
    /// 0: ERM, 1: LRA. Set before running auto calibration.
    pub n_erm_lra, set_n_erm_lra: 7;
    /// Braking to driving gain ratio.
    /// 0: 1x, 1: 2x, 2: 3x, 3: 4x, 4: 6x, 5: 8x, 6: 16x, 7: braking disabled
    pub fb_brake_factor, set_fb_brake_factor: 6, 4;
    /// 0: low, 1: medium (default), 2: high, 3: very high
    pub loop_gain, set_loop_gain: 3, 2;
    /// Back-EMF amplifier gain. Populated by auto calibration.
    pub bemf_gain, set_bemf_gain: 1, 0;
}

impl FeedbackControlReg {
    pub fn motor(&self) -> Motor {
        if self.n_erm_lra() {
            Motor::Lra
        } else {
            Motor::Erm
        }
    }
}

bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Control3Reg(u8);
    impl Debug;
    /// Noise-gate threshold for PWM and analog inputs.
    /// 0: disabled, 1: 2%, 2: 4% (default), 3: 8%
    pub ng_thresh, set_ng_thresh: 7, 6;
    /// 0: closed loop, 1: open loop (ERM only)
    pub erm_open_loop, set_erm_open_loop: 5;
    pub supply_comp_dis, set_supply_comp_dis: 4;
    /// RTP input interpretation. 0: signed, 1: unsigned
    pub data_format_rtp, set_data_format_rtp: 3;
    /// 0: LRA drive amplitude updated once per cycle, 1: twice per cycle
    pub lra_drive_mode, set_lra_drive_mode: 2;
    /// IN/TRIG input when MODE\[2:0\] = 3. 0: PWM, 1: analog
    pub n_pwm_analog, set_n_pwm_analog: 1;
    /// 0: auto-resonance, 1: LRA open loop
    pub lra_open_loop, set_lra_open_loop: 0;
}

macro_rules! raw_register {
    ($($reg:ident),* $(,)?) => {
        $(
            impl From<u8> for $reg {
                fn from(raw: u8) -> Self {
                    $reg(raw)
                }
            }

            impl From<$reg> for u8 {
                fn from(reg: $reg) -> u8 {
                    reg.0
                }
            }
        )*
    };
}

raw_register!(
    StatusReg,
    ModeReg,
    LibraryReg,
    WaveformReg,
    GoReg,
    FeedbackControlReg,
    Control3Reg,
);
