//! Bit-banged shift register output
//!
//! Clocks a frame into a serial-in/parallel-out driver chip over two or
//! three GPIO lines:
//!
//! - `CLOCK`: data is sampled on the rising edge
//! - `DATA`: serial segment data
//! - `LOAD`: latch pulse or data enable, depending on the chip
//!
//! The clock idles low. Chips with a data enable line keep it high while
//! idle and pull it low for the duration of the transfer.

use core::fmt;
use core::marker::PhantomData;

use embedded_hal::digital::{self, ErrorType, OutputPin};
use segmask_core::config::ChipDescriptor;
use segmask_core::traits::{Frame, SegmentSink};

/// Placeholder for a missing load line
///
/// Shares the error type of the other pins so a two-wire register has the
/// same type shape as a three-wire one.
pub struct NoPin<E> {
    _error: PhantomData<E>,
}

impl<E> NoPin<E> {
    /// Create the placeholder
    pub const fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Default for NoPin<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: digital::Error> ErrorType for NoPin<E> {
    type Error = E;
}

impl<E: digital::Error> OutputPin for NoPin<E> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Shift register errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftError<E> {
    /// A GPIO write failed
    Pin(E),
    /// The chip latches through a load line but none is wired
    LoadPinRequired,
}

impl<E> From<E> for ShiftError<E> {
    fn from(e: E) -> Self {
        ShiftError::Pin(e)
    }
}

impl<E: fmt::Debug> fmt::Display for ShiftError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftError::Pin(e) => write!(f, "pin write failed: {:?}", e),
            ShiftError::LoadPinRequired => write!(f, "chip requires a load line"),
        }
    }
}

/// Shift register driven by GPIO pins
pub struct ShiftRegister<CLK, DATA, LOAD> {
    clock: CLK,
    data: DATA,
    load: LOAD,
    has_load: bool,
}

impl<CLK, DATA, LOAD, E> ShiftRegister<CLK, DATA, LOAD>
where
    CLK: OutputPin<Error = E>,
    DATA: OutputPin<Error = E>,
    LOAD: OutputPin<Error = E>,
{
    /// Create a three-wire register and drive the lines to their idle level
    pub fn new(
        chip: &ChipDescriptor,
        clock: CLK,
        data: DATA,
        load: LOAD,
    ) -> Result<Self, ShiftError<E>> {
        let mut register = Self {
            clock,
            data,
            load,
            has_load: true,
        };
        register.idle(chip)?;
        Ok(register)
    }

    /// Whether a load line is wired
    pub fn has_load(&self) -> bool {
        self.has_load
    }

    /// Give the pins back
    pub fn release(self) -> (CLK, DATA, LOAD) {
        (self.clock, self.data, self.load)
    }

    fn idle(&mut self, chip: &ChipDescriptor) -> Result<(), E> {
        self.clock.set_low()?;
        self.data.set_low()?;
        if chip.data_enable {
            self.load.set_high()?;
        } else {
            self.load.set_low()?;
        }
        Ok(())
    }

    fn pulse_clock(&mut self) -> Result<(), E> {
        self.clock.set_high()?;
        self.clock.set_low()
    }

    fn pulse_load(&mut self) -> Result<(), E> {
        self.load.set_high()?;
        self.load.set_low()
    }

    fn shift(&mut self, frame: &Frame<'_>) -> Result<(), E> {
        let chip = frame.chip;

        if chip.data_enable {
            self.load.set_low()?;
        }

        if chip.initial_bit {
            self.data.set_high()?;
            self.pulse_clock()?;
        }

        for on in frame.shift_order() {
            self.data.set_state(on.into())?;
            self.pulse_clock()?;
        }

        if chip.pulse_load {
            self.pulse_load()?;
        }

        if chip.data_enable {
            self.load.set_high()?;
        }
        Ok(())
    }
}

impl<CLK, DATA, E> ShiftRegister<CLK, DATA, NoPin<E>>
where
    CLK: OutputPin<Error = E>,
    DATA: OutputPin<Error = E>,
    E: digital::Error,
{
    /// Create a two-wire register for chips without a load line
    pub fn without_load(chip: &ChipDescriptor, clock: CLK, data: DATA) -> Result<Self, ShiftError<E>> {
        if chip.needs_load_line() {
            return Err(ShiftError::LoadPinRequired);
        }
        let mut register = Self {
            clock,
            data,
            load: NoPin::new(),
            has_load: false,
        };
        register.idle(chip)?;
        Ok(register)
    }
}

impl<CLK, DATA, LOAD, E> SegmentSink for ShiftRegister<CLK, DATA, LOAD>
where
    CLK: OutputPin<Error = E>,
    DATA: OutputPin<Error = E>,
    LOAD: OutputPin<Error = E>,
{
    type Error = ShiftError<E>;

    fn show(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        if frame.chip.needs_load_line() && !self.has_load {
            return Err(ShiftError::LoadPinRequired);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Shifting {} segments into {=str}",
            frame.segments.len(),
            frame.chip.name
        );

        self.shift(frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorKind;
    use segmask_core::config::find_chip;
    use segmask_core::{Display, NoOutput};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Clock,
        Data,
        Load,
    }

    type Log = RefCell<Vec<(Line, bool)>>;

    /// Mock GPIO pin appending every write to a shared log
    struct MockPin<'a> {
        line: Line,
        log: &'a Log,
        /// Fail once this many writes have been logged
        fail_at: Option<usize>,
    }

    impl<'a> MockPin<'a> {
        fn new(line: Line, log: &'a Log) -> Self {
            Self {
                line,
                log,
                fail_at: None,
            }
        }

        fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
            let mut log = self.log.borrow_mut();
            if self.fail_at.is_some_and(|n| log.len() >= n) {
                return Err(ErrorKind::Other);
            }
            log.push((self.line, high));
            Ok(())
        }
    }

    impl ErrorType for MockPin<'_> {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.write(false)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.write(true)
        }
    }

    /// Data line level at every rising clock edge
    fn clocked_bits(log: &[(Line, bool)]) -> Vec<bool> {
        let mut data = false;
        let mut bits = Vec::new();
        for &(line, high) in log {
            match line {
                Line::Data => data = high,
                Line::Clock if high => bits.push(data),
                _ => {}
            }
        }
        bits
    }

    fn frame_with(chip: &'static ChipDescriptor, segments: &[bool]) -> Vec<(Line, bool)> {
        let log = Log::default();
        let mut register = ShiftRegister::new(
            chip,
            MockPin::new(Line::Clock, &log),
            MockPin::new(Line::Data, &log),
            MockPin::new(Line::Load, &log),
        )
        .unwrap();
        log.borrow_mut().clear();
        register.show(&Frame { segments, chip }).unwrap();
        drop(register);
        log.into_inner()
    }

    #[test]
    fn test_idle_levels() {
        let log = Log::default();
        let chip = find_chip("MM5452").unwrap();
        let _register = ShiftRegister::new(
            chip,
            MockPin::new(Line::Clock, &log),
            MockPin::new(Line::Data, &log),
            MockPin::new(Line::Load, &log),
        )
        .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[(Line::Clock, false), (Line::Data, false), (Line::Load, true)]
        );
    }

    #[test]
    fn test_initial_bit_then_ascending_data() {
        let chip = find_chip("M5451").unwrap();
        let mut segments = [false; 35];
        segments[0] = true;
        segments[34] = true;

        let log = frame_with(chip, &segments);
        let bits = clocked_bits(&log);
        assert_eq!(bits.len(), 36);
        assert!(bits[0], "leading marker bit");
        assert!(bits[1]);
        assert!(bits[2..35].iter().all(|&b| !b));
        assert!(bits[35]);
        assert!(log.iter().all(|&(line, _)| line != Line::Load));
    }

    #[test]
    fn test_descending_with_load_pulse() {
        let chip = find_chip("AY0438").unwrap();
        let mut segments = [false; 32];
        segments[0] = true;

        let log = frame_with(chip, &segments);
        let bits = clocked_bits(&log);
        assert_eq!(bits.len(), 32, "no marker bit");
        assert!(bits[31], "first segment goes out last");
        assert_eq!(
            &log[log.len() - 2..],
            &[(Line::Load, true), (Line::Load, false)]
        );
    }

    #[test]
    fn test_data_enable_wraps_transfer() {
        let chip = find_chip("MM5452").unwrap();
        let log = frame_with(chip, &[true; 32]);
        assert_eq!(log.first(), Some(&(Line::Load, false)));
        assert_eq!(log.last(), Some(&(Line::Load, true)));
        assert_eq!(clocked_bits(&log).len(), 33);
    }

    #[test]
    fn test_clock_ends_low() {
        let chip = find_chip("M5450").unwrap();
        let log = frame_with(chip, &[true; 34]);
        let last_clock = log.iter().rev().find(|&&(line, _)| line == Line::Clock);
        assert_eq!(last_clock, Some(&(Line::Clock, false)));
    }

    #[test]
    fn test_missing_load_line() {
        let log = Log::default();
        let result = ShiftRegister::without_load(
            find_chip("AY0438").unwrap(),
            MockPin::new(Line::Clock, &log),
            MockPin::new(Line::Data, &log),
        );
        assert!(matches!(result, Err(ShiftError::LoadPinRequired)));

        // Two-wire register later handed a frame for a latching chip
        let mut register = ShiftRegister::without_load(
            find_chip("M5450").unwrap(),
            MockPin::new(Line::Clock, &log),
            MockPin::new(Line::Data, &log),
        )
        .unwrap();
        assert!(!register.has_load());
        let chip = find_chip("MM5452").unwrap();
        assert_eq!(
            register.show(&Frame {
                segments: &[false; 32],
                chip
            }),
            Err(ShiftError::LoadPinRequired)
        );
    }

    #[test]
    fn test_pin_error_propagates() {
        let log = Log::default();
        let chip = find_chip("M5450").unwrap();
        let mut data = MockPin::new(Line::Data, &log);
        data.fail_at = Some(5);
        let mut register = ShiftRegister::without_load(chip, MockPin::new(Line::Clock, &log), data).unwrap();
        assert_eq!(
            register.show(&Frame {
                segments: &[true; 34],
                chip
            }),
            Err(ShiftError::Pin(ErrorKind::Other))
        );
    }

    #[test]
    fn test_display_drives_register() {
        let log = Log::default();
        let chip = find_chip("M5451").unwrap();
        let register = ShiftRegister::without_load(
            chip,
            MockPin::new(Line::Clock, &log),
            MockPin::new(Line::Data, &log),
        )
        .unwrap();
        let mut display = Display::new(chip, "88", register).unwrap();
        log.borrow_mut().clear();

        display.print("1").unwrap();
        let bits = clocked_bits(&log.borrow());
        // Marker, then the "1" pattern (segments B and C) in the first cell
        assert_eq!(&bits[..8], &[true, false, true, true, false, false, false, false]);
        assert_eq!(bits.len(), 36);

        // Same display without hardware
        let mut encoder = Display::new(chip, "88", NoOutput).unwrap();
        encoder.print("1").unwrap();
        assert_eq!(&display.buffer().as_slice()[..14], &encoder.buffer().as_slice()[..14]);
    }
}
