use embedded_hal::digital::OutputPin;

use crate::{
    port::{OutputPort, EN, RS},
    utils::{BitOps, BitState},
};

/// Fans the port register out to six discrete GPIO pins
///
/// Register bits 2 and 3 have no pin and are dropped on write. The display
/// is never read, so push-pull outputs are fine and the RW line belongs on
/// ground.
pub struct PinPort<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    rs_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; 4],
}

impl<ControlPin, DBPin> PinPort<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    /// Collect the wired pins; `db4` is the lowest data line
    pub fn new(
        rs: ControlPin,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
        }
    }
}

impl<ControlPin, DBPin> OutputPort for PinPort<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    fn write(&mut self, bits: u8) {
        match bits.check_bit(RS) {
            BitState::Set => {
                self.rs_pin.set_high().ok().unwrap();
            }
            BitState::Clear => {
                self.rs_pin.set_low().ok().unwrap();
            }
        }

        match bits.check_bit(EN) {
            BitState::Set => {
                self.en_pin.set_high().ok().unwrap();
            }
            BitState::Clear => {
                self.en_pin.set_low().ok().unwrap();
            }
        }

        self.db_pins
            .iter_mut()
            .enumerate()
            .for_each(|(index, pin)| match bits.check_bit(index as u8 + 4) {
                BitState::Set => {
                    pin.set_high().ok().unwrap();
                }
                BitState::Clear => {
                    pin.set_low().ok().unwrap();
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use embedded_hal::digital::{ErrorType, OutputPin};

    use super::*;

    // pin order in the shared level array: RS, EN, D4, D5, D6, D7
    #[derive(Clone)]
    struct SharedPin {
        levels: Rc<RefCell<[bool; 6]>>,
        index: usize,
    }

    impl ErrorType for SharedPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for SharedPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.borrow_mut()[self.index] = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.borrow_mut()[self.index] = true;
            Ok(())
        }
    }

    #[test]
    fn register_bits_reach_their_pins() {
        let levels = Rc::new(RefCell::new([false; 6]));
        let pin = |index| SharedPin {
            levels: Rc::clone(&levels),
            index,
        };
        let mut port = PinPort::new(pin(0), pin(1), pin(2), pin(3), pin(4), pin(5));

        // RS and D7 high, everything else low
        port.write(0b1000_0001);
        assert_eq!(*levels.borrow(), [true, false, false, false, false, true]);

        // EN and D4 high
        port.write(0b0001_0010);
        assert_eq!(*levels.borrow(), [false, true, true, false, false, false]);

        // bits 2 and 3 have no pin to reach
        port.write(0b0000_1100);
        assert_eq!(*levels.borrow(), [false; 6]);
    }
}
