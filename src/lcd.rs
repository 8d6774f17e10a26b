//! The driver: timed, open-loop nibble transfers over the port

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::{
    command::{ddram_address, Command, CommandSet, PositionError, RegisterSelection, State},
    port::{OutputPort, Port},
};

// Timing floors of the display's instruction cycle, in microseconds.
// The protocol is open loop, these fixed waits stand in for busy-flag
// polling and may only ever grow, never shrink.
const POWER_ON_SETTLE_US: u32 = 40_000;
const STROBE_HOLD_US: u32 = 1_000;
const COMMAND_SETTLE_US: u32 = 3_000;
const DATA_SETTLE_US: u32 = 2_000;
const CLEAR_SETTLE_US: u32 = 2_000;

/// Driver for one display on one port
///
/// Holds the port and the delayer exclusively, and every operation blocks
/// the caller for its full timed sequence. A transfer must not be torn down
/// midway, the enable line would be left in a state the controller
/// misreads; sharing a display across contexts needs external serialization
/// around the whole driver.
pub struct Lcd<'a, 'b, P: OutputPort, Delayer: DelayNs> {
    port: Port<&'a mut P>,
    delayer: &'b mut Delayer,
}

impl<'a, 'b, P: OutputPort, Delayer: DelayNs> Lcd<'a, 'b, P, Delayer> {
    /// Take the wired port and a delay source. Nothing is sent until
    /// [`Lcd::init`]
    pub fn new(port: &'a mut P, delayer: &'b mut Delayer) -> Self {
        Self {
            port: Port::new(port),
            delayer,
        }
    }

    /// Bring the display up after power on
    ///
    /// Waits out the 40 ms power-on settle first, then selects the 4-bit
    /// bus with two lines, homes the cursor, turns the display on with the
    /// cursor hidden, and clears the screen. Clearing takes the controller
    /// longer than an ordinary instruction, so it gets an extra settle.
    ///
    /// There is no status read-back: a missing or unpowered display is not
    /// detectable, the sequence is fire-and-forget. Calling this again
    /// replays the exact same bytes.
    pub fn init(&mut self) {
        self.delayer.delay_us(POWER_ON_SETTLE_US);

        self.send(CommandSet::FunctionSet.into());
        self.send(CommandSet::ReturnHome.into());
        self.send(
            CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }
            .into(),
        );
        self.send(CommandSet::ClearDisplay.into());

        self.delayer.delay_us(CLEAR_SETTLE_US);
    }

    /// Send a raw instruction byte, RS held low
    pub fn send_command(&mut self, raw_bits: u8) {
        self.send(Command::new(RegisterSelection::Command, raw_bits));
    }

    /// Send a raw glyph code to the data register, RS held high
    pub fn send_data(&mut self, raw_bits: u8) {
        self.send(Command::new(RegisterSelection::Data, raw_bits));
    }

    /// Clear the whole display
    pub fn clear_display(&mut self) {
        self.send(CommandSet::ClearDisplay.into());
        self.delayer.delay_us(CLEAR_SETTLE_US);
    }

    /// Move the cursor back to the origin, undoing any display shift
    pub fn return_home(&mut self) {
        self.send(CommandSet::ReturnHome.into());
    }

    /// Write one character at the current cursor position
    ///
    /// The character generator covers ASCII 0x20 (space) through 0x7D
    /// (`}`); anything else shows as a full rectangle
    pub fn write_char(&mut self, char: char) {
        let out_byte = match char.is_ascii() {
            true if (0x20 <= char as u8) && (char as u8 <= 0x7D) => char as u8,
            _ => 0xFF,
        };

        self.send(CommandSet::WriteDataToRAM(out_byte).into());
    }

    /// Write a string from the current cursor position on
    ///
    /// An empty string sends nothing
    pub fn write_str(&mut self, str: &str) {
        str.chars().for_each(|char| self.write_char(char));
    }

    /// Move the cursor to `(row, column)` and write a string there
    ///
    /// Rows are 1 and 2 as printed on the panel, columns 0 through 15. A
    /// position outside the panel is dropped without a command going out,
    /// and the string lands wherever the cursor already was — that silent
    /// no-op matches the wire behavior this driver reproduces. Use
    /// [`Lcd::try_write_str_at`] to reject such positions instead.
    pub fn write_str_at(&mut self, row: u8, column: u8, str: &str) {
        if let Ok(addr) = ddram_address(row, column) {
            self.send(CommandSet::SetDDRAM(addr).into());
        }
        self.write_str(str);
    }

    /// Positioned write that fails fast on a bad position
    ///
    /// Nothing at all is sent when the position is rejected. For a valid
    /// position the transfers and timing are identical to
    /// [`Lcd::write_str_at`].
    pub fn try_write_str_at(
        &mut self,
        row: u8,
        column: u8,
        str: &str,
    ) -> Result<(), PositionError> {
        let addr = ddram_address(row, column)?;
        self.send(CommandSet::SetDDRAM(addr).into());
        self.write_str(str);
        Ok(())
    }

    /// One byte over the 4-bit bus: high nibble first, each nibble strobed
    /// into the controller by an EN pulse and followed by a fixed settle
    fn send(&mut self, command: Command) {
        let raw_bits = command.get_raw_bits();
        let rs = command.get_register_selection();

        trace!(
            "sending {:#04x}, rs: {}",
            raw_bits,
            rs == RegisterSelection::Data
        );

        self.port.put_nibble(raw_bits & 0xF0);
        match rs {
            RegisterSelection::Command => self.port.clear_rs(),
            RegisterSelection::Data => self.port.set_rs(),
        }
        self.strobe();
        self.delayer.delay_us(COMMAND_SETTLE_US);

        // RS keeps its level, only the data lines change for the low nibble
        self.port.put_nibble(raw_bits << 4);
        self.strobe();
        // the data-register write cycle settles faster than an instruction
        self.delayer.delay_us(match rs {
            RegisterSelection::Command => COMMAND_SETTLE_US,
            RegisterSelection::Data => DATA_SETTLE_US,
        });
    }

    fn strobe(&mut self) {
        self.port.set_en();
        self.delayer.delay_us(STROBE_HOLD_US);
        self.port.clear_en();
    }
}
