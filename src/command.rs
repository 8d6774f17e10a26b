//! The write-only command subset of the display controller,
//! and the lowering from [`CommandSet`] to raw transfer bytes

use thiserror::Error;

use crate::utils::BitOps;

/// Commands this driver issues to the display controller
#[derive(Clone, Copy)]
pub enum CommandSet {
    /// Wipe DDRAM and move the cursor back to address 0
    ClearDisplay,
    /// Move the cursor (and a shifted display window) back to the origin
    ReturnHome,
    /// Switch the display, the cursor underline and the cursor blink
    DisplayOnOff {
        #[allow(missing_docs)]
        display: State,
        #[allow(missing_docs)]
        cursor: State,
        #[allow(missing_docs)]
        cursor_blink: State,
    },
    // no DataWidth/LineMode parameters here: this driver only ever drives
    // the 4-bit bus with two display lines
    /// Select the 4-bit bus and the 2-line layout
    FunctionSet,
    /// Move the cursor to a DDRAM address
    SetDDRAM(u8),
    /// Put a glyph code at the current cursor position
    WriteDataToRAM(u8),
}

/// The switch state of a display feature
#[derive(Clone, Copy, PartialEq, Default)]
#[allow(missing_docs)]
pub enum State {
    Off,
    #[default]
    On,
}

/// A lowered command: the register it targets and the byte to transfer
pub struct Command {
    rs: RegisterSelection,
    raw_bits: u8,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum RegisterSelection {
    Command,
    Data,
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, raw_bits: u8) -> Self {
        Self { rs, raw_bits }
    }

    pub(crate) fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub(crate) fn get_raw_bits(&self) -> u8 {
        self.raw_bits
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::ReturnHome => Self::new(RegisterSelection::Command, 0b0000_0010),

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                }
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                }
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                }

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::FunctionSet => Self::new(RegisterSelection::Command, 0b0010_1000),

            CommandSet::SetDDRAM(addr) => {
                let mut raw_bits = 0b1000_0000;

                assert!(addr < 2u8.pow(7), "DDRAM address out of range");

                raw_bits += addr;

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}

/// A position the validated write path rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The panel has lines 1 and 2, counted as on the silkscreen
    #[error("row {0} out of range, display lines are 1 and 2")]
    RowOutOfRange(u8),
    /// Each line shows 16 characters, columns 0 through 15
    #[error("column {0} out of range, columns are 0..=15")]
    ColumnOutOfRange(u8),
}

/// DDRAM address of `(row, column)`, rows counted from 1 as printed on the
/// panel. Line 2 starts at DDRAM 0x40.
pub fn ddram_address(row: u8, column: u8) -> Result<u8, PositionError> {
    if !(1..=2).contains(&row) {
        return Err(PositionError::RowOutOfRange(row));
    }
    if column >= 16 {
        return Err(PositionError::ColumnOutOfRange(column));
    }

    match row {
        1 => Ok(column & 0x0F),
        _ => Ok(0x40 | (column & 0x0F)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(command: CommandSet) -> u8 {
        Command::from(command).get_raw_bits()
    }

    #[test]
    fn init_command_bytes_are_bit_exact() {
        assert_eq!(raw(CommandSet::FunctionSet), 0x28);
        assert_eq!(raw(CommandSet::ReturnHome), 0x02);
        assert_eq!(
            raw(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            0x0C
        );
        assert_eq!(raw(CommandSet::ClearDisplay), 0x01);
    }

    #[test]
    fn display_switches_land_on_their_bits() {
        assert_eq!(
            raw(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::On,
                cursor_blink: State::On,
            }),
            0x0F
        );
        assert_eq!(
            raw(CommandSet::DisplayOnOff {
                display: State::Off,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            0x08
        );
    }

    #[test]
    fn set_ddram_carries_the_base_address() {
        assert_eq!(raw(CommandSet::SetDDRAM(0x05)), 0x85);
        assert_eq!(raw(CommandSet::SetDDRAM(0x45)), 0xC5);
    }

    #[test]
    fn data_bytes_select_the_data_register() {
        let command = Command::from(CommandSet::WriteDataToRAM(b'b'));
        assert!(matches!(
            command.get_register_selection(),
            RegisterSelection::Data
        ));
        assert_eq!(command.get_raw_bits(), b'b');
    }

    #[test]
    fn ddram_addressing_covers_both_lines() {
        assert_eq!(ddram_address(1, 0), Ok(0x00));
        assert_eq!(ddram_address(1, 5), Ok(0x05));
        assert_eq!(ddram_address(1, 15), Ok(0x0F));
        assert_eq!(ddram_address(2, 0), Ok(0x40));
        assert_eq!(ddram_address(2, 5), Ok(0x45));
        assert_eq!(ddram_address(2, 15), Ok(0x4F));
    }

    #[test]
    fn off_panel_positions_are_rejected() {
        assert_eq!(ddram_address(0, 0), Err(PositionError::RowOutOfRange(0)));
        assert_eq!(ddram_address(3, 0), Err(PositionError::RowOutOfRange(3)));
        assert_eq!(
            ddram_address(1, 16),
            Err(PositionError::ColumnOutOfRange(16))
        );
        assert_eq!(
            ddram_address(2, 255),
            Err(PositionError::ColumnOutOfRange(255))
        );
    }
}
