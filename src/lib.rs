/*!
# LCD1602 4-bit driver

Drives an HD44780-style character display over the classic single-port
wiring: data nibble on port bits 4-7, register select on bit 0, enable
strobe on bit 1, bits 2-3 free.

Basic Usage:

1. Wire up an output port <br/>
    Implement [`port::OutputPort`] for whatever maps the port register to
    your hardware, or use the bundled pin adapter [`port::PinPort`] over six
    `embedded-hal` output pins.
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to borrow the port and a delay source, then call
    [`lcd::Lcd::init()`] once the display has power
<br/>
<br/>
3. use any methods provided by [`lcd::Lcd`] to put text on the display

The protocol is write-only and open loop: every operation blocks for fixed
settle times, and nothing is ever read back from the controller.
*/

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod port;
pub mod utils;
