//! Drive a 16x2 character LCD with a STM32F411RET6 over the single-port 4-bit wiring

//! Wiring diagram
//!
//! LCD1602 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!      V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> GND (this driver never reads, keep the module in write mode)
//!      EN <-> PA1 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA2
//!      D5 <-> PA3
//!      D6 <-> PA4
//!      D7 <-> PA5
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use panic_rtt_target as _;
use rtt_target::rtt_init_print;
use stm32f4xx_hal::{pac, prelude::*};

use lcd1602_4bit::{lcd::Lcd, port::PinPort};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    // init needed digital pins

    let gpioa = dp.GPIOA.split();

    // the display is never read back, push-pull everywhere
    let rs_pin = gpioa.pa0.into_push_pull_output().erase();
    let en_pin = gpioa.pa1.into_push_pull_output().erase();
    let db4_pin = gpioa.pa2.into_push_pull_output().erase();
    let db5_pin = gpioa.pa3.into_push_pull_output().erase();
    let db6_pin = gpioa.pa4.into_push_pull_output().erase();
    let db7_pin = gpioa.pa5.into_push_pull_output().erase();

    // put pins together
    let mut port = PinPort::new(rs_pin, en_pin, db4_pin, db5_pin, db6_pin, db7_pin);

    // init LCD1602
    let mut lcd = Lcd::new(&mut port, &mut delayer);
    lcd.init();

    lcd.write_str("hhhhh");

    lcd.write_str_at(2, 5, "bye");

    #[allow(clippy::empty_loop)]
    loop {}
}
