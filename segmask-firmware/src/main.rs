//! Segmask demo firmware
//!
//! Drives a segment display described by the mask in display.toml through
//! a shift-register driver chip on an RP2040. After a lamp test it counts
//! across the display's range, showing the error pattern once the count
//! leaves it.
//!
//! Wiring: GP2 clock, GP3 data, GP4 load/data enable.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use segmask_core::{find_chip, Display, DisplayConfig};
use segmask_drivers::{ShiftError, ShiftRegister};

mod config;

/// Delay between counter steps
const STEP_INTERVAL: Duration = Duration::from_millis(250);

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Segmask firmware starting...");

    let p = embassy_rp::init(Default::default());

    let Some(chip) = find_chip(config::DRIVER) else {
        defmt::panic!("Unknown driver {=str}", config::DRIVER);
    };

    let clock = Output::new(p.PIN_2, Level::Low);
    let data = Output::new(p.PIN_3, Level::Low);
    let load = Output::new(p.PIN_4, Level::Low);
    let Ok(register) = ShiftRegister::new(chip, clock, data, load) else {
        defmt::panic!("Shift register setup failed");
    };

    let display_config = unwrap!(DisplayConfig::new(config::DRIVER, config::MASK))
        .with_render(config::RENDER)
        .with_cascaded(config::CASCADED);
    let mut display = unwrap!(Display::from_config(&display_config, register));

    let range = display.range();
    info!(
        "Display ready: {=str} on {=str}, range {}..={}",
        display.mask().as_str(),
        chip.name,
        range.underflow,
        range.overflow
    );

    // Lamp test
    report(display.all_on());
    Timer::after(Duration::from_secs(1)).await;
    report(display.clear());
    Timer::after(Duration::from_millis(500)).await;

    let low = i64::from(range.underflow);
    let high = i64::from(range.overflow) + 1;
    let mut value = low;

    loop {
        let result = match i32::try_from(value) {
            Ok(v) if range.underflow < 0 => display.print_number(v),
            _ => match u32::try_from(value) {
                Ok(v) => display.print_number(v),
                Err(_) => display.show_error(),
            },
        };
        report(result);

        value = if value >= high { low } else { value + 1 };
        Timer::after(STEP_INTERVAL).await;
    }
}

/// Log a failed frame transfer
fn report(result: Result<(), ShiftError<Infallible>>) {
    match result {
        Ok(()) => {}
        Err(ShiftError::LoadPinRequired) => error!("Driver chip needs a load line"),
        Err(ShiftError::Pin(never)) => match never {},
    }
}
