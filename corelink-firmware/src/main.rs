//! Corelink - Dual-Core Status Link Firmware
//!
//! Core 1 runs the uplink and reports its progress as 32-bit words over
//! the SIO FIFO. Core 0 turns those words into OLED text and RGB LED
//! colours, starts the messaging client once an address is known, and
//! publishes a periodic keep-alive.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Executor;
use embassy_rp::multicore::{spawn_core1, Stack};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use corelink_core::config::{BenchConfig, LinkConfig};
use corelink_core::traits::{Indicator, Rgb};
use corelink_hal_rp2040::board::{self, DisplayPeripherals, LedPeripherals};

mod config;
mod tasks;

/// Core 1 stack size in bytes
const CORE1_STACK_SIZE: usize = 8192;

static CORE1_STACK: StaticCell<Stack<CORE1_STACK_SIZE>> = StaticCell::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

// Configuration must live forever for task references
static LINK_CONFIG: StaticCell<LinkConfig> = StaticCell::new();
static BENCH_CONFIG: StaticCell<BenchConfig> = StaticCell::new();

/// Main entry point (core 0)
#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Corelink firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = LINK_CONFIG.init(config::load_config());
    let bench = BENCH_CONFIG.init(config.bench);
    info!(
        "Keep-alive every {} ms, poll every {} ms",
        config.messaging.keepalive_interval_ms, config.presentation.poll_interval_ms
    );

    // OLED on I2C1 (GP14 SDA, GP15 SCL)
    let mut display = board::status_display(DisplayPeripherals {
        i2c: p.I2C1,
        sda: p.PIN_14,
        scl: p.PIN_15,
    });
    match display.init() {
        Ok(()) => info!("OLED initialized"),
        // The loop keeps running and counts every failed draw
        Err(e) => error!("Failed to initialize display: {}", e),
    }

    // RGB LED (GP13 red, GP11 green, GP12 blue)
    let mut led = match board::rgb_led(LedPeripherals {
        slice5: p.PWM_SLICE5,
        slice6: p.PWM_SLICE6,
        green: p.PIN_11,
        blue: p.PIN_12,
        red: p.PIN_13,
    }) {
        Ok(led) => led,
        Err(e) => defmt::panic!("RGB LED setup failed: {}", e),
    };
    if led.set_color(Rgb::OFF).is_err() {
        warn!("Could not switch the RGB LED off");
    }
    info!("RGB LED initialized");

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| spawner.spawn(tasks::uplink_task(bench)).unwrap())
    });
    info!("Core 1 launched");

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner
            .spawn(tasks::status_task(display, led, config))
            .unwrap()
    })
}
