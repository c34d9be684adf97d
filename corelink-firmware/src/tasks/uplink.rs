//! Bench uplink task (core 1)
//!
//! Stands in for the radio stack: reports the association sequence, hands
//! over a fixed address, then answers every publish with an
//! acknowledgement ping once the client has been started.

use defmt::*;
use embassy_rp::interrupt::InterruptExt;
use embassy_time::Timer;

use corelink_core::config::BenchConfig;
use corelink_core::transport::{CommandReader, StatusReporter};
use corelink_hal_rp2040::SioFifo;
use corelink_protocol::{StatusCode, UplinkCommand};

/// Command poll period
const POLL_INTERVAL_MS: u64 = 10;

/// Bench uplink task
#[embassy_executor::task]
pub async fn uplink_task(config: &'static BenchConfig) {
    // embassy-rp reads this core's FIFO from SIO_IRQ_PROC1 for flash
    // pause requests; it would swallow command words
    embassy_rp::interrupt::SIO_IRQ_PROC1.disable();

    info!("Uplink task started on core 1");

    let mut reporter = StatusReporter::new(SioFifo::new());
    let mut commands = CommandReader::new(SioFifo::new());
    let mut attempt: u16 = 1;

    report(&mut reporter, attempt, StatusCode::Initializing);
    Timer::after_millis(config.connect_delay_ms as u64).await;

    attempt += 1;
    report(&mut reporter, attempt, StatusCode::Connected);
    reporter.report_address(config.address);
    let [a, b, c, d] = config.address.octets();
    info!("Reported address {}.{}.{}.{}", a, b, c, d);

    let mut client_started = false;

    loop {
        match commands.poll() {
            Ok(Some(UplinkCommand::StartClient)) => {
                info!("Client start requested");
                client_started = true;
            }
            Ok(Some(UplinkCommand::Publish(payload))) => {
                if client_started {
                    debug!("Publish '{}', acknowledging", payload.as_str());
                    reporter.acknowledge_ping();
                } else {
                    warn!("Publish before client start, ignored");
                }
            }
            Ok(None) => Timer::after_millis(POLL_INTERVAL_MS).await,
            Err(e) => warn!("Bad command frame: {}", e),
        }
    }
}

fn report(reporter: &mut StatusReporter<SioFifo>, attempt: u16, status: StatusCode) {
    match reporter.report(attempt, status) {
        Ok(()) => info!("Reported attempt {}: {}", attempt, status),
        Err(e) => warn!("Could not report attempt {}: {}", attempt, e),
    }
}
