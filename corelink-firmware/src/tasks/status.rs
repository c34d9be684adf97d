//! Presentation task (core 0)
//!
//! Owns the OLED, the RGB LED and the messaging client, and runs the
//! status loop forever.

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_time::Delay;

use corelink_core::config::LinkConfig;
use corelink_core::lifecycle::KeepAlive;
use corelink_core::messaging::FifoMessagingClient;
use corelink_core::transport::TransportEvent;
use corelink_core::{DiagnosticCounters, StatusContext, StatusLoop, StepReport};
use corelink_hal_rp2040::board::{BoardDisplay, BoardLed};
use corelink_hal_rp2040::{EmbassyClock, SioFifo};

type FirmwareLoop =
    StatusLoop<SioFifo, BoardDisplay, BoardLed, FifoMessagingClient<SioFifo>, RoscRng>;

/// Status loop task
#[embassy_executor::task]
pub async fn status_task(display: BoardDisplay, led: BoardLed, config: &'static LinkConfig) {
    info!("Status task started");

    let client = FifoMessagingClient::new(SioFifo::new());
    let mut status: FirmwareLoop =
        StatusLoop::new(SioFifo::new(), display, led, client, RoscRng, config);

    let mut delay = Delay;
    status.boot(&mut delay).await;
    info!("Core 0 ready, waiting for messages from core 1");

    let mut seen = DiagnosticCounters::default();
    status
        .run(&EmbassyClock, &mut delay, |report, ctx| {
            log_step(report, ctx, &mut seen)
        })
        .await;
}

/// Log what one iteration did
fn log_step(report: &StepReport, ctx: &StatusContext, seen: &mut DiagnosticCounters) {
    match report.transport {
        TransportEvent::Idle => {}
        TransportEvent::AddressAcquired(addr) => {
            let [a, b, c, d] = addr.octets();
            info!("Address: {}.{}.{}.{}", a, b, c, d);
        }
        TransportEvent::Enqueued(event) => {
            trace!("Enqueued {} (queue {})", event, ctx.queue.len());
        }
        TransportEvent::Rejected(diagnostic) => {
            warn!(
                "{}: {} ({} dropped so far)",
                diagnostic.message(),
                diagnostic,
                ctx.diagnostics.dropped()
            );
        }
    }

    if let Some(reduction) = report.reduction {
        info!("Status: {}", reduction);
    }

    match report.client_start {
        Some(Ok(())) => info!("Messaging client started"),
        Some(Err(e)) => warn!("Messaging client start failed: {}", e),
        None => {}
    }

    match report.keepalive {
        KeepAlive::Sent => info!("Keep-alive published"),
        KeepAlive::Failed(e) => warn!("Keep-alive publish failed: {}", e),
        KeepAlive::NotDue => {}
    }

    let now = ctx.diagnostics;
    if now.display_faults != seen.display_faults {
        warn!("Display faults: {}", now.display_faults);
    }
    if now.indicator_faults != seen.indicator_faults {
        warn!("Indicator faults: {}", now.indicator_faults);
    }
    *seen = now;
}
