//! Presentation-core main loop
//!
//! Each iteration drains the transport, applies at most one queued event,
//! starts the messaging client once an address is known and sends the
//! periodic keep-alive. Waits go through [`DelayNs`] so the loop can share
//! an executor with other tasks.

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::config::{LinkConfig, MessagingConfig};
use crate::context::StatusContext;
use crate::lifecycle::KeepAlive;
use crate::presenter::Presenter;
use crate::queue::QUEUE_CAPACITY;
use crate::reducer::{reduce, Reduction};
use crate::traits::{
    Clock, Indicator, InterCoreFifo, MessagingClient, MessagingError, StatusDisplay,
};
use crate::transport::{drain_transport, TransportEvent};

/// Text shown on the client line once the client has started
pub const CLIENT_STARTED_TEXT: &str = "started";

/// What a single [`StatusLoop::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Transport poll outcome
    pub transport: TransportEvent,
    /// Reduction applied this step, if an event was dequeued
    pub reduction: Option<Reduction>,
    /// Client start attempt, if one was made
    pub client_start: Option<Result<(), MessagingError>>,
    /// Keep-alive outcome
    pub keepalive: KeepAlive,
}

impl StepReport {
    /// Returns true if the step found nothing to do
    pub fn is_idle(&self) -> bool {
        self.transport == TransportEvent::Idle
            && self.reduction.is_none()
            && self.client_start.is_none()
            && self.keepalive == KeepAlive::NotDue
    }
}

/// The presentation-core loop and everything it owns
pub struct StatusLoop<F, D, L, M, R, const N: usize = QUEUE_CAPACITY> {
    fifo: F,
    presenter: Presenter<D, L>,
    client: M,
    rng: R,
    ctx: StatusContext<N>,
    messaging: MessagingConfig,
    poll_interval_ms: u32,
}

impl<F, D, L, M, R, const N: usize> StatusLoop<F, D, L, M, R, N>
where
    F: InterCoreFifo,
    D: StatusDisplay,
    L: Indicator,
    M: MessagingClient,
    R: RngCore,
{
    pub fn new(
        fifo: F,
        display: D,
        indicator: L,
        client: M,
        rng: R,
        config: &LinkConfig,
    ) -> Self {
        let mut ctx = StatusContext::new();
        ctx.queue.initialize();
        Self {
            fifo,
            presenter: Presenter::new(display, indicator, config.presentation, config.indicator),
            client,
            rng,
            ctx,
            messaging: config.messaging.clone(),
            poll_interval_ms: config.presentation.poll_interval_ms,
        }
    }

    /// Show the boot banner
    pub async fn boot<W: DelayNs>(&mut self, delay: &mut W) {
        self.presenter.banner(delay, &mut self.ctx.diagnostics).await;
    }

    /// Run one iteration without the trailing poll sleep
    pub async fn step<C: Clock, W: DelayNs>(&mut self, clock: &C, delay: &mut W) -> StepReport {
        let transport = drain_transport(&mut self.fifo, &mut self.ctx);
        match transport {
            TransportEvent::AddressAcquired(addr) => {
                self.presenter.show_address(addr, &mut self.ctx.diagnostics);
            }
            TransportEvent::Rejected(diagnostic) => {
                self.presenter
                    .show_diagnostic(&diagnostic, delay, &mut self.ctx.diagnostics)
                    .await;
            }
            TransportEvent::Idle | TransportEvent::Enqueued(_) => {}
        }

        let reduction = match self.ctx.queue.try_dequeue() {
            Some(event) => {
                let reduction = reduce(&event, &mut self.rng);
                self.presenter
                    .show(&reduction, delay, &mut self.ctx.diagnostics)
                    .await;
                Some(reduction)
            }
            None => None,
        };

        let interval = self.messaging.keepalive_interval_ms;

        let client_start = match self.ctx.lifecycle.maybe_start(
            self.ctx.last_known_address,
            clock.now_ms(),
            interval,
            &mut self.client,
        ) {
            Ok(false) => None,
            Ok(true) => {
                self.presenter
                    .show_client_status(CLIENT_STARTED_TEXT, &mut self.ctx.diagnostics);
                Some(Ok(()))
            }
            Err(e) => {
                self.note_messaging_fault();
                Some(Err(e))
            }
        };

        let keepalive = self.ctx.lifecycle.maybe_send_keepalive(
            clock.now_ms(),
            interval,
            &mut self.client,
            &self.messaging.keepalive_payload,
        );
        match keepalive {
            KeepAlive::Sent => self.presenter.show_keepalive_sent(&mut self.ctx.diagnostics),
            KeepAlive::Failed(_) => self.note_messaging_fault(),
            KeepAlive::NotDue => {}
        }

        StepReport {
            transport,
            reduction,
            client_start,
            keepalive,
        }
    }

    /// Run forever, handing every report to `observer`
    pub async fn run<C, W, O>(&mut self, clock: &C, delay: &mut W, mut observer: O)
    where
        C: Clock,
        W: DelayNs,
        O: FnMut(&StepReport, &StatusContext<N>),
    {
        loop {
            let report = self.step(clock, delay).await;
            observer(&report, &self.ctx);
            delay.delay_ms(self.poll_interval_ms).await;
        }
    }

    pub fn context(&self) -> &StatusContext<N> {
        &self.ctx
    }

    pub fn presenter(&self) -> &Presenter<D, L> {
        &self.presenter
    }

    pub fn client(&self) -> &M {
        &self.client
    }

    fn note_messaging_fault(&mut self) {
        let faults = &mut self.ctx.diagnostics.messaging_faults;
        *faults = faults.saturating_add(1);
    }
}
