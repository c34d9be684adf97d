//! Messaging client lifecycle
//!
//! The client is started once, after the first non-zero address arrives,
//! and then publishes a keep-alive payload on a fixed period.

use crate::traits::{MessagingClient, MessagingError};

/// Result of a keep-alive check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeepAlive {
    /// Client not started or deadline not reached
    NotDue,
    /// Payload published
    Sent,
    /// Publish attempted and failed; the deadline was re-armed anyway
    Failed(MessagingError),
}

/// Start-once and keep-alive state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessagingLifecycle {
    started: bool,
    next_send_deadline: Option<u64>,
}

impl Default for MessagingLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagingLifecycle {
    /// Client not yet started
    pub const fn new() -> Self {
        Self {
            started: false,
            next_send_deadline: None,
        }
    }

    /// Returns true once the client has started successfully
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Time of the next keep-alive, if armed
    pub fn next_send_deadline(&self) -> Option<u64> {
        self.next_send_deadline
    }

    /// Start the client if an address is known and it has not started yet
    ///
    /// Returns `Ok(true)` only on the call that actually started the client.
    /// A failed start leaves the lifecycle untouched so the next call
    /// retries.
    pub fn maybe_start<C: MessagingClient>(
        &mut self,
        address: u32,
        now_ms: u64,
        interval_ms: u32,
        client: &mut C,
    ) -> Result<bool, MessagingError> {
        if self.started || address == 0 {
            return Ok(false);
        }

        client.start()?;
        self.started = true;
        self.next_send_deadline = Some(now_ms.saturating_add(interval_ms as u64));
        Ok(true)
    }

    /// Publish the keep-alive payload when the deadline has passed
    pub fn maybe_send_keepalive<C: MessagingClient>(
        &mut self,
        now_ms: u64,
        interval_ms: u32,
        client: &mut C,
        payload: &str,
    ) -> KeepAlive {
        if !self.started {
            return KeepAlive::NotDue;
        }
        match self.next_send_deadline {
            Some(deadline) if now_ms >= deadline => {}
            _ => return KeepAlive::NotDue,
        }

        let result = client.publish(payload);
        self.next_send_deadline = Some(now_ms.saturating_add(interval_ms as u64));

        match result {
            Ok(()) => KeepAlive::Sent,
            Err(e) => KeepAlive::Failed(e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use heapless::{String, Vec};

    /// Messaging client that records every call
    #[derive(Default)]
    pub(crate) struct RecordingClient {
        pub starts: u32,
        pub published: Vec<String<32>, 16>,
        pub fail_start: bool,
        pub fail_publish: bool,
    }

    impl MessagingClient for RecordingClient {
        fn start(&mut self) -> Result<(), MessagingError> {
            self.starts += 1;
            if self.fail_start {
                return Err(MessagingError::Uplink);
            }
            Ok(())
        }

        fn publish(&mut self, payload: &str) -> Result<(), MessagingError> {
            if self.fail_publish {
                return Err(MessagingError::Uplink);
            }
            let mut text = String::new();
            text.push_str(payload)
                .map_err(|_| MessagingError::PayloadTooLarge)?;
            self.published.push(text).map_err(|_| MessagingError::Uplink)?;
            Ok(())
        }
    }

    const INTERVAL: u32 = 5000;

    #[test]
    fn test_no_start_without_address() {
        let mut lifecycle = MessagingLifecycle::new();
        let mut client = RecordingClient::default();
        assert_eq!(lifecycle.maybe_start(0, 0, INTERVAL, &mut client), Ok(false));
        assert!(!lifecycle.is_started());
        assert_eq!(client.starts, 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut lifecycle = MessagingLifecycle::new();
        let mut client = RecordingClient::default();

        assert_eq!(
            lifecycle.maybe_start(0xC0A8_0402, 100, INTERVAL, &mut client),
            Ok(true)
        );
        assert_eq!(lifecycle.next_send_deadline(), Some(5100));

        for now in [200, 5100, 60_000] {
            assert_eq!(
                lifecycle.maybe_start(0xC0A8_0402, now, INTERVAL, &mut client),
                Ok(false)
            );
        }
        assert_eq!(client.starts, 1);
        assert_eq!(lifecycle.next_send_deadline(), Some(5100));
    }

    #[test]
    fn test_failed_start_retries() {
        let mut lifecycle = MessagingLifecycle::new();
        let mut client = RecordingClient {
            fail_start: true,
            ..Default::default()
        };

        assert_eq!(
            lifecycle.maybe_start(1, 0, INTERVAL, &mut client),
            Err(MessagingError::Uplink)
        );
        assert!(!lifecycle.is_started());
        assert_eq!(lifecycle.next_send_deadline(), None);

        client.fail_start = false;
        assert_eq!(lifecycle.maybe_start(1, 50, INTERVAL, &mut client), Ok(true));
        assert_eq!(client.starts, 2);
    }

    #[test]
    fn test_keepalive_not_due_before_start() {
        let mut lifecycle = MessagingLifecycle::new();
        let mut client = RecordingClient::default();
        assert_eq!(
            lifecycle.maybe_send_keepalive(u64::MAX, INTERVAL, &mut client, "PING"),
            KeepAlive::NotDue
        );
        assert!(client.published.is_empty());
    }

    #[test]
    fn test_keepalive_deadline() {
        let mut lifecycle = MessagingLifecycle::new();
        let mut client = RecordingClient::default();
        lifecycle.maybe_start(1, 0, INTERVAL, &mut client).unwrap();

        assert_eq!(
            lifecycle.maybe_send_keepalive(4999, INTERVAL, &mut client, "PING"),
            KeepAlive::NotDue
        );
        assert_eq!(
            lifecycle.maybe_send_keepalive(5000, INTERVAL, &mut client, "PING"),
            KeepAlive::Sent
        );
        assert_eq!(lifecycle.next_send_deadline(), Some(10_000));
        assert_eq!(
            lifecycle.maybe_send_keepalive(9999, INTERVAL, &mut client, "PING"),
            KeepAlive::NotDue
        );
        // Late wakeup re-arms from the actual send time
        assert_eq!(
            lifecycle.maybe_send_keepalive(12_000, INTERVAL, &mut client, "PING"),
            KeepAlive::Sent
        );
        assert_eq!(lifecycle.next_send_deadline(), Some(17_000));
        assert_eq!(client.published.len(), 2);
        assert_eq!(client.published[0].as_str(), "PING");
    }

    #[test]
    fn test_failed_publish_rearms() {
        let mut lifecycle = MessagingLifecycle::new();
        let mut client = RecordingClient::default();
        lifecycle.maybe_start(1, 0, INTERVAL, &mut client).unwrap();
        client.fail_publish = true;

        assert_eq!(
            lifecycle.maybe_send_keepalive(5000, INTERVAL, &mut client, "PING"),
            KeepAlive::Failed(MessagingError::Uplink)
        );
        assert_eq!(lifecycle.next_send_deadline(), Some(10_000));
        assert_eq!(
            lifecycle.maybe_send_keepalive(5001, INTERVAL, &mut client, "PING"),
            KeepAlive::NotDue
        );
    }
}
