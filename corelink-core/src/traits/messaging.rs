//! Publish-only messaging client trait

/// Errors reported by the messaging client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessagingError {
    /// Payload does not fit the transport
    PayloadTooLarge,
    /// Client has not been started
    NotStarted,
    /// Uplink refused or failed the request
    Uplink,
}

/// Trait for the messaging client
///
/// Connection management and the broker protocol live behind this trait.
pub trait MessagingClient {
    /// Start the client (connect to the broker)
    fn start(&mut self) -> Result<(), MessagingError>;

    /// Publish a payload
    fn publish(&mut self, payload: &str) -> Result<(), MessagingError>;
}
