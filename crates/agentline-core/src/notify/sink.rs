//! The delivery primitive.

use super::event::NotificationEvent;

/// Hands one event to a consumer.
///
/// Delivery is synchronous from the caller's point of view and must preserve
/// call order. Errors are returned as-is to whoever triggered the event; the
/// notifier never retries or buffers.
pub trait Deliver {
    type Error: std::error::Error + Send + Sync + 'static;

    fn deliver(&mut self, event: &NotificationEvent) -> Result<(), Self::Error>;
}

/// Adapts a closure into a [`Deliver`] implementation.
///
/// ```
/// use agentline_core::notify::{FnSink, NotificationEvent};
///
/// let mut seen = Vec::new();
/// let sink = FnSink(|event: &NotificationEvent| {
///     seen.push(event.text.clone());
///     Ok::<(), std::io::Error>(())
/// });
/// # drop(sink);
/// ```
pub struct FnSink<F>(pub F);

impl<F, E> Deliver for FnSink<F>
where
    F: FnMut(&NotificationEvent) -> Result<(), E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn deliver(&mut self, event: &NotificationEvent) -> Result<(), E> {
        (self.0)(event)
    }
}

impl<D: Deliver + ?Sized> Deliver for &mut D {
    type Error = D::Error;

    fn deliver(&mut self, event: &NotificationEvent) -> Result<(), Self::Error> {
        (**self).deliver(event)
    }
}

/// Collects events in memory.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub events: Vec<NotificationEvent>,
}

impl Deliver for VecSink {
    type Error = std::convert::Infallible;

    fn deliver(&mut self, event: &NotificationEvent) -> Result<(), Self::Error> {
        self.events.push(event.clone());
        Ok(())
    }
}
