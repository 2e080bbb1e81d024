//! The per-request pipeline: progress signal → generation → chunked delivery.
//!
//! Linear and fully awaited; each request owns its surface and shares nothing
//! with concurrently running requests.

use sage_agent::{Category, Generator};

use crate::deliver::{deliver, DeliveryOutcome};
use crate::surface::ReplySurface;

/// Run one generative request end to end.
///
/// The typing signal fires before the provider call and can't abort the
/// request; generation and delivery failures are absorbed by the delivery
/// engine and reported in the outcome.
pub async fn run<S: ReplySurface + Sync>(
    generator: &Generator,
    category: Category,
    payload: &str,
    mut surface: S,
) -> DeliveryOutcome {
    surface.show_typing().await;
    let result = generator.answer(category, payload).await;
    deliver(result, &mut surface).await
}
