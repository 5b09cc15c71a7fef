//! Render target for the rotation driver.

use super::Transition;
use crate::FeedError;
use crate::types::TokenRecord;

/// Whatever draws the gallery.
///
/// Calls are made synchronously from the driver while it holds its state
/// lock, so implementations should only record or draw, never block on
/// I/O or call back into the driver.
pub trait GallerySink: Send + Sync {
    /// Loading placeholder.
    fn show_loading(&self);

    /// A set of tokens. `transition` says whether to animate the swap.
    fn show_tokens(&self, tokens: &[TokenRecord], transition: Transition);

    /// Nothing to show.
    fn show_empty(&self);

    /// Initial load failed; offer a retry action.
    fn show_error(&self, error: &FeedError);

    /// Called once on destroy. Drop observers and listeners here.
    fn detach(&self) {}
}
