use std::rc::Rc;

use web_sys::Event;

use crate::services::logging::Logger;

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this expense? This action cannot be undone.";

/// Asks the user a yes/no question
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// The browser's native `confirm` dialog
pub struct BrowserConfirmer;

impl Confirmer for BrowserConfirmer {
    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}

/// Holds back delete form submissions until the user confirms them
#[derive(Clone)]
pub struct DeleteGuard {
    confirmer: Rc<dyn Confirmer>,
}

impl DeleteGuard {
    pub fn new(confirmer: Rc<dyn Confirmer>) -> Self {
        Self { confirmer }
    }

    /// Called from the submit listener. A declined prompt cancels the
    /// submission; an accepted one leaves the event alone.
    pub fn on_submit(&self, event: &Event) -> bool {
        let confirmed = self.confirmer.confirm(DELETE_CONFIRMATION);
        if !confirmed {
            event.prevent_default();
            Logger::debug_with_component("delete-guard", "Delete cancelled by user");
        }
        confirmed
    }
}
