use std::cell::Cell;
use std::rc::Rc;

use shared::{ExpenseId, Severity};

use crate::components::alert::AlertRenderer;
use crate::components::page::EditFormFields;
use crate::error::ApiError;
use crate::services::api::ExpenseSource;
use crate::services::config::StaleResponsePolicy;
use crate::services::logging::Logger;

const COMPONENT: &str = "edit-prefill";

pub const FETCH_FAILED_MESSAGE: &str = "Could not retrieve expense details. Please try again.";

/// What happened to one edit request
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The record was written into the edit form
    Applied,
    /// A newer edit was triggered while this one was in flight
    Superseded,
    /// The record could not be fetched; the form was left untouched
    Failed(ApiError),
}

/// Loads a record from the server into the edit form
#[derive(Clone)]
pub struct EditPrefill {
    source: Rc<dyn ExpenseSource>,
    fields: EditFormFields,
    alerts: AlertRenderer,
    policy: StaleResponsePolicy,
    latest_request: Rc<Cell<u64>>,
}

impl EditPrefill {
    pub fn new(
        source: Rc<dyn ExpenseSource>,
        fields: EditFormFields,
        alerts: AlertRenderer,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self {
            source,
            fields,
            alerts,
            policy,
            latest_request: Rc::new(Cell::new(0)),
        }
    }

    pub async fn load(&self, id: ExpenseId) -> LoadOutcome {
        let ticket = self.latest_request.get() + 1;
        self.latest_request.set(ticket);

        Logger::debug_with_component(COMPONENT, &format!("Fetching expense {} (request {})", id, ticket));
        let result = self.source.get_expense(&id).await;

        if self.is_stale(ticket) {
            Logger::debug_with_component(
                COMPONENT,
                &format!("Discarding response for expense {}, a newer edit was requested", id),
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(record) => {
                self.fields.fill(&record);
                Logger::debug_with_component(COMPONENT, &format!("Edit form filled with expense {}", record.id));
                LoadOutcome::Applied
            }
            Err(e) => {
                Logger::error_with_component(
                    COMPONENT,
                    &format!("Error fetching expense data for {}: {}", id, e),
                );
                self.alerts.show(FETCH_FAILED_MESSAGE, Severity::Danger);
                LoadOutcome::Failed(e)
            }
        }
    }

    fn is_stale(&self, ticket: u64) -> bool {
        match self.policy {
            StaleResponsePolicy::LastArrivalWins => false,
            StaleResponsePolicy::LatestRequestWins => ticket != self.latest_request.get(),
        }
    }
}
