//! The page controller: wires the expense page's forms and buttons to the
//! validation, confirmation, prefill and alert behaviour.

use std::rc::Rc;

use chrono::NaiveDate;
use gloo::events::{EventListener, EventListenerOptions};
use shared::{validate_expense_form, ExpenseId, Severity, ValidationResult};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, EventTarget, HtmlFormElement};

use crate::components::alert::AlertRenderer;
use crate::components::date_field::apply_default_date;
use crate::components::delete_guard::{Confirmer, DeleteGuard};
use crate::components::edit_prefill::EditPrefill;
use crate::components::page::{read_form_fields, PageElements, EDIT_ID_ATTRIBUTE};
use crate::services::api::ExpenseSource;
use crate::services::config::ControllerConfig;
use crate::services::logging::Logger;

const COMPONENT: &str = "controller";

pub struct ExpenseFormController {
    elements: PageElements,
    alerts: AlertRenderer,
    delete_guard: DeleteGuard,
    edit_prefill: Option<EditPrefill>,
}

impl ExpenseFormController {
    pub fn new(
        document: &Document,
        config: &ControllerConfig,
        source: Rc<dyn ExpenseSource>,
        confirmer: Rc<dyn Confirmer>,
    ) -> Self {
        let elements = PageElements::resolve(document);
        let alerts = AlertRenderer::new(document, elements.alert_container.clone(), config.alert_timeout_ms);
        let edit_prefill = elements.edit_fields.clone().map(|fields| {
            EditPrefill::new(source, fields, alerts.clone(), config.stale_responses)
        });

        Self {
            elements,
            alerts,
            delete_guard: DeleteGuard::new(confirmer),
            edit_prefill,
        }
    }

    /// Put today's date into the add form
    pub fn initialize_date(&self, today: NaiveDate) {
        apply_default_date(self.elements.date_input.as_ref(), today);
    }

    /// Validate a form and warn the user about the first problem found
    pub fn validate_form(&self, form: &HtmlFormElement) -> ValidationResult {
        let result = validate_expense_form(&read_form_fields(form));
        if let Some(message) = &result.message {
            self.alerts.show(message, Severity::Warning);
        }
        result
    }

    /// Register the page's event listeners. They stay active for as long as
    /// the returned handle is alive.
    pub fn attach(self) -> AttachedController {
        let controller = Rc::new(self);
        let mut listeners = Vec::new();

        let validated_forms = [&controller.elements.expense_form, &controller.elements.edit_form];
        for form in validated_forms.into_iter().flatten() {
            listeners.push(validation_listener(&controller, form));
        }

        for form in &controller.elements.delete_forms {
            let guard = controller.delete_guard.clone();
            listeners.push(cancelable_listener(form, "submit", move |event| {
                guard.on_submit(event);
            }));
        }

        match &controller.edit_prefill {
            Some(prefill) => {
                for button in &controller.elements.edit_buttons {
                    listeners.push(edit_listener(button, prefill));
                }
            }
            None if !controller.elements.edit_buttons.is_empty() => {
                Logger::warn_with_component(COMPONENT, "Edit buttons present but the edit form is incomplete");
            }
            None => {}
        }

        Logger::info_with_component(COMPONENT, &format!("Attached {} listeners", listeners.len()));

        AttachedController { controller, listeners }
    }
}

fn validation_listener(controller: &Rc<ExpenseFormController>, form: &HtmlFormElement) -> EventListener {
    let controller = Rc::clone(controller);
    let target = form.clone();
    cancelable_listener(form, "submit", move |event| {
        if !controller.validate_form(&target).is_valid {
            event.prevent_default();
        }
    })
}

fn cancelable_listener<F>(target: &EventTarget, event_type: &'static str, callback: F) -> EventListener
where
    F: FnMut(&web_sys::Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
}

fn edit_listener(button: &Element, prefill: &EditPrefill) -> EventListener {
    let prefill = prefill.clone();
    let source = button.clone();
    EventListener::new(button, "click", move |_| {
        let raw = source.get_attribute(EDIT_ID_ATTRIBUTE).unwrap_or_default();
        let Some(id) = ExpenseId::from_attribute(&raw) else {
            Logger::warn_with_component(COMPONENT, "Edit button has no data-id");
            return;
        };

        let prefill = prefill.clone();
        spawn_local(async move {
            prefill.load(id).await;
        });
    })
}

/// A controller whose listeners are registered on the page
pub struct AttachedController {
    controller: Rc<ExpenseFormController>,
    listeners: Vec<EventListener>,
}

impl AttachedController {
    pub fn controller(&self) -> &ExpenseFormController {
        &self.controller
    }

    /// Keep the listeners registered for the rest of the page's life
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}
