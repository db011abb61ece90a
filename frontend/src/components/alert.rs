use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use shared::Severity;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::services::logging::Logger;

const COMPONENT: &str = "alert";

/// Shows one dismissible banner at a time inside the notification region
#[derive(Clone)]
pub struct AlertRenderer {
    document: Document,
    container: Option<Element>,
    timeout_ms: u32,
    /// Close handler of the alert currently shown; replaced on every render
    close_listener: Rc<RefCell<Option<EventListener>>>,
}

impl AlertRenderer {
    pub fn new(document: &Document, container: Option<Element>, timeout_ms: u32) -> Self {
        Self {
            document: document.clone(),
            container,
            timeout_ms,
            close_listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Replace whatever the region shows with a new alert. Returns the alert
    /// element, or `None` when there is nowhere to render it.
    pub fn show(&self, message: &str, severity: Severity) -> Option<Element> {
        let Some(container) = &self.container else {
            Logger::warn_with_component(
                COMPONENT,
                &format!("No alert container, dropping {} alert: {}", severity, message),
            );
            return None;
        };

        match self.render(container, message, severity) {
            Ok(alert) => {
                self.schedule_dismiss(&alert);
                Some(alert)
            }
            Err(e) => {
                Logger::error_with_component(COMPONENT, &format!("Failed to render alert: {:?}", e));
                None
            }
        }
    }

    fn render(&self, container: &Element, message: &str, severity: Severity) -> Result<Element, JsValue> {
        container.set_inner_html("");
        self.close_listener.borrow_mut().take();

        let alert = self.document.create_element("div")?;
        alert.set_class_name(&format!(
            "alert {} alert-dismissible fade show shadow-sm",
            severity.alert_class()
        ));
        alert.set_attribute("role", "alert")?;
        alert.append_child(&self.document.create_text_node(message))?;

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert")?;
        close.set_attribute("aria-label", "Close")?;
        alert.append_child(&close)?;

        let dismissed = alert.clone();
        let listener = EventListener::once(&close, "click", move |_| dismissed.remove());
        *self.close_listener.borrow_mut() = Some(listener);

        container.append_child(&alert)?;
        Ok(alert)
    }

    fn schedule_dismiss(&self, alert: &Element) {
        // Only ever removes this alert; a newer one in the region is left alone.
        let alert = alert.clone();
        Timeout::new(self.timeout_ms, move || alert.remove()).forget();
    }
}
