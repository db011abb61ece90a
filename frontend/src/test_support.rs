//! DOM fixtures and stubs shared by the browser tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;
use shared::{ExpenseId, ExpenseRecord};
use web_sys::{Document, Element, Event, EventInit, HtmlFormElement};

use crate::components::delete_guard::Confirmer;
use crate::components::page::{all, by_id, control_value, set_control_value, ALERT_CONTAINER_ID};
use crate::error::ApiError;
use crate::services::api::ExpenseSource;

const EXPENSE_PAGE: &str = r#"
<div id="alert-container"></div>
<form id="expense-form" action="/add" method="post">
  <input type="text" id="description" name="description">
  <select id="category" name="category">
    <option value="" disabled selected>Select a category</option>
    <option value="Food">Food</option>
    <option value="Transport">Transport</option>
  </select>
  <input type="number" id="amount" name="amount" step="0.01">
  <input type="date" id="date" name="date">
  <select id="payment_method" name="payment_method">
    <option value="" disabled selected>Select a payment method</option>
    <option value="Cash">Cash</option>
    <option value="Card">Card</option>
  </select>
</form>
<table>
  <tr>
    <td><button type="button" class="edit-btn" data-id="42">Edit</button></td>
    <td><form class="delete-form" action="/delete/42" method="post"><button type="submit">Delete</button></form></td>
  </tr>
  <tr>
    <td><button type="button" class="edit-btn">Edit</button></td>
    <td><form class="delete-form" action="/delete/43" method="post"><button type="submit">Delete</button></form></td>
  </tr>
</table>
<form id="edit-expense-form" method="post">
  <input type="hidden" id="edit-id" name="id">
  <input type="text" id="edit-description" name="description">
  <select id="edit-category" name="category">
    <option value="" disabled selected>Select a category</option>
    <option value="Food">Food</option>
    <option value="Transport">Transport</option>
  </select>
  <input type="number" id="edit-amount" name="amount" step="0.01">
  <input type="date" id="edit-date" name="date">
  <select id="edit-payment_method" name="payment_method">
    <option value="" disabled selected>Select a payment method</option>
    <option value="Cash">Cash</option>
    <option value="Card">Card</option>
  </select>
</form>
"#;

/// Markup mounted into the test document, removed again on drop
pub struct Fixture {
    pub document: Document,
    root: Element,
}

impl Fixture {
    pub fn new(html: &str) -> Self {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        Self { document, root }
    }

    pub fn expense_page() -> Self {
        Self::new(EXPENSE_PAGE)
    }

    pub fn element(&self, id: &'static str) -> Element {
        by_id(&self.document, id).unwrap()
    }

    pub fn form(&self, id: &'static str) -> HtmlFormElement {
        by_id(&self.document, id).unwrap()
    }

    pub fn control(&self, id: &'static str) -> String {
        control_value(&self.element(id))
    }

    pub fn set_control(&self, id: &'static str, value: &str) {
        set_control_value(&self.element(id), value);
    }

    pub fn fill_add_form(&self, description: &str, category: &str, amount: &str, date: &str, payment: &str) {
        self.set_control("description", description);
        self.set_control("category", category);
        self.set_control("amount", amount);
        self.set_control("date", date);
        self.set_control("payment_method", payment);
    }

    pub fn fill_edit_form(&self, description: &str, category: &str, amount: &str, date: &str, payment: &str) {
        self.set_control("edit-description", description);
        self.set_control("edit-category", category);
        self.set_control("edit-amount", amount);
        self.set_control("edit-date", date);
        self.set_control("edit-payment_method", payment);
    }

    pub fn edit_values(&self) -> [String; 6] {
        [
            self.control("edit-id"),
            self.control("edit-description"),
            self.control("edit-category"),
            self.control("edit-amount"),
            self.control("edit-date"),
            self.control("edit-payment_method"),
        ]
    }

    pub fn edit_form_action(&self) -> Option<String> {
        self.element("edit-expense-form").get_attribute("action")
    }

    pub fn alert_container(&self) -> Element {
        self.element(ALERT_CONTAINER_ID)
    }

    pub fn alert_count(&self) -> u32 {
        self.document.query_selector_all("#alert-container .alert").unwrap().length()
    }

    pub fn delete_forms(&self) -> Vec<HtmlFormElement> {
        all(&self.document, ".delete-form")
    }

    pub fn edit_buttons(&self) -> Vec<Element> {
        all(&self.document, ".edit-btn")
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

/// Dispatch a cancelable submit event. Returns false when a listener
/// prevented the submission.
pub fn submit(form: &HtmlFormElement) -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&event).unwrap()
}

/// Coffee expense with id 42
pub fn coffee() -> ExpenseRecord {
    serde_json::from_str(
        r#"{"id":42,"description":"Coffee","category":"Food","amount":3.5,"date":"2024-01-01","payment_method":"Cash"}"#,
    )
    .unwrap()
}

/// Canned responses keyed by expense id, each delivered after a delay
pub struct StubSource {
    responses: HashMap<String, (u32, Result<ExpenseRecord, ApiError>)>,
    calls: Rc<Cell<u32>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_record(mut self, record: ExpenseRecord, delay_ms: u32) -> Self {
        self.responses
            .insert(record.id.to_string(), (delay_ms, Ok(record)));
        self
    }

    pub fn with_error(mut self, id: &str, error: ApiError, delay_ms: u32) -> Self {
        self.responses.insert(id.to_string(), (delay_ms, Err(error)));
        self
    }

    pub fn calls(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.calls)
    }
}

#[async_trait(?Send)]
impl ExpenseSource for StubSource {
    async fn get_expense(&self, id: &ExpenseId) -> Result<ExpenseRecord, ApiError> {
        self.calls.set(self.calls.get() + 1);
        let (delay, response) = self.responses.get(id.as_str()).cloned().unwrap_or((
            0,
            Err(ApiError::Status {
                status: 404,
                message: "Expense not found".to_string(),
            }),
        ));
        TimeoutFuture::new(delay).await;
        response
    }
}

/// Answers every prompt the same way and records what was asked
pub struct StubConfirmer {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl StubConfirmer {
    pub fn answering(answer: bool) -> Rc<Self> {
        Rc::new(Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirmer for StubConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }
}
