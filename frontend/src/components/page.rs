//! Element lookups for the server-rendered expense page.
//!
//! Everything the controller touches is resolved once, up front. Missing
//! elements are logged and the behaviour that needs them is skipped.

use shared::{ExpenseFormFields, ExpenseRecord};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::error::MissingElement;
use crate::services::logging::Logger;

const COMPONENT: &str = "page";

pub const DATE_INPUT_ID: &str = "date";
pub const EXPENSE_FORM_ID: &str = "expense-form";
pub const EDIT_FORM_ID: &str = "edit-expense-form";
pub const ALERT_CONTAINER_ID: &str = "alert-container";
pub const DELETE_FORM_SELECTOR: &str = ".delete-form";
pub const EDIT_BUTTON_SELECTOR: &str = ".edit-btn";
pub const EDIT_ID_ATTRIBUTE: &str = "data-id";

/// Look up an element by id and cast it to the expected type
pub fn by_id<T: JsCast>(document: &Document, id: &'static str) -> Result<T, MissingElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or(MissingElement { selector: id })
}

/// All elements matching `selector` that have the expected type
pub fn all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        Logger::error_with_component(COMPONENT, &format!("Invalid selector '{}'", selector));
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn optional<T>(result: Result<T, MissingElement>) -> Option<T> {
    match result {
        Ok(element) => Some(element),
        Err(missing) => {
            Logger::warn_with_component(COMPONENT, &missing.to_string());
            None
        }
    }
}

/// Current value of an input, select or textarea
pub fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

/// Write the value of an input, select or textarea
pub fn set_control_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else {
        Logger::warn_with_component(
            COMPONENT,
            &format!("<{}> is not a form control", element.tag_name().to_lowercase()),
        );
    }
}

/// The chosen option of a select. An empty value or a disabled placeholder
/// option counts as nothing chosen.
pub fn selected_value(select: &Element) -> Option<String> {
    let option = select.query_selector("option:checked").ok().flatten()?;
    if option.has_attribute("disabled") {
        return None;
    }

    let value = control_value(select);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Read the fields of an add or edit form by their `name` attributes
pub fn read_form_fields(form: &HtmlFormElement) -> ExpenseFormFields {
    let field = |selector: &str| form.query_selector(selector).ok().flatten();
    let text = |selector: &str| field(selector).map(|el| control_value(&el)).unwrap_or_default();
    let choice = |selector: &str| field(selector).and_then(|el| selected_value(&el));

    ExpenseFormFields {
        description: text("[name='description']"),
        category: choice("select[name='category']"),
        amount: text("[name='amount']"),
        date: text("[name='date']"),
        payment_method: choice("select[name='payment_method']"),
    }
}

/// The edit form together with the controls the prefill writes into
#[derive(Clone)]
pub struct EditFormFields {
    pub form: HtmlFormElement,
    pub id: Element,
    pub description: Element,
    pub category: Element,
    pub amount: Element,
    pub date: Element,
    pub payment_method: Element,
}

impl EditFormFields {
    pub fn resolve(document: &Document) -> Result<Self, MissingElement> {
        Ok(Self {
            form: by_id(document, EDIT_FORM_ID)?,
            id: by_id(document, "edit-id")?,
            description: by_id(document, "edit-description")?,
            category: by_id(document, "edit-category")?,
            amount: by_id(document, "edit-amount")?,
            date: by_id(document, "edit-date")?,
            payment_method: by_id(document, "edit-payment_method")?,
        })
    }

    /// Copy a record into the form and point the form at its update endpoint
    pub fn fill(&self, record: &ExpenseRecord) {
        set_control_value(&self.id, record.id.as_str());
        set_control_value(&self.description, &record.description);
        set_control_value(&self.category, &record.category);
        set_control_value(&self.amount, &record.amount_input_value());
        set_control_value(&self.date, &record.date);
        set_control_value(&self.payment_method, &record.payment_method);

        if let Err(e) = self.form.set_attribute("action", &record.update_path()) {
            Logger::error_with_component(COMPONENT, &format!("Failed to set edit form action: {:?}", e));
        }
    }
}

/// Every element of the page the controller works with
pub struct PageElements {
    pub date_input: Option<HtmlInputElement>,
    pub expense_form: Option<HtmlFormElement>,
    pub edit_form: Option<HtmlFormElement>,
    pub edit_fields: Option<EditFormFields>,
    pub alert_container: Option<Element>,
    pub delete_forms: Vec<HtmlFormElement>,
    pub edit_buttons: Vec<Element>,
}

impl PageElements {
    pub fn resolve(document: &Document) -> Self {
        let elements = Self {
            date_input: optional(by_id(document, DATE_INPUT_ID)),
            expense_form: optional(by_id(document, EXPENSE_FORM_ID)),
            edit_form: optional(by_id(document, EDIT_FORM_ID)),
            edit_fields: optional(EditFormFields::resolve(document)),
            alert_container: optional(by_id(document, ALERT_CONTAINER_ID)),
            delete_forms: all(document, DELETE_FORM_SELECTOR),
            edit_buttons: all(document, EDIT_BUTTON_SELECTOR),
        };

        Logger::debug_with_component(
            COMPONENT,
            &format!(
                "Resolved page: {} delete forms, {} edit buttons",
                elements.delete_forms.len(),
                elements.edit_buttons.len()
            ),
        );

        elements
    }
}
