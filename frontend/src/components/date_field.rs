use chrono::NaiveDate;
use web_sys::HtmlInputElement;

use crate::services::logging::Logger;

/// Pre-fill the add form's date input with `today`
pub fn apply_default_date(input: Option<&HtmlInputElement>, today: NaiveDate) {
    match input {
        Some(input) => input.set_value(&shared::iso_date(today)),
        None => Logger::debug_with_component("date-field", "No date input on this page"),
    }
}
