use std::rc::Rc;

use anyhow::Context;

mod components;
mod controller;
mod error;
mod services;
#[cfg(test)]
mod test_support;

use components::delete_guard::BrowserConfirmer;
use controller::ExpenseFormController;
use services::api::ApiClient;
use services::config::ControllerConfig;
use services::date_utils;
use services::logging::Logger;

fn main() {
    if let Err(e) = run() {
        Logger::error_with_component("bootstrap", &format!("{:#}", e));
    }
}

fn run() -> anyhow::Result<()> {
    let window = web_sys::window().context("no global window")?;
    let document = window.document().context("window has no document")?;

    let config = ControllerConfig::from_document(&document);
    Logger::set_level(config.log_level);

    let api_client = ApiClient::with_base_url(config.api_base.clone());
    let attached = ExpenseFormController::new(
        &document,
        &config,
        Rc::new(api_client),
        Rc::new(BrowserConfirmer),
    )
    .attach();

    match date_utils::today() {
        Some(today) => attached.controller().initialize_date(today),
        None => Logger::warn_with_component("bootstrap", "Browser clock gave an invalid date"),
    }

    attached.forget();
    Ok(())
}
