use chrono::{Duration, Local};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::lifecycle::{Controller, HttpTransport};
use crate::query::QueryForm;

const FORM_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: Arc<Controller<HttpTransport>>,
    /// What the dashboard form shows; the last submission, or a six-hour
    /// window starting now.
    pub last_form: Arc<Mutex<QueryForm>>,
}

impl AppState {
    pub fn new(config: Config, controller: Controller<HttpTransport>) -> Self {
        Self {
            config: Arc::new(config),
            controller: Arc::new(controller),
            last_form: Arc::new(Mutex::new(default_form())),
        }
    }

    pub fn remember_form(&self, form: &QueryForm) {
        if let Ok(mut last) = self.last_form.lock() {
            *last = form.clone();
        }
    }

    pub fn form(&self) -> QueryForm {
        self.last_form
            .lock()
            .map(|form| form.clone())
            .unwrap_or_else(|_| default_form())
    }
}

fn default_form() -> QueryForm {
    let start = Local::now();
    let end = start + Duration::hours(6);
    QueryForm::new(
        25544,
        &start.format(FORM_TIME_FORMAT).to_string(),
        &end.format(FORM_TIME_FORMAT).to_string(),
        60,
    )
}
