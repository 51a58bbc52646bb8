//! Headless model of the subscription page.
//!
//! Each designated element of the markup is a field here; `ui::render_page`
//! turns the model into HTML.

use crate::errors::SubmitError;
use crate::models::SubscriptionPayload;
use crate::phone::{PhoneInput, PhoneInputOptions, PlaceholderNumberType};
use crate::timezone::{TimezoneDetector, TimezoneSelect};
use crate::weekday::greeting_html;
use chrono::Weekday;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Page {
    /// Inner HTML of `#current-day-label`.
    pub current_day_label: String,
    /// Widget attached to `#number`.
    pub number: PhoneInput,
    /// `#timezone`.
    pub timezone: TimezoneSelect,
    /// The detected zone, when the select accepted it.
    pub client_zone: Option<String>,
    pub subscribe_form_hidden: bool,
    pub progress_indicator_hidden: bool,
    /// `.circle-loader` carries `load-complete`.
    pub loader_complete: bool,
    pub checkmark_visible: bool,
}

impl Page {
    /// Runs the page-load initialization for a page shown on `today`.
    pub fn load(today: Weekday, detector: &dyn TimezoneDetector) -> Self {
        let number = PhoneInput::attach(
            "number",
            PhoneInputOptions {
                placeholder_number_type: PlaceholderNumberType::Mobile,
            },
        );

        let mut timezone = TimezoneSelect::default();
        let client_zone = match detector.guess() {
            Some(guess) if timezone.select(&guess) => Some(guess),
            Some(guess) if !guess.is_empty() => {
                debug!("guessed timezone `{guess}` is not offered, keeping default");
                None
            }
            _ => {
                debug!("no timezone guess, keeping default");
                None
            }
        };

        Self {
            current_day_label: greeting_html(today),
            number,
            timezone,
            client_zone,
            subscribe_form_hidden: false,
            progress_indicator_hidden: true,
            loader_complete: false,
            checkmark_visible: false,
        }
    }

    /// Swaps the form panel for the progress indicator.
    pub fn begin_submission(&mut self) {
        self.subscribe_form_hidden = true;
        self.progress_indicator_hidden = false;
    }

    pub fn payload(&self) -> SubscriptionPayload {
        SubscriptionPayload {
            timezone: self.timezone.value().to_string(),
            number: self.number.get_number(),
        }
    }

    /// Applies the outcome of the subscribe request.
    ///
    /// Success finishes the loader and shows the checkmark. Failure puts the
    /// panels back exactly as they were before `begin_submission`.
    pub fn finish_submission(&mut self, outcome: &Result<Value, SubmitError>) {
        match outcome {
            Ok(_) => {
                self.loader_complete = true;
                self.checkmark_visible = true;
            }
            Err(_) => {
                self.subscribe_form_hidden = false;
                self.progress_indicator_hidden = true;
            }
        }
    }
}
