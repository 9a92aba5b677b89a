use charter_shared::{Aircraft, Contact, TripType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four booking screens. Wire values match the portal's screen keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Screen {
    Home,
    Results,
    Details,
    Confirmation,
}

/// The wizard draft: the in-progress booking accumulated across screens.
/// Created fresh on wizard entry, owned exclusively by the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub trip_type: TripType,
    pub origin: String,
    pub destination: String,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    pub selected_aircraft: Option<Aircraft>,
    pub contact: Contact,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            trip_type: TripType::RoundTrip,
            // Home base: Bend Municipal
            origin: "KBDN".to_string(),
            destination: String::new(),
            depart_date: None,
            return_date: None,
            passengers: 2,
            selected_aircraft: None,
            contact: Contact::default(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Please fill in destination and departure date.")]
    MissingSearchFields,

    #[error("Please fill in required contact details.")]
    MissingContactFields,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("No submission in flight")]
    NotSubmitting,

    #[error("Action {action} is not valid on screen {screen:?}")]
    InvalidTransition { screen: Screen, action: &'static str },
}

pub const MAX_PASSENGERS: u32 = 19;

/// Screen/state machine for the booking funnel.
///
/// Forward path is `Home -> Results -> Details -> Confirmation`, with
/// backward moves `Results -> Home` and `Details -> Results` and a terminal
/// `reset` from `Confirmation` back to `Home`. The details submission is
/// two-phase (`begin_submission` / `finish_submission`) so the caller can run
/// the contact relay in between without the wizard being held across an
/// await; the submitting flag blocks duplicate submission meanwhile.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWizard {
    screen: Screen,
    draft: BookingDraft,
    submitting: bool,
    error: Option<String>,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            draft: BookingDraft::default(),
            submitting: false,
            error: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // ------------------------------------------------------------------
    // Draft field updates (incremental, not screen-gated)
    // ------------------------------------------------------------------

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.draft.trip_type = trip_type;
        if trip_type == TripType::OneWay {
            self.draft.return_date = None;
        }
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.draft.origin = origin.into();
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.draft.destination = destination.into();
    }

    pub fn set_dates(&mut self, depart: Option<NaiveDate>, ret: Option<NaiveDate>) {
        self.draft.depart_date = depart;
        self.draft.return_date = ret;
    }

    /// Passenger count is clamped to the 1..=19 the search widget allows.
    pub fn set_passengers(&mut self, passengers: u32) {
        self.draft.passengers = passengers.clamp(1, MAX_PASSENGERS);
    }

    pub fn set_contact(&mut self, contact: Contact) {
        self.draft.contact = contact;
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Home -> Results. Requires a destination and a departure date; on
    /// violation the wizard is untouched and the caller surfaces the message.
    pub fn search(&mut self) -> Result<(), WizardError> {
        if self.screen != Screen::Home {
            return Err(WizardError::InvalidTransition {
                screen: self.screen,
                action: "search",
            });
        }
        if self.draft.destination.trim().is_empty() || self.draft.depart_date.is_none() {
            return Err(WizardError::MissingSearchFields);
        }
        self.screen = Screen::Results;
        Ok(())
    }

    /// Results -> Details, recording the chosen aircraft on the draft.
    pub fn select_aircraft(&mut self, aircraft: Aircraft) -> Result<(), WizardError> {
        if self.screen != Screen::Results {
            return Err(WizardError::InvalidTransition {
                screen: self.screen,
                action: "select_aircraft",
            });
        }
        self.draft.selected_aircraft = Some(aircraft);
        self.screen = Screen::Details;
        Ok(())
    }

    /// Results -> Home or Details -> Results.
    pub fn back(&mut self) -> Result<(), WizardError> {
        match self.screen {
            Screen::Results => {
                self.screen = Screen::Home;
                Ok(())
            }
            Screen::Details => {
                self.screen = Screen::Results;
                Ok(())
            }
            screen => Err(WizardError::InvalidTransition {
                screen,
                action: "back",
            }),
        }
    }

    /// Phase one of the details submit: validates contact fields and raises
    /// the submitting flag. Rejected while a submission is pending.
    pub fn begin_submission(&mut self) -> Result<&Contact, WizardError> {
        if self.screen != Screen::Details {
            return Err(WizardError::InvalidTransition {
                screen: self.screen,
                action: "submit",
            });
        }
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        if self.draft.contact.name.trim().is_empty() || self.draft.contact.email.trim().is_empty()
        {
            return Err(WizardError::MissingContactFields);
        }
        self.submitting = true;
        self.error = None;
        Ok(&self.draft.contact)
    }

    /// Phase two: success moves to Confirmation, failure stays on Details
    /// with the message recorded inline. The flag clears either way.
    pub fn finish_submission(&mut self, outcome: Result<(), String>) -> Result<(), WizardError> {
        if !self.submitting {
            return Err(WizardError::NotSubmitting);
        }
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.screen = Screen::Confirmation;
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        Ok(())
    }

    /// Confirmation -> Home. Clears the aircraft selection, destination and
    /// both dates; origin, trip type, passenger count and contact survive.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.screen != Screen::Confirmation {
            return Err(WizardError::InvalidTransition {
                screen: self.screen,
                action: "reset",
            });
        }
        self.draft.selected_aircraft = None;
        self.draft.destination = String::new();
        self.draft.depart_date = None;
        self.draft.return_date = None;
        self.error = None;
        self.screen = Screen::Home;
        Ok(())
    }
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}
