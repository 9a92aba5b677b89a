pub mod matcher;
pub mod view;
pub mod wizard;

pub use matcher::{is_icao_shaped, search_airports, MAX_RESULTS};
pub use view::View;
pub use wizard::{BookingDraft, BookingWizard, Screen, WizardError};
