pub mod models;

pub use models::{
    Aircraft, Airport, ConciergeRequest, Contact, Flight, FlightStatus, MembershipTier,
    RequestStatus, Role, TripType, User,
};
