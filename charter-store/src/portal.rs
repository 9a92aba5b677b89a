use charter_shared::{
    ConciergeRequest, Flight, FlightStatus, RequestStatus, Role, User,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::RwLock;

use crate::seed::SeedData;

/// The demo admin credential checked verbatim on login. A stand-in for a
/// real identity provider; see DESIGN.md.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PortalError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PortalStats {
    pub users: usize,
    pub flights: usize,
    pub open_requests: usize,
    /// Sum of non-cancelled flight prices, the dashboard headline number.
    pub total_revenue: i64,
}

/// In-memory stand-in for a backing store, injected into the portal's
/// construction so a real persistence layer can be substituted without
/// touching handler logic. Locks are never held across an await.
pub struct PortalStore {
    users: Vec<User>,
    flights: RwLock<Vec<Flight>>,
    requests: RwLock<Vec<ConciergeRequest>>,
    admin: AdminCredential,
}

impl PortalStore {
    pub fn new(seed: SeedData, admin: AdminCredential) -> Self {
        Self {
            users: seed.users,
            flights: RwLock::new(seed.flights),
            requests: RwLock::new(seed.requests),
            admin,
        }
    }

    // ------------------------------------------------------------------
    // Users (seed-only collection)
    // ------------------------------------------------------------------

    pub fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn user_by_id(&self, id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Two-branch demo login. The exact admin email+password pair grants the
    /// admin account; otherwise any non-empty password paired with a seeded
    /// user-role email grants that user. Password content is never checked
    /// beyond non-emptiness. No lockout, no hashing: demo-only.
    pub fn login(&self, email: &str, password: &str) -> Result<User, PortalError> {
        if email == self.admin.email && password == self.admin.password {
            if let Some(admin) = self.user_by_email(email) {
                return Ok(admin);
            }
        }

        if !password.is_empty() {
            if let Some(user) = self.user_by_email(email) {
                if user.role == Role::User {
                    return Ok(user);
                }
            }
        }

        Err(PortalError::InvalidCredentials)
    }

    // ------------------------------------------------------------------
    // Flights
    // ------------------------------------------------------------------

    pub fn flights(&self) -> Vec<Flight> {
        self.flights.read().unwrap().clone()
    }

    pub fn flight_by_id(&self, id: &str) -> Option<Flight> {
        self.flights.read().unwrap().iter().find(|f| f.id == id).cloned()
    }

    /// Future flights for a user, Cancelled excluded, soonest first.
    pub fn upcoming_flights(&self, user_id: &str, now: DateTime<Utc>) -> Vec<Flight> {
        let mut flights: Vec<Flight> = self
            .flights
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && f.date > now && f.status != FlightStatus::Cancelled)
            .cloned()
            .collect();
        flights.sort_by_key(|f| f.date);
        flights
    }

    /// Past flights for a user, latest first.
    pub fn past_flights(&self, user_id: &str, now: DateTime<Utc>) -> Vec<Flight> {
        let mut flights: Vec<Flight> = self
            .flights
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && f.date < now)
            .cloned()
            .collect();
        flights.sort_by_key(|f| std::cmp::Reverse(f.date));
        flights
    }

    /// Overwrites the status of the matching flight. Any status may be set to
    /// any other; no-op (returning false) when the id is unknown.
    pub fn set_flight_status(&self, flight_id: &str, status: FlightStatus) -> bool {
        let mut flights = self.flights.write().unwrap();
        match flights.iter_mut().find(|f| f.id == flight_id) {
            Some(flight) => {
                flight.status = status;
                true
            }
            None => false,
        }
    }

    /// Hard delete, irreversible within the session. No-op when absent.
    pub fn delete_flight(&self, flight_id: &str) -> bool {
        let mut flights = self.flights.write().unwrap();
        let before = flights.len();
        flights.retain(|f| f.id != flight_id);
        flights.len() != before
    }

    /// Appends a Pending flight with a display-style random id, the way the
    /// portal booking form does.
    pub fn book_flight(
        &self,
        user_id: &str,
        origin: &str,
        destination: &str,
        date: DateTime<Utc>,
        aircraft: &str,
        passengers: u32,
    ) -> Flight {
        let flight = Flight {
            id: format!("FL-{}", rand::thread_rng().gen_range(1000..10000)),
            user_id: user_id.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            date,
            aircraft: aircraft.to_string(),
            status: FlightStatus::Pending,
            passengers,
            // Flat base price; no distance/aircraft computation in scope
            price: 6_500,
        };
        self.flights.write().unwrap().push(flight.clone());
        tracing::info!(flight_id = %flight.id, user_id, "flight booked");
        flight
    }

    // ------------------------------------------------------------------
    // Concierge requests
    // ------------------------------------------------------------------

    pub fn requests(&self) -> Vec<ConciergeRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn requests_for(&self, user_id: &str) -> Vec<ConciergeRequest> {
        self.requests
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Sets status to Fulfilled unconditionally; no-op if already fulfilled
    /// or not found. Open -> Fulfilled is the only transition.
    pub fn fulfill_request(&self, request_id: &str) -> bool {
        let mut requests = self.requests.write().unwrap();
        match requests.iter_mut().find(|r| r.id == request_id) {
            Some(request) => {
                request.status = RequestStatus::Fulfilled;
                true
            }
            None => false,
        }
    }

    /// Prepends a new Open request. The caller is an authenticated session;
    /// the flight id is taken as given (no ownership validation, per the
    /// portal's behavior).
    pub fn submit_request(
        &self,
        flight_id: &str,
        user_id: &str,
        service_type: &str,
        details: &str,
    ) -> ConciergeRequest {
        let request = ConciergeRequest {
            id: format!("CR-{}", rand::thread_rng().gen_range(0..10000)),
            flight_id: flight_id.to_string(),
            user_id: user_id.to_string(),
            service_type: service_type.to_string(),
            details: details.to_string(),
            status: RequestStatus::Open,
            submitted_at: Utc::now(),
        };
        self.requests.write().unwrap().insert(0, request.clone());
        request
    }

    // ------------------------------------------------------------------
    // Admin dashboard
    // ------------------------------------------------------------------

    pub fn stats(&self) -> PortalStats {
        let flights = self.flights.read().unwrap();
        PortalStats {
            users: self.users.len(),
            flights: flights.len(),
            open_requests: self
                .requests
                .read()
                .unwrap()
                .iter()
                .filter(|r| r.status == RequestStatus::Open)
                .count(),
            total_revenue: flights
                .iter()
                .filter(|f| f.status != FlightStatus::Cancelled)
                .map(|f| f.price)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed;

    fn store() -> PortalStore {
        PortalStore::new(
            seed(),
            AdminCredential {
                email: "mauricio@stokeleads.com".to_string(),
                password: "StokeLeadsD2".to_string(),
            },
        )
    }

    #[test]
    fn test_delete_flight_removes_exactly_one() {
        let store = store();
        let before = store.flights();
        assert!(before.iter().any(|f| f.id == "FL-1042"));

        assert!(store.delete_flight("FL-1042"));
        let after = store.flights();
        assert_eq!(after.len(), before.len() - 1);
        assert!(!after.iter().any(|f| f.id == "FL-1042"));

        // Everything else survives untouched
        for flight in &after {
            let original = before.iter().find(|f| f.id == flight.id).unwrap();
            assert_eq!(original.price, flight.price);
            assert_eq!(original.status, flight.status);
        }

        // Second call is a no-op
        assert!(!store.delete_flight("FL-1042"));
        assert_eq!(store.flights().len(), after.len());
    }

    #[test]
    fn test_set_status_touches_only_status() {
        let store = store();
        let before = store.flight_by_id("FL-1099").unwrap();
        assert_eq!(before.status, FlightStatus::Pending);

        assert!(store.set_flight_status("FL-1099", FlightStatus::Confirmed));
        let after = store.flight_by_id("FL-1099").unwrap();
        assert_eq!(after.status, FlightStatus::Confirmed);
        assert_eq!(after.origin, before.origin);
        assert_eq!(after.destination, before.destination);
        assert_eq!(after.date, before.date);
        assert_eq!(after.price, before.price);
        assert_eq!(after.passengers, before.passengers);

        // Unknown id is a no-op
        assert!(!store.set_flight_status("FL-0000", FlightStatus::Cancelled));
    }

    #[test]
    fn test_login_admin_branch() {
        let store = store();
        let user = store.login("mauricio@stokeleads.com", "StokeLeadsD2").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id, "admin1");
    }

    #[test]
    fn test_login_seeded_user_any_password() {
        let store = store();
        let user = store.login("sarah@example.com", "whatever").unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.id, "user2");

        // Email matching is case-insensitive
        let user = store.login("SARAH@example.com", "x").unwrap();
        assert_eq!(user.id, "user2");
    }

    #[test]
    fn test_login_rejections() {
        let store = store();
        // Wrong admin password does not fall through to the demo branch
        assert_eq!(
            store.login("mauricio@stokeleads.com", "wrong"),
            Err(PortalError::InvalidCredentials)
        );
        // Empty password
        assert_eq!(
            store.login("sarah@example.com", ""),
            Err(PortalError::InvalidCredentials)
        );
        // Unknown email
        assert_eq!(
            store.login("nobody@example.com", "pw"),
            Err(PortalError::InvalidCredentials)
        );
    }

    #[test]
    fn test_fulfill_request() {
        let store = store();
        assert!(store.fulfill_request("CR-1"));
        assert_eq!(store.requests()[0].status, RequestStatus::Fulfilled);

        // Already fulfilled and unknown ids are quiet no-ops
        assert!(store.fulfill_request("CR-1"));
        assert!(!store.fulfill_request("CR-9999"));
    }

    #[test]
    fn test_submit_request_prepends_open() {
        let store = store();
        let request = store.submit_request("FL-1042", "user1", "Catering", "Two oat lattes");
        assert!(request.id.starts_with("CR-"));
        assert_eq!(request.status, RequestStatus::Open);

        let all = store.requests();
        assert_eq!(all[0].id, request.id);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_book_flight_is_pending() {
        let store = store();
        let flight = store.book_flight(
            "user2",
            "RDM",
            "KSUN",
            Utc::now() + chrono::Duration::days(7),
            "Diamond DA62 (Orange)",
            3,
        );
        assert!(flight.id.starts_with("FL-"));
        assert_eq!(flight.status, FlightStatus::Pending);
        assert!(store.flights().iter().any(|f| f.id == flight.id));
    }

    #[test]
    fn test_upcoming_and_past_splits() {
        let store = store();
        let now = Utc::now();

        let upcoming = store.upcoming_flights("user1", now);
        assert_eq!(upcoming.len(), 2);
        // Soonest first
        assert_eq!(upcoming[0].id, "FL-1042");
        assert_eq!(upcoming[1].id, "FL-1099");

        let past = store.past_flights("user1", now);
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].id, "FL-0901");
    }

    #[test]
    fn test_stats_counts_open_requests() {
        let store = store();
        let stats = store.stats();
        assert_eq!(stats.users, 3);
        assert_eq!(stats.flights, 4);
        assert_eq!(stats.open_requests, 1);

        store.fulfill_request("CR-1");
        assert_eq!(store.stats().open_requests, 0);
    }

    #[test]
    fn test_stats_revenue_excludes_cancelled() {
        let store = store();
        // 6,500 + 8,200 + 12,000 + 9,500 over the seed flights
        assert_eq!(store.stats().total_revenue, 36_200);

        store.set_flight_status("FL-1099", FlightStatus::Cancelled);
        assert_eq!(store.stats().total_revenue, 28_000);

        store.delete_flight("FL-0901");
        assert_eq!(store.stats().total_revenue, 16_000);
    }
}
