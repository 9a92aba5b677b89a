use charter_shared::{
    ConciergeRequest, Flight, FlightStatus, MembershipTier, RequestStatus, Role, User,
};
use chrono::{Duration, TimeZone, Utc};

/// The collections loaded at session start. There is no backing persistence;
/// every Flight.user_id and ConciergeRequest reference is valid by
/// construction of this data.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub flights: Vec<Flight>,
    pub requests: Vec<ConciergeRequest>,
}

pub fn seed() -> SeedData {
    SeedData {
        users: seed_users(),
        flights: seed_flights(),
        requests: seed_requests(),
    }
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "admin1".to_string(),
            name: "Mauricio Admin".to_string(),
            email: "mauricio@stokeleads.com".to_string(),
            role: Role::Admin,
            tier: MembershipTier::Platinum,
            balance: 0,
            joined_date: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        },
        User {
            id: "user1".to_string(),
            name: "Alex Croft".to_string(),
            email: "alex.croft@example.com".to_string(),
            role: Role::User,
            tier: MembershipTier::Platinum,
            balance: 12_500,
            joined_date: Utc.with_ymd_and_hms(2022, 4, 15, 0, 0, 0).unwrap(),
        },
        User {
            id: "user2".to_string(),
            name: "Sarah Jenkins".to_string(),
            email: "sarah@example.com".to_string(),
            role: Role::User,
            tier: MembershipTier::Gold,
            balance: 4_500,
            joined_date: Utc.with_ymd_and_hms(2023, 6, 20, 0, 0, 0).unwrap(),
        },
    ]
}

fn seed_flights() -> Vec<Flight> {
    let now = Utc::now();
    vec![
        Flight {
            id: "FL-1042".to_string(),
            user_id: "user1".to_string(),
            origin: "RDM".to_string(),
            destination: "SFO".to_string(),
            date: now + Duration::days(14),
            aircraft: "Diamond DA62 (Orange)".to_string(),
            status: FlightStatus::Confirmed,
            passengers: 4,
            price: 6_500,
        },
        Flight {
            id: "FL-1099".to_string(),
            user_id: "user1".to_string(),
            origin: "SEA".to_string(),
            destination: "RDM".to_string(),
            date: now + Duration::days(32),
            aircraft: "Diamond DA62 (Blue)".to_string(),
            status: FlightStatus::Pending,
            passengers: 2,
            price: 8_200,
        },
        Flight {
            id: "FL-0901".to_string(),
            user_id: "user1".to_string(),
            origin: "RDM".to_string(),
            destination: "VNY".to_string(),
            date: now - Duration::days(45),
            aircraft: "Cirrus Vision Jet".to_string(),
            status: FlightStatus::Complete,
            passengers: 6,
            price: 12_000,
        },
        Flight {
            id: "FL-1105".to_string(),
            user_id: "user2".to_string(),
            origin: "RDM".to_string(),
            destination: "LAS".to_string(),
            date: now + Duration::days(5),
            aircraft: "Diamond DA62 (Blue)".to_string(),
            status: FlightStatus::Confirmed,
            passengers: 3,
            price: 9_500,
        },
    ]
}

fn seed_requests() -> Vec<ConciergeRequest> {
    vec![ConciergeRequest {
        id: "CR-1".to_string(),
        flight_id: "FL-1042".to_string(),
        user_id: "user1".to_string(),
        service_type: "Catering".to_string(),
        details: "Gluten free options for 2 passengers, champagne on arrival.".to_string(),
        status: RequestStatus::Open,
        submitted_at: Utc::now() - Duration::days(2),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_references_are_valid() {
        let data = seed();
        for flight in &data.flights {
            assert!(
                data.users.iter().any(|u| u.id == flight.user_id),
                "flight {} references missing user {}",
                flight.id,
                flight.user_id
            );
        }
        for req in &data.requests {
            assert!(data.users.iter().any(|u| u.id == req.user_id));
            assert!(data.flights.iter().any(|f| f.id == req.flight_id));
        }
    }

    #[test]
    fn test_exactly_one_admin() {
        let users = seed_users();
        assert_eq!(users.iter().filter(|u| u.role == Role::Admin).count(), 1);
    }
}
