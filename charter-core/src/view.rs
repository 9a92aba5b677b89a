use charter_shared::Role;
use serde::{Deserialize, Serialize};

/// Portal views. The admin console views appear only in the admin role's
/// navigation set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Dashboard,
    Flights,
    Fleet,
    Concierge,
    Profile,
    Booking,
    AdminDashboard,
    AdminFlights,
    AdminUsers,
    AdminConcierge,
}

const USER_VIEWS: &[View] = &[
    View::Dashboard,
    View::Flights,
    View::Fleet,
    View::Concierge,
    View::Profile,
    View::Booking,
];

const ADMIN_VIEWS: &[View] = &[
    View::AdminDashboard,
    View::AdminFlights,
    View::AdminUsers,
    View::AdminConcierge,
    View::Dashboard,
    View::Flights,
    View::Fleet,
    View::Concierge,
    View::Profile,
    View::Booking,
];

impl View {
    /// The navigation set for a role, in sidebar order.
    pub fn allowed_for(role: Role) -> &'static [View] {
        match role {
            Role::User => USER_VIEWS,
            Role::Admin => ADMIN_VIEWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_set_has_no_admin_views() {
        let views = View::allowed_for(Role::User);
        assert!(views.contains(&View::Dashboard));
        assert!(!views.contains(&View::AdminDashboard));
        assert!(!views.contains(&View::AdminConcierge));
    }

    #[test]
    fn test_admin_set_includes_both_consoles() {
        let views = View::allowed_for(Role::Admin);
        assert!(views.contains(&View::AdminFlights));
        assert!(views.contains(&View::Fleet));
    }

    #[test]
    fn test_view_wire_names() {
        assert_eq!(
            serde_json::to_string(&View::AdminDashboard).unwrap(),
            "\"admin-dashboard\""
        );
        let v: View = serde_json::from_str("\"concierge\"").unwrap();
        assert_eq!(v, View::Concierge);
    }
}
