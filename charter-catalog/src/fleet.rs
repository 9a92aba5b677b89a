use charter_shared::Aircraft;

/// The charter fleet presented on the results screen. Static: there is no
/// real-time pricing or availability query behind it.
pub fn fleet() -> Vec<Aircraft> {
    vec![
        Aircraft {
            id: "da62-orange".to_string(),
            name: "Diamond DA62 (Orange)".to_string(),
            category: "Twin Engine".to_string(),
            seats: 6,
            speed: "192 mph".to_string(),
            range: "1,285 nm".to_string(),
            estimate: 2800,
            image: "https://images.unsplash.com/photo-1583070344499-bf3c53b95d78?q=80&w=2836&auto=format&fit=crop".to_string(),
        },
        Aircraft {
            id: "da62-blue".to_string(),
            name: "Diamond DA62 (Blue)".to_string(),
            category: "Twin Engine".to_string(),
            seats: 6,
            speed: "192 mph".to_string(),
            range: "1,285 nm".to_string(),
            estimate: 2800,
            image: "https://images.unsplash.com/photo-1605450183428-eb9127d6d40a?q=80&w=2940&auto=format&fit=crop".to_string(),
        },
        Aircraft {
            id: "cirrus-vision".to_string(),
            name: "Cirrus Vision Jet".to_string(),
            category: "Personal Jet".to_string(),
            seats: 5,
            speed: "345 mph".to_string(),
            range: "1,275 nm".to_string(),
            estimate: 4500,
            image: "https://images.unsplash.com/photo-1569629743817-70d8db6c323b?q=80&w=2940&auto=format&fit=crop".to_string(),
        },
    ]
}

/// Lookup by catalog id.
pub fn find(id: &str) -> Option<Aircraft> {
    fleet().into_iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_has_three_airframes() {
        let fleet = fleet();
        assert_eq!(fleet.len(), 3);
        assert!(fleet.iter().all(|a| a.seats >= 5 && a.estimate > 0));
    }

    #[test]
    fn test_find_by_id() {
        let jet = find("cirrus-vision").unwrap();
        assert_eq!(jet.name, "Cirrus Vision Jet");
        assert!(find("gulfstream-g650").is_none());
    }
}
