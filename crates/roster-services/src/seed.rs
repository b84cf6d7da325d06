//! Records present at startup

use roster_models::UserRecord;

pub fn seed_records() -> Vec<UserRecord> {
    vec![UserRecord {
        id: 1,
        name: "Olivia Rhye".to_string(),
        username: Some("@olivia".to_string()),
        email: "olivia@untitledui.com".to_string(),
        role: "Product Designer".to_string(),
        status: "Active".to_string(),
        teams: vec![
            "Design".to_string(),
            "Product".to_string(),
            "Marketing".to_string(),
        ],
        attachment_ref: None,
    }]
}
