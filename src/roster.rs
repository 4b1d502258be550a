use crate::types::Volunteer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrewRole {
    Skipper,
    Crew1,
    Crew2,
    AdminOther,
    Other(String),
}

impl From<&str> for CrewRole {
    fn from(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "skipper" => CrewRole::Skipper,
            "crew1" => CrewRole::Crew1,
            "crew2" => CrewRole::Crew2,
            "admin/other" => CrewRole::AdminOther,
            _ => CrewRole::Other(role.trim().to_string()),
        }
    }
}

/// Names offered for each crew slot when assigning a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrewRoster {
    pub skippers: Vec<String>,
    pub crew1: Vec<String>,
    pub crew2: Vec<String>,
    pub admin_other: Vec<String>,
    /// Volunteers whose role fits no slot, as "name (role)".
    pub unassigned: Vec<String>,
}

impl CrewRoster {
    pub fn from_volunteers(volunteers: &[Volunteer]) -> Self {
        let mut roster = CrewRoster::default();
        for volunteer in volunteers {
            let name = volunteer.display_name();
            match CrewRole::from(volunteer.details.role.as_str()) {
                CrewRole::Skipper => roster.skippers.push(name),
                CrewRole::Crew1 => roster.crew1.push(name),
                CrewRole::Crew2 => roster.crew2.push(name),
                CrewRole::AdminOther => roster.admin_other.push(name),
                CrewRole::Other(role) => roster.unassigned.push(format!("{name} ({role})")),
            }
        }
        roster
    }
}
