use crate::models::team::Team;

pub fn list_teams() -> Vec<Team> {
    vec![
        Team {
            number: 1,
            name: "Red Bull Racing".to_string(),
            color: "#1E41FF".to_string(),
            pit_efficiency: 0.95,
        },
        Team {
            number: 2,
            name: "Ferrari".to_string(),
            color: "#DC143C".to_string(),
            pit_efficiency: 0.88,
        },
        Team {
            number: 3,
            name: "Mercedes".to_string(),
            color: "#00D2BE".to_string(),
            pit_efficiency: 0.92,
        },
        Team {
            number: 4,
            name: "McLaren".to_string(),
            color: "#FF8700".to_string(),
            pit_efficiency: 0.85,
        },
        Team {
            number: 5,
            name: "Alpine".to_string(),
            color: "#0090FF".to_string(),
            pit_efficiency: 0.80,
        },
    ]
}

pub fn get_team(number: u32) -> Option<Team> {
    list_teams().into_iter().find(|t| t.number == number)
}
