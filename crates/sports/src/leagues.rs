//! Leagues the frontend offers.

use serde::Serialize;

pub const SPORT: &str = "football";
pub const DEFAULT_SEASON: u32 = 2023;
pub const DEFAULT_LAST_MATCHES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct League {
    pub id: u32,
    pub name: &'static str,
    pub country: &'static str,
    pub sport: &'static str,
    pub season: u32,
}

const fn league(id: u32, name: &'static str, country: &'static str) -> League {
    League {
        id,
        name,
        country,
        sport: SPORT,
        season: DEFAULT_SEASON,
    }
}

pub static LEAGUES: [League; 4] = [
    league(39, "Premier League", "England"),
    league(78, "Bundesliga", "Germany"),
    league(135, "Serie A", "Italy"),
    league(140, "La Liga", "Spain"),
];

pub fn find(id: u32) -> Option<&'static League> {
    LEAGUES.iter().find(|l| l.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<_> = LEAGUES.iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), LEAGUES.len());
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find(78).map(|l| l.name), Some("Bundesliga"));
        assert!(find(1).is_none());
    }
}
