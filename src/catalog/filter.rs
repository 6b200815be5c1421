//! Title filtering shared by the suggestion dropdown and the paged result list.
//!
//! Both views must agree on what "matches" means, so this is the only place the
//! rule lives: case-insensitive substring match on the title, catalog order kept,
//! no ranking.

use super::record::GameRecord;

/// Lower-cased needle, computed once per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    needle: String,
}

impl TitleQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &GameRecord) -> bool {
        record.title.to_lowercase().contains(&self.needle)
    }
}

pub fn matches_title(record: &GameRecord, query: &str) -> bool {
    TitleQuery::new(query).matches(record)
}

/// Indices into `catalog` of every record whose title contains `query`.
///
/// An empty query matches everything.
pub fn filter_titles(catalog: &[GameRecord], query: &str) -> Vec<usize> {
    let query = TitleQuery::new(query);
    catalog
        .iter()
        .enumerate()
        .filter(|(_, record)| query.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(titles: &[&str]) -> Vec<GameRecord> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| GameRecord::titled(i as u64 + 1, t))
            .collect()
    }

    #[test]
    fn test_filter_keeps_catalog_order() {
        let games = catalog(&["Halo", "Half-Life", "Portal"]);
        let hits = filter_titles(&games, "hal");
        let titles: Vec<&str> = hits.iter().map(|&i| games[i].title.as_str()).collect();
        assert_eq!(titles, vec!["Halo", "Half-Life"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let games = catalog(&["World of Tanks", "Warframe", "war thunder"]);
        assert_eq!(filter_titles(&games, "WAR"), vec![1, 2]);
        assert_eq!(filter_titles(&games, "Tanks"), vec![0]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let games = catalog(&["A", "B", "C"]);
        assert_eq!(filter_titles(&games, ""), vec![0, 1, 2]);
        assert!(TitleQuery::new("").is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let games = catalog(&["Halo", "Portal"]);
        assert!(filter_titles(&games, "zzz").is_empty());
        assert!(filter_titles(&[], "halo").is_empty());
    }

    #[test]
    fn test_whitespace_is_part_of_the_query() {
        let games = catalog(&["Lost Ark", "Lostark Mobile"]);
        assert_eq!(filter_titles(&games, "lost "), vec![0]);
    }

    #[test]
    fn test_filter_is_exactly_the_matching_subset() {
        let games = catalog(&[
            "Apex Legends",
            "Dota 2",
            "Legends of Runeterra",
            "PUBG",
            "League of Legends",
        ]);
        let hits = filter_titles(&games, "legends");
        let expected: Vec<usize> = games
            .iter()
            .enumerate()
            .filter(|(_, g)| g.title.to_lowercase().contains("legends"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, expected);
        assert!(hits.windows(2).all(|w| w[0] < w[1]));
        assert!(matches_title(&games[4], "OF LEG"));
    }
}
