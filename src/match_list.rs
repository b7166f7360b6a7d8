use crate::models::MatchListItem;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchBuckets<'a> {
    pub upcoming: Vec<&'a MatchListItem>,
    pub finished: Vec<&'a MatchListItem>,
}

/// What a match list card stack should show.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchListLayout<'a> {
    /// No matches at all: a single card with the no-matches message.
    Empty,
    /// Both sections are shown; an empty bucket renders its own message.
    Sections(MatchBuckets<'a>),
}

/// Split into not-finished and finished, keeping the payload order in each.
pub fn partition_matches(matches: &[MatchListItem]) -> MatchBuckets<'_> {
    let (finished, upcoming): (Vec<_>, Vec<_>) = matches.iter().partition(|m| m.is_finished);
    MatchBuckets { upcoming, finished }
}

pub fn match_list_layout(matches: &[MatchListItem]) -> MatchListLayout<'_> {
    if matches.is_empty() {
        return MatchListLayout::Empty;
    }
    MatchListLayout::Sections(partition_matches(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamInfo;

    fn item(id: u32, is_finished: bool) -> MatchListItem {
        MatchListItem {
            id,
            team_one: TeamInfo::default(),
            team_two: TeamInfo::default(),
            start_datetime: String::new(),
            is_finished,
        }
    }

    #[test]
    fn partition_keeps_relative_order() {
        let matches = vec![item(1, true), item(2, false), item(3, true), item(4, false)];
        let buckets = partition_matches(&matches);
        let up: Vec<u32> = buckets.upcoming.iter().map(|m| m.id).collect();
        let done: Vec<u32> = buckets.finished.iter().map(|m| m.id).collect();
        assert_eq!(up, vec![2, 4]);
        assert_eq!(done, vec![1, 3]);
    }

    #[test]
    fn empty_list_collapses_to_single_card() {
        assert_eq!(match_list_layout(&[]), MatchListLayout::Empty);
    }

    #[test]
    fn only_finished_still_shows_upcoming_section() {
        let matches = vec![item(9, true)];
        match match_list_layout(&matches) {
            MatchListLayout::Sections(b) => {
                assert!(b.upcoming.is_empty());
                assert_eq!(b.finished.len(), 1);
            }
            MatchListLayout::Empty => panic!("expected sections"),
        }
    }
}
