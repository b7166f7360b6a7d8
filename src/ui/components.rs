use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::display::{
    format_list_datetime, initials, player_display_name, player_initials, points_label,
    team_label,
};
use crate::form::{FormFragment, FormInputs, Widget, markup_lines};
use crate::match_list::{MatchListLayout, match_list_layout};
use crate::models::{LeaderboardEntry, ListItem, MatchListItem, PlayerData, UserBetDetails};
use crate::strings::{competition_detail as cd, errors, match_detail as md};
use crate::ui::page::{Page, Target, accent, bold, error, muted};

fn badge(text: &str) -> Span<'static> {
    let label = if text.is_empty() { "?" } else { text };
    Span::styled(format!("[{label:^2}]"), accent())
}

fn points_style(points: i64) -> Style {
    if points > 0 {
        Style::default().fg(Color::Green)
    } else {
        muted()
    }
}

pub fn match_list_item(page: &mut Page, item: &MatchListItem) {
    let one = team_label(&item.team_one.name);
    let two = team_label(&item.team_two.name);
    let line = Line::from(vec![
        Span::raw("  "),
        badge(&initials(&item.team_one.name)),
        Span::raw(format!(" {one:<18}")),
        Span::styled(format!(" {} ", md::VS), muted().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {two:>18} ")),
        badge(&initials(&item.team_two.name)),
        Span::styled(format!("  {}", format_list_datetime(&item.start_datetime)), muted()),
    ]);
    page.link(format!("/match/{}/", item.id), line);
}

/// Featured team or competition card reduced to one link line.
pub fn list_item(page: &mut Page, item: &ListItem, href_prefix: &str, button: &str) {
    let line = Line::from(vec![
        Span::raw("  "),
        badge(&initials(&item.name)),
        Span::styled(format!(" {:<24}", item.name), bold()),
        Span::styled(format!(" › {button}"), accent()),
    ]);
    page.link(format!("/{href_prefix}/{}/", item.id), line);
}

pub fn player_list_item(page: &mut Page, player: &PlayerData) {
    let mut spans = vec![
        Span::raw("  "),
        badge(&player_initials(player)),
        Span::styled(format!(" {}", player_display_name(player)), bold()),
    ];
    if let Some(role) = player.role.as_deref().filter(|r| !r.is_empty()) {
        spans.push(Span::styled(
            format!("  {}{role}", crate::strings::team_detail::ROLE_PREFIX),
            muted(),
        ));
    }
    page.push(Line::from(spans));
}

pub struct LeaderboardStrings<'a> {
    pub title: &'a str,
    pub rank_header: &'a str,
    pub player_header: &'a str,
    pub points_header: &'a str,
    pub no_data: &'a str,
}

pub fn leaderboard(
    page: &mut Page,
    entries: &[LeaderboardEntry],
    current_user_id: Option<u32>,
    strings: &LeaderboardStrings<'_>,
    points_suffix: &str,
) {
    page.card(strings.title);
    if entries.is_empty() {
        page.muted(strings.no_data);
        return;
    }
    page.styled(
        format!(
            "  {:<6}{:<24}{:>12}",
            strings.rank_header, strings.player_header, strings.points_header
        ),
        bold(),
    );
    for (idx, entry) in entries.iter().enumerate() {
        let is_current = current_user_id == Some(entry.user.id);
        let marker = if is_current { "▶ " } else { "  " };
        let name_style = if is_current {
            accent().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let points_style = if is_current {
            accent()
        } else {
            points_style(entry.total_gained_points)
        };
        page.push(Line::from(vec![
            Span::styled(marker, accent()),
            Span::styled(format!("{:<6}", idx + 1), bold()),
            Span::styled(format!("{:<24}", entry.user.username), name_style),
            Span::styled(
                format!("{:>12}", format!("{} {points_suffix}", entry.total_gained_points)),
                points_style,
            ),
        ]));
    }
}

fn match_section(page: &mut Page, title: &str, items: &[&MatchListItem], empty: &str) {
    page.card(title);
    if items.is_empty() {
        page.muted(empty);
        return;
    }
    for (idx, item) in items.iter().enumerate() {
        match_list_item(page, item);
        if idx + 1 < items.len() {
            page.styled("  ·", muted());
        }
    }
}

pub fn match_list_display(page: &mut Page, matches: &[MatchListItem]) {
    match match_list_layout(matches) {
        MatchListLayout::Empty => {
            page.card(cd::MATCHES_HEADER);
            page.muted(cd::NO_MATCHES_MESSAGE);
        }
        MatchListLayout::Sections(buckets) => {
            match_section(
                page,
                cd::UPCOMING_MATCHES_HEADER,
                &buckets.upcoming,
                cd::NO_UPCOMING_MATCHES_MESSAGE,
            );
            match_section(
                page,
                cd::FINISHED_MATCHES_HEADER,
                &buckets.finished,
                cd::NO_FINISHED_MATCHES_MESSAGE,
            );
        }
    }
}

pub fn user_bet_display(page: &mut Page, details: &UserBetDetails) {
    let calculated = details.points_have_been_calculated;
    page.card(md::USER_BET_DISPLAY_TITLE);
    page.muted(if calculated {
        md::USER_BET_DISPLAY_DESCRIPTION_RESULTS_IN
    } else {
        md::USER_BET_DISPLAY_DESCRIPTION
    });
    if let Some(total) = details.total_gained_points.filter(|_| calculated) {
        page.push(Line::from(vec![
            Span::styled(format!("  {} ", md::TOTAL_GAINED_POINTS_LABEL), accent()),
            Span::styled(points_label(total), points_style(total).add_modifier(Modifier::BOLD)),
        ]));
    }

    if let Some(winner) = &details.chosen_winner {
        page.blank();
        page.styled(format!("  {}", md::PREDICTED_WINNER_TITLE), bold());
        let mut spans = vec![Span::styled(
            format!("    {} {}", md::YOUR_PREDICTION_LABEL, winner.name),
            accent(),
        )];
        if let Some(points) = winner.score_points {
            spans.push(Span::styled(
                format!("  ({} {})", md::POTENTIAL_POINTS_LABEL, points_label(points)),
                muted(),
            ));
        }
        page.push(Line::from(spans));
        if let Some(actual) = winner.actual_winner_details.as_ref().filter(|_| calculated) {
            let gained = winner.gained_points_for_winner.unwrap_or(0);
            page.push(Line::from(vec![
                Span::styled(format!("    {} {}", md::ACTUAL_WINNER_LABEL, actual.name), bold()),
                Span::styled(
                    format!("  {} {}", md::GAINED_POINTS_LABEL, points_label(gained)),
                    points_style(gained),
                ),
            ]));
        }
    }

    page.blank();
    page.styled(format!("  {}", md::DETAILED_PREDICTIONS_TITLE), bold());
    let mut header = format!("    {:<28}{:<20}", md::HEADER_PREDICTION, md::HEADER_YOUR_ANSWER);
    if calculated {
        header.push_str(&format!(
            "{:<16}{:>10}",
            md::HEADER_CORRECT_ANSWER,
            md::HEADER_GAINED_POINTS
        ));
    }
    header.push_str(&format!("{:>11}", md::HEADER_POTENTIAL_POINTS));
    page.styled(header, muted().add_modifier(Modifier::BOLD));
    for answer in &details.answers {
        let mut spans = vec![
            Span::styled(format!("    {:<28}", answer.prediction_label), bold()),
            Span::styled(format!("{:<20}", answer.user_answer_display), accent()),
        ];
        if calculated {
            let correct = answer
                .correct_value_display
                .as_deref()
                .unwrap_or(md::NOT_AVAILABLE);
            let gained = answer.gained_points.unwrap_or(0);
            spans.push(Span::styled(format!("{correct:<16}"), muted()));
            spans.push(Span::styled(
                format!("{:>10}", points_label(gained)),
                points_style(gained),
            ));
        }
        spans.push(Span::raw(format!(
            "{:>11}",
            points_label(answer.prediction_score_points)
        )));
        page.push(Line::from(spans));
    }
}

/// Field-by-field wrapper around the backend's form. Disabled forms are
/// shown dimmed and expose no focus targets.
pub fn styled_form(page: &mut Page, fragment: &FormFragment, inputs: &FormInputs, disabled: bool) {
    let spec = match fragment {
        FormFragment::Markup(markup) => {
            for line in markup_lines(markup) {
                page.text(format!("  {line}"));
            }
            page.muted(errors::MARKUP_FORM_READ_ONLY);
            return;
        }
        FormFragment::Fields(spec) => spec,
    };

    for err in &spec.errors {
        page.styled(format!("  ! {err}"), error());
    }
    for (idx, field) in spec.fields.iter().enumerate() {
        if field.widget == Widget::Hidden {
            continue;
        }
        let required = if field.required { " *" } else { "" };
        page.styled(format!("  {}{required}", field.label), bold());
        let input = Line::from(vec![Span::raw("    "), field_value_span(inputs, idx, field)]);
        if disabled {
            page.push(input.patch_style(muted()));
        } else {
            page.focusable(Target::Field(idx), input);
        }
        if let Some(help) = field.help_text.as_deref().filter(|h| !h.is_empty()) {
            for line in markup_lines(help) {
                page.muted(format!("  {line}"));
            }
        }
        for err in &field.errors {
            page.styled(format!("    • {err}"), error());
        }
    }
}

fn field_value_span(inputs: &FormInputs, idx: usize, field: &crate::form::FormField) -> Span<'static> {
    let value = inputs.value(idx);
    let text = match field.widget {
        Widget::Password => format!("[{:<24}]", "•".repeat(value.chars().count())),
        Widget::Checkbox => {
            if value.is_empty() {
                "[ ]".to_string()
            } else {
                "[x]".to_string()
            }
        }
        Widget::Radio => field
            .choices
            .iter()
            .map(|c| {
                let mark = if c.value == value { "(•)" } else { "( )" };
                format!("{mark} {}", c.label)
            })
            .collect::<Vec<_>>()
            .join("  "),
        Widget::Select => format!("‹ {} ›", inputs.choice_label(idx, field).unwrap_or("")),
        _ => format!("[{value:<24}]"),
    };
    Span::styled(text, Style::default().fg(Color::White))
}

pub fn submit_button(page: &mut Page, text: &str) {
    page.blank();
    page.focusable(
        Target::Submit,
        Line::from(Span::styled(
            format!("  [ {text} ]"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaderboardUser;

    fn entry(id: u32, name: &str, points: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            user: LeaderboardUser {
                id,
                username: name.to_string(),
            },
            total_gained_points: points,
        }
    }

    const STRINGS: LeaderboardStrings<'static> = LeaderboardStrings {
        title: "Board",
        rank_header: "#",
        player_header: "Player",
        points_header: "Points",
        no_data: "Nothing yet",
    };

    #[test]
    fn leaderboard_marks_current_user_only() {
        let mut page = Page::new();
        leaderboard(&mut page, &[entry(1, "alice", 9), entry(2, "bob", 0)], Some(2), &STRINGS, "pts");
        let lines = page.plain_lines();
        let bob = lines.iter().find(|l| l.contains("bob")).unwrap();
        let alice = lines.iter().find(|l| l.contains("alice")).unwrap();
        assert!(bob.starts_with("▶"));
        assert!(!alice.starts_with("▶"));
        assert!(alice.contains("9 pts"));
    }

    #[test]
    fn leaderboard_empty_state() {
        let mut page = Page::new();
        leaderboard(&mut page, &[], None, &STRINGS, "pts");
        assert!(page.contains("Nothing yet"));
        assert!(!page.contains("Player"));
    }
}
