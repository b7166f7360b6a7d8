use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::bridge::{
    AuthFormProps, CompetitionDetailProps, MatchDetailProps, PageView, TeamDetailProps,
};
use crate::display::{
    format_long_date, format_match_datetime, initials, match_title, points_label, team_label,
};
use crate::form::FormInputs;
use crate::models::{HomePageData, MatchData, Prediction, PredictionType, Viewer};
use crate::state::PageError;
use crate::strings::{
    competition_detail as cd, errors, home, login, match_detail as md, register,
    team_detail as td,
};
use crate::ui::components::{
    LeaderboardStrings, leaderboard, list_item, match_list_display, match_list_item,
    player_list_item, styled_form, submit_button, user_bet_display,
};
use crate::ui::page::{Page, accent, bold, error, muted};

/// What a view needs beyond its own props.
pub struct ViewContext<'a> {
    pub viewer: Option<&'a Viewer>,
    pub form: &'a FormInputs,
}

impl ViewContext<'_> {
    fn user_id(&self) -> Option<u32> {
        self.viewer.and_then(Viewer::user_id)
    }
}

pub fn build_view(view: &PageView, ctx: &ViewContext<'_>) -> Page {
    let mut page = Page::new();
    match view {
        PageView::Home(data) => home_page(&mut page, data, ctx),
        PageView::Login(props) => auth_form_layout(
            &mut page,
            props,
            ctx,
            AuthCopy {
                heading: login::LOGIN_HEADING,
                button: login::LOGIN_BUTTON_TEXT,
                alt_text: login::ALT_ACTION_REGISTER_TEXT,
                alt_link: login::ALT_ACTION_REGISTER_LINK,
            },
        ),
        PageView::Register(props) => auth_form_layout(
            &mut page,
            props,
            ctx,
            AuthCopy {
                heading: register::REGISTER_HEADING,
                button: register::REGISTER_BUTTON_TEXT,
                alt_text: register::ALT_ACTION_LOGIN_TEXT,
                alt_link: register::ALT_ACTION_LOGIN_LINK,
            },
        ),
        PageView::MatchDetail(props) => match_detail_page(&mut page, props, ctx),
        PageView::TeamDetail(props) => team_detail_page(&mut page, props),
        PageView::CompetitionDetail(props) => competition_detail_page(&mut page, props),
    }
    page
}

fn header_badge(page: &mut Page, name: &str, subtitle: Option<String>) {
    page.push(Line::from(vec![
        Span::styled(
            format!(" {} ", initials(name)),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {name}"), bold().fg(Color::White)),
    ]));
    if let Some(subtitle) = subtitle {
        page.muted(subtitle);
    }
}

fn home_page(page: &mut Page, data: &HomePageData, ctx: &ViewContext<'_>) {
    let current = data.current_user_id.or_else(|| ctx.user_id());
    leaderboard(
        page,
        &data.leaderboard,
        current,
        &LeaderboardStrings {
            title: home::LEADERBOARD_TITLE,
            rank_header: home::LEADERBOARD_RANK_HEADER,
            player_header: home::LEADERBOARD_PLAYER_HEADER,
            points_header: home::LEADERBOARD_POINTS_HEADER,
            no_data: home::NO_LEADERBOARD_DATA,
        },
        "pts",
    );

    page.card(home::UPCOMING_MATCHES_TITLE);
    if data.upcoming_matches.is_empty() {
        page.muted(home::NO_UPCOMING_MATCHES);
    }
    for item in &data.upcoming_matches {
        match_list_item(page, item);
    }

    page.card(home::FEATURED_TEAMS_TITLE);
    if data.featured_teams.is_empty() {
        page.muted(home::NO_FEATURED_TEAMS);
    }
    for team in &data.featured_teams {
        list_item(page, team, "team", home::VIEW_TEAM_BUTTON);
    }

    page.card(home::FEATURED_COMPETITIONS_TITLE);
    if data.featured_competitions.is_empty() {
        page.muted(home::NO_FEATURED_COMPETITIONS);
    }
    for competition in &data.featured_competitions {
        list_item(page, competition, "competition", home::VIEW_COMPETITION_BUTTON);
    }
}

fn competition_detail_page(page: &mut Page, props: &CompetitionDetailProps) {
    let comp = &props.competition;
    let dates = format!(
        "{} {} {} {}",
        cd::DATES_LABEL,
        format_long_date(&comp.start_date),
        cd::TO_SEPARATOR,
        format_long_date(&comp.end_date)
    );
    header_badge(page, &comp.name, Some(dates));
    match_list_display(page, &comp.matches);
}

fn team_detail_page(page: &mut Page, props: &TeamDetailProps) {
    let team = &props.team;
    header_badge(page, &team.name, None);
    page.card(td::PLAYERS_HEADER);
    if team.players.is_empty() {
        page.muted(td::NO_PLAYERS_MESSAGE);
    }
    for player in &team.players {
        player_list_item(page, player);
    }
    match_list_display(page, &team.matches);
}

fn prediction_line(prediction: &Prediction, finished: bool) -> Line<'static> {
    let kind = match prediction.prediction_type {
        PredictionType::Numerical => "#",
        PredictionType::Player => "@",
        PredictionType::Boolean => "?",
        PredictionType::Other => "·",
    };
    let mut spans = vec![
        Span::styled(format!("  {kind} "), muted()),
        Span::styled(format!("{:<32}", prediction.label), bold()),
        Span::styled(format!("{:>8}", points_label(prediction.score_points)), accent()),
    ];
    if let Some(answer) = prediction.correct_value.as_deref().filter(|_| finished) {
        spans.push(Span::styled(
            format!("  {} {answer}", md::CORRECT_ANSWER_LABEL),
            Style::default().fg(Color::Green),
        ));
    }
    Line::from(spans)
}

fn match_header(page: &mut Page, data: &MatchData) {
    if !data.competition.name.is_empty() {
        page.styled(data.competition.name.clone(), muted().add_modifier(Modifier::BOLD));
    }
    page.styled(match_title(&data.name).to_string(), bold().fg(Color::White));
    page.blank();
    let one = team_label(&data.team_one.name).to_string();
    let two = team_label(&data.team_two.name).to_string();
    page.push(Line::from(vec![
        Span::styled(format!("  [{:^2}] ", initials(&data.team_one.name)), accent()),
        Span::styled(one, bold()),
        Span::styled(
            format!("   {} - {}   ", data.team_one_score, data.team_two_score),
            bold().fg(Color::Yellow),
        ),
        Span::styled(two, bold()),
        Span::styled(format!(" [{:^2}]", initials(&data.team_two.name)), accent()),
    ]));
    page.styled(format!("  {:^28}", md::VS), muted());
    let status = if data.is_finished {
        md::STATUS_FINISHED
    } else {
        md::STATUS_UPCOMING
    };
    page.push(Line::from(vec![
        Span::styled(format!("  {} ", md::STATUS_LABEL), muted()),
        Span::styled(
            status,
            if data.is_finished {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Yellow)
            },
        ),
    ]));
    page.push(Line::from(vec![
        Span::styled(format!("  {} ", md::DATE_LABEL), muted()),
        Span::raw(format_match_datetime(&data.start_datetime)),
    ]));
}

fn match_detail_page(page: &mut Page, props: &MatchDetailProps, ctx: &ViewContext<'_>) {
    let data = &props.match_data;
    match_header(page, data);

    page.card(md::PREDICTIONS_TITLE);
    if data.is_winner_needed {
        page.push(Line::from(vec![
            Span::styled(format!("  {} ", md::WINNER_POINTS_LABEL), muted()),
            Span::styled(points_label(data.score_points), accent()),
        ]));
    }
    if data.predictions.is_empty() {
        page.muted(md::NO_PREDICTIONS);
    }
    for prediction in &data.predictions {
        page.push(prediction_line(prediction, data.is_finished));
    }

    if let Some(details) = &props.user_bet_details {
        user_bet_display(page, details);
    } else if let Some(form) = &props.bet_form {
        page.card(md::BET_FORM_TITLE);
        if data.is_finished {
            styled_form(page, form, ctx.form, true);
            page.muted(md::BETTING_CLOSED);
        } else {
            styled_form(page, form, ctx.form, false);
            if form.is_submittable() {
                submit_button(page, md::BET_BUTTON_TEXT);
            }
        }
    }

    if let Some(entries) = &data.leaderboard {
        leaderboard(
            page,
            entries,
            ctx.user_id(),
            &LeaderboardStrings {
                title: md::LEADERBOARD_TITLE,
                rank_header: md::LEADERBOARD_RANK_HEADER,
                player_header: md::LEADERBOARD_PLAYER_HEADER,
                points_header: md::LEADERBOARD_POINTS_HEADER,
                no_data: md::LEADERBOARD_NO_DATA,
            },
            "pts",
        );
    }
}

pub fn error_page(err: &PageError) -> Page {
    let mut page = Page::new();
    let (title, path, detail) = match err {
        PageError::NotFound { path } => (errors::NOT_FOUND, path, None),
        PageError::ServerError { path, detail } => (errors::SERVER_ERROR, path, detail.as_deref()),
    };
    page.card(title);
    page.styled(format!("  {path}"), error());
    if let Some(detail) = detail {
        page.muted(detail);
    }
    page.blank();
    page.link(
        "/",
        Line::from(Span::styled(
            format!("  {} ›", errors::BACK_HOME),
            accent().add_modifier(Modifier::UNDERLINED),
        )),
    );
    page
}

struct AuthCopy {
    heading: &'static str,
    button: &'static str,
    alt_text: &'static str,
    alt_link: &'static str,
}

fn auth_form_layout(page: &mut Page, props: &AuthFormProps, ctx: &ViewContext<'_>, copy: AuthCopy) {
    page.card(copy.heading);
    styled_form(page, &props.form, ctx.form, false);
    if props.form.is_submittable() {
        submit_button(page, copy.button);
    }
    page.blank();
    page.link(
        copy.alt_link,
        Line::from(Span::styled(
            format!("  {} ›", copy.alt_text),
            accent().add_modifier(Modifier::UNDERLINED),
        )),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::decode_view;
    use crate::ui::page::Target;
    use serde_json::json;

    fn build(view: &PageView) -> Page {
        let inputs = match view.form() {
            Some((form, _)) => FormInputs::from_fragment(form),
            None => FormInputs::default(),
        };
        build_view(
            view,
            &ViewContext {
                viewer: None,
                form: &inputs,
            },
        )
    }

    #[test]
    fn empty_home_shows_every_fallback() {
        let page = build(&decode_view("Home", json!({})).unwrap());
        for text in [
            home::NO_LEADERBOARD_DATA,
            home::NO_UPCOMING_MATCHES,
            home::NO_FEATURED_TEAMS,
            home::NO_FEATURED_COMPETITIONS,
        ] {
            assert!(page.contains(text), "missing {text}");
        }
        assert!(page.focusables.is_empty());
    }

    #[test]
    fn login_page_links_to_register_after_submit() {
        let view = decode_view(
            "LoginView",
            json!({
                "action_url": "/login/",
                "form": {"fields": [
                    {"name": "username", "label": "Username"},
                    {"name": "password", "label": "Password", "widget": "password"}
                ]}
            }),
        )
        .unwrap();
        let page = build(&view);
        let targets: Vec<_> = page.focusables.iter().map(|f| f.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                Target::Field(0),
                Target::Field(1),
                Target::Submit,
                Target::Link("/register/".to_string()),
            ]
        );
    }

    #[test]
    fn competition_header_formats_dates() {
        let view = decode_view(
            "CompetitionDetailView",
            json!({"competition": {
                "id": 1, "name": "World Cup", "start_date": "2026-06-11",
                "end_date": "2026-07-19", "matches": []
            }}),
        )
        .unwrap();
        let page = build(&view);
        assert!(page.contains("Dates: June 11, 2026 to July 19, 2026"));
        assert!(page.contains(" WC "));
        assert!(page.contains(cd::NO_MATCHES_MESSAGE));
    }
}
