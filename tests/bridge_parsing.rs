use std::fs;
use std::path::PathBuf;

use matchday_terminal::bridge::{BridgeResponse, PageView, parse_bridge_body, rendered_from_body};
use matchday_terminal::form::{FormFragment, Widget};
use matchday_terminal::models::{MessageLevel, PredictionType};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn home_fixture_reads_score_alias_and_viewer() {
    let rendered = rendered_from_body(&read_fixture("home.json")).expect("home should decode");
    let PageView::Home(data) = &rendered.view else {
        panic!("expected home view, got {}", rendered.view.name());
    };
    assert_eq!(data.leaderboard.len(), 3);
    assert_eq!(data.leaderboard[0].total_gained_points, 58);
    assert_eq!(data.current_user_id, Some(3));
    assert_eq!(data.upcoming_matches[1].team_two.name, "");

    let viewer = rendered.viewer.expect("home carries auth props");
    assert!(viewer.is_authenticated);
    assert_eq!(viewer.user_id(), Some(3));
    assert_eq!(rendered.csrf_token.as_deref(), Some("tok-home"));
    assert_eq!(rendered.messages[0].level, MessageLevel::Success);
    assert_eq!(rendered.title.as_deref(), Some("Home"));
}

#[test]
fn scored_match_fixture_keeps_optional_fields() {
    let rendered = rendered_from_body(&read_fixture("match_scored.json")).unwrap();
    let PageView::MatchDetail(props) = &rendered.view else {
        panic!("expected match detail");
    };
    assert_eq!(props.match_data.predictions[1].prediction_type, PredictionType::Player);
    assert_eq!(props.match_data.leaderboard.as_ref().map(Vec::len), Some(2));
    let bet = props.user_bet_details.as_ref().expect("bet present");
    assert!(bet.points_have_been_calculated);
    assert_eq!(bet.answers[1].correct_value_display, None);
    assert_eq!(bet.answers[1].gained_points, None);
    assert!(props.bet_form.is_none());
    assert!(rendered.view.form().is_none());
}

#[test]
fn open_match_fixture_decodes_bet_form_and_null_scores() {
    let rendered = rendered_from_body(&read_fixture("match_open.json")).unwrap();
    let PageView::MatchDetail(props) = &rendered.view else {
        panic!("expected match detail");
    };
    assert_eq!(props.match_data.team_one_score, 0);
    assert!(props.match_data.leaderboard.is_none());
    let (form, action) = rendered.view.form().expect("bet form present");
    assert_eq!(action, "/match/14/bet/");
    let widgets: Vec<Widget> = form.fields().iter().map(|f| f.widget).collect();
    assert_eq!(
        widgets,
        vec![Widget::Radio, Widget::Number, Widget::Checkbox, Widget::Hidden]
    );
    assert_eq!(form.fields()[0].choices[2].value, "0");
}

#[test]
fn competition_fixture_has_no_viewer() {
    let rendered = rendered_from_body(&read_fixture("competition.json")).unwrap();
    assert!(rendered.viewer.is_none());
    assert!(rendered.messages.is_empty());
    assert!(matches!(rendered.view, PageView::CompetitionDetail(_)));
}

#[test]
fn login_fixture_maps_non_field_errors() {
    let rendered = rendered_from_body(&read_fixture("login_errors.json")).unwrap();
    let PageView::Login(props) = &rendered.view else {
        panic!("expected login view");
    };
    match &props.form {
        FormFragment::Fields(spec) => {
            assert_eq!(spec.errors.len(), 1);
            assert_eq!(spec.fields[1].widget, Widget::Password);
        }
        FormFragment::Markup(_) => panic!("expected structured form"),
    }
    assert!(rendered.view.is_auth_page());
    assert_eq!(rendered.viewer.map(|v| v.is_authenticated), Some(false));
}

#[test]
fn register_fixture_keeps_markup_form() {
    let rendered = rendered_from_body(&read_fixture("register_markup.json")).unwrap();
    let (form, _) = rendered.view.form().unwrap();
    assert!(!form.is_submittable());
    assert!(form.fields().is_empty());
}

#[test]
fn html_shell_resolves_bare_home_name() {
    let rendered = rendered_from_body(&read_fixture("shell.html")).unwrap();
    assert!(matches!(rendered.view, PageView::Home(_)));
    assert_eq!(rendered.csrf_token.as_deref(), Some("tok-shell"));
}

#[test]
fn non_render_envelopes_parse() {
    let redirect = parse_bridge_body(r#"{"status": "Redirect", "path": "/login/"}"#).unwrap();
    assert!(matches!(redirect, BridgeResponse::Redirect { ref path } if path == "/login/"));
    assert!(matches!(
        parse_bridge_body(r#"{"status": "ServerError"}"#).unwrap(),
        BridgeResponse::ServerError
    ));
    assert!(rendered_from_body(r#"{"status": "Reload"}"#).is_err());
    assert!(parse_bridge_body("   ").is_err());
}

#[test]
fn unknown_view_is_rejected_by_name() {
    let err = rendered_from_body(r#"{"status":"Render","view":"ProfileView","props":{}}"#)
        .unwrap_err();
    assert!(format!("{err:#}").contains("ProfileView"));
}
