use std::collections::VecDeque;

use anyhow::{Result, anyhow};
use chrono::Utc;

use matchday_terminal::demo_feed::{DEMO_PASSWORD, DemoBackend};
use matchday_terminal::page_cache::PageCache;
use matchday_terminal::page_fetch::{FetchedPage, PageSource};
use matchday_terminal::provider::{MAX_REDIRECTS, Provider};
use matchday_terminal::state::{AppState, Delta, PageError, ProviderCommand, apply_delta};
use matchday_terminal::ui::page::Target;

fn demo_provider() -> Provider<DemoBackend> {
    Provider::new(DemoBackend::with_seed(7, Utc::now()), None, "/")
}

/// Run one command through the provider and fold its deltas into `state`.
fn run<S: PageSource>(
    provider: &mut Provider<S>,
    state: &mut AppState,
    cmd: ProviderCommand,
) -> Vec<Delta> {
    let deltas = provider.handle(cmd);
    for delta in deltas.clone() {
        apply_delta(state, delta);
    }
    deltas
}

fn navigate(path: &str) -> ProviderCommand {
    ProviderCommand::Navigate {
        path: path.to_string(),
    }
}

fn focus_on(state: &mut AppState, target: &Target) {
    state.focus = state
        .page()
        .focusables
        .iter()
        .position(|f| &f.target == target)
        .expect("target should be focusable");
}

fn type_into(state: &mut AppState, field: usize, text: &str) {
    focus_on(state, &Target::Field(field));
    for ch in text.chars() {
        state.type_char(ch);
    }
}

fn log_in(provider: &mut Provider<DemoBackend>, state: &mut AppState, password: &str) {
    run(provider, state, navigate("/login/"));
    type_into(state, 0, "alice");
    type_into(state, 1, password);
    let submit = state.submission().expect("login form should submit");
    run(provider, state, submit);
}

fn render_count(deltas: &[Delta]) -> usize {
    deltas
        .iter()
        .filter(|d| matches!(d, Delta::Render { .. }))
        .count()
}

#[test]
fn navigation_starts_with_loading_then_renders() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    let deltas = run(&mut provider, &mut state, navigate("team/1"));
    assert!(matches!(&deltas[0], Delta::Loading { path } if path == "/team/1"));
    assert_eq!(render_count(&deltas), 1);
    assert_eq!(provider.current_path(), "/team/1");
    assert!(state.page().contains("Rocket"));
    assert!(state.loading.is_none());
}

#[test]
fn login_redirects_home_with_welcome_message() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    run(&mut provider, &mut state, navigate("/"));
    assert!(!state.is_authenticated());

    log_in(&mut provider, &mut state, DEMO_PASSWORD);
    assert!(state.is_authenticated());
    assert_eq!(state.current_path, "/");
    assert_eq!(state.messages[0].text, "Welcome back, alice!");
    assert!(state.logs.iter().any(|l| l == "[INFO] Redirect to /"));
    assert_eq!(state.history, vec!["/".to_string(), "/login/".to_string()]);
    assert!(state.page().contains("▶ 1     alice"));

    // Logged-in users are bounced away from the login page.
    run(&mut provider, &mut state, navigate("/login/"));
    assert_eq!(state.current_path, "/");
}

#[test]
fn bad_login_rerenders_with_errors_and_blank_password() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    log_in(&mut provider, &mut state, "wrong-password");
    assert!(!state.is_authenticated());
    assert_eq!(state.current_path, "/login/");
    assert_eq!(state.form.values, vec!["alice".to_string(), String::new()]);
    assert!(
        state
            .page()
            .contains("Please enter a correct username and password.")
    );
}

#[test]
fn logout_clears_the_session() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    log_in(&mut provider, &mut state, DEMO_PASSWORD);
    let logout = state.logout_command();
    run(&mut provider, &mut state, logout);
    assert!(!state.is_authenticated());
    assert_eq!(state.messages[0].text, "You have been logged out.");
}

#[test]
fn placing_a_bet_validates_then_shows_the_bet() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    log_in(&mut provider, &mut state, DEMO_PASSWORD);
    run(&mut provider, &mut state, navigate("/match/2/"));
    assert!(state.page().contains("[ Submit bet ]"));

    let first = state.submission().expect("bet form should submit");
    run(&mut provider, &mut state, first);
    assert!(state.page().contains("This field is required."));
    assert!(state.form_fragment().is_some());

    type_into(&mut state, 1, "2");
    let second = state.submission().expect("bet form should submit");
    run(&mut provider, &mut state, second);
    assert_eq!(state.current_path, "/match/2/");
    assert_eq!(state.messages[0].text, "Your bet has been placed.");
    let page = state.page();
    assert!(page.contains("Your Bet"));
    assert!(page.contains("Your prediction: Wolves"));
    assert!(!page.contains("[ Submit bet ]"));
}

#[test]
fn anonymous_visitors_get_a_read_only_bet_form() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    run(&mut provider, &mut state, navigate("/match/2/"));
    assert!(state.page().contains("Log in to place a bet on this match."));
    assert!(state.submission().is_none());
}

#[test]
fn scored_match_shows_seeded_results() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    log_in(&mut provider, &mut state, DEMO_PASSWORD);
    run(&mut provider, &mut state, navigate("/match/1/"));
    let page = state.page();
    assert!(page.contains("Total points gained: 11 pts"));
    assert!(page.contains("Match Leaderboard"));
}

#[test]
fn unknown_pages_become_not_found() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    let deltas = run(&mut provider, &mut state, navigate("/team/99/"));
    assert!(matches!(deltas.last(), Some(Delta::NotFound { .. })));
    assert_eq!(
        state.error,
        Some(PageError::NotFound {
            path: "/team/99/".to_string()
        })
    );
}

#[test]
fn reload_on_a_missing_page_stays_on_it() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    run(&mut provider, &mut state, navigate("/"));
    run(&mut provider, &mut state, navigate("/team/99/"));
    assert_eq!(provider.current_path(), "/team/99/");

    let deltas = run(&mut provider, &mut state, ProviderCommand::Reload);
    assert!(matches!(&deltas[0], Delta::Loading { path } if path == "/team/99/"));
    assert!(matches!(deltas.last(), Some(Delta::NotFound { .. })));
    assert_eq!(state.current_path, "/team/99/");
    assert_eq!(state.history, vec!["/".to_string()]);
}

#[test]
fn reload_after_server_error_refetches_the_failing_path() {
    let source = ScriptedSource::new(&[HOME_PAGE, r#"{"status":"ServerError"}"#, HOME_PAGE]);
    let mut provider = Provider::new(source, None, "/");
    provider.handle(navigate("/"));
    provider.handle(navigate("/match/3/"));
    assert_eq!(provider.current_path(), "/match/3/");
    let deltas = provider.handle(ProviderCommand::Reload);
    assert!(matches!(deltas.last(), Some(Delta::Render { path, .. }) if path == "/match/3/"));
}

#[test]
fn posts_without_token_fail_without_leaving_the_page() {
    let mut provider = demo_provider();
    let mut state = AppState::new("/");
    run(&mut provider, &mut state, navigate("/"));
    let deltas = run(
        &mut provider,
        &mut state,
        ProviderCommand::Submit {
            action: "/login/".to_string(),
            fields: vec![("username".to_string(), "alice".to_string())],
        },
    );
    assert!(
        matches!(deltas.last(), Some(Delta::RequestFailed { reason, .. }) if reason.contains("403"))
    );
    assert_eq!(state.current_path, "/");
    assert!(state.loading.is_none());
}

/// Replays canned responses; errors once the script runs out.
struct ScriptedSource {
    responses: VecDeque<FetchedPage>,
    requests: Vec<String>,
}

impl ScriptedSource {
    fn new(bodies: &[&str]) -> Self {
        Self {
            responses: bodies
                .iter()
                .map(|body| FetchedPage {
                    status: 200,
                    body: body.to_string(),
                })
                .collect(),
            requests: Vec::new(),
        }
    }

    fn next(&mut self, label: String) -> Result<FetchedPage> {
        self.requests.push(label);
        self.responses
            .pop_front()
            .ok_or_else(|| anyhow!("connection refused"))
    }
}

impl PageSource for ScriptedSource {
    fn get(&mut self, path: &str) -> Result<FetchedPage> {
        self.next(format!("GET {path}"))
    }

    fn post(&mut self, action: &str, _fields: &[(String, String)]) -> Result<FetchedPage> {
        self.next(format!("POST {action}"))
    }
}

const TEAM_PAGE: &str = r#"{"status":"Render","view":"TeamDetailView","props":{"team":{"id":1,"name":"Lions"}}}"#;
const LOGIN_PAGE: &str = r#"{"status":"Render","view":"LoginView","props":{"action_url":"/login/","form":{"fields":[]}}}"#;
const HOME_PAGE: &str = r#"{"status":"Render","view":"HomeView","props":{}}"#;

#[test]
fn offline_copy_is_served_when_the_backend_is_down() {
    let source = ScriptedSource::new(&[TEAM_PAGE, LOGIN_PAGE]);
    let mut provider = Provider::new(source, Some(PageCache::in_memory()), "/");
    let mut state = AppState::new("/");

    run(&mut provider, &mut state, navigate("/team/1/"));
    run(&mut provider, &mut state, navigate("/login/"));
    assert!(!state.offline);

    let deltas = run(&mut provider, &mut state, navigate("/team/1/"));
    assert!(matches!(
        deltas.last(),
        Some(Delta::Render {
            from_cache: true,
            ..
        })
    ));
    assert!(state.offline);
    assert!(state.page().contains("Lions"));
    assert!(
        state
            .logs
            .iter()
            .any(|l| l == "[WARN] /team/1/: connection refused; showing offline copy")
    );

    let deltas = run(&mut provider, &mut state, navigate("/login/"));
    assert!(matches!(deltas.last(), Some(Delta::RequestFailed { .. })));
    assert_eq!(state.current_path, "/team/1/");
}

#[test]
fn redirect_chains_are_cut_off() {
    let hop = r#"{"status":"Redirect","path":"/loop/"}"#;
    let script = vec![hop; MAX_REDIRECTS + 2];
    let mut provider = Provider::new(ScriptedSource::new(&script), None, "/");
    let deltas = provider.handle(navigate("/loop/"));
    let redirects = deltas
        .iter()
        .filter(|d| matches!(d, Delta::Log(line) if line.starts_with("[INFO] Redirect")))
        .count();
    assert_eq!(redirects, MAX_REDIRECTS);
    assert!(matches!(
        deltas.last(),
        Some(Delta::RequestFailed { reason, .. }) if reason.contains("too many redirects")
    ));
}

#[test]
fn reload_envelope_refetches_the_current_page() {
    let source = ScriptedSource::new(&[HOME_PAGE, r#"{"status":"Reload"}"#, HOME_PAGE]);
    let mut provider = Provider::new(source, None, "/");
    provider.handle(navigate("/"));
    let deltas = provider.handle(ProviderCommand::Submit {
        action: "/ping/".to_string(),
        fields: Vec::new(),
    });
    assert_eq!(render_count(&deltas), 1);
    assert!(matches!(deltas.last(), Some(Delta::Render { path, .. }) if path == "/"));
}

#[test]
fn unknown_views_fail_the_request() {
    let source = ScriptedSource::new(&[r#"{"status":"Render","view":"ProfileView","props":{}}"#]);
    let mut provider = Provider::new(source, None, "/");
    let deltas = provider.handle(navigate("/me/"));
    assert!(matches!(
        deltas.last(),
        Some(Delta::RequestFailed { reason, .. }) if reason.contains("ProfileView")
    ));
    assert_eq!(provider.current_path(), "/");
}
