use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};

use anyhow::Result;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::{Map, Value, json};

use crate::config::Config;
use crate::form::CSRF_FIELD;
use crate::models::{
    ActualWinner, ChosenWinner, Message, MessageLevel, PredictionAnswer, PredictionType,
    UserBetDetails,
};
use crate::page_fetch::{FetchedPage, PageSource};
use crate::provider::{Provider, spawn_worker};
use crate::state::{Delta, ProviderCommand};

pub const DEMO_PASSWORD: &str = "matchday";
const DEMO_CSRF: &str = "demo-csrf-token";
const FEATURED_TEAMS: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
struct DemoUser {
    id: u32,
    username: String,
    password: String,
    score: i64,
}

#[derive(Debug, Clone)]
struct DemoPlayer {
    id: u32,
    first_name: &'static str,
    last_name: &'static str,
    nickname: Option<&'static str>,
    role: Option<&'static str>,
}

#[derive(Debug, Clone)]
struct DemoTeam {
    id: u32,
    name: &'static str,
    players: Vec<DemoPlayer>,
}

#[derive(Debug, Clone)]
struct DemoCompetition {
    id: u32,
    name: &'static str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct DemoPrediction {
    id: u32,
    label: &'static str,
    kind: PredictionType,
    points: i64,
    correct: Option<String>,
}

#[derive(Debug, Clone)]
struct DemoMatch {
    id: u32,
    competition_id: u32,
    team_one: Option<u32>,
    team_two: Option<u32>,
    start: DateTime<Utc>,
    finished: bool,
    score: (i64, i64),
    points_done: bool,
    winner_points: i64,
    predictions: Vec<DemoPrediction>,
}

enum Route {
    Home,
    Login,
    Register,
    Logout,
    Match(u32),
    Bet(u32),
    Team(u32),
    Competition(u32),
    Unknown,
}

fn route(path: &str) -> Route {
    let path = path.split('?').next().unwrap_or("");
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [] => Route::Home,
        ["login"] => Route::Login,
        ["register"] => Route::Register,
        ["logout"] => Route::Logout,
        ["match", raw] => parse_id(raw).map_or(Route::Unknown, Route::Match),
        ["match", raw, "bet"] => parse_id(raw).map_or(Route::Unknown, Route::Bet),
        ["team", raw] => parse_id(raw).map_or(Route::Unknown, Route::Team),
        ["competition", raw] => parse_id(raw).map_or(Route::Unknown, Route::Competition),
        _ => Route::Unknown,
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

type FieldErrors = HashMap<String, Vec<String>>;

/// In-process stand-in for the backend, serving seeded bridge envelopes.
pub struct DemoBackend {
    rng: StdRng,
    users: Vec<DemoUser>,
    teams: Vec<DemoTeam>,
    competitions: Vec<DemoCompetition>,
    matches: Vec<DemoMatch>,
    bets: HashMap<(u32, u32), UserBetDetails>,
    session: Option<u32>,
    pending_messages: Vec<Message>,
    next_bet_id: u32,
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoBackend {
    pub fn new() -> Self {
        Self::build(StdRng::from_entropy(), Utc::now())
    }

    pub fn with_seed(seed: u64, now: DateTime<Utc>) -> Self {
        Self::build(StdRng::seed_from_u64(seed), now)
    }

    fn build(rng: StdRng, now: DateTime<Utc>) -> Self {
        let mut backend = Self {
            rng,
            users: seed_users(),
            teams: seed_teams(),
            competitions: seed_competitions(now),
            matches: seed_matches(now),
            bets: HashMap::new(),
            session: None,
            pending_messages: Vec::new(),
            next_bet_id: 1,
        };
        backend.seed_scored_bet();
        backend
    }

    pub fn logged_in_user(&self) -> Option<&str> {
        let id = self.session?;
        self.user(id).map(|u| u.username.as_str())
    }

    fn user(&self, id: u32) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.id == id)
    }

    fn team(&self, id: u32) -> Option<&DemoTeam> {
        self.teams.iter().find(|t| t.id == id)
    }

    fn team_name(&self, id: Option<u32>) -> String {
        id.and_then(|id| self.team(id))
            .map(|t| t.name.to_string())
            .unwrap_or_default()
    }

    fn competition(&self, id: u32) -> Option<&DemoCompetition> {
        self.competitions.iter().find(|c| c.id == id)
    }

    fn match_by_id(&self, id: u32) -> Option<&DemoMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    fn player_name(&self, id: u32) -> Option<String> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter())
            .find(|p| p.id == id)
            .map(player_label)
    }

    fn flash(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.pending_messages.push(Message {
            text: text.into(),
            level,
        });
    }

    fn seed_scored_bet(&mut self) {
        let Some(m) = self.match_by_id(1).cloned() else {
            return;
        };
        let winner_name = self.team_name(m.team_one);
        let answers = vec![
            answer(&m.predictions[0], "3", "3", Some("3"), Some(5)),
            answer(&m.predictions[1], "2", "Kai Reed", Some("Ada Stone"), Some(0)),
            answer(&m.predictions[2], "yes", "Yes", Some("Yes"), Some(3)),
        ];
        let details = UserBetDetails {
            chosen_winner: Some(ChosenWinner {
                id: m.team_one,
                name: winner_name.clone(),
                score_points: Some(m.winner_points),
                actual_winner_details: Some(ActualWinner {
                    id: m.team_one,
                    name: winner_name,
                    is_draw: false,
                }),
                gained_points_for_winner: Some(m.winner_points),
            }),
            answers,
            bet_id: self.next_bet_id,
            points_have_been_calculated: true,
            total_gained_points: Some(11),
        };
        self.next_bet_id += 1;
        self.bets.insert((1, m.id), details);
    }

    fn viewer_props(&self) -> Map<String, Value> {
        let mut props = Map::new();
        let user = self.session.and_then(|id| self.user(id));
        props.insert("isAuthenticated".to_string(), json!(user.is_some()));
        props.insert(
            "currentUser".to_string(),
            user.map_or(Value::Null, |u| {
                json!({"id": u.id, "username": u.username, "score": u.score})
            }),
        );
        props
    }

    fn render(&mut self, view: &str, props: Value, title: &str, with_viewer: bool) -> FetchedPage {
        let mut props = match props {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if with_viewer {
            props.extend(self.viewer_props());
        }
        let messages = std::mem::take(&mut self.pending_messages);
        envelope(
            200,
            json!({
                "status": "Render",
                "view": view,
                "props": props,
                "context": {"csrf_token": DEMO_CSRF},
                "messages": messages,
                "title": title,
            }),
        )
    }

    fn home(&mut self) -> FetchedPage {
        let mut users = self.users.clone();
        users.sort_by(|a, b| b.score.cmp(&a.score));
        let leaderboard: Vec<Value> = users
            .iter()
            .filter(|u| u.score > 0)
            .map(|u| json!({"user": {"id": u.id, "username": u.username}, "score": u.score}))
            .collect();
        let upcoming: Vec<Value> = self
            .matches
            .iter()
            .filter(|m| !m.finished)
            .map(|m| self.match_list_item(m))
            .collect();
        let mut teams: Vec<Value> = self
            .teams
            .iter()
            .map(|t| json!({"id": t.id, "name": t.name, "logo_url": null}))
            .collect();
        teams.shuffle(&mut self.rng);
        teams.truncate(FEATURED_TEAMS);
        let competitions: Vec<Value> = self
            .competitions
            .iter()
            .map(|c| json!({"id": c.id, "name": c.name, "logo_url": null}))
            .collect();
        let props = json!({
            "leaderboard": leaderboard,
            "upcoming_matches": upcoming,
            "featured_teams": teams,
            "featured_competitions": competitions,
            "current_user_id": self.session,
        });
        self.render("HomeView", props, "Home", true)
    }

    fn match_list_item(&self, m: &DemoMatch) -> Value {
        json!({
            "id": m.id,
            "team_one": self.team_info(m.team_one),
            "team_two": self.team_info(m.team_two),
            "start_datetime": m.start.to_rfc3339(),
            "is_finished": m.finished,
        })
    }

    fn team_info(&self, id: Option<u32>) -> Value {
        match id.and_then(|id| self.team(id)) {
            Some(team) => json!({"id": team.id, "name": team.name, "logo_url": null}),
            None => Value::Null,
        }
    }

    fn team_json(&self, id: Option<u32>) -> Value {
        match id.and_then(|id| self.team(id)) {
            Some(team) => json!({
                "id": team.id,
                "name": team.name,
                "logo_url": null,
                "players": team.players.iter().map(player_json).collect::<Vec<_>>(),
            }),
            None => Value::Null,
        }
    }

    fn matches_for(&self, pred: impl Fn(&DemoMatch) -> bool) -> Vec<Value> {
        self.matches
            .iter()
            .filter(|m| pred(m))
            .map(|m| self.match_list_item(m))
            .collect()
    }

    fn team_detail(&mut self, id: u32) -> FetchedPage {
        let Some(team) = self.team(id).cloned() else {
            return not_found();
        };
        let props = json!({"team": {
            "id": team.id,
            "name": team.name,
            "logo_url": null,
            "players": team.players.iter().map(player_json).collect::<Vec<_>>(),
            "matches": self.matches_for(|m| m.team_one == Some(id) || m.team_two == Some(id)),
        }});
        self.render("TeamDetailView", props, team.name, true)
    }

    fn competition_detail(&mut self, id: u32) -> FetchedPage {
        let Some(comp) = self.competition(id).cloned() else {
            return not_found();
        };
        let props = json!({"competition": {
            "id": comp.id,
            "name": comp.name,
            "logo_url": null,
            "start_date": comp.start.format("%Y-%m-%d").to_string(),
            "end_date": comp.end.format("%Y-%m-%d").to_string(),
            "matches": self.matches_for(|m| m.competition_id == id),
        }});
        // The competition page is served without the viewer props.
        self.render("CompetitionDetailView", props, comp.name, false)
    }

    fn match_json(&self, m: &DemoMatch) -> Value {
        let competition = self
            .competition(m.competition_id)
            .map_or(Value::Null, |c| json!({"id": c.id, "name": c.name, "logo_url": null}));
        let comp_name = self
            .competition(m.competition_id)
            .map(|c| c.name)
            .unwrap_or_default();
        let leaderboard = m.finished.then(|| self.match_leaderboard(m.id));
        let predictions: Vec<Value> = m
            .predictions
            .iter()
            .map(|p| {
                let correct = if m.points_done { p.correct.clone() } else { None };
                json!({
                    "id": p.id,
                    "label": p.label,
                    "prediction_type": prediction_type_name(p.kind),
                    "score_points": p.points,
                    "correct_value": correct,
                })
            })
            .collect();
        json!({
            "id": m.id,
            "name": format!(
                "{} vs {} ({comp_name} - {})",
                self.team_name(m.team_one),
                self.team_name(m.team_two),
                m.start.format("%Y-%m-%d")
            ),
            "competition": competition,
            "team_one": self.team_json(m.team_one),
            "team_two": self.team_json(m.team_two),
            "team_one_score": m.score.0,
            "team_two_score": m.score.1,
            "start_datetime": m.start.to_rfc3339(),
            "is_finished": m.finished,
            "points_calculation_done": m.points_done,
            "is_winner_needed": true,
            "team_one_draw_score": null,
            "team_two_draw_score": null,
            "score_points": m.winner_points,
            "predictions": predictions,
            "leaderboard": leaderboard,
        })
    }

    fn match_leaderboard(&self, match_id: u32) -> Vec<Value> {
        let mut rows: Vec<(u32, String, i64)> = self
            .bets
            .iter()
            .filter(|((_, m), bet)| *m == match_id && bet.points_have_been_calculated)
            .filter_map(|((user_id, _), bet)| {
                let user = self.user(*user_id)?;
                Some((user.id, user.username.clone(), bet.total_gained_points.unwrap_or(0)))
            })
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
        rows.into_iter()
            .map(|(id, username, points)| {
                json!({"user": {"id": id, "username": username}, "total_gained_points": points})
            })
            .collect()
    }

    fn bet_form(&self, m: &DemoMatch, values: &HashMap<String, String>, errors: &FieldErrors) -> Value {
        let value_of = |name: &str| values.get(name).cloned();
        let errors_of = |name: &str| errors.get(name).cloned().unwrap_or_default();
        let mut winner_choices: Vec<Value> = [m.team_one, m.team_two]
            .into_iter()
            .flatten()
            .map(|id| json!([id, self.team_name(Some(id))]))
            .collect();
        winner_choices.push(json!([0, "Draw"]));
        let mut fields = vec![json!({
            "name": "match_winner",
            "label": "Who wins?",
            "widget": "radio",
            "required": true,
            "choices": winner_choices,
            "value": value_of("match_winner"),
            "errors": errors_of("match_winner"),
        })];
        for prediction in &m.predictions {
            let name = format!("prediction_{}", prediction.id);
            let (widget, choices) = match prediction.kind {
                PredictionType::Numerical => ("number", Vec::new()),
                PredictionType::Player => (
                    "select",
                    [m.team_one, m.team_two]
                        .into_iter()
                        .flatten()
                        .filter_map(|id| self.team(id))
                        .flat_map(|t| t.players.iter())
                        .map(|p| json!([p.id, player_label(p)]))
                        .collect(),
                ),
                PredictionType::Boolean | PredictionType::Other => {
                    ("select", vec![json!(["yes", "Yes"]), json!(["no", "No"])])
                }
            };
            fields.push(json!({
                "name": name,
                "label": prediction.label,
                "widget": widget,
                "required": true,
                "choices": choices,
                "value": value_of(&name),
                "help_text": format!("Worth {} pts", prediction.points),
                "errors": errors_of(&name),
            }));
        }
        json!({"fields": fields, "errors": errors_of("__all__")})
    }

    fn match_detail(&mut self, id: u32, values: &HashMap<String, String>, errors: &FieldErrors) -> FetchedPage {
        let Some(m) = self.match_by_id(id).cloned() else {
            return not_found();
        };
        let bet = self.session.and_then(|user| self.bets.get(&(user, id)).cloned());
        let bet_form = match (self.session, &bet) {
            (Some(_), None) => self.bet_form(&m, values, errors),
            (None, _) => json!("<p>Log in to place a bet on this match.</p>"),
            (Some(_), Some(_)) => Value::Null,
        };
        let props = json!({
            "match": self.match_json(&m),
            "user_bet_details": bet,
            "bet_form": bet_form,
            "bet_action_url": format!("/match/{id}/bet/"),
        });
        let title = format!("{} vs {}", self.team_name(m.team_one), self.team_name(m.team_two));
        self.render("MatchDetailView", props, &title, true)
    }

    fn login_page(&mut self, username: &str, errors: Vec<String>) -> FetchedPage {
        let form = json!({
            "fields": [
                {"name": "username", "label": "Username", "widget": "text", "required": true,
                 "value": username,
                 "help_text": format!("Demo accounts: alice, bob or carol with password {DEMO_PASSWORD}")},
                {"name": "password", "label": "Password", "widget": "password", "required": true},
            ],
            "errors": errors,
        });
        self.render(
            "LoginView",
            json!({"action_url": "/login/", "form": form}),
            "Log in",
            true,
        )
    }

    fn register_page(&mut self, username: &str, errors: &FieldErrors) -> FetchedPage {
        let errors_of = |name: &str| errors.get(name).cloned().unwrap_or_default();
        let form = json!({
            "fields": [
                {"name": "username", "label": "Username", "widget": "text", "required": true,
                 "value": username, "errors": errors_of("username")},
                {"name": "password1", "label": "Password", "widget": "password", "required": true,
                 "help_text": format!("<ul><li>At least {MIN_PASSWORD_LEN} characters.</li></ul>"),
                 "errors": errors_of("password1")},
                {"name": "password2", "label": "Password confirmation", "widget": "password",
                 "required": true, "errors": errors_of("password2")},
            ],
        });
        self.render(
            "RegisterView",
            json!({"action_url": "/register/", "form": form}),
            "Register",
            true,
        )
    }

    fn submit_login(&mut self, fields: &HashMap<String, String>) -> FetchedPage {
        let username = fields.get("username").map(|s| s.trim()).unwrap_or("");
        let password = fields.get("password").map(String::as_str).unwrap_or("");
        let found = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(|u| u.id);
        match found {
            Some(id) => {
                self.session = Some(id);
                self.flash(MessageLevel::Success, format!("Welcome back, {username}!"));
                redirect("/")
            }
            None => self.login_page(
                username,
                vec!["Please enter a correct username and password.".to_string()],
            ),
        }
    }

    fn submit_register(&mut self, fields: &HashMap<String, String>) -> FetchedPage {
        let username = fields.get("username").map(|s| s.trim()).unwrap_or("").to_string();
        let password1 = fields.get("password1").cloned().unwrap_or_default();
        let password2 = fields.get("password2").cloned().unwrap_or_default();
        let mut errors: FieldErrors = HashMap::new();
        if username.is_empty() {
            push_error(&mut errors, "username", "This field is required.");
        } else if self.users.iter().any(|u| u.username == username) {
            push_error(&mut errors, "username", "A user with that username already exists.");
        }
        if password1.chars().count() < MIN_PASSWORD_LEN {
            push_error(
                &mut errors,
                "password1",
                &format!("This password is too short. It must contain at least {MIN_PASSWORD_LEN} characters."),
            );
        }
        if password1 != password2 {
            push_error(&mut errors, "password2", "The two password fields didn't match.");
        }
        if !errors.is_empty() {
            return self.register_page(&username, &errors);
        }
        let id = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        self.users.push(DemoUser {
            id,
            username: username.clone(),
            password: password1,
            score: 0,
        });
        self.session = Some(id);
        self.flash(MessageLevel::Success, format!("Account created. Welcome, {username}!"));
        redirect("/")
    }

    fn submit_bet(&mut self, match_id: u32, fields: &HashMap<String, String>) -> FetchedPage {
        let Some(user_id) = self.session else {
            self.flash(MessageLevel::Warning, "Log in to place a bet.");
            return redirect("/login/");
        };
        let Some(m) = self.match_by_id(match_id).cloned() else {
            return not_found();
        };
        let match_path = format!("/match/{match_id}/");
        if m.finished {
            self.flash(MessageLevel::Error, "Betting is closed for this match.");
            return redirect(&match_path);
        }
        if self.bets.contains_key(&(user_id, match_id)) {
            self.flash(MessageLevel::Warning, "You already placed a bet on this match.");
            return redirect(&match_path);
        }

        let mut errors: FieldErrors = HashMap::new();
        let winner_raw = fields.get("match_winner").map(|s| s.trim()).unwrap_or("");
        let winner = match winner_raw.parse::<u32>() {
            Ok(0) => Some((Some(0), "Draw".to_string())),
            Ok(id) if m.team_one == Some(id) || m.team_two == Some(id) => {
                Some((Some(id), self.team_name(Some(id))))
            }
            _ => {
                push_error(&mut errors, "match_winner", "Select a valid choice.");
                None
            }
        };

        let mut answers = Vec::new();
        for prediction in &m.predictions {
            let name = format!("prediction_{}", prediction.id);
            let raw = fields.get(&name).map(|s| s.trim()).unwrap_or("");
            if raw.is_empty() {
                push_error(&mut errors, &name, "This field is required.");
                continue;
            }
            let display = match prediction.kind {
                PredictionType::Numerical => match raw.parse::<i64>() {
                    Ok(n) if n >= 0 => Some(n.to_string()),
                    _ => None,
                },
                PredictionType::Player => raw
                    .parse::<u32>()
                    .ok()
                    .and_then(|id| self.player_name(id)),
                PredictionType::Boolean | PredictionType::Other => match raw {
                    "yes" => Some("Yes".to_string()),
                    "no" => Some("No".to_string()),
                    _ => None,
                },
            };
            match display {
                Some(display) => answers.push(answer(prediction, raw, &display, None, None)),
                None => push_error(&mut errors, &name, "Enter a valid value."),
            }
        }

        let Some((winner_id, winner_name)) = winner.filter(|_| errors.is_empty()) else {
            return self.match_detail(match_id, fields, &errors);
        };
        let details = UserBetDetails {
            chosen_winner: Some(ChosenWinner {
                id: winner_id,
                name: winner_name,
                score_points: Some(m.winner_points),
                actual_winner_details: None,
                gained_points_for_winner: None,
            }),
            answers,
            bet_id: self.next_bet_id,
            points_have_been_calculated: false,
            total_gained_points: None,
        };
        self.next_bet_id += 1;
        self.bets.insert((user_id, match_id), details);
        self.flash(MessageLevel::Success, "Your bet has been placed.");
        redirect(&match_path)
    }
}

impl PageSource for DemoBackend {
    fn get(&mut self, path: &str) -> Result<FetchedPage> {
        let page = match route(path) {
            Route::Home => self.home(),
            Route::Login | Route::Register if self.session.is_some() => redirect("/"),
            Route::Login => self.login_page("", Vec::new()),
            Route::Register => self.register_page("", &HashMap::new()),
            Route::Match(id) => self.match_detail(id, &HashMap::new(), &HashMap::new()),
            Route::Team(id) => self.team_detail(id),
            Route::Competition(id) => self.competition_detail(id),
            Route::Logout | Route::Bet(_) | Route::Unknown => not_found(),
        };
        Ok(page)
    }

    fn post(&mut self, action: &str, fields: &[(String, String)]) -> Result<FetchedPage> {
        let fields: HashMap<String, String> = fields.iter().cloned().collect();
        if fields.get(CSRF_FIELD).map(String::as_str) != Some(DEMO_CSRF) {
            return Ok(FetchedPage {
                status: 403,
                body: "CSRF verification failed. Request aborted.".to_string(),
            });
        }
        let page = match route(action) {
            Route::Login => self.submit_login(&fields),
            Route::Register => self.submit_register(&fields),
            Route::Logout => {
                self.session = None;
                self.flash(MessageLevel::Info, "You have been logged out.");
                redirect("/")
            }
            Route::Bet(id) => self.submit_bet(id, &fields),
            _ => not_found(),
        };
        Ok(page)
    }
}

pub fn spawn_demo_provider(config: &Config, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    let provider = Provider::new(DemoBackend::new(), None, &config.start_path);
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Demo mode: log in as alice with password {DEMO_PASSWORD}"
    )));
    spawn_worker(provider, tx, cmd_rx);
}

fn envelope(status: u16, body: Value) -> FetchedPage {
    FetchedPage {
        status,
        body: body.to_string(),
    }
}

fn redirect(path: &str) -> FetchedPage {
    envelope(200, json!({"status": "Redirect", "path": path}))
}

fn not_found() -> FetchedPage {
    envelope(404, json!({"status": "NotFound"}))
}

fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

fn prediction_type_name(kind: PredictionType) -> &'static str {
    match kind {
        PredictionType::Numerical => "numerical",
        PredictionType::Player => "player",
        PredictionType::Boolean => "boolean",
        PredictionType::Other => "other",
    }
}

fn player_label(player: &DemoPlayer) -> String {
    format!("{} {}", player.first_name, player.last_name)
}

fn player_json(player: &DemoPlayer) -> Value {
    json!({
        "id": player.id,
        "first_name": player.first_name,
        "last_name": player.last_name,
        "nickname": player.nickname,
        "role": player.role,
        "photo_url": null,
    })
}

fn answer(
    prediction: &DemoPrediction,
    value: &str,
    display: &str,
    correct: Option<&str>,
    gained: Option<i64>,
) -> PredictionAnswer {
    PredictionAnswer {
        prediction_id: prediction.id,
        prediction_label: prediction.label.to_string(),
        prediction_type: prediction.kind,
        prediction_score_points: prediction.points,
        user_answer_value: Some(value.to_string()),
        user_answer_display: display.to_string(),
        correct_value_display: correct.map(str::to_string),
        gained_points: gained,
    }
}

fn seed_users() -> Vec<DemoUser> {
    [("alice", 42), ("bob", 30), ("carol", 12)]
        .into_iter()
        .enumerate()
        .map(|(idx, (name, score))| DemoUser {
            id: idx as u32 + 1,
            username: name.to_string(),
            password: DEMO_PASSWORD.to_string(),
            score,
        })
        .collect()
}

fn player(
    id: u32,
    first_name: &'static str,
    last_name: &'static str,
    nickname: Option<&'static str>,
    role: Option<&'static str>,
) -> DemoPlayer {
    DemoPlayer {
        id,
        first_name,
        last_name,
        nickname,
        role,
    }
}

fn seed_teams() -> Vec<DemoTeam> {
    vec![
        DemoTeam {
            id: 1,
            name: "Lions",
            players: vec![
                player(1, "Ada", "Stone", None, Some("Forward")),
                player(2, "Kai", "Reed", Some("Rocket"), Some("Midfielder")),
                player(3, "Luis", "Ortega", None, Some("Goalkeeper")),
            ],
        },
        DemoTeam {
            id: 2,
            name: "Hawks",
            players: vec![
                player(4, "Mia", "Chen", None, Some("Forward")),
                player(5, "Tom", "Berg", None, Some("Defender")),
            ],
        },
        DemoTeam {
            id: 3,
            name: "Wolves",
            players: vec![
                player(6, "Sam", "Ode", None, Some("Forward")),
                player(7, "Noor", "Haddad", None, None),
            ],
        },
        DemoTeam {
            id: 4,
            name: "Bears",
            players: Vec::new(),
        },
    ]
}

fn seed_competitions(now: DateTime<Utc>) -> Vec<DemoCompetition> {
    vec![
        DemoCompetition {
            id: 1,
            name: "World Cup 2026",
            start: now - ChronoDuration::days(7),
            end: now + ChronoDuration::days(30),
        },
        DemoCompetition {
            id: 2,
            name: "Premier Cup",
            start: now - ChronoDuration::days(20),
            end: now + ChronoDuration::days(60),
        },
    ]
}

fn seed_predictions(first_id: u32, scored: Option<[&str; 3]>) -> Vec<DemoPrediction> {
    let correct = |idx: usize| scored.map(|values| values[idx].to_string());
    vec![
        DemoPrediction {
            id: first_id,
            label: "Total goals",
            kind: PredictionType::Numerical,
            points: 5,
            correct: correct(0),
        },
        DemoPrediction {
            id: first_id + 1,
            label: "First goal scorer",
            kind: PredictionType::Player,
            points: 10,
            correct: correct(1),
        },
        DemoPrediction {
            id: first_id + 2,
            label: "Both teams score",
            kind: PredictionType::Boolean,
            points: 3,
            correct: correct(2),
        },
    ]
}

fn seed_matches(now: DateTime<Utc>) -> Vec<DemoMatch> {
    vec![
        DemoMatch {
            id: 1,
            competition_id: 1,
            team_one: Some(1),
            team_two: Some(2),
            start: now - ChronoDuration::days(3),
            finished: true,
            score: (2, 1),
            points_done: true,
            winner_points: 3,
            predictions: seed_predictions(1, Some(["3", "Ada Stone", "Yes"])),
        },
        DemoMatch {
            id: 2,
            competition_id: 1,
            team_one: Some(3),
            team_two: Some(1),
            start: now + ChronoDuration::days(2),
            finished: false,
            score: (0, 0),
            points_done: false,
            winner_points: 3,
            predictions: seed_predictions(4, None),
        },
        DemoMatch {
            id: 3,
            competition_id: 1,
            team_one: Some(2),
            team_two: Some(4),
            start: now + ChronoDuration::days(5),
            finished: false,
            score: (0, 0),
            points_done: false,
            winner_points: 2,
            predictions: seed_predictions(7, None),
        },
        DemoMatch {
            id: 4,
            competition_id: 2,
            team_one: Some(4),
            team_two: Some(3),
            start: now - ChronoDuration::days(10),
            finished: true,
            score: (0, 0),
            points_done: false,
            winner_points: 2,
            predictions: Vec::new(),
        },
        DemoMatch {
            id: 5,
            competition_id: 2,
            team_one: Some(1),
            team_two: None,
            start: now + ChronoDuration::days(9),
            finished: false,
            score: (0, 0),
            points_done: false,
            winner_points: 2,
            predictions: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{BridgeResponse, PageView, decode_render, parse_bridge_body};

    fn backend() -> DemoBackend {
        DemoBackend::with_seed(7, Utc::now())
    }

    fn rendered(page: &FetchedPage) -> PageView {
        match parse_bridge_body(&page.body).unwrap() {
            BridgeResponse::Render {
                view,
                props,
                context,
                messages,
                title,
            } => decode_render(&view, props, context, messages, title).unwrap().view,
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn routes_parse_ids_and_reject_junk() {
        assert!(matches!(route("/match/3/"), Route::Match(3)));
        assert!(matches!(route("/match/3/bet/"), Route::Bet(3)));
        assert!(matches!(route("/team/x/"), Route::Unknown));
        assert!(matches!(route("/?next=/"), Route::Home));
    }

    #[test]
    fn home_features_at_most_three_teams() {
        let mut demo = backend();
        match rendered(&demo.get("/").unwrap()) {
            PageView::Home(data) => {
                assert_eq!(data.featured_teams.len(), FEATURED_TEAMS);
                assert_eq!(data.leaderboard[0].user.username, "alice");
                assert!(data.upcoming_matches.iter().all(|m| !m.is_finished));
            }
            other => panic!("unexpected view {}", other.name()),
        }
    }

    #[test]
    fn posts_without_csrf_are_rejected() {
        let mut demo = backend();
        let page = demo
            .post("/login/", &[("username".into(), "alice".into())])
            .unwrap();
        assert_eq!(page.status, 403);
        assert!(demo.logged_in_user().is_none());
    }

    #[test]
    fn unknown_team_is_not_found() {
        let mut demo = backend();
        let page = demo.get("/team/99/").unwrap();
        assert_eq!(page.status, 404);
    }
}
