use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` the same way as a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchListItem {
    pub id: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub team_one: TeamInfo,
    #[serde(default, deserialize_with = "null_default")]
    pub team_two: TeamInfo,
    #[serde(default, deserialize_with = "null_default")]
    pub start_datetime: String,
    #[serde(default)]
    pub is_finished: bool,
}

/// Featured team or competition card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub id: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub last_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub players: Vec<PlayerData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub id: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionType {
    Numerical,
    Player,
    Boolean,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: u32,
    pub label: String,
    pub prediction_type: PredictionType,
    #[serde(default)]
    pub score_points: i64,
    #[serde(default)]
    pub correct_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardUser {
    pub id: u32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user: LeaderboardUser,
    // The home payload ships the overall standings under `score`.
    #[serde(alias = "score", default)]
    pub total_gained_points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchData {
    pub id: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub competition: Competition,
    #[serde(default, deserialize_with = "null_default")]
    pub team_one: Team,
    #[serde(default, deserialize_with = "null_default")]
    pub team_two: Team,
    #[serde(default, deserialize_with = "null_default")]
    pub team_one_score: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub team_two_score: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub start_datetime: String,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub points_calculation_done: bool,
    #[serde(default)]
    pub is_winner_needed: bool,
    #[serde(default)]
    pub team_one_draw_score: Option<i64>,
    #[serde(default)]
    pub team_two_draw_score: Option<i64>,
    #[serde(default)]
    pub score_points: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamData {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub players: Vec<PlayerData>,
    #[serde(default, deserialize_with = "null_default")]
    pub matches: Vec<MatchListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionData {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_default")]
    pub end_date: String,
    #[serde(default, deserialize_with = "null_default")]
    pub matches: Vec<MatchListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomePageData {
    #[serde(default, deserialize_with = "null_default")]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default, deserialize_with = "null_default")]
    pub upcoming_matches: Vec<MatchListItem>,
    #[serde(default, deserialize_with = "null_default")]
    pub featured_teams: Vec<ListItem>,
    #[serde(default, deserialize_with = "null_default")]
    pub featured_competitions: Vec<ListItem>,
    #[serde(default)]
    pub current_user_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub score: i64,
}

/// Authentication props the backend merges into most page payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
    #[serde(rename = "currentUser", default)]
    pub current_user: Option<CurrentUser>,
}

impl Viewer {
    pub fn user_id(&self) -> Option<u32> {
        if !self.is_authenticated {
            return None;
        }
        self.current_user.as_ref().map(|u| u.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualWinner {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub is_draw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenWinner {
    /// `Some(0)` is how the backend encodes a predicted draw.
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub score_points: Option<i64>,
    #[serde(default)]
    pub actual_winner_details: Option<ActualWinner>,
    #[serde(default)]
    pub gained_points_for_winner: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionAnswer {
    pub prediction_id: u32,
    pub prediction_label: String,
    pub prediction_type: PredictionType,
    #[serde(default)]
    pub prediction_score_points: i64,
    #[serde(default)]
    pub user_answer_value: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub user_answer_display: String,
    #[serde(default)]
    pub correct_value_display: Option<String>,
    #[serde(default)]
    pub gained_points: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBetDetails {
    #[serde(default)]
    pub chosen_winner: Option<ChosenWinner>,
    #[serde(default, deserialize_with = "null_default")]
    pub answers: Vec<PredictionAnswer>,
    pub bet_id: u32,
    #[serde(default)]
    pub points_have_been_calculated: bool,
    #[serde(default)]
    pub total_gained_points: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Debug,
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Flash message attached to a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(alias = "html")]
    pub text: String,
    #[serde(default)]
    pub level: MessageLevel,
}
