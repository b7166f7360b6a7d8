//! User-facing copy, grouped by the page that shows it.

pub mod layout {
    pub const APP_NAME: &str = "MATCHDAY";
    pub const FOOTER_TEXT: &str = "Matchday predictions - play fair, predict well.";
    pub const LOGIN_BUTTON_TEXT: &str = "Log in";
    pub const LOGOUT_BUTTON_TEXT: &str = "Log out";
    pub const LOADING: &str = "Loading";
    pub const OFFLINE_BADGE: &str = "offline copy";
}

pub mod home {
    pub const LEADERBOARD_TITLE: &str = "Leaderboard";
    pub const LEADERBOARD_RANK_HEADER: &str = "#";
    pub const LEADERBOARD_PLAYER_HEADER: &str = "Player";
    pub const LEADERBOARD_POINTS_HEADER: &str = "Points";
    pub const NO_LEADERBOARD_DATA: &str = "No scores yet. Place a bet to get on the board!";
    pub const UPCOMING_MATCHES_TITLE: &str = "Upcoming Matches";
    pub const NO_UPCOMING_MATCHES: &str = "No upcoming matches scheduled.";
    pub const FEATURED_TEAMS_TITLE: &str = "Featured Teams";
    pub const NO_FEATURED_TEAMS: &str = "No teams to show.";
    pub const FEATURED_COMPETITIONS_TITLE: &str = "Featured Competitions";
    pub const NO_FEATURED_COMPETITIONS: &str = "No competitions to show.";
    pub const VIEW_TEAM_BUTTON: &str = "View team";
    pub const VIEW_COMPETITION_BUTTON: &str = "View competition";
}

pub mod competition_detail {
    pub const DATES_LABEL: &str = "Dates:";
    pub const TO_SEPARATOR: &str = "to";
    pub const MATCHES_HEADER: &str = "Matches";
    pub const NO_MATCHES_MESSAGE: &str = "No matches scheduled yet.";
    pub const UPCOMING_MATCHES_HEADER: &str = "Upcoming Matches";
    pub const NO_UPCOMING_MATCHES_MESSAGE: &str = "No upcoming matches.";
    pub const FINISHED_MATCHES_HEADER: &str = "Finished Matches";
    pub const NO_FINISHED_MATCHES_MESSAGE: &str = "No finished matches yet.";
}

pub mod team_detail {
    pub const PLAYERS_HEADER: &str = "Players";
    pub const NO_PLAYERS_MESSAGE: &str = "No players registered for this team.";
    pub const ROLE_PREFIX: &str = "Role: ";
}

pub mod match_detail {
    pub const STATUS_LABEL: &str = "Status:";
    pub const STATUS_FINISHED: &str = "Finished";
    pub const STATUS_UPCOMING: &str = "Upcoming / In Progress";
    pub const DATE_LABEL: &str = "Date:";
    pub const VS: &str = "VS";
    pub const PREDICTIONS_TITLE: &str = "Predictions";
    pub const NO_PREDICTIONS: &str = "No predictions for this match.";
    pub const CORRECT_ANSWER_LABEL: &str = "Answer:";
    pub const WINNER_POINTS_LABEL: &str = "Correct winner:";
    pub const BET_FORM_TITLE: &str = "Place your bet";
    pub const BET_BUTTON_TEXT: &str = "Submit bet";
    pub const BETTING_CLOSED: &str = "Betting is closed for this match.";
    pub const LEADERBOARD_TITLE: &str = "Match Leaderboard";
    pub const LEADERBOARD_RANK_HEADER: &str = "Rank";
    pub const LEADERBOARD_PLAYER_HEADER: &str = "Player";
    pub const LEADERBOARD_POINTS_HEADER: &str = "Points";
    pub const LEADERBOARD_NO_DATA: &str = "No points have been awarded for this match yet.";
    pub const USER_BET_DISPLAY_TITLE: &str = "Your Bet";
    pub const USER_BET_DISPLAY_DESCRIPTION: &str =
        "Here is what you predicted. Results will appear once the match is scored.";
    pub const USER_BET_DISPLAY_DESCRIPTION_RESULTS_IN: &str =
        "The results are in. Here is how your predictions did.";
    pub const TOTAL_GAINED_POINTS_LABEL: &str = "Total points gained:";
    pub const PREDICTED_WINNER_TITLE: &str = "Predicted Winner";
    pub const YOUR_PREDICTION_LABEL: &str = "Your prediction:";
    pub const POTENTIAL_POINTS_LABEL: &str = "Potential:";
    pub const ACTUAL_WINNER_LABEL: &str = "Actual winner:";
    pub const GAINED_POINTS_LABEL: &str = "Gained:";
    pub const DETAILED_PREDICTIONS_TITLE: &str = "Detailed Predictions";
    pub const HEADER_PREDICTION: &str = "Prediction";
    pub const HEADER_YOUR_ANSWER: &str = "Your answer";
    pub const HEADER_CORRECT_ANSWER: &str = "Correct";
    pub const HEADER_GAINED_POINTS: &str = "Gained";
    pub const HEADER_POTENTIAL_POINTS: &str = "Potential";
    pub const NOT_AVAILABLE: &str = "N/A";
}

pub mod login {
    pub const LOGIN_HEADING: &str = "Sign in to your account";
    pub const LOGIN_BUTTON_TEXT: &str = "Log in";
    pub const ALT_ACTION_REGISTER_TEXT: &str = "No account yet? Register";
    pub const ALT_ACTION_REGISTER_LINK: &str = "/register/";
}

pub mod register {
    pub const REGISTER_HEADING: &str = "Create your account";
    pub const REGISTER_BUTTON_TEXT: &str = "Register";
    pub const ALT_ACTION_LOGIN_TEXT: &str = "Already registered? Log in";
    pub const ALT_ACTION_LOGIN_LINK: &str = "/login/";
}

pub mod errors {
    pub const NOT_FOUND: &str = "Page not found";
    pub const SERVER_ERROR: &str = "The server could not render this page";
    pub const BACK_HOME: &str = "Back to home";
    pub const MARKUP_FORM_READ_ONLY: &str = "This form can only be viewed here";
}
