use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::form::FormFragment;
use crate::models::{
    CompetitionData, HomePageData, MatchData, Message, TeamData, UserBetDetails, Viewer,
};

const INITIAL_RESPONSE_ID: &str = "id=\"initial-response\"";
const AUTH_PROPS_KEY: &str = "isAuthenticated";

/// Response envelope the backend sends for every page request.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status")]
pub enum BridgeResponse {
    Render {
        view: String,
        #[serde(default)]
        props: Value,
        #[serde(default)]
        context: BridgeContext,
        #[serde(default)]
        messages: Vec<Message>,
        #[serde(default)]
        title: Option<String>,
    },
    Redirect {
        path: String,
    },
    Reload,
    NotFound,
    ServerError,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeContext {
    #[serde(default)]
    pub csrf_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthFormProps {
    pub action_url: String,
    pub form: FormFragment,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchDetailProps {
    #[serde(rename = "match")]
    pub match_data: MatchData,
    #[serde(default)]
    pub user_bet_details: Option<UserBetDetails>,
    #[serde(default)]
    pub bet_form: Option<FormFragment>,
    #[serde(default)]
    pub bet_action_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamDetailProps {
    pub team: TeamData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompetitionDetailProps {
    pub competition: CompetitionData,
}

/// One variant per registered view.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(HomePageData),
    Login(AuthFormProps),
    Register(AuthFormProps),
    MatchDetail(Box<MatchDetailProps>),
    TeamDetail(TeamDetailProps),
    CompetitionDetail(CompetitionDetailProps),
}

impl PageView {
    pub fn name(&self) -> &'static str {
        match self {
            PageView::Home(_) => "HomeView",
            PageView::Login(_) => "LoginView",
            PageView::Register(_) => "RegisterView",
            PageView::MatchDetail(_) => "MatchDetailView",
            PageView::TeamDetail(_) => "TeamDetailView",
            PageView::CompetitionDetail(_) => "CompetitionDetailView",
        }
    }

    /// Form the page carries along with the URL it posts to.
    pub fn form(&self) -> Option<(&FormFragment, &str)> {
        match self {
            PageView::Login(props) | PageView::Register(props) => {
                Some((&props.form, props.action_url.as_str()))
            }
            PageView::MatchDetail(props) => {
                let form = props.bet_form.as_ref()?;
                let action = props.bet_action_url.as_deref().unwrap_or("");
                Some((form, action))
            }
            _ => None,
        }
    }

    pub fn is_auth_page(&self) -> bool {
        matches!(self, PageView::Login(_) | PageView::Register(_))
    }
}

/// A decoded `Render` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub view: PageView,
    /// Present only when the payload carried the authentication props.
    pub viewer: Option<Viewer>,
    pub csrf_token: Option<String>,
    pub messages: Vec<Message>,
    pub title: Option<String>,
}

type ViewDecoder = fn(Value) -> Result<PageView>;

const VIEWS: &[(&str, ViewDecoder)] = &[
    ("HomeView", decode_home),
    // The backend's bare index route still renders under the short name.
    ("Home", decode_home),
    ("LoginView", decode_login),
    ("RegisterView", decode_register),
    ("MatchDetailView", decode_match_detail),
    ("TeamDetailView", decode_team_detail),
    ("CompetitionDetailView", decode_competition_detail),
];

pub fn registered_views() -> impl Iterator<Item = &'static str> {
    VIEWS.iter().map(|(name, _)| *name)
}

fn decode_home(props: Value) -> Result<PageView> {
    Ok(PageView::Home(decode_props(props, "HomeView")?))
}

fn decode_login(props: Value) -> Result<PageView> {
    Ok(PageView::Login(decode_props(props, "LoginView")?))
}

fn decode_register(props: Value) -> Result<PageView> {
    Ok(PageView::Register(decode_props(props, "RegisterView")?))
}

fn decode_match_detail(props: Value) -> Result<PageView> {
    let props = decode_props(props, "MatchDetailView")?;
    Ok(PageView::MatchDetail(Box::new(props)))
}

fn decode_team_detail(props: Value) -> Result<PageView> {
    Ok(PageView::TeamDetail(decode_props(props, "TeamDetailView")?))
}

fn decode_competition_detail(props: Value) -> Result<PageView> {
    Ok(PageView::CompetitionDetail(decode_props(
        props,
        "CompetitionDetailView",
    )?))
}

fn decode_props<T: DeserializeOwned>(props: Value, view: &str) -> Result<T> {
    let props = if props.is_null() {
        Value::Object(Default::default())
    } else {
        props
    };
    serde_json::from_value(props).with_context(|| format!("invalid props for {view}"))
}

pub fn decode_view(view: &str, props: Value) -> Result<PageView> {
    let Some((_, decode)) = VIEWS.iter().find(|(name, _)| *name == view) else {
        return Err(anyhow!("unknown view: {view}"));
    };
    decode(props)
}

pub fn decode_render(
    view: &str,
    props: Value,
    context: BridgeContext,
    messages: Vec<Message>,
    title: Option<String>,
) -> Result<RenderedView> {
    let viewer = props
        .get(AUTH_PROPS_KEY)
        .and_then(|_| serde_json::from_value::<Viewer>(props.clone()).ok());
    let view = decode_view(view, props)?;
    Ok(RenderedView {
        view,
        viewer,
        csrf_token: context.csrf_token.filter(|t| !t.is_empty()),
        messages,
        title,
    })
}

pub fn parse_bridge_json(raw: &str) -> Result<BridgeResponse> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty bridge response"));
    }
    serde_json::from_str(trimmed).context("invalid bridge json")
}

/// Accept either a bare JSON envelope or the HTML shell that embeds it.
pub fn parse_bridge_body(raw: &str) -> Result<BridgeResponse> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') {
        return parse_bridge_json(trimmed);
    }
    let embedded = extract_initial_response(raw)
        .ok_or_else(|| anyhow!("no initial-response script in html body"))?;
    parse_bridge_json(embedded)
}

/// Decode a body that is expected to carry a `Render` envelope.
pub fn rendered_from_body(raw: &str) -> Result<RenderedView> {
    match parse_bridge_body(raw)? {
        BridgeResponse::Render {
            view,
            props,
            context,
            messages,
            title,
        } => decode_render(&view, props, context, messages, title),
        other => Err(anyhow!("expected a rendered page, got {other:?}")),
    }
}

pub fn extract_initial_response(html: &str) -> Option<&str> {
    let marker = html.find(INITIAL_RESPONSE_ID)?;
    let rest = &html[marker..];
    let open_end = rest.find('>')?;
    let body = &rest[open_end + 1..];
    let close = body.find("</script>")?;
    Some(body[..close].trim())
}
