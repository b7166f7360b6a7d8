use std::collections::VecDeque;

use crate::bridge::RenderedView;
use crate::form::{CSRF_FIELD, FormField, FormFragment, FormInputs, Widget};
use crate::models::{Message, Viewer};
use crate::ui::page::{Page, Target};
use crate::ui::views::{ViewContext, build_view, error_page};

pub const MAX_LOGS: usize = 200;
pub const MAX_HISTORY: usize = 50;
pub const LOGOUT_PATH: &str = "/logout/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    NotFound { path: String },
    ServerError { path: String, detail: Option<String> },
}

pub struct AppState {
    pub current_path: String,
    pub history: Vec<String>,
    /// Set while navigating back so the next page does not re-push itself.
    pub skip_history: bool,
    /// History entry taken by the back navigation still in flight.
    pub pending_back: Option<String>,
    pub rendered: Option<RenderedView>,
    pub viewer: Option<Viewer>,
    pub csrf_token: Option<String>,
    pub messages: Vec<Message>,
    pub error: Option<PageError>,
    pub loading: Option<String>,
    pub focus: usize,
    pub scroll: usize,
    pub form: FormInputs,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    /// The page on screen came from the offline snapshot store.
    pub offline: bool,
}

impl AppState {
    pub fn new(start_path: impl Into<String>) -> Self {
        Self {
            current_path: start_path.into(),
            history: Vec::new(),
            skip_history: false,
            pending_back: None,
            rendered: None,
            viewer: None,
            csrf_token: None,
            messages: Vec::new(),
            error: None,
            loading: None,
            focus: 0,
            scroll: 0,
            form: FormInputs::default(),
            logs: VecDeque::new(),
            help_overlay: false,
            offline: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.viewer.as_ref().is_some_and(|v| v.is_authenticated)
    }

    pub fn page(&self) -> Page {
        if let Some(err) = &self.error {
            return error_page(err);
        }
        match &self.rendered {
            Some(rendered) => build_view(
                &rendered.view,
                &ViewContext {
                    viewer: self.viewer.as_ref(),
                    form: &self.form,
                },
            ),
            None => Page::new(),
        }
    }

    pub fn focused_target(&self) -> Option<Target> {
        self.page().target(self.focus).cloned()
    }

    pub fn focus_next(&mut self) {
        let count = self.page().focusables.len();
        if count == 0 {
            self.scroll = self.scroll.saturating_add(1);
            return;
        }
        self.focus = (self.focus + 1) % count;
    }

    pub fn focus_prev(&mut self) {
        let count = self.page().focusables.len();
        if count == 0 {
            self.scroll = self.scroll.saturating_sub(1);
            return;
        }
        self.focus = (self.focus + count - 1) % count;
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll.saturating_add(delta as usize)
        };
    }

    /// Move focus roughly a screen away; plain scroll on pages without targets.
    pub fn page_jump(&mut self, forward: bool, lines: usize) {
        let page = self.page();
        if page.focusables.is_empty() {
            let delta = lines as i32;
            self.scroll_by(if forward { delta } else { -delta });
            return;
        }
        let current = page.line_of(self.focus).unwrap_or(0);
        self.focus = if forward {
            let target = current + lines;
            page.focusables
                .iter()
                .position(|f| f.line >= target)
                .unwrap_or(page.focusables.len() - 1)
        } else {
            let target = current.saturating_sub(lines);
            page.focusables
                .iter()
                .rposition(|f| f.line <= target)
                .unwrap_or(0)
        };
    }

    /// Path to revisit when going back; the next render will not be pushed.
    pub fn begin_back(&mut self) -> Option<String> {
        let path = self.history.pop()?;
        self.skip_history = true;
        self.pending_back = Some(path.clone());
        Some(path)
    }

    /// Undo `begin_back` when the request never produced a page.
    pub fn cancel_back(&mut self) {
        self.skip_history = false;
        if let Some(path) = self.pending_back.take() {
            self.history.push(path);
        }
    }

    pub fn form_fragment(&self) -> Option<(&FormFragment, &str)> {
        if self.error.is_some() {
            return None;
        }
        self.rendered.as_ref().and_then(|r| r.view.form())
    }

    fn focused_field_index(&self) -> Option<usize> {
        match self.focused_target()? {
            Target::Field(idx) => Some(idx),
            _ => None,
        }
    }

    pub fn focused_field(&self) -> Option<(usize, &FormField)> {
        let idx = self.focused_field_index()?;
        let (fragment, _) = self.form_fragment()?;
        fragment.fields().get(idx).map(|field| (idx, field))
    }

    pub fn focused_widget(&self) -> Option<Widget> {
        self.focused_field().map(|(_, field)| field.widget)
    }

    pub fn type_char(&mut self, ch: char) {
        let Some(idx) = self.focused_field_index() else {
            return;
        };
        let Some(field) = focused_form_field(&self.rendered, self.error.is_some(), idx) else {
            return;
        };
        self.form.insert_char(idx, field, ch);
    }

    pub fn backspace(&mut self) {
        let Some(idx) = self.focused_field_index() else {
            return;
        };
        let Some(field) = focused_form_field(&self.rendered, self.error.is_some(), idx) else {
            return;
        };
        self.form.backspace(idx, field);
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(idx) = self.focused_field_index() else {
            return;
        };
        let Some(field) = focused_form_field(&self.rendered, self.error.is_some(), idx) else {
            return;
        };
        self.form.cycle_choice(idx, field, forward);
    }

    pub fn toggle_checkbox(&mut self) {
        let Some(idx) = self.focused_field_index() else {
            return;
        };
        let Some(field) = focused_form_field(&self.rendered, self.error.is_some(), idx) else {
            return;
        };
        self.form.toggle(idx, field);
    }

    /// Encoded POST for the page's form, or `None` when there is nothing
    /// that can be submitted.
    pub fn submission(&mut self) -> Option<ProviderCommand> {
        let Some((fragment, action)) = self.form_fragment() else {
            self.push_log("[INFO] Nothing to submit on this page");
            return None;
        };
        if !fragment.is_submittable() {
            self.push_log("[WARN] This form was delivered as markup and cannot be submitted");
            return None;
        }
        let fields = self.form.encode(fragment, self.csrf_token.as_deref());
        let action = if action.is_empty() {
            self.current_path.clone()
        } else {
            action.to_string()
        };
        Some(ProviderCommand::Submit { action, fields })
    }

    pub fn logout_command(&self) -> ProviderCommand {
        let fields = self
            .csrf_token
            .iter()
            .map(|token| (CSRF_FIELD.to_string(), token.clone()))
            .collect();
        ProviderCommand::Submit {
            action: LOGOUT_PATH.to_string(),
            fields,
        }
    }

    fn enter_path(&mut self, path: String) {
        let has_page = self.rendered.is_some() || self.error.is_some();
        if !self.skip_history && has_page && path != self.current_path {
            self.history.push(std::mem::take(&mut self.current_path));
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
        self.skip_history = false;
        self.pending_back = None;
        self.current_path = path;
        self.focus = 0;
        self.scroll = 0;
        self.loading = None;
    }
}

fn focused_form_field(
    rendered: &Option<RenderedView>,
    has_error: bool,
    idx: usize,
) -> Option<&FormField> {
    if has_error {
        return None;
    }
    let (fragment, _) = rendered.as_ref()?.view.form()?;
    fragment.fields().get(idx)
}

#[derive(Debug, Clone)]
pub enum Delta {
    Loading {
        path: String,
    },
    Render {
        path: String,
        view: Box<RenderedView>,
        from_cache: bool,
    },
    NotFound {
        path: String,
    },
    ServerError {
        path: String,
        detail: Option<String>,
    },
    /// The request produced nothing to show; the current page stays.
    RequestFailed {
        path: String,
        reason: String,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    Navigate {
        path: String,
    },
    Submit {
        action: String,
        fields: Vec<(String, String)>,
    },
    Reload,
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Loading { path } => {
            state.loading = Some(path);
        }
        Delta::Render {
            path,
            view,
            from_cache,
        } => {
            state.enter_path(path);
            let view = *view;
            state.form = match view.view.form() {
                Some((fragment, _)) => FormInputs::from_fragment(fragment),
                None => FormInputs::default(),
            };
            // Snapshots carry whoever was logged in when they were taken.
            if !from_cache {
                if let Some(viewer) = &view.viewer {
                    state.viewer = Some(viewer.clone());
                }
                if view.csrf_token.is_some() {
                    state.csrf_token = view.csrf_token.clone();
                }
            }
            for message in &view.messages {
                state.push_log(format!("[INFO] {}", message.text));
            }
            state.messages = view.messages.clone();
            state.offline = from_cache;
            state.error = None;
            state.rendered = Some(view);
        }
        Delta::NotFound { path } => {
            state.push_log(format!("[WARN] Not found: {path}"));
            state.enter_path(path.clone());
            state.messages.clear();
            state.offline = false;
            state.error = Some(PageError::NotFound { path });
        }
        Delta::ServerError { path, detail } => {
            match &detail {
                Some(detail) => state.push_log(format!("[WARN] Server error on {path}: {detail}")),
                None => state.push_log(format!("[WARN] Server error on {path}")),
            }
            state.enter_path(path.clone());
            state.messages.clear();
            state.offline = false;
            state.error = Some(PageError::ServerError { path, detail });
        }
        Delta::RequestFailed { path, reason } => {
            state.push_log(format!("[WARN] {path}: {reason}"));
            state.loading = None;
            state.cancel_back();
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
