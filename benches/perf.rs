use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

use matchday_terminal::bridge::rendered_from_body;
use matchday_terminal::form::markup_lines;
use matchday_terminal::state::{AppState, Delta, apply_delta};

const MATCH_OPEN: &str = include_str!("../tests/fixtures/match_open.json");
const SHELL: &str = include_str!("../tests/fixtures/shell.html");

fn big_competition(matches: u32) -> String {
    let items: Vec<_> = (1..=matches)
        .map(|id| {
            json!({
                "id": id,
                "team_one": {"id": id * 2, "name": format!("Club {id} North")},
                "team_two": {"id": id * 2 + 1, "name": format!("Club {id} South")},
                "start_datetime": "2026-06-14T19:00:00Z",
                "is_finished": id % 3 == 0,
            })
        })
        .collect();
    json!({
        "status": "Render",
        "view": "CompetitionDetailView",
        "props": {"competition": {
            "id": 1, "name": "Stress Cup", "start_date": "2026-06-01",
            "end_date": "2026-07-15", "matches": items
        }},
        "context": {"csrf_token": "bench"}
    })
    .to_string()
}

fn state_with(raw: &str) -> AppState {
    let mut state = AppState::new("/");
    let view = rendered_from_body(raw).unwrap();
    apply_delta(
        &mut state,
        Delta::Render {
            path: "/bench/".to_string(),
            view: Box::new(view),
            from_cache: false,
        },
    );
    state
}

fn bench_envelope_decode(c: &mut Criterion) {
    c.bench_function("envelope_decode_match", |b| {
        b.iter(|| {
            let rendered = rendered_from_body(black_box(MATCH_OPEN)).unwrap();
            black_box(rendered.messages.len());
        })
    });
    c.bench_function("envelope_decode_shell", |b| {
        b.iter(|| {
            let rendered = rendered_from_body(black_box(SHELL)).unwrap();
            black_box(rendered.csrf_token);
        })
    });
}

fn bench_page_build(c: &mut Criterion) {
    let state = state_with(&big_competition(400));
    c.bench_function("page_build_competition_400", |b| {
        b.iter(|| {
            let page = black_box(&state).page();
            black_box(page.focusables.len());
        })
    });
}

fn bench_focus_walk(c: &mut Criterion) {
    let mut state = state_with(&big_competition(120));
    c.bench_function("focus_walk_competition_120", |b| {
        b.iter(|| {
            state.focus_next();
            black_box(state.focus);
        })
    });
}

fn bench_form_encode(c: &mut Criterion) {
    let state = state_with(MATCH_OPEN);
    c.bench_function("form_encode_bet", |b| {
        b.iter(|| {
            let (fragment, _) = state.form_fragment().unwrap();
            let pairs = state.form.encode(fragment, state.csrf_token.as_deref());
            black_box(pairs.len());
        })
    });
}

fn bench_markup_lines(c: &mut Criterion) {
    let markup = "<p><label for=\"id_username\">Username:</label>\
        <input type=\"text\" name=\"username\"></p>\
        <ul class=\"errorlist\"><li>A user with that username already exists.</li></ul>"
        .repeat(20);
    c.bench_function("markup_lines", |b| {
        b.iter(|| {
            let lines = markup_lines(black_box(&markup));
            black_box(lines.len());
        })
    });
}

criterion_group!(
    benches,
    bench_envelope_decode,
    bench_page_build,
    bench_focus_walk,
    bench_form_encode,
    bench_markup_lines
);
criterion_main!(benches);
