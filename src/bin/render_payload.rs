use anyhow::{Context, Result, anyhow};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use matchday_terminal::bridge::rendered_from_body;
use matchday_terminal::state::{AppState, Delta, apply_delta};
use matchday_terminal::ui;

const DEFAULT_WIDTH: u16 = 110;
const DEFAULT_HEIGHT: u16 = 48;

/// Render a saved bridge response (JSON envelope or HTML shell) and print
/// it as plain text. `--frame` prints the full terminal frame instead of
/// just the page body.
fn main() -> Result<()> {
    let mut path = None;
    let mut frame = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--frame" => frame = true,
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or_else(|| anyhow!("usage: render_payload [--frame] <payload.json>"))?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
    let rendered = rendered_from_body(&raw).with_context(|| format!("decode {path}"))?;

    let mut state = AppState::new(format!("file://{path}"));
    apply_delta(
        &mut state,
        Delta::Render {
            path: format!("file://{path}"),
            view: Box::new(rendered),
            from_cache: false,
        },
    );

    if !frame {
        for line in state.page().plain_lines() {
            println!("{}", line.trim_end());
        }
        return Ok(());
    }

    let width = std::env::var("RENDER_WIDTH")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_WIDTH)
        .max(40);
    let height = std::env::var("RENDER_HEIGHT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_HEIGHT)
        .max(20);
    let mut terminal = Terminal::new(TestBackend::new(width, height)).context("test terminal")?;
    terminal
        .draw(|f| ui::draw(f, &state))
        .context("draw frame")?;
    let buffer = terminal.backend().buffer();
    for y in 0..buffer.area.height {
        let row: String = (0..buffer.area.width)
            .map(|x| buffer.get(x, y).symbol())
            .collect();
        println!("{}", row.trim_end());
    }
    Ok(())
}
