use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Terminal;

use toolgen_core::pipeline::FileDownload;
use toolgen_core::pipeline::SubmissionStatus;
use toolgen_core::reducer::{reduce, GeneratorEffect};
use toolgen_core::schema::{fields, FieldKind, FieldSpec};
use toolgen_core::state::{GeneratorState, LogEntry, LogLevel, UiTheme, View};
use toolgen_core::{GeneratorAction, RuntimeAction, SubmissionError, UserAction};
use toolgen_exec::{DirectoryDownload, GenerationTransport, SubmissionEvent, SubmissionWorker};

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

/// Where effects go: the network worker and the export directory.
struct Host {
    worker: SubmissionWorker,
    download: DirectoryDownload,
}

pub fn run(
    mut state: GeneratorState,
    transport: Arc<dyn GenerationTransport>,
    export_dir: PathBuf,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let host = Host {
        worker: SubmissionWorker::new(transport, tx),
        download: DirectoryDownload::new(export_dir),
    };

    let result = run_app(&mut terminal, &mut state, &host, &rx);
    reduce(&mut state, GeneratorAction::Runtime(RuntimeAction::Teardown));
    tracing::info!("terminal form closed");
    result
}

#[derive(Debug, Default)]
struct Viewport {
    result_scroll: u16,
}

impl Viewport {
    fn scroll(&mut self, delta: i32) {
        let next = i32::from(self.result_scroll).saturating_add(delta);
        self.result_scroll = next.clamp(0, i32::from(u16::MAX)) as u16;
    }
}

enum KeyHandlerResult {
    Continue(Vec<GeneratorEffect>),
    Exit,
}

#[derive(Debug)]
enum KeyIntent {
    Quit,
    Dispatch(UserAction),
    Scroll(i32),
    Ignore,
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut GeneratorState,
    host: &Host,
    rx: &mpsc::Receiver<SubmissionEvent>,
) -> io::Result<()> {
    let mut viewport = Viewport::default();

    loop {
        while let Ok(event) = rx.try_recv() {
            let effects = reduce(state, GeneratorAction::Runtime(event.into_action()));
            if state.view == View::Result {
                viewport.result_scroll = 0;
            }
            apply_effects(effects, state, host);
        }

        terminal.draw(|f| ui(f, state, &viewport))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(key, state, &mut viewport) {
                    KeyHandlerResult::Continue(effects) => apply_effects(effects, state, host),
                    KeyHandlerResult::Exit => return Ok(()),
                }
            }
        }
    }
}

fn handle_key_event(
    key: KeyEvent,
    state: &mut GeneratorState,
    viewport: &mut Viewport,
) -> KeyHandlerResult {
    match key_intent(key, state.view, state.cursor.field.spec().kind) {
        KeyIntent::Quit => KeyHandlerResult::Exit,
        KeyIntent::Dispatch(action) => {
            KeyHandlerResult::Continue(reduce(state, GeneratorAction::User(action)))
        }
        KeyIntent::Scroll(delta) => {
            viewport.scroll(delta);
            KeyHandlerResult::Continue(Vec::new())
        }
        KeyIntent::Ignore => KeyHandlerResult::Continue(Vec::new()),
    }
}

fn key_intent(key: KeyEvent, view: View, focused: FieldKind) -> KeyIntent {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let action = match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return KeyIntent::Quit,
            KeyCode::Char('s') => UserAction::Submit,
            KeyCode::Char('e') => UserAction::Export,
            KeyCode::Char('y') => UserAction::CopyArtifact,
            KeyCode::Char('n') => UserAction::NextView,
            KeyCode::Char('t') => UserAction::CycleTheme,
            KeyCode::Char('r') => UserAction::ResetForm,
            _ => return KeyIntent::Ignore,
        };
        return KeyIntent::Dispatch(action);
    }

    match key.code {
        KeyCode::F(n @ 1..=3) => {
            KeyIntent::Dispatch(UserAction::SelectView(View::ALL[usize::from(n - 1)]))
        }
        KeyCode::Esc => KeyIntent::Dispatch(UserAction::DismissNotification),
        code if view == View::Form => form_key(code, focused),
        KeyCode::Tab => KeyIntent::Dispatch(UserAction::NextView),
        KeyCode::Up => KeyIntent::Scroll(-1),
        KeyCode::Down => KeyIntent::Scroll(1),
        KeyCode::PageUp => KeyIntent::Scroll(-10),
        KeyCode::PageDown => KeyIntent::Scroll(10),
        KeyCode::Home => KeyIntent::Scroll(i32::MIN),
        _ => KeyIntent::Ignore,
    }
}

fn form_key(code: KeyCode, focused: FieldKind) -> KeyIntent {
    let action = match code {
        KeyCode::Tab | KeyCode::Down => UserAction::FocusNext,
        KeyCode::BackTab | KeyCode::Up => UserAction::FocusPrev,
        KeyCode::Left => UserAction::CursorPrev,
        KeyCode::Right => UserAction::CursorNext,
        KeyCode::Enter => UserAction::ActivateCursor,
        KeyCode::Backspace => UserAction::InputBackspace,
        KeyCode::Char(' ') if focused != FieldKind::Text => UserAction::ActivateCursor,
        KeyCode::Char(c) if focused == FieldKind::Text => UserAction::InputChar(c),
        _ => return KeyIntent::Ignore,
    };
    KeyIntent::Dispatch(action)
}

fn apply_effects(effects: Vec<GeneratorEffect>, state: &mut GeneratorState, host: &Host) {
    for effect in effects {
        match effect {
            GeneratorEffect::RequestFrame => {}
            GeneratorEffect::SendGenerateRequest(ticket) => {
                let run_id = ticket.run_id;
                if let Err(err) = host.worker.dispatch(ticket) {
                    tracing::error!(run_id, error = %err, "failed to start submission worker");
                    reduce(
                        state,
                        GeneratorAction::Runtime(RuntimeAction::SubmissionResolved {
                            run_id,
                            result: Err(SubmissionError::Transport(format!(
                                "could not start request: {err}"
                            ))),
                        }),
                    );
                }
            }
            GeneratorEffect::TriggerFileDownload { filename, content } => {
                let path = host.download.target(filename);
                let run_id = state
                    .pipeline
                    .artifact()
                    .map_or(0, |artifact| artifact.run_id);
                let entry = match host.download.trigger_file_download(filename, &content) {
                    Ok(()) => LogEntry::new(
                        LogLevel::Info,
                        format!("Saved {}", path.display()),
                        run_id,
                    ),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "export failed");
                        LogEntry::new(LogLevel::Error, format!("Export failed: {err}"), run_id)
                    }
                };
                reduce(state, GeneratorAction::Runtime(RuntimeAction::AppendLog(entry)));
            }
            GeneratorEffect::CopyToClipboard(text) => {
                let bytes = text.len();
                let entry = match arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(text))
                {
                    Ok(()) => LogEntry::new(
                        LogLevel::Info,
                        format!("Copied {bytes} bytes to the clipboard"),
                        0,
                    ),
                    Err(err) => {
                        tracing::warn!(error = %err, "clipboard unavailable");
                        LogEntry::new(LogLevel::Warn, format!("Clipboard unavailable: {err}"), 0)
                    }
                };
                reduce(state, GeneratorAction::Runtime(RuntimeAction::AppendLog(entry)));
            }
        }
    }
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    accent_alt: Color,
    success: Color,
    warning: Color,
    danger: Color,
    muted: Color,
    border: Color,
    panel_bg: Color,
    selected_bg: Color,
}

fn palette_for(theme: UiTheme) -> UiPalette {
    match theme {
        UiTheme::Classic => UiPalette {
            accent: Color::Cyan,
            accent_alt: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::DarkGray,
            border: Color::Gray,
            panel_bg: Color::Black,
            selected_bg: Color::DarkGray,
        },
        UiTheme::NeonNoir => UiPalette {
            accent: Color::LightBlue,
            accent_alt: Color::LightCyan,
            success: Color::LightGreen,
            warning: Color::Yellow,
            danger: Color::LightRed,
            muted: Color::Gray,
            border: Color::LightBlue,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(18, 28, 42),
        },
        UiTheme::ForestZen => UiPalette {
            accent: Color::LightGreen,
            accent_alt: Color::Green,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::Gray,
            border: Color::LightGreen,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(8, 32, 10),
        },
    }
}

fn syntect_theme_name(theme: UiTheme) -> &'static str {
    match theme {
        UiTheme::Classic => "base16-ocean.dark",
        UiTheme::NeonNoir => "base16-mocha.dark",
        UiTheme::ForestZen => "base16-eighties.dark",
    }
}

/// Maps a submitted language to the token syntect looks syntaxes up by.
fn syntax_token(language: &str) -> &str {
    match language {
        "python" => "py",
        "javascript" => "js",
        "java" => "java",
        "csharp" => "cs",
        other => other,
    }
}

fn get_spinner() -> &'static str {
    let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    frames[(millis / 100) as usize % frames.len()]
}

fn panel<'a>(title: String, palette: UiPalette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.panel_bg))
        .title(title)
}

fn ui(f: &mut ratatui::Frame, state: &GeneratorState, viewport: &Viewport) {
    let palette = palette_for(state.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Length(1), // Banner
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], state, palette);
    render_tabs(f, chunks[1], state, palette);
    render_banner(f, chunks[2], state, palette);
    match state.view {
        View::Form => render_form(f, chunks[3], state, palette),
        View::Result => render_result(f, chunks[3], state, palette, viewport.result_scroll),
        View::Activity => render_activity(f, chunks[3], state, palette),
    }
    render_footer(f, chunks[4], state, palette);
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let status = match state.pipeline.status() {
        SubmissionStatus::Submitting { run_id } => {
            format!("{} generating (run {run_id})", get_spinner())
        }
        other => other.label().to_string(),
    };
    let text = format!(
        "Tool Generator | {} | {} | Theme:{}",
        status,
        state.config.endpoint.generate_url(),
        state.theme.label()
    );
    let header = Paragraph::new(text)
        .style(Style::default().fg(palette.accent))
        .block(panel("toolgen".to_string(), palette));
    f.render_widget(header, area);
}

fn render_tabs(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let titles = View::ALL
        .iter()
        .enumerate()
        .map(|(idx, view)| format!("F{} {}", idx + 1, view.label()));
    let selected = View::ALL
        .iter()
        .position(|view| *view == state.view)
        .unwrap_or_default();
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(panel("Views".to_string(), palette))
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_banner(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let line = if let Some(notification) = &state.notification {
        let color = match notification.kind {
            toolgen_core::pipeline::NotificationKind::Success => palette.success,
            toolgen_core::pipeline::NotificationKind::Failure => palette.danger,
        };
        Line::from(vec![
            Span::styled(
                notification.message.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Esc to dismiss)", Style::default().fg(palette.muted)),
        ])
    } else if !state.violations.is_empty() {
        Line::from(Span::styled(
            format!("{} field(s) need attention", state.violations.len()),
            Style::default().fg(palette.warning),
        ))
    } else {
        Line::from(Span::styled(
            "Fill in the form and press Ctrl-S to generate",
            Style::default().fg(palette.muted),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn field_value_text(state: &GeneratorState, spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::Text => state.form.value(spec.id).unwrap_or_default().to_string(),
        FieldKind::Choice => {
            let raw = state.form.value(spec.id).unwrap_or_default().trim();
            let lowered = raw.to_ascii_lowercase();
            spec.option_label(&lowered)
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string())
        }
        FieldKind::Set => state
            .form
            .set_values(spec.id)
            .iter()
            .map(|value| spec.option_label(value).unwrap_or(value.as_str()))
            .collect::<Vec<_>>()
            .join(", "),
        FieldKind::Flag => {
            let on = state
                .form
                .value(spec.id)
                .and_then(toolgen_core::schema::parse_flag)
                .unwrap_or(false);
            let text = if on { "yes" } else { "no" };
            text.to_string()
        }
    }
}

fn render_form(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut lines = Vec::new();
    for spec in fields() {
        let focused = state.cursor.field == spec.id;
        let label_style = if focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let value = field_value_text(state, spec);
        let mut spans = vec![
            Span::styled(
                if focused { "▸ " } else { "  " },
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                format!("{}{}: ", spec.label, if spec.required { "*" } else { "" }),
                label_style,
            ),
        ];
        if value.is_empty() {
            spans.push(Span::styled("(empty)", Style::default().fg(palette.muted)));
        } else {
            spans.push(Span::styled(value, Style::default().fg(palette.accent_alt)));
        }
        if focused && spec.kind == FieldKind::Text {
            spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
        }
        lines.push(Line::from(spans));
        if let Some(err) = state.violation_for(spec.id) {
            lines.push(Line::from(Span::styled(
                format!("    {}", err.message),
                Style::default().fg(palette.danger),
            )));
        }
    }
    let form = Paragraph::new(lines).block(panel("Describe your tool".to_string(), palette));
    f.render_widget(form, columns[0]);

    render_field_help(f, columns[1], state, palette);
}

fn render_field_help(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let spec = state.cursor.field.spec();
    let mut lines = vec![
        Line::from(Span::styled(
            spec.label,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(spec.help, Style::default().fg(palette.muted))),
        Line::from(""),
    ];

    match spec.kind {
        FieldKind::Text => lines.push(Line::from(Span::styled(
            "Type to edit, Backspace deletes",
            Style::default().fg(palette.muted),
        ))),
        FieldKind::Choice | FieldKind::Set => {
            for (idx, option) in spec.options.iter().enumerate() {
                let chosen = if spec.kind == FieldKind::Set {
                    state.form.contains(spec.id, option.value)
                } else {
                    state
                        .form
                        .value(spec.id)
                        .is_some_and(|value| value.trim().eq_ignore_ascii_case(option.value))
                };
                let mark = match (spec.kind, chosen) {
                    (FieldKind::Set, true) => "[x]",
                    (FieldKind::Set, false) => "[ ]",
                    (_, true) => "(•)",
                    (_, false) => "( )",
                };
                let style = if idx == state.cursor.option {
                    Style::default()
                        .fg(palette.accent)
                        .bg(palette.selected_bg)
                } else if chosen {
                    Style::default().fg(palette.success)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("{mark} {}", option.label),
                    style,
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "←/→ move, Space/Enter select",
                Style::default().fg(palette.muted),
            )));
        }
        FieldKind::Flag => {
            let on = field_value_text(state, spec) == "yes";
            lines.push(Line::from(Span::styled(
                format!("{} {}", if on { "[x]" } else { "[ ]" }, spec.label),
                Style::default().fg(palette.accent).bg(palette.selected_bg),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Space/Enter toggles",
                Style::default().fg(palette.muted),
            )));
        }
    }

    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Field".to_string(), palette));
    f.render_widget(help, area);
}

fn plain_lines(code: &str) -> Vec<Line<'static>> {
    code.lines().map(|line| Line::from(line.to_string())).collect()
}

fn highlighted_lines(code: &str, language: &str, theme: UiTheme) -> Vec<Line<'static>> {
    let ps = get_syntax_set();
    let Some(theme) = get_theme_set().themes.get(syntect_theme_name(theme)) else {
        return plain_lines(code);
    };
    let syntax = ps
        .find_syntax_by_token(syntax_token(language))
        .unwrap_or_else(|| ps.find_syntax_plain_text());
    let mut h = HighlightLines::new(syntax, theme);

    LinesWithEndings::from(code)
        .map(|line| match h.highlight_line(line, ps) {
            Ok(ranges) => Line::from(
                ranges
                    .into_iter()
                    .map(|(style, text)| {
                        let fg = Color::Rgb(
                            style.foreground.r,
                            style.foreground.g,
                            style.foreground.b,
                        );
                        Span::styled(
                            text.trim_end_matches(|c| c == '\n' || c == '\r')
                                .to_string(),
                            Style::default().fg(fg),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
            Err(_) => Line::from(line.trim_end().to_string()),
        })
        .collect()
}

fn render_result(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &GeneratorState,
    palette: UiPalette,
    scroll: u16,
) {
    let Some(artifact) = state.pipeline.artifact() else {
        let (text, color) = if let Some(error) = state.pipeline.error() {
            (error.to_string(), palette.danger)
        } else if state.pipeline.is_busy() {
            (format!("{} Generating...", get_spinner()), palette.accent)
        } else {
            (
                "Nothing generated yet. Fill in the form and press Ctrl-S.".to_string(),
                palette.muted,
            )
        };
        let p = Paragraph::new(Span::styled(text, Style::default().fg(color)))
            .wrap(Wrap { trim: false })
            .block(panel("Generated code".to_string(), palette));
        f.render_widget(p, area);
        return;
    };

    let lines = if state.config.ui.highlight {
        highlighted_lines(&artifact.code, &artifact.language, state.theme)
    } else {
        plain_lines(&artifact.code)
    };
    let max_scroll = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let title = format!(
        "Generated code ({}, run {}) Ctrl-E export, Ctrl-Y copy",
        artifact.language, artifact.run_id
    );
    let p = Paragraph::new(lines)
        .block(panel(title, palette))
        .scroll((scroll.min(max_scroll), 0));
    f.render_widget(p, area);
}

fn level_color(level: LogLevel, palette: UiPalette) -> Color {
    match level {
        LogLevel::Info => palette.accent_alt,
        LogLevel::Warn => palette.warning,
        LogLevel::Error => palette.danger,
    }
}

fn render_activity(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let visible = usize::from(area.height.saturating_sub(2));
    let skip = state.logs.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .logs
        .iter()
        .skip(skip)
        .map(|entry| {
            let mut spans = vec![
                Span::styled(
                    format!("#{:<4} ", entry.seq),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.label()),
                    Style::default().fg(level_color(entry.level, palette)),
                ),
                Span::raw(entry.message.clone()),
            ];
            if entry.run_id > 0 {
                spans.push(Span::styled(
                    format!("  (run {})", entry.run_id),
                    Style::default().fg(palette.muted),
                ));
            }
            Line::from(spans)
        })
        .collect();
    let p = Paragraph::new(lines).block(panel("Activity".to_string(), palette));
    f.render_widget(p, area);
}

fn render_footer(f: &mut ratatui::Frame, area: Rect, state: &GeneratorState, palette: UiPalette) {
    let key = |label: &'static str| Span::styled(label, Style::default().fg(palette.accent));
    let text = |label: &'static str| Span::styled(label, Style::default().fg(palette.muted));
    let export_style = if state.pipeline.can_export() {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let mut spans = vec![
        key("^S"),
        text(" generate "),
        Span::styled("^E", export_style),
        text(" export "),
        Span::styled("^Y", export_style),
        text(" copy "),
        key("F1-F3"),
        text(" views "),
        key("^T"),
        text(" theme "),
        key("^R"),
        text(" reset "),
        Span::styled("^Q", Style::default().fg(palette.warning)),
        text(" quit"),
    ];
    if let Some(last) = state.logs.iter().last() {
        spans.push(text(" | "));
        spans.push(Span::styled(
            last.message.clone(),
            Style::default().fg(level_color(last.level, palette)),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
