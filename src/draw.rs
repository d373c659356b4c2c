use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::playback::boxscore::{PlayerBoxScore, team_totals};
use crate::playback::normalize::PlayEvent;
use crate::playback::quarters::{QUARTERS, Quarter, QuarterState};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use swoops_api::{Game, LineupSlot};

static TABS: &[&str; 2] = &["Play-by-Play", "Box Score"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::PlayByPlay => draw_play_by_play(f, layout.main, app),
                MenuItem::BoxScore => draw_box_score(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }

            if !app.settings.full_screen {
                draw_footer(f, layout.footer, app);
            }

            if app.state.show_logs {
                draw_logs_overlay(f, f.area());
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::PlayByPlay => 0,
        MenuItem::BoxScore => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// The quarter being rendered: the scrub projection's view when scrubbing,
/// the live engine's otherwise.
fn view_quarter(app: &App) -> Option<(Quarter, &QuarterState)> {
    if app.state.scrub.active
        && let Some(projection) = app.state.scrub.projection.as_ref()
    {
        let q = projection.current_quarter;
        return Some((q, &projection.quarters[q.index()]));
    }
    if !app.state.playback.is_armed() {
        return None;
    }
    let q = app.state.playback.current_quarter();
    Some((q, app.state.playback.quarter_state(q)))
}

fn draw_play_by_play(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Play-by-Play ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(game) = app.state.playback.game() else {
        draw_waiting(f, inner, app);
        return;
    };
    let Some((quarter, state)) = view_quarter(app) else {
        draw_waiting(f, inner, app);
        return;
    };

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    f.render_widget(Paragraph::new(header_lines(game, quarter, state, app)), header);
    f.render_widget(
        Paragraph::new(
            "Keys: space=pause  [/]=speed  1-4=quarter  e=end  ←/→=scrub  j/k=scroll",
        )
        .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    draw_play_list(f, content, state, app.state.play_scroll);
}

fn header_lines<'a>(
    game: &'a Game,
    quarter: Quarter,
    state: &QuarterState,
    app: &App,
) -> Vec<Line<'a>> {
    let scores = state.current_scores;
    let mode = if app.state.scrub.active {
        Span::styled("SCRUB", Style::default().fg(Color::Yellow))
    } else if !app.state.playback.should_animate() {
        Span::styled("FINAL", Style::default().fg(Color::Green))
    } else if app.state.playback.is_paused() {
        Span::styled("PAUSED", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("LIVE", Style::default().fg(Color::Red))
    };

    vec![
        Line::from(vec![
            Span::styled(
                game.challenger.team_name.as_str(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(" {} - {} ", scores.challenger, scores.challenged)),
            Span::styled(
                game.challenged.team_name.as_str(),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::raw(quarter.label()),
            Span::raw("  "),
            mode,
        ]),
    ]
}

fn draw_play_list(f: &mut Frame, area: Rect, state: &QuarterState, scroll: u16) {
    if state.plays.is_empty() {
        f.render_widget(
            Paragraph::new("No plays revealed yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let max_lines = area.height as usize;
    let offset = (scroll as usize).min(state.plays.len().saturating_sub(1));

    let mut lines = Vec::with_capacity(max_lines);
    // Newest play sits at index 0 of the quarter's list.
    for (idx, play) in state.plays.iter().enumerate().skip(offset).take(max_lines) {
        lines.push(play_line(play, idx == 0 && offset == 0, area.width));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn play_line(play: &PlayEvent, newest: bool, width: u16) -> Line<'static> {
    let style = if newest {
        Style::default().fg(Color::Yellow)
    } else if play.action.is_boundary() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let side = match play.lineup {
        Some(LineupSlot::Challenger) => "<",
        Some(LineupSlot::Challenged) => ">",
        None => " ",
    };
    let text = format!(
        "{} {side} {}-{} {}",
        play.clock, play.scores.challenger, play.scores.challenged, play.detail
    );
    let clipped: String = text.chars().take(width.saturating_sub(1) as usize).collect();
    Line::from(Span::styled(clipped, style))
}

fn draw_waiting(f: &mut Frame, area: Rect, app: &App) {
    let msg = if let Some(err) = app.state.last_error.as_deref() {
        format!("Load failed:\n{err}\n\nPress r to retry")
    } else {
        format!("Game {}\nWaiting for box score...", app.state.game_id)
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_box_score(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Box Score ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(game) = app.state.playback.game() else {
        draw_waiting(f, inner, app);
        return;
    };
    let Some((quarter, state)) = view_quarter(app) else {
        draw_waiting(f, inner, app);
        return;
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "{}  (cumulative through {})",
        game.id,
        quarter.label()
    ));
    lines.push(String::new());

    for slot in [LineupSlot::Challenger, LineupSlot::Challenged] {
        let name = game.lineup(slot).team_name.as_str();
        lines.push(format!("-- {name} --"));
        lines.push(format!(
            "{:<18} {:>3} {:>5} {:>5} {:>5} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
            "Player", "PTS", "FG", "3PT", "FT", "REB", "AST", "STL", "BLK", "TOV", "PF"
        ));
        for player in &state.box_scores[slot.index()] {
            lines.push(stat_row(player));
        }
        let totals = team_totals(&state.box_scores[slot.index()]);
        lines.push(format!(
            "{:<18} {:>3} {:>2}-{:<2} {:>2}-{:<2} {:>2}-{:<2} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
            "TOTAL",
            totals.pts,
            totals.fg_made,
            totals.fg_att,
            totals.three_made,
            totals.three_att,
            totals.ft_made,
            totals.ft_att,
            totals.trb,
            totals.ast,
            totals.stl,
            totals.blk,
            totals.tov,
            totals.pf
        ));
        lines.push(String::new());
    }

    let offset = app.state.box_scroll as usize;
    let visible: Vec<&str> = lines
        .iter()
        .skip(offset.min(lines.len().saturating_sub(1)))
        .take(inner.height as usize)
        .map(String::as_str)
        .collect();
    f.render_widget(Paragraph::new(visible.join("\n")), inner);
}

fn stat_row(player: &PlayerBoxScore) -> String {
    let name: String = player.name.chars().take(18).collect();
    let line = &player.line;
    format!(
        "{:<18} {:>3} {:>2}-{:<2} {:>2}-{:<2} {:>2}-{:<2} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
        name,
        line.pts,
        line.fg_made,
        line.fg_att,
        line.three_made,
        line.three_att,
        line.ft_made,
        line.ft_att,
        line.trb,
        line.ast,
        line.stl,
        line.blk,
        line.tov,
        line.pf
    )
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let total = app.state.playback.total_plays();
    let (position, label) = if app.state.scrub.active {
        (app.state.scrub.position, "scrub")
    } else {
        (app.state.playback.revealed_count(), "plays")
    };

    let quarter_cells: String = QUARTERS
        .iter()
        .map(|q| {
            if app.state.playback.is_armed() && app.state.playback.quarter_state(*q).finished {
                '■'
            } else {
                '□'
            }
        })
        .collect();

    let bar_width = inner.width.saturating_sub(30).max(4) as usize;
    let filled = if total == 0 { 0 } else { bar_width * position.min(total) / total };
    let bar: String = (0..bar_width).map(|i| if i < filled { '█' } else { '─' }).collect();

    let text = format!(
        "{quarter_cells} [{bar}] {position}/{total} {label}  {}ms",
        app.state.playback.speed_ms()
    );
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(if app.state.scrub.active {
            Color::Yellow
        } else {
            Color::Gray
        })),
        inner,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let text = "q         quit\n\
                space     pause / resume playback\n\
                [ / ]     slower / faster reveal\n\
                1-4       jump to quarter (completes skipped quarters)\n\
                e         skip to end\n\
                r         restart playback\n\
                ← / →     scrub the timeline (Esc to return to live)\n\
                Tab       switch Play-by-Play / Box Score\n\
                j / k     scroll\n\
                f         full screen\n\
                \"         toggle log view\n\
                ?         this screen (Esc to close)";
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs_overlay(f: &mut Frame, area: Rect) {
    let height = (area.height / 3).max(6).min(area.height);
    let overlay = Rect::new(area.x, area.y + area.height - height, area.width, height);
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(tui::widgets::Clear, overlay);
    f.render_widget(widget, overlay);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
