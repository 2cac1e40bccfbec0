use std::fs::File;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEventKind,
};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use simplelog::{Config, LevelFilter, WriteLogger};
use unicode_width::UnicodeWidthChar;

use scrollspy::{Element, LayoutResult, Rect, ScrollState, TrackerState, ViewportObserver};

const TOC_WIDTH: u16 = 26;

const SECTIONS: &[(&str, &str)] = &[
    ("getting-started", "Getting Started"),
    ("installation", "Installation"),
    ("first-steps", "First Steps"),
    ("configuration", "Configuration"),
    ("key-bindings", "Key Bindings"),
    ("theming", "Theming"),
    ("advanced-usage", "Advanced Usage"),
    ("troubleshooting", "Troubleshooting"),
    ("faq", "FAQ"),
];

const SELECTORS: &[&str] = &[".section", ".chapter"];

struct Row {
    text: String,
    heading: bool,
}

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("toc.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let document = build_document();
    let (rows, layout) = layout_document();

    let (term_w, term_h) = size()?;
    let doc_height = term_h.saturating_sub(1);
    let mut scroll = ScrollState::new(doc_height, rows.len() as u16);

    let mut observer = ViewportObserver::new();
    let mut tracker = TrackerState::new();
    tracker.on_target_intersection(|report| {
        log::info!("[toc] active -> {} at {:.0}ms", report.target, report.time);
    });

    let mut selector_idx = 0;
    tracker
        .activate(&document, SELECTORS[selector_idx], &mut observer)
        .expect("selector is valid");

    let start = Instant::now();
    let mut term_size = (term_w, term_h);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = run(
        &document,
        &rows,
        &layout,
        &mut scroll,
        &mut observer,
        &mut tracker,
        &mut selector_idx,
        start,
        &mut term_size,
    );

    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    disable_raw_mode()?;
    result
}

#[allow(clippy::too_many_arguments)]
fn run(
    document: &Element,
    rows: &[Row],
    layout: &LayoutResult,
    scroll: &mut ScrollState,
    observer: &mut ViewportObserver,
    tracker: &mut TrackerState,
    selector_idx: &mut usize,
    start: Instant,
    term_size: &mut (u16, u16),
) -> std::io::Result<()> {
    loop {
        let mut raw = Vec::new();
        if event::poll(Duration::from_millis(50))? {
            raw.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                raw.push(event::read()?);
            }
        }

        for raw_event in &raw {
            match raw_event {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('t') => {
                        *selector_idx = (*selector_idx + 1) % SELECTORS.len();
                        tracker
                            .update_selector(document, SELECTORS[*selector_idx], observer)
                            .expect("selector is valid");
                    }
                    _ => {}
                },
                CrosstermEvent::Resize(w, h) => {
                    *term_size = (*w, *h);
                    scroll.resize(h.saturating_sub(1), rows.len() as u16);
                }
                _ => {}
            }
        }

        scroll.process_events(&raw);
        tracker.sample_scroll(scroll.offset_y());

        let doc_width = term_size.0.saturating_sub(TOC_WIDTH + 1);
        let viewport = Rect::new(0, scroll.offset_y(), doc_width, scroll.viewport_height());
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        let batch = observer.update(layout, viewport, now_ms);
        tracker.process_entries(&batch);

        render(rows, scroll, tracker, SELECTORS[*selector_idx], *term_size)?;
    }
}

fn render(
    rows: &[Row],
    scroll: &ScrollState,
    tracker: &TrackerState,
    selector: &str,
    (term_w, term_h): (u16, u16),
) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;

    // Table of contents, highlighting the active section.
    queue!(
        out,
        MoveTo(1, 0),
        SetAttribute(Attribute::Bold),
        Print("Contents"),
        SetAttribute(Attribute::Reset)
    )?;
    for (i, (slug, title)) in SECTIONS.iter().enumerate() {
        let y = i as u16 + 2;
        if y >= term_h.saturating_sub(1) {
            break;
        }
        let active = tracker.active_target() == Some(*slug);
        let label = fit(title, TOC_WIDTH as usize - 4);
        if active {
            queue!(
                out,
                MoveTo(1, y),
                SetForegroundColor(Color::Cyan),
                SetAttribute(Attribute::Bold),
                Print(format!("> {label}")),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        } else {
            queue!(
                out,
                MoveTo(1, y),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("  {label}")),
                ResetColor
            )?;
        }
    }

    // Document pane.
    let doc_x = TOC_WIDTH + 1;
    let doc_width = term_w.saturating_sub(doc_x) as usize;
    let top = scroll.offset_y() as usize;
    let height = scroll.viewport_height() as usize;
    for (line, row) in rows.iter().skip(top).take(height).enumerate() {
        let text = fit(&row.text, doc_width);
        if row.heading {
            queue!(
                out,
                MoveTo(doc_x, line as u16),
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, MoveTo(doc_x, line as u16), Print(text))?;
        }
    }

    // Status line.
    let status = format!(
        " {selector}  row {}/{}  [{:?}]  q quit · t swap selector · wheel/keys scroll",
        scroll.offset_y(),
        rows.len(),
        tracker.direction()
    );
    queue!(
        out,
        MoveTo(0, term_h.saturating_sub(1)),
        SetForegroundColor(Color::DarkGrey),
        Print(fit(&status, term_w as usize)),
        ResetColor
    )?;

    out.flush()
}

/// The observed tree: a document whose sections are the watch targets.
/// Every other section doubles as a "chapter" so the selector swap has
/// something different to match.
fn build_document() -> Element {
    let mut doc = Element::box_().id("doc");
    for (i, (slug, title)) in SECTIONS.iter().enumerate() {
        let mut section = Element::box_()
            .id(*slug)
            .class("section")
            .child(Element::text(*title).class("title"));
        if i % 2 == 0 {
            section = section.class("chapter");
        }
        for line in 0..body_lines(i) {
            section = section.child(Element::text(format!("{title} body line {line}")));
        }
        doc = doc.child(section);
    }
    doc
}

/// Vertical stacking: one row per heading, one per body line, one blank row
/// between sections. Returns the printable rows and each section's rect.
fn layout_document() -> (Vec<Row>, LayoutResult) {
    let mut rows = Vec::new();
    let mut layout = LayoutResult::new();
    let mut y = 0u16;

    for (i, (slug, title)) in SECTIONS.iter().enumerate() {
        let body = body_lines(i);
        layout.insert(slug.to_string(), Rect::new(0, y, 120, body + 1));

        rows.push(Row {
            text: format!("{}. {title}", i + 1),
            heading: true,
        });
        for line in 0..body {
            rows.push(Row {
                text: format!("{title}: paragraph text, line {}.", line + 1),
                heading: false,
            });
        }
        rows.push(Row {
            text: String::new(),
            heading: false,
        });
        y += body + 2;
    }

    (rows, layout)
}

fn body_lines(section: usize) -> u16 {
    8 + ((section * 5) % 9) as u16
}

fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
