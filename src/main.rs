use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use tracing::Level;

use term_context_menu::components::{Component, MenuPanelComponent, RegionViewComponent, StatusBar};
use term_context_menu::constants::ATTR_TARGET;
use term_context_menu::drivers::OutputDriver;
use term_context_menu::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_context_menu::event_loop::{ControlFlow, EventLoop};
use term_context_menu::terminal_host::TerminalDocument;
use term_context_menu::tracing_sub::{self, LogTarget};
use term_context_menu::ui::UiFrame;
use term_context_menu::{ContextMenuPage, ElementId, PointerEvent, TriggerCallbacks, TriggerOptions};

const PAGE_WIDTH: u16 = 100;
const PAGE_HEIGHT: u16 = 60;
const HINTS: &str = "right-click a box · Esc close · l lock · arrows scroll · q quit";

#[derive(Parser, Debug)]
#[command(
    name = "term-context-menu",
    version = env!("CARGO_PKG_VERSION"),
    about = "Right-click context menus on a scrollable terminal page",
    after_help = indoc! {"
        Right-click any box to open its menu next to the pointer. Menus near
        the right or bottom edge are pulled back inside the screen. Click
        elsewhere, right-click elsewhere, or press Esc to close.
    "}
)]
struct Cli {
    /// Rows kept free below a menu that would overflow the bottom edge.
    #[arg(short = 'm', long = "margin-bottom", value_name = "ROWS", default_value_t = 1)]
    margin_bottom: i32,

    /// Append debug logs to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start with the locked box's menu disabled.
    #[arg(long)]
    locked: bool,
}

struct DemoRegion {
    id: &'static str,
    title: &'static str,
    body: &'static str,
    area: Rect,
    target: &'static str,
}

const fn page_area(x: u16, y: u16, width: u16, height: u16) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}

const REGIONS: [DemoRegion; 4] = [
    DemoRegion {
        id: "files",
        title: "Files",
        body: "Right-click a row; the menu names the row you clicked.",
        area: page_area(0, 0, 40, 20),
        target: "file-menu",
    },
    DemoRegion {
        id: "editor",
        title: "Editor",
        body: "Right-click near the right edge to see the menu pulled back.",
        area: page_area(40, 0, 60, 20),
        target: "edit-menu",
    },
    DemoRegion {
        id: "locked",
        title: "Locked",
        body: "Press l to toggle whether this box opens a menu.",
        area: page_area(0, 20, 100, 10),
        target: "edit-menu",
    },
    DemoRegion {
        id: "footer",
        title: "Footer",
        body: "Scroll down and right-click near the bottom edge.",
        area: page_area(0, 30, 100, 30),
        target: "file-menu",
    },
];

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let target = cli
        .log_file
        .clone()
        .map(LogTarget::File)
        .unwrap_or(LogTarget::Discard);
    tracing_sub::init(&target, Level::DEBUG)?;

    let mut output = ConsoleOutputDriver::new()?;
    let size = output.size()?;
    let viewport = Rect::new(0, 0, size.width, size.height.saturating_sub(1));
    let mut app = App::new(&cli, viewport).map_err(io::Error::other)?;

    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    let result = event_loop.run(|event| match event {
        None => {
            output.draw(|frame| app.render(frame))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(app.handle_event(&event)),
    });
    output.exit()?;

    result
}

struct App {
    page: ContextMenuPage<TerminalDocument>,
    document: TerminalDocument,
    views: BTreeMap<ElementId, RegionViewComponent>,
    status: StatusBar,
    locked: Rc<Cell<bool>>,
    activity: Rc<RefCell<Option<String>>>,
}

impl App {
    fn new(cli: &Cli, viewport: Rect) -> Result<Self, term_context_menu::ConfigError> {
        let mut document =
            TerminalDocument::new(viewport).with_page_size(PAGE_WIDTH, PAGE_HEIGHT);
        document.add_panel(
            "file-menu",
            MenuPanelComponent::new("File").with_items(["Open", "Rename", "Delete"]),
        );
        document.add_panel(
            "edit-menu",
            MenuPanelComponent::new("Edit").with_items(["Cut", "Copy", "Paste", "Select all"]),
        );

        let locked = Rc::new(Cell::new(cli.locked));
        let activity = Rc::new(RefCell::new(None));
        let mut page = ContextMenuPage::new();
        let mut views = BTreeMap::new();

        for region_def in &REGIONS {
            let options = TriggerOptions::from_attributes([(ATTR_TARGET, region_def.target)])?
                .with_margin_bottom(cli.margin_bottom);
            let callbacks = callbacks_for(region_def, &locked, &activity);
            page.attach(region_def.id, region_def.area, options, callbacks);
            let mut view = RegionViewComponent::new(region_def.title, region_def.body);
            view.set_disabled(region_def.id == "locked" && locked.get());
            views.insert(ElementId::new(region_def.id), view);
        }

        let mut status = StatusBar::new();
        status.set_right(HINTS);
        Ok(Self {
            page,
            document,
            views,
            status,
            locked,
            activity,
        })
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        let mut chosen = None;
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let menu_open = self.page.open_region().is_some();
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return ControlFlow::Quit;
                    }
                    KeyCode::Char('q') if !menu_open => return ControlFlow::Quit,
                    KeyCode::Char('l') => self.toggle_locked(),
                    KeyCode::Up => self.document.scroll_by(0, -1),
                    KeyCode::Down => self.document.scroll_by(0, 1),
                    KeyCode::Left => self.document.scroll_by(-1, 0),
                    KeyCode::Right => self.document.scroll_by(1, 0),
                    KeyCode::PageUp => self.scroll_page(-1),
                    KeyCode::PageDown => self.scroll_page(1),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved => self.document.hover(mouse.column, mouse.row),
                MouseEventKind::ScrollUp => self.document.scroll_by(0, -3),
                MouseEventKind::ScrollDown => self.document.scroll_by(0, 3),
                MouseEventKind::Down(MouseButton::Left) => {
                    // Read the item before the document click closes the menu.
                    if let Some((panel, Some(index))) =
                        self.document.panel_hit(mouse.column, mouse.row)
                        && let Some(label) = self
                            .document
                            .panel(panel)
                            .and_then(|p| p.items().get(index))
                    {
                        tracing::info!(%panel, index, "menu item chosen");
                        chosen = Some(format!("chose \"{label}\" from {panel}"));
                    }
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.document
                    .set_viewport_rect(Rect::new(0, 0, *width, height.saturating_sub(1)));
            }
            _ => {}
        }
        self.page.handle_event(&mut self.document, event);
        if chosen.is_some() {
            *self.activity.borrow_mut() = chosen;
        }
        ControlFlow::Continue
    }

    fn toggle_locked(&mut self) {
        let locked = !self.locked.get();
        self.locked.set(locked);
        if let Some(view) = self.views.get_mut(&ElementId::new("locked")) {
            view.set_disabled(locked);
        }
        self.status
            .set_left(if locked { "locked box disabled" } else { "locked box enabled" });
    }

    fn scroll_page(&mut self, direction: i32) {
        let rows = i32::from(self.document.viewport_rect().height.max(1));
        self.document.scroll_by(0, direction * rows);
    }

    fn render(&mut self, mut frame: UiFrame<'_>) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        if let Some(msg) = self.activity.borrow_mut().take() {
            self.status.set_left(msg);
        }

        for (id, region_area) in self.page.regions() {
            let Some(screen) = self.document.to_screen(region_area) else {
                continue;
            };
            if let Some(view) = self.views.get_mut(id) {
                view.set_active(self.page.is_open(id));
                view.render(&mut frame, screen);
            }
        }
        self.document.render_panels(&mut frame);

        let status_area = Rect {
            x: area.x,
            y: area.bottom().saturating_sub(1),
            width: area.width,
            height: 1,
        };
        self.status.render(&mut frame, status_area);
    }
}

fn callbacks_for(
    region_def: &DemoRegion,
    locked: &Rc<Cell<bool>>,
    activity: &Rc<RefCell<Option<String>>>,
) -> TriggerCallbacks<TerminalDocument> {
    let region = region_def.id;
    let on_open = Rc::clone(activity);
    let on_close = Rc::clone(activity);
    let mut callbacks = TriggerCallbacks::new()
        .on_trigger(move |doc: &mut TerminalDocument, event: &PointerEvent| {
            if region == "files" {
                fill_file_menu(doc, event);
            }
            *on_open.borrow_mut() = Some(format!(
                "{region}: menu at ({}, {})",
                event.page_x, event.page_y
            ));
        })
        .on_close(move |_doc| {
            *on_close.borrow_mut() = Some(format!("{region}: menu closed"));
        });
    if region_def.id == "locked" {
        let locked = Rc::clone(locked);
        callbacks = callbacks.disabled_when(move || locked.get());
    }
    callbacks
}

/// The file menu names the row it was opened on.
fn fill_file_menu(doc: &mut TerminalDocument, event: &PointerEvent) {
    if let Some(panel) = doc.panel_mut(&ElementId::new("file-menu")) {
        let row = event.page_y;
        panel.set_title(format!("Row {row}"));
        panel.set_items([
            format!("Open row {row}"),
            "Rename".to_string(),
            "Duplicate".to_string(),
            "Delete".to_string(),
        ]);
    }
}
