//! Right-click context menus for terminal surfaces.
//!
//! Any number of trigger regions share one [`OpenMenuRegistry`], so at most
//! one menu panel is open on a page at a time. Right-clicking a region
//! positions its panel next to the pointer, clamped to the viewport; Escape,
//! an outside click or an outside right-click closes it again.
//!
//! The state machine lives in [`controller`] and only talks to the surface
//! through the [`MenuHost`] trait. [`page::ContextMenuPage`] wires regions,
//! registry and document listeners together and accepts crossterm events;
//! [`terminal_host::TerminalDocument`] is a ready-made host over a ratatui
//! viewport.

pub mod components;
pub mod config;
pub mod constants;
pub mod controller;
pub mod drivers;
pub mod event;
pub mod event_loop;
pub mod geometry;
pub mod host;
pub mod listeners;
pub mod page;
pub mod registry;
pub mod terminal_host;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

pub use config::{ConfigError, TriggerOptions};
pub use controller::{MenuState, TriggerCallbacks, TriggerController};
pub use event::{DocumentEvent, DocumentEventKind, ElementId, EventOutcome, PointerEvent};
pub use geometry::{PanelSize, PositionResult, Viewport, compute_position};
pub use host::MenuHost;
pub use listeners::{DocumentListener, DocumentListeners, ListenerGuard};
pub use page::ContextMenuPage;
pub use registry::{MenuOwner, OpenMenuRegistry};
