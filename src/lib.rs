//! RetroTUI: a windowed desktop shell drawn on the terminal cell grid.
//!
//! The [`window::WindowManager`] owns every window, the global menu, the
//! desktop icons and the modal dialog, and is the single entry point for
//! input. Content engines ([`components::TextDocument`],
//! [`components::DirectoryView`]) plug into windows through the
//! [`window::WindowBody`] contract.

pub mod actions;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod event;
pub mod event_loop;
pub mod fs;
pub mod icons;
pub mod keybindings;
pub mod layout;
pub mod panel;
pub mod process;
pub mod runner;
pub mod state;
pub mod sysinfo;
pub mod term_color;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
