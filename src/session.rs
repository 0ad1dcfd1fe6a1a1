//! Top-level session so the menu, indicator, and key bindings move as one unit.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;

use crate::commands::MenuConfig;
use crate::keybinds;
use crate::main_menu::{build_main_menu, MenuContext};
use crate::menu::Menu;
use crate::osd::{OsdBackend, OsdHandle};
use crate::player::protocol::MpvEvent;
use crate::player::Player;
use crate::progress::TitleProgress;
use crate::settings::Settings;

/// Overlay surface ids; each has exactly one owner at a time.
const MENU_OVERLAY_ID: u64 = 1;
const PROGRESS_OVERLAY_ID: u64 = 2;

const OBSERVED_PROPS: &[&str] = &["media-title", "time-pos", "pause", "chapter"];

/// Whether the dispatch loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns both overlays and the open/closed menu state.
///
/// The toggle key opens and closes the menu; while open, the five navigation
/// keys are claimed and routed here, and they are returned to the player on
/// close. There is no ambient overlay state anywhere else.
pub struct Session {
    player: Rc<dyn Player>,
    osd: Rc<dyn OsdBackend>,
    ctx: MenuContext,
    config_path: PathBuf,
    menu: Option<Menu>,
    progress: Option<TitleProgress>,
    initialized: bool,
}

impl Session {
    pub fn new(
        player: Rc<dyn Player>,
        osd: Rc<dyn OsdBackend>,
        toggle_key: &str,
        settings_path: PathBuf,
        config_path: PathBuf,
    ) -> Result<Self> {
        for prop in OBSERVED_PROPS {
            player.observe(prop)?;
        }
        keybinds::bind_toggle(&*player, toggle_key)?;
        let settings = Rc::new(RefCell::new(Settings::new(settings_path)));
        let config = Rc::new(RefCell::new(MenuConfig::default()));
        let ctx = MenuContext::new(settings, config);
        Ok(Self {
            player,
            osd,
            ctx,
            config_path,
            menu: None,
            progress: None,
            initialized: false,
        })
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Route one player event. Everything runs to completion on this path.
    pub fn handle_event(&mut self, event: MpvEvent) -> Flow {
        match event {
            MpvEvent::ClientMessage { args } => self.handle_message(&args),
            MpvEvent::PropertyChange { name, .. } => self.handle_property_change(&name),
            MpvEvent::FileLoaded => self.handle_file_loaded(),
            MpvEvent::Shutdown => {
                self.teardown();
                return Flow::Quit;
            }
            MpvEvent::Other => {}
        }
        Flow::Continue
    }

    fn handle_message(&mut self, args: &[String]) {
        let Some(message) = args.first() else {
            return;
        };
        if message == keybinds::TOGGLE_MESSAGE {
            self.toggle();
            return;
        }
        if let Some(key) = keybinds::nav_key_for_message(message) {
            // Bindings are removed on close; a message that raced the unbind
            // lands here with no menu and is dropped.
            if let Some(menu) = self.menu.as_mut() {
                menu.handle_key(key);
            }
        }
    }

    fn handle_property_change(&mut self, name: &str) {
        match name {
            "media-title" | "time-pos" => {
                if let Some(progress) = self.progress.as_mut() {
                    progress.update(&*self.player);
                }
            }
            "pause" => self.show_hide_progress(),
            "chapter" => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.update();
                }
            }
            _ => {}
        }
    }

    /// One-time setup once the first file is in: load the command config and
    /// apply persisted settings if they ask for it.
    fn handle_file_loaded(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        *self.ctx.config.borrow_mut() = MenuConfig::load(&self.config_path);
        self.ctx.settings.borrow_mut().load(&*self.player, true);
    }

    fn toggle(&mut self) {
        if let Some(mut menu) = self.menu.take() {
            menu.release();
            if let Err(err) = keybinds::unbind_navigation(&*self.player) {
                tracing::warn!("unbinding navigation keys failed: {err:#}");
            }
            tracing::debug!("menu closed");
        } else {
            if let Err(err) = keybinds::bind_navigation(&*self.player) {
                tracing::warn!("binding navigation keys failed: {err:#}");
            }
            let entries = build_main_menu(&self.player, &self.ctx);
            self.menu = Some(Menu::new(
                entries,
                OsdHandle::new(MENU_OVERLAY_ID, self.osd.clone()),
            ));
            tracing::debug!("menu opened");
        }
        self.show_hide_progress();
    }

    /// The indicator shows whenever playback is paused or the menu is open.
    fn show_hide_progress(&mut self) {
        let paused = self.player.get_bool("pause").unwrap_or(false);
        if paused || self.menu.is_some() {
            match self.progress.as_mut() {
                Some(progress) => progress.update(&*self.player),
                None => {
                    self.progress = Some(TitleProgress::new(
                        OsdHandle::new(PROGRESS_OVERLAY_ID, self.osd.clone()),
                        &*self.player,
                    ));
                }
            }
        } else if let Some(mut progress) = self.progress.take() {
            progress.release();
        }
    }

    /// Unconditional cleanup; safe to run on an already-closed session.
    fn teardown(&mut self) {
        if let Some(mut menu) = self.menu.take() {
            menu.release();
            if let Err(err) = keybinds::unbind_navigation(&*self.player) {
                tracing::debug!("unbinding navigation keys failed: {err:#}");
            }
        }
        if let Some(mut progress) = self.progress.take() {
            progress.release();
        }
        tracing::info!("session closed");
    }
}
