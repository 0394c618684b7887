// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the viewer and settings
//! views.
//!
//! The `App` struct wires together the domains (viewer, playback sessions,
//! localization, configuration) and translates viewer/settings effects into
//! side effects like session resyncs or config persistence. Policy decisions
//! (window size, deferral of grid attachment, persistence location) stay
//! close to the main update loop so user-facing behavior is easy to audit.

mod message;

pub use message::{Flags, Message};

use crate::config::{self, Config, ConfigPatch, Feed};
use crate::i18n::fluent::I18n;
use crate::playback::{
    feed_playback, merge_auth_query, PlaybackEvent, PlaybackMessage, SessionManager, SurfaceId,
};
use crate::ui::settings;
use crate::ui::styles::{self, StyleSheet};
use crate::ui::theming::{AppTheme, ThemeMode};
use crate::ui::viewer::component;
use iced::widget::image::Handle as ImageHandle;
use iced::{window, Element, Subscription, Task, Theme};
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Viewer,
    Settings,
}

/// Root Iced application state bridging UI components, localization, and the
/// persisted configuration.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: Config,
    /// Explicit config path from `--config`; `None` uses the platform dir.
    config_path: Option<PathBuf>,
    theme: AppTheme,
    /// Stylesheet resolved from the current config + theme. Recomputed on
    /// every configuration or theme change; never mutated elsewhere.
    sheet: StyleSheet,
    viewer: component::State,
    manager: SessionManager,
    /// Generation counter guarding deferred grid attachment against stale
    /// wakeups after the layout changed again.
    grid_sync_generation: u64,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("feeds", &self.config.feeds.len())
            .field("sessions", &self.manager.len())
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let theme = AppTheme::new(config.general.theme_mode);
        let sheet = styles::resolve(&config.style, &theme);
        Self {
            i18n: I18n::default(),
            screen: Screen::Viewer,
            config,
            config_path: None,
            theme,
            sheet,
            viewer: component::State::new(),
            manager: SessionManager::new(true),
            grid_sync_generation: 0,
        }
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from flags and the persisted config,
    /// then binds the primary surface to the first configured feed.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut loaded, warning) = match &flags.config_path {
            Some(path) => match config::load_from_path(path) {
                Ok(config) => (config, None),
                Err(_) => (Config::default(), Some("notification-config-load-warning")),
            },
            None => config::load(),
        };
        if let Some(key) = warning {
            eprintln!("{key}: falling back to default configuration");
        }

        // Positional URLs become regular feeds for this session
        for url in &flags.feed_urls {
            loaded.feeds.push(Feed {
                name: format!("Feed {}", loaded.feeds.len() + 1),
                url: url.clone(),
            });
        }

        let i18n = I18n::new(flags.lang, &loaded);
        let theme = AppTheme::new(loaded.general.theme_mode);
        let sheet = styles::resolve(&loaded.style, &theme);
        let manager = SessionManager::new(loaded.playback.autoplay);

        let mut app = App {
            i18n,
            screen: Screen::Viewer,
            config: loaded,
            config_path: flags.config_path,
            theme,
            sheet,
            viewer: component::State::new(),
            manager,
            grid_sync_generation: 0,
        };
        app.resync_primary();

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        let current_feed = self
            .config
            .feeds
            .get(self.viewer.selection().current())
            .filter(|feed| !feed.name.is_empty());

        match current_feed {
            Some(feed) if !self.viewer.selection().is_expanded() => {
                format!("{} - {}", feed.name, app_name)
            }
            _ => app_name,
        }
    }

    fn theme(&self) -> Theme {
        match self.config.general.theme_mode {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::System => {
                if ThemeMode::System.is_dark() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        }
    }

    /// One playback subscription per live session, keyed by surface and
    /// attach generation so rebinding a surface restarts its stream.
    fn subscription(&self) -> Subscription<Message> {
        let streams: Vec<Subscription<Message>> = self
            .manager
            .sessions()
            .map(|(surface, session)| {
                feed_playback(session.url().to_string(), surface, session.generation())
                    .map(Message::Playback)
            })
            .collect();

        Subscription::batch(streams)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(viewer_message) => {
                let effect = self
                    .viewer
                    .handle_message(viewer_message, self.config.feeds.len());
                self.apply_viewer_effect(effect)
            }
            Message::Settings(settings_message) => {
                match settings::handle_message(settings_message) {
                    settings::Effect::None => Task::none(),
                    settings::Effect::Back => {
                        self.screen = Screen::Viewer;
                        Task::none()
                    }
                    settings::Effect::Edit(patch) => self.apply_config_patch(patch),
                }
            }
            Message::Playback(playback) => {
                self.handle_playback_message(playback);
                Task::none()
            }
            Message::GridSurfacesReady { generation } => {
                // Stale wakeups (layout changed again before the deferred
                // task ran) are dropped.
                if generation == self.grid_sync_generation
                    && self.viewer.selection().is_expanded()
                {
                    self.resync_grid();
                }
                Task::none()
            }
        }
    }

    fn handle_playback_message(&mut self, playback: PlaybackMessage) {
        let PlaybackMessage { surface, event } = playback;
        match event {
            PlaybackEvent::Started(sender) => self.manager.on_started(surface, sender),
            PlaybackEvent::Opened { .. } | PlaybackEvent::Buffering => {}
            PlaybackEvent::FrameReady {
                rgba_data,
                width,
                height,
                ..
            } => {
                let handle = ImageHandle::from_rgba(width, height, rgba_data.as_ref().clone());
                self.viewer.set_frame(surface, handle);
            }
            PlaybackEvent::EndOfStream => self.manager.on_ended(surface),
            PlaybackEvent::Error(message) => {
                eprintln!("Stream error on {surface:?}: {message}");
                self.manager.on_error(surface, &message);
            }
        }
    }

    fn apply_viewer_effect(&mut self, effect: component::Effect) -> Task<Message> {
        match effect {
            component::Effect::None => Task::none(),
            component::Effect::ResyncPrimary => {
                self.resync_primary();
                Task::none()
            }
            component::Effect::ResyncGridDeferred => self.defer_grid_sync(),
            component::Effect::CollapseGrid => {
                self.manager.detach_grid();
                self.resync_primary();
                Task::none()
            }
            component::Effect::TogglePlayback(surface) => {
                self.manager.toggle_playback(surface);
                Task::none()
            }
            component::Effect::OpenSettings => {
                self.screen = Screen::Settings;
                Task::none()
            }
        }
    }

    /// Schedules grid attachment for the next scheduler turn, once the grid
    /// cells exist in the layout.
    fn defer_grid_sync(&mut self) -> Task<Message> {
        self.grid_sync_generation += 1;
        let generation = self.grid_sync_generation;
        Task::perform(async {}, move |()| Message::GridSurfacesReady {
            generation,
        })
    }

    fn apply_config_patch(&mut self, patch: ConfigPatch) -> Task<Message> {
        let next = self.config.apply(patch);

        let feeds_changed = next.feeds != self.config.feeds
            || next.playback.auth_query_string != self.config.playback.auth_query_string;
        let theme_changed = next.general.theme_mode != self.config.general.theme_mode;

        self.config = next;
        self.manager.set_autoplay(self.config.playback.autoplay);
        if theme_changed {
            self.theme = AppTheme::new(self.config.general.theme_mode);
        }
        self.sheet = styles::resolve(&self.config.style, &self.theme);

        if let Err(e) = self.persist_config() {
            eprintln!("Failed to save configuration: {e}");
        }

        if feeds_changed {
            let effect = self.viewer.feeds_changed(self.config.feeds.len());
            return self.apply_viewer_effect(effect);
        }
        Task::none()
    }

    fn persist_config(&self) -> crate::error::Result<()> {
        match &self.config_path {
            Some(path) => config::save_to_path(&self.config, path),
            None => config::save(&self.config),
        }
    }

    /// Desired binding for the collapsed layout: the selected feed on the
    /// primary surface. Feeds without a URL yield no binding at all.
    fn primary_desired(&self) -> Vec<(SurfaceId, String)> {
        self.config
            .feeds
            .get(self.viewer.selection().current())
            .filter(|feed| !feed.url.is_empty())
            .map(|feed| {
                vec![(
                    SurfaceId::Primary,
                    merge_auth_query(&feed.url, &self.config.playback.auth_query_string),
                )]
            })
            .unwrap_or_default()
    }

    /// Desired bindings for the expanded layout: one grid surface per feed,
    /// aligned by index.
    fn grid_desired(&self) -> Vec<(SurfaceId, String)> {
        self.config
            .feeds
            .iter()
            .enumerate()
            .filter(|(_, feed)| !feed.url.is_empty())
            .map(|(index, feed)| {
                (
                    SurfaceId::Grid(index),
                    merge_auth_query(&feed.url, &self.config.playback.auth_query_string),
                )
            })
            .collect()
    }

    fn resync_primary(&mut self) {
        let desired = self.primary_desired();
        self.manager.resync(&desired);
        self.prune_frames();
    }

    fn resync_grid(&mut self) {
        let desired = self.grid_desired();
        self.manager.resync(&desired);
        self.prune_frames();
    }

    /// Drops displayed frames whose surface lost its session.
    fn prune_frames(&mut self) {
        let manager = &self.manager;
        self.viewer
            .retain_frames(|surface| manager.session(surface).is_some());
    }

    fn view(&self) -> Element<'_, Message> {
        match self.screen {
            Screen::Viewer => self
                .viewer
                .view(component::ViewEnv {
                    i18n: &self.i18n,
                    feeds: &self.config.feeds,
                    sheet: &self.sheet,
                    manager: &self.manager,
                })
                .map(Message::Viewer),
            Screen::Settings => settings::view(&settings::ViewContext {
                i18n: &self.i18n,
                config: &self.config,
            })
            .map(Message::Settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{DecoderCommand, DecoderCommandSender, StreamKind};
    use crate::ui::viewer::component::Message as ViewerMessage;
    use tokio::sync::mpsc;

    fn app_with_feeds(urls: &[&str]) -> App {
        let mut app = App::default();
        for (i, url) in urls.iter().enumerate() {
            app.config.feeds.push(Feed {
                name: format!("Feed {}", i + 1),
                url: (*url).to_string(),
            });
        }
        // Tests never touch the real config file
        let dir = tempfile::tempdir().expect("temp dir");
        app.config_path = Some(dir.path().join("feeds.toml"));
        std::mem::forget(dir);
        app.resync_primary();
        app
    }

    fn expand(app: &mut App) {
        let _ = app.update(Message::Viewer(ViewerMessage::ToggleExpand));
        let generation = app.grid_sync_generation;
        let _ = app.update(Message::GridSurfacesReady { generation });
    }

    #[test]
    fn startup_binds_primary_to_first_feed() {
        let app = app_with_feeds(&["https://cams.example/a.m3u8", "https://cams.example/b.mp4"]);

        assert_eq!(app.manager.len(), 1);
        let session = app.manager.session(SurfaceId::Primary).unwrap();
        assert_eq!(session.url(), "https://cams.example/a.m3u8");
    }

    #[test]
    fn zero_feeds_means_zero_sessions() {
        let app = app_with_feeds(&[]);
        assert!(app.manager.is_empty());
    }

    #[test]
    fn selecting_a_feed_rebinds_only_the_primary_surface() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4", "https://x/c.m3u8"]);

        let _ = app.update(Message::Viewer(ViewerMessage::SelectFeed(1)));

        assert_eq!(app.manager.len(), 1);
        assert_eq!(
            app.manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/b.mp4"
        );
    }

    #[test]
    fn expanding_attaches_one_grid_session_per_feed_with_kinds() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);

        expand(&mut app);

        assert_eq!(app.manager.len(), 2);
        assert!(app.manager.session(SurfaceId::Primary).is_none());
        assert_eq!(
            app.manager.session(SurfaceId::Grid(0)).unwrap().kind(),
            StreamKind::Adaptive
        );
        assert_eq!(
            app.manager.session(SurfaceId::Grid(1)).unwrap().kind(),
            StreamKind::Direct
        );
    }

    #[test]
    fn stale_grid_wakeup_is_ignored() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);

        let _ = app.update(Message::Viewer(ViewerMessage::ToggleExpand));
        let stale_generation = app.grid_sync_generation;
        // User collapses before the deferred task fires
        let _ = app.update(Message::Viewer(ViewerMessage::ToggleExpand));
        let _ = app.update(Message::GridSurfacesReady {
            generation: stale_generation,
        });

        assert_eq!(app.manager.len(), 1);
        assert!(app.manager.session(SurfaceId::Primary).is_some());
        assert!(app.manager.session(SurfaceId::Grid(0)).is_none());
    }

    #[test]
    fn collapsing_destroys_grid_and_rebinds_one_primary() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);
        expand(&mut app);
        assert_eq!(app.manager.len(), 2);

        let _ = app.update(Message::Viewer(ViewerMessage::ToggleExpand));

        assert_eq!(app.manager.len(), 1);
        assert!(app.manager.session(SurfaceId::Primary).is_some());
    }

    #[test]
    fn shrinking_feed_list_resets_selection_and_rebinds_first_feed() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4", "https://x/c.mp4"]);
        let _ = app.update(Message::Viewer(ViewerMessage::SelectFeed(2)));

        let _ = app.update(Message::Settings(settings::Message::DeleteFeed(2)));

        assert_eq!(app.viewer.selection().current(), 0);
        assert_eq!(
            app.manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/a.m3u8"
        );
    }

    #[test]
    fn auth_query_change_rebinds_with_decorated_url() {
        let mut app = app_with_feeds(&["https://x/a.m3u8"]);

        let _ = app.update(Message::Settings(settings::Message::AuthQueryChanged(
            "token=abc".into(),
        )));

        assert_eq!(
            app.manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/a.m3u8?token=abc"
        );
    }

    #[test]
    fn feed_list_change_while_expanded_defers_grid_resync() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);
        expand(&mut app);

        let _ = app.update(Message::Settings(settings::Message::AddFeed));
        let _ = app.update(Message::Settings(settings::Message::FeedUrlChanged(
            2,
            "https://x/c.mp4".into(),
        )));
        let generation = app.grid_sync_generation;
        let _ = app.update(Message::GridSurfacesReady { generation });

        assert_eq!(app.manager.len(), 3);
        assert_eq!(
            app.manager.session(SurfaceId::Grid(2)).unwrap().url(),
            "https://x/c.mp4"
        );
    }

    #[test]
    fn frame_delivery_then_rebind_keeps_exactly_one_session() {
        let mut app = app_with_feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);

        let _ = app.update(Message::Playback(PlaybackMessage {
            surface: SurfaceId::Primary,
            event: PlaybackEvent::FrameReady {
                rgba_data: std::sync::Arc::new(vec![0_u8; 4]),
                width: 1,
                height: 1,
                pts_secs: 0.0,
            },
        }));

        // Rebinding to another feed destroys the old session before the new
        // one claims the surface
        let _ = app.update(Message::Viewer(ViewerMessage::SelectFeed(1)));

        assert_eq!(app.manager.len(), 1);
        assert_eq!(
            app.manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/b.mp4"
        );
    }

    #[test]
    fn stream_error_is_recorded_not_fatal() {
        let mut app = app_with_feeds(&["https://x/a.m3u8"]);

        let _ = app.update(Message::Playback(PlaybackMessage {
            surface: SurfaceId::Primary,
            event: PlaybackEvent::Error("Connection refused".into()),
        }));

        assert_eq!(app.manager.len(), 1);
        assert!(matches!(
            app.manager.session(SurfaceId::Primary).unwrap().state(),
            crate::playback::SessionState::Failed(_)
        ));
    }

    #[test]
    fn started_session_with_autoplay_receives_play() {
        let mut app = app_with_feeds(&["https://x/a.m3u8"]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let _ = app.update(Message::Playback(PlaybackMessage {
            surface: SurfaceId::Primary,
            event: PlaybackEvent::Started(DecoderCommandSender::new(tx)),
        }));

        assert!(matches!(rx.try_recv(), Ok(DecoderCommand::Play)));
    }

    #[test]
    fn settings_screen_round_trip() {
        let mut app = app_with_feeds(&["https://x/a.m3u8"]);

        let _ = app.update(Message::Viewer(ViewerMessage::OpenSettings));
        assert_eq!(app.screen, Screen::Settings);

        let _ = app.update(Message::Settings(settings::Message::Back));
        assert_eq!(app.screen, Screen::Viewer);
    }
}
