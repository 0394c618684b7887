// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the feed selection / playback lifecycle contract:
//! selection drives surface bindings, expanding attaches one grid session
//! per feed, and sessions are released exactly once.

#[cfg(test)]
mod tests {
    use iced_feedwall::config::{Config, ConfigPatch, Feed};
    use iced_feedwall::playback::{
        merge_auth_query, SessionManager, StreamKind, SurfaceId,
    };
    use iced_feedwall::ui::viewer::selection;

    fn feeds(urls: &[&str]) -> Vec<Feed> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| Feed {
                name: format!("Feed {}", i + 1),
                url: (*url).to_string(),
            })
            .collect()
    }

    fn primary_desired(feeds: &[Feed], selection: &selection::State) -> Vec<(SurfaceId, String)> {
        feeds
            .get(selection.current())
            .filter(|feed| !feed.url.is_empty())
            .map(|feed| vec![(SurfaceId::Primary, feed.url.clone())])
            .unwrap_or_default()
    }

    fn grid_desired(feeds: &[Feed]) -> Vec<(SurfaceId, String)> {
        feeds
            .iter()
            .enumerate()
            .filter(|(_, feed)| !feed.url.is_empty())
            .map(|(index, feed)| (SurfaceId::Grid(index), feed.url.clone()))
            .collect()
    }

    #[test]
    fn selecting_a_feed_binds_the_primary_surface_to_it() {
        let feeds = feeds(&["https://x/a.m3u8", "https://x/b.mp4", "https://x/c.m3u8"]);
        let mut selection = selection::State::new();
        let mut manager = SessionManager::new(true);
        manager.resync(&primary_desired(&feeds, &selection));

        assert_eq!(
            selection.select_feed(1),
            selection::Effect::ResyncPrimary
        );
        manager.resync(&primary_desired(&feeds, &selection));

        assert_eq!(manager.len(), 1);
        assert_eq!(
            manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/b.mp4"
        );
    }

    #[test]
    fn expanding_attaches_adaptive_and_direct_grid_sessions() {
        let feeds = feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);
        let mut selection = selection::State::new();
        let mut manager = SessionManager::new(true);
        manager.resync(&primary_desired(&feeds, &selection));

        assert_eq!(
            selection.toggle_expand(),
            selection::Effect::ResyncGridDeferred
        );
        manager.resync(&grid_desired(&feeds));

        assert_eq!(manager.len(), 2);
        assert_eq!(
            manager.session(SurfaceId::Grid(0)).unwrap().kind(),
            StreamKind::Adaptive
        );
        assert_eq!(
            manager.session(SurfaceId::Grid(1)).unwrap().kind(),
            StreamKind::Direct
        );
    }

    #[test]
    fn collapsing_destroys_all_grid_sessions_and_rebinds_primary() {
        let feeds = feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);
        let mut selection = selection::State::new();
        let mut manager = SessionManager::new(true);

        selection.toggle_expand();
        manager.resync(&grid_desired(&feeds));
        assert_eq!(manager.len(), 2);

        assert_eq!(selection.toggle_expand(), selection::Effect::CollapseGrid);
        manager.detach_grid();
        manager.resync(&primary_desired(&feeds, &selection));

        assert_eq!(manager.len(), 1);
        assert!(manager.session(SurfaceId::Primary).is_some());
        assert!(manager.session(SurfaceId::Grid(0)).is_none());
        assert!(manager.session(SurfaceId::Grid(1)).is_none());
    }

    #[test]
    fn shrinking_the_feed_list_resets_selection_and_rebinds_first_feed() {
        let mut all = feeds(&["https://x/a.m3u8", "https://x/b.mp4", "https://x/c.mp4"]);
        let mut selection = selection::State::new();
        let mut manager = SessionManager::new(true);

        selection.select_feed(2);
        manager.resync(&primary_desired(&all, &selection));
        assert_eq!(
            manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/c.mp4"
        );

        all.truncate(2);
        assert_eq!(
            selection.feeds_changed(all.len()),
            selection::Effect::ResyncPrimary
        );
        manager.resync(&primary_desired(&all, &selection));

        assert_eq!(selection.current(), 0);
        assert_eq!(manager.len(), 1);
        assert_eq!(
            manager.session(SurfaceId::Primary).unwrap().url(),
            "https://x/a.m3u8"
        );
    }

    #[test]
    fn unchanged_binding_survives_a_resync_without_recreation() {
        let feeds = feeds(&["https://x/a.m3u8"]);
        let selection = selection::State::new();
        let mut manager = SessionManager::new(true);

        manager.resync(&primary_desired(&feeds, &selection));
        let generation = manager.session(SurfaceId::Primary).unwrap().generation();

        let report = manager.resync(&primary_desired(&feeds, &selection));

        assert_eq!(report.kept, 1);
        assert_eq!(report.detached, 0);
        assert_eq!(
            manager.session(SurfaceId::Primary).unwrap().generation(),
            generation
        );
    }

    #[test]
    fn feeds_without_urls_never_produce_sessions() {
        let feeds = vec![
            Feed {
                name: "Configured".into(),
                url: "https://x/a.m3u8".into(),
            },
            Feed {
                name: "Half-configured".into(),
                url: String::new(),
            },
        ];
        let mut manager = SessionManager::new(true);

        manager.resync(&grid_desired(&feeds));

        assert_eq!(manager.len(), 1);
        assert!(manager.session(SurfaceId::Grid(1)).is_none());
    }

    #[test]
    fn config_round_trip_add_then_remove_restores_feed_list() {
        let mut config = Config::default();
        config.feeds = feeds(&["https://x/a.m3u8", "https://x/b.mp4"]);

        let grown = config.apply(ConfigPatch::AddFeed);
        let restored = grown.apply(ConfigPatch::RemoveFeed(grown.feeds.len() - 1));

        assert_eq!(restored.feeds, config.feeds);
    }

    #[test]
    fn auth_query_decorates_every_desired_binding() {
        let feeds = feeds(&["https://x/a.m3u8", "https://x/b.mp4?cam=2"]);
        let auth = "token=abc";

        let desired: Vec<(SurfaceId, String)> = feeds
            .iter()
            .enumerate()
            .map(|(index, feed)| (SurfaceId::Grid(index), merge_auth_query(&feed.url, auth)))
            .collect();

        assert_eq!(desired[0].1, "https://x/a.m3u8?token=abc");
        assert_eq!(desired[1].1, "https://x/b.mp4?cam=2&token=abc");
    }
}
