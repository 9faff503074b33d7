//! End-to-end lifecycle: live tabs are tracked, idle ones are wrangled into
//! the archive, protected ones are skipped, and archived tabs are restored
//! or evicted. Drives the full service through fake ports.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tabwrangle_core::{
    ArchivedTab, Clock, CounterStore, LiveTab, SessionRecord, SessionTab, TabHost, TabId,
    TabWrangler, UnwranglePair, WranglerSettings,
};

// =============================================================================
// Fake ports
// =============================================================================

/// Fake browser port. Sessions are held behind a shared handle so a test
/// can feed new session records to a service that already owns the host.
#[derive(Debug, Default)]
struct FakeHost {
    created: Vec<String>,
    removed: Vec<TabId>,
    restored: Vec<String>,
    badge: Vec<String>,
    sessions: Rc<RefCell<Vec<SessionRecord>>>,
}

impl TabHost for FakeHost {
    fn create_tab(&mut self, url: &str) {
        self.created.push(url.to_string());
    }

    fn remove_tab(&mut self, tab_id: TabId) {
        self.removed.push(tab_id);
    }

    fn restore_session(&mut self, session_id: &str) {
        self.restored.push(session_id.to_string());
    }

    fn sessions(&self) -> Vec<SessionRecord> {
        self.sessions.borrow().clone()
    }

    fn set_badge_text(&mut self, text: &str) {
        self.badge.push(text.to_string());
    }
}

#[derive(Debug, Default)]
struct MemoryCounters {
    wrangled: u64,
    unwrangled: u64,
    removed: u64,
    install_date: u64,
}

impl CounterStore for MemoryCounters {
    fn total_tabs_wrangled(&self) -> u64 {
        self.wrangled
    }
    fn set_total_tabs_wrangled(&mut self, value: u64) {
        self.wrangled = value;
    }
    fn total_tabs_unwrangled(&self) -> u64 {
        self.unwrangled
    }
    fn set_total_tabs_unwrangled(&mut self, value: u64) {
        self.unwrangled = value;
    }
    fn total_tabs_removed(&self) -> u64 {
        self.removed
    }
    fn set_total_tabs_removed(&mut self, value: u64) {
        self.removed = value;
    }
    fn install_date(&self) -> u64 {
        self.install_date
    }
}

#[derive(Debug, Clone)]
struct TestClock(Rc<Cell<u64>>);

impl TestClock {
    fn at(now_ms: u64) -> Self {
        Self(Rc::new(Cell::new(now_ms)))
    }

    fn advance(&self, delta_ms: u64) {
        self.0.set(self.0.get() + delta_ms);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

fn tab(id: u64, url: &str, title: &str) -> LiveTab {
    LiveTab {
        id: Some(id),
        url: Some(url.to_string()),
        title: Some(title.to_string()),
        ..LiveTab::default()
    }
}

fn session_for(archived: &ArchivedTab, session_id: &str, last_modified: u64) -> SessionRecord {
    SessionRecord {
        last_modified,
        tab: Some(SessionTab {
            fav_icon_url: archived.tab.fav_icon_url.clone(),
            title: archived.tab.title.clone(),
            url: archived.tab.url.clone(),
            session_id: session_id.to_string(),
        }),
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn full_lifecycle_idle_wrangle_restore() {
    let clock = TestClock::at(1_000_000);
    let settings = WranglerSettings {
        max_tabs: 10,
        whitelist: vec!["mail.example.com".to_string()],
        ..WranglerSettings::default()
    };
    let host_sessions = Rc::new(RefCell::new(Vec::new()));
    let host = FakeHost {
        sessions: Rc::clone(&host_sessions),
        ..FakeHost::default()
    };
    let mut service = TabWrangler::new(settings, host, MemoryCounters::default(), clock.clone());

    // Startup: seed the ledger from open tabs.
    let open_tabs = vec![
        tab(1, "https://news.example/", "News"),
        tab(2, "https://mail.example.com/inbox", "Mail"),
        tab(3, "https://docs.example/guide", "Docs"),
    ];
    service.record_access_all(&open_tabs);
    assert_eq!(service.tracker().len(), 3);

    // Tab 3 stays active; 1 and 2 go idle.
    clock.advance(60_000);
    service.record_access(3);

    let mut idle = service.get_older_than(Some(clock.now_ms() - 30_000));
    idle.sort_unstable();
    assert_eq!(idle, vec![1, 2]);

    // The scheduler filters through the lock predicate: mail is whitelisted.
    let eligible: Vec<LiveTab> = open_tabs
        .iter()
        .filter(|t| idle.contains(&t.id.unwrap()) && !service.is_locked(t))
        .cloned()
        .collect();
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, Some(1));

    // Wrangle the eligible tab.
    let close_time = clock.now_ms();
    service.wrangle_tabs(eligible);
    assert_eq!(service.host().removed, vec![1]);
    assert_eq!(service.archive().len(), 1);
    assert_eq!(service.counters().total_tabs_wrangled(), 1);
    assert_eq!(service.host().badge.last().map(String::as_str), Some("1"));

    // The host reports the close event; the ledger record goes away.
    service.remove_tab(1);
    assert_eq!(service.tracker().len(), 2);
    assert_eq!(service.counters().total_tabs_removed(), 1);

    // Later the user restores it. The browser has a session for the closure
    // (second-granularity timestamp) which is preferred over a plain reopen.
    let archived = service.archive().tabs()[0].clone();
    host_sessions.borrow_mut().push(SessionRecord {
        last_modified: 42,
        tab: None,
    });
    host_sessions
        .borrow_mut()
        .push(session_for(&archived, "session-7", close_time / 1000));

    let session = service.find_session_for(&archived);
    assert!(session.is_some());

    service.unwrangle(vec![UnwranglePair {
        tab: archived,
        session,
    }]);
    assert_eq!(service.host().restored, vec!["session-7"]);
    assert!(service.archive().is_empty());
    assert_eq!(service.counters().total_tabs_unwrangled(), 1);
    assert_eq!(service.host().badge.last().map(String::as_str), Some(""));
}

#[test]
fn eviction_is_permanent_across_the_lifecycle() {
    let clock = TestClock::at(1_000_000);
    let settings = WranglerSettings {
        max_tabs: 2,
        ..WranglerSettings::default()
    };
    let mut service = TabWrangler::new(
        settings,
        FakeHost::default(),
        MemoryCounters::default(),
        clock.clone(),
    );

    for (id, url) in [
        (1, "https://a.example/"),
        (2, "https://b.example/"),
        (3, "https://c.example/"),
    ] {
        service.wrangle_tabs(vec![tab(id, url, "t")]);
        clock.advance(1_000);
    }

    // [C, B]; A is gone and cannot be found or restored.
    let urls: Vec<_> = service
        .archive()
        .tabs()
        .iter()
        .map(|e| e.tab.url.as_deref().unwrap())
        .collect();
    assert_eq!(urls, vec!["https://c.example/", "https://b.example/"]);
    assert_eq!(service.archive().find_position_by_url(Some("https://a.example/")), None);
    assert_eq!(service.counters().total_tabs_wrangled(), 3);
}

#[test]
fn restore_fallback_without_session_reopens_inactive() {
    let clock = TestClock::at(1_000_000);
    let mut service = TabWrangler::new(
        WranglerSettings::default(),
        FakeHost::default(),
        MemoryCounters::default(),
        clock,
    );

    service.wrangle_tabs(vec![tab(1, "https://a.example/", "A")]);
    let archived = service.archive().tabs()[0].clone();

    // No sessions enumerated by the host at all.
    assert!(service.find_session_for(&archived).is_none());
    service.unwrangle(vec![UnwranglePair {
        tab: archived,
        session: None,
    }]);

    assert_eq!(service.host().created, vec!["https://a.example/"]);
    assert!(service.host().restored.is_empty());
}
