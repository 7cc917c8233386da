use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use careCompanion::models::friend::{Friend, FriendId};
use careCompanion::models::task::Task;
use careCompanion::config::Locale;
use careCompanion::screens::calendar::{CalendarEvent, CalendarScreen, CalendarState};
use careCompanion::strings::strings;
use careCompanion::service::backend_service::CareBackend;
use careCompanion::service::loader::ScreenContext;
use careCompanion::service::platform::{Platform, Route};
use careCompanion::service::session_store::{MemorySessionStore, SessionStore};
use chrono::NaiveDate;
use serde_json::Map;
use tokio::sync::Mutex;

struct FakeBackend {
    friends: Vec<Friend>,
    tasks: HashMap<FriendId, Vec<Task>>,
    fail_friends: AtomicBool,
    fail_tasks: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn new(friends: Vec<Friend>, tasks: HashMap<FriendId, Vec<Task>>) -> Self {
        Self {
            friends,
            tasks,
            fail_friends: AtomicBool::new(false),
            fail_tasks: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl CareBackend for FakeBackend {
    async fn get_friends(
        &self,
        token: &str,
    ) -> Result<Vec<Friend>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().await.push(format!("friends:{}", token));
        if self.fail_friends.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(self.friends.clone())
    }

    async fn get_tasks(
        &self,
        token: &str,
        friend_id: FriendId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls
            .lock()
            .await
            .push(format!("tasks:{}:{}:{:?}", token, friend_id, date));
        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err("Request failed with status 500".into());
        }
        Ok(self.tasks.get(&friend_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakePlatform {
    alerts: Mutex<Vec<String>>,
    routes: Mutex<Vec<Route>>,
}

#[async_trait::async_trait]
impl Platform for FakePlatform {
    async fn alert(&self, _title: &str, message: &str) {
        self.alerts.lock().await.push(message.to_string());
    }

    async fn navigate(&self, route: Route) {
        self.routes.lock().await.push(route);
    }

    async fn open_url(&self, _url: &str) -> Result<(), String> {
        Ok(())
    }
}

fn friend(id: FriendId, name: &str) -> Friend {
    Friend {
        friend_id: id,
        name: name.to_string(),
        phone_number: None,
    }
}

fn task(id: i64, date: &str, start: &str, title: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        start_time: start.to_string(),
        date: date.to_string(),
        extra: Map::new(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn example_backend() -> FakeBackend {
    let mut tasks = HashMap::new();
    tasks.insert(1, vec![task(10, "2025-01-01", "09:00", "T1")]);
    tasks.insert(2, vec![task(20, "2025-01-20", "18:00", "dinner")]);
    FakeBackend::new(vec![friend(1, "A"), friend(2, "B")], tasks)
}

fn screen_with(
    backend: Arc<FakeBackend>,
    session: Arc<MemorySessionStore>,
    platform: Arc<FakePlatform>,
) -> CalendarScreen {
    CalendarScreen::new(ScreenContext::new(backend, session, platform), today())
}

#[tokio::test]
async fn focus_selects_first_friend_and_groups_tasks() {
    let backend = Arc::new(example_backend());
    let platform = Arc::new(FakePlatform::default());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        platform,
    );

    screen.focus().await;

    let state = screen.state();
    assert_eq!(state.directory.active_id(), Some(1));
    assert_eq!(state.events.len(), 1);
    let entries = &state.events["2025-01-01"];
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].time, "09:00");
    assert_eq!(entries[0].title, "T1");
    assert_eq!(state.marked_dates(), vec![NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()]);
    assert_eq!(
        backend.calls().await,
        vec!["friends:jwt".to_string(), "tasks:jwt:1:None".to_string()]
    );
}

#[tokio::test]
async fn missing_token_alerts_without_any_request() {
    let backend = Arc::new(example_backend());
    let platform = Arc::new(FakePlatform::default());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::default()),
        platform.clone(),
    );

    screen.focus().await;

    assert!(backend.calls().await.is_empty());
    assert_eq!(
        *platform.alerts.lock().await,
        vec![strings(Locale::Ko).missing_token.to_string()]
    );
    assert!(screen.state().directory.is_empty());
    assert!(screen.state().render(today(), Locale::En).contains("No friends registered yet."));
    assert!(screen.state().render(today(), Locale::Ko).contains("등록된 친구가 없습니다."));
}

#[tokio::test]
async fn losing_the_token_keeps_existing_tasks() {
    let backend = Arc::new(example_backend());
    let session = Arc::new(MemorySessionStore::with_token("jwt"));
    let platform = Arc::new(FakePlatform::default());
    let mut screen = screen_with(backend.clone(), session.clone(), platform.clone());
    screen.focus().await;
    let before = screen.state().events.clone();
    let calls_before = backend.calls().await.len();

    session.clear().unwrap();
    screen.next_friend().await;

    assert_eq!(backend.calls().await.len(), calls_before);
    assert_eq!(platform.alerts.lock().await.len(), 1);
    assert_eq!(screen.state().events, before);
}

#[tokio::test]
async fn arrows_cycle_through_all_friends() {
    let backend = Arc::new(FakeBackend::new(
        vec![friend(1, "A"), friend(2, "B"), friend(3, "C")],
        HashMap::new(),
    ));
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;

    screen.previous_friend().await;
    assert_eq!(screen.state().directory.active_id(), Some(3));
    screen.next_friend().await;
    assert_eq!(screen.state().directory.active_id(), Some(1));
    screen.next_friend().await;
    screen.next_friend().await;
    assert_eq!(screen.state().directory.active_id(), Some(3));

    let calls = backend.calls().await;
    assert_eq!(calls.last().map(String::as_str), Some("tasks:jwt:3:None"));
}

#[tokio::test]
async fn picking_a_friend_closes_the_picker_and_loads_their_tasks() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;
    screen.dispatch(CalendarEvent::PickerOpened);
    assert!(screen.state().picker_open);

    screen.select_friend(2).await;

    assert!(!screen.state().picker_open);
    assert_eq!(screen.state().directory.active_id(), Some(2));
    assert!(screen.state().events.contains_key("2025-01-20"));
}

#[tokio::test]
async fn unknown_friend_selection_is_ignored() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;
    let calls_before = backend.calls().await.len();

    screen.select_friend(99).await;

    assert_eq!(screen.state().directory.active_id(), Some(1));
    assert_eq!(backend.calls().await.len(), calls_before);
}

#[tokio::test]
async fn pressing_an_empty_day_shows_the_empty_message() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend,
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;

    screen.dispatch(CalendarEvent::DayPressed(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()));
    let modal = screen.state().day_modal(Locale::En).expect("modal should be open");
    assert_eq!(modal.title, "Schedule for 2025-01-02");
    assert!(modal.lines.is_empty());
    assert!(modal.render().contains(strings(Locale::En).empty_day));

    let korean = screen.state().day_modal(Locale::Ko).unwrap();
    assert_eq!(korean.title, "2025-01-02의 일정");
    assert!(korean.render().contains("이날은 일정이 없습니다."));

    screen.dispatch(CalendarEvent::DayClosed);
    assert!(screen.state().day_modal(Locale::En).is_none());
    assert!(screen.state().selected_date.is_none());
}

#[tokio::test]
async fn pressing_a_busy_day_lists_time_and_title() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend,
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;

    screen.dispatch(CalendarEvent::DayPressed(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    let modal = screen.state().day_modal(Locale::En).unwrap();
    assert_eq!(modal.lines, vec!["09:00: T1".to_string()]);
}

#[test]
fn open_modal_without_date_shows_empty_state() {
    let state = CalendarState {
        day_modal_open: true,
        ..CalendarState::new(today())
    };
    let modal = state.day_modal(Locale::En).unwrap();
    assert_eq!(modal.title, strings(Locale::En).no_schedule);
    assert!(modal.render().contains(strings(Locale::En).empty_day));
}

#[tokio::test]
async fn stale_task_response_is_discarded() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend,
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;

    let slow = screen.begin_task_load().expect("friend 1 is active");
    screen.next_friend().await;
    assert!(screen.state().events.contains_key("2025-01-20"));

    screen.finish_task_load(slow, Ok(vec![task(11, "2025-01-05", "07:00", "late")]));

    assert!(screen.state().events.contains_key("2025-01-20"));
    assert!(!screen.state().events.contains_key("2025-01-05"));
}

#[tokio::test]
async fn failed_task_load_keeps_previous_tasks() {
    let backend = Arc::new(example_backend());
    let platform = Arc::new(FakePlatform::default());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        platform.clone(),
    );
    screen.focus().await;
    let before = screen.state().events.clone();

    backend.fail_tasks.store(true, Ordering::SeqCst);
    screen.next_friend().await;

    assert_eq!(screen.state().events, before);
    assert!(platform.alerts.lock().await.is_empty());
}

#[tokio::test]
async fn failed_refocus_keeps_previous_friends() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;
    screen.next_friend().await;

    backend.fail_friends.store(true, Ordering::SeqCst);
    screen.focus().await;

    assert_eq!(screen.state().directory.friends().len(), 2);
    assert_eq!(screen.state().directory.active_id(), Some(2));
}

#[tokio::test]
async fn refocus_reselects_first_friend() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;
    screen.next_friend().await;

    screen.focus().await;

    assert_eq!(screen.state().directory.active_id(), Some(1));
    assert!(screen.state().events.contains_key("2025-01-01"));
}

#[tokio::test]
async fn month_paging_moves_the_marks() {
    let backend = Arc::new(example_backend());
    let mut screen = screen_with(
        backend,
        Arc::new(MemorySessionStore::with_token("jwt")),
        Arc::new(FakePlatform::default()),
    );
    screen.focus().await;

    screen.dispatch(CalendarEvent::MonthShifted(1));
    assert_eq!(screen.state().month, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert!(screen.state().marked_dates().is_empty());
    assert!(screen.state().render(today(), Locale::En).contains("February 2025"));

    screen.dispatch(CalendarEvent::MonthShifted(-1));
    assert_eq!(screen.state().marked_dates().len(), 1);
}

#[tokio::test]
async fn empty_directory_offers_add_friend() {
    let backend = Arc::new(FakeBackend::new(Vec::new(), HashMap::new()));
    let platform = Arc::new(FakePlatform::default());
    let mut screen = screen_with(
        backend.clone(),
        Arc::new(MemorySessionStore::with_token("jwt")),
        platform.clone(),
    );
    screen.focus().await;

    screen.next_friend().await;
    assert!(screen.state().directory.active().is_none());
    assert_eq!(backend.calls().await, vec!["friends:jwt".to_string()]);

    screen.add_friend().await;
    assert_eq!(*platform.routes.lock().await, vec![Route::AddFriend]);
}
