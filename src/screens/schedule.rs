use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, error, info};

use crate::config::Locale;
use crate::models::friend::{Friend, FriendId};
use crate::models::task::{format_time, Task, TaskId};
use crate::screens::friend_directory::{FriendDirectory, TaskRequest};
use crate::service::backend_service::LoadError;
use crate::service::loader::ScreenContext;
use crate::service::platform::{call_url, sms_url, Route};
use crate::strings::{schedule_heading, strings};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TaskPanel {
    #[default]
    Closed,
    Open(Task),
}

impl TaskPanel {
    pub fn task(&self) -> Option<&Task> {
        match self {
            TaskPanel::Open(task) => Some(task),
            TaskPanel::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Notify,
    Edit,
    Delete,
    Close,
}

impl TaskAction {
    pub const ALL: [TaskAction; 4] = [
        TaskAction::Notify,
        TaskAction::Edit,
        TaskAction::Delete,
        TaskAction::Close,
    ];
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskAction::Notify => "Send notification",
            TaskAction::Edit => "Edit task",
            TaskAction::Delete => "Delete task",
            TaskAction::Close => "Close",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigated(Route),
    NotImplemented(TaskAction),
    Closed,
    NoTaskSelected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleState {
    pub directory: FriendDirectory,
    pub tasks: Vec<Task>,
    pub picker_open: bool,
    pub panel: TaskPanel,
    pub today: NaiveDate,
    pub task_generation: u64,
}

#[derive(Debug)]
pub enum ScheduleEvent {
    FriendsLoaded(Vec<Friend>),
    FriendSelected(FriendId),
    NextFriend,
    PreviousFriend,
    PickerOpened,
    PickerClosed,
    TasksLoaded { request: TaskRequest, tasks: Vec<Task> },
    TaskPressed(TaskId),
    PanelClosed,
    DayChanged(NaiveDate),
}

impl ScheduleState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            ..Self::default()
        }
    }

    pub fn apply(mut self, event: ScheduleEvent) -> Self {
        let before = self.directory.active_id();
        match event {
            ScheduleEvent::FriendsLoaded(friends) => {
                self.directory = FriendDirectory::new(friends);
                if self.directory.is_empty() {
                    self.tasks.clear();
                }
                self.panel = TaskPanel::Closed;
                self.task_generation += 1;
                return self;
            }
            ScheduleEvent::FriendSelected(id) => {
                if self.directory.select_by_id(id) {
                    self.picker_open = false;
                }
            }
            ScheduleEvent::NextFriend => self.directory.next(),
            ScheduleEvent::PreviousFriend => self.directory.previous(),
            ScheduleEvent::PickerOpened => self.picker_open = true,
            ScheduleEvent::PickerClosed => self.picker_open = false,
            ScheduleEvent::TasksLoaded { request, tasks } => {
                if request.generation == self.task_generation
                    && Some(request.friend_id) == self.directory.active_id()
                {
                    self.tasks = tasks;
                } else {
                    debug!(
                        generation = request.generation,
                        current = self.task_generation,
                        "discarding stale task response"
                    );
                }
            }
            ScheduleEvent::TaskPressed(id) => {
                if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                    self.panel = TaskPanel::Open(task.clone());
                }
            }
            ScheduleEvent::PanelClosed => self.panel = TaskPanel::Closed,
            ScheduleEvent::DayChanged(day) => {
                if day != self.today {
                    // Yesterday's list must not show under today's label.
                    self.today = day;
                    self.tasks.clear();
                    self.panel = TaskPanel::Closed;
                    self.task_generation += 1;
                }
            }
        }
        if self.directory.active_id() != before {
            self.panel = TaskPanel::Closed;
            self.task_generation += 1;
        }
        self
    }

    pub fn task_request(&self) -> Option<TaskRequest> {
        self.directory.active_id().map(|friend_id| TaskRequest {
            generation: self.task_generation,
            friend_id,
        })
    }

    pub fn render(&self, locale: Locale) -> String {
        let mut out = format!("{}\n\n", format_date_label(self.today, locale));
        let text = strings(locale);
        let Some(friend) = self.directory.active() else {
            out.push_str(&format!("{}\n{}\n", text.no_friends, text.add_friend_hint));
            return out;
        };
        out.push_str(&schedule_heading(locale, &friend.name));
        out.push('\n');
        if self.tasks.is_empty() {
            out.push_str(text.no_tasks_today);
            out.push('\n');
        }
        for task in &self.tasks {
            out.push_str(&format!("  {}  {}\n", format_time(&task.start_time), task.title));
        }
        out
    }
}

pub fn format_date_label(day: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Ko => {
            let names = ["일", "월", "화", "수", "목", "금", "토"];
            let weekday = names[day.weekday().num_days_from_sunday() as usize];
            format!("{}년 {}월 {}일 ({})", day.year(), day.month(), day.day(), weekday)
        }
        Locale::En => {
            let weekday = match day.weekday() {
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
                Weekday::Sun => "Sunday",
            };
            format!("{}, {}", weekday, day.format("%B %-d, %Y"))
        }
    }
}

pub struct ScheduleScreen {
    ctx: ScreenContext,
    state: ScheduleState,
    clock: Box<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl ScheduleScreen {
    pub fn new(ctx: ScreenContext, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        Self {
            ctx,
            state: ScheduleState::new(clock()),
            clock: Box::new(clock),
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn dispatch(&mut self, event: ScheduleEvent) {
        let current = std::mem::take(&mut self.state);
        self.state = current.apply(event);
    }

    pub async fn focus(&mut self) {
        let today = (self.clock)();
        self.dispatch(ScheduleEvent::DayChanged(today));
        match self.ctx.fetch_friends().await {
            Ok(friends) => {
                self.dispatch(ScheduleEvent::FriendsLoaded(friends));
                self.load_tasks().await;
            }
            Err(e) => debug!(error = %e, "keeping previous friend list"),
        }
    }

    pub async fn select_friend(&mut self, id: FriendId) {
        self.switch(ScheduleEvent::FriendSelected(id)).await;
    }

    pub async fn next_friend(&mut self) {
        self.switch(ScheduleEvent::NextFriend).await;
    }

    pub async fn previous_friend(&mut self) {
        self.switch(ScheduleEvent::PreviousFriend).await;
    }

    async fn switch(&mut self, event: ScheduleEvent) {
        let generation = self.state.task_generation;
        self.dispatch(event);
        if self.state.task_generation != generation {
            self.load_tasks().await;
        }
    }

    pub fn begin_task_load(&self) -> Option<TaskRequest> {
        self.state.task_request()
    }

    pub async fn fetch_for(&self, request: TaskRequest) -> Result<Vec<Task>, LoadError> {
        self.ctx
            .fetch_tasks(request.friend_id, Some(self.state.today))
            .await
    }

    pub fn finish_task_load(&mut self, request: TaskRequest, result: Result<Vec<Task>, LoadError>) {
        match result {
            Ok(tasks) => self.dispatch(ScheduleEvent::TasksLoaded { request, tasks }),
            Err(e) => debug!(error = %e, "keeping previous tasks"),
        }
    }

    async fn load_tasks(&mut self) {
        let Some(request) = self.begin_task_load() else {
            return;
        };
        let result = self.fetch_for(request).await;
        self.finish_task_load(request, result);
    }

    pub fn press_task(&mut self, id: TaskId) {
        self.dispatch(ScheduleEvent::TaskPressed(id));
    }

    pub async fn task_action(&mut self, action: TaskAction) -> ActionOutcome {
        let Some(task) = self.state.panel.task().cloned() else {
            return ActionOutcome::NoTaskSelected;
        };
        match action {
            TaskAction::Edit => {
                let route = Route::EditSchedule { task_id: task.id };
                self.dispatch(ScheduleEvent::PanelClosed);
                self.ctx.platform.navigate(route.clone()).await;
                ActionOutcome::Navigated(route)
            }
            TaskAction::Notify | TaskAction::Delete => {
                info!(task_id = task.id, ?action, "task action has no backend contract yet");
                ActionOutcome::NotImplemented(action)
            }
            TaskAction::Close => {
                self.dispatch(ScheduleEvent::PanelClosed);
                ActionOutcome::Closed
            }
        }
    }

    pub async fn call(&self) -> Option<String> {
        let phone = self.state.directory.active()?.phone()?;
        let url = call_url(phone);
        if let Err(e) = self.ctx.platform.open_url(&url).await {
            error!(error = %e, "Error calling phone number");
        }
        Some(url)
    }

    pub async fn send_message(&self) -> Option<String> {
        let phone = self.state.directory.active()?.phone()?;
        let url = sms_url(phone);
        if let Err(e) = self.ctx.platform.open_url(&url).await {
            error!(error = %e, "Error sending SMS");
        }
        Some(url)
    }

    pub async fn add_schedule(&self) -> Option<Route> {
        let friend_id = self.state.directory.active_id()?;
        let route = Route::AddSchedule { friend_id };
        self.ctx.platform.navigate(route.clone()).await;
        Some(route)
    }

    pub async fn add_friend(&self) {
        self.ctx.platform.navigate(Route::AddFriend).await;
    }
}
