use chrono::NaiveDate;
use tracing::debug;

use crate::config::Locale;
use crate::models::friend::{Friend, FriendId};
use crate::models::task::{group_by_date, Task, TasksByDate};
use crate::screens::friend_directory::{FriendDirectory, TaskRequest};
use crate::screens::month_grid::{first_day_of_month, in_month, render_month, shift_months};
use crate::service::backend_service::LoadError;
use crate::service::loader::ScreenContext;
use crate::service::platform::Route;
use crate::strings::{day_title, schedule_heading, strings};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarState {
    pub directory: FriendDirectory,
    pub events: TasksByDate,
    pub picker_open: bool,
    pub selected_date: Option<String>,
    pub day_modal_open: bool,
    pub month: NaiveDate,
    pub task_generation: u64,
}

#[derive(Debug)]
pub enum CalendarEvent {
    FriendsLoaded(Vec<Friend>),
    FriendSelected(FriendId),
    NextFriend,
    PreviousFriend,
    PickerOpened,
    PickerClosed,
    TasksLoaded { request: TaskRequest, tasks: Vec<Task> },
    DayPressed(NaiveDate),
    DayClosed,
    MonthShifted(i32),
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_day_of_month(today),
            ..Self::default()
        }
    }

    pub fn apply(mut self, event: CalendarEvent) -> Self {
        let before = self.directory.active_id();
        match event {
            CalendarEvent::FriendsLoaded(friends) => {
                self.directory = FriendDirectory::new(friends);
                if self.directory.is_empty() {
                    self.events.clear();
                }
                // A reload re-selects the first friend, which always refetches.
                self.task_generation += 1;
                return self;
            }
            CalendarEvent::FriendSelected(id) => {
                if self.directory.select_by_id(id) {
                    self.picker_open = false;
                }
            }
            CalendarEvent::NextFriend => self.directory.next(),
            CalendarEvent::PreviousFriend => self.directory.previous(),
            CalendarEvent::PickerOpened => self.picker_open = true,
            CalendarEvent::PickerClosed => self.picker_open = false,
            CalendarEvent::TasksLoaded { request, tasks } => {
                if request.generation == self.task_generation
                    && Some(request.friend_id) == self.directory.active_id()
                {
                    self.events = group_by_date(tasks);
                } else {
                    debug!(
                        generation = request.generation,
                        current = self.task_generation,
                        "discarding stale task response"
                    );
                }
            }
            CalendarEvent::DayPressed(day) => {
                self.selected_date = Some(day.format("%Y-%m-%d").to_string());
                self.day_modal_open = true;
            }
            CalendarEvent::DayClosed => {
                self.day_modal_open = false;
                self.selected_date = None;
            }
            CalendarEvent::MonthShifted(months) => {
                self.month = shift_months(self.month, months);
            }
        }
        if self.directory.active_id() != before {
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

    pub fn marked_dates(&self) -> Vec<NaiveDate> {
        self.events
            .keys()
            .filter_map(|key| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
            .filter(|day| in_month(*day, self.month))
            .collect()
    }

    pub fn day_modal(&self, locale: Locale) -> Option<DayModal> {
        if !self.day_modal_open {
            return None;
        }
        let text = strings(locale);
        let Some(date) = &self.selected_date else {
            return Some(DayModal {
                title: text.no_schedule.to_string(),
                lines: Vec::new(),
                empty_message: text.empty_day,
            });
        };
        let lines = self
            .events
            .get(date)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| format!("{}: {}", entry.time, entry.title))
                    .collect()
            })
            .unwrap_or_default();
        Some(DayModal {
            title: day_title(locale, date),
            lines,
            empty_message: text.empty_day,
        })
    }

    pub fn render(&self, today: NaiveDate, locale: Locale) -> String {
        let Some(friend) = self.directory.active() else {
            let text = strings(locale);
            return format!("{}\n{}\n", text.no_friends, text.add_friend_hint);
        };
        let marked = self.marked_dates();
        let mut out = format!("{}\n\n", schedule_heading(locale, &friend.name));
        out.push_str(&render_month(self.month, today, |day| marked.contains(&day)));
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayModal {
    pub title: String,
    pub lines: Vec<String>,
    pub empty_message: &'static str,
}

impl DayModal {
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title);
        if self.lines.is_empty() {
            out.push_str(self.empty_message);
            out.push('\n');
        }
        for line in &self.lines {
            out.push_str(&format!("  {}\n", line));
        }
        out
    }
}

pub struct CalendarScreen {
    ctx: ScreenContext,
    state: CalendarState,
}

impl CalendarScreen {
    pub fn new(ctx: ScreenContext, today: NaiveDate) -> Self {
        Self {
            ctx,
            state: CalendarState::new(today),
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn dispatch(&mut self, event: CalendarEvent) {
        let current = std::mem::take(&mut self.state);
        self.state = current.apply(event);
    }

    pub async fn focus(&mut self) {
        match self.ctx.fetch_friends().await {
            Ok(friends) => {
                self.dispatch(CalendarEvent::FriendsLoaded(friends));
                self.load_tasks().await;
            }
            Err(e) => debug!(error = %e, "keeping previous friend list"),
        }
    }

    pub async fn select_friend(&mut self, id: FriendId) {
        self.switch(CalendarEvent::FriendSelected(id)).await;
    }

    pub async fn next_friend(&mut self) {
        self.switch(CalendarEvent::NextFriend).await;
    }

    pub async fn previous_friend(&mut self) {
        self.switch(CalendarEvent::PreviousFriend).await;
    }

    async fn switch(&mut self, event: CalendarEvent) {
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
        self.ctx.fetch_tasks(request.friend_id, None).await
    }

    pub fn finish_task_load(&mut self, request: TaskRequest, result: Result<Vec<Task>, LoadError>) {
        match result {
            Ok(tasks) => self.dispatch(CalendarEvent::TasksLoaded { request, tasks }),
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

    pub async fn add_friend(&self) {
        self.ctx.platform.navigate(Route::AddFriend).await;
    }
}
