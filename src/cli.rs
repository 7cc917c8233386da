use std::fmt;

use chrono::{Datelike, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Select, Text};

use crate::config::Settings;
use crate::models::friend::{Friend, FriendId};
use crate::models::task::{format_time, Task, TaskId};
use crate::runtime;
use crate::screens::calendar::{CalendarEvent, CalendarScreen};
use crate::screens::schedule::{ActionOutcome, ScheduleEvent, ScheduleScreen, TaskAction};
use crate::service::session_store::SessionStore;

#[derive(Parser)]
struct Cli {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Calendar {
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
    Schedule,
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
}

#[derive(Subcommand)]
enum TokenCommand {
    Set { token: String },
    Clear,
}

pub async fn cli(settings: Settings) {
    let cli = Cli::parse();
    if let Err(e) = runtime::init_tracing(cli.verbose) {
        eprintln!("{}", e);
    }
    let result = match &cli.command {
        Commands::Calendar { month } => run_calendar(&settings, month.as_deref()).await,
        Commands::Schedule => run_schedule(&settings).await,
        Commands::Token { action } => run_token(&settings, action),
    };
    if let Err(e) = result {
        println!("{}", e);
    }
}

fn run_token(settings: &Settings, action: &TokenCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = runtime::session_store(settings);
    match action {
        TokenCommand::Set { token } => {
            store.save(token)?;
            println!("Session token saved.");
        }
        TokenCommand::Clear => {
            store.clear()?;
            println!("Session token removed.");
        }
    }
    Ok(())
}

struct FriendChoice {
    id: FriendId,
    name: String,
}

impl fmt::Display for FriendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn friend_choices(friends: &[Friend]) -> Vec<FriendChoice> {
    friends
        .iter()
        .map(|friend| FriendChoice {
            id: friend.friend_id,
            name: friend.name.clone(),
        })
        .collect()
}

struct TaskChoice {
    id: TaskId,
    label: String,
}

impl fmt::Display for TaskChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

fn task_choices(tasks: &[Task]) -> Vec<TaskChoice> {
    tasks
        .iter()
        .map(|task| TaskChoice {
            id: task.id,
            label: format!("{}  {}", format_time(&task.start_time), task.title),
        })
        .collect()
}

// None when the prompt was cancelled with Esc or Ctrl-C.
fn ask<T>(result: Result<T, InquireError>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarMenu {
    PreviousFriend,
    NextFriend,
    PickFriend,
    OpenDay,
    PreviousMonth,
    NextMonth,
    AddFriend,
    Refresh,
    Quit,
}

impl fmt::Display for CalendarMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CalendarMenu::PreviousFriend => "< Previous friend",
            CalendarMenu::NextFriend => "> Next friend",
            CalendarMenu::PickFriend => "Pick friend",
            CalendarMenu::OpenDay => "Open a day",
            CalendarMenu::PreviousMonth => "<< Previous month",
            CalendarMenu::NextMonth => ">> Next month",
            CalendarMenu::AddFriend => "Add friend",
            CalendarMenu::Refresh => "Refresh",
            CalendarMenu::Quit => "Quit",
        };
        write!(f, "{}", label)
    }
}

fn parse_month(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month {}, expected YYYY-MM", raw))
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}

async fn run_calendar(
    settings: &Settings,
    month: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = runtime::build_context(settings)?;
    let today = runtime::today(settings.timezone);
    let mut screen = CalendarScreen::new(ctx, today);
    if let Some(raw) = month {
        let target = parse_month(raw)?;
        screen.dispatch(CalendarEvent::MonthShifted(months_between(today, target)));
    }
    screen.focus().await;

    loop {
        println!("\n{}", screen.state().render(today, settings.locale));
        let options = if screen.state().directory.is_empty() {
            vec![CalendarMenu::AddFriend, CalendarMenu::Refresh, CalendarMenu::Quit]
        } else {
            vec![
                CalendarMenu::PreviousFriend,
                CalendarMenu::NextFriend,
                CalendarMenu::PickFriend,
                CalendarMenu::OpenDay,
                CalendarMenu::PreviousMonth,
                CalendarMenu::NextMonth,
                CalendarMenu::Refresh,
                CalendarMenu::Quit,
            ]
        };
        let Some(choice) = ask(Select::new("Calendar", options).prompt())? else {
            break;
        };
        match choice {
            CalendarMenu::PreviousFriend => screen.previous_friend().await,
            CalendarMenu::NextFriend => screen.next_friend().await,
            CalendarMenu::PickFriend => {
                screen.dispatch(CalendarEvent::PickerOpened);
                let choices = friend_choices(screen.state().directory.friends());
                match ask(Select::new("Friends", choices).prompt())? {
                    Some(friend) => screen.select_friend(friend.id).await,
                    None => screen.dispatch(CalendarEvent::PickerClosed),
                }
            }
            CalendarMenu::OpenDay => {
                let default = today.format("%Y-%m-%d").to_string();
                let Some(raw) = ask(Text::new("Date (YYYY-MM-DD)").with_default(&default).prompt())? else {
                    continue;
                };
                let Ok(day) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
                    println!("Invalid date {}", raw);
                    continue;
                };
                screen.dispatch(CalendarEvent::DayPressed(day));
                if let Some(modal) = screen.state().day_modal(settings.locale) {
                    println!("\n{}", modal.render());
                }
                let _ = ask(Select::new("", vec!["Close"]).prompt())?;
                screen.dispatch(CalendarEvent::DayClosed);
            }
            CalendarMenu::PreviousMonth => screen.dispatch(CalendarEvent::MonthShifted(-1)),
            CalendarMenu::NextMonth => screen.dispatch(CalendarEvent::MonthShifted(1)),
            CalendarMenu::AddFriend => screen.add_friend().await,
            CalendarMenu::Refresh => screen.focus().await,
            CalendarMenu::Quit => break,
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleMenu {
    PreviousFriend,
    NextFriend,
    PickFriend,
    OpenTask,
    Call,
    Message,
    AddSchedule,
    AddFriend,
    Refresh,
    Quit,
}

impl fmt::Display for ScheduleMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScheduleMenu::PreviousFriend => "< Previous friend",
            ScheduleMenu::NextFriend => "> Next friend",
            ScheduleMenu::PickFriend => "Pick friend",
            ScheduleMenu::OpenTask => "Open a task",
            ScheduleMenu::Call => "Call",
            ScheduleMenu::Message => "Send message",
            ScheduleMenu::AddSchedule => "Add schedule",
            ScheduleMenu::AddFriend => "Add friend",
            ScheduleMenu::Refresh => "Refresh",
            ScheduleMenu::Quit => "Quit",
        };
        write!(f, "{}", label)
    }
}

async fn run_schedule(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = runtime::build_context(settings)?;
    let timezone = settings.timezone;
    let mut screen = ScheduleScreen::new(ctx, move || runtime::today(timezone));
    screen.focus().await;

    loop {
        println!("\n{}", screen.state().render(settings.locale));
        let state = screen.state();
        let options = if state.directory.is_empty() {
            vec![ScheduleMenu::AddFriend, ScheduleMenu::Refresh, ScheduleMenu::Quit]
        } else {
            let mut options = vec![
                ScheduleMenu::PreviousFriend,
                ScheduleMenu::NextFriend,
                ScheduleMenu::PickFriend,
            ];
            if !state.tasks.is_empty() {
                options.push(ScheduleMenu::OpenTask);
            }
            options.extend([
                ScheduleMenu::Call,
                ScheduleMenu::Message,
                ScheduleMenu::AddSchedule,
                ScheduleMenu::Refresh,
                ScheduleMenu::Quit,
            ]);
            options
        };
        let Some(choice) = ask(Select::new("Schedule", options).prompt())? else {
            break;
        };
        match choice {
            ScheduleMenu::PreviousFriend => screen.previous_friend().await,
            ScheduleMenu::NextFriend => screen.next_friend().await,
            ScheduleMenu::PickFriend => {
                screen.dispatch(ScheduleEvent::PickerOpened);
                let choices = friend_choices(screen.state().directory.friends());
                match ask(Select::new("Friends", choices).prompt())? {
                    Some(friend) => screen.select_friend(friend.id).await,
                    None => screen.dispatch(ScheduleEvent::PickerClosed),
                }
            }
            ScheduleMenu::OpenTask => {
                let choices = task_choices(&screen.state().tasks);
                let Some(task) = ask(Select::new("Tasks", choices).prompt())? else {
                    continue;
                };
                screen.press_task(task.id);
                run_task_panel(&mut screen).await?;
            }
            ScheduleMenu::Call => {
                if screen.call().await.is_none() {
                    println!("No phone number on file.");
                }
            }
            ScheduleMenu::Message => {
                if screen.send_message().await.is_none() {
                    println!("No phone number on file.");
                }
            }
            ScheduleMenu::AddSchedule => {
                let _ = screen.add_schedule().await;
            }
            ScheduleMenu::AddFriend => screen.add_friend().await,
            ScheduleMenu::Refresh => screen.focus().await,
            ScheduleMenu::Quit => break,
        }
    }
    Ok(())
}

async fn run_task_panel(screen: &mut ScheduleScreen) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(task) = screen.state().panel.task() {
        let title = task.title.clone();
        let action = ask(Select::new(&title, TaskAction::ALL.to_vec()).prompt())?
            .unwrap_or(TaskAction::Close);
        match screen.task_action(action).await {
            ActionOutcome::NotImplemented(_) => println!("Not available yet."),
            ActionOutcome::Navigated(_) | ActionOutcome::Closed | ActionOutcome::NoTaskSelected => {
                break;
            }
        }
    }
    Ok(())
}
