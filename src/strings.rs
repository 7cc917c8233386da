use crate::config::Locale;

pub struct Strings {
    pub error_title: &'static str,
    pub missing_token: &'static str,
    pub no_friends: &'static str,
    pub add_friend_hint: &'static str,
    pub no_tasks_today: &'static str,
    pub no_schedule: &'static str,
    pub empty_day: &'static str,
}

const KO: Strings = Strings {
    error_title: "오류",
    missing_token: "JWT 토큰을 찾을 수 없습니다. 다시 로그인하세요.",
    no_friends: "등록된 친구가 없습니다.",
    add_friend_hint: "친구를 추가해주세요!",
    no_tasks_today: "오늘 일정이 없습니다.",
    no_schedule: "일정이 없습니다.",
    empty_day: "이날은 일정이 없습니다.",
};

const EN: Strings = Strings {
    error_title: "Error",
    missing_token: "Session token not found. Please log in again.",
    no_friends: "No friends registered yet.",
    add_friend_hint: "Please add a friend!",
    no_tasks_today: "No tasks today.",
    no_schedule: "No schedule.",
    empty_day: "No tasks on this day.",
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::Ko => &KO,
        Locale::En => &EN,
    }
}

pub fn schedule_heading(locale: Locale, name: &str) -> String {
    match locale {
        Locale::Ko => format!("< {}님의 일정 >", name),
        Locale::En => format!("< {}'s schedule >", name),
    }
}

pub fn day_title(locale: Locale, date: &str) -> String {
    match locale {
        Locale::Ko => format!("{}의 일정", date),
        Locale::En => format!("Schedule for {}", date),
    }
}
