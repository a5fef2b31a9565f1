// src/ui/mod.rs

//! Plain-text views of the record store for the console.

use crate::models::{Attachment, Calendar, Embedded, Meeting, Participant, Record, RecordKind};
use crate::store::RecordStore;

const INDENT: &str = "    ";

// --- COMPONENT VIEWS ---

/// `[Meetings]  Calendars  Participants  Attachments`
pub fn view_tabs(active: RecordKind) -> String {
    RecordKind::ALL
        .iter()
        .map(|kind| {
            if *kind == active {
                format!("[{}]", kind.label())
            } else {
                kind.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn view_form(store: &RecordStore) -> String {
    let action = if store.is_editing() { "Save Changes" } else { "Create" };
    let mut lines = vec![format!("{} form ({})", store.active_tab().label(), action)];
    lines.extend(store.active_tab().fields().iter().map(|field| {
        let value = store.draft().get(*field);
        let shown = if value.is_empty() { "-" } else { value };
        format!("{}{:<10} {}  ({})", INDENT, field.name(), shown, field.placeholder())
    }));
    lines.push(String::new());
    lines.join("\n")
}

fn meeting_line(m: &Meeting) -> String {
    format!("{} - {} - {} - {} - {}", m.id, m.title, m.date_time, m.location, m.details)
}

fn calendar_line(c: &Calendar) -> String {
    format!(
        "{} - {} - {} - meetings: {}",
        c.id,
        c.title,
        c.details,
        c.meeting_id_list().join(", ")
    )
}

fn participant_line(p: &Participant) -> String {
    format!("{} - {} - {} - meeting: {}", p.id, p.name, p.email, p.meeting_id)
}

fn attachment_line(a: &Attachment) -> String {
    format!("{} - {} - meeting: {}", a.id, a.url, a.meeting_id)
}

fn push_section<T>(
    lines: &mut Vec<String>,
    title: &str,
    items: &[Embedded<T>],
    line: fn(&T) -> String,
) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{}{}:", INDENT, title));
    lines.extend(items.iter().map(|item| {
        let text = match item {
            Embedded::Full(record) => line(record),
            Embedded::Ref(id) => format!("{} (listed above)", id),
        };
        format!("{}{}{}", INDENT, INDENT, text)
    }));
}

/// One record, followed by any embedded relations the backend sent.
pub fn view_record(record: &Record) -> Vec<String> {
    let mut lines = Vec::new();
    match record {
        Record::Meeting(m) => {
            lines.push(meeting_line(m));
            push_section(&mut lines, "Calendars", &m.calendars, calendar_line);
            push_section(&mut lines, "Participants", &m.participants, participant_line);
            push_section(&mut lines, "Attachments", &m.attachments, attachment_line);
        }
        Record::Calendar(c) => {
            lines.push(calendar_line(c));
            push_section(&mut lines, "Meetings", &c.meetings, meeting_line);
        }
        Record::Participant(p) => lines.push(participant_line(p)),
        Record::Attachment(a) => {
            lines.push(attachment_line(a));
            push_section(&mut lines, "Meetings", &a.meetings, meeting_line);
        }
    }
    lines
}

pub fn view_list(store: &RecordStore) -> String {
    let records = store.active_records();
    if records.is_empty() {
        return format!("No {} yet.\n", store.active_tab().segment());
    }
    let mut lines: Vec<String> = records.iter().flat_map(view_record).collect();
    lines.push(String::new());
    lines.join("\n")
}

pub fn view_status(store: &RecordStore) -> String {
    let mut status = store.status().to_string();
    if store.is_loading() {
        status.push_str(" (loading)");
    }
    if let Some(at) = store.last_refresh() {
        status.push_str(&format!(" | refreshed {}", at.format("%H:%M:%S")));
    }
    status
}

/// Full screen: tabs, form, list and status line.
pub fn render(store: &RecordStore) -> String {
    format!(
        "{}\n\n{}\n{}\n{}",
        view_tabs(store.active_tab()),
        view_form(store),
        view_list(store),
        view_status(store)
    )
}
