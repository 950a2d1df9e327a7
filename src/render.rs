//! Plain-text rendering of the views for the terminal client.

use crate::models::{OptionResult, Poll, User};
use crate::remote::PollStore;
use crate::views::{AccountView, Controls, MyPollsView, PollDetailView, PollListView, ViewState};
use colored::Colorize;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub const PALETTE: [(u8, u8, u8); 10] = [
    (0x34, 0x98, 0xdb),
    (0x2e, 0xcc, 0x71),
    (0xe7, 0x4c, 0x3c),
    (0x9b, 0x59, 0xb6),
    (0xf1, 0xc4, 0x0f),
    (0x1a, 0xbc, 0x9c),
    (0x34, 0x49, 0x5e),
    (0xe6, 0x7e, 0x22),
    (0x95, 0xa5, 0xa6),
    (0xd3, 0x54, 0x00),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum {
    pub name: String,
    pub votes: usize,
    pub color: (u8, u8, u8),
}

/// Chart series in server order; colours cycle through the palette.
pub fn chart_data(poll: &Poll) -> Vec<ChartDatum> {
    poll.fields
        .iter()
        .enumerate()
        .map(|(index, field)| ChartDatum {
            name: field.title.clone(),
            votes: field.votes(),
            color: PALETTE[index % PALETTE.len()],
        })
        .collect()
}

pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.2}%")
}

pub fn poll_list(view: &PollListView) -> String {
    if view.is_loading() {
        return "Loading polls...\n".to_string();
    }
    let mut out = String::from("Polls\n");
    if view.polls().is_empty() {
        out.push_str("  (no polls yet)\n");
    }
    for poll in view.polls() {
        let _ = writeln!(out, "  [{}] {}", poll.id, poll.title);
    }
    out
}

pub fn poll_detail<S: PollStore>(view: &PollDetailView<S>, user: Option<&User>) -> String {
    let mut out = String::new();
    if let Some(message) = view.banner().message() {
        let _ = writeln!(out, "{}", format!("! {message}").red().bold());
    }

    let poll = match view.state() {
        ViewState::Loading => {
            out.push_str("Loading poll...\n");
            return out;
        }
        ViewState::LoadFailed(e) => {
            let _ = writeln!(out, "Could not load poll {}: {e}", view.poll_id());
            return out;
        }
        ViewState::Loaded(poll) => poll,
    };

    let _ = writeln!(out, "{}", poll.title.bold());
    let _ = writeln!(out, "Author: {}", poll.author);
    let _ = writeln!(out, "Description: {}", poll.description);
    out.push('\n');

    out.push_str("Results:\n");
    let results = poll.results();
    let name_width = results.iter().map(|r| r.title.chars().count()).max().unwrap_or(0);
    for result in &results {
        write_result_row(&mut out, result, name_width);
    }
    out.push('\n');

    match view.controls(user) {
        Controls::VoteButtons(options) => {
            let _ = writeln!(out, "Vote with: polldance vote {} <{}>", poll.id, options.join("|"));
        }
        Controls::CancelVote => {
            let _ = writeln!(out, "You voted. Cancel with: polldance cancel-vote {}", poll.id);
        }
        Controls::Hidden => {}
    }
    out.push('\n');
    out.push_str(&chart(poll));
    out
}

fn write_result_row(out: &mut String, result: &OptionResult, name_width: usize) {
    let _ = writeln!(
        out,
        "  {:<name_width$}  [{}] {:>7}  ({} votes)",
        result.title,
        progress_bar(result.percentage, BAR_WIDTH),
        format_percentage(result.percentage),
        result.votes,
    );
}

/// Horizontal bar chart of raw vote counts, scaled to the leading option.
pub fn chart(poll: &Poll) -> String {
    let data = chart_data(poll);
    let max = data.iter().map(|d| d.votes).max().unwrap_or(0);
    let name_width = data.iter().map(|d| d.name.chars().count()).max().unwrap_or(0);

    let mut out = String::from("Votes:\n");
    for datum in &data {
        let len = if max == 0 { 0 } else { datum.votes * BAR_WIDTH / max };
        let (r, g, b) = datum.color;
        let _ = writeln!(
            out,
            "  {:<name_width$}  {} {}",
            datum.name,
            "\u{2588}".repeat(len).truecolor(r, g, b),
            datum.votes
        );
    }
    out
}

pub fn my_polls(view: &MyPollsView) -> String {
    let mut out = String::from("My polls\n");
    if let Some(error) = view.error() {
        let _ = writeln!(out, "{}", format!("! {error}").red());
    }
    if view.polls().is_empty() {
        out.push_str("  You have no polls yet.\n");
    }
    for poll in view.polls() {
        let _ = writeln!(
            out,
            "  [{}] {} ({} votes)",
            poll.id,
            poll.title,
            poll.total_votes()
        );
    }
    out
}

pub fn account(view: &AccountView) -> String {
    let user = view.user();
    let mut out = String::from("My account\n");
    let _ = writeln!(out, "  Username: {}", user.username);
    match (user.registered_on(), user.registration_date.as_deref()) {
        (Some(day), _) => {
            let _ = writeln!(out, "  Registered: {}", day.format("%d.%m.%Y"));
        }
        (None, Some(raw)) => {
            let _ = writeln!(out, "  Registered: {raw}");
        }
        (None, None) => {}
    }
    out.push_str("\nPolls I voted in:\n");
    if view.voted_polls().is_empty() {
        out.push_str("  (none)\n");
    }
    for poll in view.voted_polls() {
        let _ = writeln!(
            out,
            "  [{}] {}: {}",
            poll.id, poll.title, poll.selected_option
        );
    }
    out
}
