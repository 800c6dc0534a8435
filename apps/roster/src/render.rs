//! Text rendering of the roster view.

use std::fmt::Write as _;

use client_core::{FormMode, ViewState};

const HEADERS: [&str; 5] = ["ID", "First Name", "Last Name", "Email", "Department"];

pub fn render_view(state: &ViewState) -> String {
    let mut out = String::from("User List\n");

    if let Some(message) = state.error() {
        let _ = writeln!(out, "! {message}  (type 'dismiss')");
    }

    let page = state.page();
    let rows: Vec<[String; 5]> = page
        .visible
        .iter()
        .map(|user| {
            [
                user.id.to_string(),
                user.first_name().to_string(),
                user.last_name().unwrap_or_default().to_string(),
                user.email.clone(),
                user.department.clone().unwrap_or_else(|| "N/A".to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no users on this page)\n");
    }

    let pages: Vec<String> = (1..=page.total_pages)
        .map(|n| {
            if n == page.current_page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Pages: {}", pages.join(" "));

    match state.form() {
        FormMode::Closed => {}
        FormMode::Editing(None) => out.push_str("Form: Add User\n"),
        FormMode::Editing(Some(id)) => {
            let _ = writeln!(out, "Form: Edit User {id}");
        }
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::Transition;
    use shared::domain::{UserId, UserRecord};

    fn user(id: i64, name: &str, department: Option<&str>) -> UserRecord {
        UserRecord {
            id: UserId(id),
            name: name.to_string(),
            email: format!("user{id}@example.com"),
            department: department.map(str::to_string),
        }
    }

    #[test]
    fn renders_split_names_and_missing_department() {
        let state = ViewState::default().apply(Transition::Initialized(vec![
            user(1, "Ann Lee", Some("Ops")),
            user(2, "Cher", None),
        ]));
        let text = render_view(&state);
        assert!(text.contains("Ann"));
        assert!(text.contains("Lee"));
        assert!(text.contains("Ops"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Pages: [1]"));
        assert!(!text.contains("Form:"));
    }

    #[test]
    fn shows_error_banner_and_form_mode() {
        let state = ViewState::default()
            .apply(Transition::Initialized(vec![user(1, "Ann Lee", None)]))
            .apply(Transition::Failed(client_core::CommandError::Delete))
            .apply(Transition::OpenForEdit(UserId(1)));
        let text = render_view(&state);
        assert!(text.contains("! Failed to delete the user. Please try again."));
        assert!(text.contains("Form: Edit User 1"));
    }

    #[test]
    fn empty_page_is_called_out() {
        let text = render_view(&ViewState::default());
        assert!(text.contains("(no users on this page)"));
        assert!(text.contains("Pages: [1]"));
    }

    #[test]
    fn marks_current_page_among_all_pages() {
        let users: Vec<UserRecord> = (1..=13).map(|id| user(id, "Some Body", None)).collect();
        let state = ViewState::default()
            .apply(Transition::Initialized(users))
            .apply(Transition::SetPage(3));
        let text = render_view(&state);
        assert!(text.contains("Pages: 1 2 [3]"));
        assert!(text.contains("user13@example.com"));
        assert!(!text.contains("user12@example.com"));
    }
}
