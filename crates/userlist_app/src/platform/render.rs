use userlist_core::{ListViewModel, UserDetailViewModel};

pub const RETRY_HINT: &str = "Try Again: r";

pub fn render_list(view: &ListViewModel) -> Vec<String> {
    let mut lines = vec![view.title.clone(), "=".repeat(view.title.chars().count())];

    if view.is_loading {
        lines.push("Loading...".to_string());
    }

    if view.show_error {
        if let Some(error) = &view.error {
            lines.push(error.clone());
        }
        lines.push(RETRY_HINT.to_string());
        return lines;
    }

    if view.rows.is_empty() && !view.is_loading {
        lines.push("No users.".to_string());
    }

    let width = view.rows.len().to_string().len();
    for (index, row) in view.rows.iter().enumerate() {
        lines.push(format!(
            "{:>width$}. [{:<3}] {} <{}>",
            index + 1,
            row.initials,
            row.name,
            row.email,
            width = width
        ));
    }
    lines
}

pub fn render_detail(detail: &UserDetailViewModel) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", detail.title(), detail.initials())];
    lines.extend(
        detail
            .info_rows()
            .into_iter()
            .map(|row| format!("  {:<8} {}", format!("{}:", row.label), row.value)),
    );
    lines
}
