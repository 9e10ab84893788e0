//! Plain-text rendering for the terminal presentation list.

use crate::schemas::{Audiobook, Category};

/// "1h 23m", "45m", or "--" when the source platform reported no duration.
pub fn format_duration(seconds: Option<i64>) -> String {
    match seconds {
        Some(s) if s >= 3600 => format!("{}h {:02}m", s / 3600, (s % 3600) / 60),
        Some(s) if s >= 60 => format!("{}m", s / 60),
        Some(s) => format!("{s}s"),
        None => "--".to_string(),
    }
}

/// One listing row: id, title, author, duration.
pub fn audiobook_row(book: &Audiobook) -> String {
    let author = book.author.as_deref().unwrap_or("Unknown author");
    format!(
        "#{:<6} {} - {} ({})",
        book.id,
        book.title,
        author,
        format_duration(book.duration)
    )
}

/// Multi-line detail view for one audiobook.
pub fn audiobook_detail(book: &Audiobook) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", book.title));
    if let Some(author) = &book.author {
        out.push_str(&format!("by {author}\n"));
    }
    out.push_str(&format!("Duration: {}\n", format_duration(book.duration)));
    if !book.categories.is_empty() {
        out.push_str(&format!("Categories: {}\n", book.categories.join(", ")));
    }
    out.push_str(&format!(
        "Listen: https://www.youtube.com/watch?v={}\n",
        book.video_id
    ));
    if let Some(description) = &book.description {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }
    out
}

pub fn category_row(category: &Category) -> String {
    format!("#{:<4} {}", category.id, category.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(None), "--");
        assert_eq!(format_duration(Some(42)), "42s");
        assert_eq!(format_duration(Some(150)), "2m");
        assert_eq!(format_duration(Some(5000)), "1h 23m");
    }
}
