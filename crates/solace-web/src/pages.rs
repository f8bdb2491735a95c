// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-rendered HTML pages.
//!
//! Pages are small string templates assembled around a shared layout.
//! All user-supplied text passes through [`escape_html`] before it is
//! interpolated.

use solace_core::{ChatTurn, MoodEntry, Story, User};

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps page content in the shared layout. `user` controls which nav
/// links render.
fn layout(title: &str, user: Option<&User>, content: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<nav><a href="/">Home</a> <a href="/chat_page">Companion</a> <a href="/community">Community</a> <a href="/profile">Profile</a> <a href="/export_data">Export</a> <a href="/logout">Log out ({})</a></nav>"#,
            escape_html(&user.username)
        ),
        None => r#"<nav><a href="/login">Log in</a> <a href="/register">Register</a></nav>"#
            .to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{} &middot; Solace</title></head>
<body>
{nav}
<main>
{content}
</main>
</body>
</html>"#,
        escape_html(title)
    )
}

fn form_error(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        None => String::new(),
    }
}

pub fn login_page(error: Option<&str>) -> String {
    let content = format!(
        r#"<h1>Log in</h1>
{}
<form method="post" action="/login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/register">Register</a>.</p>"#,
        form_error(error)
    );
    layout("Log in", None, &content)
}

pub fn register_page(error: Option<&str>) -> String {
    let content = format!(
        r#"<h1>Register</h1>
{}
<form method="post" action="/register">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Register</button>
</form>"#,
        form_error(error)
    );
    layout("Register", None, &content)
}

/// Dashboard: trailing-week mood list, check-in form, and the cached
/// analysis report.
pub fn dashboard_page(user: &User, moods: &[MoodEntry]) -> String {
    let mood_rows = if moods.is_empty() {
        "<p>No check-ins yet this week.</p>".to_string()
    } else {
        let items: String = moods
            .iter()
            .map(|entry| {
                let note = entry
                    .note
                    .as_deref()
                    .map(|n| format!(" &mdash; {}", escape_html(n)))
                    .unwrap_or_default();
                format!(
                    "<li><strong>{}</strong>: {}{note}</li>",
                    escape_html(&entry.entry_date),
                    entry.score
                )
            })
            .collect();
        format!("<ul>{items}</ul>")
    };

    let metrics = match &user.metrics {
        Some(report) => format!(
            "<h2>Latest analysis</h2><pre>{}</pre>",
            escape_html(&serde_json::to_string_pretty(report).unwrap_or_default())
        ),
        None => String::new(),
    };

    let content = format!(
        r#"<h1>Hello, {}</h1>
<h2>How are you today?</h2>
<form method="post" action="/checkin">
<label>Mood (1-5) <input name="mood" type="number" min="1" max="5" required></label>
<label>Note <input name="note"></label>
<button type="submit">Check in</button>
</form>
<h2>Your week</h2>
{mood_rows}
{metrics}"#,
        escape_html(&user.username)
    );
    layout("Dashboard", Some(user), &content)
}

pub fn chat_page(user: &User, history: &[ChatTurn]) -> String {
    let turns: String = history
        .iter()
        .map(|turn| {
            format!(
                r#"<p class="{}"><strong>{}:</strong> {}</p>"#,
                turn.role,
                turn.role.label(),
                escape_html(&turn.text)
            )
        })
        .collect();

    let content = format!(
        r#"<h1>Companion</h1>
<div id="history">
{turns}
</div>
<form id="chat-form">
<input id="message" name="message" autocomplete="off" required>
<button type="submit">Send</button>
</form>
<script>
document.getElementById('chat-form').addEventListener('submit', async (e) => {{
  e.preventDefault();
  const input = document.getElementById('message');
  const message = input.value.trim();
  if (!message) return;
  input.value = '';
  const res = await fetch('/chat', {{
    method: 'POST',
    headers: {{'Content-Type': 'application/json'}},
    body: JSON.stringify({{message}})
  }});
  const data = await res.json();
  const history = document.getElementById('history');
  history.innerHTML = data.history.map(t =>
    `<p class="${{t.role}}"><strong>${{t.role === 'user' ? 'User' : 'Assistant'}}:</strong> ${{t.text
      .replaceAll('&', '&amp;').replaceAll('<', '&lt;').replaceAll('>', '&gt;')}}</p>`
  ).join('');
}});
</script>"#
    );
    layout("Companion", Some(user), &content)
}

pub fn community_page(user: &User, stories: &[Story]) -> String {
    let posts = if stories.is_empty() {
        "<p>No stories yet. Share yours.</p>".to_string()
    } else {
        stories
            .iter()
            .map(|story| {
                format!(
                    r#"<article><h2>{}</h2><p>{}</p><footer>by {} on {}</footer></article>"#,
                    escape_html(&story.title),
                    escape_html(&story.body),
                    escape_html(&story.byline),
                    escape_html(&story.created_at)
                )
            })
            .collect()
    };

    let content = format!(
        r#"<h1>Community</h1>
<p><a href="/new_story">Share a story</a></p>
{posts}"#
    );
    layout("Community", Some(user), &content)
}

pub fn new_story_page(user: &User) -> String {
    let content = r#"<h1>Share a story</h1>
<form method="post" action="/new_story">
<label>Title <input name="title" required></label>
<label>Story <textarea name="body" required></textarea></label>
<label><input name="anonymous" type="checkbox" value="on"> Post anonymously</label>
<button type="submit">Publish</button>
</form>"#;
    layout("Share a story", Some(user), content)
}

pub fn profile_page(user: &User, error: Option<&str>) -> String {
    let avatar = match &user.avatar {
        Some(filename) => format!(
            r#"<img src="/uploads/{}" alt="avatar" width="96">"#,
            escape_html(filename)
        ),
        None => String::new(),
    };
    let light_selected = if user.preferences.theme == "light" { " selected" } else { "" };
    let dark_selected = if user.preferences.theme == "dark" { " selected" } else { "" };
    let reminder_checked = if user.preferences.daily_reminder { " checked" } else { "" };

    let content = format!(
        r#"<h1>Profile</h1>
{}
{avatar}
<form method="post" action="/profile" enctype="multipart/form-data">
<label>Username <input name="username" value="{}" required></label>
<label>Theme <select name="theme">
<option value="light"{light_selected}>Light</option>
<option value="dark"{dark_selected}>Dark</option>
</select></label>
<label><input name="daily_reminder" type="checkbox" value="on"{reminder_checked}> Daily check-in reminder</label>
<label>Avatar <input name="avatar" type="file" accept="image/*"></label>
<button type="submit">Save</button>
</form>"#,
        form_error(error),
        escape_html(&user.username)
    );
    layout("Profile", Some(user), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::types::Preferences;

    fn test_user() -> User {
        User {
            id: 1,
            username: "alice".into(),
            password_hash: "h".into(),
            avatar: None,
            preferences: Preferences::default(),
            metrics: None,
            created_at: "2026-08-30T00:00:00Z".into(),
        }
    }

    #[test]
    fn escape_html_covers_specials() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn login_page_renders_inline_error() {
        let html = login_page(Some("Invalid credentials."));
        assert!(html.contains("Invalid credentials."));
        assert!(html.contains(r#"action="/login""#));
    }

    #[test]
    fn dashboard_escapes_note_text() {
        let moods = vec![MoodEntry {
            id: 1,
            user_id: 1,
            entry_date: "2026-08-30".into(),
            score: 4,
            note: Some("<script>alert(1)</script>".into()),
        }];
        let html = dashboard_page(&test_user(), &moods);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn community_renders_byline_not_username_for_anonymous() {
        let stories = vec![Story {
            id: 1,
            user_id: Some(1),
            title: "t".into(),
            body: "b".into(),
            anonymous: true,
            byline: "Anonymous".into(),
            created_at: "2026-08-30T00:00:00Z".into(),
        }];
        let html = community_page(&test_user(), &stories);
        assert!(html.contains("by Anonymous"));
    }

    #[test]
    fn chat_page_shows_turns_in_order() {
        let history = vec![ChatTurn::user("first"), ChatTurn::assistant("second")];
        let html = chat_page(&test_user(), &history);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }
}
