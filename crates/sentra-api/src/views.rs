//! Server-rendered pages. Every interpolated value goes through [`escape`].

use std::fmt::Write;

use axum::response::Html;

use sentra_types::api::{Claims, CommentSentiment};
use sentra_types::models::{Article, Comment, User};

pub fn escape(raw: &str) -> String {
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

fn layout(title: &str, user: Option<&Claims>, body: &str) -> Html<String> {
    let nav = match user {
        Some(claims) => format!(
            r#"<nav>
  <a href="/dashboard">Dashboard</a>
  <a href="/upload-comment">Add comment</a>
  <a href="/my-comments">Comments</a>
  <a href="/upload-docs">Upload docs</a>
  <a href="/sentiment-analysis-comments">Analyze comments</a>
  <a href="/analytics">Analytics</a>
  <a href="/word-cloud">Word cloud</a>
  <a href="/settings">{}</a>
  <form method="post" action="/logout" style="display:inline"><button type="submit">Log out</button></form>
</nav>"#,
            escape(&claims.name)
        ),
        None => r#"<nav><a href="/login">Log in</a> <a href="/signup">Sign up</a></nav>"#.to_string(),
    };

    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} · Sentra</title></head>
<body>
{nav}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default()
}

fn comment_list(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "<p>No comments yet.</p>".to_string();
    }
    let mut out = String::from("<ul class=\"comments\">");
    for c in comments {
        let _ = write!(
            out,
            "<li><strong>{}</strong> [{}] on {}: {} <time>{}</time></li>",
            escape(&c.name),
            escape(&c.category),
            escape(&c.article_id),
            escape(&c.text),
            c.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    out.push_str("</ul>");
    out
}

pub fn login(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{}
<form method="post" action="/login">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>"#,
        error_banner(error)
    );
    layout("Log in", None, &body)
}

pub fn signup() -> Html<String> {
    layout(
        "Sign up",
        None,
        r#"<form method="post" action="/signup">
  <label>Name <input name="name"></label>
  <label>Email <input type="email" name="email"></label>
  <label>Phone <input name="phone"></label>
  <label>Username <input name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Create account</button>
</form>"#,
    )
}

pub fn dashboard(user: &Claims, articles: &[Article], comments: &[Comment]) -> Html<String> {
    let mut body = String::from("<h2>Articles</h2><ul>");
    for a in articles {
        let _ = write!(
            body,
            r#"<li><a href="/article/{}">{}</a></li>"#,
            escape(&a.id),
            escape(&a.title)
        );
    }
    body.push_str("</ul><h2>Recent comments</h2>");
    body.push_str(&comment_list(comments));
    layout("Dashboard", Some(user), &body)
}

pub fn article(user: &Claims, article: &Article, comments: &[Comment]) -> Html<String> {
    let related: Vec<Comment> = comments
        .iter()
        .filter(|c| c.article_id == article.id)
        .cloned()
        .collect();
    let body = format!(
        r#"<article><p>{}</p></article>
<h2>Comments</h2>
{}
<p><a href="/upload-comment">Add a comment</a></p>"#,
        escape(&article.content),
        comment_list(&related)
    );
    layout(&article.title, Some(user), &body)
}

pub fn upload_comment(user: &Claims, articles: &[Article], submitted: bool) -> Html<String> {
    let mut options = String::new();
    for a in articles {
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            escape(&a.id),
            escape(&a.title)
        );
    }
    let notice = if submitted {
        r#"<p class="notice">Comment submitted.</p>"#
    } else {
        ""
    };
    let body = format!(
        r#"{notice}
<form method="post" action="/upload-comment">
  <label>Name <input name="name"></label>
  <label>Category <input name="category"></label>
  <label>Article <select name="articleId">{options}</select></label>
  <label>Comment <textarea name="comment"></textarea></label>
  <button type="submit">Submit</button>
</form>"#
    );
    layout("Upload comment", Some(user), &body)
}

pub fn my_comments(user: &Claims, comments: &[Comment]) -> Html<String> {
    layout("My comments", Some(user), &comment_list(comments))
}

pub fn settings(claims: &Claims, stored: Option<&User>) -> Html<String> {
    let mut body = format!(
        "<dl><dt>Name</dt><dd>{}</dd><dt>Email</dt><dd>{}</dd><dt>Role</dt><dd>{}</dd>",
        escape(&claims.name),
        escape(&claims.email),
        escape(&claims.role)
    );
    if let Some(user) = stored {
        let _ = write!(
            body,
            "<dt>Username</dt><dd>{}</dd><dt>Phone</dt><dd>{}</dd>",
            escape(&user.username),
            escape(&user.phone)
        );
    }
    body.push_str("</dl>");
    layout("Settings", Some(claims), &body)
}

pub fn upload_docs(user: &Claims, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{}
<form method="post" action="/upload-docs" enctype="multipart/form-data">
  <label>CSV file <input type="file" name="file" accept=".csv,text/csv"></label>
  <button type="submit">Upload and analyze</button>
</form>"#,
        error_banner(error)
    );
    layout("Upload documents", Some(user), &body)
}

pub fn success(user: &Claims) -> Html<String> {
    layout(
        "Upload complete",
        Some(user),
        r#"<p>Your document was uploaded, analyzed and queued for reporting.</p>
<p><a href="/upload-docs">Upload another</a></p>"#,
    )
}

pub fn sentiment_comments(user: &Claims, result: Option<&[CommentSentiment]>) -> Html<String> {
    let mut body = String::from(
        r#"<form method="post" action="/sentiment-analysis-comments">
  <label>One comment per line <textarea name="comments"></textarea></label>
  <button type="submit">Analyze</button>
</form>"#,
    );
    if let Some(rows) = result {
        body.push_str(
            "<table><thead><tr><th>#</th><th>Comment</th><th>Sentiment</th><th>Confidence</th></tr></thead><tbody>",
        );
        for r in rows {
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                r.comment_id,
                escape(&r.comment),
                r.sentiment,
                r.confidence
            );
        }
        body.push_str("</tbody></table>");
    }
    layout("Comment sentiment", Some(user), &body)
}

/// Figures shown on the analytics page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub articles: usize,
    pub comments: usize,
    pub positive: usize,
    pub negative: usize,
}

impl AnalyticsSummary {
    pub fn percent(&self, count: usize) -> f64 {
        if self.comments == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.comments as f64
        }
    }
}

pub fn analytics(user: &Claims, summary: &AnalyticsSummary) -> Html<String> {
    let body = format!(
        r#"<ul>
  <li>Articles: {}</li>
  <li>Comments: {}</li>
  <li>Positive: {} ({:.0}%)</li>
  <li>Negative: {} ({:.0}%)</li>
</ul>"#,
        summary.articles,
        summary.comments,
        summary.positive,
        summary.percent(summary.positive),
        summary.negative,
        summary.percent(summary.negative),
    );
    layout("Analytics", Some(user), &body)
}

pub fn word_cloud(user: &Claims, words: &[(String, usize)]) -> Html<String> {
    let body = if words.is_empty() {
        "<p>Not enough comments yet.</p>".to_string()
    } else {
        let mut out = String::from("<ol class=\"words\">");
        for (word, count) in words {
            let _ = write!(out, "<li>{} <small>({})</small></li>", escape(word), count);
        }
        out.push_str("</ol>");
        out
    };
    layout("Word cloud", Some(user), &body)
}
