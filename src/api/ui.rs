//! Server-rendered audit page

use crate::pipeline::AuditOutcome;

pub const EMPTY_INPUT_MESSAGE: &str = "Please provide input text first.";

/// Minimal HTML escaping for user and model text
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn is_table_row(line: &str) -> bool {
    line.starts_with('|')
}

/// `|---|:---:|` style rows between the header and the body
fn is_separator_row(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn table_cells(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| escape_html(cell.trim()))
        .collect()
}

fn push_table(out: &mut String, rows: &[&str]) {
    out.push_str("<table>\n");
    let mut header_done = false;
    for row in rows {
        if is_separator_row(row) {
            continue;
        }
        let tag = if header_done { "td" } else { "th" };
        header_done = true;
        out.push_str("<tr>");
        for cell in table_cells(row) {
            out.push_str(&format!("<{tag}>{cell}</{tag}>"));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
}

/// Render the adjudicator's markdown: pipe tables become `<table>`, other
/// non-blank lines become paragraphs. Everything is escaped.
pub fn render_verdict(markdown: &str) -> String {
    let mut out = String::new();
    let mut table: Vec<&str> = Vec::new();

    for line in markdown.lines().map(str::trim) {
        if is_table_row(line) {
            table.push(line);
            continue;
        }
        if !table.is_empty() {
            push_table(&mut out, &table);
            table.clear();
        }
        if !line.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", escape_html(line)));
        }
    }
    if !table.is_empty() {
        push_table(&mut out, &table);
    }
    out
}

/// What to show below the input form
pub enum PageBody<'a> {
    Empty,
    Error(&'a str),
    Outcome(&'a AuditOutcome),
}

pub fn render_page(input: &str, body: PageBody<'_>) -> String {
    let section = match body {
        PageBody::Empty => String::new(),
        PageBody::Error(message) => format!(
            r#"<div class="error">{}</div>"#,
            escape_html(message)
        ),
        PageBody::Outcome(outcome) => format!(
            r#"<h2>Verdict</h2>
<div class="verdict">
{verdict}</div>
<details>
  <summary>Research log ({skipped} queries skipped)</summary>
  <pre>{research}</pre>
</details>
<p class="meta">Audit {id}</p>"#,
            verdict = render_verdict(&outcome.verdict),
            research = escape_html(&outcome.research),
            skipped = outcome.skipped_queries,
            id = outcome.audit_id,
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Citation Auditor</title>
  <style>
    body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }}
    textarea {{ width: 100%; height: 12rem; }}
    pre {{ white-space: pre-wrap; background: #f6f6f6; padding: 1rem; }}
    table {{ border-collapse: collapse; }}
    th, td {{ border: 1px solid #ccc; padding: 0.4rem; text-align: left; }}
    .error {{ color: #b00020; margin: 1rem 0; }}
    .meta {{ color: #777; font-size: 0.8rem; }}
  </style>
</head>
<body>
  <h1>Citation Auditor</h1>
  <p>Paste citations or claims, one per line.</p>
  <form method="post" action="/audit">
    <textarea name="query">{input}</textarea>
    <button type="submit">Run audit</button>
  </form>
  {section}
</body>
</html>"#,
        input = escape_html(input),
        section = section,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Smith" & 'Jones'</b>"#),
            "&lt;b&gt;&quot;Smith&quot; &amp; &#39;Jones&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_error_message_rendered() {
        let page = render_page("", PageBody::Error(EMPTY_INPUT_MESSAGE));
        assert!(page.contains("Please provide input text first."));
    }

    #[test]
    fn test_research_in_details_panel() {
        let outcome = AuditOutcome {
            audit_id: Uuid::new_v4(),
            query: "q".to_string(),
            plan: String::new(),
            research: "--- Search for: <q> ---".to_string(),
            verdict: "| # | Claim | Verdict | Reason |\n|---|---|---|---|\n| 1 | q | REAL | ok |".to_string(),
            skipped_queries: 0,
            skipped: vec![],
        };
        let page = render_page("q", PageBody::Outcome(&outcome));
        assert!(page.contains("<details>"));
        assert!(page.contains("--- Search for: &lt;q&gt; ---"));
        assert!(page.contains("<td>1</td><td>q</td><td>REAL</td><td>ok</td>"));
        assert!(!page.contains("<pre class=\"verdict\">"));
    }

    #[test]
    fn test_verdict_table_rendered_as_html_table() {
        let verdict = "| # | Citation/Claim | Verdict | Specific Reason |\n\
                       |---|:---|---|---|\n\
                       | 1 | Smith <2020> | FAKE | DOI & title mismatch |\n\
                       | 2 | Vaswani, 2017 | REAL | Found in CrossRef |\n\
                       \n\
                       Overall: 1 of 2 citations look fabricated.";

        let html = render_verdict(verdict);

        assert_eq!(html.matches("<table>").count(), 1);
        assert!(html.contains(
            "<tr><th>#</th><th>Citation/Claim</th><th>Verdict</th><th>Specific Reason</th></tr>"
        ));
        assert!(html.contains(
            "<tr><td>1</td><td>Smith &lt;2020&gt;</td><td>FAKE</td><td>DOI &amp; title mismatch</td></tr>"
        ));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(!html.contains("---"));
        assert!(html.ends_with("<p>Overall: 1 of 2 citations look fabricated.</p>\n"));
    }

    #[test]
    fn test_verdict_without_table_is_paragraphs() {
        let html = render_verdict("No citations found.\n\n<script>x</script>");
        assert_eq!(html, "<p>No citations found.</p>\n<p>&lt;script&gt;x&lt;/script&gt;</p>\n");
    }
}
