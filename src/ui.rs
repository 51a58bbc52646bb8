use crate::errors::AppError;
use crate::page::Page;
use crate::timezone::TimezoneSelect;
use htmlescape::encode_attribute;
use std::{borrow::Cow, path::Path};
use tokio::fs;

/// Loads the page template, from `asset_dir` when running in development mode.
pub async fn load_template(asset_dir: Option<&Path>) -> Result<Cow<'static, str>, AppError> {
    match asset_dir {
        Some(dir) => {
            let template = fs::read_to_string(dir.join("index.html")).await?;
            Ok(Cow::Owned(template))
        }
        None => Ok(Cow::Borrowed(INDEX_HTML)),
    }
}

/// Fills the `{{NAME}}` placeholders of `template` in one pass, so text that
/// came from the visitor is never scanned for placeholders.
pub fn render_page(template: &str, page: &Page) -> String {
    let mut html = String::with_capacity(template.len() + 32 * 1024);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let Some(end) = tail.find("}}") else {
            html.push_str(&rest[start..]);
            return html;
        };

        let name = &tail[..end];
        match placeholder(name, page) {
            Some(value) => html.push_str(&value),
            None => html.push_str(&rest[start..start + end + 4]),
        }
        rest = &tail[end + 2..];
    }

    html.push_str(rest);
    html
}

fn placeholder(name: &str, page: &Page) -> Option<String> {
    let value = match name {
        "DAY_LABEL" => page.current_day_label.clone(),
        "CLIENT_ZONE" => encode_attribute(page.client_zone.as_deref().unwrap_or_default()),
        "NUMBER_VALUE" => encode_attribute(page.number.raw_value()),
        "NUMBER_PLACEHOLDER" => encode_attribute(page.number.placeholder()),
        "TIMEZONE_OPTIONS" => timezone_options(page.timezone.value()),
        "FORM_HIDDEN" => hidden_class(page.subscribe_form_hidden).to_string(),
        "PROGRESS_HIDDEN" => hidden_class(page.progress_indicator_hidden).to_string(),
        "LOADER_STATE" => {
            if page.loader_complete { " load-complete" } else { "" }.to_string()
        }
        "CHECKMARK_DISPLAY" => {
            if page.checkmark_visible { "block" } else { "none" }.to_string()
        }
        _ => return None,
    };
    Some(value)
}

fn hidden_class(hidden: bool) -> &'static str {
    if hidden { " hidden" } else { "" }
}

fn timezone_options(selected: &str) -> String {
    let mut html = format!(
        "<option value=\"\"{}>{}</option>",
        if selected.is_empty() { " selected" } else { "" },
        TimezoneSelect::DEFAULT_LABEL
    );
    for name in TimezoneSelect::options() {
        let marker = if name == selected { " selected" } else { "" };
        html.push_str(&format!("\n          <option value=\"{name}\"{marker}>{name}</option>"));
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>What Day Is It?</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2d7a4b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h1 span {
      color: var(--accent);
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    form {
      display: grid;
      gap: 16px;
    }

    label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    input,
    select {
      width: 100%;
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 14px;
      padding: 14px 16px;
      font: inherit;
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .hidden {
      display: none !important;
    }

    #progress-indicator {
      display: grid;
      place-items: center;
      padding: 24px 0;
    }

    .circle-loader {
      position: relative;
      width: 7em;
      height: 7em;
      border: 2px solid rgba(0, 0, 0, 0.2);
      border-left-color: var(--ok);
      border-radius: 50%;
      animation: loader-spin 1.2s infinite linear;
    }

    .load-complete {
      animation: none;
      border-color: var(--ok);
      transition: border 500ms ease-out;
    }

    .checkmark {
      display: none;
    }

    .checkmark.draw:after {
      content: '';
      position: absolute;
      left: 1.75em;
      top: 3.5em;
      width: 1.75em;
      height: 3.5em;
      border-right: 3px solid var(--ok);
      border-top: 3px solid var(--ok);
      transform: scaleX(-1) rotate(135deg);
      transform-origin: left top;
    }

    @keyframes loader-spin {
      0% {
        transform: rotate(0deg);
      }
      100% {
        transform: rotate(360deg);
      }
    }
  </style>
</head>
<body data-client-zone="{{CLIENT_ZONE}}">
  <main class="app">
    <header>
      <h1 id="current-day-label">{{DAY_LABEL}}</h1>
      <p class="subtitle">Get a text every morning telling you what day it is.</p>
    </header>

    <section id="subscribe-form" class="subscribe-form{{FORM_HIDDEN}}">
      <form id="subscription" method="post" action="/subscribe">
        <label for="number">Phone number</label>
        <input id="number" name="number" type="tel" value="{{NUMBER_VALUE}}" placeholder="{{NUMBER_PLACEHOLDER}}" autocomplete="tel" />
        <label for="timezone">Timezone</label>
        <select id="timezone" name="timezone">
          {{TIMEZONE_OPTIONS}}
        </select>
        <button type="submit">Subscribe</button>
      </form>
    </section>

    <section id="progress-indicator" class="progress-indicator{{PROGRESS_HIDDEN}}">
      <div class="circle-loader{{LOADER_STATE}}">
        <div class="checkmark draw" style="display: {{CHECKMARK_DISPLAY}};"></div>
      </div>
    </section>
  </main>

  <script>
    const form = document.getElementById('subscription');
    const formPanel = document.getElementById('subscribe-form');
    const progress = document.getElementById('progress-indicator');
    const params = new URLSearchParams(window.location.search);
    const zone = Intl.DateTimeFormat().resolvedOptions().timeZone;

    if (zone && !document.body.dataset.clientZone && !params.has('tz')) {
      params.set('tz', zone);
      window.location.replace(`${window.location.pathname}?${params}`);
    }

    const action = `/subscribe${window.location.search}`;
    form.action = action;

    const restoreForm = () => {
      formPanel.classList.remove('hidden');
      progress.classList.add('hidden');
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      formPanel.classList.add('hidden');
      progress.classList.remove('hidden');

      try {
        const res = await fetch(action, {
          method: 'POST',
          headers: { 'content-type': 'application/x-www-form-urlencoded' },
          body: new URLSearchParams(new FormData(form))
        });
        if (!res.ok) {
          restoreForm();
          return;
        }

        const next = new DOMParser().parseFromString(await res.text(), 'text/html');
        formPanel.className = next.getElementById('subscribe-form').className;
        progress.className = next.getElementById('progress-indicator').className;
        document.querySelector('.circle-loader').className = next.querySelector('.circle-loader').className;
        document.querySelector('.checkmark').style.display = next.querySelector('.checkmark').style.display;
      } catch (err) {
        restoreForm();
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::FixedTimezone;
    use chrono::Weekday;

    fn page() -> Page {
        Page::load(Weekday::Wed, &FixedTimezone(Some("America/New_York".to_string())))
    }

    #[test]
    fn fresh_page_shows_form_and_hides_progress() {
        let html = render_page(INDEX_HTML, &page());
        assert!(html.contains(r#"<h1 id="current-day-label">Today is <span>Wednesday!</span></h1>"#));
        assert!(html.contains(r#"class="subscribe-form""#));
        assert!(html.contains(r#"class="progress-indicator hidden""#));
        assert!(html.contains(r#"class="circle-loader""#));
        assert!(html.contains(r#"style="display: none;""#));
        assert!(html.contains(&format!(
            r#"placeholder="{}""#,
            encode_attribute("(201) 555-0123")
        )));
        assert!(html.contains(&format!(
            r#"<body data-client-zone="{}">"#,
            encode_attribute("America/New_York")
        )));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn guessed_zone_is_the_selected_option() {
        let html = render_page(INDEX_HTML, &page());
        assert!(html.contains(r#"<option value="America/New_York" selected>"#));
        assert!(html.contains(r#"<option value="">Choose your timezone</option>"#));
    }

    #[test]
    fn default_option_selected_without_guess() {
        let page = Page::load(Weekday::Wed, &FixedTimezone(None));
        let html = render_page(INDEX_HTML, &page);
        assert!(html.contains(r#"<option value="" selected>Choose your timezone</option>"#));
        assert!(!html.contains(r#"" selected>America"#));
    }

    #[test]
    fn completed_page_shows_checkmark() {
        let mut page = page();
        page.begin_submission();
        page.finish_submission(&Ok(serde_json::Value::Null));
        let html = render_page(INDEX_HTML, &page);
        assert!(html.contains(r#"class="subscribe-form hidden""#));
        assert!(html.contains(r#"class="progress-indicator""#));
        assert!(html.contains(r#"class="circle-loader load-complete""#));
        assert!(html.contains(r#"style="display: block;""#));
    }

    #[test]
    fn typed_number_is_escaped() {
        let mut page = page();
        page.number.set_value(r#""><script>"#);
        let html = render_page(INDEX_HTML, &page);
        assert!(!html.contains(r#"value=""><script>"#));
    }

    #[test]
    fn placeholder_names_typed_by_the_visitor_are_not_expanded() {
        for typed in ["{{TIMEZONE_OPTIONS}}", "{{FORM_HIDDEN}}", "{{DAY_LABEL}}"] {
            let mut page = page();
            page.number.set_value(typed);
            let html = render_page(INDEX_HTML, &page);

            assert_eq!(html.matches("Choose your timezone").count(), 1);
            assert_eq!(html.matches("Today is <span>").count(), 1);
            assert!(!html.contains(r#"value="<option"#));
            assert!(html.contains(&format!(r#"value="{}""#, encode_attribute(typed))));
        }
    }

    #[test]
    fn unknown_and_unterminated_placeholders_are_left_alone() {
        let page = page();
        assert_eq!(render_page("a {{NOPE}} b", &page), "a {{NOPE}} b");
        assert_eq!(render_page("a {{DAY_LABEL", &page), "a {{DAY_LABEL");
        assert_eq!(
            render_page("{{LOADER_STATE}}|{{CHECKMARK_DISPLAY}}", &page),
            "|none"
        );
    }

    #[test]
    fn page_without_client_zone_has_empty_marker() {
        let page = Page::load(Weekday::Wed, &FixedTimezone(None));
        let html = render_page(INDEX_HTML, &page);
        assert!(html.contains(r#"<body data-client-zone="">"#));
    }

    #[tokio::test]
    async fn template_defaults_to_embedded_copy() {
        let template = load_template(None).await.unwrap();
        assert!(template.contains("{{DAY_LABEL}}"));
    }

    #[tokio::test]
    async fn missing_asset_dir_template_is_an_error() {
        let dir = std::env::temp_dir().join("what_day_is_it_missing_assets");
        assert!(load_template(Some(&dir)).await.is_err());
    }
}
