use crate::models::{BlockView, Priority, Theme};

pub fn render_index(date: &str, theme: Theme, blocks: &[BlockView]) -> String {
    let rendered: String = blocks.iter().map(render_block).collect();
    INDEX_HTML
        .replace("{{THEME}}", theme.as_str())
        .replace("{{DARK}}", &(theme == Theme::Dark).to_string())
        .replace("{{DATE}}", &escape_html(date))
        .replace("{{BLOCKS}}", &rendered)
}

fn render_block(block: &BlockView) -> String {
    let options: String = Priority::ALL
        .iter()
        .map(|priority| {
            let selected = if *priority == block.priority { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>Priority: {label}</option>"#,
                value = priority.as_str(),
                label = priority.label(),
            )
        })
        .collect();

    BLOCK_HTML
        .replace("{{HOUR}}", &block.hour.to_string())
        .replace("{{STATE_CLASS}}", block.state.css_class())
        .replace("{{LABEL}}", &escape_html(&block.label))
        .replace("{{PRIORITY}}", block.priority.as_str())
        .replace("{{PRIORITY_LABEL}}", block.priority.label())
        .replace("{{OPTIONS}}", &options)
        .replace("{{TEXT}}", &escape_html(&block.text))
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// {{TEXT}} is substituted last so user text cannot inject placeholders.
const BLOCK_HTML: &str = r#"
      <form class="timeblock {{STATE_CLASS}}" data-hour="{{HOUR}}" method="post" action="/hours/{{HOUR}}">
        <div class="time">{{LABEL}}</div>
        <textarea class="editor" name="text" rows="2" placeholder="Add a task…">{{TEXT}}</textarea>
        <div class="controls">
          <select class="select" name="priority" aria-label="Priority for {{LABEL}}">{{OPTIONS}}</select>
          <span class="priority priority-{{PRIORITY}}">{{PRIORITY_LABEL}}</span>
        </div>
        <button class="save" type="submit" aria-label="Save task for {{LABEL}}">Save</button>
      </form>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Work Day Scheduler</title>
  <style>
    :root {
      --bg: #f6f4ef;
      --card: #ffffff;
      --ink: #25231f;
      --muted: #77716a;
      --line: rgba(37, 35, 31, 0.1);
      --past: #e4e1db;
      --present: #ffd8cc;
      --future: #d6ecd9;
      --accent: #ff6b4a;
      --shadow: 0 18px 40px rgba(37, 35, 31, 0.12);
    }

    [data-theme="dark"] {
      --bg: #17181b;
      --card: #212328;
      --ink: #ecebe8;
      --muted: #9c988f;
      --line: rgba(236, 235, 232, 0.1);
      --past: #2b2d31;
      --present: #5a3328;
      --future: #24402b;
      --shadow: 0 18px 40px rgba(0, 0, 0, 0.4);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: end;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .toolbar {
      display: flex;
      gap: 8px;
    }

    button {
      appearance: none;
      border: 1px solid var(--line);
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      background: var(--card);
      color: var(--ink);
    }

    #schedule {
      position: relative;
      display: grid;
      gap: 10px;
    }

    #nowLine {
      position: absolute;
      left: 0;
      right: 0;
      top: 0;
      height: 2px;
      background: var(--accent);
      transform: translateY(-9999px);
      pointer-events: none;
      z-index: 2;
    }

    .timeblock {
      display: grid;
      grid-template-columns: 90px 1fr auto auto;
      align-items: center;
      gap: 12px;
      padding: 12px;
      border-radius: 16px;
      box-shadow: var(--shadow);
      margin: 0;
    }

    .block-past { background: var(--past); }
    .block-present { background: var(--present); }
    .block-future { background: var(--future); }

    .time {
      font-weight: 600;
    }

    .editor {
      width: 100%;
      resize: vertical;
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 8px;
      font: inherit;
      background: var(--card);
      color: var(--ink);
    }

    .controls {
      display: grid;
      gap: 6px;
      justify-items: start;
    }

    .select {
      font: inherit;
      border-radius: 8px;
      padding: 4px;
    }

    .priority {
      font-size: 0.8rem;
      padding: 2px 10px;
      border-radius: 999px;
    }

    .priority-low { background: #cfe6d4; color: #1f5131; }
    .priority-medium { background: #fbe3b0; color: #6b4b07; }
    .priority-high { background: #f8c2b4; color: #7a2412; }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    #toast {
      position: fixed;
      bottom: 24px;
      left: 50%;
      transform: translate(-50%, 40px);
      opacity: 0;
      background: var(--ink);
      color: var(--bg);
      padding: 10px 18px;
      border-radius: 999px;
      transition: opacity 150ms ease, transform 150ms ease;
    }

    #toast.show {
      opacity: 1;
      transform: translate(-50%, 0);
    }

    @media (max-width: 600px) {
      .timeblock {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Work Day Scheduler</h1>
        <p class="subtitle" id="currentDay">{{DATE}}</p>
      </div>
      <div class="toolbar">
        <button id="themeToggle" type="button" aria-pressed="{{DARK}}">Toggle theme</button>
        <button id="clearDay" type="button">Clear day</button>
      </div>
    </header>

    <div class="status" id="status"></div>

    <section id="schedule">
      <div id="nowLine"></div>{{BLOCKS}}
    </section>
  </main>
  <div id="toast" role="status"></div>

  <script>
    const scheduleEl = document.getElementById('schedule');
    const nowLine = document.getElementById('nowLine');
    const statusEl = document.getElementById('status');
    const toastEl = document.getElementById('toast');
    const themeToggle = document.getElementById('themeToggle');
    const clearDay = document.getElementById('clearDay');

    let toastTimer = null;
    const showToast = (message) => {
      toastEl.textContent = message;
      toastEl.classList.add('show');
      clearTimeout(toastTimer);
      toastTimer = setTimeout(() => toastEl.classList.remove('show'), 1300);
    };

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const priorityLabel = (value) =>
      value === 'high' ? 'High' : value === 'medium' ? 'Medium' : 'Low';

    const paintPill = (block, priority) => {
      const pill = block.querySelector('.priority');
      pill.className = `priority priority-${priority}`;
      pill.textContent = priorityLabel(priority);
    };

    const saveBlock = async (block) => {
      const hour = block.dataset.hour;
      const text = block.querySelector('.editor').value;
      const priority = block.querySelector('.select').value;
      const res = await fetch(`/api/hours/${hour}`, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ text, priority })
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Save failed');
      }
      const data = await res.json();
      block.querySelector('.editor').value = data.block.text;
      setStatus(`${data.status}.`);
      showToast(data.status);
    };

    const report = (err) => setStatus(err.message);

    const applyBlocks = (blocks) => {
      blocks.forEach((item) => {
        const block = scheduleEl.querySelector(`.timeblock[data-hour="${item.hour}"]`);
        if (!block) {
          return;
        }
        block.querySelector('.editor').value = item.text;
        block.querySelector('.select').value = item.priority;
        paintPill(block, item.priority);
      });
    };

    const placeNowLine = (now) => {
      if (!now) {
        nowLine.style.transform = 'translateY(-9999px)';
        return;
      }
      const block = scheduleEl.querySelector(`.timeblock[data-hour="${now.hour}"]`);
      if (!block) {
        return;
      }
      const rect = block.getBoundingClientRect();
      const scheduleRect = scheduleEl.getBoundingClientRect();
      const y = rect.top - scheduleRect.top + rect.height * now.fraction;
      nowLine.style.transform = `translateY(${Math.max(0, y)}px)`;
    };

    const tick = async () => {
      const res = await fetch('/api/now');
      if (!res.ok) {
        throw new Error('Unable to read the clock');
      }
      const data = await res.json();
      data.hours.forEach((item) => {
        const block = scheduleEl.querySelector(`.timeblock[data-hour="${item.hour}"]`);
        if (!block) {
          return;
        }
        block.classList.remove('block-past', 'block-present', 'block-future');
        block.classList.add(`block-${item.state}`);
      });
      placeNowLine(data.now);
      return data;
    };

    scheduleEl.querySelectorAll('.timeblock').forEach((block) => {
      const editor = block.querySelector('.editor');
      const select = block.querySelector('.select');

      block.addEventListener('submit', (event) => {
        event.preventDefault();
        saveBlock(block).catch(report);
      });

      editor.addEventListener('blur', () => saveBlock(block).catch(report));

      editor.addEventListener('keydown', (event) => {
        if ((event.metaKey || event.ctrlKey) && event.key === 'Enter') {
          event.preventDefault();
          editor.blur();
        }
      });

      select.addEventListener('change', () => {
        paintPill(block, select.value);
        saveBlock(block).catch(report);
      });
    });

    clearDay.addEventListener('click', async () => {
      const confirm = window.confirm('Clear all tasks for today?');
      try {
        const res = await fetch('/api/clear', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ confirm })
        });
        if (!res.ok) {
          throw new Error('Clear failed');
        }
        const data = await res.json();
        if (!data.cleared) {
          return;
        }
        applyBlocks(data.blocks);
        setStatus(`${data.status}.`);
        showToast(data.status);
        tick().catch(report);
      } catch (err) {
        report(err);
      }
    });

    themeToggle.addEventListener('click', async () => {
      try {
        const res = await fetch('/api/theme/toggle', { method: 'POST' });
        if (!res.ok) {
          throw new Error('Theme change failed');
        }
        const data = await res.json();
        document.documentElement.setAttribute('data-theme', data.theme);
        themeToggle.setAttribute('aria-pressed', String(data.theme === 'dark'));
        showToast(data.status);
      } catch (err) {
        report(err);
      }
    });

    tick()
      .then((data) => {
        if (data.focus_hour === null) {
          return;
        }
        setTimeout(() => {
          const block = scheduleEl.querySelector(`.timeblock[data-hour="${data.focus_hour}"]`);
          if (block) {
            block.scrollIntoView({ block: 'center', behavior: 'smooth' });
          }
        }, 250);
      })
      .catch(report);

    setInterval(() => tick().catch(report), 60000);
  </script>
</body>
</html>
"#;
