use crate::models::RosterView;

pub fn render_index(view: &RosterView) -> String {
    // Embedded inside a <script> element, so a closing tag must not appear.
    let state = serde_json::to_string(view)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    let limit_hidden = if view.features.has_limit { "" } else { "hidden" };

    INDEX_HTML
        .replace("{{LIMIT_HIDDEN}}", limit_hidden)
        .replace("{{STATE}}", &state)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Team Delays</title>
  <style>
    :root {
      --bg: #f3f4f6;
      --ink: #1f2933;
      --card: #ffffff;
      --add: #16a34a;
      --remove: #dc2626;
      --warn: #eab308;
      --muted: #6b7280;
      --shadow: 0 8px 24px rgba(31, 41, 51, 0.12);
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
      padding: 24px;
    }

    .controls {
      display: grid;
      gap: 8px;
      max-width: 420px;
      margin-bottom: 20px;
    }

    .controls label {
      font-weight: 600;
    }

    .row {
      display: flex;
      gap: 8px;
    }

    input {
      padding: 8px 10px;
      border: 1px solid #d1d5db;
      border-radius: 6px;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 6px;
      padding: 8px 12px;
      font-size: 0.95rem;
      cursor: pointer;
      color: white;
      background: var(--add);
    }

    button.danger {
      background: var(--remove);
    }

    button.ghost {
      background: transparent;
      color: var(--ink);
      padding: 4px 8px;
    }

    .alert {
      background: var(--warn);
      color: white;
      padding: 14px;
      border-radius: 6px;
      box-shadow: var(--shadow);
      max-width: 520px;
      margin-bottom: 20px;
    }

    .layout {
      display: flex;
      flex-wrap: wrap;
      gap: 24px;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 16px;
      width: 340px;
      max-height: 600px;
      overflow-y: auto;
      background: var(--card);
      border-radius: 8px;
      box-shadow: var(--shadow);
    }

    li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 8px;
      margin-bottom: 8px;
      background: var(--bg);
      border-radius: 6px;
    }

    .points {
      display: flex;
      align-items: center;
      gap: 4px;
    }

    .chart-card {
      flex: 1;
      min-width: 320px;
      max-width: 700px;
      background: var(--card);
      border-radius: 8px;
      box-shadow: var(--shadow);
      padding: 16px;
    }

    #chart text {
      font-size: 12px;
      fill: var(--muted);
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <section class="controls">
    <label for="new-name">Add Team Member</label>
    <form id="add-form" class="row">
      <input id="new-name" type="text" placeholder="New team member" />
      <button type="submit">Add Team Member</button>
    </form>

    <div class="controls" {{LIMIT_HIDDEN}}>
      <label for="limit">Delay Limit</label>
      <input id="limit" type="number" />
      <label for="punishment">Punishment</label>
      <input id="punishment" type="text" placeholder="Punishment" />
      <button id="reset" class="danger" type="button">Clear Points</button>
    </div>
  </section>

  <div id="alert" class="alert" hidden></div>

  <div class="layout">
    <ul id="members"></ul>
    <div class="chart-card">
      <svg id="chart" viewBox="0 0 600 320" role="img" aria-label="Delays in the team"></svg>
    </div>
  </div>

  <script>
    let view = {{STATE}};

    const membersEl = document.getElementById('members');
    const alertEl = document.getElementById('alert');
    const chartEl = document.getElementById('chart');
    const nameInput = document.getElementById('new-name');
    const limitInput = document.getElementById('limit');
    const punishmentInput = document.getElementById('punishment');

    const escapeHtml = (text) =>
      text.replace(/[&<>"']/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c]));

    const call = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body === undefined ? {} : { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      view = await res.json();
      render();
    };

    const renderMembers = () => {
      membersEl.innerHTML = view.members
        .map((member) => {
          const editing = view.editing && view.editing.id === member.id;
          const label = editing
            ? `<input data-edit="${member.id}" type="text" value="${escapeHtml(view.editing.name)}" />`
            : `<span>${escapeHtml(member.name)}</span>`;
          return `<li>
            ${label}
            <span class="points">
              <button class="ghost" data-act="add" data-id="${member.id}">+</button>
              <span>${member.points}</span>
              <button class="ghost" data-act="sub" data-id="${member.id}">&minus;</button>
              <button class="ghost" data-act="edit" data-id="${member.id}">Edit</button>
              <button class="ghost" data-act="del" data-id="${member.id}">Remove</button>
            </span>
          </li>`;
        })
        .join('');

      const editInput = membersEl.querySelector('[data-edit]');
      if (editInput) {
        const id = editInput.dataset.edit;
        let settled = false;
        const finish = (method, url, body) => {
          if (settled) {
            return;
          }
          settled = true;
          call(method, url, body);
        };
        const commit = () => finish('PUT', `/api/members/${id}/name`, { name: editInput.value });
        editInput.focus();
        editInput.addEventListener('input', () => {
          fetch('/api/edit/name', {
            method: 'PUT',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify({ name: editInput.value })
          });
        });
        editInput.addEventListener('keydown', (event) => {
          if (event.key === 'Enter') {
            event.preventDefault();
            commit();
          } else if (event.key === 'Escape') {
            finish('POST', '/api/edit/cancel');
          }
        });
        editInput.addEventListener('blur', commit);
      }
    };

    const renderBars = (series) => {
      const width = 600;
      const height = 320;
      const pad = 40;
      const top = series.max !== null ? series.max : Math.max(1, ...series.values);
      const scale = top > 0 ? (height - pad * 2) / top : 0;
      const slot = (width - pad * 2) / series.values.length;
      const bars = series.values
        .map((value, i) => {
          const h = Math.max(0, value) * scale;
          const x = pad + i * slot + slot * 0.15;
          const y = height - pad - h;
          return `<rect x="${x}" y="${y}" width="${slot * 0.7}" height="${h}" fill="${series.colors[i]}" />
            <text x="${x + slot * 0.35}" y="${height - pad + 16}" text-anchor="middle">${escapeHtml(series.labels[i])}</text>`;
        })
        .join('');
      return `<text x="${width / 2}" y="20" text-anchor="middle">${series.title}</text>${bars}`;
    };

    const renderPie = (series) => {
      const total = series.values.reduce((acc, value) => acc + Math.max(0, value), 0);
      if (total === 0) {
        return '<text x="50%" y="50%" text-anchor="middle">No delays yet</text>';
      }
      const cx = 300;
      const cy = 170;
      const r = 130;
      let angle = -Math.PI / 2;
      return series.values
        .map((value, i) => {
          const sweep = (Math.max(0, value) / total) * Math.PI * 2;
          const start = angle;
          angle += sweep;
          if (sweep === 0) {
            return '';
          }
          if (sweep >= Math.PI * 2 - 1e-9) {
            return `<circle cx="${cx}" cy="${cy}" r="${r}" fill="${series.colors[i]}" />`;
          }
          const large = sweep > Math.PI ? 1 : 0;
          const x1 = cx + r * Math.cos(start);
          const y1 = cy + r * Math.sin(start);
          const x2 = cx + r * Math.cos(angle);
          const y2 = cy + r * Math.sin(angle);
          return `<path d="M ${cx} ${cy} L ${x1} ${y1} A ${r} ${r} 0 ${large} 1 ${x2} ${y2} Z" fill="${series.colors[i]}"><title>${escapeHtml(series.labels[i])}: ${value}</title></path>`;
        })
        .join('');
    };

    const renderChart = async () => {
      const res = await fetch('/api/chart');
      if (!res.ok) {
        return;
      }
      const series = await res.json();
      if (!series.values.length) {
        chartEl.innerHTML = '<text x="50%" y="50%" text-anchor="middle">No team members yet</text>';
        return;
      }
      chartEl.innerHTML = series.kind === 'bar' ? renderBars(series) : renderPie(series);
    };

    const render = () => {
      nameInput.value = view.pending_name;
      if (view.late_limit !== undefined && document.activeElement !== limitInput) {
        limitInput.value = view.late_limit;
      }
      if (view.punishment !== undefined && document.activeElement !== punishmentInput) {
        punishmentInput.value = view.punishment;
      }
      if (view.alert) {
        alertEl.innerHTML = `One or more members have exceeded the limit of ${view.alert.late_limit} delays!<br />The punishment is: <strong>${escapeHtml(view.alert.punishment)}</strong>`;
        alertEl.hidden = false;
      } else {
        alertEl.hidden = true;
      }
      renderMembers();
      renderChart();
    };

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      call('POST', '/api/members', { name: nameInput.value });
    });

    membersEl.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-act]');
      if (!button) {
        return;
      }
      const id = button.dataset.id;
      const routes = {
        add: ['POST', `/api/members/${id}/points/add`],
        sub: ['POST', `/api/members/${id}/points/remove`],
        edit: ['POST', `/api/members/${id}/edit`],
        del: ['DELETE', `/api/members/${id}`]
      };
      const [method, url] = routes[button.dataset.act];
      call(method, url);
    });

    limitInput.addEventListener('change', () => {
      const limit = parseInt(limitInput.value, 10);
      if (!Number.isNaN(limit)) {
        call('PUT', '/api/config/limit', { limit });
      }
    });

    punishmentInput.addEventListener('input', () => {
      call('PUT', '/api/config/punishment', { punishment: punishmentInput.value });
    });

    document.getElementById('reset').addEventListener('click', () => call('POST', '/api/points/reset'));

    render();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Features;
    use crate::roster::RosterStore;

    #[test]
    fn embeds_state_without_closing_script() {
        let mut store = RosterStore::new(Features::limited());
        store.add_member("</script><b>").unwrap();
        let html = render_index(&store.view());

        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r#"<\/script><b>"#));
        assert!(!html.contains("{{STATE}}"));
    }

    #[test]
    fn edit_input_settles_once() {
        let html = render_index(&RosterStore::new(Features::limited()).view());
        assert!(html.contains("let settled = false;"));
        assert!(html.contains("finish('POST', '/api/edit/cancel')"));
        assert!(html.contains("'/api/edit/name'"));
    }

    #[test]
    fn hides_limit_controls_for_plain_variant() {
        let html = render_index(&RosterStore::new(Features::plain()).view());
        assert!(html.contains(r#"<div class="controls" hidden>"#));

        let html = render_index(&RosterStore::new(Features::limited()).view());
        assert!(html.contains(r#"<div class="controls" >"#));
    }
}
