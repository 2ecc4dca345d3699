use axum::response::Html;

/// `GET /`
pub async fn upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE_HTML)
}

// ---------------------------------------------------------------------------
// Upload page HTML (self-contained, no external resources)
// ---------------------------------------------------------------------------

pub const UPLOAD_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="ms">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Pemakluman Keputusan OSC</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917;
      min-height: 100vh; display: flex; flex-direction: column;
      align-items: center; padding: 48px 24px;
    }
    h1 { font-size: 24px; margin-bottom: 8px; }
    p { color: #78716c; font-size: 14px; margin-bottom: 24px; text-align: center; }
    form { display: flex; flex-direction: column; gap: 12px; width: 100%; max-width: 420px; }
    input[type=file] {
      padding: 16px; border: 2px dashed #d6d3d1; border-radius: 12px; background: #fff;
    }
    .actions { display: flex; gap: 12px; }
    .btn {
      flex: 1; padding: 14px; border: none; border-radius: 12px; cursor: pointer;
      font-size: 15px; font-weight: 600;
    }
    .btn-primary { background: #4a7c59; color: #fff; }
    .btn-secondary { background: #e7e5e4; color: #1c1917; }
    .btn:disabled { opacity: 0.5; cursor: default; }
    #result { width: 100%; max-width: 720px; margin-top: 32px; font-size: 14px; }
    #result table { width: 100%; border-collapse: collapse; margin-top: 12px; }
    #result th, #result td { text-align: left; padding: 8px; border-bottom: 1px solid #e7e5e4; vertical-align: top; }
    .banner { padding: 12px 16px; border-radius: 12px; background: #ecfdf5; color: #065f46; }
    .error { background: #fef2f2; color: #991b1b; }
  </style>
</head>
<body>
  <h1>Pemakluman Keputusan OSC</h1>
  <p>Muat naik agenda mesyuarat (.docx) untuk menjana surat pemakluman bagi setiap kertas PKM dan BGN.</p>

  <form id="agenda-form" method="post" action="/api/agenda/letters" enctype="multipart/form-data">
    <input type="file" name="agenda" id="agenda" accept=".docx,.txt" required>
    <div class="actions">
      <button type="button" class="btn btn-secondary" id="preview-btn">Semak</button>
      <button type="submit" class="btn btn-primary" id="generate-btn">Jana Surat (ZIP)</button>
    </div>
  </form>

  <div id="result"></div>

  <script>
    const form = document.getElementById('agenda-form');
    const result = document.getElementById('result');

    function escapeHtml(value) {
      const div = document.createElement('div');
      div.textContent = value == null ? '' : String(value);
      return div.innerHTML;
    }

    function showError(body) {
      const message = body && body.error ? body.error.message : 'Permintaan gagal.';
      result.innerHTML = '<div class="banner error">' + escapeHtml(message) + '</div>';
    }

    document.getElementById('preview-btn').addEventListener('click', async () => {
      if (!form.reportValidity()) return;
      result.textContent = 'Menyemak...';
      const response = await fetch('/api/agenda/preview', { method: 'POST', body: new FormData(form) });
      const body = await response.json().catch(() => null);
      if (!response.ok) { showError(body); return; }

      const m = body.meeting;
      let html = '<div class="banner">Mesyuarat ' + escapeHtml(m.meeting_label) + ', '
        + escapeHtml(m.formatted_date) + ' (' + escapeHtml(m.weekday_name) + '): '
        + body.cases.length + ' kertas dijana, ' + body.discarded_headers.length + ' diabaikan.</div>';
      html += '<table><tr><th>Rujukan</th><th>Kertas</th><th>Perunding</th><th>Pemohon</th><th>ID</th></tr>';
      for (const c of body.cases) {
        html += '<tr><td>' + escapeHtml(c.reference) + '</td><td>' + escapeHtml(c.paper_code)
          + '</td><td>' + escapeHtml(c.fields.consultant_name) + '</td><td>'
          + escapeHtml(c.fields.applicant_name) + '</td><td>' + escapeHtml(c.fields.reference_id) + '</td></tr>';
      }
      result.innerHTML = html + '</table>';
    });
  </script>
</body>
</html>
"#;
