/// Built-in upload page, served when no web directory is configured.
pub const UPLOAD_PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Character Sheet Generator</title>
  <style>
    body { font-family: Georgia, serif; background: #e9e2d3; color: #2b2118; margin: 0; }
    main { max-width: 720px; margin: 3em auto; padding: 2em; background: #fbf7ef; border: 1px solid #d8cbb3; }
    h1 { color: #7a1f1f; }
    form { display: flex; gap: 1em; align-items: center; flex-wrap: wrap; }
    #status { margin-top: 1em; min-height: 1.5em; }
    #status.error { color: #a40000; }
    #result { display: none; margin-top: 1em; }
    iframe { width: 100%; height: 600px; border: 1px solid #d8cbb3; background: white; }
  </style>
</head>
<body>
<main>
  <h1>Character Sheet Generator</h1>
  <p>Upload a character export (<code>.xml</code>) to get a printable HTML character sheet.</p>
  <form id="upload-form">
    <input type="file" id="xml-file" name="xmlFile" accept=".xml" required>
    <button type="submit">Generate</button>
  </form>
  <div id="status"></div>
  <div id="result">
    <p><a id="download" href="#">Download sheet</a></p>
    <iframe id="preview" title="Character sheet preview"></iframe>
  </div>
</main>
<script>
  var form = document.getElementById('upload-form');
  var statusEl = document.getElementById('status');
  var result = document.getElementById('result');
  form.addEventListener('submit', function (event) {
    event.preventDefault();
    var input = document.getElementById('xml-file');
    if (!input.files.length) { return; }
    var data = new FormData();
    data.append('xmlFile', input.files[0]);
    statusEl.className = '';
    statusEl.textContent = 'Generating...';
    result.style.display = 'none';
    fetch('/upload', { method: 'POST', body: data })
      .then(function (res) { return res.json(); })
      .then(function (body) {
        if (!body.success) { throw new Error(body.error || 'Conversion failed'); }
        var blob = new Blob([body.html], { type: 'text/html' });
        var link = document.getElementById('download');
        link.href = URL.createObjectURL(blob);
        link.download = body.filename;
        link.textContent = 'Download ' + body.filename;
        document.getElementById('preview').srcdoc = body.html;
        statusEl.textContent = body.name ? 'Generated sheet for ' + body.name : 'Generated sheet';
        result.style.display = 'block';
      })
      .catch(function (err) {
        statusEl.className = 'error';
        statusEl.textContent = err.message;
      });
  });
</script>
</body>
</html>
"##;
