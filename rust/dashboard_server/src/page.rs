// src/page.rs
//
// The single dashboard page. Dropdown options come from /api/options; every
// dropdown change re-requests /api/dashboard and redraws all cards and charts.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Stock Price Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
<style>
  body { font-family: "Segoe UI", Arial, sans-serif; margin: 0; padding: 20px; transition: background 0.2s, color 0.2s; }
  body.day-theme { background: #f5f7fa; color: #1f2933; }
  body.night-theme { background: #1a1d23; color: #e4e7eb; }
  .header-title { text-align: center; margin-bottom: 10px; }
  .theme { text-align: center; margin-bottom: 20px; }
  .theme label { display: inline-block; margin-right: 15px; }
  .filters { display: flex; justify-content: center; gap: 20px; margin-bottom: 20px; }
  .dropdown { display: flex; flex-direction: column; min-width: 180px; }
  .dropdown select { padding: 6px; font-size: 14px; }
  .stats-container { display: flex; justify-content: center; gap: 16px; margin-bottom: 20px; }
  .card { padding: 12px 24px; border-radius: 8px; background: #ffffff; color: #1f2933; box-shadow: 0 1px 4px rgba(0,0,0,0.15); text-align: center; min-width: 120px; }
  .card h4 { margin: 0 0 6px 0; }
  .card p { margin: 0; font-size: 18px; }
  .card.green { border-top: 4px solid #2f9e44; }
  .card.red { border-top: 4px solid #e03131; }
  body.night-theme .card { background: #2a2f38; color: #e4e7eb; }
  .placeholder { text-align: center; font-style: italic; }
  .error { text-align: center; color: #e03131; }
</style>
</head>
<body class="day-theme">
<h1 class="header-title">Stock Price Dashboard</h1>

<div class="theme">
  <label>Theme:</label>
  <label><input type="radio" name="theme-toggle" value="day-theme" checked> Day</label>
  <label><input type="radio" name="theme-toggle" value="night-theme"> Night</label>
</div>

<div class="filters">
  <div class="dropdown">
    <label for="ticker-dropdown">Select Ticker:</label>
    <select id="ticker-dropdown"></select>
  </div>
  <div class="dropdown">
    <label for="year-dropdown">Select Year:</label>
    <select id="year-dropdown"></select>
  </div>
  <div class="dropdown">
    <label for="month-dropdown">Select Month:</label>
    <select id="month-dropdown"></select>
  </div>
</div>

<div id="stats-cards" class="stats-cards"></div>

<div>
  <div id="volume-chart"></div>
  <div id="scatter-chart"></div>
  <div id="candlestick-chart"></div>
  <div id="prediction-chart"></div>
</div>

<script>
  const charts = {
    "volume-chart": "volume_chart",
    "scatter-chart": "scatter_chart",
    "candlestick-chart": "candlestick_chart",
    "prediction-chart": "prediction_chart"
  };

  function fill(select, values, selected) {
    select.innerHTML = "";
    for (const value of values) {
      const option = document.createElement("option");
      option.value = value;
      option.textContent = value;
      if (String(value) === String(selected)) option.selected = true;
      select.appendChild(option);
    }
  }

  function renderStats(panel) {
    const container = document.getElementById("stats-cards");
    container.innerHTML = "";
    if (panel.kind === "placeholder") {
      const div = document.createElement("div");
      div.className = "placeholder";
      div.textContent = panel.message;
      container.appendChild(div);
      return;
    }
    const row = document.createElement("div");
    row.className = "stats-container";
    for (const card of panel.cards) {
      const div = document.createElement("div");
      div.className = card.class;
      const h4 = document.createElement("h4");
      h4.textContent = card.label;
      const p = document.createElement("p");
      p.textContent = card.value;
      div.appendChild(h4);
      div.appendChild(p);
      row.appendChild(div);
    }
    container.appendChild(row);
  }

  function renderError(message) {
    const container = document.getElementById("stats-cards");
    container.innerHTML = "";
    const div = document.createElement("div");
    div.className = "error";
    div.textContent = message;
    container.appendChild(div);
  }

  async function refresh() {
    const params = new URLSearchParams({
      ticker: document.getElementById("ticker-dropdown").value,
      year: document.getElementById("year-dropdown").value,
      month: document.getElementById("month-dropdown").value
    });
    const response = await fetch("/api/dashboard?" + params.toString());
    const body = await response.json();
    if (!response.ok) {
      renderError(body.message || "Request failed");
      return;
    }
    renderStats(body.stats);
    for (const [id, key] of Object.entries(charts)) {
      const figure = body[key];
      Plotly.react(id, figure.data, figure.layout);
    }
  }

  async function init() {
    const response = await fetch("/api/options");
    const body = await response.json();
    const selection = body.default_selection || {};
    fill(document.getElementById("ticker-dropdown"), body.options.tickers, selection.ticker);
    fill(document.getElementById("year-dropdown"), body.options.years, selection.year);
    fill(document.getElementById("month-dropdown"), body.options.months, selection.month);
    for (const id of ["ticker-dropdown", "year-dropdown", "month-dropdown"]) {
      document.getElementById(id).addEventListener("change", refresh);
    }
    await refresh();
  }

  for (const radio of document.querySelectorAll('input[name="theme-toggle"]')) {
    radio.addEventListener("change", (event) => {
      document.body.className = event.target.value;
    });
  }

  init();
</script>
</body>
</html>
"##;
