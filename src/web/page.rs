//! Page layout: widget descriptions and the dashboard HTML.

use crate::data::ALL_SITES;
use serde::Serialize;

/// One entry of the launch site dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// `All Sites` followed by every site in table order.
pub fn site_options(sites: &[String]) -> Vec<DropdownOption> {
    std::iter::once(DropdownOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    })
    .chain(sites.iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect()
}

/// Payload range slider scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderConfig {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub marks: Vec<u32>,
}

impl SliderConfig {
    pub fn new(max: u32, step: u32) -> Self {
        let step = step.max(1);
        let marks = (0..=max).step_by(step as usize).collect();
        Self {
            min: 0,
            max,
            step,
            marks,
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::new(10000, 1000)
    }
}

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SpaceX Launch Records Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
        }
        h1 { text-align: center; color: #503D36; font-size: 40px; }
        .control { margin: 0 auto 20px; max-width: 1100px; }
        input[type=search], select {
            width: 100%;
            padding: 8px;
            border: 1px solid #ddd;
            border-radius: 4px;
            font-size: 14px;
        }
        .slider { position: relative; height: 40px; }
        .slider input[type=range] {
            position: absolute;
            width: 100%;
            pointer-events: none;
            background: none;
        }
        .slider input[type=range]::-webkit-slider-thumb { pointer-events: all; }
        .slider input[type=range]::-moz-range-thumb { pointer-events: all; }
        .marks { display: flex; justify-content: space-between; font-size: 12px; color: #666; }
        .status { color: #666; font-size: 14px; }
        .graph { max-width: 1100px; height: 450px; margin: 0 auto 20px; }
    </style>
</head>
<body>
    <h1>SpaceX Launch Records Dashboard</h1>

    <div class="control">
        <input type="search" id="site-search" placeholder="Select a Launch Site here">
        <select id="site-dropdown"></select>
    </div>

    <div class="control" id="payload-slider">
        <label>Payload range (Kg): <span id="payload-value"></span></label>
        <div class="slider">
            <input type="range" id="payload-low">
            <input type="range" id="payload-high">
        </div>
        <div class="marks" id="payload-marks"></div>
    </div>

    <div class="status" id="status">Loading...</div>
    <div class="graph" id="success-pie-chart"></div>
    <div class="graph" id="success-payload-scatter-chart"></div>

    <script>
        const dropdown = document.getElementById('site-dropdown');
        const search = document.getElementById('site-search');
        const low = document.getElementById('payload-low');
        const high = document.getElementById('payload-high');
        let siteOptions = [];
        let selectedSite = 'ALL';
        let payload = [0, 0];
        // Latest request number per graph; older responses are dropped
        const latest = {};

        function setStatus(text) {
            document.getElementById('status').textContent = text;
        }

        // Filtering narrows the list but never changes the selection
        function renderOptions(filter) {
            const needle = (filter || '').toLowerCase();
            const visible = siteOptions.filter(o =>
                o.value === 'ALL' ||
                o.value === selectedSite ||
                o.label.toLowerCase().includes(needle));
            dropdown.replaceChildren(...visible.map(o => new Option(o.label, o.value)));
            dropdown.value = selectedSite;
        }

        function readPayload() {
            let a = Number(low.value);
            let b = Number(high.value);
            if (a > b) { [a, b] = [b, a]; }
            return [a, b];
        }

        function showPayload(range) {
            document.getElementById('payload-value').textContent =
                `${range[0]} - ${range[1]}`;
        }

        async function fetchJson(url) {
            const response = await fetch(url);
            if (!response.ok) {
                throw new Error(await response.text());
            }
            return response.json();
        }

        async function plot(id, url) {
            const seq = (latest[id] || 0) + 1;
            latest[id] = seq;
            const figure = await fetchJson(url);
            if (latest[id] !== seq) {
                return;
            }
            Plotly.react(id, figure.data, figure.layout);
        }

        function updatePie() {
            const site = encodeURIComponent(selectedSite);
            return plot('success-pie-chart', `/api/charts/pie?site=${site}`);
        }

        function updateScatter() {
            const site = encodeURIComponent(selectedSite);
            return plot('success-payload-scatter-chart',
                `/api/charts/scatter?site=${site}&low=${payload[0]}&high=${payload[1]}`);
        }

        async function refresh(charts) {
            try {
                await Promise.all(charts.map(update => update()));
                setStatus('');
            } catch (err) {
                console.error('Error:', err);
                setStatus('Error: ' + err.message);
            }
        }

        function onSliderInput() {
            showPayload(readPayload());
        }

        function onSliderChange() {
            payload = readPayload();
            showPayload(payload);
            refresh([updateScatter]);
        }

        function onSiteChange() {
            if (!dropdown.value) {
                return;
            }
            selectedSite = dropdown.value;
            refresh([updatePie, updateScatter]);
        }

        async function init() {
            const options = await fetchJson('/api/options');
            siteOptions = options.site_options;
            selectedSite = options.default_site;
            renderOptions('');

            for (const input of [low, high]) {
                input.min = options.slider.min;
                input.max = options.slider.max;
                input.step = options.slider.step;
                input.addEventListener('input', onSliderInput);
                input.addEventListener('change', onSliderChange);
            }
            payload = [options.payload_default.low, options.payload_default.high];
            low.value = payload[0];
            high.value = payload[1];
            const marks = document.getElementById('payload-marks');
            marks.replaceChildren(...options.slider.marks.map(m => {
                const span = document.createElement('span');
                span.textContent = m;
                return span;
            }));
            showPayload(payload);

            search.addEventListener('input', () => renderOptions(search.value));
            dropdown.addEventListener('change', onSiteChange);

            await refresh([updatePie, updateScatter]);
            setStatus(`${options.row_count} launches loaded`);
        }

        init().catch(err => setStatus('Error: ' + err.message));
    </script>
</body>
</html>
"##;
