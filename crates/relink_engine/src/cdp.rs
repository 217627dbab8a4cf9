//! Chrome DevTools Protocol implementation of [`EditorDriver`].
//!
//! Attaches to an already-running, user-authenticated Chrome (started with
//! `--remote-debugging-port`) and reuses its first page, so the editor
//! session carries the operator's login. Region discovery, text-node
//! walking and selection happen through injected page scripts; typing goes
//! through CDP `Input.insertText` so it lands on the live selection.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
use chromiumoxide::{Browser, Page};
use futures_util::StreamExt;
use relink_logging::{relink_debug, relink_warn};
use serde::Deserialize;
use tokio::time::Instant;

use crate::driver::{
    CandidateField, DriverError, EditorDriver, RegionHandle, RunHandle, SaveControl, TextRun,
};

const TEXTBOX_SELECTOR: &str = "#textbox";
const SAVE_SELECTOR: &str = "#save";
const STUDIO_BASE: &str = "https://studio.youtube.com/video";

#[derive(Debug, Clone)]
pub struct CdpSettings {
    /// Browser-level websocket endpoint, the `webSocketDebuggerUrl`
    /// reported by `http://127.0.0.1:9222/json/version`.
    pub debugger_ws_url: String,
    /// How long to wait for the editor surface after navigation.
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for CdpSettings {
    fn default() -> Self {
        Self {
            debugger_ws_url: "ws://127.0.0.1:9222/devtools/browser".to_string(),
            navigation_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Outcome of an injected DOM operation.
#[derive(Debug, Deserialize)]
struct EvalStatus {
    ok: bool,
    #[serde(default)]
    reason: String,
}

pub struct CdpDriver {
    // Dropping the browser handle closes the CDP session; keep it for the
    // driver's whole lifetime.
    _browser: Browser,
    page: Page,
    settings: CdpSettings,
}

impl CdpDriver {
    /// Connects to the running browser and adopts its first page, or
    /// opens one when none exists.
    pub async fn connect(settings: CdpSettings) -> Result<Self, DriverError> {
        let (browser, mut handler) = Browser::connect(settings.debugger_ws_url.as_str())
            .await
            .map_err(|e| {
                DriverError::ConnectionLost(format!(
                    "could not attach to {}: {e}",
                    settings.debugger_ws_url
                ))
            })?;

        // The handler must be pumped for the whole session or every CDP
        // call stalls.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    relink_warn!("CDP handler event error: {err}");
                }
            }
            relink_warn!("CDP event loop exited (browser gone or stream closed)");
        });

        let pages = browser
            .pages()
            .await
            .map_err(|e| DriverError::ConnectionLost(format!("could not list pages: {e}")))?;
        let page = match pages.into_iter().next() {
            Some(page) => page,
            None => browser
                .new_page("about:blank")
                .await
                .map_err(|e| DriverError::Internal(format!("could not open page: {e}")))?,
        };

        Ok(Self {
            _browser: browser,
            page,
            settings,
        })
    }

    async fn eval<T>(&self, script: &str) -> Result<T, DriverError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.page
            .evaluate(script)
            .await
            .map_err(classify_cdp_error)?
            .into_value()
            .map_err(|e| DriverError::Internal(format!("script result decode failed: {e}")))
    }

    async fn eval_status(&self, script: &str) -> Result<(), DriverError> {
        let status: EvalStatus = self.eval(script).await?;
        if status.ok {
            Ok(())
        } else {
            Err(DriverError::StaleHandle(status.reason))
        }
    }

    /// Script prelude binding `box` and `editable` for one region index.
    fn region_prelude(region: &RegionHandle) -> String {
        let selector = encode(TEXTBOX_SELECTOR);
        format!(
            r#"const box = document.querySelectorAll({selector})[{index}];
            if (!box) return {{ ok: false, reason: "region vanished" }};
            const editable =
                box.closest('[contenteditable="true"]') ||
                box.querySelector('[contenteditable="true"]') ||
                box;"#,
            index = region.0
        )
    }
}

#[async_trait::async_trait]
impl EditorDriver for CdpDriver {
    async fn navigate(&self, video_id: &str) -> Result<(), DriverError> {
        let url = format!("{STUDIO_BASE}/{video_id}/edit");
        relink_debug!("navigating to {url}");
        self.page
            .goto(url.as_str())
            .await
            .map_err(classify_cdp_error)?;

        // The studio shell renders long after the navigation commits;
        // ready means the textbox selector exists.
        let selector = encode(TEXTBOX_SELECTOR);
        let probe =
            format!("(() => document.querySelectorAll({selector}).length > 0)()");
        let deadline = Instant::now() + self.settings.navigation_timeout;
        loop {
            if self.eval::<bool>(&probe).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::NavigationTimeout(format!(
                    "editor for {video_id} not ready within {:?}",
                    self.settings.navigation_timeout
                )));
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    async fn editable_regions(&self) -> Result<Vec<CandidateField>, DriverError> {
        let selector = encode(TEXTBOX_SELECTOR);
        let script = format!(
            r#"(() => Array.from(document.querySelectorAll({selector}))
                .map(el => el.textContent || ""))()"#
        );
        let texts: Vec<String> = self.eval(&script).await?;
        Ok(texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| CandidateField {
                text,
                handle: RegionHandle(index as u32),
            })
            .collect())
    }

    async fn text_runs(&self, region: &RegionHandle) -> Result<Vec<TextRun>, DriverError> {
        let prelude = Self::region_prelude(region);
        let script = format!(
            r#"(() => {{
                {prelude}
                const runs = [];
                const walk = node => {{
                    if (node.nodeType === Node.TEXT_NODE) {{
                        runs.push(node.textContent || "");
                        return;
                    }}
                    for (const child of node.childNodes) walk(child);
                }};
                walk(editable);
                return {{ ok: true, reason: "", runs }};
            }})()"#
        );

        #[derive(Debug, Deserialize)]
        struct RunsResult {
            ok: bool,
            #[serde(default)]
            reason: String,
            #[serde(default)]
            runs: Vec<String>,
        }

        let result: RunsResult = self.eval(&script).await?;
        if !result.ok {
            return Err(DriverError::StaleHandle(result.reason));
        }
        Ok(result
            .runs
            .into_iter()
            .enumerate()
            .map(|(index, text)| TextRun {
                text,
                handle: RunHandle {
                    region: region.0,
                    run: index as u32,
                },
            })
            .collect())
    }

    async fn select_run_range(
        &self,
        run: &RunHandle,
        start: usize,
        end: usize,
    ) -> Result<(), DriverError> {
        let prelude = Self::region_prelude(&RegionHandle(run.region));
        // Seam offsets are UTF-16 code units, exactly what Range.setStart
        // and setEnd expect, so they pass through unconverted. JS string
        // .length counts the same units, so the bounds check agrees.
        let script = format!(
            r#"(() => {{
                {prelude}
                let counter = 0;
                let target = null;
                const walk = node => {{
                    if (target) return;
                    if (node.nodeType === Node.TEXT_NODE) {{
                        if (counter === {run}) target = node;
                        counter += 1;
                        return;
                    }}
                    for (const child of node.childNodes) walk(child);
                }};
                walk(editable);
                if (!target) return {{ ok: false, reason: "text run vanished" }};
                const len = (target.textContent || "").length;
                if ({start} > len || {end} > len) {{
                    return {{ ok: false, reason: "range out of bounds" }};
                }}
                try {{ box.scrollIntoView({{ block: "center" }}); }} catch (_e) {{}}
                const range = document.createRange();
                range.setStart(target, {start});
                range.setEnd(target, {end});
                const sel = window.getSelection();
                sel.removeAllRanges();
                sel.addRange(range);
                editable.focus();
                return {{ ok: true, reason: "" }};
            }})()"#,
            run = run.run,
        );
        self.eval_status(&script).await
    }

    async fn select_region_start(&self, region: &RegionHandle) -> Result<(), DriverError> {
        let prelude = Self::region_prelude(region);
        let script = format!(
            r#"(() => {{
                {prelude}
                try {{ box.scrollIntoView({{ block: "center" }}); }} catch (_e) {{}}
                editable.focus();
                const range = document.createRange();
                range.selectNodeContents(editable);
                range.collapse(true);
                const sel = window.getSelection();
                sel.removeAllRanges();
                sel.addRange(range);
                return {{ ok: true, reason: "" }};
            }})()"#
        );
        self.eval_status(&script).await
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        self.page
            .execute(InsertTextParams::new(text))
            .await
            .map_err(classify_cdp_error)?;
        // Give the editor's input handlers a beat before the next probe.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(())
    }

    async fn save_control(&self) -> Result<SaveControl, DriverError> {
        let selector = encode(SAVE_SELECTOR);
        let script = format!(
            r#"(() => {{
                const btn = document.querySelector({selector});
                if (!btn) return "missing";
                const state = btn.getAttribute("aria-disabled");
                if (state === "true") return "disabled";
                if (state === "false") return "enabled";
                return "missing";
            }})()"#
        );
        let state: String = self.eval(&script).await?;
        Ok(match state.as_str() {
            "enabled" => SaveControl::Enabled,
            "disabled" => SaveControl::Disabled,
            _ => SaveControl::Missing,
        })
    }

    async fn trigger_save(&self) -> Result<(), DriverError> {
        let selector = encode(SAVE_SELECTOR);
        // The visible control hosts the real button; click that when
        // present, the host otherwise.
        let script = format!(
            r#"(() => {{
                const host = document.querySelector({selector});
                if (!host) return {{ ok: false, reason: "save control missing" }};
                const inner = host.querySelector("button");
                if (inner) inner.click(); else host.click();
                return {{ ok: true, reason: "" }};
            }})()"#
        );
        self.eval_status(&script).await
    }
}

fn encode(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

fn classify_cdp_error(err: chromiumoxide::error::CdpError) -> DriverError {
    let msg = err.to_string();
    let lowered = msg.to_lowercase();
    if lowered.contains("connection") || lowered.contains("websocket") || lowered.contains("closed")
    {
        DriverError::ConnectionLost(msg)
    } else {
        DriverError::Internal(msg)
    }
}
