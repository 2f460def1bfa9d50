use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            error::{BrowserError, Result},
            snapshot::{self, ElementRegistry, PageView, Snapshot},
            tools::{ToolContext, ToolRegistry, ToolResult}};
use headless_chrome::{Browser, Element, Tab};
use std::{ffi::OsStr, sync::{Arc, Mutex, MutexGuard}, time::Duration};

/// Sets an element's value and fires the events frameworks listen for
const SET_VALUE_JS: &str = r#"
function(value) {
    if (!("value" in this)) { return "not-fillable"; }
    this.value = value;
    this.dispatchEvent(new Event("input", { bubbles: true }));
    this.dispatchEvent(new Event("change", { bubbles: true }));
    return "ok";
}
"#;

/// Selects the option whose text matches exactly
const SELECT_OPTION_JS: &str = r#"
function(optionText) {
    if (this.tagName.toLowerCase() !== "select") { return "not-select"; }
    const match = Array.from(this.options).find(o => (o.text || "").trim() === optionText);
    if (!match) { return "no-option"; }
    this.value = match.value;
    this.dispatchEvent(new Event("change", { bubbles: true }));
    return "ok";
}
"#;

/// CDP input events do not synthesize dblclick from two raw clicks
const DISPATCH_DBLCLICK_JS: &str = r#"
function() {
    this.dispatchEvent(new MouseEvent("dblclick", { bubbles: true, cancelable: true, view: window }));
    return "ok";
}
"#;

/// Snapshot state of one session: at most one snapshot (and therefore one
/// identifier registry) is live at a time.
#[derive(Debug, Default)]
struct PageState {
    snapshot: Option<Snapshot>,
    epoch: u64,
}

impl PageState {
    /// Registry of the current snapshot; ids are stale when there is none
    fn registry(&self) -> Result<&ElementRegistry> {
        match &self.snapshot {
            Some(snapshot) => Ok(&snapshot.registry),
            None => Err(BrowserError::InvalidId(
                "ids are stale: the page changed since they were assigned; read the page again".to_string(),
            )),
        }
    }

    /// Drop the current snapshot; every previously issued id becomes stale
    fn invalidate(&mut self) {
        self.snapshot = None;
    }

    fn install(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Bump and return the stamp epoch for the next collection pass
    fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }
}

/// A browser session driving exactly one page.
///
/// The session owns the browser process, the single tab it operates on, and
/// the snapshot state. All id-dependent operations go through the internal
/// mutex, so no two of them can interleave on the same registry.
pub struct PageSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The one tab this session drives
    tab: Arc<Tab>,

    /// Current snapshot and stamp epoch
    state: Mutex<PageState>,

    /// Tool registry for executing page operations by name
    tool_registry: ToolRegistry,
}

impl PageSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep long agent sessions alive (the default idle timeout is 30 seconds)
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            tab,
            state: Mutex::new(PageState::default()),
            tool_registry: ToolRegistry::with_defaults(),
        })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser =
            Browser::connect(options.ws_url).map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            tab,
            state: Mutex::new(PageState::default()),
            tool_registry: ToolRegistry::with_defaults(),
        })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// The tab this session drives
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL and wait for the load to settle.
    ///
    /// Ids from the previous page become stale before the navigation starts,
    /// never after; a failed navigation still invalidates them.
    pub fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.lock_state()?;
        state.invalidate();

        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("{}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("{}: {}", url, e)))?;

        log::debug!("navigated to {}", url);
        Ok(())
    }

    /// Run a fresh collection pass over the current page, replacing the
    /// snapshot and its registry. `max_lines` of 0 means unbounded.
    pub fn refresh_snapshot(&self, max_lines: usize) -> Result<()> {
        let mut state = self.lock_state()?;
        self.capture_into(&mut state, max_lines)
    }

    /// Render a window of the current snapshot, capturing one first if the
    /// session has none yet. Windowing itself never re-queries the page.
    pub fn page_view(&self, from: usize, to: usize) -> Result<String> {
        let mut state = self.lock_state()?;
        if state.snapshot.is_none() {
            self.capture_into(&mut state, 0)?;
        }
        let snapshot = state
            .snapshot
            .as_ref()
            .ok_or_else(|| BrowserError::ConversionFailed("no snapshot after capture".to_string()))?;

        let view = PageView::slice(snapshot, from, to);
        Ok(view.render(snapshot))
    }

    /// Number of id-bearing elements in the current snapshot
    pub fn interactive_count(&self) -> Result<usize> {
        let state = self.lock_state()?;
        Ok(state.snapshot.as_ref().map_or(0, |s| s.count_interactive()))
    }

    /// Click (or double-click) the element behind an id
    pub fn click(&self, id: usize, double: bool) -> Result<String> {
        let mut state = self.lock_state()?;
        let selector = state.registry()?.resolve(id)?.selector();
        let element = self.find_live_element(&selector, id)?;

        let action = if double { "double click" } else { "click" };
        if double {
            element
                .click()
                .and_then(|e| e.click())
                .map_err(|e| BrowserError::action_failed(format!("{} on ${}", action, id), e.to_string()))?;
            element
                .call_js_fn(DISPATCH_DBLCLICK_JS, vec![], false)
                .map_err(|e| BrowserError::action_failed(format!("{} on ${}", action, id), e.to_string()))?;
        } else {
            element
                .click()
                .map_err(|e| BrowserError::action_failed(format!("{} on ${}", action, id), e.to_string()))?;
        }

        self.invalidate_if_navigated(&mut state);
        Ok(if double {
            format!("Double clicked on ${}", id)
        } else {
            format!("Clicked on ${}", id)
        })
    }

    /// Set the value of the input/textarea behind an id, optionally pressing
    /// Enter afterwards
    pub fn fill_in(&self, id: usize, value: &str, press_enter: bool) -> Result<String> {
        let mut state = self.lock_state()?;
        let selector = state.registry()?.resolve(id)?.selector();
        let element = self.find_live_element(&selector, id)?;
        let action = format!("fill in ${}", id);

        let outcome = element
            .call_js_fn(SET_VALUE_JS, vec![serde_json::json!(value)], false)
            .map_err(|e| BrowserError::action_failed(action.as_str(), e.to_string()))?;

        match outcome.value.as_ref().and_then(|v| v.as_str()) {
            Some("ok") => {}
            Some("not-fillable") => {
                return Err(BrowserError::action_failed(
                    action.as_str(),
                    "element is not an input or textarea",
                ));
            }
            other => {
                return Err(BrowserError::action_failed(
                    action.as_str(),
                    format!("unexpected fill outcome: {:?}", other),
                ));
            }
        }

        if press_enter {
            element
                .focus()
                .map_err(|e| BrowserError::action_failed(action.as_str(), format!("focus: {}", e)))?;
            self.tab
                .press_key("Enter")
                .map_err(|e| BrowserError::action_failed(action.as_str(), format!("press Enter: {}", e)))?;
        }

        self.invalidate_if_navigated(&mut state);
        Ok(if press_enter {
            format!("Filled in ${} with value \"{}\" and pressed Enter", id, value)
        } else {
            format!("Filled in ${} with value \"{}\"", id, value)
        })
    }

    /// Select the option with the given text on the select behind an id
    pub fn select_option(&self, id: usize, option_text: &str) -> Result<String> {
        let mut state = self.lock_state()?;
        let selector = state.registry()?.resolve(id)?.selector();
        let element = self.find_live_element(&selector, id)?;
        let action = format!("select from ${}", id);

        let outcome = element
            .call_js_fn(SELECT_OPTION_JS, vec![serde_json::json!(option_text)], false)
            .map_err(|e| BrowserError::action_failed(action.as_str(), e.to_string()))?;

        match outcome.value.as_ref().and_then(|v| v.as_str()) {
            Some("ok") => {}
            Some("not-select") => {
                return Err(BrowserError::action_failed(action.as_str(), "element is not a select"));
            }
            Some("no-option") => {
                return Err(BrowserError::action_failed(
                    action.as_str(),
                    format!("no option with text \"{}\"", option_text),
                ));
            }
            other => {
                return Err(BrowserError::action_failed(
                    action.as_str(),
                    format!("unexpected select outcome: {:?}", other),
                ));
            }
        }

        self.invalidate_if_navigated(&mut state);
        Ok(format!("Selected \"{}\" from ${}", option_text, id))
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }

    /// Close the browser by closing its tab; the process exits when the
    /// Browser instance is dropped
    pub fn close(&self) -> Result<()> {
        let _ = self.tab.close(false);
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, PageState>> {
        self.state
            .lock()
            .map_err(|_| BrowserError::TabOperationFailed("session state poisoned".to_string()))
    }

    fn capture_into(&self, state: &mut PageState, max_lines: usize) -> Result<()> {
        let epoch = state.next_epoch();
        let snapshot = snapshot::capture(&self.tab, epoch, max_lines)?;
        log::debug!(
            "captured snapshot of {}: {} lines, {} interactive",
            snapshot.page_url,
            snapshot.line_count(),
            snapshot.count_interactive()
        );
        state.install(snapshot);
        Ok(())
    }

    fn find_live_element(&self, selector: &str, id: usize) -> Result<Element<'_>> {
        self.tab.find_element(selector).map_err(|_| {
            BrowserError::ElementNotFound(format!(
                "element ${} is no longer attached to the page",
                id
            ))
        })
    }

    /// An action may have triggered a navigation; if the tab's URL no longer
    /// matches the snapshot's, every issued id is stale right now.
    fn invalidate_if_navigated(&self, state: &mut PageState) {
        if let Some(snapshot) = &state.snapshot {
            let current = self.tab.get_url();
            if current != snapshot.page_url {
                log::debug!(
                    "navigation detected ({} -> {}), snapshot dropped",
                    snapshot.page_url,
                    current
                );
                state.invalidate();
            }
        }
    }
}
