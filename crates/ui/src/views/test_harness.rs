use std::sync::{Arc, Mutex};
use std::time::Duration;

use content::{CatalogSource, InMemoryCatalogSource};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::StepCatalog;
use services::FunnelConfig;

use crate::context::{UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

/// Records opened links instead of launching a browser.
#[derive(Default)]
pub struct RecordingLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingLinkOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UiLinkOpener for RecordingLinkOpener {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

struct TestApp {
    source: Arc<InMemoryCatalogSource>,
    config: FunnelConfig,
    opener: Arc<RecordingLinkOpener>,
}

impl UiApp for TestApp {
    fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        self.source.clone()
    }

    fn funnel_config(&self) -> FunnelConfig {
        self.config.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        self.opener.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
    pub opener: Arc<RecordingLinkOpener>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered html satisfies `done`, or give up after a few seconds.
    pub async fn render_until(&mut self, done: impl Fn(&str) -> bool) -> String {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        while tokio::time::Instant::now() < deadline {
            let html = self.render();
            if done(&html) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(catalog: StepCatalog, config: FunnelConfig) -> ViewHarness {
    let handles = QuizTestHandles::default();
    let opener = Arc::new(RecordingLinkOpener::default());
    let app = Arc::new(TestApp {
        source: Arc::new(InMemoryCatalogSource::new(catalog)),
        config,
        opener: Arc::clone(&opener),
    });
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        handles,
        opener,
    }
}
