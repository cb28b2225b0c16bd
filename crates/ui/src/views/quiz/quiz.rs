use std::rc::Rc;
use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use quiz_core::model::{CheckoutLink, OptionId, StepCatalog};
use services::{SessionEvent, SessionHandle};

use super::scripts::{QUIZ_ROOT_ID, step_entered_script};
use super::steps::{
    DateStep, LoadingStep, NarrativeStep, PreRevelationStep, ProgressBar, QuestionStep,
};
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BirthDateError, StepVm, map_quiz_vm, parse_birth_date};

#[cfg(test)]
use std::cell::RefCell;

/// A running session together with the catalog it was built from.
#[derive(Clone)]
struct LiveSession {
    catalog: StepCatalog,
    handle: Rc<SessionHandle>,
}

impl PartialEq for LiveSession {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}

/// Lets view tests drive the session the screen is showing.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    session: Rc<RefCell<Option<Rc<SessionHandle>>>>,
    checkout: Rc<RefCell<Option<Callback<CheckoutLink>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    fn register(&self, handle: Rc<SessionHandle>, checkout: Callback<CheckoutLink>) {
        *self.session.borrow_mut() = Some(handle);
        *self.checkout.borrow_mut() = Some(checkout);
    }

    pub(crate) fn session(&self) -> Option<Rc<SessionHandle>> {
        self.session.borrow().clone()
    }

    pub(crate) fn checkout(&self) -> Option<Callback<CheckoutLink>> {
        self.checkout.borrow().clone()
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let source = ctx.catalog_source();
    let config = ctx.funnel_config();

    let resource = use_resource(move || {
        let source = Arc::clone(&source);
        let config = config.clone();
        async move {
            let catalog = source.load_catalog().await.map_err(|err| {
                error!(source = %source.describe(), error = %err, "failed to load catalog");
                ViewError::CatalogUnavailable
            })?;
            let handle = SessionHandle::spawn(catalog.clone(), config).map_err(|err| {
                error!(error = %err, "failed to start quiz session");
                ViewError::SessionUnavailable
            })?;
            info!(session = %handle.session_id(), steps = catalog.len(), "quiz session started");
            Ok::<_, ViewError>(LiveSession {
                catalog,
                handle: Rc::new(handle),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        main { id: "{QUIZ_ROOT_ID}", class: "quiz-root",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { class: "quiz-booting", aria_busy: "true" }
                },
                ViewState::Ready(session) => rsx! {
                    QuizScreen { session }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "quiz-error", role: "alert", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuizScreen(session: LiveSession) -> Element {
    let ctx = use_context::<AppContext>();
    let sfx = ctx.sound_effects();
    let config = ctx.funnel_config();
    let handle = Rc::clone(&session.handle);

    let mut snapshot = use_signal(|| handle.snapshot());
    let mut date_value = use_signal(String::new);
    let mut date_error = use_signal(|| None::<BirthDateError>);

    use_hook(|| {
        if let Some(js) = sfx.acquire_script() {
            let _ = eval(&js);
        }
    });
    use_drop(move || {
        if let Some(js) = sfx.release_script() {
            let _ = eval(&js);
        }
    });

    {
        let handle = Rc::clone(&handle);
        use_future(move || {
            let mut updates = handle.watch();
            async move {
                while updates.changed().await.is_ok() {
                    let next = updates.borrow_and_update().clone();
                    snapshot.set(next);
                }
            }
        });
    }

    {
        let handle = Rc::clone(&handle);
        use_future(move || {
            let mut events = handle.subscribe();
            async move {
                loop {
                    match events.recv().await {
                        Ok(SessionEvent::StepEntered { index, step_id, .. }) => {
                            debug!(index, step = %step_id, "step entered");
                            let _ = eval(&step_entered_script());
                        }
                        Ok(SessionEvent::SelectionChanged { .. }) => {
                            if let Some(js) = sfx.click_script() {
                                let _ = eval(&js);
                            }
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(skipped)) => warn!(skipped, "quiz events lagged"),
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        });
    }

    let on_select = {
        let handle = Rc::clone(&handle);
        use_callback(move |option: OptionId| {
            if let Err(err) = handle.select_option(option) {
                warn!(error = %err, "select dropped");
            }
        })
    };
    let on_continue = {
        let handle = Rc::clone(&handle);
        use_callback(move |()| {
            if let Err(err) = handle.advance() {
                warn!(error = %err, "advance dropped");
            }
        })
    };
    let on_date = {
        let handle = Rc::clone(&handle);
        use_callback(move |raw: String| {
            let today = chrono::Local::now().date_naive();
            // Only a valid date opens the gate; anything else clears it.
            let accepted = match parse_birth_date(&raw, today) {
                Ok(_) => {
                    date_error.set(None);
                    raw.trim().to_string()
                }
                Err(err) => {
                    date_error.set((err != BirthDateError::Empty).then_some(err));
                    String::new()
                }
            };
            if let Err(err) = handle.set_birth_date(accepted) {
                warn!(error = %err, "birth date dropped");
            }
            date_value.set(raw);
        })
    };
    let on_checkout = {
        let opener = ctx.link_opener();
        use_callback(move |link: CheckoutLink| {
            info!(host = ?link.host(), "checkout requested");
            opener.open_url(link.as_str());
        })
    };

    #[cfg(test)]
    {
        let handle = Rc::clone(&handle);
        use_hook(move || {
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(handle, on_checkout);
            }
        });
    }

    let current = snapshot.read().clone();
    let Ok(step) = session.catalog.step_at(current.current_step_index()) else {
        return rsx! {
            p { class: "quiz-error", role: "alert", "{ViewError::Unknown.message()}" }
        };
    };
    let vm = map_quiz_vm(step, &current, &config);

    rsx! {
        ProgressBar { percent: vm.progress_percent }
        match vm.step {
            StepVm::Intro { title, text, button } | StepVm::Transition { title, text, button } => rsx! {
                NarrativeStep { title, text, button, on_continue }
            },
            StepVm::Question(question) => rsx! {
                QuestionStep { question, on_select, on_continue }
            },
            StepVm::DateInput { question, subtitle, button, can_continue } => rsx! {
                DateStep {
                    question,
                    subtitle,
                    button,
                    value: date_value(),
                    error: date_error(),
                    can_continue,
                    on_input: on_date,
                    on_continue,
                }
            },
            StepVm::Loading { title, text } => rsx! {
                LoadingStep { title, text }
            },
            StepVm::PreRevelation { title, text, button, checkout } => rsx! {
                PreRevelationStep { title, text, button, checkout, on_checkout }
            },
        }
    }
}
