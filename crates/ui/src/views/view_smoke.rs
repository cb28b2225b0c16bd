use std::time::Duration;

use content::default_catalog;
use quiz_core::model::{CheckoutLink, OptionId, StepCatalog, StepDefinition, StepId, StepKind};
use services::FunnelConfig;

use super::test_harness::setup_view_harness;

/// Default select delay; only the analysis screen is shortened.
fn quick_analysis_config() -> FunnelConfig {
    FunnelConfig::default().with_analysis_duration(Duration::from_millis(50))
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_intro() {
    let mut harness = setup_view_harness(default_catalog().unwrap(), quick_analysis_config());
    harness.rebuild();

    let html = harness
        .render_until(|html| html.contains("quiz-step--narrative"))
        .await;
    assert!(html.contains("Vamos revelar"), "missing intro title in {html}");
    assert!(html.contains("quiz-progress-fill"), "missing progress bar in {html}");
    assert!(harness.handles.session().is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn single_select_question_moves_on_by_itself() {
    let mut harness = setup_view_harness(default_catalog().unwrap(), quick_analysis_config());
    harness.rebuild();
    harness
        .render_until(|html| html.contains("quiz-step--narrative"))
        .await;

    let session = harness.handles.session().unwrap();
    session.advance().unwrap();
    let html = harness
        .render_until(|html| html.contains("quiz-step--question"))
        .await;
    assert!(html.contains("andar em círculos"), "missing question in {html}");
    assert!(!html.contains("quiz-continue"), "single select shows no button: {html}");

    session.select_option(OptionId::new("circles").unwrap()).unwrap();
    let html = harness
        .render_until(|html| html.contains("Em qual dessas"))
        .await;
    assert!(html.contains("Escolha até 2 áreas."), "missing cap hint in {html}");
}

fn loading_catalog() -> StepCatalog {
    StepCatalog::new(vec![
        StepDefinition::new(StepId::new(1), StepKind::LoadingAnalysis).with_title("Analisando"),
        StepDefinition::new(StepId::new(2), StepKind::PreRevelation)
            .with_title("Pronto")
            .with_button_label("Quero fazer o ritual"),
    ])
    .unwrap()
}

fn ritual_config() -> FunnelConfig {
    quick_analysis_config()
        .with_checkout_url(CheckoutLink::parse("https://pay.example.com/ritual").unwrap())
}

#[tokio::test(flavor = "current_thread")]
async fn loading_first_catalog_reaches_checkout() {
    let mut harness = setup_view_harness(loading_catalog(), ritual_config());
    harness.rebuild();

    let html = harness
        .render_until(|html| html.contains("quiz-step--loading"))
        .await;
    assert!(html.contains("Analisando"), "missing loading title in {html}");

    let html = harness
        .render_until(|html| html.contains("quiz-checkout"))
        .await;
    assert!(html.contains("Quero fazer o ritual"), "missing cta in {html}");
    assert!(harness.opener.opened().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn checkout_button_opens_the_configured_link() {
    let mut harness = setup_view_harness(loading_catalog(), ritual_config());
    harness.rebuild();
    harness
        .render_until(|html| html.contains("quiz-checkout"))
        .await;

    let checkout = harness.handles.checkout().unwrap();
    checkout.call(CheckoutLink::parse("https://pay.example.com/ritual").unwrap());
    harness.drive_async().await;

    assert_eq!(
        harness.opener.opened(),
        vec!["https://pay.example.com/ritual".to_string()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_config_renders_error() {
    let config = FunnelConfig::default().with_select_delay(Duration::ZERO);
    let mut harness = setup_view_harness(default_catalog().unwrap(), config);
    harness.rebuild();

    let html = harness
        .render_until(|html| html.contains("quiz-error"))
        .await;
    assert!(
        html.contains("Não foi possível iniciar o quiz."),
        "missing error message in {html}"
    );
    assert!(harness.handles.session().is_none());
}
