use std::sync::Arc;

use content::CatalogSource;
use services::FunnelConfig;

use crate::audio::SoundEffects;
use crate::platform::LinkOpenerRef;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn catalog_source(&self) -> Arc<dyn CatalogSource>;
    fn funnel_config(&self) -> FunnelConfig;
    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    catalog_source: Arc<dyn CatalogSource>,
    funnel_config: FunnelConfig,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog_source: app.catalog_source(),
            funnel_config: app.funnel_config(),
            link_opener: app.link_opener(),
        }
    }

    #[must_use]
    pub fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.catalog_source)
    }

    #[must_use]
    pub fn funnel_config(&self) -> FunnelConfig {
        self.funnel_config.clone()
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }

    #[must_use]
    pub fn sound_effects(&self) -> SoundEffects {
        SoundEffects::new(self.funnel_config.sound_effects())
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
